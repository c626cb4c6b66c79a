//! Error types for the header codec and streaming writer.

use thiserror::Error;

use crate::writer::WriterState;

/// Result type for header and writer operations.
pub type HeaderResult<T> = Result<T, HeaderError>;

/// Errors that can occur while encoding, patching or streaming a WAV header.
#[derive(Debug, Error)]
pub enum HeaderError {
    /// The buffer is too small for the requested sequential write.
    #[error("buffer capacity {capacity} is smaller than the {required} bytes required")]
    Capacity {
        /// Bytes the operation needed.
        required: usize,
        /// Bytes the buffer can hold.
        capacity: usize,
    },

    /// A field access would fall outside the buffer.
    #[error("{width}-byte field at offset {offset} is outside a {capacity}-byte buffer")]
    OutOfBounds {
        /// Absolute offset of the field.
        offset: usize,
        /// Width of the field in bytes.
        width: usize,
        /// Bytes the buffer can hold.
        capacity: usize,
    },

    /// A chunk tag was not exactly four ASCII characters.
    #[error("invalid chunk tag {tag:?}: expected four ASCII characters")]
    InvalidTag {
        /// The rejected tag.
        tag: String,
    },

    /// A required chunk was not present in the header region.
    #[error("chunk '{id}' not found in header")]
    ChunkNotFound {
        /// Printable form of the chunk id.
        id: String,
    },

    /// The buffer does not start with a RIFF/WAVE preamble.
    #[error("buffer does not start with a RIFF/WAVE preamble")]
    NotRiffWave,

    /// The header does not use the fixed 44-byte layout.
    #[error("data chunk payload starts at offset {data_offset}, not at the standard offset 44")]
    NonStandardLayout {
        /// Offset of the first payload byte of the `data` chunk.
        data_offset: usize,
    },

    /// A writer operation was called in the wrong lifecycle state.
    #[error("cannot {operation} while writer is {state}")]
    InvalidState {
        /// The operation that was rejected.
        operation: &'static str,
        /// The state the writer was in.
        state: WriterState,
    },

    /// The stream is shorter than the header it is supposed to start with.
    #[error("stream length {length} is shorter than the header")]
    StreamTooShort {
        /// Reported stream length in bytes.
        length: u64,
    },

    /// The payload is too long to be described by 32-bit size fields.
    #[error("stream length {length} cannot be described by a 32-bit WAV header")]
    DataTooLarge {
        /// Reported stream length in bytes.
        length: u64,
    },

    /// I/O error from the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HeaderError {
    /// Creates a chunk-not-found error for a packed chunk id.
    pub fn chunk_not_found(id: u32) -> Self {
        Self::ChunkNotFound {
            id: crate::chunk::four_cc_to_string(id),
        }
    }

    /// Stable code for programmatic error handling.
    pub fn code(&self) -> &'static str {
        match self {
            HeaderError::Capacity { .. } => "WAV_001",
            HeaderError::OutOfBounds { .. } => "WAV_002",
            HeaderError::InvalidTag { .. } => "WAV_003",
            HeaderError::ChunkNotFound { .. } => "WAV_004",
            HeaderError::NotRiffWave => "WAV_005",
            HeaderError::InvalidState { .. } => "WAV_006",
            HeaderError::StreamTooShort { .. } => "WAV_007",
            HeaderError::DataTooLarge { .. } => "WAV_008",
            HeaderError::Io(_) => "WAV_009",
            HeaderError::NonStandardLayout { .. } => "WAV_010",
        }
    }
}
