//! Streaming WAV writer.
//!
//! Writes a placeholder header, lets the caller append raw samples directly to
//! the stream, then patches the two size fields once the final length is
//! known:
//!
//! ```
//! use std::io::{Cursor, Write};
//! use riffwav::WavStreamWriter;
//!
//! let mut stream = Cursor::new(Vec::new());
//! let mut writer = WavStreamWriter::new()
//!     .with_num_channels(2)
//!     .with_sample_rate(22050)
//!     .with_bits_per_sample(16);
//!
//! writer.start_file(&mut stream)?;
//! stream.write_all(&[0u8; 1000])?;
//! let data_size = writer.update_header_from_length(&mut stream)?;
//!
//! assert_eq!(data_size, 1000);
//! assert_eq!(stream.get_ref().len(), 1044);
//! # Ok::<(), riffwav::HeaderError>(())
//! ```

use std::fmt;
use std::fs::File;
use std::io::{self, Cursor, Seek, SeekFrom, Write};

use tracing::debug;

use crate::error::{HeaderError, HeaderResult};
use crate::format::WavFormat;
use crate::header::{StandardHeader, RIFF_SIZE_OVERHEAD};

/// Lifecycle of a [`WavStreamWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    /// Parameters may be set; no header written yet.
    Configured,
    /// Header is on the stream; samples may be appended.
    HeaderWritten,
    /// Sizes have been patched.
    Finalized,
}

impl fmt::Display for WriterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WriterState::Configured => "configured",
            WriterState::HeaderWritten => "writing samples",
            WriterState::Finalized => "finalized",
        };
        f.write_str(name)
    }
}

/// Streams that can be cut to a given length, like [`File::set_len`].
pub trait SetLen {
    /// Truncates or zero-extends the stream to `len` bytes.
    fn set_len(&mut self, len: u64) -> io::Result<()>;
}

impl SetLen for File {
    fn set_len(&mut self, len: u64) -> io::Result<()> {
        File::set_len(self, len)
    }
}

fn resize_vec(buf: &mut Vec<u8>, len: u64) -> io::Result<()> {
    let len = usize::try_from(len)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "length exceeds address space"))?;
    buf.resize(len, 0);
    Ok(())
}

impl SetLen for Cursor<Vec<u8>> {
    fn set_len(&mut self, len: u64) -> io::Result<()> {
        resize_vec(self.get_mut(), len)
    }
}

impl SetLen for Cursor<&mut Vec<u8>> {
    fn set_len(&mut self, len: u64) -> io::Result<()> {
        resize_vec(self.get_mut(), len)
    }
}

impl<T: SetLen + ?Sized> SetLen for &mut T {
    fn set_len(&mut self, len: u64) -> io::Result<()> {
        (**self).set_len(len)
    }
}

/// Writes a WAV file to a seekable stream whose length is not known up front.
///
/// The stream is borrowed for each call and never closed by the writer.
/// [`start_file`](Self::start_file) discards any previous content, so the
/// header always sits at offset 0.
#[derive(Debug, Clone)]
pub struct WavStreamWriter {
    format: WavFormat,
    header: StandardHeader,
    state: WriterState,
}

impl Default for WavStreamWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl WavStreamWriter {
    /// Creates a writer with the default format (mono, 16 kHz, 16-bit).
    pub fn new() -> Self {
        Self::with_format(WavFormat::default())
    }

    /// Creates a writer for the given format.
    pub fn with_format(format: WavFormat) -> Self {
        Self {
            format,
            header: StandardHeader::new(),
            state: WriterState::Configured,
        }
    }

    /// Sets the number of channels, usually 1 or 2.
    pub fn with_num_channels(mut self, num_channels: u8) -> Self {
        self.format.channels = num_channels;
        self
    }

    /// Sets the sample rate per channel in Hz.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.format.sample_rate = sample_rate;
        self
    }

    /// Sets the bits per sample per channel, typically 8 or 16.
    pub fn with_bits_per_sample(mut self, bits_per_sample: u8) -> Self {
        self.format.bits_per_sample = bits_per_sample;
        self
    }

    /// Configured number of channels.
    pub fn num_channels(&self) -> u8 {
        self.format.channels
    }

    /// Configured sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.format.sample_rate
    }

    /// Configured bits per sample.
    pub fn bits_per_sample(&self) -> u8 {
        self.format.bits_per_sample
    }

    /// Current format parameters.
    pub fn format(&self) -> &WavFormat {
        &self.format
    }

    /// Current lifecycle state.
    pub fn state(&self) -> WriterState {
        self.state
    }

    /// The in-memory copy of the header last written to the stream.
    pub fn header(&self) -> &StandardHeader {
        &self.header
    }

    fn expect_state(&self, expected: WriterState, operation: &'static str) -> HeaderResult<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(HeaderError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }

    /// Empties the stream and writes a header with a zero data size.
    ///
    /// Existing content is truncated whatever the stream position was, and
    /// the header is written at offset 0. Afterwards the stream is positioned
    /// where sample data goes. Fails if called more than once.
    pub fn start_file<S: Write + Seek + SetLen>(&mut self, stream: &mut S) -> HeaderResult<()> {
        self.expect_state(WriterState::Configured, "start file")?;

        self.header.write_header(&self.format, 0)?;
        stream.set_len(0)?;
        stream.seek(SeekFrom::Start(0))?;
        stream.write_all(self.header.written())?;

        self.state = WriterState::HeaderWritten;
        debug!(format = ?self.format, "started wav file");
        Ok(())
    }

    /// Patches the header sizes from the stream's total length.
    ///
    /// Call once after all samples have been appended. The data size is the
    /// stream length minus the 44 header bytes. The stream position is left
    /// just after the header. Returns the data size written.
    pub fn update_header_from_length<S: Write + Seek>(
        &mut self,
        stream: &mut S,
    ) -> HeaderResult<u32> {
        self.expect_state(WriterState::HeaderWritten, "update header from length")?;

        let length = stream.seek(SeekFrom::End(0))?;
        let data_size = data_size_for_length(length, self.header.data_offset())?;

        self.header.set_data_size(data_size)?;
        stream.seek(SeekFrom::Start(0))?;
        stream.write_all(self.header.written())?;
        stream.flush()?;

        self.state = WriterState::Finalized;
        debug!(length, data_size, "finalized wav file");
        Ok(data_size)
    }
}

/// Converts a stream length into the payload size stored in the header.
pub(crate) fn data_size_for_length(length: u64, data_offset: u32) -> HeaderResult<u32> {
    let payload = length
        .checked_sub(data_offset as u64)
        .ok_or(HeaderError::StreamTooShort { length })?;
    u32::try_from(payload)
        .ok()
        .filter(|&size| size <= u32::MAX - RIFF_SIZE_OVERHEAD)
        .ok_or(HeaderError::DataTooLarge { length })
}
