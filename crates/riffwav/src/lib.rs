//! RIFF/WAVE header codec
//!
//! This crate encodes and decodes the header of canonical PCM WAV files and
//! streams WAV files whose length is only known once writing is done.
//!
//! # Overview
//!
//! - **Header codec** - a fixed-capacity, array-backed buffer with
//!   bounds-checked 16/32-bit field accessors, a writer for the standard
//!   44-byte header, in-place patching of the two size fields, and a chunk
//!   scanner that locates sub-chunks in headers written by other tools.
//! - **Streaming writer** - writes a placeholder header to a seekable
//!   stream, lets the caller append samples, then patches the sizes from the
//!   final stream length.
//!
//! No heap allocation is needed for encoding or decoding a header. The
//! sample payload is never interpreted.
//!
//! # Example
//!
//! ```
//! use riffwav::{chunk, StandardHeader, WavFormat};
//!
//! let mut header = StandardHeader::new();
//! header.write_header(&WavFormat::stereo(22050), 0)?;
//! header.set_data_size(1000)?;
//!
//! let data = header.find_chunk(chunk::DATA).expect("data chunk");
//! assert_eq!(data.data_offset, 44);
//! assert_eq!(data.data_size, 1000);
//! # Ok::<(), riffwav::HeaderError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`header`] - header buffer, borrowed views and field offsets
//! - [`chunk`] - chunk ids and the sequential chunk scanner
//! - [`format`] - audio format parameters and decoded `fmt ` chunk
//! - [`writer`] - streaming writer over `Write + Seek`
//! - [`repair`] - size repair for files that were never finalized

pub mod chunk;
pub mod error;
pub mod format;
pub mod header;
pub mod repair;
pub mod writer;

// Re-export main types at crate root
pub use chunk::{four_cc, parse_four_cc, ChunkInfo};
pub use error::{HeaderError, HeaderResult};
pub use format::{FmtChunk, WavFormat};
pub use header::{HeaderMut, HeaderRef, StandardHeader, WavHeader, STANDARD_SIZE};
pub use repair::patch_sizes_in_place;
pub use writer::{SetLen, WavStreamWriter, WriterState};
