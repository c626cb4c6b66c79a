//! RIFF/WAVE header codec.
//!
//! The codec works on a fixed-size byte buffer. Field accessors are
//! bounds-checked against the buffer, chunk lookups are done by scanning
//! chunk headers so that headers written by other tools can be read.
//!
//! - [`HeaderRef`] - read-only view over a borrowed header region
//! - [`HeaderMut`] - mutable view over a borrowed buffer and write cursor
//! - [`WavHeader`] - owns an array-backed buffer and composes both views

mod owned;
mod view;

#[cfg(test)]
mod tests;

pub use owned::{StandardHeader, WavHeader};
pub use view::{HeaderMut, HeaderRef};

/// Size of the header written by [`HeaderMut::write_header`].
///
/// Headers read from other tools are often this size too, but may be larger
/// when extra sub-chunks precede `data`.
pub const STANDARD_SIZE: usize = 44;

/// Length of the `fmt ` payload for PCM.
pub const PCM_FMT_SIZE: u32 = 16;

/// Difference between the RIFF size field and the data size for a
/// standard header (`STANDARD_SIZE - 8`).
pub const RIFF_SIZE_OVERHEAD: u32 = 36;

/// Fixed field offsets of a standard 44-byte header.
pub mod offsets {
    /// `RIFF` tag.
    pub const RIFF_ID: usize = 0;
    /// RIFF payload size (file size minus 8).
    pub const RIFF_SIZE: usize = 4;
    /// `WAVE` form type.
    pub const WAVE_ID: usize = 8;
    /// `fmt ` tag.
    pub const FMT_ID: usize = 12;
    /// `fmt ` payload length.
    pub const FMT_SIZE: usize = 16;
    /// Audio format code.
    pub const AUDIO_FORMAT: usize = 20;
    /// Channel count.
    pub const CHANNELS: usize = 22;
    /// Sample rate.
    pub const SAMPLE_RATE: usize = 24;
    /// Byte rate.
    pub const BYTE_RATE: usize = 28;
    /// Block align.
    pub const BLOCK_ALIGN: usize = 32;
    /// Bits per sample.
    pub const BITS_PER_SAMPLE: usize = 34;
    /// `data` tag.
    pub const DATA_ID: usize = 36;
    /// `data` payload length.
    pub const DATA_SIZE: usize = 40;
}
