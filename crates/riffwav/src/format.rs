//! WAV audio format parameters.

use serde::{Deserialize, Serialize};

/// PCM audio format code stored in the `fmt ` chunk.
pub const AUDIO_FORMAT_PCM: u16 = 1;

/// WAV audio format parameters.
///
/// No cross-field validation is performed. Zero channels or unusual bit
/// depths are written to the header as given. 8-bit samples are unsigned and
/// 16-bit samples are signed little-endian; other depths are written but
/// their sample layout is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WavFormat {
    /// Number of channels (1 = mono, 2 = stereo).
    pub channels: u8,
    /// Sample rate per channel in Hz.
    pub sample_rate: u32,
    /// Bits per sample per channel, typically 8 or 16.
    pub bits_per_sample: u8,
}

impl Default for WavFormat {
    fn default() -> Self {
        Self::mono(16000)
    }
}

impl WavFormat {
    /// Creates a format from explicit parameters.
    pub fn new(channels: u8, sample_rate: u32, bits_per_sample: u8) -> Self {
        Self {
            channels,
            sample_rate,
            bits_per_sample,
        }
    }

    /// Creates a 16-bit mono format.
    pub fn mono(sample_rate: u32) -> Self {
        Self::new(1, sample_rate, 16)
    }

    /// Creates a 16-bit stereo format.
    pub fn stereo(sample_rate: u32) -> Self {
        Self::new(2, sample_rate, 16)
    }

    /// Calculates block align (bytes per sample frame).
    pub fn block_align(&self) -> u16 {
        (self.channels as u16 * self.bits_per_sample as u16) / 8
    }

    /// Calculates byte rate (bytes per second).
    ///
    /// Computed as `sample_rate * channels * bits_per_sample / 8` in wrapping
    /// 32-bit arithmetic, matching the width of the header field.
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate
            .wrapping_mul(self.channels as u32)
            .wrapping_mul(self.bits_per_sample as u32)
            / 8
    }
}

/// Decoded contents of a `fmt ` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FmtChunk {
    /// Audio format code (1 = PCM).
    pub audio_format: u16,
    /// Number of channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Byte rate as stored in the header.
    pub byte_rate: u32,
    /// Block align as stored in the header.
    pub block_align: u16,
    /// Bits per sample.
    pub bits_per_sample: u16,
}

impl FmtChunk {
    /// Whether the chunk describes uncompressed PCM.
    pub fn is_pcm(&self) -> bool {
        self.audio_format == AUDIO_FORMAT_PCM
    }

    /// Converts back to writer parameters when every field fits.
    pub fn to_format(&self) -> Option<WavFormat> {
        Some(WavFormat {
            channels: u8::try_from(self.channels).ok()?,
            sample_rate: self.sample_rate,
            bits_per_sample: u8::try_from(self.bits_per_sample).ok()?,
        })
    }
}
