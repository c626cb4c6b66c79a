//! Blank command implementation
//!
//! Streams a silent WAV file through the streaming writer: header first,
//! samples appended directly to the file, sizes patched at the end.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use riffwav::header::RIFF_SIZE_OVERHEAD;
use riffwav::{WavFormat, WavStreamWriter};
use std::fs::OpenOptions;
use std::io::Write;
use std::process::ExitCode;
use tracing::debug;

const WRITE_BLOCK: usize = 4096;

/// Byte value of a silent sample at the given depth.
///
/// 8-bit PCM is unsigned with silence at 0x80; wider depths are signed.
pub fn silence_byte(bits_per_sample: u8) -> u8 {
    if bits_per_sample == 8 {
        0x80
    } else {
        0x00
    }
}

/// Largest payload whose sizes still fit the 32-bit RIFF fields.
pub const MAX_PAYLOAD: u64 = (u32::MAX - RIFF_SIZE_OVERHEAD) as u64;

/// Number of payload bytes for `seconds` of audio, rounded down to whole frames.
///
/// Fails if the payload would not fit in a WAV file.
pub fn payload_len(format: &WavFormat, seconds: f64) -> Result<u64> {
    let frames = (seconds * format.sample_rate as f64).floor() as u64;
    match frames.checked_mul(format.block_align() as u64) {
        Some(len) if len <= MAX_PAYLOAD => Ok(len),
        _ => bail!(
            "{} seconds at {} Hz exceeds the WAV limit of {} data bytes",
            seconds,
            format.sample_rate,
            MAX_PAYLOAD
        ),
    }
}

/// Run the blank command
///
/// # Arguments
/// * `out` - Output file path (created or truncated)
/// * `format` - Audio parameters
/// * `seconds` - Duration of silence
pub fn run(out: &str, format: WavFormat, seconds: f64) -> Result<ExitCode> {
    if !seconds.is_finite() || seconds < 0.0 {
        bail!("Duration must be a non-negative number of seconds, got {}", seconds);
    }
    let mut remaining = payload_len(&format, seconds)?;

    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(out)
        .with_context(|| format!("Failed to create {}", out))?;

    let mut writer = WavStreamWriter::with_format(format);
    writer
        .start_file(&mut file)
        .with_context(|| format!("Failed to write header to {}", out))?;

    let block = [silence_byte(format.bits_per_sample); WRITE_BLOCK];
    while remaining > 0 {
        let n = remaining.min(WRITE_BLOCK as u64) as usize;
        file.write_all(&block[..n])
            .with_context(|| format!("Failed to write samples to {}", out))?;
        remaining -= n as u64;
    }
    debug!(out, "samples written");

    let data_size = writer
        .update_header_from_length(&mut file)
        .with_context(|| format!("Failed to finalize {}", out))?;

    println!(
        "{} {} ({} bytes of samples)",
        "Wrote".green().bold(),
        out,
        data_size
    );
    Ok(ExitCode::SUCCESS)
}
