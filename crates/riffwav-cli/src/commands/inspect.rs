//! Inspect command implementation
//!
//! Reads the leading region of a WAV file, which may come from any tool, and
//! reports its chunk layout and audio format.

use anyhow::{Context, Result};
use colored::Colorize;
use riffwav::chunk;
use riffwav::{FmtChunk, HeaderRef, STANDARD_SIZE};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;

/// Default number of leading bytes scanned for chunks.
pub const DEFAULT_HEADER_BYTES: usize = 4096;

/// One chunk found in the header region.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChunkReport {
    /// Four character tag.
    pub tag: String,
    /// Offset of the chunk header.
    pub offset: usize,
    /// Declared payload size.
    pub size: u32,
}

/// Result of inspecting a WAV file.
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    /// Total file size in bytes.
    pub file_size: u64,
    /// Whether the file starts with a RIFF/WAVE preamble.
    pub riff_wave: bool,
    /// RIFF size field (file size minus 8 for consistent files).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub riff_size: Option<u32>,
    /// Chunks found in scan order.
    pub chunks: Vec<ChunkReport>,
    /// Decoded `fmt ` chunk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fmt: Option<FmtChunk>,
    /// Offset of the first sample byte.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_offset: Option<usize>,
    /// Declared `data` payload size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_size: Option<u32>,
    /// Inconsistencies noticed while inspecting.
    pub warnings: Vec<String>,
}

/// Builds a report from the leading bytes of a file and its total size.
pub fn inspect_bytes(bytes: &[u8], file_size: u64) -> InspectReport {
    let view = HeaderRef::new(bytes);
    let riff_wave = view.is_riff_wave();
    let mut warnings = Vec::new();

    let chunks: Vec<ChunkReport> = view
        .chunks()
        .map(|c| ChunkReport {
            tag: c.tag(),
            offset: c.offset,
            size: c.data_size,
        })
        .collect();

    let fmt = match view.read_fmt() {
        Ok(fmt) => {
            if !fmt.is_pcm() {
                warnings.push(format!("audio format {} is not PCM", fmt.audio_format));
            }
            Some(fmt)
        }
        Err(e) => {
            warnings.push(e.to_string());
            None
        }
    };

    let data = view.find_chunk(chunk::DATA);
    match data {
        Some(data) => {
            let end = data.data_offset as u64 + data.data_size as u64;
            if end > file_size {
                warnings.push(format!(
                    "data chunk claims {} bytes but only {} remain in the file",
                    data.data_size,
                    file_size.saturating_sub(data.data_offset as u64)
                ));
            } else if data.data_size == 0 && file_size > data.data_offset as u64 {
                warnings.push(
                    "data size is 0 but the file has sample bytes; run `riffwav fix`".to_string(),
                );
            }
        }
        None => warnings.push(format!(
            "no 'data' chunk within the first {} bytes",
            bytes.len()
        )),
    }

    let riff_size = view.get_u32_le(4).ok().filter(|_| riff_wave);
    if let Some(size) = riff_size {
        if size as u64 + 8 != file_size {
            warnings.push(format!(
                "RIFF size {} does not match file size {}",
                size, file_size
            ));
        }
    }

    InspectReport {
        file_size,
        riff_wave,
        riff_size,
        chunks,
        fmt,
        data_offset: data.map(|d| d.data_offset),
        data_size: data.map(|d| d.data_size),
        warnings,
    }
}

/// Run the inspect command
///
/// # Arguments
/// * `path` - WAV file to inspect
/// * `header_bytes` - Number of leading bytes to scan
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 for a RIFF/WAVE file, 1 otherwise
pub fn run(path: &str, header_bytes: usize, json_output: bool) -> Result<ExitCode> {
    let file = File::open(Path::new(path)).with_context(|| format!("Failed to open {}", path))?;
    let file_size = file
        .metadata()
        .with_context(|| format!("Failed to stat {}", path))?
        .len();

    let mut bytes = Vec::with_capacity(header_bytes.max(STANDARD_SIZE));
    file.take(header_bytes as u64)
        .read_to_end(&mut bytes)
        .with_context(|| format!("Failed to read header of {}", path))?;
    debug!(path, read = bytes.len(), file_size, "read header region");

    let report = inspect_bytes(&bytes, file_size);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_human(path, &report);
    }

    Ok(if report.riff_wave {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn print_human(path: &str, report: &InspectReport) {
    println!("{} {}", "Inspecting:".cyan().bold(), path);
    println!("  {} {} bytes", "File size:".dimmed(), report.file_size);

    if !report.riff_wave {
        println!("  {} not a RIFF/WAVE file", "!!".red());
        return;
    }
    if let Some(size) = report.riff_size {
        println!("  {} {}", "RIFF size:".dimmed(), size);
    }

    println!();
    println!("{}", "Chunks:".bold());
    for c in &report.chunks {
        println!(
            "  {} '{}' at {} ({} bytes)",
            "->".green(),
            c.tag,
            c.offset,
            c.size
        );
    }

    if let Some(fmt) = &report.fmt {
        println!();
        println!("{}", "Format:".bold());
        println!("  audio format    {}", fmt.audio_format);
        println!("  channels        {}", fmt.channels);
        println!("  sample rate     {} Hz", fmt.sample_rate);
        println!("  byte rate       {}", fmt.byte_rate);
        println!("  block align     {}", fmt.block_align);
        println!("  bits per sample {}", fmt.bits_per_sample);
    }

    if let (Some(offset), Some(size)) = (report.data_offset, report.data_size) {
        println!();
        println!(
            "{} offset {}, {} bytes",
            "Data:".bold(),
            offset,
            size
        );
    }

    if !report.warnings.is_empty() {
        println!();
        for warning in &report.warnings {
            println!("  {} {}", "!".yellow(), warning);
        }
    }

    let extra = report
        .chunks
        .iter()
        .filter(|c| c.tag != "fmt " && c.tag != "data")
        .count();
    if extra > 0 {
        println!(
            "{}",
            format!("{} chunk(s) besides 'fmt ' and 'data' were skipped", extra).dimmed()
        );
    }
}
