//! Header command implementation
//!
//! Encodes a standard 44-byte header for the given parameters and dumps it.

use anyhow::{Context, Result};
use colored::Colorize;
use riffwav::{StandardHeader, WavFormat};
use serde::Serialize;
use std::process::ExitCode;

/// JSON form of an encoded header.
#[derive(Debug, Serialize)]
pub struct HeaderOutput {
    /// Parameters the header was encoded with.
    pub format: WavFormat,
    /// Data size written into the header.
    pub data_size: u32,
    /// Header bytes as lowercase hex.
    pub hex: String,
}

/// Run the header command
///
/// # Arguments
/// * `format` - Audio parameters to encode
/// * `data_size` - Value for the `data` chunk size (0 if unknown yet)
/// * `json_output` - Whether to output machine-readable JSON
pub fn run(format: WavFormat, data_size: u32, json_output: bool) -> Result<ExitCode> {
    let mut header = StandardHeader::new();
    header
        .write_header(&format, data_size)
        .context("Failed to encode header")?;

    if json_output {
        let output = HeaderOutput {
            format,
            data_size,
            hex: header.written().iter().map(|b| format!("{:02x}", b)).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "{} {} ch, {} Hz, {} bit, data size {}",
            "Header:".cyan().bold(),
            format.channels,
            format.sample_rate,
            format.bits_per_sample,
            data_size
        );
        print!("{}", hex_dump(header.written()));
    }

    Ok(ExitCode::SUCCESS)
}

/// Formats bytes as 16-byte rows of offset, hex and printable ASCII.
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::new();
    for (row, line) in bytes.chunks(16).enumerate() {
        out.push_str(&format!("{:04x}: ", row * 16));
        for i in 0..16 {
            match line.get(i) {
                Some(b) => out.push_str(&format!("{:02x} ", b)),
                None => out.push_str("   "),
            }
        }
        out.push(' ');
        out.extend(line.iter().map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '.'
            }
        }));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_hex_dump_full_and_partial_rows() {
        let dump = hex_dump(b"RIFF\x24\x00\x00\x00WAVEfmt \x10\x00");
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(
            lines,
            vec![
                "0000: 52 49 46 46 24 00 00 00 57 41 56 45 66 6d 74 20  RIFF$...WAVEfmt ",
                "0010: 10 00                                            ..",
            ]
        );
    }

    #[test]
    fn test_hex_dump_empty() {
        assert_eq!(hex_dump(&[]), "");
    }

    #[test]
    fn test_run_succeeds() {
        assert!(run(WavFormat::stereo(22050), 0, true).is_ok());
    }
}
