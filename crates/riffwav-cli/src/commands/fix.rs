//! Fix command implementation
//!
//! Repairs the size fields of a WAV file that was never finalized.

use anyhow::{Context, Result};
use colored::Colorize;
use riffwav::patch_sizes_in_place;
use std::fs::OpenOptions;
use std::process::ExitCode;

/// Run the fix command
///
/// # Arguments
/// * `path` - WAV file with a standard 44-byte header
pub fn run(path: &str) -> Result<ExitCode> {
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .with_context(|| format!("Failed to open {} for writing", path))?;

    let data_size = patch_sizes_in_place(&mut file)
        .with_context(|| format!("Failed to repair header of {}", path))?;

    println!(
        "{} {} (data size {} bytes)",
        "Repaired".green().bold(),
        path,
        data_size
    );
    Ok(ExitCode::SUCCESS)
}
