//! riffwav CLI - Command-line interface for WAV header encoding and repair
//!
//! This binary dumps freshly encoded headers, inspects WAV files written by
//! any tool, streams silent files and repairs files that were never finalized.

use clap::{Args, Parser, Subcommand};
use riffwav::WavFormat;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use riffwav_cli::commands;

/// riffwav - RIFF/WAVE header tool
#[derive(Parser)]
#[command(name = "riffwav")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log codec activity to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Audio parameters shared by commands that write headers.
#[derive(Args, Debug, Clone, Copy)]
struct FormatArgs {
    /// Number of channels
    #[arg(short, long, default_value_t = 2)]
    channels: u8,

    /// Sample rate per channel in Hz
    #[arg(short = 'r', long, default_value_t = 22050)]
    sample_rate: u32,

    /// Bits per sample per channel
    #[arg(short, long, default_value_t = 16)]
    bits: u8,
}

impl From<FormatArgs> for WavFormat {
    fn from(args: FormatArgs) -> Self {
        WavFormat::new(args.channels, args.sample_rate, args.bits)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a standard 44-byte header and print a hex dump
    Header {
        #[command(flatten)]
        format: FormatArgs,

        /// Value for the data chunk size
        #[arg(short, long, default_value_t = 0)]
        data_size: u32,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Report the chunk layout and audio format of a WAV file
    Inspect {
        /// Path to the WAV file
        file: String,

        /// Number of leading bytes to scan for chunks
        #[arg(long, default_value_t = commands::inspect::DEFAULT_HEADER_BYTES)]
        header_bytes: usize,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Stream a silent WAV file to disk
    Blank {
        /// Output file path
        out: String,

        #[command(flatten)]
        format: FormatArgs,

        /// Duration in seconds
        #[arg(short, long, default_value_t = 1.0)]
        seconds: f64,
    },

    /// Patch the size fields of a WAV file that was never finalized
    Fix {
        /// Path to the WAV file
        file: String,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Header {
            format,
            data_size,
            json,
        } => commands::header::run(format.into(), data_size, json),
        Commands::Inspect {
            file,
            header_bytes,
            json,
        } => commands::inspect::run(&file, header_bytes, json),
        Commands::Blank {
            out,
            format,
            seconds,
        } => commands::blank::run(&out, format.into(), seconds),
        Commands::Fix { file } => commands::fix::run(&file),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
