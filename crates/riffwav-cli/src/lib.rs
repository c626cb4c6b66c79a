//! riffwav CLI library.
//!
//! Command implementations for the `riffwav` binary: dumping freshly encoded
//! headers, inspecting WAV files, streaming blank files and repairing
//! unfinished ones.

pub mod commands;
