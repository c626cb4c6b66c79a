//! Chunk identifiers and the sequential chunk scanner.
//!
//! RIFF chunks are stored as a 4-byte tag, a 4-byte little-endian payload
//! length, then the payload. Positions are derived purely by walking from the
//! end of the `RIFF`/`WAVE` preamble and skipping each declared length.
//!
//! Odd-length chunks are not padded to a word boundary while scanning. Files
//! that carry an odd-sized chunk before the one being searched for will not be
//! located correctly.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use tracing::{debug, trace};

use crate::error::{HeaderError, HeaderResult};

/// `RIFF` outer chunk id.
pub const RIFF: u32 = four_cc(b"RIFF");
/// `WAVE` form type stored at the start of the RIFF payload.
pub const WAVE: u32 = four_cc(b"WAVE");
/// `fmt ` sub-chunk id.
pub const FMT: u32 = four_cc(b"fmt ");
/// `data` sub-chunk id.
pub const DATA: u32 = four_cc(b"data");

/// Offset of the first sub-chunk, just past `RIFF`, the file size and `WAVE`.
pub const FIRST_CHUNK_OFFSET: usize = 12;

/// Size of a chunk header (tag plus length).
pub const CHUNK_HEADER_SIZE: usize = 8;

/// Packs a four character tag into its 32-bit id.
///
/// Tags are packed big-endian so that the id equals the value read with
/// `get_u32_be` at the tag's offset.
pub const fn four_cc(tag: &[u8; 4]) -> u32 {
    u32::from_be_bytes(*tag)
}

/// Parses a four character ASCII tag such as `"fmt "` or `"LIST"`.
pub fn parse_four_cc(tag: &str) -> HeaderResult<u32> {
    let bytes: [u8; 4] = tag
        .as_bytes()
        .try_into()
        .ok()
        .filter(|b: &[u8; 4]| b.is_ascii())
        .ok_or_else(|| HeaderError::InvalidTag {
            tag: tag.to_string(),
        })?;
    Ok(four_cc(&bytes))
}

/// Renders a packed id back into printable text.
///
/// Non-printable bytes are shown as `.`.
pub fn four_cc_to_string(id: u32) -> String {
    id.to_be_bytes()
        .iter()
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '.'
            }
        })
        .collect()
}

/// Location of one sub-chunk found by scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkInfo {
    /// Packed chunk id.
    pub id: u32,
    /// Offset of the chunk header.
    pub offset: usize,
    /// Offset of the first payload byte (`offset + 8`).
    pub data_offset: usize,
    /// Declared payload length.
    pub data_size: u32,
}

impl ChunkInfo {
    /// Printable chunk tag.
    pub fn tag(&self) -> String {
        four_cc_to_string(self.id)
    }

    /// Offset one past the declared payload, or `None` on overflow.
    pub fn end(&self) -> Option<usize> {
        self.data_offset.checked_add(self.data_size as usize)
    }
}

/// Iterator over the sub-chunks of a header region.
///
/// Only chunk headers that lie completely inside the slice are yielded. The
/// declared payload of the last chunk may extend past the slice; none of its
/// bytes are read.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    buf: &'a [u8],
    pos: Option<usize>,
}

impl<'a> Chunks<'a> {
    /// Starts a scan at [`FIRST_CHUNK_OFFSET`].
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: Some(FIRST_CHUNK_OFFSET),
        }
    }
}

impl Iterator for Chunks<'_> {
    type Item = ChunkInfo;

    fn next(&mut self) -> Option<ChunkInfo> {
        let pos = self.pos?;
        let data_offset = match pos.checked_add(CHUNK_HEADER_SIZE) {
            Some(end) if end <= self.buf.len() => end,
            _ => {
                self.pos = None;
                return None;
            }
        };

        let id = BigEndian::read_u32(&self.buf[pos..pos + 4]);
        let data_size = LittleEndian::read_u32(&self.buf[pos + 4..data_offset]);
        let info = ChunkInfo {
            id,
            offset: pos,
            data_offset,
            data_size,
        };
        trace!(tag = %info.tag(), offset = pos, size = data_size, "scanned chunk");

        self.pos = info.end();
        match self.pos {
            Some(next) if next > self.buf.len() => {
                debug!(
                    tag = %info.tag(),
                    end = next,
                    extent = self.buf.len(),
                    "chunk payload extends past scanned region"
                );
            }
            None => debug!(tag = %info.tag(), "chunk size overflows offset"),
            _ => {}
        }

        Some(info)
    }
}

/// Scans `buf` for the first sub-chunk with the given id.
pub fn find_chunk(buf: &[u8], id: u32) -> Option<ChunkInfo> {
    Chunks::new(buf).find(|chunk| chunk.id == id)
}
