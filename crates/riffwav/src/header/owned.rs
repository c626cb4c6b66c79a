//! Array-backed header buffer.

use super::{HeaderMut, HeaderRef, STANDARD_SIZE};
use crate::chunk::{ChunkInfo, Chunks};
use crate::error::HeaderResult;
use crate::format::{FmtChunk, WavFormat};

/// Header buffer of exactly [`STANDARD_SIZE`] bytes, enough for writing.
pub type StandardHeader = WavHeader<STANDARD_SIZE>;

/// Header codec owning a fixed `N`-byte buffer.
///
/// Writing requires `N >= 44`. For reading headers produced elsewhere, pick
/// `N` large enough to hold every sub-chunk up to and including the `data`
/// chunk header, then [`load`](Self::load) the leading bytes of the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavHeader<const N: usize> {
    buffer: [u8; N],
    cursor: usize,
}

impl<const N: usize> Default for WavHeader<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> WavHeader<N> {
    /// Creates a zeroed header buffer.
    pub fn new() -> Self {
        Self {
            buffer: [0; N],
            cursor: 0,
        }
    }

    /// Read-only view over the whole buffer.
    pub fn view(&self) -> HeaderRef<'_> {
        HeaderRef::new(&self.buffer)
    }

    /// Mutable view over the buffer and cursor.
    pub fn view_mut(&mut self) -> HeaderMut<'_> {
        HeaderMut::new(&mut self.buffer, &mut self.cursor)
    }

    /// Raw buffer contents.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Mutable raw buffer.
    ///
    /// Direct writes do not move the cursor, so chunk scans will not see
    /// them; use [`load`](Self::load) for bytes read from storage.
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    /// Buffer capacity in bytes.
    pub fn capacity(&self) -> usize {
        N
    }

    /// Bytes written so far by sequential operations.
    pub fn bytes_written(&self) -> usize {
        self.cursor
    }

    /// The bytes written so far.
    pub fn written(&self) -> &[u8] {
        &self.buffer[..self.cursor]
    }

    /// Copies the leading bytes of a file into the buffer.
    ///
    /// Copies at most `N` bytes, zeroes the remainder, and sets the cursor to
    /// the number of bytes copied, which is returned.
    pub fn load(&mut self, bytes: &[u8]) -> usize {
        let len = bytes.len().min(N);
        self.buffer[..len].copy_from_slice(&bytes[..len]);
        self.buffer[len..].fill(0);
        self.cursor = len;
        len
    }

    /// Appends bytes at the cursor. See [`HeaderMut::append`].
    pub fn append(&mut self, bytes: &[u8]) -> HeaderResult<()> {
        self.view_mut().append(bytes)
    }

    /// Writes a standard header. See [`HeaderMut::write_header`].
    pub fn write_header(&mut self, format: &WavFormat, data_size: u32) -> HeaderResult<()> {
        self.view_mut().write_header(format, data_size)
    }

    /// Patches both size fields. See [`HeaderMut::set_data_size`].
    pub fn set_data_size(&mut self, data_size: u32) -> HeaderResult<()> {
        self.view_mut().set_data_size(data_size)
    }

    /// Offset of the sample payload for headers written by this codec.
    ///
    /// Always 44. Headers from other tools may place `data` later; use
    /// [`find_chunk`](Self::find_chunk) with [`DATA`](crate::chunk::DATA) for those.
    pub fn data_offset(&self) -> u32 {
        STANDARD_SIZE as u32
    }

    // Scans stop at the cursor; the zeroed tail past it holds no chunks.
    fn written_view(&self) -> HeaderRef<'_> {
        HeaderRef::new(self.written())
    }

    /// Finds a sub-chunk in the bytes written so far. See [`HeaderRef::find_chunk`].
    pub fn find_chunk(&self, id: u32) -> Option<ChunkInfo> {
        self.written_view().find_chunk(id)
    }

    /// Iterates over the sub-chunks in the bytes written so far.
    pub fn chunks(&self) -> Chunks<'_> {
        Chunks::new(self.written())
    }

    /// Checks the `RIFF`/`WAVE` preamble.
    pub fn is_riff_wave(&self) -> bool {
        self.written_view().is_riff_wave()
    }

    /// Decodes the `fmt ` chunk from the bytes written so far.
    pub fn read_fmt(&self) -> HeaderResult<FmtChunk> {
        self.written_view().read_fmt()
    }

    /// Reads a little-endian `u16` at `offset`.
    pub fn get_u16_le(&self, offset: usize) -> HeaderResult<u16> {
        self.view().get_u16_le(offset)
    }

    /// Writes a little-endian `u16` at `offset`.
    pub fn set_u16_le(&mut self, offset: usize, value: u16) -> HeaderResult<()> {
        self.view_mut().set_u16_le(offset, value)
    }

    /// Reads a little-endian `u32` at `offset`.
    pub fn get_u32_le(&self, offset: usize) -> HeaderResult<u32> {
        self.view().get_u32_le(offset)
    }

    /// Writes a little-endian `u32` at `offset`.
    pub fn set_u32_le(&mut self, offset: usize, value: u32) -> HeaderResult<()> {
        self.view_mut().set_u32_le(offset, value)
    }

    /// Reads a big-endian `u32` at `offset`, the packing used for tags.
    pub fn get_u32_be(&self, offset: usize) -> HeaderResult<u32> {
        self.view().get_u32_be(offset)
    }

    /// Writes a big-endian `u32` at `offset`.
    pub fn set_u32_be(&mut self, offset: usize, value: u32) -> HeaderResult<()> {
        self.view_mut().set_u32_be(offset, value)
    }
}
