//! Borrowed views implementing the field and chunk operations.

use std::io::Write;

use byteorder::{BigEndian, ByteOrder, LittleEndian, WriteBytesExt};
use tracing::debug;

use super::{offsets, PCM_FMT_SIZE, RIFF_SIZE_OVERHEAD, STANDARD_SIZE};
use crate::chunk::{self, ChunkInfo, Chunks};
use crate::error::{HeaderError, HeaderResult};
use crate::format::{FmtChunk, WavFormat, AUDIO_FORMAT_PCM};

fn field(buf: &[u8], offset: usize, width: usize) -> HeaderResult<&[u8]> {
    offset
        .checked_add(width)
        .and_then(|end| buf.get(offset..end))
        .ok_or(HeaderError::OutOfBounds {
            offset,
            width,
            capacity: buf.len(),
        })
}

fn field_mut(buf: &mut [u8], offset: usize, width: usize) -> HeaderResult<&mut [u8]> {
    let capacity = buf.len();
    offset
        .checked_add(width)
        .and_then(|end| buf.get_mut(offset..end))
        .ok_or(HeaderError::OutOfBounds {
            offset,
            width,
            capacity,
        })
}

/// Read-only view over a header region.
///
/// The region may be the buffer of a [`WavHeader`](super::WavHeader) or any
/// slice holding the leading bytes of a WAV file.
#[derive(Debug, Clone, Copy)]
pub struct HeaderRef<'a> {
    buf: &'a [u8],
}

impl<'a> HeaderRef<'a> {
    /// Wraps a header region.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    /// The viewed bytes.
    pub fn bytes(&self) -> &'a [u8] {
        self.buf
    }

    /// Number of bytes in the view.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Reads an unsigned 16-bit little-endian value.
    pub fn get_u16_le(&self, offset: usize) -> HeaderResult<u16> {
        field(self.buf, offset, 2).map(LittleEndian::read_u16)
    }

    /// Reads an unsigned 32-bit little-endian value.
    pub fn get_u32_le(&self, offset: usize) -> HeaderResult<u32> {
        field(self.buf, offset, 4).map(LittleEndian::read_u32)
    }

    /// Reads an unsigned 32-bit big-endian value.
    pub fn get_u32_be(&self, offset: usize) -> HeaderResult<u32> {
        field(self.buf, offset, 4).map(BigEndian::read_u32)
    }

    /// Checks for `RIFF` at offset 0 and `WAVE` at offset 8.
    pub fn is_riff_wave(&self) -> bool {
        self.get_u32_be(offsets::RIFF_ID).ok() == Some(chunk::RIFF)
            && self.get_u32_be(offsets::WAVE_ID).ok() == Some(chunk::WAVE)
    }

    /// Iterates over the sub-chunks following the preamble.
    pub fn chunks(&self) -> Chunks<'a> {
        Chunks::new(self.buf)
    }

    /// Finds the first sub-chunk with the given id.
    ///
    /// The whole header must be inside the view. `None` means the chunk was
    /// not found before the scan ran off the end of the view.
    pub fn find_chunk(&self, id: u32) -> Option<ChunkInfo> {
        chunk::find_chunk(self.buf, id)
    }

    /// Locates and decodes the `fmt ` chunk.
    pub fn read_fmt(&self) -> HeaderResult<FmtChunk> {
        let info = self
            .find_chunk(chunk::FMT)
            .ok_or_else(|| HeaderError::chunk_not_found(chunk::FMT))?;
        let base = info.data_offset;
        field(self.buf, base, PCM_FMT_SIZE as usize)?;

        Ok(FmtChunk {
            audio_format: self.get_u16_le(base)?,
            channels: self.get_u16_le(base + 2)?,
            sample_rate: self.get_u32_le(base + 4)?,
            byte_rate: self.get_u32_le(base + 8)?,
            block_align: self.get_u16_le(base + 12)?,
            bits_per_sample: self.get_u16_le(base + 14)?,
        })
    }
}

/// Mutable view over a header buffer and its write cursor.
///
/// The cursor counts bytes written by sequential operations. It never exceeds
/// the buffer length; a write that would push it past the end fails without
/// modifying the buffer or the cursor.
#[derive(Debug)]
pub struct HeaderMut<'a> {
    buf: &'a mut [u8],
    cursor: &'a mut usize,
}

impl<'a> HeaderMut<'a> {
    /// Wraps a buffer and its cursor.
    ///
    /// A cursor past the end of `buf` is clamped to the buffer length.
    pub fn new(buf: &'a mut [u8], cursor: &'a mut usize) -> Self {
        *cursor = (*cursor).min(buf.len());
        Self { buf, cursor }
    }

    /// Read-only view over the same buffer.
    pub fn as_view(&self) -> HeaderRef<'_> {
        HeaderRef::new(&*self.buf)
    }

    /// Bytes written so far by sequential operations.
    pub fn bytes_written(&self) -> usize {
        *self.cursor
    }

    /// Writes an unsigned 16-bit little-endian value.
    pub fn set_u16_le(&mut self, offset: usize, value: u16) -> HeaderResult<()> {
        LittleEndian::write_u16(field_mut(self.buf, offset, 2)?, value);
        Ok(())
    }

    /// Writes an unsigned 32-bit little-endian value.
    pub fn set_u32_le(&mut self, offset: usize, value: u32) -> HeaderResult<()> {
        LittleEndian::write_u32(field_mut(self.buf, offset, 4)?, value);
        Ok(())
    }

    /// Writes an unsigned 32-bit big-endian value.
    pub fn set_u32_be(&mut self, offset: usize, value: u32) -> HeaderResult<()> {
        BigEndian::write_u32(field_mut(self.buf, offset, 4)?, value);
        Ok(())
    }

    /// Appends bytes at the cursor and advances it.
    pub fn append(&mut self, bytes: &[u8]) -> HeaderResult<()> {
        let start = *self.cursor;
        let capacity = self.buf.len();
        let dest = field_mut(self.buf, start, bytes.len()).map_err(|_| HeaderError::Capacity {
            required: start.saturating_add(bytes.len()),
            capacity,
        })?;
        dest.copy_from_slice(bytes);
        *self.cursor = start + bytes.len();
        Ok(())
    }

    /// Writes a complete 44-byte PCM header at the start of the buffer.
    ///
    /// Pass `data_size = 0` when the payload length is not known yet and call
    /// [`set_data_size`](Self::set_data_size) once it is. On success the
    /// cursor is left at 44. Fails without writing if the buffer is shorter
    /// than 44 bytes.
    pub fn write_header(&mut self, format: &WavFormat, data_size: u32) -> HeaderResult<()> {
        let capacity = self.buf.len();
        let Some(mut out) = self.buf.get_mut(..STANDARD_SIZE) else {
            return Err(HeaderError::Capacity {
                required: STANDARD_SIZE,
                capacity,
            });
        };

        // RIFF header
        out.write_all(b"RIFF")?;
        out.write_u32::<LittleEndian>(RIFF_SIZE_OVERHEAD.wrapping_add(data_size))?;
        out.write_all(b"WAVE")?;

        // fmt chunk
        out.write_all(b"fmt ")?;
        out.write_u32::<LittleEndian>(PCM_FMT_SIZE)?;
        out.write_u16::<LittleEndian>(AUDIO_FORMAT_PCM)?;
        out.write_u16::<LittleEndian>(format.channels as u16)?;
        out.write_u32::<LittleEndian>(format.sample_rate)?;
        out.write_u32::<LittleEndian>(format.byte_rate())?;
        out.write_u16::<LittleEndian>(format.block_align())?;
        out.write_u16::<LittleEndian>(format.bits_per_sample as u16)?;

        // data chunk
        out.write_all(b"data")?;
        out.write_u32::<LittleEndian>(data_size)?;

        *self.cursor = STANDARD_SIZE;
        debug!(
            channels = format.channels,
            sample_rate = format.sample_rate,
            bits_per_sample = format.bits_per_sample,
            data_size,
            "wrote wav header"
        );
        Ok(())
    }

    /// Patches the `data` size and the RIFF size of a standard header.
    ///
    /// Only the two size fields are touched; they are assumed to be at the
    /// fixed offsets used by [`write_header`](Self::write_header). Fails
    /// without writing if the buffer is shorter than 44 bytes.
    pub fn set_data_size(&mut self, data_size: u32) -> HeaderResult<()> {
        if self.buf.len() < STANDARD_SIZE {
            return Err(HeaderError::Capacity {
                required: STANDARD_SIZE,
                capacity: self.buf.len(),
            });
        }
        self.set_u32_le(offsets::DATA_SIZE, data_size)?;
        self.set_u32_le(
            offsets::RIFF_SIZE,
            RIFF_SIZE_OVERHEAD.wrapping_add(data_size),
        )?;
        debug!(data_size, "patched wav header sizes");
        Ok(())
    }
}
