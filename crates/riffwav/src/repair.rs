//! Size repair for streams that were never finalized.
//!
//! A recording cut short before [`update_header_from_length`] leaves a file
//! whose header still claims zero data bytes. Players either refuse it or play
//! nothing. The header can be fixed from the file length alone, as long as it
//! has the standard 44-byte layout.
//!
//! [`update_header_from_length`]: crate::WavStreamWriter::update_header_from_length

use std::io::{Read, Seek, SeekFrom, Write};

use tracing::{debug, warn};

use crate::chunk::DATA;
use crate::error::{HeaderError, HeaderResult};
use crate::header::{offsets, StandardHeader, STANDARD_SIZE};
use crate::writer::data_size_for_length;

/// Rewrites the RIFF and `data` sizes of a standard header from the stream length.
///
/// Returns the data size now stored in the header. The stream is left
/// positioned just after the header.
pub fn patch_sizes_in_place<S: Read + Write + Seek>(stream: &mut S) -> HeaderResult<u32> {
    let length = stream.seek(SeekFrom::End(0))?;
    if length < STANDARD_SIZE as u64 {
        return Err(HeaderError::StreamTooShort { length });
    }

    let mut bytes = [0u8; STANDARD_SIZE];
    stream.seek(SeekFrom::Start(0))?;
    stream.read_exact(&mut bytes)?;

    let mut header = StandardHeader::new();
    header.load(&bytes);
    if !header.is_riff_wave() {
        return Err(HeaderError::NotRiffWave);
    }
    match header.find_chunk(DATA) {
        Some(data) if data.offset == offsets::DATA_ID => {}
        Some(data) => {
            warn!(offset = data.offset, "data chunk is not at the standard offset");
            return Err(HeaderError::NonStandardLayout {
                data_offset: data.data_offset,
            });
        }
        None => return Err(HeaderError::chunk_not_found(DATA)),
    }

    let previous = header.get_u32_le(offsets::DATA_SIZE)?;
    let data_size = data_size_for_length(length, header.data_offset())?;
    header.set_data_size(data_size)?;

    stream.seek(SeekFrom::Start(0))?;
    stream.write_all(header.buffer())?;
    stream.flush()?;

    debug!(previous, data_size, "repaired wav header sizes");
    Ok(data_size)
}
