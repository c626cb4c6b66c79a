//! Tests for the header codec.

use pretty_assertions::assert_eq;

use super::{offsets, HeaderMut, HeaderRef, StandardHeader, WavHeader, STANDARD_SIZE};
use crate::chunk::{four_cc, DATA, FMT};
use crate::error::HeaderError;
use crate::format::WavFormat;

/// Reference bytes for a stereo, 22050 Hz, 16-bit header with no data yet.
const TESTER_HEADER: [u8; 44] = [
    b'R', b'I', b'F', b'F', 0x24, 0x00, 0x00, 0x00, b'W', b'A', b'V', b'E', // preamble
    b'f', b'm', b't', b' ', 0x10, 0x00, 0x00, 0x00, // fmt header
    0x01, 0x00, 0x02, 0x00, 0x22, 0x56, 0x00, 0x00, // format, channels, rate
    0x88, 0x58, 0x01, 0x00, 0x04, 0x00, 0x10, 0x00, // byte rate, align, bits
    b'd', b'a', b't', b'a', 0x00, 0x00, 0x00, 0x00, // data header
];

fn written(format: WavFormat, data_size: u32) -> StandardHeader {
    let mut header = StandardHeader::new();
    header.write_header(&format, data_size).unwrap();
    header
}

// =========================================================================
// write_header
// =========================================================================

#[test]
fn test_write_header_matches_reference_bytes() {
    let header = written(WavFormat::stereo(22050), 0);
    assert_eq!(header.buffer(), &TESTER_HEADER[..]);
    assert_eq!(header.bytes_written(), 44);
    assert_eq!(header.written(), &TESTER_HEADER[..]);
}

#[test]
fn test_write_header_fields() {
    let header = written(WavFormat::new(1, 8000, 8), 1234);
    assert_eq!(header.get_u32_be(offsets::RIFF_ID).unwrap(), four_cc(b"RIFF"));
    assert_eq!(header.get_u32_le(offsets::RIFF_SIZE).unwrap(), 36 + 1234);
    assert_eq!(header.get_u32_be(offsets::WAVE_ID).unwrap(), four_cc(b"WAVE"));
    assert_eq!(header.get_u32_be(offsets::FMT_ID).unwrap(), FMT);
    assert_eq!(header.get_u32_le(offsets::FMT_SIZE).unwrap(), 16);
    assert_eq!(header.get_u16_le(offsets::AUDIO_FORMAT).unwrap(), 1);
    assert_eq!(header.get_u16_le(offsets::CHANNELS).unwrap(), 1);
    assert_eq!(header.get_u32_le(offsets::SAMPLE_RATE).unwrap(), 8000);
    assert_eq!(header.get_u32_le(offsets::BYTE_RATE).unwrap(), 8000);
    assert_eq!(header.get_u16_le(offsets::BLOCK_ALIGN).unwrap(), 1);
    assert_eq!(header.get_u16_le(offsets::BITS_PER_SAMPLE).unwrap(), 8);
    assert_eq!(header.get_u32_be(offsets::DATA_ID).unwrap(), DATA);
    assert_eq!(header.get_u32_le(offsets::DATA_SIZE).unwrap(), 1234);
}

#[test]
fn test_write_header_resets_cursor() {
    let mut header = WavHeader::<64>::new();
    header.append(&[1, 2, 3]).unwrap();
    header.write_header(&WavFormat::mono(16000), 0).unwrap();
    assert_eq!(header.bytes_written(), STANDARD_SIZE);
    assert_eq!(&header.buffer()[..4], b"RIFF");
}

#[test]
fn test_write_header_accepts_unvalidated_parameters() {
    let header = written(WavFormat::new(0, 0, 24), 0);
    assert_eq!(header.get_u16_le(offsets::CHANNELS).unwrap(), 0);
    assert_eq!(header.get_u32_le(offsets::BYTE_RATE).unwrap(), 0);
    assert_eq!(header.get_u16_le(offsets::BITS_PER_SAMPLE).unwrap(), 24);
}

#[test]
fn test_write_header_too_small_buffer() {
    let mut header = WavHeader::<43>::new();
    let err = header
        .write_header(&WavFormat::stereo(22050), 0)
        .unwrap_err();
    assert!(matches!(
        err,
        HeaderError::Capacity {
            required: 44,
            capacity: 43
        }
    ));
    assert_eq!(header.bytes_written(), 0);
    assert_eq!(header.buffer(), &[0u8; 43][..]);
}

#[test]
fn test_write_header_into_larger_buffer() {
    let mut header = WavHeader::<128>::new();
    header.write_header(&WavFormat::stereo(22050), 0).unwrap();
    assert_eq!(&header.buffer()[..44], &TESTER_HEADER[..]);
    assert!(header.buffer()[44..].iter().all(|&b| b == 0));
}

// =========================================================================
// set_data_size
// =========================================================================

#[test]
fn test_set_data_size_matches_direct_write() {
    let format = WavFormat::stereo(44100);
    let mut patched = written(format, 0);
    patched.set_data_size(1000).unwrap();
    assert_eq!(patched.buffer(), written(format, 1000).buffer());
}

#[test]
fn test_set_data_size_is_idempotent() {
    let mut once = written(WavFormat::mono(8000), 0);
    once.set_data_size(77).unwrap();
    let mut twice = once.clone();
    twice.set_data_size(77).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_set_data_size_touches_only_size_fields() {
    let mut header = written(WavFormat::stereo(22050), 0);
    header.set_data_size(0x0102_0304).unwrap();
    let changed: Vec<usize> = header
        .buffer()
        .iter()
        .zip(TESTER_HEADER.iter())
        .enumerate()
        .filter(|(_, (a, b))| a != b)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(changed, vec![4, 5, 6, 7, 40, 41, 42, 43]);
}

#[test]
fn test_set_data_size_keeps_cursor() {
    let mut header = WavHeader::<64>::new();
    header.write_header(&WavFormat::mono(8000), 0).unwrap();
    header.append(&[0xAA; 4]).unwrap();
    header.set_data_size(4).unwrap();
    assert_eq!(header.bytes_written(), 48);
}

#[test]
fn test_set_data_size_too_small_buffer() {
    let mut header = WavHeader::<40>::new();
    assert!(matches!(
        header.set_data_size(10),
        Err(HeaderError::Capacity { .. })
    ));
    assert_eq!(header.buffer(), &[0u8; 40][..]);
}

#[test]
fn test_data_offset_is_standard() {
    assert_eq!(written(WavFormat::new(7, 96000, 32), 5).data_offset(), 44);
    assert_eq!(WavHeader::<512>::new().data_offset(), 44);
}

// =========================================================================
// find_chunk
// =========================================================================

#[test]
fn test_find_chunk_in_written_header() {
    let header = written(WavFormat::stereo(22050), 4096);

    let fmt = header.find_chunk(FMT).unwrap();
    assert_eq!(fmt.offset, 12);
    assert_eq!(fmt.data_offset, 20);
    assert_eq!(fmt.data_size, 16);

    let data = header.find_chunk(DATA).unwrap();
    assert_eq!(data.offset, 36);
    assert_eq!(data.data_offset, 44);
    assert_eq!(data.data_size, 4096);

    assert_eq!(header.find_chunk(four_cc(b"LIST")), None);
}

#[test]
fn test_find_chunk_after_unknown_chunk() {
    let mut header = WavHeader::<128>::new();
    let original = written(WavFormat::mono(16000), 10);
    header.append(&original.buffer()[..36]).unwrap();
    header.append(b"LIST").unwrap();
    header.append(&6u32.to_le_bytes()).unwrap();
    header.append(b"INFOab").unwrap();
    header.append(&original.buffer()[36..]).unwrap();

    let list = header.find_chunk(four_cc(b"LIST")).unwrap();
    assert_eq!(list.offset, 36);
    assert_eq!(list.data_size, 6);

    let data = header.find_chunk(DATA).unwrap();
    assert_eq!(data.offset, 50);
    assert_eq!(data.data_offset, 58);
    assert_eq!(data.data_size, 10);
}

#[test]
fn test_find_chunk_zeroed_buffer() {
    assert_eq!(WavHeader::<44>::new().find_chunk(DATA), None);
    assert_eq!(HeaderRef::new(&[]).find_chunk(DATA), None);
}

#[test]
fn test_scan_stops_at_cursor_in_larger_buffer() {
    let mut header = WavHeader::<128>::new();
    header.write_header(&WavFormat::stereo(22050), 0).unwrap();

    let tags: Vec<String> = header.chunks().map(|c| c.tag()).collect();
    assert_eq!(tags, vec!["fmt ", "data"]);
    assert_eq!(header.find_chunk(0), None);
    assert_eq!(header.find_chunk(DATA).unwrap().data_offset, 44);
}

#[test]
fn test_scan_ignores_zero_fill_after_short_load() {
    let source = written(WavFormat::mono(8000), 0);
    let mut header = WavHeader::<128>::new();
    header.load(&source.buffer()[..36]);

    assert_eq!(header.chunks().count(), 1);
    assert_eq!(header.find_chunk(0), None);
    assert_eq!(header.find_chunk(DATA), None);
    assert_eq!(header.read_fmt().unwrap().sample_rate, 8000);
}

// =========================================================================
// Field primitives
// =========================================================================

#[test]
fn test_field_round_trips() {
    let mut header = WavHeader::<8>::new();
    header.set_u16_le(0, 0xBEEF).unwrap();
    assert_eq!(&header.buffer()[..2], &[0xEF, 0xBE]);
    assert_eq!(header.get_u16_le(0).unwrap(), 0xBEEF);

    header.set_u32_be(4, 0x0102_0304).unwrap();
    assert_eq!(&header.buffer()[4..], &[1, 2, 3, 4]);
    assert_eq!(header.get_u32_le(4).unwrap(), 0x0403_0201);
    assert_eq!(header.get_u32_be(4).unwrap(), 0x0102_0304);
}

#[test]
fn test_field_bounds() {
    let mut header = WavHeader::<8>::new();
    assert!(header.set_u32_le(4, 1).is_ok());
    assert!(matches!(
        header.set_u32_le(5, 1),
        Err(HeaderError::OutOfBounds {
            offset: 5,
            width: 4,
            capacity: 8
        })
    ));
    assert!(header.get_u16_le(7).is_err());
    assert!(header.get_u32_be(usize::MAX).is_err());
    assert_eq!(header.buffer(), &[0, 0, 0, 0, 1, 0, 0, 0][..]);
}

// =========================================================================
// Cursor writes
// =========================================================================

#[test]
fn test_append_is_atomic() {
    let mut header = WavHeader::<6>::new();
    header.append(&[1, 2, 3, 4]).unwrap();
    let err = header.append(&[5, 6, 7]).unwrap_err();
    assert!(matches!(
        err,
        HeaderError::Capacity {
            required: 7,
            capacity: 6
        }
    ));
    assert_eq!(header.bytes_written(), 4);
    assert_eq!(header.buffer(), &[1, 2, 3, 4, 0, 0][..]);
    header.append(&[5, 6]).unwrap();
    assert_eq!(header.bytes_written(), 6);
}

#[test]
fn test_load_truncates_and_zero_fills() {
    let mut header = WavHeader::<4>::new();
    assert_eq!(header.load(&[9, 9, 9, 9, 9, 9]), 4);
    assert_eq!(header.bytes_written(), 4);
    assert_eq!(header.load(&[1]), 1);
    assert_eq!(header.buffer(), &[1, 0, 0, 0][..]);
}

#[test]
fn test_borrowed_views_over_external_buffer() {
    let mut bytes = vec![0u8; 44];
    let mut cursor = 0;
    {
        let mut view = HeaderMut::new(&mut bytes, &mut cursor);
        view.write_header(&WavFormat::stereo(22050), 0).unwrap();
        assert_eq!(view.as_view().find_chunk(DATA).unwrap().offset, 36);
    }
    assert_eq!(cursor, 44);
    assert_eq!(bytes, TESTER_HEADER.to_vec());
}

#[test]
fn test_read_fmt() {
    let header = written(WavFormat::stereo(48000), 0);
    let fmt = header.read_fmt().unwrap();
    assert!(fmt.is_pcm());
    assert_eq!(fmt.channels, 2);
    assert_eq!(fmt.sample_rate, 48000);
    assert_eq!(fmt.byte_rate, 192000);
    assert_eq!(fmt.block_align, 4);
    assert_eq!(fmt.bits_per_sample, 16);
    assert!(header.is_riff_wave());
}

#[test]
fn test_read_fmt_truncated() {
    let header = written(WavFormat::stereo(48000), 0);
    let view = HeaderRef::new(&header.buffer()[..30]);
    assert!(matches!(
        view.read_fmt(),
        Err(HeaderError::OutOfBounds { offset: 20, .. })
    ));
    assert!(matches!(
        HeaderRef::new(&header.buffer()[..12]).read_fmt(),
        Err(HeaderError::ChunkNotFound { .. })
    ));
}
