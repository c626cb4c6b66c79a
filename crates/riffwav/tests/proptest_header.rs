//! Property-based tests for the header codec using proptest.
//!
//! These tests verify the layout invariants for arbitrary parameters and that
//! scanning never panics or reads out of bounds on arbitrary bytes.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p riffwav --test proptest_header
//! ```

use proptest::prelude::*;

use riffwav::chunk::{self, Chunks};
use riffwav::{HeaderRef, StandardHeader, WavFormat, WavHeader};

fn any_format() -> impl Strategy<Value = WavFormat> {
    (any::<u8>(), any::<u32>(), any::<u8>())
        .prop_map(|(channels, rate, bits)| WavFormat::new(channels, rate, bits))
}

fn common_format() -> impl Strategy<Value = WavFormat> {
    (
        1u8..=8,
        prop::sample::select(vec![8000u32, 11025, 16000, 22050, 44100, 48000, 96000]),
        prop::sample::select(vec![8u8, 16, 24, 32]),
    )
        .prop_map(|(channels, rate, bits)| WavFormat::new(channels, rate, bits))
}

proptest! {
    /// `fmt ` and `data` sit at fixed offsets for every parameter tuple.
    #[test]
    fn chunks_at_standard_offsets(format in any_format(), data_size in any::<u32>()) {
        let mut header = StandardHeader::new();
        header.write_header(&format, data_size).unwrap();

        let fmt = header.find_chunk(chunk::FMT).unwrap();
        prop_assert_eq!(fmt.offset, 12);
        prop_assert_eq!(fmt.data_size, 16);

        let data = header.find_chunk(chunk::DATA).unwrap();
        prop_assert_eq!(data.offset, 36);
        prop_assert_eq!(data.data_size, data_size);
        prop_assert_eq!(header.data_offset(), 44);
        prop_assert_eq!(header.bytes_written(), 44);
    }

    /// Writing with size 0 then patching equals writing the size directly.
    #[test]
    fn set_data_size_matches_direct_write(format in any_format(), data_size in any::<u32>()) {
        let mut patched = StandardHeader::new();
        patched.write_header(&format, 0).unwrap();
        patched.set_data_size(data_size).unwrap();

        let mut direct = StandardHeader::new();
        direct.write_header(&format, data_size).unwrap();

        prop_assert_eq!(patched.buffer(), direct.buffer());
    }

    /// Patching twice with the same size is the same as patching once.
    #[test]
    fn set_data_size_idempotent(format in any_format(), data_size in any::<u32>()) {
        let mut header = StandardHeader::new();
        header.write_header(&format, 0).unwrap();
        header.set_data_size(data_size).unwrap();
        let once = header.clone();
        header.set_data_size(data_size).unwrap();
        prop_assert_eq!(header, once);
    }

    /// The decoded `fmt ` chunk reproduces the parameters written.
    #[test]
    fn fmt_round_trips(format in common_format()) {
        let mut header = StandardHeader::new();
        header.write_header(&format, 0).unwrap();
        let fmt = header.read_fmt().unwrap();
        prop_assert_eq!(fmt.to_format(), Some(format));
        prop_assert_eq!(fmt.byte_rate, format.sample_rate * format.block_align() as u32);
    }

    /// Arbitrary bytes never make the scanner panic.
    #[test]
    fn scanning_arbitrary_bytes_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let view = HeaderRef::new(&bytes);
        for info in Chunks::new(&bytes) {
            prop_assert!(info.data_offset <= bytes.len());
            prop_assert_eq!(info.data_offset, info.offset + 8);
        }
        let _ = view.find_chunk(chunk::DATA);
        let _ = view.read_fmt();
        let _ = view.is_riff_wave();
    }

    /// Scanning a loaded buffer sees the same chunks as scanning the slice.
    #[test]
    fn loaded_buffer_scans_like_slice(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let mut header = WavHeader::<64>::new();
        header.load(&bytes);
        let from_slice: Vec<_> = HeaderRef::new(&bytes).chunks().collect();
        let from_header: Vec<_> = header.chunks().collect();
        prop_assert_eq!(from_slice, from_header);
    }

    /// Out-of-range field accesses fail instead of panicking.
    #[test]
    fn field_access_bounds(offset in 0usize..128) {
        let mut header = WavHeader::<44>::new();
        prop_assert_eq!(header.get_u32_le(offset).is_ok(), offset + 4 <= 44);
        prop_assert_eq!(header.get_u16_le(offset).is_ok(), offset + 2 <= 44);
        prop_assert_eq!(header.set_u32_be(offset, 1).is_ok(), offset + 4 <= 44);
    }
}
