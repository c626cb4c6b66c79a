#![no_main]

use libfuzzer_sys::fuzz_target;
use riffwav::chunk::{self, Chunks};
use riffwav::{HeaderRef, WavHeader};

fuzz_target!(|data: &[u8]| {
    let view = HeaderRef::new(data);
    for info in Chunks::new(data) {
        assert!(info.data_offset <= data.len());
    }
    let _ = view.find_chunk(chunk::DATA);
    let _ = view.read_fmt();

    // Same bytes through the fixed-size buffer, including patching.
    let mut header = WavHeader::<64>::new();
    header.load(data);
    let _ = header.read_fmt();
    let _ = header.set_data_size(data.len() as u32);
});
