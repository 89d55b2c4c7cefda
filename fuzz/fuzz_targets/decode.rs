#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate huffzip;
use huffzip::{decompress_frame, CodeTable};

fuzz_target!(|data: &[u8]| {
    // any input has to be rejected or decoded, never panic
    let codes = CodeTable::for_data(b"the quick brown fox jumps over the lazy dog");
    let _ = decompress_frame(data, &codes);
});
