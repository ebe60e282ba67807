#![no_main]

use libfuzzer_sys::fuzz_target;
use wavstream::WavHeader;

fuzz_target!(|data: &[u8]| {
    // Anything that parses must serialize back to the same 44 bytes.
    if let Ok(header) = WavHeader::parse(data) {
        assert_eq!(&header.to_bytes()[..], &data[..44]);
    }
});
