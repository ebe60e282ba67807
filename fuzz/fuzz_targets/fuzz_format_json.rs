#![no_main]

use libfuzzer_sys::fuzz_target;
use wavstream::WavFormat;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(format) = WavFormat::from_json(text) {
            assert!(format.validate().is_ok());
        }
    }
});
