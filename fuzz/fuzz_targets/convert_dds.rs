#![no_main]

// Feeds arbitrary bytes through the whole pipeline. Malformed files must be rejected with an
// input error; nothing may panic.

use dds_convert_api::{convert, ConversionOptions, ConvertError, ErrorKind};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    match convert(data, &ConversionOptions::default()) {
        Ok(converted) => assert!(!converted.data.is_empty()),
        Err(error @ ConvertError::Decode(_)) => {
            assert!(matches!(error.kind(), ErrorKind::Input | ErrorKind::Resource))
        }
        Err(_) => {}
    }
});
