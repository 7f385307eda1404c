#![no_main]

use libfuzzer_sys::fuzz_target;
use tally::{parse_line, ResourceLimits};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = parse_line(s, &ResourceLimits::default());
    }
});
