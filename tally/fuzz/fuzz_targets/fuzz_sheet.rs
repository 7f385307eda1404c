#![no_main]

use libfuzzer_sys::fuzz_target;
use tally::{LineResult, Sheet};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let inputs: Vec<&str> = s.lines().collect();
        let mut sheet = Sheet::new();
        let lines = sheet.evaluate(&inputs);

        for line in &lines {
            if let LineResult::Success(value) = line.result {
                assert!(value.is_finite());
            }
        }

        if !inputs.is_empty() && sheet.can_hold(inputs.len() + 1) {
            let middle = inputs.len() / 2;
            sheet.insert_line(middle, "$1 + 1");
            let lines = sheet.remove_line(middle);
            assert_eq!(lines.len(), inputs.len());
        }
    }
});
