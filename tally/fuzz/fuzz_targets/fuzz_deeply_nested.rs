#![no_main]

use libfuzzer_sys::fuzz_target;
use tally::Sheet;

fuzz_target!(|depth: u8| {
    let mut sheet = Sheet::new();

    let depth = depth as usize + 1;

    let mut expr = String::from("1");
    for _ in 0..depth {
        expr = format!("({} + 10%)", expr);
    }

    let _ = sheet.evaluate(&[expr.as_str(), "$1 ^ 2"]);
});
