#![no_main]

use libfuzzer_sys::fuzz_target;
use satchel::{convert_to_plain_text, string_pad};

fuzz_target!(|input: (&str, u8, &str)| {
    let (text, width, pad) = input;

    let plain = convert_to_plain_text(text);
    assert!(!plain.contains(['\n', '\r']));
    assert_eq!(plain, plain.trim());

    let padded = string_pad(text, width as usize, pad);
    assert!(padded.ends_with(text));
    if !pad.is_empty() {
        assert!(padded.chars().count() >= width as usize);
    }
});
