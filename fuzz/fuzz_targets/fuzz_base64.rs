#![no_main]

use libfuzzer_sys::fuzz_target;
use satchel::encoding::{base64_decode, base64_decode_bytes, base64_encode, try_decode};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes as "base64": must error cleanly, never panic
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = base64_decode(text);
        let _ = base64_decode_bytes(text);
        let _ = try_decode(text);

        // Valid text must survive a round trip
        let encoded = base64_encode(text);
        assert_eq!(base64_decode(&encoded).unwrap(), text);
    }
});
