#![no_main]

use libfuzzer_sys::fuzz_target;
use veridia_verification::link::extract_token;

// Links pasted by users go through URL parsing before decoding.
fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(token) = extract_token(input) {
            let _ = veridia_verification::decode(&token);
        }
    }
});
