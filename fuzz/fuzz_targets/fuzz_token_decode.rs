#![no_main]

use libfuzzer_sys::fuzz_target;
use veridia_verification::{decode, encode};

// Decoding arbitrary input must never panic, and any claim it accepts must
// survive a re-encode unchanged.
fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(claim) = decode(input) {
        // Anything decode accepts came from a token within the size limit.
        let token = encode(&claim).expect("decoded claim must re-encode");
        let again = decode(&token).expect("re-encoded claim must decode");
        assert_eq!(again, claim);
        assert_eq!(encode(&again).ok(), Some(token), "encoding must be deterministic");
    }
});
