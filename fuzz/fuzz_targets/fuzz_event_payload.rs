#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    use diffy_core::event;

    if let Ok(payload) = serde_json::from_slice::<serde_json::Value>(data) {
        for name in ["push", "pull_request", "release"] {
            if let Ok(range) = event::classify(name, &payload) {
                assert!(!range.base.is_empty());
                assert!(!range.head.is_empty());
            }
        }
    }
});
