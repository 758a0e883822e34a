#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    use diffy_core::PathUtil;

    if let Ok(path) = std::str::from_utf8(data) {
        let normalized = PathUtil::normalize(path);

        assert!(PathUtil::is_normalized(&normalized));
        assert_eq!(PathUtil::normalize(&normalized), normalized);
        assert_eq!(
            PathUtil::components(path).count(),
            PathUtil::components(&normalized).count()
        );
    }
});
