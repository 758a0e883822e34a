#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    use diffy_core::resolver::{decode_locator, DiffResolver};
    use diffy_core::{PathUtil, TargetPath};

    if let Ok(text) = std::str::from_utf8(data) {
        let (target, url) = text.split_once('\n').unwrap_or((text, text));

        let _ = decode_locator(url);

        let resolver = DiffResolver::new(&TargetPath::from_normalized(PathUtil::normalize(target)));
        let _ = resolver.matches(url);

        assert!(!DiffResolver::new(&TargetPath::Unresolved).matches(url));
    }
});
