#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    use diffy_core::output::command::escape_data;
    use diffy_core::output::OutputWriter;
    use diffy_core::Classification;

    if let Ok(text) = std::str::from_utf8(data) {
        let escaped = escape_data(text);
        assert!(!escaped.contains('\n'));
        assert!(!escaped.contains('\r'));

        let classification = Classification {
            name: text.to_string(),
            modified: true,
            previous: Some(text.to_string()),
            ..Default::default()
        };
        let rendered = OutputWriter::format(&classification);
        assert!(rendered.contains("modified=true"));
    }
});
