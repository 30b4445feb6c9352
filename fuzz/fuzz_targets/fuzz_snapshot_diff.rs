#![no_main]
use api_changelog::pipeline::DocumentFormat;
use api_changelog::{DiffEngine, Snapshot};
use libfuzzer_sys::fuzz_target;

/// Fuzz snapshot decoding followed by a diff against itself and against
/// nothing.
///
/// A self-diff must always be empty; creating and retiring the API must never
/// panic whatever shape the decoded snapshot has.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    for format in [DocumentFormat::Json, DocumentFormat::Yaml] {
        let Ok(snapshot) = format.decode::<Snapshot>(s) else {
            continue;
        };
        let engine = DiffEngine::new();
        assert!(!engine.diff(Some(&snapshot), Some(&snapshot)).has_changes());
        let _ = engine.diff(None, Some(&snapshot));
        let _ = engine.diff(Some(&snapshot), None);
    }
});
