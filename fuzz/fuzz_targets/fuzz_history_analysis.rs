#![no_main]
use api_changelog::pipeline::DocumentFormat;
use api_changelog::{Changelog, HistoryAnalyzer};
use libfuzzer_sys::fuzz_target;

/// Fuzz history analytics over arbitrary changelog arrays.
///
/// Recorded counts and timestamps are attacker-controlled here, so this
/// exercises the scoring math on inconsistent inputs.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(history) = DocumentFormat::Json.decode::<Vec<Changelog>>(s) {
            let report = HistoryAnalyzer::new().analyze(&history);
            assert!(report.stability.overall_score <= 100);
        }
    }
});
