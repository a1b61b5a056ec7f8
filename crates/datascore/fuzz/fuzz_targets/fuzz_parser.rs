//! Fuzz target for the delimited-text parser and the full scoring path.
//!
//! Arbitrary bytes must either score or fail with an error, never panic,
//! and any score produced must stay within [0, 1].

#![no_main]

use datascore::DataScore;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    if let Ok(report) = DataScore::new().analyze_bytes(data) {
        assert!((0.0..=1.0).contains(&report.flags.quality_score));
        assert_eq!(report.summary.n_cols, report.missing.len());
    }
});
