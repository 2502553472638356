#![no_main]

use ftui_filter::{FilterEngine, normalize};
use libfuzzer_sys::fuzz_target;
use serde_json::json;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Cap length to keep fuzzing fast.
    if text.len() > 1024 {
        return;
    }

    // Normalization must never panic or yield empty segments.
    for path in normalize(text) {
        assert!(path.segments().iter().all(|s| !s.is_empty()));
    }

    // Split the input into a property spec and a query at the first newline.
    let (properties, query) = text.split_once('\n').unwrap_or((text, text));
    let content = vec![
        json!({"a": "alpha", "b": {"c": [1, 2.5, true, null]}}),
        json!({"tags": ["x", ["y"], {"z": "w"}], "n": -0.0}),
        json!([["deep"]]),
        json!(null),
    ];

    // A pass must never panic and must keep accepted indices ordered.
    let report = FilterEngine::new(properties, query).filter_with_report(&content);
    assert!(report.indices.windows(2).all(|w| w[0] < w[1]));
    assert!(report.indices.iter().all(|&i| i < content.len()));
});
