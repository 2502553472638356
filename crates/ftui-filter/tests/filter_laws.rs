//! End-to-end behavior of `filter` over JSON content.

use ftui_filter::{FilterConfig, FilterEngine, FilterError, FilteredView, filter, normalize};
use serde_json::{Value, json};

fn tagged() -> Vec<Value> {
    vec![json!({"tags": ["red", "blue"]}), json!({"tags": ["green"]})]
}

fn contacts() -> Vec<Value> {
    vec![
        json!({
            "name": {"first": "Ada", "last": "Lovelace"},
            "emails": [{"address": "ada@engine.org"}],
            "active": true,
        }),
        json!({
            "name": {"first": "Grace", "last": "Hopper"},
            "emails": [{"address": "grace@navy.mil"}, {"address": "gh@cobol.dev"}],
            "active": false,
        }),
        json!({
            "name": {"first": "Alan"},
            "emails": [],
            "active": true,
        }),
    ]
}

#[test]
fn wildcard_expansion_selects_matching_item() {
    let content = tagged();
    assert_eq!(filter(&content, "tags.@each", "red"), [&content[0]]);
}

#[test]
fn empty_query_returns_content_unchanged() {
    let content = contacts();
    let all: Vec<&Value> = content.iter().collect();
    assert_eq!(filter(&content, "name.first", ""), all);
    assert_eq!(filter(&content, "", ""), all);
}

#[test]
fn empty_properties_returns_content_unchanged() {
    let content = contacts();
    let all: Vec<&Value> = content.iter().collect();
    assert_eq!(filter(&content, "", "Ada"), all);
    assert_eq!(filter(&content, "  ..  ", "Ada"), all);
}

#[test]
fn filtering_twice_is_a_noop() {
    let content = contacts();
    let once: Vec<Value> = filter(&content, "name.first name.last", "a")
        .into_iter()
        .cloned()
        .collect();
    let twice: Vec<Value> = filter(&once, "name.first name.last", "a")
        .into_iter()
        .cloned()
        .collect();
    assert_eq!(once, twice);
}

#[test]
fn double_period_and_spacing_normalize() {
    let paths: Vec<String> = normalize("first.name  last..name")
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(paths, ["first.name", "last.name"]);
}

#[test]
fn matching_is_case_sensitive() {
    let content = tagged();
    assert!(filter(&content, "tags.@each", "Red").is_empty());
}

#[test]
fn missing_property_contributes_nothing() {
    let content = vec![json!({"x": "abc"}), json!({"a": {"b": {"c": "abc"}}})];
    assert_eq!(filter(&content, "a.b.c", "abc"), [&content[1]]);
    assert_eq!(filter(&content, "a.b.c x", "abc").len(), 2);
}

#[test]
fn nested_paths_through_wildcards() {
    let content = contacts();
    assert_eq!(filter(&content, "emails.@each.address", r"\.dev$"), [&content[1]]);
    assert_eq!(filter(&content, "emails.@each.address", "@"), [&content[0], &content[1]]);
}

#[test]
fn booleans_are_searchable() {
    let content = contacts();
    assert_eq!(filter(&content, "active", "true"), [&content[0], &content[2]]);
}

#[test]
fn punctuation_in_spec_is_tolerated() {
    let content = contacts();
    assert_eq!(filter(&content, "name.last, (name.first)", "Hop"), [&content[1]]);
}

#[test]
fn recursion_limit_does_not_abort_the_pass() {
    let mut deep = json!("needle");
    for _ in 0..105 {
        deep = Value::Array(vec![deep]);
    }
    let content = vec![
        json!({"v": "needle"}),
        json!({"v": deep}),
        json!({"v": "needle again"}),
    ];
    let wildcards = vec!["@each"; 105].join(".");
    let engine = FilterEngine::new(&format!("v v.{wildcards}"), "needle");
    let report = engine.filter_with_report(&content);

    assert_eq!(report.indices, [0, 2]);
    let hard: Vec<_> = report.hard_errors().collect();
    assert_eq!(hard.len(), 1);
    assert_eq!(hard[0].index, Some(1));
    assert!(matches!(hard[0].error, FilterError::RecursionLimit { .. }));
}

#[test]
fn raised_depth_limit_reaches_deep_values() {
    let mut deep = json!("needle");
    for _ in 0..150 {
        deep = Value::Array(vec![deep]);
    }
    let content = vec![json!({"v": deep})];
    let properties = format!("v.{}", vec!["@each"; 150].join("."));
    let config = FilterConfig::default().with_max_depth(200);
    let engine = FilterEngine::with_config(&properties, "needle", config);
    assert_eq!(engine.filter(&content).len(), 1);
}

#[test]
fn everything_failing_yields_empty_result() {
    let content = vec![json!({"tags": 1}), json!({"tags": "x"}), json!({"tags": null})];
    let report = FilterEngine::new("tags.@each", "x").filter_with_report(&content);
    assert!(report.indices.is_empty());
    assert_eq!(report.errors.len(), 3);
}

#[test]
fn view_tracks_keystrokes() {
    let content = contacts();
    let mut view = FilteredView::new("name.first", "");
    for (query, expected) in [("", 3), ("A", 2), ("Al", 1), ("Alx", 0), ("", 3)] {
        view.set_query(query);
        view.refresh(&content);
        assert_eq!(view.visible(&content).len(), expected, "query {query:?}");
    }
    assert_eq!(view.generation(), 5);
}

#[test]
fn engine_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FilterEngine>();

    let engine = FilterEngine::new("tags.@each", "e");
    let content = tagged();
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| engine.filter_indices(&content)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), [0, 1]);
        }
    });
}
