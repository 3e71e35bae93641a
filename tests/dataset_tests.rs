//! Dataset loading and filtering tests

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use std::collections::HashSet;

use common::dataset;
use test_case::test_case;
use tlview::dataset::{Dataset, MakerFilter, ALL_MAKERS};
use tlview::error::TlviewError;
use tlview::types::Month;

#[test]
fn test_bundled_dataset_is_valid() {
    let ds = Dataset::bundled().unwrap();
    assert_eq!(ds.len(), 25);
    let ids: HashSet<&str> = ds.releases().iter().map(|r| r.id()).collect();
    assert_eq!(ids.len(), ds.len());
    assert_eq!(ds.releases()[0].month, Month::January);
    assert_eq!(ds.releases()[24].month, Month::December);
}

#[test]
fn test_bundled_makers_list() {
    let ds = Dataset::bundled().unwrap();
    assert_eq!(
        ds.makers(),
        vec![
            "Alibaba", "All", "Anthropic", "DeepSeek", "Google", "Meta", "Mistral", "Moonshot",
            "OpenAI", "xAI"
        ]
    );
}

#[test]
fn test_extra_fields_are_preserved() {
    let ds = Dataset::from_json(
        r##"[{"id": "x1", "name": "X One", "maker": "X", "releaseDate": "2025-04-02",
             "color": "#abc", "description": "text", "benchmarks": {"mmlu": 90}}]"##,
    )
    .unwrap();
    let release = &ds.releases()[0];
    assert_eq!(release.item.name, "X One");
    assert_eq!(release.item.extra["description"], "text");
    assert_eq!(release.item.extra["benchmarks"]["mmlu"], 90);
    assert_eq!(release.month, Month::April);

    let json = serde_json::to_value(release).unwrap();
    assert_eq!(json["releaseDate"], "2025-04-02");
    assert_eq!(json["description"], "text");
}

#[test]
fn test_malformed_json_is_an_error() {
    let err = Dataset::from_json("[{").unwrap_err();
    assert!(matches!(err, TlviewError::Json(_)));
}

#[test]
fn test_missing_maker_is_an_error() {
    let err = Dataset::from_json(r#"[{"id": "a", "color": "red"}]"#).unwrap_err();
    assert!(matches!(err, TlviewError::Json(_)));

    let err = Dataset::from_json(r#"[{"id": "", "maker": "X", "color": "red"}]"#).unwrap_err();
    assert!(matches!(err, TlviewError::MissingField { field: "id", .. }));
}

#[test]
fn test_duplicate_id_is_an_error() {
    let err = Dataset::from_json(
        r#"[{"id": "a", "maker": "X", "color": "red", "releaseDate": "2025-01-01"},
            {"id": "a", "maker": "Y", "color": "blue", "releaseDate": "2025-02-01"}]"#,
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Duplicate release id: a");
}

#[test_case("2025-03-01", Month::March ; "first of month stays in month")]
#[test_case("2025-02-28", Month::February)]
#[test_case("March 31, 2025", Month::March ; "long form")]
#[test_case("2025-12", Month::December ; "year and month")]
fn test_release_month_bucketing(date: &str, month: Month) {
    let ds = dataset(&[("a", "X", date)]);
    assert_eq!(ds.releases()[0].month, month);
}

#[test]
fn test_empty_dataset_is_allowed() {
    let ds = Dataset::from_json("[]").unwrap();
    assert!(ds.is_empty());
    assert_eq!(ds.makers(), vec![ALL_MAKERS]);
    assert!(ds.filtered(&MakerFilter::All).is_empty());
}

#[test]
fn test_unknown_maker_filters_to_empty() {
    let ds = dataset(&[("a", "X", "2025-01-01")]);
    let view = ds.filtered(&MakerFilter::from_selector("x"));
    assert!(view.is_empty());
    assert_eq!(view.filter().selector(), "x");
}

#[test]
fn test_first_at_or_after_skips_empty_months() {
    let ds = dataset(&[
        ("a", "X", "2025-01-10"),
        ("b", "X", "2025-05-20"),
        ("c", "X", "2025-05-25"),
    ]);
    let view = ds.filtered(&MakerFilter::All);
    assert_eq!(view.first_at_or_after(Month::February), Some(1));
    assert_eq!(view.first_at_or_after(Month::May), Some(1));
    assert_eq!(view.first_at_or_after(Month::June), None);
}
