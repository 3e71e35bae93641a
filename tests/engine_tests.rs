//! Timeline engine tests
//!
//! End-to-end behaviour of the single scroll coordinate: smoothing, filter
//! resets, breakpoint crossings and the snapshot projection.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{assert_close, dataset, desktop_engine, mobile_engine, run_frames, uniform};
use tlview::config::TimelineConfig;
use tlview::dataset::MakerFilter;
use tlview::layout::Viewport;
use tlview::sync::{InputMode, TimelineEngine};
use tlview::types::{Month, ScrollRequest};

#[test]
fn test_filter_resets_scroll_and_recomputes_layout() {
    let mut engine = desktop_engine(uniform(10));
    engine.on_scroll(5000.0);
    run_frames(&mut engine);
    assert!(engine.snapshot().active_index.unwrap() > 5);

    let request = engine.set_filter("Alpha");
    assert_eq!(request, ScrollRequest::instant(0.0));
    assert_eq!(engine.filter(), &MakerFilter::Maker("Alpha".to_string()));
    assert_eq!(engine.view().len(), 5);
    assert_close(engine.layout().total_distance, 4.0 * engine.layout().stride());

    let snap = engine.snapshot();
    assert_eq!(snap.active_index, Some(0));
    assert_eq!(snap.active_id.as_deref(), Some("m0"));
    assert_eq!(snap.scroll_position, 0.0);
    assert_eq!(snap.x_offset, 0.0);
    assert!(!engine.is_animating());
}

#[test]
fn test_filter_back_to_all_restores_every_item() {
    let mut engine = desktop_engine(uniform(6));
    engine.set_filter("Beta");
    assert_eq!(engine.view().len(), 3);
    engine.set_filter("All");
    assert_eq!(engine.filter(), &MakerFilter::All);
    assert_eq!(engine.view().len(), 6);
}

#[test]
fn test_filtered_order_follows_dataset() {
    let ds = dataset(&[
        ("late", "X", "2025-11-01"),
        ("early", "X", "2025-01-01"),
        ("other", "Y", "2025-05-01"),
    ]);
    let mut engine = desktop_engine(ds);
    engine.set_filter("X");
    let ids: Vec<&str> = engine.view().iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["late", "early"]);
}

#[test]
fn test_desktop_snapshot_follows_spring() {
    let mut engine = desktop_engine(uniform(5));
    engine.on_scroll(10_000.0);
    let first = engine.snapshot();
    assert_eq!(first.active_index, Some(0));

    engine.tick(16.0);
    let moving = engine.snapshot();
    assert!(moving.scroll_position > 0.0);
    assert!(moving.x_offset < 0.0);

    run_frames(&mut engine);
    let settled = engine.snapshot();
    assert_eq!(settled.active_index, Some(4));
    assert_eq!(settled.progress, Some(1.0));
    assert_eq!(settled.progress_percent, 100.0);
    assert_eq!(settled.expanded_index, Some(4));
    assert!(settled.is_past_intro_threshold);
}

#[test]
fn test_mobile_smoothed_equals_raw() {
    let mut engine = mobile_engine(uniform(5));
    engine.on_scroll(700.0);
    assert_eq!(engine.smoothed_position(), 700.0);
    assert!(!engine.is_animating());
    assert_eq!(engine.snapshot().scroll_position, 700.0);
    assert_eq!(engine.snapshot().expanded_index, None);
}

#[test]
fn test_intro_threshold_uses_fixed_pixels() {
    let mut engine = mobile_engine(uniform(5));
    engine.on_scroll(50.0);
    assert!(!engine.snapshot().is_past_intro_threshold);
    engine.on_scroll(51.0);
    assert!(engine.snapshot().is_past_intro_threshold);
}

#[test]
fn test_resize_to_mobile_snaps_and_switches() {
    let mut engine = desktop_engine(uniform(5));
    engine.on_scroll(2000.0);
    engine.tick(16.0);
    assert_eq!(engine.mode(), InputMode::Desktop);

    assert!(engine.resize(390.0, 844.0));
    assert_eq!(engine.mode(), InputMode::Mobile);
    assert_eq!(engine.smoothed_position(), engine.raw_position());
    assert!(engine.raw_position() <= engine.layout().total_distance);
    assert!(!engine.is_animating());
}

#[test]
fn test_resize_to_desktop_keeps_position() {
    let mut engine = mobile_engine(uniform(5));
    engine.on_scroll(300.0);
    assert!(engine.resize(1280.0, 800.0));
    assert_eq!(engine.mode(), InputMode::Desktop);
    assert_eq!(engine.smoothed_position(), 300.0);
    assert!(!engine.is_animating());
}

#[test]
fn test_resize_within_mode_clamps_into_new_range() {
    let mut engine = desktop_engine(uniform(5));
    engine.on_scroll(3120.0);
    run_frames(&mut engine);
    assert!(engine.resize(1000.0, 800.0));
    let distance = engine.layout().total_distance;
    assert_close(distance, 4.0 * 750.0);
    assert_eq!(engine.raw_position(), distance);
    run_frames(&mut engine);
    assert_eq!(engine.snapshot().active_index, Some(4));
}

#[test]
fn test_empty_view_projection() {
    let mut engine = desktop_engine(uniform(4));
    engine.set_filter("Nobody");
    let snap = engine.snapshot();
    assert_eq!(snap.item_count, 0);
    assert_eq!(snap.active_index, None);
    assert_eq!(snap.active_month, None);
    assert_eq!(snap.active_color, "#00f3ff");
    assert_eq!(engine.jump_to_month("January"), None);
}

#[test]
fn test_active_color_and_month_follow_index() {
    let ds = dataset(&[("a", "X", "2025-01-10"), ("b", "X", "2025-07-04")]);
    let mut engine = mobile_engine(ds);
    engine.on_scroll(engine.layout().total_distance);
    let snap = engine.snapshot();
    assert_eq!(snap.active_color, "color-b");
    assert_eq!(snap.active_month, Some(Month::July));
}

#[test]
fn test_custom_config_is_validated() {
    let mut config = TimelineConfig::default();
    config.momentum.friction = 1.5;
    let err = TimelineEngine::with_config(uniform(3), Viewport::new(800.0, 600.0), config);
    assert!(err.is_err());

    let mut config = TimelineConfig::default();
    config.fallback_color = "black".to_string();
    config.layout.mobile_breakpoint = 1000.0;
    let mut engine =
        TimelineEngine::with_config(uniform(3), Viewport::new(800.0, 600.0), config).unwrap();
    assert_eq!(engine.mode(), InputMode::Mobile);
    engine.set_filter("Nobody");
    assert_eq!(engine.snapshot().active_color, "black");
}
