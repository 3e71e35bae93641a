//! Track layout tests
//!
//! Card sizing per breakpoint, total scroll distance and the centring
//! relationship between card positions and the resolved offset.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::assert_close;
use test_case::test_case;
use tlview::config::LayoutConfig;
use tlview::layout::{TrackLayout, Viewport};
use tlview::sync::{resolve, target_scroll};

#[test]
fn test_desktop_layout_for_five_items() {
    let layout = TrackLayout::compute(1200.0, false, 5, &LayoutConfig::default());
    assert_eq!(layout.card_width, 600.0);
    assert_close(layout.gap, 180.0);
    assert_eq!(layout.centering_offset, 300.0);
    assert_close(layout.total_distance, 3120.0);
    assert_close(layout.document_height(800.0), 3920.0);
    assert!(layout.is_scrollable());
}

#[test]
fn test_mobile_layout_scales_with_viewport() {
    let layout = TrackLayout::compute(390.0, true, 5, &LayoutConfig::default());
    assert_close(layout.card_width, 331.5);
    assert_close(layout.gap, 19.5);
    assert_close(layout.centering_offset, 29.25);
    assert_close(layout.total_distance, 4.0 * 351.0);
}

#[test_case(0 ; "empty view")]
#[test_case(1 ; "single item")]
fn test_degenerate_counts_disable_scrolling(count: usize) {
    let layout = TrackLayout::compute(1200.0, false, count, &LayoutConfig::default());
    assert_eq!(layout.total_distance, 0.0);
    assert!(!layout.is_scrollable());
    assert_eq!(layout.document_height(800.0), 800.0);
}

#[test_case(2)]
#[test_case(10)]
#[test_case(25)]
fn test_total_distance_is_stride_times_gaps(count: usize) {
    let layout = TrackLayout::compute(1200.0, false, count, &LayoutConfig::default());
    assert_close(layout.total_distance, (count - 1) as f64 * layout.stride());
}

#[test_case(1200.0, false ; "desktop")]
#[test_case(390.0, true ; "mobile")]
fn test_active_card_is_centred_at_its_target(width: f64, mobile: bool) {
    let count = 7;
    let layout = TrackLayout::compute(width, mobile, count, &LayoutConfig::default());
    for index in 0..count {
        let scroll = target_scroll(index, count, layout.total_distance);
        let resolved = resolve(scroll, layout.total_distance, count);
        assert!((layout.card_left(index) + resolved.x_offset - layout.centering_offset).abs() < 1e-6);
    }
}

#[test]
fn test_for_viewport_uses_breakpoint() {
    let config = LayoutConfig::default();
    let narrow = TrackLayout::for_viewport(&Viewport::new(767.0, 900.0), 3, &config);
    let wide = TrackLayout::for_viewport(&Viewport::new(768.0, 900.0), 3, &config);
    assert!(narrow.is_mobile);
    assert!(!wide.is_mobile);
    assert_eq!(wide.card_width, 600.0);
}

#[test]
fn test_css_variables_mirror_layout() {
    let layout = TrackLayout::compute(1200.0, false, 5, &LayoutConfig::default());
    let vars = layout.css_variables();
    assert!(vars.contains(&("--tl-card-width", "600px".to_string())));
    assert!(vars.contains(&("--tl-card-gap", "180px".to_string())));
    assert!(vars.contains(&("--tl-centering-offset", "300px".to_string())));
    assert_eq!(vars.len(), 4);
}
