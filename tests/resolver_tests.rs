//! Scroll resolver tests
//!
//! Forward mapping (scroll to progress, index and offset) and the inverse
//! mapping used by navigation.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use test_case::test_case;
use tlview::sync::resolver::is_past_intro;
use tlview::sync::{resolve, target_scroll};

const D: f64 = 3120.0;

#[test_case(0.0, 0, 0.0)]
#[test_case(1560.0, 2, 0.5)]
#[test_case(3120.0, 4, 1.0)]
#[test_case(1950.0, 3, 0.625 ; "half way between cards rounds up")]
#[test_case(700.0, 1, 700.0 / 3120.0)]
fn test_five_item_desktop_scenario(scroll: f64, index: usize, progress: f64) {
    let r = resolve(scroll, D, 5);
    assert_eq!(r.index, index);
    assert_eq!(r.progress, Some(progress));
    assert_eq!(r.x_offset, -progress * D);
}

#[test]
fn test_scroll_outside_range_is_clamped() {
    let below = resolve(-200.0, D, 5);
    assert_eq!(below.index, 0);
    assert_eq!(below.progress, Some(0.0));

    let above = resolve(9000.0, D, 5);
    assert_eq!(above.index, 4);
    assert_eq!(above.x_offset, -D);
}

#[test]
fn test_nan_scroll_reads_as_zero() {
    let r = resolve(f64::NAN, D, 5);
    assert_eq!(r.index, 0);
    assert_eq!(r.progress, Some(0.0));
}

#[test_case(0, 0.0 ; "empty view")]
#[test_case(1, 0.0 ; "single item")]
#[test_case(5, 0.0 ; "zero distance")]
fn test_inactive_resolution(count: usize, distance: f64) {
    let r = resolve(500.0, distance, count);
    assert_eq!(r.progress, None);
    assert_eq!(r.index, 0);
    assert_eq!(r.x_offset, 0.0);
}

#[test]
fn test_index_is_monotonic_in_scroll() {
    let mut last_index = 0;
    let mut last_offset = 0.0;
    let mut scroll = -100.0;
    while scroll <= D + 100.0 {
        let r = resolve(scroll, D, 5);
        assert!(r.index >= last_index);
        assert!(r.x_offset <= last_offset);
        assert!(r.index <= 4);
        last_index = r.index;
        last_offset = r.x_offset;
        scroll += 7.5;
    }
    assert_eq!(last_index, 4);
}

#[test_case(2)]
#[test_case(5)]
#[test_case(25)]
#[test_case(101)]
fn test_target_scroll_round_trips(count: usize) {
    let distance = (count - 1) as f64 * 780.0;
    for index in 0..count {
        let scroll = target_scroll(index, count, distance);
        assert_eq!(resolve(scroll, distance, count).index, index);
    }
}

#[test]
fn test_target_scroll_clamps_and_handles_single_item() {
    assert_eq!(target_scroll(99, 5, D), D);
    assert_eq!(target_scroll(0, 1, 0.0), 0.0);
    assert_eq!(target_scroll(3, 0, 0.0), 0.0);
}

#[test]
fn test_intro_threshold_is_strict() {
    assert!(!is_past_intro(0.0, 50.0));
    assert!(!is_past_intro(50.0, 50.0));
    assert!(is_past_intro(50.5, 50.0));
}
