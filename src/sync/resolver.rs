//! Forward and inverse mapping between the scroll coordinate and item indices.
//!
//! Progress is index-proportional: all `n` items are spread evenly across
//! the scroll range, whatever the filtered count, so one wheel notch moves
//! the track by the same fraction under every filter.

use serde::Serialize;

/// Result of resolving one scroll value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolved {
    /// `scroll / total_distance` clamped to `[0, 1]`; `None` when nothing can scroll.
    pub progress: Option<f64>,
    /// Nearest item, always within `[0, item_count - 1]` (0 for an empty view).
    pub index: usize,
    /// Track translation; scrolling forward moves the track left.
    pub x_offset: f64,
}

impl Resolved {
    const INACTIVE: Resolved = Resolved {
        progress: None,
        index: 0,
        x_offset: 0.0,
    };
}

/// Map a scroll value to progress, active index and track offset.
///
/// ```
/// use tlview::sync::resolve;
///
/// let r = resolve(1560.0, 3120.0, 5);
/// assert_eq!(r.index, 2);
/// assert_eq!(r.progress, Some(0.5));
/// assert_eq!(r.x_offset, -1560.0);
/// ```
pub fn resolve(scroll_value: f64, total_distance: f64, item_count: usize) -> Resolved {
    if !(total_distance.is_finite() && total_distance > 0.0) || item_count < 2 {
        return Resolved::INACTIVE;
    }
    let scroll_value = if scroll_value.is_finite() {
        scroll_value
    } else {
        0.0
    };
    let progress = (scroll_value / total_distance).clamp(0.0, 1.0);
    let last = item_count - 1;
    Resolved {
        progress: Some(progress),
        index: nearest_index(progress, last),
        x_offset: -progress * total_distance,
    }
}

/// `round(progress * last)`.
/// The f64→usize cast is safe: progress is clamped to [0, 1], so the rounded
/// value is a non-negative integer no larger than `last`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn nearest_index(progress: f64, last: usize) -> usize {
    let exact = progress * last as f64;
    (exact.round().max(0.0) as usize).min(last)
}

/// Scroll offset that resolves to `index`. 0 when `item_count <= 1`.
///
/// Indices past the end are clamped to the last item.
pub fn target_scroll(index: usize, item_count: usize, total_distance: f64) -> f64 {
    if item_count <= 1 || !(total_distance.is_finite() && total_distance > 0.0) {
        return 0.0;
    }
    let last = item_count - 1;
    (index.min(last) as f64 / last as f64) * total_distance
}

/// Fixed-pixel test that swaps the intro banner for the month label.
pub fn is_past_intro(scroll_value: f64, threshold: f64) -> bool {
    scroll_value > threshold
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(resolve(-100.0, 1000.0, 3).progress, Some(0.0));
        assert_eq!(resolve(5000.0, 1000.0, 3).progress, Some(1.0));
        assert_eq!(resolve(5000.0, 1000.0, 3).index, 2);
        assert_eq!(resolve(5000.0, 1000.0, 3).x_offset, -1000.0);
    }

    #[test]
    fn test_zero_distance_is_inactive() {
        let r = resolve(400.0, 0.0, 1);
        assert_eq!(r.progress, None);
        assert_eq!(r.index, 0);
        assert_eq!(r.x_offset, 0.0);
    }

    #[test]
    fn test_nan_scroll_resolves_to_start() {
        let r = resolve(f64::NAN, 1000.0, 4);
        assert_eq!(r.index, 0);
        assert_eq!(r.x_offset, 0.0);
    }

    #[test]
    fn test_rounding_picks_nearest() {
        // 4 items over 900px: items at 0, 300, 600, 900
        assert_eq!(resolve(149.0, 900.0, 4).index, 0);
        assert_eq!(resolve(151.0, 900.0, 4).index, 1);
        assert_eq!(resolve(749.0, 900.0, 4).index, 2);
        assert_eq!(resolve(751.0, 900.0, 4).index, 3);
    }

    #[test]
    fn test_target_scroll_guards_small_views() {
        assert_eq!(target_scroll(0, 0, 1000.0), 0.0);
        assert_eq!(target_scroll(0, 1, 1000.0), 0.0);
        assert_eq!(target_scroll(9, 3, 1000.0), 1000.0);
        assert_eq!(target_scroll(1, 3, 1000.0), 500.0);
    }

    #[test]
    fn test_intro_threshold_is_strict() {
        assert!(!is_past_intro(50.0, 50.0));
        assert!(is_past_intro(50.5, 50.0));
    }
}
