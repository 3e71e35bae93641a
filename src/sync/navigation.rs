//! Navigation targets: month and model jumps resolved through the inverse mapping.
//!
//! Both lookups are silent no-ops when the target is unknown or when the
//! filtered view has at most one item (there is nowhere to scroll).

use super::resolver::target_scroll;
use crate::dataset::FilteredView;
use crate::layout::TrackLayout;
use crate::types::Month;

/// Index of the first item released in `month_name` or later.
///
/// Months without releases snap forward to the next populated month.
pub fn month_index(view: &FilteredView, month_name: &str) -> Option<usize> {
    let Some(month) = Month::from_name(month_name) else {
        tracing::warn!(month = month_name, "unknown month name");
        return None;
    };
    view.first_at_or_after(month)
}

/// Index of the item with this id.
pub fn model_index(view: &FilteredView, id: &str) -> Option<usize> {
    let index = view.position_of(id);
    if index.is_none() {
        tracing::warn!(id, "model not in filtered view");
    }
    index
}

/// Scroll offset for `index`, or `None` when the view cannot scroll.
pub fn scroll_target(index: usize, layout: &TrackLayout) -> Option<f64> {
    if layout.item_count <= 1 {
        return None;
    }
    Some(target_scroll(index, layout.item_count, layout.total_distance))
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
    use crate::config::LayoutConfig;
    use crate::dataset::{Dataset, MakerFilter};
    use crate::types::ReleaseItem;

    fn view(dates: &[&str]) -> FilteredView {
        let items = dates
            .iter()
            .enumerate()
            .map(|(i, d)| ReleaseItem::new(format!("m{i}"), format!("M{i}"), "X", *d, "#fff"))
            .collect();
        Dataset::from_items(items)
            .unwrap()
            .filtered(&MakerFilter::All)
    }

    #[test]
    fn test_empty_month_snaps_forward() {
        let v = view(&["2025-01-10", "2025-01-20", "2025-03-05"]);
        assert_eq!(month_index(&v, "February"), Some(2));
        assert_eq!(month_index(&v, "March"), month_index(&v, "February"));
        assert_eq!(month_index(&v, "January"), Some(0));
    }

    #[test]
    fn test_month_after_last_release_is_not_found() {
        let v = view(&["2025-01-10", "2025-03-05"]);
        assert_eq!(month_index(&v, "April"), None);
        assert_eq!(month_index(&v, "Brumaire"), None);
    }

    #[test]
    fn test_single_item_has_no_target() {
        let layout = TrackLayout::compute(1200.0, false, 1, &LayoutConfig::default());
        assert_eq!(scroll_target(0, &layout), None);
    }

    #[test]
    fn test_target_uses_inverse_mapping() {
        let layout = TrackLayout::compute(1200.0, false, 5, &LayoutConfig::default());
        assert_eq!(scroll_target(2, &layout), Some(1560.0));
        assert_eq!(scroll_target(4, &layout), Some(3120.0));
    }
}
