//! Month navigator and header derivations.
//!
//! Pure functions of the filtered view and the current snapshot. The viewer
//! serialises them for the navigator strip, the card month markers and the
//! header banner.

use serde::Serialize;

use crate::dataset::FilteredView;
use crate::types::{Month, TimelineSnapshot};

/// Header text shown before the intro threshold is passed.
pub const INTRO_LABEL: &str = "YEAR IN REVIEW";

/// One release as listed in a navigator bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketEntry {
    pub id: String,
    pub name: String,
    /// Position in the filtered view.
    pub index: usize,
    pub is_active: bool,
}

/// Releases of one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthBucket {
    pub month: Month,
    pub short_name: &'static str,
    pub entries: Vec<BucketEntry>,
    pub is_active: bool,
}

impl MonthBucket {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// All twelve months, each with the filtered releases it contains.
pub fn month_buckets(view: &FilteredView, snapshot: &TimelineSnapshot) -> Vec<MonthBucket> {
    Month::ALL
        .iter()
        .map(|&month| MonthBucket {
            month,
            short_name: month.short_name(),
            entries: view
                .iter()
                .enumerate()
                .filter(|(_, r)| r.month == month)
                .map(|(index, r)| BucketEntry {
                    id: r.item.id.clone(),
                    name: r.item.name.clone(),
                    index,
                    is_active: snapshot.active_id.as_deref() == Some(r.item.id.as_str()),
                })
                .collect(),
            is_active: snapshot.active_month == Some(month),
        })
        .collect()
}

/// Per-item flag: true where a card starts a new month.
pub fn month_markers(view: &FilteredView) -> Vec<bool> {
    let mut previous: Option<Month> = None;
    view.iter()
        .map(|r| {
            let starts = previous != Some(r.month);
            previous = Some(r.month);
            starts
        })
        .collect()
}

/// `"YEAR IN REVIEW"` until the intro threshold is passed, then the active month.
pub fn header_label(snapshot: &TimelineSnapshot) -> String {
    match snapshot.active_month {
        Some(month) if snapshot.is_past_intro_threshold => month.name().to_uppercase(),
        _ => INTRO_LABEL.to_string(),
    }
}

/// Months on either side of `month`; no wrap-around at the year ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjacentMonths {
    pub prev: Option<Month>,
    pub next: Option<Month>,
}

pub fn adjacent_months(month: Month) -> AdjacentMonths {
    AdjacentMonths {
        prev: month.prev(),
        next: month.next(),
    }
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
    use crate::dataset::{Dataset, MakerFilter};
    use crate::layout::Viewport;
    use crate::sync::TimelineEngine;
    use crate::types::ReleaseItem;

    fn dataset() -> Dataset {
        Dataset::from_items(vec![
            ReleaseItem::new("a", "Alpha", "X", "2025-01-10", "#111"),
            ReleaseItem::new("b", "Beta", "X", "2025-01-20", "#222"),
            ReleaseItem::new("c", "Gamma", "X", "2025-03-05", "#333"),
        ])
        .unwrap()
    }

    #[test]
    fn test_month_markers_flag_month_starts() {
        let view = dataset().filtered(&MakerFilter::All);
        assert_eq!(month_markers(&view), vec![true, false, true]);
    }

    #[test]
    fn test_buckets_cover_every_month() {
        let engine = TimelineEngine::new(dataset(), Viewport::new(1200.0, 800.0));
        let buckets = month_buckets(engine.view(), &engine.snapshot());
        assert_eq!(buckets.len(), 12);
        assert_eq!(buckets[0].entries.len(), 2);
        assert!(buckets[0].is_active);
        assert!(buckets[0].entries[0].is_active);
        assert!(!buckets[0].entries[1].is_active);
        assert!(buckets[1].is_empty());
        assert_eq!(buckets[2].entries[0].name, "Gamma");
        assert_eq!(buckets[2].entries[0].index, 2);
        assert_eq!(buckets[2].short_name, "Mar");
    }

    #[test]
    fn test_header_label_switches_after_intro() {
        let mut engine = TimelineEngine::new(dataset(), Viewport::new(400.0, 800.0));
        assert_eq!(header_label(&engine.snapshot()), INTRO_LABEL);

        engine.touch_start(300.0, 400.0, 0.0);
        engine.touch_move(260.0, 400.0, 16.0);
        assert_eq!(header_label(&engine.snapshot()), "JANUARY");
    }

    #[test]
    fn test_adjacent_months_stop_at_year_ends() {
        assert_eq!(adjacent_months(Month::January).prev, None);
        assert_eq!(adjacent_months(Month::January).next, Some(Month::February));
        assert_eq!(adjacent_months(Month::December).next, None);
    }
}
