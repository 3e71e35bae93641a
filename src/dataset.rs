//! The static release dataset and the maker-filtered views over it.
//!
//! Index positions inside a [`FilteredView`] are the coordinate system for
//! all scroll math. They are only meaningful for the filter that produced
//! them: index 3 under "All" is unrelated to index 3 under a single maker.

use std::collections::{BTreeSet, HashSet};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::date::parse_release_date;
use crate::error::{Result, TlviewError};
use crate::types::{Month, ReleaseItem};

/// Selector value that disables filtering.
pub const ALL_MAKERS: &str = "All";

const BUNDLED_DATASET: &str = include_str!("../data/releases_2025.json");

/// A release with its date resolved once at load time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    #[serde(flatten)]
    pub item: ReleaseItem,
    #[serde(skip)]
    pub date: NaiveDate,
    #[serde(skip)]
    pub month: Month,
}

impl Release {
    fn new(item: ReleaseItem) -> Self {
        let date = parse_release_date(&item.release_date);
        let month = Month::from_number(date.month()).unwrap_or(Month::January);
        Self { item, date, month }
    }

    pub fn id(&self) -> &str {
        &self.item.id
    }
}

/// Immutable, validated dataset in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    releases: Vec<Release>,
}

impl Dataset {
    /// Parse a JSON array of release records.
    pub fn from_json(json: &str) -> Result<Self> {
        let items: Vec<ReleaseItem> = serde_json::from_str(json)?;
        Self::from_items(items)
    }

    /// Validate ids and makers and resolve every release date.
    pub fn from_items(items: Vec<ReleaseItem>) -> Result<Self> {
        let mut seen: HashSet<String> = HashSet::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            if item.id.trim().is_empty() {
                return Err(TlviewError::MissingField { index, field: "id" });
            }
            if item.maker.trim().is_empty() {
                return Err(TlviewError::MissingField {
                    index,
                    field: "maker",
                });
            }
            if !seen.insert(item.id.clone()) {
                return Err(TlviewError::DuplicateId(item.id.clone()));
            }
        }
        let releases: Vec<Release> = items.into_iter().map(Release::new).collect();
        tracing::debug!(count = releases.len(), "dataset loaded");
        Ok(Self { releases })
    }

    /// The 2025 dataset compiled into the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_DATASET)
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    pub fn releases(&self) -> &[Release] {
        &self.releases
    }

    /// Filter selector options: `"All"` plus every maker, sorted as one list.
    pub fn makers(&self) -> Vec<String> {
        let unique: BTreeSet<&str> = self.releases.iter().map(|r| r.item.maker.as_str()).collect();
        let mut options: Vec<String> = std::iter::once(ALL_MAKERS)
            .chain(unique.into_iter().filter(|m| *m != ALL_MAKERS))
            .map(str::to_string)
            .collect();
        options.sort();
        options
    }

    /// Recompute the filtered view from scratch.
    pub fn filtered(&self, filter: &MakerFilter) -> FilteredView {
        FilteredView {
            filter: filter.clone(),
            releases: self
                .releases
                .iter()
                .filter(|r| filter.matches(&r.item))
                .cloned()
                .collect(),
        }
    }
}

/// Equality predicate on `maker`, or the identity filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MakerFilter {
    #[default]
    All,
    Maker(String),
}

impl MakerFilter {
    /// `"All"` selects everything; any other value matches `maker` exactly.
    pub fn from_selector(selector: &str) -> Self {
        if selector == ALL_MAKERS {
            Self::All
        } else {
            Self::Maker(selector.to_string())
        }
    }

    pub fn selector(&self) -> &str {
        match self {
            Self::All => ALL_MAKERS,
            Self::Maker(maker) => maker,
        }
    }

    pub fn matches(&self, item: &ReleaseItem) -> bool {
        match self {
            Self::All => true,
            Self::Maker(maker) => item.maker == *maker,
        }
    }
}

/// Ordered subsequence of the dataset matching a [`MakerFilter`].
#[derive(Debug, Clone, Default)]
pub struct FilteredView {
    filter: MakerFilter,
    releases: Vec<Release>,
}

impl FilteredView {
    pub fn filter(&self) -> &MakerFilter {
        &self.filter
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Release> {
        self.releases.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Release> {
        self.releases.iter()
    }

    /// Position of the release with this id.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.releases.iter().position(|r| r.item.id == id)
    }

    /// First release whose month is `month` or later, so empty months snap
    /// forward to the next populated one.
    pub fn first_at_or_after(&self, month: Month) -> Option<usize> {
        self.releases.iter().position(|r| r.month >= month)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    fn item(id: &str, maker: &str, date: &str) -> ReleaseItem {
        ReleaseItem::new(id, id, maker, date, "#fff")
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let err = Dataset::from_items(vec![
            item("a", "X", "2025-01-01"),
            item("a", "Y", "2025-02-01"),
        ])
        .unwrap_err();
        assert!(matches!(err, TlviewError::DuplicateId(id) if id == "a"));
    }

    #[test]
    fn test_empty_maker_is_rejected() {
        let err = Dataset::from_items(vec![item("a", " ", "2025-01-01")]).unwrap_err();
        assert!(matches!(
            err,
            TlviewError::MissingField {
                index: 0,
                field: "maker"
            }
        ));
    }

    #[test]
    fn test_makers_sort_all_among_names() {
        let ds = Dataset::from_items(vec![
            item("a", "OpenAI", "2025-01-01"),
            item("b", "Alibaba", "2025-01-02"),
            item("c", "OpenAI", "2025-01-03"),
            item("d", "Zhipu", "2025-01-04"),
        ])
        .unwrap();
        assert_eq!(ds.makers(), vec!["Alibaba", "All", "OpenAI", "Zhipu"]);
    }

    #[test]
    fn test_filtered_view_keeps_insertion_order() {
        let ds = Dataset::from_items(vec![
            item("a", "X", "2025-03-01"),
            item("b", "Y", "2025-01-01"),
            item("c", "X", "2025-02-01"),
        ])
        .unwrap();
        let view = ds.filtered(&MakerFilter::from_selector("X"));
        let ids: Vec<&str> = view.iter().map(Release::id).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(view.position_of("c"), Some(1));
        assert_eq!(view.position_of("b"), None);
    }

    #[test]
    fn test_all_selector_is_identity() {
        let ds = Dataset::from_items(vec![item("a", "X", "2025-03-01")]).unwrap();
        let filter = MakerFilter::from_selector(ALL_MAKERS);
        assert_eq!(filter, MakerFilter::All);
        assert_eq!(ds.filtered(&filter).len(), 1);
    }

    #[test]
    fn test_bundled_dataset_loads() {
        let ds = Dataset::bundled().unwrap();
        assert!(ds.len() > 10);
        assert!(ds.makers().len() > 3);
    }
}
