//! Dataset record types.

use serde::{Deserialize, Serialize};

/// One AI model release.
///
/// The sync engine reads `id`, `release_date`, `maker` and `color`. Every
/// other field in the source record (description, links, benchmarks, ...) is
/// kept verbatim in `extra` and handed back to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseItem {
    /// Unique within the dataset.
    pub id: String,
    /// Display name; the navigator lists it under the release month.
    #[serde(default)]
    pub name: String,
    /// Organisation; the maker filter matches on it exactly.
    pub maker: String,
    /// `YYYY-MM-DD` or a looser textual date.
    #[serde(default)]
    pub release_date: String,
    /// CSS colour, opaque to the engine.
    pub color: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ReleaseItem {
    /// Build a record with no presentational extras.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        maker: impl Into<String>,
        release_date: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            maker: maker.into(),
            release_date: release_date.into(),
            color: color.into(),
            extra: serde_json::Map::new(),
        }
    }
}
