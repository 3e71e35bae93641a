//! Read-only projection of the sync engine consumed by the presentation layer.

use serde::Serialize;

use super::Month;

/// How a programmatic scroll should move the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ScrollBehavior {
    /// Animated by the browser (navigator clicks).
    Smooth,
    /// Jump in one step (filter reset, synthetic touch deltas).
    Instant,
}

/// A request to move the scroll signal source to an absolute offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollRequest {
    pub offset: f64,
    pub behavior: ScrollBehavior,
}

impl ScrollRequest {
    pub fn smooth(offset: f64) -> Self {
        Self {
            offset,
            behavior: ScrollBehavior::Smooth,
        }
    }

    pub fn instant(offset: f64) -> Self {
        Self {
            offset,
            behavior: ScrollBehavior::Instant,
        }
    }
}

/// Everything the card track, particle field, navigator and progress bar read.
///
/// Recomputed from scratch on every read, so it can never lag the scroll state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineSnapshot {
    /// Horizontal translation of the card track (px, `<= 0`).
    pub x_offset: f64,
    /// Filtered-view position nearest the current progress; `None` when the view is empty.
    pub active_index: Option<usize>,
    pub active_id: Option<String>,
    pub active_color: String,
    pub active_month: Option<Month>,
    /// Normalised position in `[0, 1]`; `None` when there is nothing to scroll.
    pub progress: Option<f64>,
    /// `progress * 100`, 0 when inactive.
    pub progress_percent: f64,
    pub is_past_intro_threshold: bool,
    /// Card auto-expanded on desktop; always `None` on mobile.
    pub expanded_index: Option<usize>,
    /// Scroll coordinate that fed the resolver (smoothed on desktop).
    pub scroll_position: f64,
    pub item_count: usize,
}
