//! Card track geometry.
//!
//! Derives card width, gap, centring offset and total scroll distance from
//! the viewport width, the mobile flag and the number of filtered items.
//! The same numbers are exported as CSS custom properties so the stylesheet
//! never hard-codes its own copy of the gap.

use serde::Serialize;

use super::Viewport;
use crate::config::LayoutConfig;

/// Layout parameters for one (viewport width, mode, item count) triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackLayout {
    pub card_width: f64,
    pub gap: f64,
    /// Left padding that centres the first card in the viewport.
    pub centering_offset: f64,
    /// Scroll distance from the first card to the last; 0 when fewer than two items.
    pub total_distance: f64,
    pub item_count: usize,
    pub viewport_width: f64,
    pub is_mobile: bool,
}

impl TrackLayout {
    /// Compute the layout.
    ///
    /// ```
    /// use tlview::config::LayoutConfig;
    /// use tlview::layout::TrackLayout;
    ///
    /// let layout = TrackLayout::compute(1200.0, false, 5, &LayoutConfig::default());
    /// assert_eq!(layout.card_width, 600.0);
    /// assert_eq!(layout.gap, 180.0);
    /// assert_eq!(layout.total_distance, 3120.0);
    /// ```
    pub fn compute(
        viewport_width: f64,
        is_mobile: bool,
        item_count: usize,
        config: &LayoutConfig,
    ) -> Self {
        let (card_width, gap) = if is_mobile {
            (
                viewport_width * config.mobile_card_ratio,
                viewport_width * config.mobile_gap_ratio,
            )
        } else {
            (
                config.desktop_card_width,
                viewport_width * config.desktop_gap_ratio,
            )
        };
        let centering_offset = (viewport_width - card_width) / 2.0;
        let steps = item_count.saturating_sub(1) as f64;
        let total_distance = (steps * (card_width + gap)).max(0.0);

        Self {
            card_width,
            gap,
            centering_offset,
            total_distance,
            item_count,
            viewport_width,
            is_mobile,
        }
    }

    /// Layout for a viewport, choosing the mode from the breakpoint.
    pub fn for_viewport(viewport: &Viewport, item_count: usize, config: &LayoutConfig) -> Self {
        Self::compute(
            viewport.width,
            viewport.is_mobile(config),
            item_count,
            config,
        )
    }

    /// Distance between the left edges of neighbouring cards.
    pub fn stride(&self) -> f64 {
        self.card_width + self.gap
    }

    /// False when there is at most one card; all scroll-driven motion is off.
    pub fn is_scrollable(&self) -> bool {
        self.total_distance > 0.0
    }

    /// Height the document needs so the vertical scroll range equals `total_distance`.
    pub fn document_height(&self, viewport_height: f64) -> f64 {
        self.total_distance + viewport_height
    }

    /// Width of the continuous axis line behind the cards.
    pub fn track_width(&self) -> f64 {
        self.centering_offset + self.item_count as f64 * self.stride() + self.viewport_width
    }

    /// Left edge of card `index` on the untranslated track.
    pub fn card_left(&self, index: usize) -> f64 {
        self.centering_offset + index as f64 * self.stride()
    }

    /// CSS custom properties mirroring this layout.
    pub fn css_variables(&self) -> Vec<(&'static str, String)> {
        vec![
            ("--tl-card-width", px(self.card_width)),
            ("--tl-card-gap", px(self.gap)),
            ("--tl-centering-offset", px(self.centering_offset)),
            ("--tl-track-width", px(self.track_width())),
        ]
    }
}

fn px(v: f64) -> String {
    format!("{}px", (v * 100.0).round() / 100.0)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp
)]
mod tests {
    use super::*;

    #[test]
    fn test_single_item_has_no_distance() {
        let layout = TrackLayout::compute(1200.0, false, 1, &LayoutConfig::default());
        assert_eq!(layout.total_distance, 0.0);
        assert!(!layout.is_scrollable());
        assert_eq!(layout.centering_offset, 300.0);
    }

    #[test]
    fn test_empty_view_has_no_distance() {
        let layout = TrackLayout::compute(390.0, true, 0, &LayoutConfig::default());
        assert_eq!(layout.total_distance, 0.0);
    }

    #[test]
    fn test_css_variables_match_math() {
        let layout = TrackLayout::compute(1000.0, false, 3, &LayoutConfig::default());
        let vars = layout.css_variables();
        assert_eq!(vars[0], ("--tl-card-width", "600px".to_string()));
        assert_eq!(vars[1], ("--tl-card-gap", "150px".to_string()));
        assert_eq!(vars[2], ("--tl-centering-offset", "200px".to_string()));
        // 200 + 3 * 750 + 1000
        assert_eq!(vars[3], ("--tl-track-width", "3450px".to_string()));
    }
}
