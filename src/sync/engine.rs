//! The centrally owned timeline state.
//!
//! `TimelineEngine` holds the filtered view, the layout, the raw scroll
//! coordinate and the input strategy. Derived values (progress, active index,
//! track offset, colour) are never stored; [`TimelineEngine::snapshot`]
//! recomputes them from the current state on every call, so the displayed
//! index cannot lag the scroll coordinate.
//!
//! The engine does not touch the page. Operations that move the scroll
//! coordinate return a [`ScrollRequest`] for the caller to hand to its
//! [`ScrollSource`](super::ScrollSource); the source then reports the new
//! position back through [`TimelineEngine::on_scroll`].

use serde::Serialize;

use super::momentum::TouchMomentum;
use super::navigation;
use super::resolver::{self, Resolved};
use super::source::clamp_offset;
use super::spring::SpringFilter;
use crate::config::TimelineConfig;
use crate::dataset::{Dataset, FilteredView, MakerFilter};
use crate::error::Result;
use crate::layout::{TrackLayout, Viewport};
use crate::navigator;
use crate::types::{ScrollRequest, TimelineSnapshot};

/// Input modality, picked from the viewport breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InputMode {
    /// Wheel/scrollbar input, spring-smoothed.
    Desktop,
    /// Swipe input injected directly, with post-gesture momentum.
    Mobile,
}

impl InputMode {
    pub fn for_viewport(viewport: &Viewport, config: &TimelineConfig) -> Self {
        if viewport.is_mobile(&config.layout) {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        self == Self::Mobile
    }
}

/// Device-specific input handling. Each variant owns its single animation loop.
#[derive(Debug, Clone)]
enum InputStrategy {
    Wheel(SpringFilter),
    Touch(TouchMomentum),
}

impl InputStrategy {
    fn for_mode(mode: InputMode, config: &TimelineConfig, position: f64) -> Self {
        match mode {
            InputMode::Desktop => Self::Wheel(SpringFilter::new(config.spring, position)),
            InputMode::Mobile => Self::Touch(TouchMomentum::new(config.momentum)),
        }
    }
}

/// What a frame callback should do next.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameOutcome {
    /// Request another animation frame.
    pub needs_frame: bool,
    /// Mirror the engine's coordinate into the scroll source.
    pub scroll_request: Option<ScrollRequest>,
}

/// What a touch-move handler should do with the event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchOutcome {
    /// The gesture drives the timeline; suppress the browser's own scrolling.
    pub prevent_default: bool,
    pub scroll_request: Option<ScrollRequest>,
}

#[derive(Debug, Clone)]
pub struct TimelineEngine {
    config: TimelineConfig,
    dataset: Dataset,
    view: FilteredView,
    viewport: Viewport,
    layout: TrackLayout,
    mode: InputMode,
    strategy: InputStrategy,
    raw: f64,
}

impl TimelineEngine {
    /// Engine with default options, showing every maker.
    pub fn new(dataset: Dataset, viewport: Viewport) -> Self {
        Self::build(dataset, viewport, TimelineConfig::default())
    }

    /// Engine with validated options.
    pub fn with_config(dataset: Dataset, viewport: Viewport, config: TimelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(dataset, viewport, config))
    }

    fn build(dataset: Dataset, viewport: Viewport, config: TimelineConfig) -> Self {
        let mode = InputMode::for_viewport(&viewport, &config);
        let view = dataset.filtered(&MakerFilter::All);
        let layout = TrackLayout::compute(viewport.width, mode.is_mobile(), view.len(), &config.layout);
        let strategy = InputStrategy::for_mode(mode, &config, 0.0);
        tracing::debug!(?mode, items = view.len(), "timeline engine ready");
        Self {
            config,
            dataset,
            view,
            viewport,
            layout,
            mode,
            strategy,
            raw: 0.0,
        }
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    pub fn filter(&self) -> &MakerFilter {
        self.view.filter()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn layout(&self) -> &TrackLayout {
        &self.layout
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Filter options for the maker selector.
    pub fn makers(&self) -> Vec<String> {
        self.dataset.makers()
    }

    /// Last coordinate reported by the scroll source or injected by touch.
    pub fn raw_position(&self) -> f64 {
        self.raw
    }

    /// Coordinate fed to the resolver: spring output on desktop, raw on mobile.
    pub fn smoothed_position(&self) -> f64 {
        match &self.strategy {
            InputStrategy::Wheel(spring) => spring.position(),
            InputStrategy::Touch(_) => self.raw,
        }
    }

    /// Height the scrollable document must have for the current layout.
    pub fn document_height(&self) -> f64 {
        self.layout.document_height(self.viewport.height)
    }

    /// True while the spring or the momentum loop still needs frames.
    pub fn is_animating(&self) -> bool {
        match &self.strategy {
            InputStrategy::Wheel(spring) => spring.state().is_running(),
            InputStrategy::Touch(momentum) => momentum.state().is_running(),
        }
    }

    fn relayout(&mut self) {
        self.layout = TrackLayout::compute(
            self.viewport.width,
            self.mode.is_mobile(),
            self.view.len(),
            &self.config.layout,
        );
        tracing::debug!(
            card_width = self.layout.card_width,
            gap = self.layout.gap,
            total_distance = self.layout.total_distance,
            items = self.layout.item_count,
            "layout recomputed"
        );
    }

    /// Viewport changed. Recomputes the layout synchronously, re-selects the
    /// input strategy if the breakpoint was crossed, and clamps the coordinate
    /// into the new range. Returns false when the size did not change.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        if !self.viewport.resize(width, height) {
            return false;
        }
        let mode = InputMode::for_viewport(&self.viewport, &self.config);
        if mode != self.mode {
            tracing::debug!(?mode, "input strategy switched");
            self.mode = mode;
            self.strategy = InputStrategy::for_mode(mode, &self.config, self.raw);
        }
        self.relayout();
        self.raw = clamp_offset(self.raw, self.layout.total_distance);
        if let InputStrategy::Wheel(spring) = &mut self.strategy {
            spring.set_target(self.raw);
        }
        true
    }

    /// Switch the maker filter. Indices do not carry over between filters, so
    /// the coordinate returns to 0 without animation.
    pub fn set_filter(&mut self, selector: &str) -> ScrollRequest {
        let filter = MakerFilter::from_selector(selector);
        self.view = self.dataset.filtered(&filter);
        if self.view.is_empty() {
            tracing::warn!(maker = selector, "filter matches no releases");
        }
        tracing::debug!(maker = selector, items = self.view.len(), "filter changed");
        self.relayout();
        self.raw = 0.0;
        match &mut self.strategy {
            InputStrategy::Wheel(spring) => spring.snap_to(0.0),
            InputStrategy::Touch(momentum) => momentum.halt(),
        }
        ScrollRequest::instant(0.0)
    }

    /// The scroll source moved. Returns true when frames are needed.
    pub fn on_scroll(&mut self, position: f64) -> bool {
        self.raw = clamp_offset(position, self.layout.total_distance);
        match &mut self.strategy {
            InputStrategy::Wheel(spring) => spring.set_target(self.raw),
            InputStrategy::Touch(momentum) => momentum.state().is_running(),
        }
    }

    /// Advance the active animation loop by one frame.
    pub fn tick(&mut self, dt_ms: f64) -> FrameOutcome {
        let delta = match &mut self.strategy {
            InputStrategy::Wheel(spring) => {
                return FrameOutcome {
                    needs_frame: spring.step(dt_ms).is_running(),
                    scroll_request: None,
                };
            }
            InputStrategy::Touch(momentum) => momentum.step(),
        };
        let Some(delta) = delta else {
            return FrameOutcome::default();
        };
        if self.apply_delta(delta) {
            if let InputStrategy::Touch(momentum) = &mut self.strategy {
                momentum.halt();
            }
        }
        FrameOutcome {
            needs_frame: self.is_animating(),
            scroll_request: Some(ScrollRequest::instant(self.raw)),
        }
    }

    /// Move the coordinate by `delta`. Returns true when it was pinned at either end.
    fn apply_delta(&mut self, delta: f64) -> bool {
        let wanted = self.raw + delta;
        self.raw = clamp_offset(wanted, self.layout.total_distance);
        (self.raw - wanted).abs() > f64::EPSILON
    }

    pub fn touch_start(&mut self, x: f64, y: f64, time_ms: f64) {
        if let InputStrategy::Touch(momentum) = &mut self.strategy {
            momentum.touch_start(x, y, time_ms);
        }
    }

    /// Apply a horizontal swipe to the coordinate immediately, before any
    /// read in the same frame.
    pub fn touch_move(&mut self, x: f64, y: f64, time_ms: f64) -> TouchOutcome {
        let delta = match &mut self.strategy {
            InputStrategy::Touch(momentum) => momentum.touch_move(x, y, time_ms),
            InputStrategy::Wheel(_) => None,
        };
        let Some(delta) = delta else {
            return TouchOutcome::default();
        };
        self.apply_delta(delta);
        TouchOutcome {
            prevent_default: true,
            scroll_request: Some(ScrollRequest::instant(self.raw)),
        }
    }

    /// Returns true when momentum started and frames are needed.
    pub fn touch_end(&mut self) -> bool {
        match &mut self.strategy {
            InputStrategy::Touch(momentum) => momentum.touch_end(),
            InputStrategy::Wheel(_) => false,
        }
    }

    pub fn touch_cancel(&mut self) {
        if let InputStrategy::Touch(momentum) = &mut self.strategy {
            momentum.touch_cancel();
        }
    }

    /// Jump to the first release in `month` (or the next populated month).
    pub fn jump_to_month(&mut self, month: &str) -> Option<ScrollRequest> {
        let index = navigation::month_index(&self.view, month)?;
        self.jump_to_index(index)
    }

    /// Jump to the release with this id.
    pub fn jump_to_model(&mut self, id: &str) -> Option<ScrollRequest> {
        let index = navigation::model_index(&self.view, id)?;
        self.jump_to_index(index)
    }

    /// Jump one month back or forward from the active month (mobile navigator arrows).
    pub fn step_month(&mut self, forward: bool) -> Option<ScrollRequest> {
        let active = self.snapshot().active_month?;
        let adjacent = navigator::adjacent_months(active);
        let target = if forward { adjacent.next } else { adjacent.prev }?;
        self.jump_to_month(target.name())
    }

    /// Smooth scroll request that lands on `index`; `None` when the view cannot scroll.
    pub fn jump_to_index(&mut self, index: usize) -> Option<ScrollRequest> {
        let offset = navigation::scroll_target(index, &self.layout)?;
        if let InputStrategy::Touch(momentum) = &mut self.strategy {
            momentum.halt();
        }
        tracing::debug!(index, offset, "navigation jump");
        Some(ScrollRequest::smooth(offset))
    }

    /// Resolve the coordinate the resolver currently sees.
    pub fn resolved(&self) -> Resolved {
        resolver::resolve(
            self.smoothed_position(),
            self.layout.total_distance,
            self.view.len(),
        )
    }

    /// Read-only projection for the presentation layer.
    pub fn snapshot(&self) -> TimelineSnapshot {
        let position = self.smoothed_position();
        let resolved = self.resolved();
        let active_index = (!self.view.is_empty()).then_some(resolved.index);
        let active = active_index
            .and_then(|i| self.view.get(i))
            .or_else(|| self.view.get(0));

        TimelineSnapshot {
            x_offset: resolved.x_offset,
            active_index,
            active_id: active.map(|r| r.item.id.clone()),
            active_color: active.map_or_else(
                || self.config.fallback_color.clone(),
                |r| r.item.color.clone(),
            ),
            active_month: active.map(|r| r.month),
            progress: resolved.progress,
            progress_percent: resolved.progress.map_or(0.0, |p| p * 100.0),
            is_past_intro_threshold: resolver::is_past_intro(position, self.config.intro_threshold),
            expanded_index: if self.mode.is_mobile() {
                None
            } else {
                active_index
            },
            scroll_position: position,
            item_count: self.view.len(),
        }
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
    use crate::types::{Month, ReleaseItem, ScrollBehavior};

    fn dataset() -> Dataset {
        Dataset::from_items(vec![
            ReleaseItem::new("a", "A", "X", "2025-01-10", "#111"),
            ReleaseItem::new("b", "B", "Y", "2025-01-20", "#222"),
            ReleaseItem::new("c", "C", "X", "2025-03-05", "#333"),
            ReleaseItem::new("d", "D", "Y", "2025-06-01", "#444"),
            ReleaseItem::new("e", "E", "X", "2025-09-09", "#555"),
        ])
        .unwrap()
    }

    fn desktop() -> TimelineEngine {
        TimelineEngine::new(dataset(), Viewport::new(1200.0, 800.0))
    }

    fn mobile() -> TimelineEngine {
        TimelineEngine::new(dataset(), Viewport::new(400.0, 800.0))
    }

    fn settle(engine: &mut TimelineEngine) {
        for _ in 0..2000 {
            if !engine.tick(16.0).needs_frame {
                return;
            }
        }
        panic!("spring never settled");
    }

    #[test]
    fn test_initial_snapshot() {
        let engine = desktop();
        assert_eq!(engine.mode(), InputMode::Desktop);
        assert_eq!(engine.layout().total_distance, 3120.0);
        assert_eq!(engine.document_height(), 3920.0);

        let snap = engine.snapshot();
        assert_eq!(snap.active_index, Some(0));
        assert_eq!(snap.active_id.as_deref(), Some("a"));
        assert_eq!(snap.active_color, "#111");
        assert_eq!(snap.progress, Some(0.0));
        assert!(!snap.is_past_intro_threshold);
        assert_eq!(snap.expanded_index, Some(0));
    }

    #[test]
    fn test_desktop_scroll_is_smoothed() {
        let mut engine = desktop();
        assert!(engine.on_scroll(1560.0));
        assert_eq!(engine.raw_position(), 1560.0);
        assert_eq!(engine.smoothed_position(), 0.0);

        engine.tick(16.0);
        let mid = engine.smoothed_position();
        assert!(mid > 0.0 && mid < 1560.0);

        settle(&mut engine);
        let snap = engine.snapshot();
        assert!((snap.scroll_position - 1560.0).abs() < 0.05);
        assert_eq!(snap.active_index, Some(2));
        assert!(snap.is_past_intro_threshold);
        assert!(!engine.is_animating());
    }

    #[test]
    fn test_scroll_beyond_range_is_clamped() {
        let mut engine = desktop();
        engine.on_scroll(10_000.0);
        assert_eq!(engine.raw_position(), 3120.0);
        engine.on_scroll(f64::NAN);
        assert_eq!(engine.raw_position(), 0.0);
    }

    #[test]
    fn test_filter_resets_scroll_instantly() {
        let mut engine = desktop();
        engine.on_scroll(2000.0);
        settle(&mut engine);

        let request = engine.set_filter("X");
        assert_eq!(request, ScrollRequest::instant(0.0));
        assert_eq!(request.behavior, ScrollBehavior::Instant);
        assert_eq!(engine.raw_position(), 0.0);
        assert_eq!(engine.smoothed_position(), 0.0);
        assert!(!engine.is_animating());
        assert_eq!(engine.view().len(), 3);
        assert_eq!(engine.layout().total_distance, 2.0 * 780.0);
        assert_eq!(engine.snapshot().active_id.as_deref(), Some("a"));
    }

    #[test]
    fn test_empty_filter_uses_fallback_color() {
        let mut engine = desktop();
        engine.set_filter("Nobody");
        let snap = engine.snapshot();
        assert_eq!(snap.active_index, None);
        assert_eq!(snap.active_id, None);
        assert_eq!(snap.active_color, "#00f3ff");
        assert_eq!(snap.progress, None);
        assert_eq!(snap.progress_percent, 0.0);
        assert_eq!(engine.layout().total_distance, 0.0);
    }

    #[test]
    fn test_jump_to_month_returns_smooth_request() {
        let mut engine = desktop();
        let request = engine.jump_to_month("February").unwrap();
        assert_eq!(request, ScrollRequest::smooth(2.0 / 4.0 * 3120.0));
        // Navigation leaves the coordinate to the scroll source.
        assert_eq!(engine.raw_position(), 0.0);
    }

    #[test]
    fn test_jump_to_unknown_targets_is_noop() {
        let mut engine = desktop();
        assert_eq!(engine.jump_to_month("Smarch"), None);
        assert_eq!(engine.jump_to_month("December"), None);
        assert_eq!(engine.jump_to_model("zzz"), None);
    }

    #[test]
    fn test_single_item_view_cannot_jump() {
        let ds = Dataset::from_items(vec![ReleaseItem::new("a", "A", "X", "2025-01-01", "#1")])
            .unwrap();
        let mut engine = TimelineEngine::new(ds, Viewport::new(1200.0, 800.0));
        assert_eq!(engine.jump_to_model("a"), None);
        let snap = engine.snapshot();
        assert_eq!(snap.active_index, Some(0));
        assert_eq!(snap.progress, None);
    }

    #[test]
    fn test_mobile_swipe_moves_coordinate_directly() {
        let mut engine = mobile();
        assert_eq!(engine.mode(), InputMode::Mobile);
        engine.touch_start(300.0, 400.0, 0.0);
        let outcome = engine.touch_move(250.0, 402.0, 16.0);
        assert!(outcome.prevent_default);
        assert_eq!(engine.raw_position(), 100.0);
        assert_eq!(outcome.scroll_request, Some(ScrollRequest::instant(100.0)));
        assert_eq!(engine.snapshot().scroll_position, 100.0);
        assert_eq!(engine.snapshot().expanded_index, None);
    }

    #[test]
    fn test_mobile_vertical_drag_is_ignored() {
        let mut engine = mobile();
        engine.touch_start(300.0, 400.0, 0.0);
        let outcome = engine.touch_move(295.0, 300.0, 16.0);
        assert!(!outcome.prevent_default);
        assert_eq!(engine.raw_position(), 0.0);
    }

    #[test]
    fn test_momentum_coasts_then_stops() {
        let mut engine = mobile();
        engine.touch_start(300.0, 400.0, 0.0);
        engine.touch_move(200.0, 400.0, 100.0);
        assert!(engine.touch_end());
        let released_at = engine.raw_position();

        let mut frames = 0;
        while engine.tick(16.0).needs_frame {
            frames += 1;
            assert!(frames < 1000);
        }
        assert!(engine.raw_position() > released_at);
        assert!(!engine.is_animating());
    }

    #[test]
    fn test_touch_on_desktop_is_ignored() {
        let mut engine = desktop();
        engine.touch_start(300.0, 400.0, 0.0);
        assert_eq!(engine.touch_move(100.0, 400.0, 16.0), TouchOutcome::default());
        assert!(!engine.touch_end());
    }

    #[test]
    fn test_resize_across_breakpoint_switches_strategy() {
        let mut engine = desktop();
        engine.on_scroll(1000.0);
        assert!(engine.is_animating());

        assert!(engine.resize(400.0, 800.0));
        assert_eq!(engine.mode(), InputMode::Mobile);
        assert!(!engine.is_animating());
        assert_eq!(engine.smoothed_position(), engine.raw_position());
        assert_eq!(engine.layout().card_width, 340.0);
        assert!(engine.raw_position() <= engine.layout().total_distance);

        assert!(!engine.resize(400.0, 800.0));
    }

    #[test]
    fn test_step_month_moves_between_populated_months() {
        let mut engine = desktop();
        assert_eq!(engine.snapshot().active_month, Some(Month::January));
        let request = engine.step_month(true).unwrap();
        assert_eq!(request.offset, 2.0 / 4.0 * 3120.0);
        assert_eq!(engine.step_month(false), None);
    }
}
