//! The scroll signal source seam.
//!
//! The engine never moves the page itself; it emits [`ScrollRequest`]s and a
//! source carries them out. In the browser the source is the window (see
//! `viewer`); natively it is [`MemoryScroll`].

use crate::types::{ScrollBehavior, ScrollRequest};

/// Something that owns a vertical scroll position.
pub trait ScrollSource {
    /// Current scroll offset (px).
    fn position(&self) -> f64;

    /// Move to the requested offset.
    fn apply(&mut self, request: ScrollRequest);

    /// Resize the scrollable document so its scroll range is
    /// `document_height - viewport_height`.
    fn set_extent(&mut self, document_height: f64, viewport_height: f64);
}

/// In-memory scroll source for tests and the CLI. Smooth requests land instantly.
#[derive(Debug, Clone, Default)]
pub struct MemoryScroll {
    position: f64,
    max_scroll: f64,
    last_behavior: Option<ScrollBehavior>,
}

impl MemoryScroll {
    pub fn new() -> Self {
        Self::default()
    }

    /// Largest reachable offset.
    pub fn max_scroll(&self) -> f64 {
        self.max_scroll
    }

    /// Behavior of the most recent request, if any.
    pub fn last_behavior(&self) -> Option<ScrollBehavior> {
        self.last_behavior
    }

    /// Simulate a user scroll to `offset`.
    pub fn scroll_to(&mut self, offset: f64) -> f64 {
        self.position = clamp_offset(offset, self.max_scroll);
        self.position
    }
}

impl ScrollSource for MemoryScroll {
    fn position(&self) -> f64 {
        self.position
    }

    fn apply(&mut self, request: ScrollRequest) {
        self.last_behavior = Some(request.behavior);
        self.scroll_to(request.offset);
    }

    fn set_extent(&mut self, document_height: f64, viewport_height: f64) {
        self.max_scroll = (document_height - viewport_height).max(0.0);
        self.position = clamp_offset(self.position, self.max_scroll);
    }
}

/// Clamp to `[0, max]`, mapping NaN to 0.
pub(crate) fn clamp_offset(offset: f64, max: f64) -> f64 {
    if offset.is_finite() {
        offset.clamp(0.0, max.max(0.0))
    } else {
        0.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_scroll_clamps_to_extent() {
        let mut source = MemoryScroll::new();
        source.set_extent(3920.0, 800.0);
        assert_eq!(source.max_scroll(), 3120.0);
        assert_eq!(source.scroll_to(5000.0), 3120.0);
        source.set_extent(800.0, 800.0);
        assert_eq!(source.position(), 0.0);
    }

    #[test]
    fn test_apply_records_behavior() {
        let mut source = MemoryScroll::new();
        source.set_extent(2000.0, 1000.0);
        source.apply(ScrollRequest::smooth(250.0));
        assert_eq!(source.position(), 250.0);
        assert_eq!(source.last_behavior(), Some(ScrollBehavior::Smooth));
    }
}
