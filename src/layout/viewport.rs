//! Viewport state: the window size the track layout is derived from.

use crate::config::LayoutConfig;

/// Viewport state - the visible area the card track is centred in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Viewport width in CSS pixels
    pub width: f64,
    /// Viewport height in CSS pixels
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1000.0, 800.0)
    }
}

impl Viewport {
    /// Create a viewport, clamping negative or non-finite sizes to zero.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    /// True below the mobile breakpoint.
    pub fn is_mobile(&self, config: &LayoutConfig) -> bool {
        self.width < config.mobile_breakpoint
    }

    /// Resize the viewport. Returns true when the size actually changed.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        let next = Self::new(width, height);
        let changed = (next.width - self.width).abs() > f64::EPSILON
            || (next.height - self.height).abs() > f64::EPSILON;
        *self = next;
        changed
    }
}

fn sanitize(v: f64) -> f64 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_is_exclusive() {
        let config = LayoutConfig::default();
        assert!(Viewport::new(767.0, 600.0).is_mobile(&config));
        assert!(!Viewport::new(768.0, 600.0).is_mobile(&config));
    }

    #[test]
    fn test_resize_reports_change() {
        let mut viewport = Viewport::new(1200.0, 800.0);
        assert!(!viewport.resize(1200.0, 800.0));
        assert!(viewport.resize(390.0, 844.0));
        assert_eq!(viewport.width, 390.0);
    }

    #[test]
    fn test_invalid_sizes_clamp_to_zero() {
        let viewport = Viewport::new(f64::NAN, -5.0);
        assert_eq!(viewport.width, 0.0);
        assert_eq!(viewport.height, 0.0);
    }
}
