//! Tunable constants for the timeline.
//!
//! Every number the scroll math depends on lives here, and the same values
//! are exported to the stylesheet as CSS custom properties (see
//! [`TrackLayout::css_variables`](crate::layout::TrackLayout::css_variables)),
//! so the card track and the scroll math cannot drift apart.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TlviewError};

/// Card sizing and the mobile/desktop breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Viewports narrower than this (CSS px) use the mobile layout and input strategy.
    pub mobile_breakpoint: f64,
    /// Fixed card width on desktop (px).
    pub desktop_card_width: f64,
    /// Card width on mobile as a fraction of viewport width.
    pub mobile_card_ratio: f64,
    /// Inter-card gap on desktop as a fraction of viewport width (15vw).
    pub desktop_gap_ratio: f64,
    /// Inter-card gap on mobile as a fraction of viewport width (5vw).
    pub mobile_gap_ratio: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: 768.0,
            desktop_card_width: 600.0,
            mobile_card_ratio: 0.85,
            desktop_gap_ratio: 0.15,
            mobile_gap_ratio: 0.05,
        }
    }
}

/// Damped spring applied to wheel scrolling on desktop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    /// Settled once within this distance of the target (px)...
    pub rest_delta: f64,
    /// ...and slower than this (px/ms).
    pub rest_speed: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 200.0,
            damping: 30.0,
            mass: 0.2,
            rest_delta: 0.01,
            rest_speed: 0.01,
        }
    }
}

impl SpringConfig {
    /// `damping / (2 * sqrt(stiffness * mass))`; below 1.0 the spring overshoots.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

/// Swipe-to-scroll injection and post-gesture inertia on mobile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MomentumConfig {
    /// Horizontal finger travel is multiplied by this before it moves the scroll coordinate.
    pub swipe_multiplier: f64,
    /// Each coasting frame advances by `velocity * frame_ms`.
    pub frame_ms: f64,
    /// Velocity is multiplied by this after every coasting frame.
    pub friction: f64,
    /// Release velocity (px/ms) needed to start coasting.
    pub min_velocity: f64,
    /// Coasting stops once velocity (px/ms) falls below this.
    pub stop_velocity: f64,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            swipe_multiplier: 2.0,
            frame_ms: 16.0,
            friction: 0.95,
            min_velocity: 0.1,
            stop_velocity: 0.01,
        }
    }
}

/// Complete option set accepted by [`TlView`](crate::TlView) and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimelineConfig {
    pub layout: LayoutConfig,
    pub spring: SpringConfig,
    pub momentum: MomentumConfig,
    /// Raw scroll (px) past which the intro banner gives way to the month label.
    pub intro_threshold: f64,
    /// Accent colour when the filtered view is empty.
    pub fallback_color: String,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            spring: SpringConfig::default(),
            momentum: MomentumConfig::default(),
            intro_threshold: 50.0,
            fallback_color: "#00f3ff".to_string(),
        }
    }
}

fn require_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TlviewError::Config(format!(
            "{name} must be a positive number, got {value}"
        )))
    }
}

fn require_ratio(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(TlviewError::Config(format!(
            "{name} must be within [0, 1], got {value}"
        )))
    }
}

impl TimelineConfig {
    /// Parse options from JSON; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the scroll math produce NaN or never settle.
    pub fn validate(&self) -> Result<()> {
        let l = &self.layout;
        require_positive("layout.mobileBreakpoint", l.mobile_breakpoint)?;
        require_positive("layout.desktopCardWidth", l.desktop_card_width)?;
        require_positive("layout.mobileCardRatio", l.mobile_card_ratio)?;
        require_ratio("layout.mobileCardRatio", l.mobile_card_ratio)?;
        require_ratio("layout.desktopGapRatio", l.desktop_gap_ratio)?;
        require_ratio("layout.mobileGapRatio", l.mobile_gap_ratio)?;

        let s = &self.spring;
        require_positive("spring.stiffness", s.stiffness)?;
        require_positive("spring.mass", s.mass)?;
        require_positive("spring.restDelta", s.rest_delta)?;
        require_positive("spring.restSpeed", s.rest_speed)?;
        if !s.damping.is_finite() || s.damping < 0.0 {
            return Err(TlviewError::Config(format!(
                "spring.damping must be non-negative, got {}",
                s.damping
            )));
        }

        let m = &self.momentum;
        require_positive("momentum.swipeMultiplier", m.swipe_multiplier)?;
        require_positive("momentum.frameMs", m.frame_ms)?;
        require_positive("momentum.minVelocity", m.min_velocity)?;
        require_positive("momentum.stopVelocity", m.stop_velocity)?;
        if !m.friction.is_finite() || m.friction <= 0.0 || m.friction >= 1.0 {
            return Err(TlviewError::Config(format!(
                "momentum.friction must be within (0, 1), got {}",
                m.friction
            )));
        }
        if m.stop_velocity >= m.min_velocity {
            return Err(TlviewError::Config(format!(
                "momentum.stopVelocity ({}) must be below momentum.minVelocity ({})",
                m.stop_velocity, m.min_velocity
            )));
        }

        if !self.intro_threshold.is_finite() || self.intro_threshold < 0.0 {
            return Err(TlviewError::Config(format!(
                "introThreshold must be non-negative, got {}",
                self.intro_threshold
            )));
        }
        Ok(())
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

    #[test]
    fn test_defaults_are_valid() {
        TimelineConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            TimelineConfig::from_json(r#"{"momentum": {"friction": 0.9}, "introThreshold": 80}"#)
                .unwrap();
        assert_eq!(config.momentum.friction, 0.9);
        assert_eq!(config.momentum.swipe_multiplier, 2.0);
        assert_eq!(config.intro_threshold, 80.0);
        assert_eq!(config.layout.desktop_card_width, 600.0);
    }

    #[test]
    fn test_friction_must_be_below_one() {
        let err = TimelineConfig::from_json(r#"{"momentum": {"friction": 1.0}}"#).unwrap_err();
        assert!(matches!(err, TlviewError::Config(_)));
    }

    #[test]
    fn test_stop_velocity_must_be_below_launch_velocity() {
        let mut config = TimelineConfig::default();
        config.momentum.stop_velocity = 0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_spring_is_overdamped() {
        assert!(SpringConfig::default().damping_ratio() > 1.0);
    }
}
