//! Damped spring that smooths raw wheel scrolling on desktop.
//!
//! The spring chases the raw scroll position. It only advances while it is
//! away from the target or still moving; once both distance and speed fall
//! under the rest thresholds it snaps to the target and goes idle, so no
//! further frames are requested.

use super::LoopState;
use crate::config::SpringConfig;

/// Longest frame the integrator will simulate (ms); longer gaps (background tabs) are cut.
const MAX_FRAME_MS: f64 = 100.0;
/// Integration substep (s). Small enough for stiff, heavily damped springs.
const SUBSTEP_S: f64 = 0.002;

#[derive(Debug, Clone)]
pub struct SpringFilter {
    config: SpringConfig,
    position: f64,
    /// px per second
    velocity: f64,
    target: f64,
    state: LoopState,
}

impl SpringFilter {
    /// A spring at rest at `position`.
    pub fn new(config: SpringConfig, position: f64) -> Self {
        Self {
            config,
            position,
            velocity: 0.0,
            target: position,
            state: LoopState::Idle,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Current velocity in px/ms.
    pub fn velocity(&self) -> f64 {
        self.velocity / 1000.0
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Move the target. Returns true when the spring needs frames to catch up.
    pub fn set_target(&mut self, target: f64) -> bool {
        self.target = target;
        if !self.is_at_rest() {
            self.state = LoopState::Running;
        }
        self.state.is_running()
    }

    /// Jump to `value` with no animation and stop.
    pub fn snap_to(&mut self, value: f64) {
        self.position = value;
        self.target = value;
        self.velocity = 0.0;
        self.state = LoopState::Idle;
    }

    /// Advance by `dt_ms`. Returns the state after the step.
    pub fn step(&mut self, dt_ms: f64) -> LoopState {
        if !self.state.is_running() {
            return self.state;
        }
        let dt_ms = if dt_ms.is_finite() {
            dt_ms.clamp(0.0, MAX_FRAME_MS)
        } else {
            0.0
        };
        let mut remaining = dt_ms / 1000.0;
        let SpringConfig {
            stiffness,
            damping,
            mass,
            ..
        } = self.config;
        // Semi-implicit Euler in fixed substeps.
        while remaining > 0.0 {
            let h = remaining.min(SUBSTEP_S);
            let displacement = self.position - self.target;
            let accel = (-stiffness * displacement - damping * self.velocity) / mass;
            self.velocity += accel * h;
            self.position += self.velocity * h;
            remaining -= h;
        }
        if self.is_at_rest() {
            self.snap_to(self.target);
            tracing::debug!(position = self.position, "spring settled");
        }
        self.state
    }

    fn is_at_rest(&self) -> bool {
        (self.position - self.target).abs() <= self.config.rest_delta
            && self.velocity().abs() <= self.config.rest_speed
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
    fn test_idle_spring_ignores_steps() {
        let mut spring = SpringFilter::new(SpringConfig::default(), 10.0);
        assert_eq!(spring.step(16.0), LoopState::Idle);
        assert_eq!(spring.position(), 10.0);
    }

    #[test]
    fn test_same_target_does_not_wake() {
        let mut spring = SpringFilter::new(SpringConfig::default(), 10.0);
        assert!(!spring.set_target(10.0));
    }

    #[test]
    fn test_lags_behind_target() {
        let mut spring = SpringFilter::new(SpringConfig::default(), 0.0);
        assert!(spring.set_target(500.0));
        spring.step(16.0);
        assert!(spring.position() > 0.0);
        assert!(spring.position() < 500.0);
    }

    #[test]
    fn test_snap_stops_loop() {
        let mut spring = SpringFilter::new(SpringConfig::default(), 0.0);
        spring.set_target(500.0);
        spring.snap_to(0.0);
        assert_eq!(spring.state(), LoopState::Idle);
        assert_eq!(spring.target(), 0.0);
        assert_eq!(spring.velocity(), 0.0);
    }
}
