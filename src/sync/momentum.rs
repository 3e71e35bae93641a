//! Touch momentum injector (mobile).
//!
//! Converts horizontal swipes into deltas on the single scroll coordinate and
//! keeps the coordinate coasting after the finger lifts. A new touch always
//! cancels a coasting loop, so at most one loop is ever active.

use super::LoopState;
use crate::config::MomentumConfig;

/// Lower bound for the time between two touch samples (ms).
const MIN_SAMPLE_MS: f64 = 1.0;

#[derive(Debug, Clone, Copy)]
struct Gesture {
    start_x: f64,
    start_y: f64,
    last_x: f64,
    last_time_ms: f64,
}

#[derive(Debug, Clone)]
pub struct TouchMomentum {
    config: MomentumConfig,
    gesture: Option<Gesture>,
    /// Finger velocity in px/ms; positive means the timeline moves forward.
    velocity: f64,
    state: LoopState,
}

impl TouchMomentum {
    pub fn new(config: MomentumConfig) -> Self {
        Self {
            config,
            gesture: None,
            velocity: 0.0,
            state: LoopState::Idle,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn is_tracking(&self) -> bool {
        self.gesture.is_some()
    }

    /// Finger down: cancel any coasting and start a new gesture.
    pub fn touch_start(&mut self, x: f64, y: f64, time_ms: f64) {
        self.state = LoopState::Idle;
        self.velocity = 0.0;
        self.gesture = Some(Gesture {
            start_x: x,
            start_y: y,
            last_x: x,
            last_time_ms: time_ms,
        });
    }

    /// Finger moved. Returns the scroll delta to apply right away when the
    /// gesture is predominantly horizontal; the caller must then suppress
    /// native scrolling for this event.
    ///
    /// Moving the finger left (decreasing `x`) advances the timeline.
    pub fn touch_move(&mut self, x: f64, y: f64, time_ms: f64) -> Option<f64> {
        let gesture = self.gesture.as_mut()?;
        let delta = gesture.last_x - x;
        let elapsed = (time_ms - gesture.last_time_ms).max(MIN_SAMPLE_MS);
        let horizontal = (x - gesture.start_x).abs() > (y - gesture.start_y).abs();
        gesture.last_x = x;
        gesture.last_time_ms = time_ms;

        if !horizontal {
            self.velocity = 0.0;
            return None;
        }
        self.velocity = delta / elapsed;
        Some(delta * self.config.swipe_multiplier)
    }

    /// Finger lifted. Returns true when coasting started.
    pub fn touch_end(&mut self) -> bool {
        if self.gesture.take().is_none() {
            return false;
        }
        if self.velocity.abs() > self.config.min_velocity {
            self.state = LoopState::Running;
            tracing::debug!(velocity = self.velocity, "momentum started");
        } else {
            self.velocity = 0.0;
        }
        self.state.is_running()
    }

    /// Gesture interrupted by the browser: drop it without coasting.
    pub fn touch_cancel(&mut self) {
        self.gesture = None;
        self.halt();
    }

    /// One coasting frame: the delta to apply, or `None` when idle.
    pub fn step(&mut self) -> Option<f64> {
        if !self.state.is_running() {
            return None;
        }
        let delta = self.velocity * self.config.frame_ms;
        self.velocity *= self.config.friction;
        if self.velocity.abs() < self.config.stop_velocity {
            self.halt();
        }
        Some(delta)
    }

    /// Stop coasting immediately (range boundary reached, navigation jump).
    pub fn halt(&mut self) {
        if self.state.is_running() {
            tracing::debug!("momentum stopped");
        }
        self.state = LoopState::Idle;
        self.velocity = 0.0;
    }
}

/// Upper bound on coasting frames for a release velocity `v0`:
/// `ceil(ln(stop / |v0|) / ln(friction))`, 0 when `v0` would not launch.
pub fn max_coast_frames(v0: f64, config: &MomentumConfig) -> u32 {
    let v0 = v0.abs();
    if v0.is_nan() || v0 <= config.min_velocity {
        return 0;
    }
    let frames = ((config.stop_velocity / v0).ln() / config.friction.ln()).ceil();
    if frames.is_finite() && frames > 0.0 {
        f64_to_u32(frames)
    } else {
        0
    }
}

/// Saturating f64→u32; the value is already a non-negative whole number.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn f64_to_u32(v: f64) -> u32 {
    v.min(f64::from(u32::MAX)) as u32
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
    fn test_move_without_start_is_ignored() {
        let mut m = TouchMomentum::new(MomentumConfig::default());
        assert_eq!(m.touch_move(10.0, 0.0, 16.0), None);
        assert!(!m.touch_end());
    }

    #[test]
    fn test_horizontal_swipe_is_doubled() {
        let mut m = TouchMomentum::new(MomentumConfig::default());
        m.touch_start(300.0, 400.0, 0.0);
        assert_eq!(m.touch_move(290.0, 402.0, 10.0), Some(20.0));
        assert_eq!(m.velocity(), 1.0);
    }

    #[test]
    fn test_vertical_swipe_is_left_to_the_browser() {
        let mut m = TouchMomentum::new(MomentumConfig::default());
        m.touch_start(300.0, 400.0, 0.0);
        assert_eq!(m.touch_move(298.0, 380.0, 10.0), None);
        assert!(!m.touch_end());
        assert_eq!(m.state(), LoopState::Idle);
    }

    #[test]
    fn test_slow_release_does_not_coast() {
        let mut m = TouchMomentum::new(MomentumConfig::default());
        m.touch_start(300.0, 400.0, 0.0);
        m.touch_move(299.0, 400.0, 100.0);
        assert!(!m.touch_end());
        assert_eq!(m.step(), None);
    }

    #[test]
    fn test_new_touch_cancels_coasting() {
        let mut m = TouchMomentum::new(MomentumConfig::default());
        m.touch_start(300.0, 400.0, 0.0);
        m.touch_move(250.0, 400.0, 16.0);
        assert!(m.touch_end());
        assert!(m.step().is_some());
        m.touch_start(100.0, 400.0, 200.0);
        assert_eq!(m.state(), LoopState::Idle);
        assert_eq!(m.step(), None);
    }

    #[test]
    fn test_zero_elapsed_does_not_divide_by_zero() {
        let mut m = TouchMomentum::new(MomentumConfig::default());
        m.touch_start(300.0, 400.0, 5.0);
        assert_eq!(m.touch_move(290.0, 400.0, 5.0), Some(20.0));
        assert!(m.velocity().is_finite());
    }
}
