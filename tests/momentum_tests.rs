//! Touch momentum tests
//!
//! Swipe injection, the horizontal-dominance gate and the bounded coasting
//! loop.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{mobile_engine, run_frames, uniform};
use test_case::test_case;
use tlview::config::MomentumConfig;
use tlview::sync::momentum::max_coast_frames;
use tlview::sync::{LoopState, TouchMomentum};

fn released_at(velocity_px_per_ms: f64) -> TouchMomentum {
    let mut momentum = TouchMomentum::new(MomentumConfig::default());
    momentum.touch_start(500.0, 300.0, 0.0);
    momentum.touch_move(500.0 - velocity_px_per_ms * 100.0, 300.0, 100.0);
    momentum.touch_end();
    momentum
}

#[test]
fn test_swipe_delta_is_doubled() {
    let mut momentum = TouchMomentum::new(MomentumConfig::default());
    momentum.touch_start(300.0, 300.0, 0.0);
    assert_eq!(momentum.touch_move(280.0, 302.0, 16.0), Some(40.0));
    assert_eq!(momentum.touch_move(290.0, 303.0, 32.0), Some(-20.0));
}

#[test]
fn test_vertical_gesture_is_left_to_the_browser() {
    let mut momentum = TouchMomentum::new(MomentumConfig::default());
    momentum.touch_start(300.0, 300.0, 0.0);
    assert_eq!(momentum.touch_move(290.0, 200.0, 16.0), None);
    assert!(!momentum.touch_end());
}

#[test]
fn test_move_without_start_is_ignored() {
    let mut momentum = TouchMomentum::new(MomentumConfig::default());
    assert_eq!(momentum.touch_move(100.0, 100.0, 16.0), None);
    assert!(!momentum.touch_end());
}

#[test]
fn test_slow_release_does_not_coast() {
    let momentum = released_at(0.05);
    assert_eq!(momentum.state(), LoopState::Idle);
}

#[test_case(0.5)]
#[test_case(1.0)]
#[test_case(4.0)]
#[test_case(-2.0 ; "backwards")]
fn test_coasting_is_bounded(v0: f64) {
    let config = MomentumConfig::default();
    let mut momentum = released_at(v0);
    assert_eq!(momentum.state(), LoopState::Running);

    let mut frames = 0;
    let mut travelled = 0.0;
    while let Some(delta) = momentum.step() {
        frames += 1;
        travelled += delta;
        assert!(frames <= max_coast_frames(v0, &config));
    }
    assert!(frames > 0);
    assert_eq!(momentum.state(), LoopState::Idle);
    // Geometric series bound: v0 * frame_ms / (1 - friction).
    assert!(travelled.abs() <= v0.abs() * config.frame_ms / (1.0 - config.friction) + 1e-9);
    assert_eq!(travelled.signum(), v0.signum());
}

#[test]
fn test_max_coast_frames_for_default_release() {
    let config = MomentumConfig::default();
    assert_eq!(max_coast_frames(1.0, &config), 90);
    assert_eq!(max_coast_frames(0.05, &config), 0);
    assert_eq!(max_coast_frames(f64::NAN, &config), 0);
}

#[test]
fn test_new_touch_cancels_coasting() {
    let mut momentum = released_at(2.0);
    momentum.step();
    momentum.touch_start(100.0, 100.0, 500.0);
    assert_eq!(momentum.state(), LoopState::Idle);
    assert_eq!(momentum.step(), None);
}

#[test]
fn test_touch_cancel_drops_gesture() {
    let mut momentum = TouchMomentum::new(MomentumConfig::default());
    momentum.touch_start(300.0, 300.0, 0.0);
    momentum.touch_move(100.0, 300.0, 50.0);
    momentum.touch_cancel();
    assert!(!momentum.is_tracking());
    assert!(!momentum.touch_end());
}

#[test]
fn test_engine_momentum_stops_at_range_end() {
    let mut engine = mobile_engine(uniform(2));
    let distance = engine.layout().total_distance;
    engine.touch_start(300.0, 400.0, 0.0);
    engine.touch_move(250.0, 400.0, 10.0);
    assert!(engine.touch_end());

    let frames = run_frames(&mut engine);
    assert!(frames < 90);
    assert_eq!(engine.raw_position(), distance);
    assert!(!engine.is_animating());
}
