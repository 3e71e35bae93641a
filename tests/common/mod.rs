//! Shared fixtures for the integration tests.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use tlview::dataset::Dataset;
use tlview::layout::Viewport;
use tlview::sync::TimelineEngine;
use tlview::types::ReleaseItem;

pub const DESKTOP: (f64, f64) = (1200.0, 800.0);
pub const MOBILE: (f64, f64) = (390.0, 844.0);

/// Release with a colour derived from its id.
pub fn item(id: &str, maker: &str, date: &str) -> ReleaseItem {
    ReleaseItem::new(id, id.to_uppercase(), maker, date, format!("color-{id}"))
}

/// Dataset from `(id, maker, date)` rows.
pub fn dataset(rows: &[(&str, &str, &str)]) -> Dataset {
    Dataset::from_items(
        rows.iter()
            .map(|(id, maker, date)| item(id, maker, date))
            .collect(),
    )
    .expect("fixture dataset is valid")
}

/// `n` releases spread over 2025, makers alternating between Alpha and Beta.
pub fn uniform(n: usize) -> Dataset {
    let items = (0..n)
        .map(|i| {
            let month = 1 + i * 12 / n.max(1);
            let day = 1 + i % 28;
            let maker = if i % 2 == 0 { "Alpha" } else { "Beta" };
            item(&format!("m{i}"), maker, &format!("2025-{month:02}-{day:02}"))
        })
        .collect();
    Dataset::from_items(items).expect("uniform dataset is valid")
}

pub fn desktop_engine(dataset: Dataset) -> TimelineEngine {
    TimelineEngine::new(dataset, Viewport::new(DESKTOP.0, DESKTOP.1))
}

pub fn mobile_engine(dataset: Dataset) -> TimelineEngine {
    TimelineEngine::new(dataset, Viewport::new(MOBILE.0, MOBILE.1))
}

/// Tick 16ms frames until idle; panics if the loop never ends.
pub fn run_frames(engine: &mut TimelineEngine) -> usize {
    for frame in 0..10_000 {
        if !engine.tick(16.0).needs_frame {
            return frame + 1;
        }
    }
    panic!("animation loop never went idle");
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
