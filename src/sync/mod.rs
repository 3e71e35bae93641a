//! Scroll-to-index synchronisation engine.
//!
//! One scroll coordinate drives everything. On desktop it comes from the
//! page's vertical scroll and passes through a damped spring; on mobile,
//! horizontal swipes are converted into deltas on that same coordinate and
//! used as-is. The resolver maps the coordinate to a track offset, a
//! continuous progress and a discrete active index; navigation maps an index
//! back to a coordinate.

pub mod engine;
pub mod momentum;
pub mod navigation;
pub mod resolver;
pub mod source;
pub mod spring;

pub use engine::{FrameOutcome, InputMode, TimelineEngine, TouchOutcome};
pub use momentum::TouchMomentum;
pub use resolver::{resolve, target_scroll, Resolved};
pub use source::{MemoryScroll, ScrollSource};
pub use spring::SpringFilter;

/// Run state of a per-frame animation loop.
///
/// Each loop has exactly one owner; a loop in `Idle` never requests another frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Idle,
    Running,
}

impl LoopState {
    pub fn is_running(self) -> bool {
        self == LoopState::Running
    }
}
