//! Core data types shared by the dataset, the sync engine and the viewer.

mod month;
mod release;
mod snapshot;

pub use month::Month;
pub use release::ReleaseItem;
pub use snapshot::{ScrollBehavior, ScrollRequest, TimelineSnapshot};
