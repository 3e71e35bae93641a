//! Layout engine for the horizontal card track.
//!
//! This module handles:
//! - Viewport size and the mobile/desktop breakpoint
//! - Card width, gap and centring offset
//! - Total scroll distance and the document height that backs it

mod track_layout;
mod viewport;

pub use track_layout::TrackLayout;
pub use viewport::Viewport;
