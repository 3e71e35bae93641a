//! tlview - year-in-review timeline viewer for the web
//!
//! Drives a horizontal track of release cards from a single scroll coordinate
//! via WebAssembly:
//! - Vertical page scroll (desktop, spring-smoothed) or horizontal swipes
//!   (mobile, with momentum) feed one coordinate
//! - The coordinate resolves to a track offset, a progress and an active card
//! - Month and model navigation jump back through the inverse mapping
//! - Maker filtering recomputes the layout and resets the scroll
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { TlView } from 'tlview';
//! await init();
//! const viewer = new TlView(document.getElementById('track'), undefined, undefined);
//! viewer.set_render_callback((snapshot) => draw(snapshot));
//! viewer.jump_to_month('March');
//! ```

pub mod config;
pub mod dataset;
pub mod date;
pub mod error;
pub mod layout;
pub mod navigator;
pub mod sync;
pub mod types;
pub mod viewer;

use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export the main viewer struct
pub use viewer::TlView;

pub use config::TimelineConfig;
pub use dataset::{Dataset, FilteredView, MakerFilter};
pub use error::{Result, TlviewError};
pub use layout::{TrackLayout, Viewport};
pub use sync::TimelineEngine;
pub use types::*;

/// Parse a dataset JSON array and return the validated releases
///
/// # Errors
/// Returns an error if the JSON is malformed, an id is duplicated, or a
/// record has an empty `id` or `maker`.
#[wasm_bindgen]
pub fn parse_dataset(json: &str) -> std::result::Result<JsValue, JsValue> {
    let dataset = Dataset::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(dataset.releases())
}

/// Layout parameters for a viewport width and item count, using default options
#[wasm_bindgen]
pub fn compute_layout(
    viewport_width: f64,
    viewport_height: f64,
    item_count: usize,
) -> std::result::Result<JsValue, JsValue> {
    let config = TimelineConfig::default();
    let viewport = Viewport::new(viewport_width, viewport_height);
    let layout = TrackLayout::for_viewport(&viewport, item_count, &config.layout);
    to_js(&layout)
}

/// Serialize for JavaScript with maps as plain objects.
///
/// Releases carry their extra fields through `#[serde(flatten)]`, which
/// serializes as a map; the default serializer would hand JS an ES `Map`.
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> std::result::Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Crate version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
