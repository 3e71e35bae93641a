//! Main TlView struct - the primary entry point for the timeline viewer.
//!
//! This module provides the WASM-exported `TlView` struct that handles:
//! - Loading the release dataset and the viewer options
//! - Wiring window scroll, resize and touch events into the sync engine
//! - Running the single animation frame loop (spring or momentum)
//! - Translating the card track and notifying JavaScript with a snapshot
//!
//! Event listeners are registered when the viewer is created and removed by
//! `destroy()` (or when the viewer is dropped).

mod events;
mod scroll;

#[cfg(target_arch = "wasm32")]
use js_sys::Function;
#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use web_sys::{EventTarget, HtmlElement};

#[cfg(target_arch = "wasm32")]
use events::Listener;
#[cfg(target_arch = "wasm32")]
use scroll::WindowScroll;

use crate::config::TimelineConfig;
#[cfg(target_arch = "wasm32")]
use crate::to_js;
use crate::dataset::{Dataset, Release};
use crate::error::Result;
#[cfg(target_arch = "wasm32")]
use crate::error::TlviewError;
#[cfg(not(target_arch = "wasm32"))]
use crate::layout::TrackLayout;
use crate::layout::Viewport;
use crate::navigator::{self, MonthBucket};
use crate::sync::TimelineEngine;
#[cfg(not(target_arch = "wasm32"))]
use crate::sync::{MemoryScroll, ScrollSource};
#[cfg(not(target_arch = "wasm32"))]
use crate::types::{ScrollRequest, TimelineSnapshot};

/// Frame length used when replaying animation loops natively (ms).
#[cfg(not(target_arch = "wasm32"))]
pub const FRAME_MS: f64 = 16.0;

/// Upper bound on frames `settle` will run before giving up.
#[cfg(not(target_arch = "wasm32"))]
const MAX_SETTLE_FRAMES: usize = 10_000;

/// Shared state that can be accessed by event handlers (wasm32 only)
#[cfg(target_arch = "wasm32")]
pub(crate) struct SharedState {
    pub(crate) engine: TimelineEngine,
    pub(crate) scroll: WindowScroll,
    /// Element translated horizontally by the resolved offset.
    pub(crate) track: Option<HtmlElement>,
    /// Receives the layout CSS custom properties.
    pub(crate) root: Option<HtmlElement>,
    pub(crate) render_callback: Option<Function>,
    pub(crate) frame_id: Option<i32>,
    pub(crate) frame_closure: Option<Closure<dyn FnMut(f64)>>,
    pub(crate) last_frame_ms: Option<f64>,
    /// Set by `destroy`; no frame is scheduled afterwards.
    pub(crate) destroyed: bool,
}

/// The main viewer struct exported to JavaScript
#[wasm_bindgen]
pub struct TlView {
    #[cfg(target_arch = "wasm32")]
    state: Rc<RefCell<SharedState>>,
    #[cfg(target_arch = "wasm32")]
    listeners: RefCell<Vec<Listener>>,

    // Non-wasm32 fields
    #[cfg(not(target_arch = "wasm32"))]
    engine: TimelineEngine,
    #[cfg(not(target_arch = "wasm32"))]
    scroll: MemoryScroll,
}

// Read-only projections shared by both targets.
impl TlView {
    fn build_engine(
        dataset_json: Option<&str>,
        config: TimelineConfig,
        viewport: Viewport,
    ) -> Result<TimelineEngine> {
        let dataset = match dataset_json {
            Some(json) => Dataset::from_json(json)?,
            None => Dataset::bundled()?,
        };
        TimelineEngine::with_config(dataset, viewport, config)
    }

    fn engine_month_buckets(engine: &TimelineEngine) -> Vec<MonthBucket> {
        navigator::month_buckets(engine.view(), &engine.snapshot())
    }

    fn engine_header_label(engine: &TimelineEngine) -> String {
        navigator::header_label(&engine.snapshot())
    }

    fn engine_filtered_items(engine: &TimelineEngine) -> Vec<Release> {
        engine.view().iter().cloned().collect()
    }
}

// ============================================================================
// WASM32 Implementation
// ============================================================================

#[cfg(target_arch = "wasm32")]
fn dom_error(what: &str) -> JsValue {
    TlviewError::Dom(format!("{what} is unavailable")).into()
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl TlView {
    /// Create a new viewer bound to `track`, the element holding the cards.
    ///
    /// `dataset_json` defaults to the bundled 2025 dataset; `options` is a
    /// partial `TimelineConfig` object (or `undefined`).
    #[wasm_bindgen(constructor)]
    pub fn new(
        track: HtmlElement,
        dataset_json: Option<String>,
        options: JsValue,
    ) -> std::result::Result<TlView, JsValue> {
        console_error_panic_hook::set_once();

        let config: TimelineConfig = if options.is_undefined() || options.is_null() {
            TimelineConfig::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| TlviewError::Config(e.to_string()))?
        };

        let window = web_sys::window().ok_or_else(|| dom_error("window"))?;
        let document = window.document().ok_or_else(|| dom_error("document"))?;
        let body = document.body().ok_or_else(|| dom_error("document.body"))?;
        let root: Option<HtmlElement> = document
            .document_element()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok());

        let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let engine = Self::build_engine(dataset_json.as_deref(), config, Viewport::new(width, height))?;

        let state = Rc::new(RefCell::new(SharedState {
            engine,
            scroll: WindowScroll::new(window.clone(), body),
            track: Some(track),
            root,
            render_callback: None,
            frame_id: None,
            frame_closure: None,
            last_frame_ms: None,
            destroyed: false,
        }));

        // Size the document before the scroll listener can observe it.
        Self::apply_layout(&mut state.borrow_mut());

        let window_target: &EventTarget = window.as_ref();
        let mut listeners: Vec<Listener> = Vec::new();
        {
            let state = state.clone();
            listeners.extend(Listener::attach(window_target, "scroll", true, move |_| {
                Self::internal_scroll(&state);
            }));
        }
        {
            let state = state.clone();
            listeners.extend(Listener::attach(window_target, "resize", true, move |_| {
                Self::internal_resize(&state);
            }));
        }
        {
            let state = state.clone();
            listeners.extend(Listener::attach(window_target, "touchstart", true, move |event| {
                Self::internal_touch_start(&state, &event);
            }));
        }
        {
            // Non-passive: horizontal swipes suppress native scrolling.
            let state = state.clone();
            listeners.extend(Listener::attach(window_target, "touchmove", false, move |event| {
                Self::internal_touch_move(&state, &event);
            }));
        }
        {
            let state = state.clone();
            listeners.extend(Listener::attach(window_target, "touchend", true, move |_| {
                Self::internal_touch_end(&state);
            }));
        }
        {
            let state = state.clone();
            listeners.extend(Listener::attach(window_target, "touchcancel", true, move |_| {
                Self::internal_touch_cancel(&state);
            }));
        }
        tracing::debug!(listeners = listeners.len(), "timeline viewer attached");

        Self::internal_scroll(&state);

        Ok(TlView {
            state,
            listeners: RefCell::new(listeners),
        })
    }

    /// Current projection: offset, active index/colour/month, progress, intro flag.
    #[wasm_bindgen]
    pub fn snapshot(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(&self.state.borrow().engine.snapshot())
    }

    /// Smooth-scroll to the first release of `month`. Returns false when nothing moved.
    #[wasm_bindgen]
    pub fn jump_to_month(&self, month: &str) -> bool {
        let request = {
            let mut s = self.state.borrow_mut();
            let request = s.engine.jump_to_month(month);
            if let Some(request) = request {
                s.scroll.apply(request);
            }
            request
        };
        Self::after_update(&self.state);
        request.is_some()
    }

    /// Smooth-scroll to the release with this id.
    #[wasm_bindgen]
    pub fn jump_to_model(&self, id: &str) -> bool {
        let request = {
            let mut s = self.state.borrow_mut();
            let request = s.engine.jump_to_model(id);
            if let Some(request) = request {
                s.scroll.apply(request);
            }
            request
        };
        Self::after_update(&self.state);
        request.is_some()
    }

    /// Mobile navigator arrows.
    #[wasm_bindgen]
    pub fn step_month(&self, forward: bool) -> bool {
        let request = {
            let mut s = self.state.borrow_mut();
            let request = s.engine.step_month(forward);
            if let Some(request) = request {
                s.scroll.apply(request);
            }
            request
        };
        Self::after_update(&self.state);
        request.is_some()
    }

    /// Switch the maker filter (`"All"` for everything). Scroll resets to the top.
    #[wasm_bindgen]
    pub fn set_filter(&self, maker: &str) {
        {
            let mut s = self.state.borrow_mut();
            let request = s.engine.set_filter(maker);
            Self::cancel_frame(&mut s);
            Self::apply_layout(&mut s);
            s.scroll.apply(request);
        }
        Self::after_update(&self.state);
    }

    /// Filter options, `"All"` included.
    #[wasm_bindgen]
    pub fn makers(&self) -> Vec<String> {
        self.state.borrow().engine.makers()
    }

    #[wasm_bindgen]
    pub fn filter(&self) -> String {
        self.state.borrow().engine.filter().selector().to_string()
    }

    #[wasm_bindgen]
    pub fn month_buckets(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(&Self::engine_month_buckets(&self.state.borrow().engine))
    }

    #[wasm_bindgen]
    pub fn month_markers(&self) -> Vec<u8> {
        navigator::month_markers(self.state.borrow().engine.view())
            .into_iter()
            .map(u8::from)
            .collect()
    }

    #[wasm_bindgen]
    pub fn header_label(&self) -> String {
        Self::engine_header_label(&self.state.borrow().engine)
    }

    /// Layout parameters for the current viewport and filter.
    #[wasm_bindgen]
    pub fn layout(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(self.state.borrow().engine.layout())
    }

    /// The releases in the current filtered view, in track order.
    #[wasm_bindgen]
    pub fn filtered_items(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(&Self::engine_filtered_items(&self.state.borrow().engine))
    }

    #[wasm_bindgen]
    pub fn is_mobile(&self) -> bool {
        self.state.borrow().engine.mode().is_mobile()
    }

    /// Register a JS callback invoked with a snapshot after every update.
    ///
    /// The callback runs with no borrow held, so it may call any method,
    /// `destroy` and `set_render_callback` included.
    #[wasm_bindgen]
    pub fn set_render_callback(&self, callback: Option<Function>) {
        self.state.borrow_mut().render_callback = callback;
        Self::after_update(&self.state);
    }

    /// Remove every listener and stop the frame loop.
    #[wasm_bindgen]
    pub fn destroy(&self) {
        for listener in self.listeners.borrow_mut().drain(..) {
            listener.detach();
        }
        let mut s = self.state.borrow_mut();
        Self::cancel_frame(&mut s);
        s.frame_closure = None;
        s.render_callback = None;
        s.destroyed = true;
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for TlView {
    fn drop(&mut self) {
        self.destroy();
    }
}

// ============================================================================
// Non-WASM32 Implementation (for testing/CLI)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
impl TlView {
    /// Create a new viewer (non-wasm version for testing) over an in-memory scroll source.
    pub fn new_test(width: f64, height: f64, dataset: Dataset) -> Self {
        let engine = TimelineEngine::new(dataset, Viewport::new(width, height));
        Self::from_engine(engine)
    }

    /// Like `new_test`, with options and an optional dataset JSON (bundled when `None`).
    pub fn with_options(
        width: f64,
        height: f64,
        dataset_json: Option<&str>,
        config: TimelineConfig,
    ) -> Result<Self> {
        let engine = Self::build_engine(dataset_json, config, Viewport::new(width, height))?;
        Ok(Self::from_engine(engine))
    }

    fn from_engine(engine: TimelineEngine) -> Self {
        let mut scroll = MemoryScroll::new();
        scroll.set_extent(engine.document_height(), engine.viewport().height);
        TlView { engine, scroll }
    }

    pub fn engine(&self) -> &TimelineEngine {
        &self.engine
    }

    /// Position of the in-memory scroll source.
    pub fn scroll_position(&self) -> f64 {
        self.scroll.position()
    }

    /// Report the source's position back to the engine, as a scroll event would.
    fn feed_scroll(&mut self) {
        self.engine.on_scroll(self.scroll.position());
    }

    /// Simulate a wheel or scrollbar move to `offset`.
    pub fn scroll_to(&mut self, offset: f64) {
        self.scroll.scroll_to(offset);
        self.feed_scroll();
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.scroll_to(self.scroll.position() + delta);
    }

    /// Run one animation frame. Returns true when another frame is needed.
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        let outcome = self.engine.tick(dt_ms);
        if let Some(request) = outcome.scroll_request {
            self.scroll.apply(request);
            self.feed_scroll();
        }
        outcome.needs_frame
    }

    /// Run frames until the engine is idle. Returns the number of frames run.
    pub fn settle(&mut self) -> usize {
        let mut frames = 0;
        while self.engine.is_animating() && frames < MAX_SETTLE_FRAMES {
            self.tick(FRAME_MS);
            frames += 1;
        }
        frames
    }

    pub fn touch_start(&mut self, x: f64, y: f64, time_ms: f64) {
        self.engine.touch_start(x, y, time_ms);
    }

    /// Returns true when the gesture suppressed native scrolling.
    pub fn touch_move(&mut self, x: f64, y: f64, time_ms: f64) -> bool {
        let outcome = self.engine.touch_move(x, y, time_ms);
        if let Some(request) = outcome.scroll_request {
            self.scroll.apply(request);
            self.feed_scroll();
        }
        outcome.prevent_default
    }

    /// Returns true when momentum started.
    pub fn touch_end(&mut self) -> bool {
        self.engine.touch_end()
    }

    pub fn touch_cancel(&mut self) {
        self.engine.touch_cancel();
    }

    pub fn jump_to_month(&mut self, month: &str) -> bool {
        let request = self.engine.jump_to_month(month);
        self.apply_request(request)
    }

    pub fn jump_to_model(&mut self, id: &str) -> bool {
        let request = self.engine.jump_to_model(id);
        self.apply_request(request)
    }

    pub fn step_month(&mut self, forward: bool) -> bool {
        let request = self.engine.step_month(forward);
        self.apply_request(request)
    }

    fn apply_request(&mut self, request: Option<ScrollRequest>) -> bool {
        let Some(request) = request else {
            return false;
        };
        self.scroll.apply(request);
        self.feed_scroll();
        true
    }

    pub fn set_filter(&mut self, maker: &str) {
        let request = self.engine.set_filter(maker);
        self.scroll
            .set_extent(self.engine.document_height(), self.engine.viewport().height);
        self.scroll.apply(request);
        self.feed_scroll();
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        if self.engine.resize(width, height) {
            self.scroll
                .set_extent(self.engine.document_height(), self.engine.viewport().height);
            self.feed_scroll();
        }
    }

    pub fn snapshot(&self) -> TimelineSnapshot {
        self.engine.snapshot()
    }

    pub fn makers(&self) -> Vec<String> {
        self.engine.makers()
    }

    pub fn month_buckets(&self) -> Vec<MonthBucket> {
        Self::engine_month_buckets(&self.engine)
    }

    pub fn month_markers(&self) -> Vec<bool> {
        navigator::month_markers(self.engine.view())
    }

    pub fn header_label(&self) -> String {
        Self::engine_header_label(&self.engine)
    }

    pub fn layout(&self) -> TrackLayout {
        *self.engine.layout()
    }

    pub fn filtered_items(&self) -> Vec<Release> {
        Self::engine_filtered_items(&self.engine)
    }
}
