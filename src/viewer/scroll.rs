//! Scroll-related logic for `TlView`.
//!
//! Includes the window-backed scroll source and the animation frame loop that
//! drives the spring and momentum integrators.

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use web_sys::{HtmlElement, ScrollToOptions, Window};

#[cfg(target_arch = "wasm32")]
use super::{SharedState, TlView};
#[cfg(target_arch = "wasm32")]
use crate::sync::ScrollSource;
#[cfg(target_arch = "wasm32")]
use crate::types::{ScrollBehavior, ScrollRequest};

/// Frame delta assumed for the first frame of a loop (ms).
#[cfg(target_arch = "wasm32")]
const FIRST_FRAME_MS: f64 = 16.0;

/// The page's vertical scroll, backed by the body height.
#[cfg(target_arch = "wasm32")]
pub(crate) struct WindowScroll {
    window: Window,
    body: HtmlElement,
}

#[cfg(target_arch = "wasm32")]
impl WindowScroll {
    pub(crate) fn new(window: Window, body: HtmlElement) -> Self {
        Self { window, body }
    }
}

#[cfg(target_arch = "wasm32")]
impl ScrollSource for WindowScroll {
    fn position(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn apply(&mut self, request: ScrollRequest) {
        let options = ScrollToOptions::new();
        options.set_top(request.offset);
        options.set_behavior(match request.behavior {
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn set_extent(&mut self, document_height: f64, _viewport_height: f64) {
        let _ = self
            .body
            .style()
            .set_property("height", &format!("{document_height}px"));
    }
}

#[cfg(target_arch = "wasm32")]
impl TlView {
    /// Request an animation frame unless one is already pending.
    pub(crate) fn schedule_frame(state: &Rc<RefCell<SharedState>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut s = state.borrow_mut();
        if s.destroyed || s.frame_id.is_some() {
            return;
        }
        if s.frame_closure.is_none() {
            let weak_state = Rc::downgrade(state);
            let closure = Closure::wrap(Box::new(move |timestamp: f64| {
                if let Some(state) = weak_state.upgrade() {
                    TlView::handle_frame(&state, timestamp);
                }
            }) as Box<dyn FnMut(f64)>);
            s.frame_closure = Some(closure);
        }
        let Some(callback) = s.frame_closure.as_ref() else {
            return;
        };
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(id) => s.frame_id = Some(id),
            Err(_) => s.frame_id = None,
        }
    }

    pub(crate) fn cancel_frame(s: &mut SharedState) {
        if let Some(id) = s.frame_id.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        s.last_frame_ms = None;
    }

    /// One tick of whichever loop the engine has running.
    pub(crate) fn handle_frame(state: &Rc<RefCell<SharedState>>, timestamp: f64) {
        {
            let mut s = state.borrow_mut();
            s.frame_id = None;
            let dt = s.last_frame_ms.map_or(FIRST_FRAME_MS, |last| timestamp - last);
            let outcome = s.engine.tick(dt);
            if let Some(request) = outcome.scroll_request {
                s.scroll.apply(request);
            }
            s.last_frame_ms = outcome.needs_frame.then_some(timestamp);
        }
        Self::after_update(state);
    }
}
