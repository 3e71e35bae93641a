//! Window scroll, resize and touch handlers for `TlView`.
//!
//! All methods here are `pub(crate)` helpers called from the listeners that
//! `mod.rs` registers, plus the listener bookkeeping used for teardown.

#[cfg(target_arch = "wasm32")]
use js_sys::Function;
#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use web_sys::{AddEventListenerOptions, Event, EventTarget, TouchEvent};

#[cfg(target_arch = "wasm32")]
use super::{SharedState, TlView};
#[cfg(target_arch = "wasm32")]
use crate::sync::ScrollSource;
#[cfg(target_arch = "wasm32")]
use crate::types::TimelineSnapshot;

/// A registered DOM listener, removed again on teardown.
#[cfg(target_arch = "wasm32")]
pub(crate) struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

#[cfg(target_arch = "wasm32")]
impl Listener {
    /// Attach `handler` to `target`. Passive listeners cannot call `preventDefault`.
    pub(crate) fn attach(
        target: &EventTarget,
        event: &'static str,
        passive: bool,
        handler: impl FnMut(Event) + 'static,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event,
                closure.as_ref().unchecked_ref(),
                &options,
            )
            .ok()?;
        Some(Self {
            target: target.clone(),
            event,
            closure,
        })
    }

    pub(crate) fn detach(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// First touch point of a touch event, in client coordinates.
#[cfg(target_arch = "wasm32")]
fn first_touch(event: &TouchEvent) -> Option<(f64, f64)> {
    let touch = event.touches().get(0)?;
    Some((f64::from(touch.client_x()), f64::from(touch.client_y())))
}

#[cfg(target_arch = "wasm32")]
fn window_size() -> Option<(f64, f64)> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some((width, height))
}

#[cfg(target_arch = "wasm32")]
impl TlView {
    pub(crate) fn internal_scroll(state: &Rc<RefCell<SharedState>>) {
        {
            let mut s = state.borrow_mut();
            let position = s.scroll.position();
            s.engine.on_scroll(position);
        }
        Self::after_update(state);
    }

    pub(crate) fn internal_resize(state: &Rc<RefCell<SharedState>>) {
        let Some((width, height)) = window_size() else {
            return;
        };
        {
            let mut s = state.borrow_mut();
            if !s.engine.resize(width, height) {
                return;
            }
            Self::apply_layout(&mut s);
        }
        Self::after_update(state);
    }

    pub(crate) fn internal_touch_start(state: &Rc<RefCell<SharedState>>, event: &Event) {
        let Some(touch_event) = event.dyn_ref::<TouchEvent>() else {
            return;
        };
        let Some((x, y)) = first_touch(touch_event) else {
            return;
        };
        let mut s = state.borrow_mut();
        s.engine.touch_start(x, y, event.time_stamp());
    }

    pub(crate) fn internal_touch_move(state: &Rc<RefCell<SharedState>>, event: &Event) {
        let Some(touch_event) = event.dyn_ref::<TouchEvent>() else {
            return;
        };
        let Some((x, y)) = first_touch(touch_event) else {
            return;
        };
        {
            let mut s = state.borrow_mut();
            let outcome = s.engine.touch_move(x, y, event.time_stamp());
            if outcome.prevent_default {
                event.prevent_default();
            }
            let Some(request) = outcome.scroll_request else {
                return;
            };
            s.scroll.apply(request);
        }
        Self::after_update(state);
    }

    pub(crate) fn internal_touch_end(state: &Rc<RefCell<SharedState>>) {
        let coasting = state.borrow_mut().engine.touch_end();
        if coasting {
            Self::schedule_frame(state);
        }
    }

    pub(crate) fn internal_touch_cancel(state: &Rc<RefCell<SharedState>>) {
        state.borrow_mut().engine.touch_cancel();
    }

    /// Body height and CSS custom properties for the current layout.
    pub(crate) fn apply_layout(s: &mut SharedState) {
        let document_height = s.engine.document_height();
        let viewport_height = s.engine.viewport().height;
        s.scroll.set_extent(document_height, viewport_height);
        if let Some(root) = s.root.as_ref() {
            let style = root.style();
            for (name, value) in s.engine.layout().css_variables() {
                let _ = style.set_property(name, &value);
            }
        }
    }

    /// Push the current projection to the track and the render callback, and
    /// keep the frame loop alive while the engine is animating.
    pub(crate) fn after_update(state: &Rc<RefCell<SharedState>>) {
        let (callback, snapshot, animating) = {
            let s = state.borrow();
            let snapshot = s.engine.snapshot();
            if let Some(track) = s.track.as_ref() {
                let _ = track.style().set_property(
                    "transform",
                    &format!("translate3d({}px, 0, 0)", snapshot.x_offset),
                );
            }
            (s.render_callback.clone(), snapshot, s.engine.is_animating())
        };
        if animating {
            Self::schedule_frame(state);
        }
        Self::invoke_render_callback(callback, &snapshot);
    }

    /// Called with no borrow held, so the callback may call back into the viewer.
    pub(crate) fn invoke_render_callback(callback: Option<Function>, snapshot: &TimelineSnapshot) {
        let Some(callback) = callback else {
            return;
        };
        match crate::to_js(snapshot) {
            Ok(value) => {
                let _ = callback.call1(&JsValue::NULL, &value);
            }
            Err(e) => tracing::warn!(error = ?e, "snapshot serialization failed"),
        }
    }
}
