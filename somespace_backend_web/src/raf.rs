// Copyright 2026 the Somespace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser frame loop.
//!
//! The browser calls back once per display refresh with a
//! [`DOMHighResTimeStamp`][mdn] in milliseconds since page load. [`RafLoop`]
//! turns each callback into a [`FrameTickEvent`] (frame number, microsecond
//! [`HostTime`], gap since the previous callback) and hands it to the host,
//! usually after advancing a [`FrameScheduler`] so camera and sprite
//! animations are up to date before the frame is rendered.
//!
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/API/DOMHighResTimeStamp

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use somespace_core::scheduler::{FrameScheduler, TickReport};
use somespace_core::time::HostTime;
use somespace_core::trace::FrameTickEvent;

// Bound as globals so a frame never has to look up `window` or
// `window.performance` first.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> i32;

    #[wasm_bindgen(js_name = "cancelAnimationFrame")]
    fn cancel_animation_frame(id: i32);
}

/// Numbers frames and measures the gap between consecutive callbacks.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct TickSequencer {
    next_index: u64,
    last: Option<HostTime>,
}

impl TickSequencer {
    /// Builds the event for a callback at `now`.
    pub(crate) fn next(&mut self, now: HostTime) -> FrameTickEvent {
        let interval = self
            .last
            .replace(now)
            .map(|prev| now.saturating_duration_since(prev));
        let frame_index = self.next_index;
        self.next_index += 1;
        FrameTickEvent {
            frame_index,
            now,
            interval,
        }
    }

    /// Forgets the previous callback time so a paused loop does not report
    /// the pause as one long frame. Frame numbers keep counting.
    pub(crate) fn pause(&mut self) {
        self.last = None;
    }

    pub(crate) fn frames(&self) -> u64 {
        self.next_index
    }
}

/// Drives a host frame callback from `requestAnimationFrame`.
///
/// Build one with [`RafLoop::new`] for a bare tick stream, or with
/// [`RafLoop::driving`] to advance a [`FrameScheduler`] before each frame.
/// Nothing happens until [`start`](Self::start). Dropping the loop stops it.
pub struct RafLoop {
    state: Rc<LoopState>,
}

type FrameClosure = Closure<dyn FnMut(f64)>;

struct LoopState {
    /// Registered with the browser each frame. Kept apart from `on_tick` so
    /// the running closure can re-register itself.
    closure: RefCell<Option<FrameClosure>>,
    on_tick: RefCell<Box<dyn FnMut(FrameTickEvent)>>,
    sequencer: Cell<TickSequencer>,
    running: Cell<bool>,
    /// Handle of the pending request, for cancellation.
    pending: Cell<i32>,
}

impl LoopState {
    fn on_animation_frame(&self, timestamp_ms: f64) {
        if !self.running.get() {
            return;
        }
        let mut sequencer = self.sequencer.get();
        let tick = sequencer.next(HostTime::from_millis_f64(timestamp_ms));
        self.sequencer.set(sequencer);

        self.on_tick.borrow_mut()(tick);

        // The host may have stopped the loop from inside its callback.
        if self.running.get()
            && let Some(closure) = &*self.closure.borrow()
        {
            self.pending
                .set(request_animation_frame(closure.as_ref().unchecked_ref()));
        }
    }
}

impl RafLoop {
    /// Creates a stopped loop that passes every tick to `on_tick`.
    pub fn new(on_tick: impl FnMut(FrameTickEvent) + 'static) -> Self {
        Self {
            state: Rc::new(LoopState {
                closure: RefCell::new(None),
                on_tick: RefCell::new(Box::new(on_tick)),
                sequencer: Cell::new(TickSequencer::default()),
                running: Cell::new(false),
                pending: Cell::new(0),
            }),
        }
    }

    /// Creates a stopped loop that ticks `scheduler` and then calls `frame`.
    ///
    /// Animations started on `scheduler` advance once per display refresh;
    /// `frame` renders and presents with the state they left behind.
    pub fn driving(
        scheduler: FrameScheduler,
        mut frame: impl FnMut(&FrameTickEvent, &TickReport) + 'static,
    ) -> Self {
        Self::new(move |tick| {
            let report = scheduler.tick(tick.now);
            frame(&tick, &report);
        })
    }

    /// Requests the first frame. Does nothing if the loop is already running.
    pub fn start(&self) {
        if self.state.running.replace(true) {
            return;
        }
        let state = Rc::clone(&self.state);
        let closure = Closure::wrap(Box::new(move |timestamp_ms: f64| {
            state.on_animation_frame(timestamp_ms);
        }) as Box<dyn FnMut(f64)>);
        self.state
            .pending
            .set(request_animation_frame(closure.as_ref().unchecked_ref()));
        *self.state.closure.borrow_mut() = Some(closure);
    }

    /// Cancels the pending frame.
    ///
    /// The loop can be started again; its first tick after a restart has no
    /// interval.
    pub fn stop(&self) {
        if !self.state.running.replace(false) {
            return;
        }
        let mut sequencer = self.state.sequencer.get();
        sequencer.pause();
        self.state.sequencer.set(sequencer);
        cancel_animation_frame(self.state.pending.get());
    }

    /// Returns `true` between [`start`](Self::start) and [`stop`](Self::stop).
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state.running.get()
    }

    /// Number of ticks delivered so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.state.sequencer.get().frames()
    }
}

impl Drop for RafLoop {
    fn drop(&mut self) {
        self.stop();
        // The closure holds an `Rc` to the state; releasing it breaks the cycle.
        self.state.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for RafLoop {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RafLoop")
            .field("running", &self.state.running.get())
            .field("frames", &self.frames())
            .finish_non_exhaustive()
    }
}
