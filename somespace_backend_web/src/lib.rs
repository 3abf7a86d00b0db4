// Copyright 2026 the Somespace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for somespace.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`RafLoop`]: `requestAnimationFrame` tick source that can drive a
//!   [`FrameScheduler`](somespace_core::scheduler::FrameScheduler)
//! - [`CanvasPresenter`]: blits rendered surfaces into a `<canvas>`
//! - [`now`] / [`WebClock`]: `performance.now()` as [`HostTime`]

#![no_std]

extern crate alloc;

mod presenter;
mod raf;

pub use presenter::CanvasPresenter;
pub use raf::RafLoop;
pub use somespace_render::Presenter;

use somespace_core::clock::Clock;
use somespace_core::time::HostTime;

/// Returns the current host time from `performance.now()`.
#[must_use]
pub fn now() -> HostTime {
    HostTime::from_millis_f64(raf::performance_now())
}

/// [`Clock`] backed by `performance.now()`.
///
/// Shares its epoch with `requestAnimationFrame` timestamps, so times from
/// either source can be mixed in one scheduler.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebClock;

impl Clock for WebClock {
    fn now(&self) -> HostTime {
        now()
    }
}
