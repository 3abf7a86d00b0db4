// Copyright 2026 the Somespace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clock sources.
//!
//! The [`FrameScheduler`](crate::scheduler::FrameScheduler) never reads a
//! clock on its own; hosts pass the current [`HostTime`] into each
//! [`tick`](crate::scheduler::FrameScheduler::tick). [`Clock`] exists so that
//! host loops can be written once and driven either by a platform clock
//! (e.g. `somespace_backend_web::WebClock`) or by a [`ManualClock`] that tests
//! and headless demos advance by hand.

use core::cell::Cell;

use crate::time::{Duration, HostTime};

/// A monotonic time source.
pub trait Clock {
    /// Returns the current host time.
    fn now(&self) -> HostTime;
}

/// A clock that only moves when told to.
///
/// Interior mutability lets a single `ManualClock` be shared by reference
/// between a frame loop and the code that advances it.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<HostTime>,
}

impl ManualClock {
    /// Creates a clock stopped at `start`.
    #[must_use]
    pub fn new(start: HostTime) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Moves the clock forward by `by` and returns the new time.
    pub fn advance(&self, by: Duration) -> HostTime {
        let next = self.now.get() + by;
        self.now.set(next);
        next
    }

    /// Jumps to `t`. Times earlier than the current time are ignored, so the
    /// clock stays monotonic.
    pub fn set(&self, t: HostTime) {
        if t > self.now.get() {
            self.now.set(t);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> HostTime {
        self.now.get()
    }
}
