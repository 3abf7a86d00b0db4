// Copyright 2026 the Somespace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-driven animations.
//!
//! Every animation here is two things at once:
//!
//! - a pure function of elapsed time, via the [`Animation`] trait, so hosts
//!   and tests can sample any instant directly;
//! - a scheduled task, via [`start`], that samples the animation on every
//!   [`FrameScheduler`] tick, hands the state to `on_update`, and calls
//!   `on_complete` exactly once when the duration has elapsed.
//!
//! The start time is the host time of the first tick after [`start`] is
//! called, so the first `on_update` always sees the initial state no matter
//! how long the scheduler sat idle beforehand. Progress is derived from
//! elapsed time only, never from frame counts.
//!
//! The four concrete animations are [`IntroZoom`], [`CameraPan`],
//! [`Flight`], and the [`ZoomOutFade`] / [`Blink`] pair. Each has a
//! convenience starter (`start_*`) that wraps [`start`].
//!
//! Nothing here prevents two camera-owning animations from running at once;
//! within a tick the later-scheduled task's update lands last.

mod fade;
mod flight;
mod intro;
mod pan;

pub use fade::{
    Blink, BlinkConfig, FadeConfig, ZoomOutFade, ZoomOutFadeState, start_blink, start_zoom_out_fade,
};
pub use flight::{Flight, FlightConfig, start_flight};
pub use intro::{
    IntroZoom, IntroZoomConfig, should_play_intro, start_intro_if_needed, start_intro_zoom,
};
pub use pan::{CameraPan, start_camera_pan};

use alloc::rc::Rc;
use core::cell::RefCell;

use kurbo::Point;

use crate::scheduler::{CancelHandle, FrameScheduler, TaskStatus};
use crate::time::{Duration, HostTime};

/// A finite animation expressed as a function of elapsed time.
pub trait Animation {
    /// Value produced at each instant.
    type State: Copy;

    /// Total run time. The state at `duration()` is the exact final state.
    fn duration(&self) -> Duration;

    /// State after `elapsed` time. Elapsed values past the duration return
    /// the final state.
    fn sample(&self, elapsed: Duration) -> Self::State;
}

/// Pose of a sprite driven by [`Flight`] or [`ZoomOutFade`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteState {
    /// Screen or world position, in whatever space the endpoints were given.
    pub position: Point,
    /// Heading in degrees, clockwise from the +x axis in y-down space.
    pub rotation: f64,
    /// Uniform scale.
    pub scale: f64,
}

impl Default for SpriteState {
    fn default() -> Self {
        Self {
            position: Point::ORIGIN,
            rotation: 0.0,
            scale: 1.0,
        }
    }
}

/// Opacity of a full-surface overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FadeState {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

/// Cancels a running animation.
///
/// After [`cancel`](Self::cancel) returns, neither `on_update` nor
/// `on_complete` will be called again. Cancelling a finished or already
/// cancelled animation does nothing.
#[derive(Clone, Debug)]
pub struct AnimationHandle {
    task: CancelHandle,
}

impl AnimationHandle {
    /// Stops the animation.
    pub fn cancel(&self) {
        self.task.cancel();
    }

    /// Returns `true` until the animation completes or is cancelled.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.task.is_active()
    }
}

/// Runs `animation` on `scheduler`.
///
/// `on_update` receives the sampled state on every tick, including the final
/// one. `on_complete` runs once, right after the final update.
pub fn start<A, U, C>(
    scheduler: &FrameScheduler,
    animation: A,
    mut on_update: U,
    on_complete: C,
) -> AnimationHandle
where
    A: Animation + 'static,
    U: FnMut(A::State) + 'static,
    C: FnOnce() + 'static,
{
    let duration = animation.duration();
    let mut started: Option<HostTime> = None;
    let mut on_complete = Some(on_complete);

    // The task needs to observe a cancel issued from inside `on_update`.
    let own: Rc<RefCell<Option<CancelHandle>>> = Rc::new(RefCell::new(None));
    let own_in_task = own.clone();

    let task = scheduler.schedule(move |now| {
        let start = *started.get_or_insert(now);
        let elapsed = now.saturating_duration_since(start);

        on_update(animation.sample(elapsed));

        let cancelled = own_in_task
            .borrow()
            .as_ref()
            .is_some_and(|h| !h.is_active());
        if cancelled {
            return TaskStatus::Continue;
        }
        if elapsed >= duration {
            if let Some(done) = on_complete.take() {
                done();
            }
            return TaskStatus::Done;
        }
        TaskStatus::Continue
    });
    *own.borrow_mut() = Some(task.clone());

    AnimationHandle { task }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Simulated-clock harness shared by the animation tests.

    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::{Cell, RefCell};

    use crate::clock::{Clock, ManualClock};
    use crate::scheduler::FrameScheduler;
    use crate::time::{Duration, HostTime};

    pub(crate) struct Harness {
        pub(crate) clock: ManualClock,
        pub(crate) scheduler: FrameScheduler,
    }

    impl Harness {
        pub(crate) fn new() -> Self {
            let start = HostTime(1_000_000);
            Self {
                clock: ManualClock::new(start),
                scheduler: FrameScheduler::new(start),
            }
        }

        /// Ticks at the current time, then advances by `step` `n` times.
        pub(crate) fn run(&self, step: Duration, n: usize) {
            self.scheduler.tick(self.clock.now());
            for _ in 0..n {
                self.step(step);
            }
        }

        pub(crate) fn step(&self, step: Duration) {
            self.scheduler.tick(self.clock.advance(step));
        }
    }

    /// Collects updates and counts completions.
    pub(crate) struct Recorder<S> {
        pub(crate) updates: Rc<RefCell<Vec<S>>>,
        pub(crate) completions: Rc<Cell<u32>>,
    }

    impl<S: Copy + 'static> Recorder<S> {
        pub(crate) fn new() -> Self {
            Self {
                updates: Rc::new(RefCell::new(Vec::new())),
                completions: Rc::new(Cell::new(0)),
            }
        }

        pub(crate) fn on_update(&self) -> impl FnMut(S) + 'static {
            let updates = self.updates.clone();
            move |s| updates.borrow_mut().push(s)
        }

        pub(crate) fn on_complete(&self) -> impl FnOnce() + 'static {
            let completions = self.completions.clone();
            move || completions.set(completions.get() + 1)
        }

        pub(crate) fn last(&self) -> Option<S> {
            self.updates.borrow().last().copied()
        }

        pub(crate) fn count(&self) -> usize {
            self.updates.borrow().len()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{Harness, Recorder};
    use super::*;

    /// Linear ramp from 0 to 1 over its duration.
    struct Ramp(Duration);

    impl Animation for Ramp {
        type State = f64;

        fn duration(&self) -> Duration {
            self.0
        }

        fn sample(&self, elapsed: Duration) -> f64 {
            self.0.progress(elapsed)
        }
    }

    #[test]
    fn first_update_is_initial_state() {
        let h = Harness::new();
        // Scheduler idled for a long time before the animation starts.
        h.clock.advance(Duration::from_millis(60_000));
        let rec = Recorder::new();
        let ramp = Ramp(Duration::from_millis(100));
        start(&h.scheduler, ramp, rec.on_update(), rec.on_complete());
        h.run(Duration::from_millis(10), 0);
        assert_eq!(rec.last(), Some(0.0));
    }

    #[test]
    fn completes_once_at_duration() {
        let h = Harness::new();
        let rec = Recorder::new();
        let handle = start(
            &h.scheduler,
            Ramp(Duration::from_millis(100)),
            rec.on_update(),
            rec.on_complete(),
        );
        h.run(Duration::from_millis(10), 9);
        assert_eq!(rec.completions.get(), 0);
        assert!(handle.is_active());

        h.step(Duration::from_millis(10));
        assert_eq!(rec.completions.get(), 1);
        assert_eq!(rec.last(), Some(1.0));
        assert!(!handle.is_active());

        h.run(Duration::from_millis(10), 5);
        assert_eq!(rec.completions.get(), 1);
        assert_eq!(rec.count(), 11);
    }

    #[test]
    fn long_frames_still_finish_exactly() {
        let h = Harness::new();
        let rec = Recorder::new();
        let ramp = Ramp(Duration::from_millis(100));
        start(&h.scheduler, ramp, rec.on_update(), rec.on_complete());
        h.run(Duration::from_millis(250), 1);
        assert_eq!(rec.count(), 2);
        assert_eq!(rec.last(), Some(1.0));
        assert_eq!(rec.completions.get(), 1);
    }

    #[test]
    fn cancel_stops_all_callbacks() {
        let h = Harness::new();
        let rec = Recorder::new();
        let handle = start(
            &h.scheduler,
            Ramp(Duration::from_millis(100)),
            rec.on_update(),
            rec.on_complete(),
        );
        h.run(Duration::from_millis(10), 3);
        let before = rec.count();
        handle.cancel();
        handle.cancel();
        h.run(Duration::from_millis(50), 10);
        assert_eq!(rec.count(), before);
        assert_eq!(rec.completions.get(), 0);
        assert!(!handle.is_active());
    }

    #[test]
    fn cancel_from_update_suppresses_completion() {
        let h = Harness::new();
        let completions = Recorder::<f64>::new();
        let slot: Rc<RefCell<Option<AnimationHandle>>> = Rc::new(RefCell::new(None));
        let slot_in = slot.clone();
        let handle = start(
            &h.scheduler,
            Ramp(Duration::ZERO),
            move |_| {
                if let Some(h) = slot_in.borrow().as_ref() {
                    h.cancel();
                }
            },
            completions.on_complete(),
        );
        *slot.borrow_mut() = Some(handle);
        h.run(Duration::from_millis(10), 2);
        assert_eq!(completions.completions.get(), 0);
    }

    #[test]
    fn zero_duration_completes_on_first_tick() {
        let h = Harness::new();
        let rec = Recorder::new();
        start(&h.scheduler, Ramp(Duration::ZERO), rec.on_update(), rec.on_complete());
        h.run(Duration::from_millis(10), 0);
        assert_eq!(rec.last(), Some(1.0));
        assert_eq!(rec.completions.get(), 1);
    }
}
