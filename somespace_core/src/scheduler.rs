// Copyright 2026 the Somespace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cooperative per-frame task scheduling.
//!
//! The [`FrameScheduler`] is the one scheduling primitive animations depend
//! on: [`schedule`](FrameScheduler::schedule) registers a callback and
//! returns a [`CancelHandle`], and the host calls
//! [`tick`](FrameScheduler::tick) once per frame with the current
//! [`HostTime`]. Every live task runs synchronously inside `tick` and reports
//! whether it wants to keep running.
//!
//! # Re-entrancy
//!
//! No borrow of the scheduler is held while a callback runs, so callbacks may
//! freely schedule new tasks, cancel any task (including themselves), or read
//! [`now`](FrameScheduler::now). Tasks scheduled during a tick first run on
//! the *next* tick. A nested call to `tick` from inside a callback is ignored.
//!
//! # Usage
//!
//! ```rust,ignore
//! let scheduler = FrameScheduler::new(HostTime(0));
//! let handle = scheduler.schedule(|now| {
//!     // ... update state ...
//!     TaskStatus::Continue
//! });
//! scheduler.tick(HostTime(16_667));
//! handle.cancel();
//! ```
//!
//! The scheduler is `Rc`-shared and therefore `!Send`; the whole engine is
//! single-threaded.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use crate::time::HostTime;

/// What a task wants after running for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    /// Run again next tick.
    Continue,
    /// Retire the task.
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TaskState {
    Active,
    Cancelled,
    Finished,
}

/// Cancels a scheduled task.
///
/// Cancelling is idempotent: calling [`cancel`](Self::cancel) zero, one or
/// many times, before or after the task finished on its own, is always safe.
/// Once `cancel` returns, the task's callback will not run again.
#[derive(Clone)]
pub struct CancelHandle {
    state: Rc<Cell<TaskState>>,
}

impl CancelHandle {
    /// Stops the task. No-op if it already finished or was cancelled.
    pub fn cancel(&self) {
        if self.state.get() == TaskState::Active {
            self.state.set(TaskState::Cancelled);
        }
    }

    /// Returns `true` while the task is still scheduled.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.get() == TaskState::Active
    }

    /// Returns `true` if the task was cancelled before it finished.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.state.get() == TaskState::Cancelled
    }
}

impl fmt::Debug for CancelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CancelHandle").field(&self.state.get()).finish()
    }
}

/// Counts from one [`FrameScheduler::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Index of this tick, starting at 0.
    pub tick_index: u64,
    /// Callbacks invoked.
    pub ran: u32,
    /// Tasks that returned [`TaskStatus::Done`].
    pub finished: u32,
    /// Tasks dropped because they were cancelled.
    pub cancelled: u32,
    /// Tasks still scheduled after the tick, including ones added during it.
    pub live: u32,
}

type Callback = Box<dyn FnMut(HostTime) -> TaskStatus>;

struct Task {
    state: Rc<Cell<TaskState>>,
    callback: Callback,
}

struct Inner {
    now: HostTime,
    tasks: Vec<Task>,
    ticking: bool,
    tick_count: u64,
}

/// A shared, clonable handle to one frame task list.
///
/// Clones refer to the same scheduler.
#[derive(Clone)]
pub struct FrameScheduler {
    inner: Rc<RefCell<Inner>>,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new(HostTime(0))
    }
}

impl fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("FrameScheduler")
            .field("now", &inner.now)
            .field("tasks", &inner.tasks.len())
            .field("tick_count", &inner.tick_count)
            .finish()
    }
}

impl FrameScheduler {
    /// Creates an empty scheduler whose clock reads `start` until the first
    /// tick.
    #[must_use]
    pub fn new(start: HostTime) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                now: start,
                tasks: Vec::new(),
                ticking: false,
                tick_count: 0,
            })),
        }
    }

    /// Registers a per-tick callback.
    ///
    /// The callback first runs on the next call to [`tick`](Self::tick).
    pub fn schedule<F>(&self, callback: F) -> CancelHandle
    where
        F: FnMut(HostTime) -> TaskStatus + 'static,
    {
        let state = Rc::new(Cell::new(TaskState::Active));
        self.inner.borrow_mut().tasks.push(Task {
            state: state.clone(),
            callback: Box::new(callback),
        });
        CancelHandle { state }
    }

    /// Time of the most recent tick, or the start time before any tick.
    #[must_use]
    pub fn now(&self) -> HostTime {
        self.inner.borrow().now
    }

    /// Number of scheduled tasks that are still active.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .borrow()
            .tasks
            .iter()
            .filter(|t| t.state.get() == TaskState::Active)
            .count()
    }

    /// Returns `true` if no active task is scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cancels every scheduled task.
    pub fn cancel_all(&self) {
        for task in &self.inner.borrow().tasks {
            if task.state.get() == TaskState::Active {
                task.state.set(TaskState::Cancelled);
            }
        }
    }

    /// Runs every live task once with time `now`.
    ///
    /// Time never runs backwards: a `now` earlier than the previous tick is
    /// treated as the previous tick's time.
    pub fn tick(&self, now: HostTime) -> TickReport {
        let (mut tasks, now, tick_index) = {
            let mut inner = self.inner.borrow_mut();
            if inner.ticking {
                return TickReport {
                    tick_index: inner.tick_count,
                    ..TickReport::default()
                };
            }
            inner.ticking = true;
            inner.now = inner.now.max(now);
            let tick_index = inner.tick_count;
            inner.tick_count += 1;
            (core::mem::take(&mut inner.tasks), inner.now, tick_index)
        };

        let mut report = TickReport {
            tick_index,
            ..TickReport::default()
        };

        tasks.retain_mut(|task| {
            if task.state.get() != TaskState::Active {
                report.cancelled += 1;
                return false;
            }
            report.ran += 1;
            match (task.callback)(now) {
                TaskStatus::Continue => {
                    // The callback may have cancelled itself.
                    if task.state.get() == TaskState::Active {
                        true
                    } else {
                        report.cancelled += 1;
                        false
                    }
                }
                TaskStatus::Done => {
                    if task.state.get() == TaskState::Active {
                        task.state.set(TaskState::Finished);
                    }
                    report.finished += 1;
                    false
                }
            }
        });

        let mut inner = self.inner.borrow_mut();
        let added = core::mem::replace(&mut inner.tasks, tasks);
        inner.tasks.extend(added);
        inner.ticking = false;
        #[expect(
            clippy::cast_possible_truncation,
            reason = "task counts are far below u32::MAX"
        )]
        {
            report.live = inner.tasks.len() as u32;
        }
        report
    }
}
