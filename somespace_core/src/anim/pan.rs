// Copyright 2026 the Somespace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Eased camera pan toward a world-space point.

use kurbo::Point;

use super::{Animation, AnimationHandle, start};
use crate::camera::Camera;
use crate::easing::{ease_in_out_cubic, lerp};
use crate::scheduler::FrameScheduler;
use crate::time::Duration;

/// Eases the camera's look-at point toward `target`. Zoom is left alone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPan {
    /// Camera when the pan starts.
    pub from: Camera,
    /// World-space point to center on.
    pub target: Point,
    /// Length of the move.
    pub duration: Duration,
}

impl Animation for CameraPan {
    type State = Camera;

    fn duration(&self) -> Duration {
        self.duration
    }

    fn sample(&self, elapsed: Duration) -> Camera {
        let t = ease_in_out_cubic(self.duration.progress(elapsed));
        Camera {
            x: lerp(self.from.x, self.target.x, t),
            y: lerp(self.from.y, self.target.y, t),
            zoom: self.from.zoom,
        }
    }
}

/// Starts a [`CameraPan`].
pub fn start_camera_pan(
    scheduler: &FrameScheduler,
    from: Camera,
    target: Point,
    duration: Duration,
    on_update: impl FnMut(Camera) + 'static,
    on_complete: impl FnOnce() + 'static,
) -> AnimationHandle {
    let pan = CameraPan {
        from,
        target,
        duration,
    };
    start(scheduler, pan, on_update, on_complete)
}
