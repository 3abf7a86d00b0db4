// Copyright 2026 the Somespace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Idle-to-home intro zoom.

use super::{Animation, AnimationHandle, start};
use crate::camera::Camera;
use crate::easing::{ease_in_out_cubic, lerp};
use crate::scheduler::FrameScheduler;
use crate::time::Duration;

/// Timing of the intro zoom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntroZoomConfig {
    /// How long the start camera is held unchanged.
    pub pause: Duration,
    /// Length of the eased move from start to end.
    pub ease: Duration,
}

impl IntroZoomConfig {
    /// One second of stillness, then a two and a half second glide.
    pub const STANDARD: Self = Self {
        pause: Duration::from_millis(1000),
        ease: Duration::from_millis(2500),
    };

    /// Total run time, `pause + ease`.
    #[must_use]
    pub const fn total(&self) -> Duration {
        self.pause.saturating_add(self.ease)
    }
}

impl Default for IntroZoomConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Holds `from` for the pause, then eases every camera field toward `to`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntroZoom {
    /// Camera during the pause.
    pub from: Camera,
    /// Camera at the end.
    pub to: Camera,
    /// Timing.
    pub config: IntroZoomConfig,
}

impl Animation for IntroZoom {
    type State = Camera;

    fn duration(&self) -> Duration {
        self.config.total()
    }

    fn sample(&self, elapsed: Duration) -> Camera {
        if elapsed < self.config.pause {
            return self.from;
        }
        if elapsed >= self.duration() {
            return self.to;
        }
        let t = ease_in_out_cubic(self.config.ease.progress(elapsed - self.config.pause));
        Camera {
            x: lerp(self.from.x, self.to.x, t),
            y: lerp(self.from.y, self.to.y, t),
            zoom: lerp(self.from.zoom, self.to.zoom, t),
        }
    }
}

/// Starts an [`IntroZoom`] from `from` to `to`.
pub fn start_intro_zoom(
    scheduler: &FrameScheduler,
    from: Camera,
    to: Camera,
    config: IntroZoomConfig,
    on_update: impl FnMut(Camera) + 'static,
    on_complete: impl FnOnce() + 'static,
) -> AnimationHandle {
    start(scheduler, IntroZoom { from, to, config }, on_update, on_complete)
}

/// Whether a host should run the intro, given its own persisted flag.
///
/// The "already played" flag belongs to the host; the engine never stores it.
#[must_use]
pub const fn should_play_intro(already_played: bool) -> bool {
    !already_played
}

/// Starts the intro only when the host says it has not played yet.
///
/// Returns `None`, with no callbacks ever invoked, when it already played.
pub fn start_intro_if_needed(
    already_played: bool,
    scheduler: &FrameScheduler,
    from: Camera,
    to: Camera,
    config: IntroZoomConfig,
    on_update: impl FnMut(Camera) + 'static,
    on_complete: impl FnOnce() + 'static,
) -> Option<AnimationHandle> {
    should_play_intro(already_played)
        .then(|| start_intro_zoom(scheduler, from, to, config, on_update, on_complete))
}
