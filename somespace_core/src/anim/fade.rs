// Copyright 2026 the Somespace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene-change pair: zoom out while fading an overlay in, then blink it out.
//!
//! The two halves are separate animations. A host typically swaps the scene
//! content in `ZoomOutFade`'s completion callback and only then starts the
//! [`Blink`] that reveals it.

use super::{Animation, AnimationHandle, FadeState, start};
use crate::easing::{ease_in_out_cubic, lerp};
use crate::scheduler::FrameScheduler;
use crate::time::Duration;

/// Timing of [`ZoomOutFade`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FadeConfig {
    /// Time to shrink the sprite and raise the overlay.
    pub shrink: Duration,
    /// Time the final state is held before completion.
    pub hold: Duration,
}

impl FadeConfig {
    /// 900 ms out, 250 ms hold.
    pub const STANDARD: Self = Self {
        shrink: Duration::from_millis(900),
        hold: Duration::from_millis(250),
    };
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Timing of [`Blink`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlinkConfig {
    /// Time to drop the overlay from opaque to clear.
    pub duration: Duration,
}

impl BlinkConfig {
    /// A 120 ms blink.
    pub const STANDARD: Self = Self {
        duration: Duration::from_millis(120),
    };
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// What [`ZoomOutFade`] drives on every tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomOutFadeState {
    /// Sprite scale, 1 → 0.
    pub scale: f64,
    /// Overlay, 0 → 1.
    pub overlay: FadeState,
}

/// Shrinks a sprite to nothing while an overlay fades in, then holds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ZoomOutFade {
    /// Timing.
    pub config: FadeConfig,
}

impl Animation for ZoomOutFade {
    type State = ZoomOutFadeState;

    fn duration(&self) -> Duration {
        self.config.shrink.saturating_add(self.config.hold)
    }

    fn sample(&self, elapsed: Duration) -> ZoomOutFadeState {
        let t = ease_in_out_cubic(self.config.shrink.progress(elapsed));
        ZoomOutFadeState {
            scale: lerp(1.0, 0.0, t),
            overlay: FadeState {
                opacity: lerp(0.0, 1.0, t),
            },
        }
    }
}

/// Drops an overlay from opaque to clear.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Blink {
    /// Timing.
    pub config: BlinkConfig,
}

impl Animation for Blink {
    type State = FadeState;

    fn duration(&self) -> Duration {
        self.config.duration
    }

    fn sample(&self, elapsed: Duration) -> FadeState {
        let t = ease_in_out_cubic(self.config.duration.progress(elapsed));
        FadeState {
            opacity: lerp(1.0, 0.0, t),
        }
    }
}

/// Starts a [`ZoomOutFade`].
pub fn start_zoom_out_fade(
    scheduler: &FrameScheduler,
    config: FadeConfig,
    on_update: impl FnMut(ZoomOutFadeState) + 'static,
    on_complete: impl FnOnce() + 'static,
) -> AnimationHandle {
    start(scheduler, ZoomOutFade { config }, on_update, on_complete)
}

/// Starts a [`Blink`].
pub fn start_blink(
    scheduler: &FrameScheduler,
    config: BlinkConfig,
    on_update: impl FnMut(FadeState) + 'static,
    on_complete: impl FnOnce() + 'static,
) -> AnimationHandle {
    start(scheduler, Blink { config }, on_update, on_complete)
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use core::cell::Cell;

    use super::super::testing::{Harness, Recorder};
    use super::*;

    #[test]
    fn fade_reaches_exact_final_state_then_holds() {
        let anim = ZoomOutFade::default();
        let start = anim.sample(Duration::ZERO);
        assert_eq!(start.scale, 1.0);
        assert_eq!(start.overlay.opacity, 0.0);

        let done = anim.sample(Duration::from_millis(900));
        assert_eq!(done.scale, 0.0);
        assert_eq!(done.overlay.opacity, 1.0);
        assert_eq!(anim.sample(Duration::from_millis(1100)), done);
        assert_eq!(anim.duration(), Duration::from_millis(1150));
    }

    #[test]
    fn blink_is_short_and_ends_clear() {
        let anim = Blink::default();
        assert_eq!(anim.sample(Duration::ZERO).opacity, 1.0);
        assert_eq!(anim.sample(Duration::from_millis(120)).opacity, 0.0);
        assert!(anim.duration() < ZoomOutFade::default().duration());
    }

    #[test]
    fn fade_completes_after_hold() {
        let h = Harness::new();
        let rec = Recorder::new();
        let config = FadeConfig::STANDARD;
        start_zoom_out_fade(&h.scheduler, config, rec.on_update(), rec.on_complete());
        h.run(Duration::from_millis(100), 11);
        assert_eq!(rec.completions.get(), 0, "still holding at 1100 ms");
        h.step(Duration::from_millis(50));
        assert_eq!(rec.completions.get(), 1);
        let last = rec.last().map(|s| (s.scale, s.overlay.opacity));
        assert_eq!(last, Some((0.0, 1.0)));
    }

    #[test]
    fn blink_chained_from_fade_completion() {
        let h = Harness::new();
        let overlay = Rc::new(Cell::new(0.0));
        let blink_done = Rc::new(Cell::new(false));

        let scheduler = h.scheduler.clone();
        let (o1, o2, done) = (overlay.clone(), overlay.clone(), blink_done.clone());
        start_zoom_out_fade(
            &h.scheduler,
            FadeConfig::STANDARD,
            move |s| o1.set(s.overlay.opacity),
            move || {
                start_blink(
                    &scheduler,
                    BlinkConfig::STANDARD,
                    move |f| o2.set(f.opacity),
                    move || done.set(true),
                );
            },
        );

        h.run(Duration::from_millis(50), 23);
        assert_eq!(overlay.get(), 1.0, "fade finished at 1150 ms");
        assert!(!blink_done.get());

        // The blink starts on the next tick and runs 120 ms from there.
        h.run(Duration::from_millis(40), 3);
        assert!(blink_done.get());
        assert_eq!(overlay.get(), 0.0);
    }
}
