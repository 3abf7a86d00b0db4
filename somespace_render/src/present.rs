// Copyright 2026 the Somespace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for putting finished frames on screen.
//!
//! Somespace splits platform-specific work into *backend* crates. Each
//! backend provides the following pieces:
//!
//! - **Tick source**: calls the host's frame callback with a
//!   [`HostTime`](somespace_core::time::HostTime) (e.g.
//!   `requestAnimationFrame`). Not abstracted by a trait because setup and
//!   lifecycle differ fundamentally across platforms.
//!
//! - **Time**: a `now() -> HostTime` free function and a
//!   [`Clock`](somespace_core::clock::Clock) implementation reading the
//!   platform's monotonic clock.
//!
//! - **Presenter**: implements [`Presenter`] to blit a finished [`Surface`]
//!   to a platform-native target (a canvas, a file, a test buffer).
//!
//! # Frame loop pseudocode
//!
//! A typical frame callback wires the pieces together like this:
//!
//! ```rust,ignore
//! fn on_frame(now: HostTime) {
//!     // Animate: run scheduled animations; their callbacks update the camera
//!     scheduler.tick(now);
//!
//!     // Render: paint the scene for the current camera
//!     render(&mut surface, &entities, &camera.get(), clear_radius, selected, &filters);
//!
//!     // Present: hand the pixels to the platform
//!     presenter.present(&surface)?;
//! }
//! ```

use alloc::format;
use alloc::vec::Vec;

use somespace_core::color::Color;

use crate::surface::Surface;

/// Hands a finished [`Surface`] to a presentation target.
///
/// Canvas-based and file-based presenters implement this trait, enabling
/// generic frame loops and test doubles.
pub trait Presenter {
    /// Error produced when the target rejects a frame.
    type Error;

    /// Presents `surface` as the next frame.
    fn present(&mut self, surface: &Surface) -> Result<(), Self::Error>;
}

/// Encodes `surface` as a binary PPM (`P6`) image.
///
/// PPM has no alpha channel, so pixels are flattened onto `backdrop`.
#[must_use]
pub fn encode_ppm(surface: &Surface, backdrop: Color) -> Vec<u8> {
    let header = format!("P6\n{} {}\n255\n", surface.width(), surface.height());
    let mut out = Vec::with_capacity(header.len() + surface.pixels().len() / 4 * 3);
    out.extend_from_slice(header.as_bytes());
    for px in surface.pixels().chunks_exact(4) {
        let a = u32::from(px[3]);
        for (&c, b) in px[..3].iter().zip([backdrop.r, backdrop.g, backdrop.b]) {
            let mixed = (u32::from(c) * a + u32::from(b) * (255 - a) + 127) / 255;
            out.push(u8::try_from(mixed).unwrap_or(u8::MAX));
        }
    }
    out
}
