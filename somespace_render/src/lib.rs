// Copyright 2026 the Somespace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Software renderer for somespace scenes.
//!
//! This crate turns a list of [`Entity`](somespace_core::entity::Entity)
//! values plus a [`Camera`](somespace_core::camera::Camera) into RGBA pixels.
//! It has no windowing or GPU dependency: backends blit the finished
//! [`Surface`] to whatever they present on. It provides:
//!
//! - [`Surface`]: RGBA8 pixel buffer with source-over blending
//! - [`render`] / [`render_with`]: one frame of background, texture and entities
//! - [`DrawPlan`]: the projected, culled, dispatched entities of a frame
//! - [`texture`]: the clear-radius background texture (noise or gradient)
//! - [`raster`]: disc, star, glyph, glow and halo rasterizers
//! - [`overlay_anchors`]: screen points for host-drawn content overlays
//! - [`Presenter`]: the backend seam that puts a finished surface on screen

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod noise;
mod plan;
mod present;
pub mod raster;
mod scene;
mod surface;
pub mod texture;

pub use noise::ValueNoise;
pub use plan::{DrawItem, DrawPlan, Glyph};
pub use present::{Presenter, encode_ppm};
pub use scene::{
    RenderConfig, RenderStats, Scene, overlay_anchors, render, render_into, render_with,
};
pub use surface::Surface;
pub use texture::{TextureConfig, TextureStrategy};
