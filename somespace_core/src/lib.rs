// Copyright 2026 the Somespace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout, camera, styling and animation for a 2D plane of entities.
//!
//! `somespace_core` holds everything about a somespace scene that is not
//! pixels: where entities go, how the camera maps world space to the screen,
//! what an entity's care rating looks like, which entity a click lands on,
//! and how the camera and sprites move over time. It is `no_std` compatible
//! (with `alloc`) and keeps no scene state between calls: entities and the
//! camera are plain values the host owns and passes in.
//!
//! # Architecture
//!
//! ```text
//!   entity count ──► lattice::distribute() ──► positions ──► Entity list
//!                                                               │
//!   input events ──► camera::pan() / zoom() ──► Camera ─────────┤
//!                    hit::hit_test() ◄──────────────────────────┤
//!                                                               ▼
//!   host frame callback ──► FrameScheduler::tick() ──► anim::* ──► Camera / sprite updates
//!                                                               │
//!                                                               ▼
//!                                              somespace_render::render()
//! ```
//!
//! **[`lattice`]**: Deterministic hexagonal ring layout and the derived
//! background clear radius.
//!
//! **[`camera`]**: Camera value type, world ↔ screen projection, drag pan
//! and clamped wheel zoom.
//!
//! **[`entity`]** / **[`style`]**: Entities, the closed [`Care`](entity::Care)
//! scale, and the care → [`VisualStyle`](style::VisualStyle) resolver.
//!
//! **[`color`]**: RGBA colors, hex parsing, and the filter-color blender.
//!
//! **[`hit`]**: Reverse-order hit testing.
//!
//! **[`scheduler`]**: [`FrameScheduler`](scheduler::FrameScheduler), the
//! `schedule(callback) → cancel handle` primitive animations run on.
//!
//! **[`anim`]**: Intro zoom, camera pan, curved flight, and the zoom-out
//! fade / blink pair, all sampled from elapsed time.
//!
//! **[`time`]** / **[`clock`]** / **[`easing`]**: Microsecond host time, the
//! [`Clock`](clock::Clock) trait with a hand-driven
//! [`ManualClock`](clock::ManualClock), and the shared cubic ease.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! frame-loop instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

pub mod anim;
pub mod camera;
pub mod clock;
pub mod color;
pub mod easing;
pub mod entity;
pub mod hit;
pub mod lattice;
pub mod scheduler;
pub mod style;
pub mod time;
pub mod trace;

pub use kurbo;
