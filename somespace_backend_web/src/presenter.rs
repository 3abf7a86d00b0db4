// Copyright 2026 the Somespace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canvas presentation.
//!
//! Blits a finished [`Surface`] into a `<canvas>` through `ImageData` and
//! `putImageData`. The canvas backing store is resized to match the surface,
//! so one surface pixel is one canvas pixel.

use kurbo::{Point, Size};
use somespace_render::{Presenter, Surface};
use wasm_bindgen::{Clamped, JsCast as _, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

/// Presents surfaces on an `HtmlCanvasElement` with a 2D context.
pub struct CanvasPresenter {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl core::fmt::Debug for CanvasPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CanvasPresenter")
            .field("width", &self.canvas.width())
            .field("height", &self.canvas.height())
            .finish_non_exhaustive()
    }
}

impl CanvasPresenter {
    /// Creates a presenter for `canvas`.
    ///
    /// Fails if the canvas cannot provide a 2D context (for example because
    /// it already has a WebGL one).
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, context })
    }

    /// Returns the canvas element.
    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Canvas size in device pixels, as a render viewport.
    #[must_use]
    pub fn viewport(&self) -> Size {
        Size::new(f64::from(self.canvas.width()), f64::from(self.canvas.height()))
    }

    /// Converts a pointer event's client coordinates into canvas pixels,
    /// accounting for CSS scaling of the element.
    ///
    /// The result can go straight into `hit_test` or a pan delta.
    #[must_use]
    pub fn client_to_canvas(&self, client_x: f64, client_y: f64) -> Point {
        let rect = self.canvas.get_bounding_client_rect();
        let sx = scale(f64::from(self.canvas.width()), rect.width());
        let sy = scale(f64::from(self.canvas.height()), rect.height());
        Point::new((client_x - rect.left()) * sx, (client_y - rect.top()) * sy)
    }
}

fn scale(pixels: f64, css: f64) -> f64 {
    if css > 0.0 { pixels / css } else { 1.0 }
}

impl Presenter for CanvasPresenter {
    type Error = JsValue;

    fn present(&mut self, surface: &Surface) -> Result<(), JsValue> {
        if surface.width() == 0 || surface.height() == 0 {
            return Ok(());
        }
        if self.canvas.width() != surface.width() {
            self.canvas.set_width(surface.width());
        }
        if self.canvas.height() != surface.height() {
            self.canvas.set_height(surface.height());
        }
        let image = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(surface.pixels()),
            surface.width(),
            surface.height(),
        )?;
        self.context.put_image_data(&image, 0.0, 0.0)
    }
}
