//! Crop engine WASM bindings.
//!
//! This module provides a JavaScript handle on an interactive crop session.
//! The host feeds gesture deltas from its pointer handlers and draws the
//! preview from `display_transform()`; `export()` returns the final pixels.

use crate::types::{to_js_error, JsPixelBuffer};
use photocrop_core::crop::{CropSession, ImageTransform, Point, RotateDirection, SessionState, Size};
use photocrop_core::CropConfig;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Interactive crop session for JavaScript.
///
/// # Example (TypeScript)
/// ```typescript
/// const session = new CropSession(canvas.width, canvas.height, 1080, 1080);
/// session.load_image(image);
///
/// // In the pointer handlers
/// session.gesture(scaleDelta, dx, dy, centerX, centerY);
///
/// const result = session.export(); // 1080x1080 RGBA
/// ```
#[wasm_bindgen(js_name = CropSession)]
pub struct JsCropSession {
    inner: CropSession,
}

/// Snapshot of the image transform for `transform()`.
#[derive(Serialize)]
struct TransformJs {
    translate_x: f32,
    translate_y: f32,
    scale_x: f32,
    scale_y: f32,
    rotation: u16,
}

impl From<&ImageTransform> for TransformJs {
    fn from(t: &ImageTransform) -> Self {
        Self {
            translate_x: t.translate_x,
            translate_y: t.translate_y,
            scale_x: t.scale_x,
            scale_y: t.scale_y,
            rotation: t.rotation.degrees(),
        }
    }
}

#[wasm_bindgen(js_class = CropSession)]
impl JsCropSession {
    /// Lay out a crop window for `output_width` x `output_height` inside the
    /// container, using the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(
        container_width: f32,
        container_height: f32,
        output_width: u32,
        output_height: u32,
    ) -> Result<JsCropSession, JsValue> {
        Self::create(
            container_width,
            container_height,
            output_width,
            output_height,
            CropConfig::default(),
        )
    }

    /// Like the constructor, with a configuration object. Missing fields take
    /// their defaults, e.g. `{ filter: "Bilinear", min_scale: 0.25 }`.
    pub fn with_config(
        container_width: f32,
        container_height: f32,
        output_width: u32,
        output_height: u32,
        config: JsValue,
    ) -> Result<JsCropSession, JsValue> {
        let config: CropConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid crop config: {}", e)))?;
        Self::create(
            container_width,
            container_height,
            output_width,
            output_height,
            config,
        )
    }

    /// Target rectangle as `[left, top, right, bottom]` in container pixels
    pub fn target_rect(&self) -> Vec<f32> {
        let r = self.inner.geometry().target_rect;
        vec![r.left, r.top, r.right, r.bottom]
    }

    /// Session state: "uninitialized", "image_loaded", "interacting" or
    /// "exported"
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        state_name(self.inner.state()).to_string()
    }

    /// Load the source image and cover-fit it to the target
    pub fn load_image(&mut self, image: &JsPixelBuffer) -> Result<(), JsValue> {
        self.inner
            .load_image(image.buffer().clone())
            .map_err(to_js_error)?;
        Ok(())
    }

    /// Drag by `(dx, dy)` container pixels
    pub fn pan(&mut self, dx: f32, dy: f32) -> Result<(), JsValue> {
        self.inner.apply_pan(dx, dy).map_err(to_js_error)?;
        Ok(())
    }

    /// Scale by `scale_delta` about `(center_x, center_y)`
    pub fn pinch(&mut self, scale_delta: f32, center_x: f32, center_y: f32) -> Result<(), JsValue> {
        self.inner
            .apply_pinch(scale_delta, Point::new(center_x, center_y))
            .map_err(to_js_error)?;
        Ok(())
    }

    /// One combined gesture event: pan, then scale about the center
    pub fn gesture(
        &mut self,
        scale_delta: f32,
        dx: f32,
        dy: f32,
        center_x: f32,
        center_y: f32,
    ) -> Result<(), JsValue> {
        self.inner
            .apply_gesture(scale_delta, dx, dy, Point::new(center_x, center_y))
            .map_err(to_js_error)?;
        Ok(())
    }

    /// Rotate a quarter turn, clockwise when `clockwise` is true
    pub fn rotate(&mut self, clockwise: bool) -> Result<(), JsValue> {
        let direction = if clockwise {
            RotateDirection::Forward
        } else {
            RotateDirection::Backward
        };
        self.inner.rotate(direction).map_err(to_js_error)?;
        Ok(())
    }

    pub fn flip_horizontal(&mut self) -> Result<(), JsValue> {
        self.inner.flip_horizontal().map_err(to_js_error)?;
        Ok(())
    }

    pub fn flip_vertical(&mut self) -> Result<(), JsValue> {
        self.inner.flip_vertical().map_err(to_js_error)?;
        Ok(())
    }

    /// Cover-fit the image to the target again
    pub fn fit(&mut self) -> Result<(), JsValue> {
        self.inner.fit().map_err(to_js_error)?;
        Ok(())
    }

    /// Current rotation in degrees (0, 90, 180 or 270)
    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> u16 {
        self.inner.transform().rotation.degrees()
    }

    /// Current transform as `{ translate_x, translate_y, scale_x, scale_y,
    /// rotation }`
    pub fn transform(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&TransformJs::from(self.inner.transform()))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Source-to-screen scale as `[x, y]` magnitudes, or `undefined` with no
    /// image
    pub fn effective_scale(&self) -> Option<Vec<f32>> {
        let (x, y) = self.inner.effective_scale()?;
        Some(vec![x, y])
    }

    /// Source-to-container transform as `[a, b, c, d, e, f]` for
    /// `CanvasRenderingContext2D.setTransform`, or `undefined` with no image
    pub fn display_transform(&self) -> Option<Vec<f32>> {
        let m = self.inner.display_transform()?;
        // Canvas order: a = sx, b = ky, c = kx, d = sy, e = tx, f = ty
        Some(vec![m.sx, m.ky, m.kx, m.sy, m.tx, m.ty])
    }

    /// Rasterize the crop at the output size
    pub fn export(&mut self) -> JsPixelBuffer {
        JsPixelBuffer::from_buffer(self.inner.export())
    }
}

impl JsCropSession {
    fn create(
        container_width: f32,
        container_height: f32,
        output_width: u32,
        output_height: u32,
        config: CropConfig,
    ) -> Result<JsCropSession, JsValue> {
        let inner = CropSession::initialize(
            Size::new(container_width, container_height),
            output_width,
            output_height,
            config,
        )
        .map_err(to_js_error)?;
        Ok(JsCropSession { inner })
    }
}

fn state_name(state: SessionState) -> &'static str {
    match state {
        SessionState::Uninitialized => "uninitialized",
        SessionState::ImageLoaded => "image_loaded",
        SessionState::Interacting => "interacting",
        SessionState::Exported => "exported",
    }
}
