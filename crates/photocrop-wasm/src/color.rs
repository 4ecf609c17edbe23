//! Color engine WASM bindings.
//!
//! This module provides JavaScript bindings for the color parameters, the
//! derived 4x5 color matrix and its application to pixel data.
//!
//! Matrices cross the boundary as a flat `Float32Array` of 20 values in
//! row-major order (R, G, B, A rows; 4 channel coefficients then a bias in
//! 0..255 units).

use crate::types::{to_js_error, JsPixelBuffer};
use photocrop_core::color::{
    apply_color_matrix as core_apply, build_matrix, ColorMatrix, ColorMode, ColorParameters,
    ColorPreset,
};
use wasm_bindgen::prelude::*;

/// Color editing parameters wrapper for JavaScript.
///
/// # Example (TypeScript)
/// ```typescript
/// const params = new ColorParams();
/// params.set_mode("colorize");
/// params.set_hue(40);
/// const matrix = params.matrix(); // Float32Array(20)
/// const toned = apply_color(image, params);
/// ```
#[wasm_bindgen(js_name = ColorParams)]
pub struct JsColorParameters {
    inner: ColorParameters,
}

#[wasm_bindgen(js_class = ColorParams)]
impl JsColorParameters {
    /// Create parameters in Adjust mode with every field neutral
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: ColorParameters::ORIGINAL,
        }
    }

    /// Get the mode name: "adjust", "colorize" or "fill"
    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        mode_name(self.inner.mode()).to_string()
    }

    /// Switch mode. Hue, saturation and brightness are reset for the new mode.
    pub fn set_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode =
            parse_mode(mode).ok_or_else(|| JsValue::from_str(&format!("Unknown mode: {}", mode)))?;
        self.inner = self.inner.with_mode(mode);
        Ok(())
    }

    /// Get hue value
    #[wasm_bindgen(getter)]
    pub fn hue(&self) -> f32 {
        self.inner.hue()
    }

    /// Set hue value (clamped to the mode's range)
    pub fn set_hue(&mut self, value: f32) -> Result<(), JsValue> {
        self.inner = self.inner.with_hue(value).map_err(to_js_error)?;
        Ok(())
    }

    /// Get saturation value
    #[wasm_bindgen(getter)]
    pub fn saturation(&self) -> f32 {
        self.inner.saturation()
    }

    /// Set saturation value (clamped to the mode's range)
    pub fn set_saturation(&mut self, value: f32) -> Result<(), JsValue> {
        self.inner = self.inner.with_saturation(value).map_err(to_js_error)?;
        Ok(())
    }

    /// Get brightness value
    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> f32 {
        self.inner.brightness()
    }

    /// Set brightness value (clamped to the mode's range)
    pub fn set_brightness(&mut self, value: f32) -> Result<(), JsValue> {
        self.inner = self.inner.with_brightness(value).map_err(to_js_error)?;
        Ok(())
    }

    /// Get contrast value
    #[wasm_bindgen(getter)]
    pub fn contrast(&self) -> f32 {
        self.inner.contrast()
    }

    /// Set contrast value (-100 to 100)
    pub fn set_contrast(&mut self, value: f32) -> Result<(), JsValue> {
        self.inner = self.inner.with_contrast(value).map_err(to_js_error)?;
        Ok(())
    }

    /// Get opacity value
    #[wasm_bindgen(getter)]
    pub fn opacity(&self) -> f32 {
        self.inner.opacity()
    }

    /// Set opacity value (0 to 100)
    pub fn set_opacity(&mut self, value: f32) -> Result<(), JsValue> {
        self.inner = self.inner.with_opacity(value).map_err(to_js_error)?;
        Ok(())
    }

    /// Load a named preset, e.g. "Old Style". Case and spaces are ignored.
    pub fn apply_preset(&mut self, name: &str) -> Result<(), JsValue> {
        let preset = find_preset(name)?;
        self.inner = self.inner.apply_preset(&preset.parameters());
        Ok(())
    }

    /// Back to Adjust mode with every field neutral
    pub fn reset(&mut self) {
        self.inner = self.inner.reset();
    }

    /// Check if every field is neutral
    pub fn is_original(&self) -> bool {
        self.inner.is_original()
    }

    /// Derive the color matrix for the current values
    pub fn matrix(&self) -> Vec<f32> {
        build_matrix(&self.inner).values().to_vec()
    }

    /// Serialize to JSON for storage
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Deserialize from JSON. Out-of-range values are clamped.
    pub fn from_json(value: JsValue) -> Result<JsColorParameters, JsValue> {
        let inner: ColorParameters =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Default for JsColorParameters {
    fn default() -> Self {
        Self::new()
    }
}

impl JsColorParameters {
    pub(crate) fn inner(&self) -> &ColorParameters {
        &self.inner
    }
}

/// Apply the parameters' color matrix to an image.
///
/// Returns a new image; the source is left untouched.
#[wasm_bindgen]
pub fn apply_color(image: &JsPixelBuffer, params: &JsColorParameters) -> JsPixelBuffer {
    let matrix = build_matrix(params.inner());
    JsPixelBuffer::from_buffer(core_apply(image.buffer(), &matrix))
}

/// Apply a raw 20-value color matrix to an image.
///
/// # Errors
/// Returns an error if `matrix` doesn't hold exactly 20 values.
#[wasm_bindgen]
pub fn apply_color_matrix(image: &JsPixelBuffer, matrix: Vec<f32>) -> Result<JsPixelBuffer, JsValue> {
    let matrix = matrix_from_slice(&matrix).ok_or_else(|| {
        JsValue::from_str(&format!(
            "Invalid color matrix: expected 20 values, got {}",
            matrix.len()
        ))
    })?;
    Ok(JsPixelBuffer::from_buffer(core_apply(image.buffer(), &matrix)))
}

/// Display names of the built-in presets, in display order.
#[wasm_bindgen]
pub fn preset_names() -> Vec<String> {
    ColorPreset::ALL
        .iter()
        .map(|preset| preset.name().to_string())
        .collect()
}

/// The color matrix of a named preset.
#[wasm_bindgen]
pub fn preset_matrix(name: &str) -> Result<Vec<f32>, JsValue> {
    Ok(find_preset(name)?.matrix().values().to_vec())
}

fn find_preset(name: &str) -> Result<ColorPreset, JsValue> {
    ColorPreset::from_name(name)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown preset: {}", name)))
}

fn mode_name(mode: ColorMode) -> &'static str {
    match mode {
        ColorMode::Adjust => "adjust",
        ColorMode::Colorize => "colorize",
        ColorMode::Fill => "fill",
    }
}

fn parse_mode(name: &str) -> Option<ColorMode> {
    match name.trim().to_ascii_lowercase().as_str() {
        "adjust" => Some(ColorMode::Adjust),
        "colorize" => Some(ColorMode::Colorize),
        "fill" => Some(ColorMode::Fill),
        _ => None,
    }
}

fn matrix_from_slice(values: &[f32]) -> Option<ColorMatrix> {
    let values: [f32; 20] = values.try_into().ok()?;
    Some(ColorMatrix::new(values))
}
