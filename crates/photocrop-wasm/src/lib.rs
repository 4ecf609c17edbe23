//! Photocrop WASM - WebAssembly bindings for Photocrop
//!
//! This crate provides WASM bindings to expose the photocrop-core engines to
//! JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `color` - Color parameters, presets and color matrix application
//! - `crop` - Interactive crop session
//!
//! # Usage
//!
//! ```typescript
//! import init, { ColorParams, CropSession, JsPixelBuffer, apply_color } from '@photocrop/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const data = ctx.getImageData(0, 0, width, height);
//! const image = new JsPixelBuffer(width, height, data.data);
//!
//! const session = new CropSession(viewWidth, viewHeight, 1080, 1080);
//! session.load_image(image);
//! const cropped = session.export();
//!
//! const params = new ColorParams();
//! params.apply_preset("Cyanotype");
//! const toned = apply_color(cropped, params);
//! ```

use wasm_bindgen::prelude::*;

mod color;
mod crop;
mod types;

// Re-export public types
pub use color::{apply_color, apply_color_matrix, preset_matrix, preset_names, JsColorParameters};
pub use crop::JsCropSession;
pub use types::JsPixelBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    photocrop_core::VERSION.to_string()
}
