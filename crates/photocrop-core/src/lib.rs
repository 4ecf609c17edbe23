//! Photocrop Core - Image editing engines
//!
//! This crate provides the two engines behind the photo editing screens:
//! - **Color**: derives a 4x5 color matrix from user-facing parameters in
//!   Adjust, Colorize or Fill mode, with named presets
//! - **Crop**: an interactive pan/pinch/rotate/flip session over a fixed
//!   aspect-ratio crop window, exported at an exact pixel size
//!
//! Both engines work on straight-alpha RGBA8 [`PixelBuffer`]s. Decoding and
//! encoding stay with the host.

pub mod buffer;
pub mod color;
pub mod config;
pub mod crop;
pub mod error;

pub use buffer::{PixelBuffer, Rgba};
pub use color::{
    apply_color_matrix, apply_color_matrix_in_place, build_matrix, ColorMatrix, ColorMode,
    ColorParameters, ColorPreset,
};
pub use config::{CropConfig, SamplingFilter};
pub use crop::{
    Affine2, CropGeometry, CropSession, ImageTransform, Point, Rect, RotateDirection, Rotation,
    SessionState, Size,
};
pub use error::EngineError;

/// Crate version, reported to hosts for diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
