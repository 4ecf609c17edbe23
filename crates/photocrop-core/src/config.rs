//! Tunables for the crop engine.

use serde::{Deserialize, Serialize};

use crate::buffer::Rgba;

/// Sampling filter used when rasterizing a crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SamplingFilter {
    /// Nearest neighbor, matching an unfiltered bitmap draw.
    #[default]
    Nearest,
    /// Bilinear interpolation over the 4 nearest source pixels.
    Bilinear,
}

/// Crop engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    /// Fraction of the limiting container dimension used for the first
    /// crop-size guess. Must lie in `(0, 1]`.
    pub margin_factor: f32,
    /// Stroke width of the frame drawn around the target rectangle. Half of it
    /// insets the target rectangle on every side.
    pub border_width: f32,
    /// Smallest allowed scale magnitude after a pinch.
    pub min_scale: f32,
    /// Canvas color under the image when exporting.
    pub background: Rgba,
    /// Canvas color when exporting with no image loaded.
    pub empty_background: Rgba,
    /// Sampling filter for export.
    pub filter: SamplingFilter,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            margin_factor: 0.7,
            border_width: 5.0,
            min_scale: 0.5,
            background: Rgba::WHITE,
            empty_background: Rgba::TRANSPARENT,
            filter: SamplingFilter::Nearest,
        }
    }
}
