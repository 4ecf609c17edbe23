//! Editing parameters for the color engine.
//!
//! ## Ranges
//!
//! | Field      | Adjust       | Colorize / Fill |
//! |------------|--------------|-----------------|
//! | hue        | -100..=100   | 0..=360         |
//! | saturation | -100..=100   | 0..=100         |
//! | brightness | -100..=100   | 0..=100         |
//! | contrast   | -100..=100   | -100..=100      |
//! | opacity    | 0..=100      | 0..=100         |
//!
//! Values outside a range are clamped, never rejected. Only non-finite input
//! is an error.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, EngineError};

/// The three color editing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ColorMode {
    /// Per-channel hue/saturation/brightness/contrast adjustment.
    #[default]
    Adjust,
    /// Grayscale blended towards a tint color.
    Colorize,
    /// Every pixel replaced by a flat color.
    Fill,
}

impl ColorMode {
    /// Inclusive hue range for this mode.
    pub fn hue_range(self) -> (f32, f32) {
        match self {
            ColorMode::Adjust => (-100.0, 100.0),
            ColorMode::Colorize | ColorMode::Fill => (0.0, 360.0),
        }
    }

    /// Inclusive saturation and brightness range for this mode.
    pub fn tone_range(self) -> (f32, f32) {
        match self {
            ColorMode::Adjust => (-100.0, 100.0),
            ColorMode::Colorize | ColorMode::Fill => (0.0, 100.0),
        }
    }
}

pub const CONTRAST_RANGE: (f32, f32) = (-100.0, 100.0);
pub const OPACITY_RANGE: (f32, f32) = (0.0, 100.0);

/// A snapshot of color editing parameters.
///
/// Always holds finite, in-range values. Edits return a new snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawColorParameters", into = "RawColorParameters")]
pub struct ColorParameters {
    mode: ColorMode,
    hue: f32,
    saturation: f32,
    brightness: f32,
    contrast: f32,
    opacity: f32,
}

impl Default for ColorParameters {
    fn default() -> Self {
        Self::ORIGINAL
    }
}

impl ColorParameters {
    /// Adjust mode with every field neutral.
    pub const ORIGINAL: ColorParameters = ColorParameters::from_parts(
        ColorMode::Adjust,
        0.0,
        0.0,
        0.0,
        0.0,
        100.0,
    );

    /// Build a snapshot without validation. Only for known-good constants.
    pub(crate) const fn from_parts(
        mode: ColorMode,
        hue: f32,
        saturation: f32,
        brightness: f32,
        contrast: f32,
        opacity: f32,
    ) -> Self {
        Self {
            mode,
            hue,
            saturation,
            brightness,
            contrast,
            opacity,
        }
    }

    /// Build a snapshot, clamping every field to the range of `mode`.
    pub fn new(
        mode: ColorMode,
        hue: f32,
        saturation: f32,
        brightness: f32,
        contrast: f32,
        opacity: f32,
    ) -> Result<Self, EngineError> {
        let hue = ensure_finite("hue", hue)?;
        let saturation = ensure_finite("saturation", saturation)?;
        let brightness = ensure_finite("brightness", brightness)?;
        let contrast = ensure_finite("contrast", contrast)?;
        let opacity = ensure_finite("opacity", opacity)?;

        let (hue_lo, hue_hi) = mode.hue_range();
        let (tone_lo, tone_hi) = mode.tone_range();
        Ok(Self {
            mode,
            hue: hue.clamp(hue_lo, hue_hi),
            saturation: saturation.clamp(tone_lo, tone_hi),
            brightness: brightness.clamp(tone_lo, tone_hi),
            contrast: contrast.clamp(CONTRAST_RANGE.0, CONTRAST_RANGE.1),
            opacity: opacity.clamp(OPACITY_RANGE.0, OPACITY_RANGE.1),
        })
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn saturation(&self) -> f32 {
        self.saturation
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    pub fn contrast(&self) -> f32 {
        self.contrast
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Switch mode.
    ///
    /// Entering Adjust resets hue, saturation and brightness to 0. Leaving
    /// Adjust for Colorize or Fill sets them to 180 / 50 / 50. Moving between
    /// Colorize and Fill keeps them. Contrast and opacity are always kept.
    pub fn with_mode(&self, mode: ColorMode) -> Self {
        if mode == self.mode {
            return *self;
        }
        let mut next = *self;
        next.mode = mode;
        if mode == ColorMode::Adjust {
            next.hue = 0.0;
            next.saturation = 0.0;
            next.brightness = 0.0;
        } else if self.mode == ColorMode::Adjust {
            next.hue = 180.0;
            next.saturation = 50.0;
            next.brightness = 50.0;
        }
        next
    }

    pub fn with_hue(&self, hue: f32) -> Result<Self, EngineError> {
        let (lo, hi) = self.mode.hue_range();
        let mut next = *self;
        next.hue = ensure_finite("hue", hue)?.clamp(lo, hi);
        Ok(next)
    }

    pub fn with_saturation(&self, saturation: f32) -> Result<Self, EngineError> {
        let (lo, hi) = self.mode.tone_range();
        let mut next = *self;
        next.saturation = ensure_finite("saturation", saturation)?.clamp(lo, hi);
        Ok(next)
    }

    pub fn with_brightness(&self, brightness: f32) -> Result<Self, EngineError> {
        let (lo, hi) = self.mode.tone_range();
        let mut next = *self;
        next.brightness = ensure_finite("brightness", brightness)?.clamp(lo, hi);
        Ok(next)
    }

    pub fn with_contrast(&self, contrast: f32) -> Result<Self, EngineError> {
        let mut next = *self;
        next.contrast =
            ensure_finite("contrast", contrast)?.clamp(CONTRAST_RANGE.0, CONTRAST_RANGE.1);
        Ok(next)
    }

    pub fn with_opacity(&self, opacity: f32) -> Result<Self, EngineError> {
        let mut next = *self;
        next.opacity = ensure_finite("opacity", opacity)?.clamp(OPACITY_RANGE.0, OPACITY_RANGE.1);
        Ok(next)
    }

    /// Load `preset` the way the editor does: switch mode first, then set each
    /// field through its clamping setter.
    pub fn apply_preset(&self, preset: &ColorParameters) -> Self {
        let mut next = self.with_mode(preset.mode);
        let (hue_lo, hue_hi) = next.mode.hue_range();
        let (tone_lo, tone_hi) = next.mode.tone_range();
        next.hue = preset.hue.clamp(hue_lo, hue_hi);
        next.saturation = preset.saturation.clamp(tone_lo, tone_hi);
        next.brightness = preset.brightness.clamp(tone_lo, tone_hi);
        next.contrast = preset.contrast.clamp(CONTRAST_RANGE.0, CONTRAST_RANGE.1);
        next.opacity = preset.opacity.clamp(OPACITY_RANGE.0, OPACITY_RANGE.1);
        next
    }

    /// Back to Adjust mode with every field neutral.
    pub fn reset(&self) -> Self {
        Self::ORIGINAL
    }

    /// Check if every field is neutral for Adjust mode.
    pub fn is_original(&self) -> bool {
        *self == Self::ORIGINAL
    }
}

/// Unvalidated wire form used for serde.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawColorParameters {
    mode: ColorMode,
    hue: f32,
    saturation: f32,
    brightness: f32,
    contrast: f32,
    opacity: f32,
}

impl TryFrom<RawColorParameters> for ColorParameters {
    type Error = EngineError;

    fn try_from(raw: RawColorParameters) -> Result<Self, Self::Error> {
        ColorParameters::new(
            raw.mode,
            raw.hue,
            raw.saturation,
            raw.brightness,
            raw.contrast,
            raw.opacity,
        )
    }
}

impl From<ColorParameters> for RawColorParameters {
    fn from(params: ColorParameters) -> Self {
        Self {
            mode: params.mode,
            hue: params.hue,
            saturation: params.saturation,
            brightness: params.brightness,
            contrast: params.contrast,
            opacity: params.opacity,
        }
    }
}
