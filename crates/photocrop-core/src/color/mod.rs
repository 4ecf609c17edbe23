//! Color matrix derivation.
//!
//! Turns a [`ColorParameters`] snapshot into a 4x5 [`ColorMatrix`]. The
//! derivation is a pure function: hosts call [`build_matrix`] again on every
//! parameter change.
//!
//! ## Step Order
//!
//! Adjust:
//! 1. Opacity
//! 2. Hue rotation
//! 3. Contrast
//! 4. Brightness
//! 5. Saturation
//!
//! Colorize: grayscale average, tint towards the HSV color, contrast.
//!
//! Fill: flat HSV color, contrast.

pub mod adjust;
pub mod apply;
pub mod hsv;
pub mod matrix;
pub mod params;
pub mod presets;

use tracing::trace;

pub use adjust::{
    adjust_brightness, adjust_contrast, adjust_hue, adjust_opacity, adjust_saturation,
    CONTRAST_TABLE,
};
pub use apply::{apply_color_matrix, apply_color_matrix_in_place};
pub use hsv::hsv_to_rgb;
pub use matrix::ColorMatrix;
pub use params::{ColorMode, ColorParameters};
pub use presets::ColorPreset;

/// Adjust-mode hue input (-100..=100) is scaled onto -180..=180 degrees.
pub const ADJUST_HUE_SCALE: f32 = 1.8;

/// Weight of each input channel in the Colorize grayscale average.
const GRAY_WEIGHT: f32 = 0.33;

/// Derive the color matrix for a parameter snapshot.
pub fn build_matrix(params: &ColorParameters) -> ColorMatrix {
    let opacity = params.opacity() / 100.0;
    let matrix = match params.mode() {
        ColorMode::Adjust => build_adjust_matrix(
            params.hue() * ADJUST_HUE_SCALE,
            params.saturation(),
            params.brightness(),
            params.contrast(),
            opacity,
        ),
        ColorMode::Colorize => build_colorize_matrix(
            params.hue(),
            params.saturation() / 100.0,
            params.brightness() / 100.0,
            params.contrast(),
            opacity,
        ),
        ColorMode::Fill => build_fill_matrix(
            params.hue(),
            params.saturation() / 100.0,
            params.brightness() / 100.0,
            params.contrast(),
            opacity,
        ),
    };
    trace!(mode = ?params.mode(), ?matrix, "derived color matrix");
    matrix
}

/// Adjust mode.
///
/// * `hue` - degrees (-180 to 180)
/// * `saturation`, `brightness`, `contrast` - -100 to 100
/// * `alpha` - 0.0 to 1.0
pub fn build_adjust_matrix(
    hue: f32,
    saturation: f32,
    brightness: f32,
    contrast: f32,
    alpha: f32,
) -> ColorMatrix {
    let m = adjust_opacity(&ColorMatrix::IDENTITY, alpha);
    let m = adjust_hue(&m, hue);
    let m = adjust_contrast(&m, contrast);
    let m = adjust_brightness(&m, brightness);
    adjust_saturation(&m, saturation)
}

/// Colorize mode.
///
/// * `hue` - degrees (0 to 360)
/// * `saturation`, `brightness` - 0.0 to 1.0
/// * `contrast` - -100 to 100
/// * `alpha` - 0.0 to 1.0
pub fn build_colorize_matrix(
    hue: f32,
    saturation: f32,
    brightness: f32,
    contrast: f32,
    alpha: f32,
) -> ColorMatrix {
    let [r, g, b] = hsv_to_rgb(hue, saturation, brightness).map(f32::from);
    let w = GRAY_WEIGHT;
    let gray = ColorMatrix::new([
        w, w, w, 0.0, 0.0, //
        w, w, w, 0.0, 0.0, //
        w, w, w, 0.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ]);
    let tint = ColorMatrix::new([
        1.0 - r / 255.0, 0.0, 0.0, 0.0, r, //
        0.0, 1.0 - g / 255.0, 0.0, 0.0, g, //
        0.0, 0.0, 1.0 - b / 255.0, 0.0, b, //
        0.0, 0.0, 0.0, alpha, 0.0,
    ]);
    adjust_contrast(&gray.then(&tint), contrast)
}

/// Fill mode. Same inputs as [`build_colorize_matrix`].
pub fn build_fill_matrix(
    hue: f32,
    saturation: f32,
    brightness: f32,
    contrast: f32,
    alpha: f32,
) -> ColorMatrix {
    let [r, g, b] = hsv_to_rgb(hue, saturation, brightness).map(f32::from);
    let fill = ColorMatrix::new([
        0.0, 0.0, 0.0, 0.0, r, //
        0.0, 0.0, 0.0, 0.0, g, //
        0.0, 0.0, 0.0, 0.0, b, //
        0.0, 0.0, 0.0, alpha, 0.0,
    ]);
    adjust_contrast(&fill, contrast)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(
        mode: ColorMode,
        hue: f32,
        saturation: f32,
        brightness: f32,
        contrast: f32,
        opacity: f32,
    ) -> ColorParameters {
        ColorParameters::new(mode, hue, saturation, brightness, contrast, opacity).unwrap()
    }

    #[test]
    fn test_neutral_adjust_is_identity() {
        let m = build_matrix(&ColorParameters::ORIGINAL);
        assert_eq!(m, ColorMatrix::IDENTITY);
    }

    #[test]
    fn test_adjust_hue_50_is_quarter_turn() {
        let p = params(ColorMode::Adjust, 50.0, 0.0, 0.0, 0.0, 100.0);
        assert_eq!(p.hue() * ADJUST_HUE_SCALE, 90.0);
        assert_eq!(
            adjust::hue_angle(p.hue() * ADJUST_HUE_SCALE),
            std::f64::consts::FRAC_PI_2
        );
        assert_eq!(build_matrix(&p), adjust_hue(&ColorMatrix::IDENTITY, 90.0));
    }

    #[test]
    fn test_adjust_step_order() {
        let p = params(ColorMode::Adjust, 20.0, 30.0, -40.0, 25.0, 60.0);
        let expected = adjust_saturation(
            &adjust_brightness(
                &adjust_contrast(
                    &adjust_hue(&adjust_opacity(&ColorMatrix::IDENTITY, 0.6), 36.0),
                    25.0,
                ),
                -40.0,
            ),
            30.0,
        );
        assert!(build_matrix(&p).approx_eq(&expected, 1e-6));
    }

    #[test]
    fn test_adjust_opacity_scales_alpha() {
        let p = params(ColorMode::Adjust, 0.0, 0.0, 0.0, 0.0, 50.0);
        assert_eq!(build_matrix(&p).row(3), [0.0, 0.0, 0.0, 0.5, 0.0]);
    }

    #[test]
    fn test_colorize_red_tint() {
        let m = build_colorize_matrix(0.0, 1.0, 1.0, 0.0, 1.0);
        // Before contrast the bias column carries the tint color
        assert_eq!(m.get(0, 4), 255.0);
        assert_eq!(m.get(1, 4), 0.0);
        assert_eq!(m.get(2, 4), 0.0);
        assert_eq!(m.get(3, 4), 0.0);
        // Red row fully replaced by the tint, green and blue keep the gray average
        assert_eq!(m.row(0)[..3], [0.0, 0.0, 0.0]);
        assert!((m.get(1, 0) - 0.33).abs() < 1e-6);
        assert!((m.get(2, 2) - 0.33).abs() < 1e-6);
    }

    #[test]
    fn test_colorize_via_parameters() {
        let p = params(ColorMode::Colorize, 0.0, 100.0, 100.0, 0.0, 100.0);
        assert_eq!(build_matrix(&p), build_colorize_matrix(0.0, 1.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn test_colorize_alpha_row() {
        let m = build_colorize_matrix(180.0, 0.5, 0.5, 0.0, 0.4);
        assert_eq!(m.row(3), [0.0, 0.0, 0.0, 0.4, 0.0]);
    }

    #[test]
    fn test_fill_ignores_input() {
        let p = params(ColorMode::Fill, 120.0, 100.0, 100.0, 0.0, 100.0);
        let m = build_matrix(&p);
        assert_eq!(m.transform([10.0, 200.0, 30.0, 255.0]), [0.0, 255.0, 0.0, 255.0]);
        assert_eq!(m.transform([250.0, 0.0, 90.0, 255.0]), [0.0, 255.0, 0.0, 255.0]);
    }

    #[test]
    fn test_fill_contrast_moves_bias_only() {
        let m = build_fill_matrix(0.0, 0.0, 0.5, 50.0, 1.0);
        // Gray 128 is the contrast midpoint
        assert_eq!(m.get(0, 4), 128.0);
        for row in 0..3 {
            assert_eq!(m.row(row)[..4], [0.0; 4]);
        }
    }

    #[test]
    fn test_silhouette_is_black() {
        let m = ColorPreset::Silhouette.matrix();
        assert_eq!(m.transform([90.0, 180.0, 45.0, 255.0]), [0.0, 0.0, 0.0, 255.0]);
    }

    #[test]
    fn test_desaturate_preset_matches_luminance() {
        let m = ColorPreset::Desaturate.matrix();
        for row in 0..3 {
            assert_eq!(m.get(row, 0), adjust::SATURATION_LUM_R);
            assert_eq!(m.get(row, 1), adjust::SATURATION_LUM_G);
            assert_eq!(m.get(row, 2), adjust::SATURATION_LUM_B);
        }
    }
}
