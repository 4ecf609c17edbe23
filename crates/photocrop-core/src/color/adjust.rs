//! Color matrix adjustment steps.
//!
//! Each step takes the accumulated matrix and returns a new one with the step
//! appended, so it acts on pixels after everything already accumulated. A step
//! at its neutral value returns the input unchanged.
//!
//! | Step       | Range        | Neutral |
//! |------------|--------------|---------|
//! | hue        | -180..=180   | 0       |
//! | contrast   | -100..=100   | 0       |
//! | brightness | -100..=100   | 0       |
//! | saturation | -100..=100   | 0       |
//! | opacity    | 0..=1        | 1       |

use super::matrix::ColorMatrix;

/// Luminance weights used by hue rotation.
const HUE_LUM_R: f32 = 0.213;
const HUE_LUM_G: f32 = 0.715;
const HUE_LUM_B: f32 = 0.072;

/// Luminance weights used for desaturation.
pub const SATURATION_LUM_R: f32 = 0.3086;
pub const SATURATION_LUM_G: f32 = 0.6094;
pub const SATURATION_LUM_B: f32 = 0.0820;

/// Contrast factor for inputs 0..=100. Steeper than linear towards the top.
pub const CONTRAST_TABLE: [f32; 101] = [
    0.00, 0.01, 0.02, 0.04, 0.05, 0.06, 0.07, 0.08, 0.10, 0.11, //
    0.12, 0.14, 0.15, 0.16, 0.17, 0.18, 0.20, 0.21, 0.22, 0.24, //
    0.25, 0.27, 0.28, 0.30, 0.32, 0.34, 0.36, 0.38, 0.40, 0.42, //
    0.44, 0.46, 0.48, 0.50, 0.53, 0.56, 0.59, 0.62, 0.65, 0.68, //
    0.71, 0.74, 0.77, 0.80, 0.83, 0.86, 0.89, 0.92, 0.95, 0.98, //
    1.00, 1.06, 1.12, 1.18, 1.24, 1.30, 1.36, 1.42, 1.48, 1.54, //
    1.60, 1.66, 1.72, 1.78, 1.84, 1.90, 1.96, 2.00, 2.12, 2.25, //
    2.37, 2.50, 2.62, 2.75, 2.87, 3.00, 3.20, 3.40, 3.60, 3.80, //
    4.00, 4.30, 4.70, 4.90, 5.00, 5.50, 6.00, 6.50, 6.80, 7.00, //
    7.30, 7.50, 7.80, 8.00, 8.40, 8.70, 9.00, 9.40, 9.60, 9.80, //
    10.0,
];

/// Hue rotation angle in radians for a hue value in degrees.
#[inline]
pub fn hue_angle(hue: f32) -> f64 {
    (hue.clamp(-180.0, 180.0) / 180.0) as f64 * std::f64::consts::PI
}

/// Rotate hue while preserving luminance.
pub fn adjust_hue(matrix: &ColorMatrix, hue: f32) -> ColorMatrix {
    let angle = hue_angle(hue);
    if angle == 0.0 {
        return *matrix;
    }

    let cos = angle.cos();
    let sin = angle.sin();
    let (lr, lg, lb) = (HUE_LUM_R as f64, HUE_LUM_G as f64, HUE_LUM_B as f64);
    let (k0, k1, k2) = (0.143f32 as f64, 0.140f32 as f64, 0.283f32 as f64);

    let step = ColorMatrix::new([
        (lr + cos * (1.0 - lr) + sin * -lr) as f32,
        (lg + cos * -lg + sin * -lg) as f32,
        (lb + cos * -lb + sin * (1.0 - lb)) as f32,
        0.0,
        0.0,
        (lr + cos * -lr + sin * k0) as f32,
        (lg + cos * (1.0 - lg) + sin * k1) as f32,
        (lb + cos * -lb + sin * -k2) as f32,
        0.0,
        0.0,
        (lr + cos * -lr + sin * -(1.0 - lr)) as f32,
        (lg + cos * -lg + sin * lg) as f32,
        (lb + cos * (1.0 - lb) + sin * lb) as f32,
        0.0,
        0.0,
        0.0,
        0.0,
        0.0,
        1.0,
        0.0,
    ]);
    matrix.then(&step)
}

/// Contrast factor for a contrast value, truncated to an integer first.
pub fn contrast_factor(contrast: f32) -> f32 {
    let value = contrast.clamp(-100.0, 100.0) as i32;
    if value < 0 {
        value as f32 / 100.0
    } else {
        CONTRAST_TABLE[value as usize]
    }
}

/// Stretch or compress RGB around the 128 midpoint.
///
/// `output = input * (1 + x) - 128 * x`
pub fn adjust_contrast(matrix: &ColorMatrix, contrast: f32) -> ColorMatrix {
    if contrast.clamp(-100.0, 100.0) as i32 == 0 {
        return *matrix;
    }

    let x = contrast_factor(contrast);
    let bias = -128.0 * x;
    let step = ColorMatrix::new([
        1.0 + x, 0.0, 0.0, 0.0, bias, //
        0.0, 1.0 + x, 0.0, 0.0, bias, //
        0.0, 0.0, 1.0 + x, 0.0, bias, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ]);
    matrix.then(&step)
}

/// Blend RGB towards white (positive) or black (negative).
///
/// `output = input * (1 - ratio) + target * ratio`
pub fn adjust_brightness(matrix: &ColorMatrix, brightness: f32) -> ColorMatrix {
    let value = brightness.clamp(-100.0, 100.0);
    if value == 0.0 {
        return *matrix;
    }

    let ratio = (value / 100.0).abs();
    let target = if value > 0.0 { 255.0 } else { 0.0 };
    let keep = 1.0 - ratio;
    let bias = target * ratio;
    let step = ColorMatrix::new([
        keep, 0.0, 0.0, 0.0, bias, //
        0.0, keep, 0.0, 0.0, bias, //
        0.0, 0.0, keep, 0.0, bias, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ]);
    matrix.then(&step)
}

/// Saturation blend factor: 0..1 desaturates, 1..4 boosts.
#[inline]
pub fn saturation_factor(saturation: f32) -> f32 {
    let value = saturation.clamp(-100.0, 100.0);
    1.0 + if value > 0.0 {
        3.0 * value / 100.0
    } else {
        value / 100.0
    }
}

/// Blend each pixel with its gray value.
///
/// `output = gray * (1 - x) + input * x`
pub fn adjust_saturation(matrix: &ColorMatrix, saturation: f32) -> ColorMatrix {
    if saturation.clamp(-100.0, 100.0) == 0.0 {
        return *matrix;
    }

    let x = saturation_factor(saturation);
    let r = SATURATION_LUM_R * (1.0 - x);
    let g = SATURATION_LUM_G * (1.0 - x);
    let b = SATURATION_LUM_B * (1.0 - x);
    let step = ColorMatrix::new([
        r + x, g, b, 0.0, 0.0, //
        r, g + x, b, 0.0, 0.0, //
        r, g, b + x, 0.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ]);
    matrix.then(&step)
}

/// Scale the alpha channel.
pub fn adjust_opacity(matrix: &ColorMatrix, alpha: f32) -> ColorMatrix {
    let value = alpha.clamp(0.0, 1.0);
    if value == 1.0 {
        return *matrix;
    }

    let step = ColorMatrix::new([
        1.0, 0.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 0.0, value, 0.0,
    ]);
    matrix.then(&step)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: ColorMatrix = ColorMatrix::IDENTITY;

    #[test]
    fn test_neutral_values_are_noops() {
        assert_eq!(adjust_hue(&ID, 0.0), ID);
        assert_eq!(adjust_contrast(&ID, 0.0), ID);
        assert_eq!(adjust_contrast(&ID, 0.9), ID, "truncates to 0");
        assert_eq!(adjust_brightness(&ID, 0.0), ID);
        assert_eq!(adjust_saturation(&ID, 0.0), ID);
        assert_eq!(adjust_opacity(&ID, 1.0), ID);
        assert_eq!(adjust_opacity(&ID, 3.0), ID, "clamped to 1");
    }

    #[test]
    fn test_contrast_table_shape() {
        assert_eq!(CONTRAST_TABLE[0], 0.0);
        assert_eq!(CONTRAST_TABLE[50], 1.0);
        assert_eq!(CONTRAST_TABLE[100], 10.0);
        for pair in CONTRAST_TABLE.windows(2) {
            assert!(pair[0] <= pair[1], "{} > {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_contrast_factor() {
        assert_eq!(contrast_factor(-50.0), -0.5);
        assert_eq!(contrast_factor(-100.0), -1.0);
        assert_eq!(contrast_factor(10.0), 0.12);
        assert_eq!(contrast_factor(10.7), 0.12);
        assert_eq!(contrast_factor(250.0), 10.0);
    }

    #[test]
    fn test_contrast_matrix() {
        let m = adjust_contrast(&ID, 50.0);
        assert_eq!(m.row(0), [2.0, 0.0, 0.0, 0.0, -128.0]);
        assert_eq!(m.row(3), [0.0, 0.0, 0.0, 1.0, 0.0]);
        // Midpoint is a fixed point
        assert_eq!(m.transform([128.0, 128.0, 128.0, 255.0])[0], 128.0);
    }

    #[test]
    fn test_negative_contrast_flattens_to_midpoint() {
        let m = adjust_contrast(&ID, -100.0);
        let out = m.transform([0.0, 200.0, 255.0, 255.0]);
        for channel in &out[..3] {
            assert!((channel - 128.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_brightness_towards_white_and_black() {
        let brighter = adjust_brightness(&ID, 100.0);
        assert_eq!(brighter.transform([10.0, 20.0, 30.0, 255.0])[..3], [255.0; 3]);

        let darker = adjust_brightness(&ID, -100.0);
        assert_eq!(darker.transform([10.0, 20.0, 30.0, 255.0])[..3], [0.0; 3]);

        let half = adjust_brightness(&ID, 50.0);
        assert_eq!(half.row(0), [0.5, 0.0, 0.0, 0.0, 127.5]);
    }

    #[test]
    fn test_saturation_factor_range() {
        assert_eq!(saturation_factor(-100.0), 0.0);
        assert_eq!(saturation_factor(0.0), 1.0);
        assert_eq!(saturation_factor(100.0), 4.0);
        assert_eq!(saturation_factor(50.0), 2.5);
    }

    #[test]
    fn test_full_desaturation_rows_are_luminance_weights() {
        let m = adjust_saturation(&ID, -100.0);
        let weights = [SATURATION_LUM_R, SATURATION_LUM_G, SATURATION_LUM_B];
        for row in 0..3 {
            for (column, weight) in weights.iter().enumerate() {
                assert_eq!(m.get(row, column), *weight);
            }
        }
    }

    #[test]
    fn test_opacity_scales_alpha_row() {
        let m = adjust_opacity(&ID, 0.25);
        assert_eq!(m.row(3), [0.0, 0.0, 0.0, 0.25, 0.0]);
        assert_eq!(m.row(0), [1.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_hue_angle() {
        assert_eq!(hue_angle(90.0), std::f64::consts::FRAC_PI_2);
        assert_eq!(hue_angle(400.0), std::f64::consts::PI);
        assert_eq!(hue_angle(-180.0), -std::f64::consts::PI);
    }

    #[test]
    fn test_hue_preserves_gray() {
        let m = adjust_hue(&ID, 120.0);
        let out = m.transform([100.0, 100.0, 100.0, 255.0]);
        for channel in &out[..3] {
            assert!((channel - 100.0).abs() < 0.5, "gray drifted to {}", channel);
        }
        assert_eq!(out[3], 255.0);
    }

    #[test]
    fn test_hue_half_turn_shifts_red() {
        let m = adjust_hue(&ID, 180.0);
        let out = m.transform([255.0, 0.0, 0.0, 255.0]);
        assert!(out[0] < out[1] && out[0] < out[2], "red should move to cyan");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: rotating by h and then by -h is (approximately) the identity.
        #[test]
        fn prop_hue_round_trip(hue in -180.0f32..=180.0) {
            let there = adjust_hue(&ColorMatrix::IDENTITY, hue);
            let back = adjust_hue(&there, -hue);
            prop_assert!(
                back.approx_eq(&ColorMatrix::IDENTITY, 5e-3),
                "round trip for {} gave {:?}",
                hue,
                back
            );
        }

        /// Property: full desaturation makes R, G and B outputs equal.
        #[test]
        fn prop_full_desaturation_is_gray(
            r in 0.0f32..=255.0,
            g in 0.0f32..=255.0,
            b in 0.0f32..=255.0,
            contrast in -100.0f32..=100.0,
        ) {
            let base = adjust_contrast(&ColorMatrix::IDENTITY, contrast);
            let m = adjust_saturation(&base, -100.0);
            let out = m.transform([r, g, b, 255.0]);
            prop_assert!((out[0] - out[1]).abs() < 1e-2);
            prop_assert!((out[1] - out[2]).abs() < 1e-2);
        }

        /// Property: the contrast factor never decreases as contrast grows.
        #[test]
        fn prop_contrast_factor_monotonic(a in -100.0f32..=100.0, b in -100.0f32..=100.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(contrast_factor(lo) <= contrast_factor(hi));
        }
    }
}
