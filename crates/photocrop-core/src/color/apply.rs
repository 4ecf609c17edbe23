//! Per-pixel application of a color matrix.

use crate::buffer::{PixelBuffer, CHANNELS};

use super::matrix::ColorMatrix;

/// Apply `matrix` to RGBA pixel data in place.
///
/// # Arguments
/// * `pixels` - RGBA pixel data (4 bytes per pixel, straight alpha)
/// * `matrix` - The transform to apply
///
/// Each output channel is rounded and clamped to 0..=255. Trailing bytes that
/// don't form a complete pixel are left untouched.
pub fn apply_color_matrix_in_place(pixels: &mut [u8], matrix: &ColorMatrix) {
    // Early exit if nothing changes
    if matrix.is_identity() {
        return;
    }

    let rows = [matrix.row(0), matrix.row(1), matrix.row(2), matrix.row(3)];
    for chunk in pixels.chunks_exact_mut(CHANNELS) {
        let r = chunk[0] as f32;
        let g = chunk[1] as f32;
        let b = chunk[2] as f32;
        let a = chunk[3] as f32;
        for (slot, m) in chunk.iter_mut().zip(rows.iter()) {
            let v = r * m[0] + g * m[1] + b * m[2] + a * m[3] + m[4];
            *slot = v.clamp(0.0, 255.0).round() as u8;
        }
    }
}

/// Apply `matrix` to a buffer, returning a new buffer of the same size.
pub fn apply_color_matrix(image: &PixelBuffer, matrix: &ColorMatrix) -> PixelBuffer {
    let mut pixels = image.pixels.clone();
    apply_color_matrix_in_place(&mut pixels, matrix);
    PixelBuffer {
        width: image.width,
        height: image.height,
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{build_matrix, ColorMode, ColorParameters, ColorPreset};

    fn apply(pixels: &[u8], matrix: &ColorMatrix) -> Vec<u8> {
        let mut result = pixels.to_vec();
        apply_color_matrix_in_place(&mut result, matrix);
        result
    }

    #[test]
    fn test_identity_leaves_pixels() {
        let pixels = vec![12, 34, 56, 78, 255, 0, 128, 255];
        assert_eq!(apply(&pixels, &ColorMatrix::IDENTITY), pixels);
    }

    #[test]
    fn test_clamps_to_channel_range() {
        let boost = ColorMatrix::new([
            2.0, 0.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, -300.0, //
            0.0, 0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0, 0.0,
        ]);
        assert_eq!(apply(&[200, 100, 50, 255], &boost), vec![255, 0, 50, 255]);
    }

    #[test]
    fn test_alpha_input_column() {
        let alpha_to_red = ColorMatrix::new([
            0.0, 0.0, 0.0, 1.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0, 0.0,
        ]);
        assert_eq!(apply(&[0, 1, 2, 77], &alpha_to_red), vec![77, 1, 2, 77]);
    }

    #[test]
    fn test_opacity_halves_alpha() {
        let params = ColorParameters::ORIGINAL.with_opacity(50.0).unwrap();
        let result = apply(&[10, 20, 30, 200], &build_matrix(&params));
        assert_eq!(result, vec![10, 20, 30, 100]);
    }

    #[test]
    fn test_brightness_full_white() {
        let params = ColorParameters::ORIGINAL.with_brightness(100.0).unwrap();
        let result = apply(&[10, 20, 30, 255], &build_matrix(&params));
        assert_eq!(result, vec![255, 255, 255, 255]);
    }

    #[test]
    fn test_desaturate_makes_gray() {
        let result = apply(&[255, 0, 0, 255, 0, 0, 255, 255], &ColorPreset::Desaturate.matrix());
        assert_eq!(result[0], result[1]);
        assert_eq!(result[1], result[2]);
        assert_eq!(result[4], result[5]);
        assert_eq!(result[5], result[6]);
        // 0.3086 * 255 ≈ 78.7
        assert_eq!(result[0], 79);
        // 0.0820 * 255 ≈ 20.9
        assert_eq!(result[4], 21);
    }

    #[test]
    fn test_fill_flat_color() {
        let params = ColorParameters::new(ColorMode::Fill, 240.0, 100.0, 100.0, 0.0, 100.0).unwrap();
        let result = apply(&[1, 2, 3, 255, 200, 100, 50, 255], &build_matrix(&params));
        assert_eq!(result, vec![0, 0, 255, 255, 0, 0, 255, 255]);
    }

    #[test]
    fn test_incomplete_pixel_ignored() {
        let mut pixels = vec![10, 10, 10, 255, 99];
        let params = ColorParameters::ORIGINAL.with_brightness(-100.0).unwrap();
        apply_color_matrix_in_place(&mut pixels, &build_matrix(&params));
        assert_eq!(pixels, vec![0, 0, 0, 255, 99]);
    }

    #[test]
    fn test_apply_color_matrix_does_not_modify_original() {
        let image = PixelBuffer::filled(2, 2, crate::buffer::Rgba([100, 100, 100, 255]));
        let params = ColorParameters::ORIGINAL.with_brightness(100.0).unwrap();
        let result = apply_color_matrix(&image, &build_matrix(&params));
        assert_eq!(image.pixel(0, 0), [100, 100, 100, 255]);
        assert_eq!(result.pixel(1, 1), [255, 255, 255, 255]);
        assert_eq!((result.width, result.height), (2, 2));
    }
}
