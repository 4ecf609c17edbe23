//! Crop rasterization.
//!
//! The export uses inverse mapping: for each output pixel, the center of the
//! pixel is mapped back into source coordinates and the source is sampled
//! there. Pixels whose sample falls outside the source show the background.
//!
//! The forward transform from source pixels to output pixels is:
//! ```text
//! rotate -> mirror/scale -> source-to-layout -> translate(position - target)
//!        -> scale(output / target)
//! ```

use crate::buffer::{PixelBuffer, Rgba, CHANNELS};
use crate::config::SamplingFilter;

use super::affine::Affine2;
use super::geometry::{CropGeometry, Point, Size};
use super::session::ImageTransform;

/// Transform from source pixel coordinates to output pixel coordinates.
///
/// # Arguments
///
/// * `geometry` - Target rectangle and output size
/// * `position` - Screen position of the source's top-left corner
/// * `layout` - Baseline on-screen size of the whole source
/// * `source` - Source size in pixels
/// * `transform` - Current rotation and signed scale
pub fn sampling_transform(
    geometry: &CropGeometry,
    position: Point,
    layout: Size,
    source: Size,
    transform: &ImageTransform,
) -> Affine2 {
    let target = geometry.target_rect;
    let kx = geometry.output_width as f32 / target.width();
    let ky = geometry.output_height as f32 / target.height();

    Affine2::rotate(transform.rotation.degrees() as f32)
        .then(&Affine2::scale(transform.scale_x, transform.scale_y))
        .then(&Affine2::scale(
            layout.width / source.width,
            layout.height / source.height,
        ))
        .then(&Affine2::translate(
            position.x - target.left,
            position.y - target.top,
        ))
        .then(&Affine2::scale(kx, ky))
}

/// Render `source` through `transform` into a `width` x `height` buffer.
///
/// Samples are composited over `background` with straight-alpha source-over.
/// A singular transform renders the background alone.
pub fn render_crop(
    source: &PixelBuffer,
    transform: &Affine2,
    width: u32,
    height: u32,
    background: Rgba,
    filter: SamplingFilter,
) -> PixelBuffer {
    let mut output = PixelBuffer::filled(width, height, background);
    let Some(inverse) = transform.invert() else {
        return output;
    };

    for (index, chunk) in output.pixels.chunks_exact_mut(CHANNELS).enumerate() {
        let x = (index % width as usize) as f32 + 0.5;
        let y = (index / width as usize) as f32 + 0.5;
        let p = inverse.map_point(Point::new(x, y));

        let sample = match filter {
            SamplingFilter::Nearest => sample_nearest(source, p.x, p.y),
            SamplingFilter::Bilinear => sample_bilinear(source, p.x, p.y),
        };
        if let Some(pixel) = sample {
            chunk.copy_from_slice(&source_over(pixel, background));
        }
    }
    output
}

#[inline]
fn get_pixel_f32(image: &PixelBuffer, px: usize, py: usize) -> [f32; 4] {
    let idx = (py * image.width as usize + px) * CHANNELS;
    [
        image.pixels[idx] as f32,
        image.pixels[idx + 1] as f32,
        image.pixels[idx + 2] as f32,
        image.pixels[idx + 3] as f32,
    ]
}

fn contains(image: &PixelBuffer, x: f32, y: f32) -> bool {
    x >= 0.0 && y >= 0.0 && x < image.width as f32 && y < image.height as f32
}

/// The source pixel covering `(x, y)`, or `None` outside the image.
fn sample_nearest(image: &PixelBuffer, x: f32, y: f32) -> Option<[f32; 4]> {
    if !contains(image, x, y) {
        return None;
    }
    let px = (x.floor() as usize).min(image.width as usize - 1);
    let py = (y.floor() as usize).min(image.height as usize - 1);
    Some(get_pixel_f32(image, px, py))
}

/// Bilinear interpolation between the four pixel centers around `(x, y)`.
///
/// Neighbors past the edge are clamped to the edge pixel.
fn sample_bilinear(image: &PixelBuffer, x: f32, y: f32) -> Option<[f32; 4]> {
    if !contains(image, x, y) {
        return None;
    }
    let (max_x, max_y) = (image.width as f32 - 1.0, image.height as f32 - 1.0);
    let cx = (x - 0.5).clamp(0.0, max_x);
    let cy = (y - 0.5).clamp(0.0, max_y);

    let x0 = cx.floor() as usize;
    let y0 = cy.floor() as usize;
    let x1 = (x0 + 1).min(image.width as usize - 1);
    let y1 = (y0 + 1).min(image.height as usize - 1);

    // Fractional distances
    let fx = cx - x0 as f32;
    let fy = cy - y0 as f32;

    let p00 = get_pixel_f32(image, x0, y0);
    let p10 = get_pixel_f32(image, x1, y0);
    let p01 = get_pixel_f32(image, x0, y1);
    let p11 = get_pixel_f32(image, x1, y1);

    let mut result = [0.0; 4];
    for i in 0..CHANNELS {
        result[i] = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
    }
    Some(result)
}

/// Composite a straight-alpha sample over `background`.
fn source_over(pixel: [f32; 4], background: Rgba) -> [u8; 4] {
    let a = pixel[3] / 255.0;
    let [br, bg, bb, ba] = background.0.map(f32::from);
    let back_a = ba / 255.0;
    let out_a = a + back_a * (1.0 - a);
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }

    let blend = |src: f32, dst: f32| {
        let v = (src * a + dst * back_a * (1.0 - a)) / out_a;
        v.clamp(0.0, 255.0).round() as u8
    };
    [
        blend(pixel[0], br),
        blend(pixel[1], bg),
        blend(pixel[2], bb),
        (out_a * 255.0).clamp(0.0, 255.0).round() as u8,
    ]
}
