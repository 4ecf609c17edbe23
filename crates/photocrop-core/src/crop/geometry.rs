//! Crop window geometry: where the fixed-aspect target rectangle sits inside
//! the host's viewport.

use serde::{Deserialize, Serialize};

use crate::config::CropConfig;
use crate::error::{ensure_finite, EngineError};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle given by its edges.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle of `size` centered on `center`.
    pub fn centered(center: Point, size: Size) -> Self {
        let left = center.x - size.width / 2.0;
        let top = center.y - size.height / 2.0;
        Self::new(left, top, left + size.width, top + size.height)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Shrink every edge by `amount`.
    pub fn inset(&self, amount: f32) -> Self {
        Self::new(
            self.left + amount,
            self.top + amount,
            self.right - amount,
            self.bottom - amount,
        )
    }
}

/// Largest crop size of the given aspect ratio that fits the container.
///
/// Starts from `margin` of the limiting dimension (height for landscape or
/// square containers, width for portrait ones) and halves until the other
/// dimension fits too. The result is rounded to whole pixels.
///
/// `margin` is capped at 1 so the first guess never exceeds the container.
pub fn best_crop_size(container: Size, aspect_ratio: f32, margin: f32) -> Size {
    let margin = margin.min(1.0);
    if container.width >= container.height {
        let mut height = container.height * margin;
        let mut width = height * aspect_ratio;
        while width >= container.width {
            height /= 2.0;
            width = height * aspect_ratio;
        }
        Size::new(width.round(), height.round())
    } else {
        let mut width = container.width * margin;
        let mut height = width / aspect_ratio;
        while height >= container.height {
            width /= 2.0;
            height = width / aspect_ratio;
        }
        Size::new(width.round(), height.round())
    }
}

/// Fixed geometry of a crop session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropGeometry {
    /// Viewport the image is displayed in.
    pub container: Size,
    /// The crop window in container coordinates.
    pub target_rect: Rect,
    /// Exported pixel width.
    pub output_width: u32,
    /// Exported pixel height.
    pub output_height: u32,
}

impl CropGeometry {
    /// Lay out a crop window matching the output aspect ratio in `container`.
    ///
    /// The frame (target plus border stroke) is centered on whole pixels and
    /// the target rectangle is the frame inset by half the stroke.
    pub fn initialize(
        container: Size,
        output_width: u32,
        output_height: u32,
        config: &CropConfig,
    ) -> Result<Self, EngineError> {
        if output_width == 0 || output_height == 0 {
            return Err(EngineError::InvalidDimensions {
                width: output_width,
                height: output_height,
            });
        }
        ensure_positive("container_width", container.width)?;
        ensure_positive("container_height", container.height)?;
        let margin = ensure_positive("margin_factor", config.margin_factor)?;
        if margin > 1.0 {
            return Err(EngineError::InvalidParameter {
                name: "margin_factor",
                value: margin,
            });
        }

        let aspect_ratio = output_width as f32 / output_height as f32;
        let crop = best_crop_size(container, aspect_ratio, config.margin_factor);

        let border = config.border_width;
        let frame_width = crop.width + border;
        let frame_height = crop.height + border;
        let left = ((container.width - frame_width) / 2.0).round();
        let top = ((container.height - frame_height) / 2.0).round();
        let frame = Rect::new(left, top, left + frame_width, top + frame_height);

        Ok(Self {
            container,
            target_rect: frame.inset(border / 2.0),
            output_width,
            output_height,
        })
    }

    /// Use an explicit target rectangle.
    pub fn with_target(
        container: Size,
        target_rect: Rect,
        output_width: u32,
        output_height: u32,
    ) -> Result<Self, EngineError> {
        if output_width == 0 || output_height == 0 {
            return Err(EngineError::InvalidDimensions {
                width: output_width,
                height: output_height,
            });
        }
        ensure_positive("target_width", target_rect.width())?;
        ensure_positive("target_height", target_rect.height())?;
        Ok(Self {
            container,
            target_rect,
            output_width,
            output_height,
        })
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.output_width as f32 / self.output_height as f32
    }
}

fn ensure_positive(name: &'static str, value: f32) -> Result<f32, EngineError> {
    let value = ensure_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(EngineError::InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_crop_size_landscape_container() {
        // 70% of the height, square aspect fits directly
        let size = best_crop_size(Size::new(1000.0, 500.0), 1.0, 0.7);
        assert_eq!(size, Size::new(350.0, 350.0));
    }

    #[test]
    fn test_best_crop_size_halves_until_fit() {
        // 0.7 * 500 = 350 high -> 1400 wide: too wide, halve to 175 x 700
        let size = best_crop_size(Size::new(1000.0, 500.0), 4.0, 0.7);
        assert_eq!(size, Size::new(700.0, 175.0));
    }

    #[test]
    fn test_best_crop_size_portrait_container() {
        // 0.7 * 400 = 280 wide, 2:1 -> 140 high
        let size = best_crop_size(Size::new(400.0, 800.0), 2.0, 0.7);
        assert_eq!(size, Size::new(280.0, 140.0));

        // Tall aspect: 280 wide -> 1120 high is too tall, halve to 140 x 560
        let size = best_crop_size(Size::new(400.0, 800.0), 0.25, 0.7);
        assert_eq!(size, Size::new(140.0, 560.0));
    }

    #[test]
    fn test_initialize_centers_target() {
        let geometry =
            CropGeometry::initialize(Size::new(1000.0, 500.0), 1080, 1080, &CropConfig::default())
                .unwrap();
        let target = geometry.target_rect;
        assert_eq!(target.width(), 350.0);
        assert_eq!(target.height(), 350.0);
        // Frame 355 wide: left = round(322.5) = 323, inset 2.5
        assert_eq!(target.left, 325.5);
        assert_eq!(target.top, 75.5);
        assert_eq!(geometry.aspect_ratio(), 1.0);
    }

    #[test]
    fn test_initialize_rejects_bad_input() {
        let config = CropConfig::default();
        assert!(matches!(
            CropGeometry::initialize(Size::new(100.0, 100.0), 0, 10, &config),
            Err(EngineError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            CropGeometry::initialize(Size::new(0.0, 100.0), 10, 10, &config),
            Err(EngineError::InvalidParameter {
                name: "container_width",
                ..
            })
        ));
        assert!(CropGeometry::initialize(Size::new(f32::NAN, 100.0), 10, 10, &config).is_err());
    }

    #[test]
    fn test_initialize_rejects_margin_above_one() {
        let config = CropConfig {
            margin_factor: 1e38,
            ..CropConfig::default()
        };
        assert_eq!(
            CropGeometry::initialize(Size::new(1000.0, 500.0), 10, 10, &config),
            Err(EngineError::InvalidParameter {
                name: "margin_factor",
                value: 1e38
            })
        );

        let full = CropConfig {
            margin_factor: 1.0,
            ..CropConfig::default()
        };
        let geometry = CropGeometry::initialize(Size::new(1000.0, 500.0), 10, 10, &full).unwrap();
        assert_eq!(geometry.target_rect.width(), 500.0);
    }

    #[test]
    fn test_best_crop_size_caps_margin() {
        let size = best_crop_size(Size::new(1000.0, 500.0), 1.0, 1e38);
        assert_eq!(size, Size::new(500.0, 500.0));
    }

    #[test]
    fn test_rect_helpers() {
        let rect = Rect::centered(Point::new(20.0, 20.0), Size::new(80.0, 40.0));
        assert_eq!(rect, Rect::new(-20.0, 0.0, 60.0, 40.0));
        assert_eq!(rect.center(), Point::new(20.0, 20.0));
        assert_eq!(rect.inset(5.0).size(), Size::new(70.0, 30.0));
    }
}
