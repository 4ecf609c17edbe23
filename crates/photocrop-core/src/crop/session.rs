//! Interactive crop session.
//!
//! A session owns the source image and the transform of its on-screen copy
//! relative to the fixed target rectangle.
//!
//! # State Machine
//!
//! ```text
//! Uninitialized -> ImageLoaded -> Interacting <-> Exported
//! ```
//!
//! Gestures and discrete actions may arrive in any number before and after an
//! export; exporting never ends the session.
//!
//! # Gesture Model
//!
//! The displayed image has a fixed layout rectangle computed on load (the
//! baseline). Gestures accumulate into a separate affine matrix; after every
//! event that matrix is applied to the untouched baseline rectangle and the
//! new translation is read off the mapped center. Transformed coordinates are
//! never fed back into the next event, so long gestures do not drift.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::config::CropConfig;
use crate::error::{ensure_finite, EngineError};

use super::affine::Affine2;
use super::export::{render_crop, sampling_transform};
use super::geometry::{CropGeometry, Point, Rect, Size};

/// Lifecycle of a crop session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Uninitialized,
    ImageLoaded,
    Interacting,
    Exported,
}

/// Quarter-turn rotation of the displayed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

/// Direction of a quarter-turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotateDirection {
    /// Clockwise on screen (+90 degrees).
    Forward,
    /// Counter-clockwise on screen (-90 degrees).
    Backward,
}

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Build from any multiple of 90 degrees, wrapping into 0..360.
    pub fn from_degrees(degrees: i32) -> Option<Rotation> {
        match degrees.rem_euclid(360) {
            0 => Some(Rotation::Deg0),
            90 => Some(Rotation::Deg90),
            180 => Some(Rotation::Deg180),
            270 => Some(Rotation::Deg270),
            _ => None,
        }
    }

    pub fn rotated(self, direction: RotateDirection) -> Rotation {
        let delta = match direction {
            RotateDirection::Forward => 90,
            RotateDirection::Backward => -90,
        };
        // Always a multiple of 90 after wrapping.
        Rotation::from_degrees(self.degrees() as i32 + delta).unwrap_or_default()
    }

    /// Returns true if this rotation swaps width and height on screen.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// Transform of the displayed image, relative to its baseline layout.
///
/// The cover-fit scale chosen on load is carried by the whole-pixel layout
/// rectangle, so right after loading `scale_x` and `scale_y` only hold the
/// small residual between the exact and rounded layout size (close to 1).
/// [`CropSession::effective_scale`] reports the full source-to-screen scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageTransform {
    /// Offset of the image center from the baseline center.
    pub translate_x: f32,
    pub translate_y: f32,
    /// Signed scale about the image center. A negative sign is a mirror.
    pub scale_x: f32,
    pub scale_y: f32,
    pub rotation: Rotation,
}

impl Default for ImageTransform {
    fn default() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: Rotation::Deg0,
        }
    }
}

impl ImageTransform {
    pub fn rotated(&self, direction: RotateDirection) -> Self {
        Self {
            rotation: self.rotation.rotated(direction),
            ..*self
        }
    }

    pub fn flipped_horizontal(&self) -> Self {
        Self {
            scale_x: -self.scale_x,
            ..*self
        }
    }

    pub fn flipped_vertical(&self) -> Self {
        Self {
            scale_y: -self.scale_y,
            ..*self
        }
    }

    pub fn is_flipped_horizontal(&self) -> bool {
        self.scale_x < 0.0
    }

    pub fn is_flipped_vertical(&self) -> bool {
        self.scale_y < 0.0
    }

    /// Multiply both scale magnitudes by `factor`, keep the mirror signs and
    /// floor each magnitude at `min_scale`.
    pub fn scaled(&self, factor: f32, min_scale: f32) -> Self {
        Self {
            scale_x: scale_keeping_sign(self.scale_x, factor, min_scale),
            scale_y: scale_keeping_sign(self.scale_y, factor, min_scale),
            ..*self
        }
    }
}

fn scale_keeping_sign(value: f32, factor: f32, min_scale: f32) -> f32 {
    let magnitude = (value.abs() * factor).max(min_scale);
    magnitude.copysign(value)
}

/// The loaded source and its baseline on-screen layout.
#[derive(Debug, Clone)]
struct LoadedImage {
    source: PixelBuffer,
    /// Layout rectangle in container coordinates, whole-pixel sized and
    /// centered on the target.
    layout: Rect,
}

/// An interactive crop session.
#[derive(Debug, Clone)]
pub struct CropSession {
    config: CropConfig,
    geometry: CropGeometry,
    state: SessionState,
    image: Option<LoadedImage>,
    transform: ImageTransform,
    /// Gesture matrix accumulated since the last baseline reset.
    gesture: Affine2,
}

impl CropSession {
    /// Start a session for `geometry` with no image loaded.
    pub fn new(geometry: CropGeometry, config: CropConfig) -> Self {
        Self {
            config,
            geometry,
            state: SessionState::Uninitialized,
            image: None,
            transform: ImageTransform::default(),
            gesture: Affine2::IDENTITY,
        }
    }

    /// Lay out a crop window in `container` and start a session.
    pub fn initialize(
        container: Size,
        output_width: u32,
        output_height: u32,
        config: CropConfig,
    ) -> Result<Self, EngineError> {
        let geometry = CropGeometry::initialize(container, output_width, output_height, &config)?;
        debug!(
            target_width = geometry.target_rect.width(),
            target_height = geometry.target_rect.height(),
            output_width,
            output_height,
            "crop session initialized"
        );
        Ok(Self::new(geometry, config))
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn geometry(&self) -> &CropGeometry {
        &self.geometry
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    pub fn transform(&self) -> &ImageTransform {
        &self.transform
    }

    pub fn source(&self) -> Option<&PixelBuffer> {
        self.image.as_ref().map(|image| &image.source)
    }

    /// Source-to-screen scale magnitudes: the layout scale times the current
    /// view scale. This is the cover-fit scale right after load.
    pub fn effective_scale(&self) -> Option<(f32, f32)> {
        let image = self.image.as_ref()?;
        let t = &self.transform;
        Some((
            t.scale_x.abs() * image.layout.width() / image.source.width as f32,
            t.scale_y.abs() * image.layout.height() / image.source.height as f32,
        ))
    }

    /// Baseline layout rectangle of the displayed image.
    pub fn layout_rect(&self) -> Option<Rect> {
        self.image.as_ref().map(|image| image.layout)
    }

    /// Load a decoded source image and apply the cover-fit baseline.
    ///
    /// The image is scaled by `max(target.w / source.w, target.h / source.h)`
    /// so it covers the target rectangle, and centered on it.
    pub fn load_image(&mut self, source: PixelBuffer) -> Result<&ImageTransform, EngineError> {
        source.validate()?;

        let target = self.geometry.target_rect;
        let (src_w, src_h) = (source.width as f32, source.height as f32);
        let scale = (target.width() / src_w).max(target.height() / src_h);

        let layout_w = (src_w * scale).round().max(1.0);
        let layout_h = (src_h * scale).round().max(1.0);
        let layout = Rect::centered(target.center(), Size::new(layout_w, layout_h));

        self.transform = ImageTransform {
            scale_x: src_w * scale / layout_w,
            scale_y: src_h * scale / layout_h,
            ..ImageTransform::default()
        };
        self.gesture = Affine2::IDENTITY;
        self.image = Some(LoadedImage { source, layout });
        self.state = SessionState::ImageLoaded;

        debug!(
            source_width = src_w,
            source_height = src_h,
            scale,
            "crop image loaded"
        );
        Ok(&self.transform)
    }

    /// Drag the image by `(dx, dy)` container pixels. No bounds clamping.
    pub fn apply_pan(&mut self, dx: f32, dy: f32) -> Result<&ImageTransform, EngineError> {
        self.apply_gesture(1.0, dx, dy, Point::default())
    }

    /// Scale the image by `scale_delta` about `center`.
    pub fn apply_pinch(
        &mut self,
        scale_delta: f32,
        center: Point,
    ) -> Result<&ImageTransform, EngineError> {
        self.apply_gesture(scale_delta, 0.0, 0.0, center)
    }

    /// One combined gesture event: translate by `(dx, dy)`, then scale by
    /// `scale_delta` about `center`.
    ///
    /// The step is appended to the gesture matrix, which is then re-applied to
    /// the baseline layout to find the new translation. The scale magnitude is
    /// floored at the configured minimum and mirror signs are kept.
    pub fn apply_gesture(
        &mut self,
        scale_delta: f32,
        dx: f32,
        dy: f32,
        center: Point,
    ) -> Result<&ImageTransform, EngineError> {
        let scale_delta = ensure_finite("scale_delta", scale_delta)?;
        if scale_delta <= 0.0 {
            return Err(EngineError::InvalidParameter {
                name: "scale_delta",
                value: scale_delta,
            });
        }
        let dx = ensure_finite("dx", dx)?;
        let dy = ensure_finite("dy", dy)?;
        ensure_finite("center_x", center.x)?;
        ensure_finite("center_y", center.y)?;

        let layout = self.require_image("apply_gesture")?.layout;

        let mut step = Affine2::translate(dx, dy);
        if scale_delta != 1.0 {
            step = step.then(&Affine2::scale_about(scale_delta, scale_delta, center));
        }
        self.gesture = self.gesture.then(&step);

        let mapped = self.gesture.map_rect(&layout);
        let (moved, origin) = (mapped.center(), layout.center());
        let mut next = self.transform;
        if scale_delta != 1.0 {
            next = next.scaled(scale_delta, self.config.min_scale);
        }
        next.translate_x = moved.x - origin.x;
        next.translate_y = moved.y - origin.y;

        self.transform = next;
        self.state = SessionState::Interacting;
        Ok(&self.transform)
    }

    /// Rotate by a quarter turn.
    pub fn rotate(&mut self, direction: RotateDirection) -> Result<&ImageTransform, EngineError> {
        self.require_image("rotate")?;
        self.transform = self.transform.rotated(direction);
        self.state = SessionState::Interacting;
        debug!(degrees = self.transform.rotation.degrees(), "crop image rotated");
        Ok(&self.transform)
    }

    pub fn flip_horizontal(&mut self) -> Result<&ImageTransform, EngineError> {
        self.require_image("flip_horizontal")?;
        self.transform = self.transform.flipped_horizontal();
        self.state = SessionState::Interacting;
        Ok(&self.transform)
    }

    pub fn flip_vertical(&mut self) -> Result<&ImageTransform, EngineError> {
        self.require_image("flip_vertical")?;
        self.transform = self.transform.flipped_vertical();
        self.state = SessionState::Interacting;
        Ok(&self.transform)
    }

    /// Cover-fit the image to the target again, honoring the current rotation.
    ///
    /// At 90 and 270 degrees the layout width is compared against the target
    /// height and vice versa. Translation is cleared, mirror signs are kept and
    /// the gesture matrix starts over from this baseline.
    pub fn fit(&mut self) -> Result<&ImageTransform, EngineError> {
        let layout = self.require_image("fit")?.layout;
        let target = self.geometry.target_rect;

        let scale = if self.transform.rotation.swaps_dimensions() {
            (target.width() / layout.height()).max(target.height() / layout.width())
        } else {
            (target.width() / layout.width()).max(target.height() / layout.height())
        };

        self.transform = ImageTransform {
            translate_x: 0.0,
            translate_y: 0.0,
            scale_x: scale.copysign(self.transform.scale_x),
            scale_y: scale.copysign(self.transform.scale_y),
            rotation: self.transform.rotation,
        };
        self.gesture = Affine2::IDENTITY;
        self.state = SessionState::Interacting;
        debug!(scale, "crop image fitted");
        Ok(&self.transform)
    }

    /// Top-left corner of the source image on screen, after scaling and
    /// rotating about the image center.
    pub fn image_position(&self) -> Option<Point> {
        let layout = self.image.as_ref()?.layout;
        let t = &self.transform;
        let corner = Point::new(layout.left + t.translate_x, layout.top + t.translate_y);
        let pivot = Point::new(
            corner.x + layout.width() / 2.0,
            corner.y + layout.height() / 2.0,
        );
        let placement = Affine2::scale_about(t.scale_x, t.scale_y, pivot)
            .then(&Affine2::rotate_about(t.rotation.degrees() as f32, pivot));
        Some(placement.map_point(corner))
    }

    /// Transform from source pixel coordinates to container coordinates, for
    /// hosts that draw the interactive preview.
    pub fn display_transform(&self) -> Option<Affine2> {
        let image = self.image.as_ref()?;
        let position = self.image_position()?;
        let t = &self.transform;
        Some(
            Affine2::rotate(t.rotation.degrees() as f32)
                .then(&Affine2::scale(t.scale_x, t.scale_y))
                .then(&Affine2::scale(
                    image.layout.width() / image.source.width as f32,
                    image.layout.height() / image.source.height as f32,
                ))
                .then(&Affine2::translate(position.x, position.y)),
        )
    }

    /// Transform from source pixel coordinates to output pixel coordinates.
    pub fn export_transform(&self) -> Option<Affine2> {
        let image = self.image.as_ref()?;
        let position = self.image_position()?;
        Some(sampling_transform(
            &self.geometry,
            position,
            image.layout.size(),
            Size::new(image.source.width as f32, image.source.height as f32),
            &self.transform,
        ))
    }

    /// Rasterize the crop at the geometry's output size.
    ///
    /// With no image loaded this is a blank canvas in the configured empty
    /// background color.
    pub fn export(&mut self) -> PixelBuffer {
        let (width, height) = (self.geometry.output_width, self.geometry.output_height);
        let output = match (self.image.as_ref(), self.export_transform()) {
            (Some(image), Some(transform)) => {
                let output = render_crop(
                    &image.source,
                    &transform,
                    width,
                    height,
                    self.config.background,
                    self.config.filter,
                );
                self.state = SessionState::Exported;
                output
            }
            _ => PixelBuffer::filled(width, height, self.config.empty_background),
        };
        debug!(width, height, state = ?self.state, "crop exported");
        output
    }

    fn require_image(&self, operation: &'static str) -> Result<&LoadedImage, EngineError> {
        self.image
            .as_ref()
            .ok_or(EngineError::UninitializedSession { operation })
    }
}
