//! Interactive crop engine.
//!
//! A [`CropGeometry`] fixes the crop window inside the host viewport, a
//! [`CropSession`] tracks pan, pinch, rotate and flip input against it, and
//! [`CropSession::export`] rasterizes the framed region at the output size.

pub mod affine;
pub mod export;
pub mod geometry;
pub mod session;

pub use affine::Affine2;
pub use export::{render_crop, sampling_transform};
pub use geometry::{best_crop_size, CropGeometry, Point, Rect, Size};
pub use session::{CropSession, ImageTransform, RotateDirection, Rotation, SessionState};
