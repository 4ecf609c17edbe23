//! 2D affine transforms.
//!
//! Maps a point as:
//! ```text
//! x' = sx * x + kx * y + tx
//! y' = ky * x + sy * y + ty
//! ```
//!
//! Screen coordinates: origin top-left, y grows downwards, positive angles
//! rotate clockwise on screen.

use super::geometry::{Point, Rect};

/// An immutable 2D affine transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine2 {
    pub sx: f32,
    pub kx: f32,
    pub tx: f32,
    pub ky: f32,
    pub sy: f32,
    pub ty: f32,
}

impl Default for Affine2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine2 {
    pub const IDENTITY: Affine2 = Affine2 {
        sx: 1.0,
        kx: 0.0,
        tx: 0.0,
        ky: 0.0,
        sy: 1.0,
        ty: 0.0,
    };

    pub fn translate(dx: f32, dy: f32) -> Self {
        Self {
            tx: dx,
            ty: dy,
            ..Self::IDENTITY
        }
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self {
            sx,
            sy,
            ..Self::IDENTITY
        }
    }

    /// Scale about a fixed point.
    pub fn scale_about(sx: f32, sy: f32, pivot: Point) -> Self {
        Self {
            sx,
            sy,
            tx: pivot.x - sx * pivot.x,
            ty: pivot.y - sy * pivot.y,
            ..Self::IDENTITY
        }
    }

    /// Rotation about the origin. Multiples of 90 degrees are exact.
    pub fn rotate(degrees: f32) -> Self {
        let (sin, cos) = exact_sin_cos(degrees);
        Self {
            sx: cos,
            kx: -sin,
            tx: 0.0,
            ky: sin,
            sy: cos,
            ty: 0.0,
        }
    }

    /// Rotation about a fixed point.
    pub fn rotate_about(degrees: f32, pivot: Point) -> Self {
        Affine2::translate(-pivot.x, -pivot.y)
            .then(&Affine2::rotate(degrees))
            .then(&Affine2::translate(pivot.x, pivot.y))
    }

    /// Matrix product `self * other`: `other` is applied first.
    pub fn compose(&self, other: &Affine2) -> Affine2 {
        Affine2 {
            sx: self.sx * other.sx + self.kx * other.ky,
            kx: self.sx * other.kx + self.kx * other.sy,
            tx: self.sx * other.tx + self.kx * other.ty + self.tx,
            ky: self.ky * other.sx + self.sy * other.ky,
            sy: self.ky * other.kx + self.sy * other.sy,
            ty: self.ky * other.tx + self.sy * other.ty + self.ty,
        }
    }

    /// Append `step` so it is applied after `self`.
    #[inline]
    pub fn then(&self, step: &Affine2) -> Affine2 {
        step.compose(self)
    }

    pub fn map_point(&self, p: Point) -> Point {
        Point {
            x: self.sx * p.x + self.kx * p.y + self.tx,
            y: self.ky * p.x + self.sy * p.y + self.ty,
        }
    }

    /// Axis-aligned bounds of the mapped rectangle.
    pub fn map_rect(&self, rect: &Rect) -> Rect {
        let corners = [
            self.map_point(Point::new(rect.left, rect.top)),
            self.map_point(Point::new(rect.right, rect.top)),
            self.map_point(Point::new(rect.left, rect.bottom)),
            self.map_point(Point::new(rect.right, rect.bottom)),
        ];
        let mut out = Rect::new(corners[0].x, corners[0].y, corners[0].x, corners[0].y);
        for c in &corners[1..] {
            out.left = out.left.min(c.x);
            out.top = out.top.min(c.y);
            out.right = out.right.max(c.x);
            out.bottom = out.bottom.max(c.y);
        }
        out
    }

    pub fn determinant(&self) -> f32 {
        self.sx * self.sy - self.kx * self.ky
    }

    /// The inverse transform, or `None` when the matrix is singular.
    pub fn invert(&self) -> Option<Affine2> {
        // Invert in f64 so large canvases don't lose sub-pixel precision.
        let (a, b, c) = (self.sx as f64, self.kx as f64, self.tx as f64);
        let (d, e, f) = (self.ky as f64, self.sy as f64, self.ty as f64);
        let det = a * e - b * d;
        if det.abs() < 1e-12 || !det.is_finite() {
            return None;
        }
        let inv = 1.0 / det;
        Some(Affine2 {
            sx: (e * inv) as f32,
            kx: (-b * inv) as f32,
            tx: ((b * f - e * c) * inv) as f32,
            ky: (-d * inv) as f32,
            sy: (a * inv) as f32,
            ty: ((d * c - a * f) * inv) as f32,
        })
    }

    pub fn approx_eq(&self, other: &Affine2, tolerance: f32) -> bool {
        [
            self.sx - other.sx,
            self.kx - other.kx,
            self.tx - other.tx,
            self.ky - other.ky,
            self.sy - other.sy,
            self.ty - other.ty,
        ]
        .iter()
        .all(|d| d.abs() <= tolerance)
    }
}

/// Sine and cosine with exact values at multiples of 90 degrees.
fn exact_sin_cos(degrees: f32) -> (f32, f32) {
    let normalized = degrees.rem_euclid(360.0);
    if normalized == 0.0 {
        (0.0, 1.0)
    } else if normalized == 90.0 {
        (1.0, 0.0)
    } else if normalized == 180.0 {
        (0.0, -1.0)
    } else if normalized == 270.0 {
        (-1.0, 0.0)
    } else {
        let rad = (normalized as f64).to_radians();
        (rad.sin() as f32, rad.cos() as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_point(p: Point, x: f32, y: f32) {
        assert!(
            (p.x - x).abs() < 1e-4 && (p.y - y).abs() < 1e-4,
            "expected ({}, {}), got ({}, {})",
            x,
            y,
            p.x,
            p.y
        );
    }

    #[test]
    fn test_translate_then_scale() {
        let m = Affine2::translate(10.0, 0.0).then(&Affine2::scale(2.0, 2.0));
        assert_point(m.map_point(Point::new(1.0, 1.0)), 22.0, 2.0);

        let m = Affine2::scale(2.0, 2.0).then(&Affine2::translate(10.0, 0.0));
        assert_point(m.map_point(Point::new(1.0, 1.0)), 12.0, 2.0);
    }

    #[test]
    fn test_scale_about_keeps_pivot() {
        let pivot = Point::new(50.0, 30.0);
        let m = Affine2::scale_about(3.0, 3.0, pivot);
        assert_point(m.map_point(pivot), 50.0, 30.0);
        assert_point(m.map_point(Point::new(51.0, 30.0)), 53.0, 30.0);
    }

    #[test]
    fn test_rotate_90_is_clockwise_on_screen() {
        let m = Affine2::rotate(90.0);
        assert_eq!(m.map_point(Point::new(1.0, 0.0)), Point::new(0.0, 1.0));
        assert_eq!(m.map_point(Point::new(0.0, 1.0)), Point::new(-1.0, 0.0));
    }

    #[test]
    fn test_rotate_about() {
        let m = Affine2::rotate_about(180.0, Point::new(5.0, 5.0));
        assert_point(m.map_point(Point::new(0.0, 0.0)), 10.0, 10.0);
    }

    #[test]
    fn test_map_rect_bounds() {
        let rect = Rect::new(0.0, 0.0, 4.0, 2.0);
        let rotated = Affine2::rotate(90.0).map_rect(&rect);
        assert_eq!(rotated, Rect::new(-2.0, 0.0, 0.0, 4.0));
    }

    #[test]
    fn test_invert() {
        let m = Affine2::translate(3.0, -7.0)
            .then(&Affine2::scale(2.0, -0.5))
            .then(&Affine2::rotate(270.0));
        let inv = m.invert().unwrap();
        assert!(m.then(&inv).approx_eq(&Affine2::IDENTITY, 1e-5));
        let p = Point::new(12.5, -3.25);
        assert_point(inv.map_point(m.map_point(p)), 12.5, -3.25);
    }

    #[test]
    fn test_singular_has_no_inverse() {
        assert!(Affine2::scale(0.0, 1.0).invert().is_none());
    }
}
