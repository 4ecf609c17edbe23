//! The 4x5 affine color matrix value type.
//!
//! # Layout
//!
//! Twenty coefficients in row-major order. Rows produce R, G, B, A; columns
//! weight the input R, G, B, A and the last column is an additive bias:
//!
//! ```text
//! R' = m[0]*R  + m[1]*G  + m[2]*B  + m[3]*A  + m[4]
//! G' = m[5]*R  + m[6]*G  + m[7]*B  + m[8]*A  + m[9]
//! B' = m[10]*R + m[11]*G + m[12]*B + m[13]*A + m[14]
//! A' = m[15]*R + m[16]*G + m[17]*B + m[18]*A + m[19]
//! ```
//!
//! Channels are in the 0..=255 range and the bias is expressed in the same
//! units.

use serde::{Deserialize, Serialize};

/// An immutable 4x5 color transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorMatrix {
    values: [f32; 20],
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ColorMatrix {
    /// The transform that leaves every pixel unchanged.
    pub const IDENTITY: ColorMatrix = ColorMatrix {
        values: [
            1.0, 0.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0, 0.0,
        ],
    };

    /// Create a matrix from row-major coefficients.
    pub const fn new(values: [f32; 20]) -> Self {
        Self { values }
    }

    /// Row-major coefficients.
    pub fn values(&self) -> &[f32; 20] {
        &self.values
    }

    /// Coefficient at `row` (0..4) and `column` (0..5).
    #[inline]
    pub fn get(&self, row: usize, column: usize) -> f32 {
        self.values[row * 5 + column]
    }

    /// One output row: four input weights followed by the bias.
    #[inline]
    pub fn row(&self, row: usize) -> [f32; 5] {
        let start = row * 5;
        let mut out = [0.0; 5];
        out.copy_from_slice(&self.values[start..start + 5]);
        out
    }

    /// Matrix product `self * other`.
    ///
    /// Applying the result to a pixel is the same as applying `other` first and
    /// then `self`. Both matrices are treated as 5x5 with an implicit
    /// `[0, 0, 0, 0, 1]` last row.
    pub fn compose(&self, other: &ColorMatrix) -> ColorMatrix {
        let a = self;
        let b = other;
        let mut values = [0.0f32; 20];
        for row in 0..4 {
            for column in 0..5 {
                let mut v = a.get(row, 0) * b.get(0, column)
                    + a.get(row, 1) * b.get(1, column)
                    + a.get(row, 2) * b.get(2, column)
                    + a.get(row, 3) * b.get(3, column);
                if column == 4 {
                    v += a.get(row, 4);
                }
                values[row * 5 + column] = v;
            }
        }
        ColorMatrix { values }
    }

    /// Append `step` so that it runs after everything already in `self`.
    #[inline]
    pub fn then(&self, step: &ColorMatrix) -> ColorMatrix {
        step.compose(self)
    }

    /// Map an (R, G, B, A) tuple through the transform without clamping.
    pub fn transform(&self, rgba: [f32; 4]) -> [f32; 4] {
        let mut out = [0.0f32; 4];
        for (row, slot) in out.iter_mut().enumerate() {
            let m = self.row(row);
            *slot = rgba[0] * m[0] + rgba[1] * m[1] + rgba[2] * m[2] + rgba[3] * m[3] + m[4];
        }
        out
    }

    /// Check whether every coefficient is within `tolerance` of `other`.
    pub fn approx_eq(&self, other: &ColorMatrix, tolerance: f32) -> bool {
        self.values
            .iter()
            .zip(other.values.iter())
            .all(|(a, b)| (a - b).abs() <= tolerance)
    }

    /// Check whether this is (numerically) the identity transform.
    pub fn is_identity(&self) -> bool {
        self.approx_eq(&Self::IDENTITY, 1e-6)
    }
}
