//! Error types shared by the color and crop engines.
//!
//! Out-of-range numbers are never errors: every parameter is clamped into its
//! valid range before use. The variants here only cover caller misuse, which
//! should surface immediately instead of being silently recovered.

use thiserror::Error;

/// Errors reported by engine operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A numeric input is NaN, infinite, or outside the domain of the
    /// operation (a non-positive scale or size).
    #[error("Invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f32 },

    /// A crop operation was invoked before an image was loaded.
    #[error("Crop session is not initialized: {operation} requires a loaded image")]
    UninitializedSession { operation: &'static str },

    /// Pixel data length doesn't match the declared dimensions.
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Reject NaN and infinities for a named numeric input.
pub(crate) fn ensure_finite(name: &'static str, value: f32) -> Result<f32, EngineError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("hue", 12.5), Ok(12.5));
        assert!(matches!(
            ensure_finite("hue", f32::NAN),
            Err(EngineError::InvalidParameter { name: "hue", .. })
        ));
        assert!(ensure_finite("scale", f32::INFINITY).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = EngineError::UninitializedSession { operation: "fit" };
        assert_eq!(
            err.to_string(),
            "Crop session is not initialized: fit requires a loaded image"
        );

        let err = EngineError::InvalidDimensions {
            width: 0,
            height: 10,
        };
        assert_eq!(
            err.to_string(),
            "Invalid dimensions: width (0) and height (10) must be non-zero"
        );
    }
}
