//! Error types for color parsing, rasterization and export.

use std::io;

use thiserror::Error;

use crate::geometry::SizePx;

/// Message shown to the user when an export cannot be completed.
pub const EXPORT_FAILURE_MESSAGE: &str = "Failed to generate image. Please try again.";

/// Result type alias for export operations
pub type ExportResult<T> = std::result::Result<T, ExportError>;

/// A color string could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),
}

/// Errors raised while turning a composition into pixels.
#[derive(Error, Debug)]
pub enum RasterError {
    /// The generated SVG document could not be parsed
    #[error("failed to parse composition SVG: {0}")]
    InvalidSvg(String),

    /// No pixel surface could be allocated for the requested size
    #[error("no render surface available for {0}")]
    SurfaceUnavailable(SizePx),

    /// The rasterization backend reported a fault
    #[error("rasterizer failed: {0}")]
    Backend(String),
}

/// Errors that abort an export.
///
/// Every variant leaves the configuration and preview untouched; callers
/// surface [`ExportError::user_message`] and let the user try again.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("rasterization failed: {0}")]
    Raster(#[from] RasterError),

    /// The rasterizer produced an image of the wrong size
    #[error("rasterizer returned {actual}, expected {expected}")]
    DimensionMismatch { expected: SizePx, actual: SizePx },

    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("failed to deliver {filename}: {source}")]
    Delivery {
        filename: String,
        #[source]
        source: io::Error,
    },
}

impl ExportError {
    /// The notification text shown to the user.
    pub fn user_message(&self) -> &'static str {
        EXPORT_FAILURE_MESSAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raster_errors_convert_into_export_errors() {
        let err: ExportError = RasterError::SurfaceUnavailable(SizePx::new(0, 10)).into();
        assert!(matches!(err, ExportError::Raster(_)));
        assert_eq!(
            err.to_string(),
            "rasterization failed: no render surface available for 0x10"
        );
        assert_eq!(err.user_message(), EXPORT_FAILURE_MESSAGE);
    }

    #[test]
    fn dimension_mismatch_message() {
        let err = ExportError::DimensionMismatch {
            expected: SizePx::new(2160, 2160),
            actual: SizePx::new(1080, 1080),
        };
        assert_eq!(
            err.to_string(),
            "rasterizer returned 1080x1080, expected 2160x2160"
        );
    }
}
