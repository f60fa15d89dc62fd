//! On-screen preview scaling.
//!
//! The preview shows the full-resolution composition shrunk (or grown) by a
//! single uniform factor so it fits the preview viewport. The factor is for
//! display only; export never sees it.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::compose::Composition;
use crate::error::RasterError;
use crate::export::{RasterRequest, Rasterizer};
use crate::geometry::SizePx;

/// Bounds of the preview area in logical units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct PreviewViewport {
    pub max_width: f32,
    pub max_height: f32,
}

impl Default for PreviewViewport {
    fn default() -> Self {
        Self {
            max_width: 600.0,
            max_height: 400.0,
        }
    }
}

impl PreviewViewport {
    pub fn new(max_width: f32, max_height: f32) -> Self {
        Self {
            max_width,
            max_height,
        }
    }

    /// The largest uniform factor at which `size` fits this viewport.
    pub fn scale_for(&self, size: SizePx) -> f32 {
        (self.max_width / size.width as f32).min(self.max_height / size.height as f32)
    }

    /// The display transform for a composition of `size`.
    pub fn transform_for(&self, size: SizePx) -> PreviewTransform {
        PreviewTransform {
            scale: self.scale_for(size),
            native: size,
        }
    }
}

/// Uniform scale about the center of the composition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewTransform {
    pub scale: f32,
    /// Size of the unscaled composition.
    pub native: SizePx,
}

impl PreviewTransform {
    /// Size of the composition as displayed.
    pub fn displayed_size(&self) -> (f32, f32) {
        self.native.scaled(self.scale)
    }

    /// The center the scale is applied around, in native units.
    pub fn origin(&self) -> (f32, f32) {
        (
            self.native.width as f32 / 2.0,
            self.native.height as f32 / 2.0,
        )
    }

    /// CSS `transform` value for frontends that scale a native-size element.
    pub fn to_css(&self) -> String {
        format!("scale({})", self.scale)
    }

    /// Pixel size of a preview raster: the displayed size rounded to whole
    /// pixels, never smaller than one pixel.
    pub fn raster_size(&self) -> SizePx {
        let (width, height) = self.displayed_size();
        SizePx::new(
            (width.round() as u32).max(1),
            (height.round() as u32).max(1),
        )
    }
}

/// Rasterizes the preview of `composition` for `viewport`.
pub fn render_preview<R: Rasterizer + ?Sized>(
    rasterizer: &R,
    composition: &Composition,
    viewport: &PreviewViewport,
) -> Result<RgbaImage, RasterError> {
    let transform = viewport.transform_for(composition.size);
    let request = RasterRequest::scaled(composition.size, transform.scale, transform.raster_size());
    rasterizer.rasterize(composition, &request)
}
