//! Geometry primitives shared by the composer, layout and rasterizer.
//!
//! Integer pixel sizes describe canvases (size presets, raster outputs);
//! float rectangles describe positioned elements inside a canvas.

use std::fmt;

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true if width equals height.
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Multiplies both dimensions by an integer factor.
    pub fn times(&self, factor: u32) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }

    /// Returns the dimensions scaled by `scale` as floats.
    pub fn scaled(&self, scale: f32) -> (f32, f32) {
        (self.width as f32 * scale, self.height as f32 * scale)
    }
}

impl fmt::Display for SizePx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A rectangle in (possibly fractional) canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectF {
    /// X offset from the left edge of the canvas
    pub x: f32,
    /// Y offset from the top edge of the canvas
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectF {
    /// Creates a new rectangle with the given position and dimensions.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the right edge coordinate (x + width).
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge coordinate (y + height).
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Returns true if `other` lies entirely within this rectangle.
    pub fn contains(&self, other: &RectF) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_px_is_square() {
        assert!(SizePx::new(1080, 1080).is_square());
        assert!(!SizePx::new(1080, 1920).is_square());
    }

    #[test]
    fn size_px_times() {
        assert_eq!(SizePx::new(970, 250).times(2), SizePx::new(1940, 500));
    }

    #[test]
    fn rect_edges_and_center() {
        let rect = RectF::new(10.0, 20.0, 100.0, 200.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.bottom(), 220.0);
        assert_eq!(rect.center_x(), 60.0);
        assert_eq!(rect.center_y(), 120.0);
    }

    #[test]
    fn rect_contains() {
        let outer = RectF::new(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains(&RectF::new(10.0, 10.0, 50.0, 50.0)));
        assert!(!outer.contains(&RectF::new(60.0, 10.0, 50.0, 50.0)));
    }
}
