//! Conversion between the original video resolution and the resized frame
//! the detector runs on.

use nalgebra::Point2;

use crate::counter::rect::Rect;
use crate::error::{Error, Result};

/// Maps points and boxes between original space and detection space.
///
/// Scale factors are computed once per video:
/// `sx = target_width / source_width`, `sy = target_height / source_height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    sx: f32,
    sy: f32,
}

fn check_size(width: f32, height: f32) -> Result<()> {
    let valid = |v: f32| v.is_finite() && v > 0.0;
    if valid(width) && valid(height) {
        Ok(())
    } else {
        Err(Error::InvalidDimensions { width, height })
    }
}

impl CoordinateMapper {
    /// Create a mapper from the original frame size (`source`) to the detection
    /// frame size (`target`), both given as (width, height).
    pub fn new(source: (f32, f32), target: (f32, f32)) -> Result<Self> {
        check_size(source.0, source.1)?;
        check_size(target.0, target.1)?;
        Ok(Self {
            sx: target.0 / source.0,
            sy: target.1 / source.1,
        })
    }

    /// A mapper for detectors that run at the original resolution.
    pub fn identity() -> Self {
        Self { sx: 1.0, sy: 1.0 }
    }

    /// Scale factors (sx, sy) from original to detection space.
    pub fn scale(&self) -> (f32, f32) {
        (self.sx, self.sy)
    }

    #[inline]
    pub fn to_detection_space(&self, point: Point2<f32>) -> Point2<f32> {
        Point2::new(point.x * self.sx, point.y * self.sy)
    }

    #[inline]
    pub fn to_original_space(&self, point: Point2<f32>) -> Point2<f32> {
        Point2::new(point.x / self.sx, point.y / self.sy)
    }

    #[inline]
    pub fn rect_to_detection_space(&self, rect: &Rect) -> Rect {
        rect.scale(self.sx, self.sy)
    }

    #[inline]
    pub fn rect_to_original_space(&self, rect: &Rect) -> Rect {
        Rect::new(
            rect.x / self.sx,
            rect.y / self.sy,
            rect.width / self.sx,
            rect.height / self.sy,
        )
    }
}
