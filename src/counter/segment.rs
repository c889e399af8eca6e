//! 2D line segments and the orientation-based intersection test.

use nalgebra::Point2;

/// A directed line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point2<f32>,
    pub end: Point2<f32>,
}

/// Turn direction of the ordered triple (a, b, c).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
    Collinear,
}

/// Orientation of `c` relative to the directed line `a -> b`.
pub fn orientation(a: &Point2<f32>, b: &Point2<f32>, c: &Point2<f32>) -> Orientation {
    let cross = (b - a).perp(&(c - a));
    if cross > 0.0 {
        Orientation::CounterClockwise
    } else if cross < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

impl Segment {
    #[inline]
    pub fn new(start: Point2<f32>, end: Point2<f32>) -> Self {
        Self { start, end }
    }

    /// Build from `[[x1, y1], [x2, y2]]`.
    #[inline]
    pub fn from_coords(coords: [[f32; 2]; 2]) -> Self {
        let [[x1, y1], [x2, y2]] = coords;
        Self::new(Point2::new(x1, y1), Point2::new(x2, y2))
    }

    #[inline]
    pub fn to_coords(&self) -> [[f32; 2]; 2] {
        [[self.start.x, self.start.y], [self.end.x, self.end.y]]
    }

    /// A segment whose endpoints coincide has no direction.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Both endpoints have finite coordinates.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.start.coords.iter().chain(self.end.coords.iter()).all(|v| v.is_finite())
    }

    /// Whether the two segments cross each other.
    ///
    /// Touching counts: an endpoint lying on the other segment is an
    /// intersection as long as the two segments are not collinear. Collinear
    /// overlap is ambiguous and never reported, and neither is a degenerate
    /// (zero-length) segment.
    pub fn intersects(&self, other: &Segment) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }

        let o1 = orientation(&self.start, &self.end, &other.start);
        let o2 = orientation(&self.start, &self.end, &other.end);
        let o3 = orientation(&other.start, &other.end, &self.start);
        let o4 = orientation(&other.start, &other.end, &self.end);

        if o1 == Orientation::Collinear && o2 == Orientation::Collinear {
            return false;
        }

        o1 != o2 && o3 != o4
    }
}
