//! Geometric primitives for trail collision
//!
//! Points are fixed-point integer vectors, so every predicate here is exact:
//! no epsilon, no sign flips near collinearity. Segments are closed (they
//! include their endpoints) and may be degenerate.

use glam::I64Vec2;
use serde::{Deserialize, Serialize};

/// A point in fixed-point arena units
pub type Point = I64Vec2;

/// Rotational sense of an ordered point triplet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// A straight trail piece from `start` to `end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Zero-length segment (e.g. motion over a zero timestep)
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Same segment with its endpoints swapped
    #[inline]
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }

    /// Whether two segments touch or cross
    #[inline]
    pub fn intersects(&self, other: &Segment) -> bool {
        segments_intersect(self, other)
    }
}

/// Orientation of the ordered triplet (p, q, r)
///
/// Sign of the cross product `(q - p) x (r - q)`, evaluated in `i128` so it
/// cannot overflow for any `i64` coordinates.
pub fn orientation(p: Point, q: Point, r: Point) -> Orientation {
    let val = (q.y as i128 - p.y as i128) * (r.x as i128 - q.x as i128)
        - (q.x as i128 - p.x as i128) * (r.y as i128 - q.y as i128);

    match val.signum() {
        0 => Orientation::Collinear,
        1 => Orientation::Clockwise,
        _ => Orientation::CounterClockwise,
    }
}

/// Check whether `q` lies within the bounding box of `p` and `r` (inclusive)
///
/// Only meaningful once p, q, r are known to be collinear.
#[inline]
pub fn on_segment(p: Point, q: Point, r: Point) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Standard orientation-based closed segment intersection test
pub fn segments_intersect(a: &Segment, b: &Segment) -> bool {
    let (p1, q1) = (a.start, a.end);
    let (p2, q2) = (b.start, b.end);

    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    // General case: each segment straddles the other's line
    if o1 != o2 && o3 != o4 {
        return true;
    }

    // Collinear cases: an endpoint lies on the other segment
    (o1 == Orientation::Collinear && on_segment(p1, p2, q1))
        || (o2 == Orientation::Collinear && on_segment(p1, q2, q1))
        || (o3 == Orientation::Collinear && on_segment(p2, p1, q2))
        || (o4 == Orientation::Collinear && on_segment(p2, q1, q2))
}
