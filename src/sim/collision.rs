//! Candidate segment vs trail collision
//!
//! Trails are append-only polylines. A moving head's candidate segment is
//! tested against every edge, which is O(path length) per check; two players
//! with a few hundred vertices each never need a spatial index.

use super::geometry::{Point, Segment, segments_intersect};

/// Iterate the edges of a polyline, in order
pub fn edges(path: &[Point]) -> impl Iterator<Item = Segment> + '_ {
    path.windows(2).map(|w| Segment::new(w[0], w[1]))
}

/// Check whether `candidate` touches or crosses any edge of `path`
///
/// A path with fewer than two points has no edges and never collides.
pub fn collides(candidate: &Segment, path: &[Point]) -> bool {
    edges(path).any(|edge| segments_intersect(candidate, &edge))
}

/// Index of the first edge of `path` hit by `candidate`
///
/// Edge `i` runs from `path[i]` to `path[i + 1]`.
pub fn first_hit(candidate: &Segment, path: &[Point]) -> Option<usize> {
    edges(path).position(|edge| segments_intersect(candidate, &edge))
}

/// The part of a player's own path eligible for self-collision
///
/// Drops the live head vertex and the most recent pivot. Both edges touching
/// those points are adjacent to the candidate segment and would always
/// register as a hit.
pub fn self_check_path(path: &[Point]) -> &[Point] {
    &path[..path.len().saturating_sub(2)]
}
