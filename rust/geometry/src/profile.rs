// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D Profile definitions and triangulation

use crate::error::{Error, Result};
use nalgebra::{Point2, Vector2};

/// Points closer than this are treated as the same vertex
const POINT_EPSILON: f64 = 1e-9;

/// 2D cross-section with optional hole loops
///
/// A closed profile repeats its first point at the end of `outer`. An open
/// profile is a plain polyline; when it is extruded the chord between its
/// last and first point closes it implicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile2D {
    /// Outer boundary
    pub outer: Vec<Point2<f64>>,
    /// Hole loops, each closed
    pub holes: Vec<Vec<Point2<f64>>>,
    /// Whether `outer` is an explicitly closed loop
    pub closed: bool,
}

impl Profile2D {
    /// Create a closed profile. The closing point is appended when missing and
    /// consecutive duplicate points are dropped.
    pub fn closed(points: Vec<Point2<f64>>) -> Self {
        Self {
            outer: close_loop(points),
            holes: Vec::new(),
            closed: true,
        }
    }

    /// Create an open polyline profile
    pub fn open(points: Vec<Point2<f64>>) -> Self {
        Self {
            outer: dedup_consecutive(points),
            holes: Vec::new(),
            closed: false,
        }
    }

    /// Add a hole to the profile
    pub fn add_hole(&mut self, hole: Vec<Point2<f64>>) {
        self.holes.push(close_loop(hole));
    }

    /// Builder variant of [`Profile2D::add_hole`]
    pub fn with_hole(mut self, hole: Vec<Point2<f64>>) -> Self {
        self.add_hole(hole);
        self
    }

    /// True when the first and last outer points coincide
    pub fn is_closed(&self) -> bool {
        match (self.outer.first(), self.outer.last()) {
            (Some(first), Some(last)) if self.outer.len() > 1 => same_point(first, last),
            _ => false,
        }
    }

    /// Outer boundary as a ring (closing duplicate removed)
    pub fn ring(&self) -> &[Point2<f64>] {
        ring_of(&self.outer)
    }

    /// Hole boundaries as rings
    pub fn hole_rings(&self) -> impl Iterator<Item = &[Point2<f64>]> {
        self.holes.iter().map(|h| ring_of(h))
    }

    /// Check the profile can be swept into a solid
    pub fn validate(&self) -> Result<()> {
        if self.ring().len() < 3 {
            return Err(Error::InvalidProfile(format!(
                "Profile must have at least 3 distinct vertices, got {}",
                self.ring().len()
            )));
        }
        if let Some(bad) = self.hole_rings().position(|h| h.len() < 3) {
            return Err(Error::InvalidProfile(format!(
                "Hole {} has fewer than 3 distinct vertices",
                bad
            )));
        }
        Ok(())
    }

    /// Signed area of the outer ring (positive = counter-clockwise)
    pub fn signed_area(&self) -> f64 {
        signed_area(self.ring())
    }

    /// Axis-aligned bounds of the outer boundary as (min, max)
    pub fn bounds(&self) -> (Point2<f64>, Point2<f64>) {
        if self.outer.is_empty() {
            return (Point2::origin(), Point2::origin());
        }
        self.outer.iter().fold(
            (
                Point2::new(f64::MAX, f64::MAX),
                Point2::new(f64::MIN, f64::MIN),
            ),
            |(min, max), p| {
                (
                    Point2::new(min.x.min(p.x), min.y.min(p.y)),
                    Point2::new(max.x.max(p.x), max.y.max(p.y)),
                )
            },
        )
    }

    /// Copy of the profile moved by `offset`
    pub fn translated(&self, offset: Vector2<f64>) -> Self {
        Self {
            outer: self.outer.iter().map(|p| p + offset).collect(),
            holes: self
                .holes
                .iter()
                .map(|h| h.iter().map(|p| p + offset).collect())
                .collect(),
            closed: self.closed,
        }
    }

    /// Triangulate the profile using earcutr
    /// Returns triangle indices into the flattened vertex array
    pub fn triangulate(&self) -> Result<Triangulation> {
        self.validate()?;

        let outer = self.ring();
        let hole_count: usize = self.hole_rings().map(|h| h.len()).sum();
        let mut vertices = Vec::with_capacity((outer.len() + hole_count) * 2);

        for p in outer {
            vertices.push(p.x);
            vertices.push(p.y);
        }

        let mut hole_indices = Vec::with_capacity(self.holes.len());
        for hole in self.hole_rings() {
            hole_indices.push(vertices.len() / 2);
            for p in hole {
                vertices.push(p.x);
                vertices.push(p.y);
            }
        }

        let indices = earcutr::earcut(&vertices, &hole_indices, 2)
            .map_err(|e| Error::TriangulationError(format!("{:?}", e)))?;

        let points = vertices
            .chunks_exact(2)
            .map(|c| Point2::new(c[0], c[1]))
            .collect();

        Ok(Triangulation { points, indices })
    }
}

/// Triangulated profile result
#[derive(Debug, Clone)]
pub struct Triangulation {
    /// All vertices (outer + holes)
    pub points: Vec<Point2<f64>>,
    /// Triangle indices
    pub indices: Vec<usize>,
}

/// Create a rectangular profile centered on the origin
#[inline]
pub fn create_rectangle(width: f64, height: f64) -> Profile2D {
    let half_w = width / 2.0;
    let half_h = height / 2.0;

    Profile2D::closed(vec![
        Point2::new(-half_w, -half_h),
        Point2::new(half_w, -half_h),
        Point2::new(half_w, half_h),
        Point2::new(-half_w, half_h),
    ])
}

/// Create a circular profile (with optional hole) using an adaptive segment count
pub fn create_circle(radius: f64, hole_radius: Option<f64>) -> Profile2D {
    let mut profile = Profile2D::closed(circle_points(
        Point2::origin(),
        radius,
        calculate_circle_segments(radius),
    ));

    if let Some(hole_r) = hole_radius {
        let mut hole = circle_points(Point2::origin(), hole_r, calculate_circle_segments(hole_r));
        hole.reverse(); // Make clockwise
        profile.add_hole(hole);
    }

    profile
}

/// Create a circular profile with an explicit segment count
pub fn create_circle_with_segments(radius: f64, segments: usize) -> Profile2D {
    Profile2D::closed(circle_points(Point2::origin(), radius, segments.max(3)))
}

/// Counter-clockwise points on a circle, without the closing duplicate
pub fn circle_points(center: Point2<f64>, radius: f64, segments: usize) -> Vec<Point2<f64>> {
    (0..segments)
        .map(|i| {
            let angle = 2.0 * std::f64::consts::PI * (i as f64) / (segments as f64);
            Point2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}

/// Calculate adaptive number of segments for a circle
#[inline]
pub fn calculate_circle_segments(radius: f64) -> usize {
    let segments = (radius.abs().sqrt() * 8.0).ceil() as usize;
    segments.clamp(8, 32)
}

/// Signed area of a ring (shoelace formula)
pub fn signed_area(ring: &[Point2<f64>]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    (0..n)
        .map(|i| {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        * 0.5
}

fn same_point(a: &Point2<f64>, b: &Point2<f64>) -> bool {
    (a - b).norm() < POINT_EPSILON
}

fn dedup_consecutive(points: Vec<Point2<f64>>) -> Vec<Point2<f64>> {
    let mut out: Vec<Point2<f64>> = Vec::with_capacity(points.len());
    for p in points {
        if out.last().map_or(true, |last| !same_point(last, &p)) {
            out.push(p);
        }
    }
    out
}

fn close_loop(points: Vec<Point2<f64>>) -> Vec<Point2<f64>> {
    let mut out = dedup_consecutive(points);
    if let Some(first) = out.first().copied() {
        if out.len() > 1 && !out.last().is_some_and(|last| same_point(last, &first)) {
            out.push(first);
        }
    }
    out
}

fn ring_of(points: &[Point2<f64>]) -> &[Point2<f64>] {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() > 1 && same_point(first, last) => {
            &points[..points.len() - 1]
        }
        _ => points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_profile() {
        let profile = create_rectangle(10.0, 5.0);
        assert_eq!(profile.outer.len(), 5);
        assert_eq!(profile.ring().len(), 4);
        assert!(profile.is_closed());
        assert_eq!(profile.holes.len(), 0);

        assert_eq!(profile.outer[0], Point2::new(-5.0, -2.5));
        assert_eq!(profile.outer[2], Point2::new(5.0, 2.5));
        assert_eq!(profile.outer[4], profile.outer[0]);
    }

    #[test]
    fn test_closed_drops_duplicates() {
        let profile = Profile2D::closed(vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 0.0),
        ]);
        assert_eq!(profile.outer.len(), 4);
        assert_eq!(profile.ring().len(), 3);
        assert!(profile.is_closed());
    }

    #[test]
    fn test_open_profile_is_not_closed() {
        let profile = Profile2D::open(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 0.0),
        ]);
        assert!(!profile.closed);
        assert!(!profile.is_closed());
        assert_eq!(profile.ring().len(), 3);
    }

    #[test]
    fn test_degenerate_profile_rejected() {
        let profile = Profile2D::closed(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]);
        assert!(matches!(profile.validate(), Err(Error::InvalidProfile(_))));
        assert!(profile.triangulate().is_err());
    }

    #[test]
    fn test_circle_profile() {
        let profile = create_circle(5.0, None);
        assert!(profile.ring().len() >= 8);

        let first = profile.outer[0];
        let dist = (first.x * first.x + first.y * first.y).sqrt();
        assert!((dist - 5.0).abs() < 0.001);
        assert!(profile.signed_area() > 0.0);
    }

    #[test]
    fn test_hollow_circle() {
        let profile = create_circle(10.0, Some(5.0));
        assert_eq!(profile.holes.len(), 1);
        assert!(profile.hole_rings().all(|h| h.len() >= 8));
    }

    #[test]
    fn test_triangulate_rectangle() {
        let profile = create_rectangle(10.0, 5.0);
        let tri = profile.triangulate().unwrap();

        assert_eq!(tri.points.len(), 4);
        assert_eq!(tri.indices.len(), 6);
    }

    #[test]
    fn test_triangulate_hollow_circle() {
        let profile = create_circle(10.0, Some(5.0));
        let tri = profile.triangulate().unwrap();

        let outer_count = calculate_circle_segments(10.0);
        let inner_count = calculate_circle_segments(5.0);
        assert_eq!(tri.points.len(), outer_count + inner_count);
    }

    #[test]
    fn test_bounds_and_translation() {
        let profile = create_rectangle(4.0, 2.0).translated(Vector2::new(10.0, 1.0));
        let (min, max) = profile.bounds();
        assert_eq!(min, Point2::new(8.0, 0.0));
        assert_eq!(max, Point2::new(12.0, 2.0));
    }

    #[test]
    fn test_circle_segments() {
        assert_eq!(calculate_circle_segments(1.0), 8);
        assert_eq!(calculate_circle_segments(4.0), 16);
        assert!(calculate_circle_segments(100.0) <= 32);
        assert_eq!(create_circle_with_segments(3.0, 24).ring().len(), 24);
    }
}
