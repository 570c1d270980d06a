// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cross-section builders for sheet-metal box parts
//!
//! Every builder is a pure function of its scalar inputs. Profiles are drawn
//! in a local XY frame: for edge profiles X points into the box and Y up, with
//! the wall plane at x = 0.

use crate::profile::Profile2D;
use crate::Point2;
use std::f64::consts::{FRAC_PI_2, PI};

/// Inner radius of the hem fold
pub const HEM_BEND_RADIUS: f64 = 1.0;
/// Length of the folded-down hem leg
pub const HEM_LENGTH: f64 = 6.0;
/// Samples per Bézier quarter arc
const ARC_SAMPLES: usize = 6;
/// Samples per quadratic fillet
const FILLET_SAMPLES: usize = 6;
/// Minimum rib sampling
pub const MIN_RIB_SEGMENTS: usize = 30;

/// Stepped top edge: the sheet steps inward by `s` and back, with an optional hem over the top
///
/// The outer face rises 0 → t → s+t → s+h → 2s+h → 2(s+h) and the inner face
/// mirrors it at thickness `t`.
pub fn stepped_edge(t: f64, s: f64, h: f64, hemmed: bool) -> Profile2D {
    let top = 2.0 * (s + h);
    let mut points = vec![
        Point2::new(0.0, 0.0),
        Point2::new(0.0, t),
        Point2::new(s, s + t),
        Point2::new(s, s + h),
        Point2::new(0.0, s + h + s),
        Point2::new(0.0, top),
    ];
    if hemmed {
        points.extend(hem_loop(t, top));
    }
    points.extend([
        Point2::new(t, top),
        Point2::new(t, s + h + s),
        Point2::new(s - t, s + h),
        Point2::new(s - t, s),
        Point2::new(t, t),
    ]);
    Profile2D::closed(points)
}

/// Straight top lip of thickness `t` and `height`, always hemmed
pub fn straight_lip(t: f64, height: f64) -> Profile2D {
    let mut points = vec![Point2::new(0.0, 0.0), Point2::new(0.0, height)];
    points.extend(hem_loop(t, height));
    points.extend([Point2::new(t, height), Point2::new(t, 0.0)]);
    Profile2D::closed(points)
}

/// Hem fold from the outer face at (0, top) round to the inner face at (t, top)
///
/// The sheet bends outward (towards -X) over the top, runs down `HEM_LENGTH`
/// and bends back. End points are excluded.
fn hem_loop(t: f64, top: f64) -> Vec<Point2<f64>> {
    let r = HEM_BEND_RADIUS;
    let center = Point2::new(-r, top);
    let leg_end = top - HEM_LENGTH;

    let mut points = bezier_arc(center, r, 0.0, PI);
    points.remove(0);
    points.push(Point2::new(-2.0 * r, leg_end));
    points.push(Point2::new(-2.0 * r - t, leg_end));
    points.extend(bezier_arc(center, r + t, PI, 0.0));
    points.pop();
    points
}

/// Circular arc from `start` to `end` (radians, signed sweep) approximated by
/// cubic Bézier pieces of at most a quarter turn. Includes both end points.
pub fn bezier_arc(center: Point2<f64>, radius: f64, start: f64, end: f64) -> Vec<Point2<f64>> {
    let sweep = end - start;
    let pieces = ((sweep.abs() / FRAC_PI_2).ceil() as usize).max(1);
    let delta = sweep / pieces as f64;
    let k = 4.0 / 3.0 * (delta / 4.0).tan() * radius;

    let on_circle = |a: f64| Point2::new(center.x + radius * a.cos(), center.y + radius * a.sin());
    let tangent = |a: f64| nalgebra::Vector2::new(-a.sin(), a.cos());

    let mut points = vec![on_circle(start)];
    for piece in 0..pieces {
        let a0 = start + delta * piece as f64;
        let a1 = a0 + delta;
        let p0 = on_circle(a0);
        let p3 = on_circle(a1);
        let p1 = p0 + tangent(a0) * k;
        let p2 = p3 - tangent(a1) * k;
        for i in 1..=ARC_SAMPLES {
            let u = i as f64 / ARC_SAMPLES as f64;
            let v = 1.0 - u;
            let coords = p0.coords * (v * v * v)
                + p1.coords * (3.0 * v * v * u)
                + p2.coords * (3.0 * v * u * u)
                + p3.coords * (u * u * u);
            points.push(Point2::from(coords));
        }
    }
    points
}

/// Half-sine rib bump: amplitude `depth` along X, spanning `width` along Y
///
/// Open polyline; the chord on x = 0 closes it.
pub fn rib(depth: f64, width: f64, segments: usize) -> Profile2D {
    let segments = segments.max(MIN_RIB_SEGMENTS);
    let points = (0..=segments)
        .map(|i| {
            let t = i as f64 / segments as f64;
            Point2::new((t * PI).sin() * depth, (t - 0.5) * width)
        })
        .collect();
    Profile2D::open(points)
}

/// Rubber lining strip: `span` long, `h` tall, centered on the wall plane
/// through its thickness `t` and overhanging `o` at both ends
pub fn rubber_lining(span: f64, t: f64, h: f64, o: f64) -> Profile2D {
    let base = -t / 2.0;
    Profile2D::closed(vec![
        Point2::new(-o, base),
        Point2::new(-o, h + base),
        Point2::new(span + o, h + base),
        Point2::new(span + o, base),
        Point2::new(span, base),
        Point2::new(0.0, base),
    ])
}

/// Centered rectangle with quadratic-Bézier corners of `radius`
pub fn rounded_rect(width: f64, height: f64, radius: f64) -> Profile2D {
    let r = radius.clamp(0.0, width.min(height) / 2.0);
    let (x, y) = (-width / 2.0, -height / 2.0);
    if r <= 0.0 {
        return crate::profile::create_rectangle(width, height);
    }

    let corners = [
        // (start, control, end)
        ((x + width - r, y), (x + width, y), (x + width, y + r)),
        ((x + width, y + height - r), (x + width, y + height), (x + width - r, y + height)),
        ((x + r, y + height), (x, y + height), (x, y + height - r)),
        ((x, y + r), (x, y), (x + r, y)),
    ];

    let mut points = Vec::with_capacity(4 * (FILLET_SAMPLES + 1));
    for (start, control, end) in corners {
        let (p0, p1, p2) = (
            Point2::new(start.0, start.1),
            Point2::new(control.0, control.1),
            Point2::new(end.0, end.1),
        );
        for i in 0..=FILLET_SAMPLES {
            let u = i as f64 / FILLET_SAMPLES as f64;
            let v = 1.0 - u;
            points.push(Point2::from(
                p0.coords * (v * v) + p1.coords * (2.0 * v * u) + p2.coords * (u * u),
            ));
        }
    }
    Profile2D::closed(points)
}

/// Bent strap: a straight leg of `leg_length` then a diagonal leg offset by
/// (`diagonal_x`, `diagonal_y`), `strap_width` wide
pub fn strap(strap_width: f64, leg_length: f64, diagonal_x: f64, diagonal_y: f64) -> Profile2D {
    Profile2D::closed(vec![
        Point2::new(0.0, 0.0),
        Point2::new(strap_width, 0.0),
        Point2::new(strap_width, leg_length),
        Point2::new(strap_width + diagonal_x, leg_length + diagonal_y),
        Point2::new(diagonal_x, leg_length + diagonal_y),
        Point2::new(0.0, leg_length),
    ])
}

/// Points of a centered pill (stadium) with semicircular ends, counter-clockwise
pub fn pill_points(width: f64, height: f64) -> Vec<Point2<f64>> {
    let r = width.min(height) / 2.0;
    let half_run = (width / 2.0 - r).max(0.0);
    // Even count per end so the extreme point of each end is sampled
    let per_end = 2 * (crate::profile::calculate_circle_segments(r) / 4).max(2);

    let mut points = Vec::with_capacity(2 * per_end + 2);
    for (cx, a0) in [(half_run, -FRAC_PI_2), (-half_run, FRAC_PI_2)] {
        for i in 0..=per_end {
            let a = a0 + PI * i as f64 / per_end as f64;
            points.push(Point2::new(cx + r * a.cos(), r * a.sin()));
        }
    }
    points
}

/// Pill-shaped handle cutout
pub fn pill(width: f64, height: f64) -> Profile2D {
    Profile2D::closed(pill_points(width, height))
}

/// Rim around a pill cutout: the pill grown by `rim_thickness` with the pill
/// itself as a hole
pub fn handle_rim(width: f64, height: f64, rim_thickness: f64) -> Profile2D {
    let mut hole = pill_points(width, height);
    hole.reverse();
    Profile2D::closed(pill_points(
        width + 2.0 * rim_thickness,
        height + 2.0 * rim_thickness,
    ))
    .with_hole(hole)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_stepped_edge_plain() {
        let profile = stepped_edge(2.0, 5.0, 5.0, false);
        assert!(profile.is_closed());
        assert_eq!(profile.ring().len(), 11);
        let (min, max) = profile.bounds();
        assert_relative_eq!(min.x, 0.0);
        assert_relative_eq!(max.x, 5.0);
        assert_relative_eq!(max.y, 20.0);
        assert!(profile.triangulate().is_ok());
    }

    #[test]
    fn test_stepped_edge_hem_folds_outward() {
        let plain = stepped_edge(2.0, 5.0, 5.0, false);
        let hemmed = stepped_edge(2.0, 5.0, 5.0, true);
        assert!(hemmed.ring().len() > plain.ring().len());

        let (min, max) = hemmed.bounds();
        assert_relative_eq!(min.x, -2.0 * HEM_BEND_RADIUS - 2.0, epsilon = 1e-9);
        assert_relative_eq!(min.y, 0.0);
        // Outer bend peaks at r + t above the top
        assert_relative_eq!(max.y, 20.0 + HEM_BEND_RADIUS + 2.0, epsilon = 1e-6);
        assert!(hemmed.triangulate().is_ok());
    }

    #[test]
    fn test_straight_lip() {
        let profile = straight_lip(2.0, 10.0);
        assert!(profile.is_closed());
        let (min, _) = profile.bounds();
        assert!(min.x < 0.0);
        let tri = profile.triangulate().unwrap();
        assert!(!tri.indices.is_empty());
    }

    #[test]
    fn test_bezier_arc_stays_on_circle() {
        let c = Point2::new(1.0, 2.0);
        let arc = bezier_arc(c, 3.0, 0.0, PI);
        assert_eq!(arc.len(), 1 + 2 * ARC_SAMPLES);
        for p in &arc {
            assert_relative_eq!((p - c).norm(), 3.0, epsilon = 3e-3);
        }
        assert_relative_eq!(arc[0], Point2::new(4.0, 2.0), epsilon = 1e-12);
        assert_relative_eq!(arc[arc.len() - 1], Point2::new(-2.0, 2.0), epsilon = 1e-9);
    }

    #[test]
    fn test_rib_profile() {
        let profile = rib(4.0, 16.0, 10);
        assert!(!profile.closed);
        assert_eq!(profile.outer.len(), MIN_RIB_SEGMENTS + 1);
        let (min, max) = profile.bounds();
        assert_relative_eq!(max.x, 4.0, epsilon = 1e-9);
        assert_relative_eq!(min.y, -8.0);
        assert_relative_eq!(max.y, 8.0);
        assert!(profile.triangulate().is_ok());
    }

    #[test]
    fn test_rubber_lining_symmetric() {
        let profile = rubber_lining(100.0, 2.0, 5.0, 3.0);
        let (min, max) = profile.bounds();
        assert_relative_eq!(min.x, -3.0);
        assert_relative_eq!(max.x, 103.0);
        assert_relative_eq!(min.y, -1.0);
        assert_relative_eq!(max.y, 4.0);

        // Zero overhang collapses to a plain strip
        let strip = rubber_lining(100.0, 2.0, 5.0, 0.0);
        assert_eq!(strip.ring().len(), 4);
    }

    #[test]
    fn test_rounded_rect() {
        let profile = rounded_rect(12.0, 18.0, 2.0);
        let (min, max) = profile.bounds();
        assert_relative_eq!(min.x, -6.0);
        assert_relative_eq!(max.y, 9.0);
        assert!(profile.signed_area() < 12.0 * 18.0);
        assert!(profile.signed_area() > 12.0 * 18.0 - 4.0 * 4.0);

        // Oversized radius is clamped
        assert!(rounded_rect(2.0, 2.0, 10.0).triangulate().is_ok());
        assert_eq!(rounded_rect(4.0, 4.0, 0.0).ring().len(), 4);
    }

    #[test]
    fn test_strap_profile() {
        let profile = strap(8.0, 40.0, 15.0, 14.0);
        assert_eq!(profile.ring().len(), 6);
        let (_, max) = profile.bounds();
        assert_relative_eq!(max.x, 23.0);
        assert_relative_eq!(max.y, 54.0);
    }

    #[test]
    fn test_pill_and_rim() {
        let p = pill(96.0, 27.0);
        let (min, max) = p.bounds();
        assert_relative_eq!(min.x, -48.0, epsilon = 1e-9);
        assert_relative_eq!(max.y, 13.5, epsilon = 1e-9);
        assert!(p.signed_area() > 0.0);

        let rim = handle_rim(96.0, 27.0, 4.0);
        assert_eq!(rim.holes.len(), 1);
        let (min, max) = rim.bounds();
        assert_relative_eq!(min.x, -52.0, epsilon = 1e-9);
        assert_relative_eq!(max.y, 17.5, epsilon = 1e-9);
        assert!(rim.triangulate().is_ok());
    }
}
