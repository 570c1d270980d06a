// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Diagonal miter planes for the four top edges of a box
//!
//! The box is centered on the Y axis with its length along X and its width
//! along Z. The four vertical planes through the box diagonals split the
//! footprint into four wedges, one per side, so each edge extrusion can be
//! trimmed to its own wedge and neighbours meet along the diagonal.

use crate::clipping::HalfSpace;
use nalgebra::{Point3, Vector3};

/// One side of the box footprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    /// +Z
    Front,
    /// -Z
    Back,
    /// -X
    Left,
    /// +X
    Right,
}

impl Side {
    /// All sides in synthesis order
    pub const ALL: [Side; 4] = [Side::Front, Side::Back, Side::Left, Side::Right];

    /// Outward unit normal of the side in the box frame
    pub fn outward(self) -> Vector3<f64> {
        match self {
            Side::Front => Vector3::z(),
            Side::Back => -Vector3::z(),
            Side::Left => -Vector3::x(),
            Side::Right => Vector3::x(),
        }
    }

    /// Lower-case name used for solid labels
    pub fn name(self) -> &'static str {
        match self {
            Side::Front => "front",
            Side::Back => "back",
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    /// True for the sides running along the box length
    pub fn is_long(self) -> bool {
        matches!(self, Side::Front | Side::Back)
    }
}

/// The four diagonal half-spaces of a box footprint
#[derive(Debug, Clone, PartialEq)]
pub struct MiterPlaneSet {
    planes: [HalfSpace; 4],
}

impl MiterPlaneSet {
    /// Build the plane set for a box of `length` × `width`
    ///
    /// `offset` shifts every plane along its normal; a positive value lets
    /// neighbouring edges overlap slightly.
    pub fn new(length: f64, width: f64, offset: f64) -> Self {
        let theta = width.atan2(length);
        let phi = std::f64::consts::FRAC_PI_2 - theta;

        let a = Vector3::new((-phi).cos(), 0.0, (-phi).sin());
        let b = Vector3::new(phi.cos(), 0.0, phi.sin());

        let p0 = HalfSpace::new(a, offset);
        let p1 = HalfSpace::new(b, offset);
        let p2 = HalfSpace::new(-a, offset);
        let p3 = HalfSpace::new(-b, offset);

        Self {
            planes: [p0, p1, p2, p3],
        }
    }

    /// All four planes
    pub fn planes(&self) -> &[HalfSpace; 4] {
        &self.planes
    }

    /// Indices of the two planes bounding a side
    pub fn indices_for_side(side: Side) -> [usize; 2] {
        match side {
            Side::Right => [0, 1],
            Side::Front => [1, 2],
            Side::Left => [2, 3],
            Side::Back => [3, 0],
        }
    }

    /// The two half-spaces trimming the edge on `side`
    pub fn for_side(&self, side: Side) -> [HalfSpace; 2] {
        let [i, j] = Self::indices_for_side(side);
        [self.planes[i], self.planes[j]]
    }

    /// Footprint corners at either end of a side, at height zero
    pub fn corners(side: Side, length: f64, width: f64) -> [Point3<f64>; 2] {
        let (hl, hw) = (length / 2.0, width / 2.0);
        match side {
            Side::Front => [Point3::new(-hl, 0.0, hw), Point3::new(hl, 0.0, hw)],
            Side::Back => [Point3::new(hl, 0.0, -hw), Point3::new(-hl, 0.0, -hw)],
            Side::Left => [Point3::new(-hl, 0.0, -hw), Point3::new(-hl, 0.0, hw)],
            Side::Right => [Point3::new(hl, 0.0, hw), Point3::new(hl, 0.0, -hw)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_planes_are_unit_and_diagonal() {
        let set = MiterPlaneSet::new(300.0, 200.0, 0.0);
        let d = (300.0f64.powi(2) + 200.0f64.powi(2)).sqrt();
        let p0 = set.planes()[0];
        assert_relative_eq!(p0.normal, Vector3::new(200.0 / d, 0.0, -300.0 / d), epsilon = 1e-12);
        for p in set.planes() {
            assert_relative_eq!(p.normal.norm(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(p.offset, 0.0);
        }
    }

    #[test]
    fn test_corners_inside_both_planes() {
        let (l, w) = (300.0, 180.0);
        let set = MiterPlaneSet::new(l, w, 0.0);
        for side in Side::ALL {
            for plane in set.for_side(side) {
                for corner in MiterPlaneSet::corners(side, l, w) {
                    assert!(plane.contains(&corner, 1e-9), "{:?} corner outside", side);
                }
            }
            // The middle of the side is strictly inside
            let mid = Point3::from(side.outward().component_mul(&Vector3::new(l / 2.0, 0.0, w / 2.0)));
            for plane in set.for_side(side) {
                assert!(plane.signed_distance(&mid) > 1.0);
            }
        }
    }

    #[test]
    fn test_adjacent_share_one_opposite_none() {
        let shared = |a: Side, b: Side| {
            let ia = MiterPlaneSet::indices_for_side(a);
            let ib = MiterPlaneSet::indices_for_side(b);
            ia.iter().filter(|i| ib.contains(i)).count()
        };
        assert_eq!(shared(Side::Front, Side::Right), 1);
        assert_eq!(shared(Side::Front, Side::Left), 1);
        assert_eq!(shared(Side::Back, Side::Right), 1);
        assert_eq!(shared(Side::Back, Side::Left), 1);
        assert_eq!(shared(Side::Front, Side::Back), 0);
        assert_eq!(shared(Side::Left, Side::Right), 0);
    }

    #[test]
    fn test_offset_moves_planes_outward() {
        let set = MiterPlaneSet::new(200.0, 200.0, 0.5);
        let corner = Point3::new(100.0, 0.0, 100.0);
        for plane in set.for_side(Side::Front) {
            assert!(plane.signed_distance(&corner) >= 0.5 - 1e-9);
        }
    }

    #[test]
    fn test_opposite_planes_are_negated() {
        let set = MiterPlaneSet::new(120.0, 80.0, 0.0);
        let p = set.planes();
        assert_relative_eq!(p[2].normal, -p[0].normal);
        assert_relative_eq!(p[3].normal, -p[1].normal);
    }
}
