// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Horizontal stiffening ribs on the outer face of the walls.

use crate::config::{RIB_DEPTH, RIB_INTERVAL, RIB_WIDTH};
use crate::error::Result;
use crate::material::Material;
use crate::scene::{Solid, Transform};
use nalgebra::Vector3;
use std::f64::consts::FRAC_PI_2;
use steelbox_geometry::profiles::{rib, MIN_RIB_SEGMENTS};

/// Area a rib band must stay clear of, in panel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RibExclusion {
    /// Height of the zone center above the panel bottom
    pub center: f64,
    pub height: f64,
    pub width: f64,
}

/// One straight rib run along a band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RibSegment {
    /// Start along the band, measured from the band's left end
    pub start: f64,
    pub length: f64,
    /// Height above the panel bottom
    pub height: f64,
}

/// Upper bound on rib bands per wall
pub const MAX_RIB_BANDS: usize = 256;

/// Heights of the rib bands on a wall of `wall_height`
///
/// Walls shorter than one rib interval get no ribs.
pub fn band_heights(wall_height: f64) -> Vec<f64> {
    let count = ((wall_height / RIB_INTERVAL).floor() as usize).min(MAX_RIB_BANDS);
    if count == 0 {
        return Vec::new();
    }
    let interval = wall_height / (count + 1) as f64;
    (1..=count).map(|i| interval * i as f64).collect()
}

/// Split a band of `band_width` around a centered gap of `exclusion_width`
///
/// Returns `(start, length)` pairs; empty when the gap swallows the band.
pub fn split_band(band_width: f64, exclusion_width: f64) -> Vec<(f64, f64)> {
    if exclusion_width >= band_width {
        return Vec::new();
    }
    if exclusion_width <= 0.0 {
        return vec![(0.0, band_width)];
    }
    let segment = (band_width - exclusion_width) / 2.0;
    vec![(0.0, segment), (segment + exclusion_width, segment)]
}

/// Lay out the rib segments of one wall panel
pub fn layout(
    band_width: f64,
    wall_height: f64,
    exclusion: Option<&RibExclusion>,
) -> Vec<RibSegment> {
    let mut segments = Vec::new();
    for height in band_heights(wall_height) {
        let pieces = match exclusion {
            Some(zone) if (height - zone.center).abs() < zone.height / 2.0 => {
                split_band(band_width, zone.width)
            }
            _ => vec![(0.0, band_width)],
        };
        segments.extend(pieces.into_iter().map(|(start, length)| RibSegment {
            start,
            length,
            height,
        }));
    }
    segments
}

/// Rib solids with their placement in a panel frame
///
/// The panel frame is centered on the panel with Z out of the box and the
/// outer face at `z = thickness / 2`.
pub fn build(
    segments: &[RibSegment],
    band_width: f64,
    wall_height: f64,
    thickness: f64,
    material: Material,
) -> Result<Vec<(Solid, Transform)>> {
    let profile = rib(RIB_DEPTH, RIB_WIDTH, MIN_RIB_SEGMENTS);
    segments
        .iter()
        .enumerate()
        .map(|(i, seg)| {
            let solid = Solid::extruded(format!("rib-{}", i), material, profile.clone(), seg.length)?;
            // Bump points out of the wall, sweep runs back along -X
            let x = -band_width / 2.0 + seg.start + seg.length;
            let y = seg.height - wall_height / 2.0;
            let transform =
                Transform::from_euler(Vector3::new(x, y, thickness / 2.0), 0.0, -FRAC_PI_2, 0.0);
            Ok((solid, transform))
        })
        .collect()
}
