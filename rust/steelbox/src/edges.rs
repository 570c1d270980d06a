// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Top edges: one extrusion per side, trimmed to its miter wedge.
//!
//! Profiles are drawn with X pointing into the box and Y up; each extrusion
//! runs the full side length plus the profile's outward overhang at both
//! ends so the miter planes always have material to cut.

use crate::config::{ResolvedConfig, TopStyle};
use crate::error::Result;
use crate::material::Material;
use crate::scene::{Solid, Transform};
use nalgebra::Vector3;
use std::f64::consts::{FRAC_PI_2, PI};
use steelbox_geometry::profiles::{stepped_edge, straight_lip};
use steelbox_geometry::{MiterPlaneSet, Profile2D, Side};

/// Cross-section of the top edge for the configured top style
pub fn edge_profile(resolved: &ResolvedConfig) -> Profile2D {
    let c = &resolved.config;
    match c.top {
        TopStyle::Stepped { hemmed } => stepped_edge(c.thickness, c.step_inset, c.step_height, hemmed),
        TopStyle::Straight => straight_lip(c.thickness, c.step_height + c.step_inset),
    }
}

/// Height of the edge profile origin above the base
///
/// A stepped edge stands on the walls; a straight lip lines the top of the
/// walls and finishes flush with them.
pub fn edge_base_height(resolved: &ResolvedConfig) -> f64 {
    let c = &resolved.config;
    match c.top {
        TopStyle::Stepped { .. } => resolved.dims.wall_height,
        TopStyle::Straight => resolved.dims.wall_height - (c.step_height + c.step_inset),
    }
}

/// How far the profile reaches outside the wall plane
pub fn overhang(profile: &Profile2D) -> f64 {
    let (min, _) = profile.bounds();
    (-min.x).max(0.0)
}

/// Placement of the edge extrusion on `side`
pub fn edge_transform(side: Side, resolved: &ResolvedConfig, y: f64, overhang: f64) -> Transform {
    let (hl, hw) = (resolved.config.length / 2.0, resolved.config.width / 2.0);
    let (position, angle) = match side {
        Side::Left => (Vector3::new(-hl, y, -hw - overhang), 0.0),
        Side::Front => (Vector3::new(-hl - overhang, y, hw), FRAC_PI_2),
        Side::Right => (Vector3::new(hl, y, hw + overhang), PI),
        Side::Back => (Vector3::new(hl + overhang, y, -hw), -FRAC_PI_2),
    };
    Transform::from_euler(position, 0.0, angle, 0.0)
}

/// Build the four mitred edges in front, back, left, right order
pub fn build_edges(
    resolved: &ResolvedConfig,
    miters: &MiterPlaneSet,
) -> Result<Vec<(Solid, Transform)>> {
    let c = &resolved.config;
    let profile = edge_profile(resolved);
    let ov = overhang(&profile);
    let y = edge_base_height(resolved);
    let material = Material::Sheet(c.material);

    Side::ALL
        .iter()
        .map(|&side| {
            let span = if side.is_long() { c.length } else { c.width };
            let solid = Solid::extruded(
                format!("edge-{}", side.name()),
                material,
                profile.clone(),
                span + 2.0 * ov,
            )?
            .trimmed(miters.for_side(side));
            Ok((solid, edge_transform(side, resolved, y, ov)))
        })
        .collect()
}
