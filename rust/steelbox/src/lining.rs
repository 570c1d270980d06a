// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rubber lining strips along the top rim.

use crate::config::{ResolvedConfig, RubberLining};
use crate::error::Result;
use crate::material::Material;
use crate::scene::{Assembly, Solid, Transform};
use nalgebra::Vector3;
use std::f64::consts::FRAC_PI_2;
use steelbox_geometry::profiles::rubber_lining;
use steelbox_geometry::Side;

/// Lining assembly, one strip per side, sitting on the rim
pub fn build_lining(resolved: &ResolvedConfig, lining: &RubberLining) -> Result<Assembly> {
    let (l, w) = (resolved.config.length, resolved.config.width);
    let y = resolved.dims.rim_height;
    let t = lining.thickness;
    let material = Material::Lining(lining.color);

    let mut assembly = Assembly::new("lining");
    for side in Side::ALL {
        let span = if side.is_long() { l } else { w };
        let profile = rubber_lining(span, t, lining.height, lining.overhang);
        let solid = Solid::extruded(format!("lining-{}", side.name()), material, profile, t)?;

        // Strips are centered through their thickness on the wall plane
        let transform = match side {
            Side::Front => Transform::from_translation(-l / 2.0, y, w / 2.0 - t / 2.0),
            Side::Back => Transform::from_translation(-l / 2.0, y, -w / 2.0 - t / 2.0),
            Side::Left => Transform::from_euler(
                Vector3::new(-l / 2.0 - t / 2.0, y, w / 2.0),
                0.0,
                FRAC_PI_2,
                0.0,
            ),
            Side::Right => Transform::from_euler(
                Vector3::new(l / 2.0 - t / 2.0, y, w / 2.0),
                0.0,
                FRAC_PI_2,
                0.0,
            ),
        };
        assembly.add_solid(solid, transform);
    }
    Ok(assembly)
}
