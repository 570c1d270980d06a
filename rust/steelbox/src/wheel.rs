// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fixed castors under the four corners.

use crate::config::{BoxMaterial, ResolvedConfig};
use crate::error::Result;
use crate::material::Material;
use crate::scene::{Assembly, Solid, Transform};
use nalgebra::Vector3;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use steelbox_geometry::create_circle;

pub const WHEEL_RADIUS: f64 = 16.0;
pub const TIRE_RADIUS: f64 = 21.0;
pub const WHEEL_THICKNESS: f64 = 10.0;
/// Inset of the castor axis from the footprint edges
pub const WHEEL_OFFSET: f64 = 30.0;

const WHEEL_SEGMENTS: usize = 24;
const SPOKE_COUNT: usize = 6;
const HUB_RADIUS: f64 = 8.0;
const HUB_SEGMENTS: usize = 16;
const FORK_SIZE: (f64, f64, f64) = (15.0, 20.0, 5.0);
const MOUNT_SIZE: (f64, f64, f64) = (40.0, 3.0, 40.0);

/// Turns a Y-axis part onto the X axle
fn on_axle() -> Transform {
    Transform::from_euler(Vector3::zeros(), 0.0, 0.0, FRAC_PI_2)
}

/// One castor; the axle runs along X through the origin
pub fn castor(name: impl Into<String>, box_material: BoxMaterial) -> Result<Assembly> {
    let steel = Material::Sheet(BoxMaterial::Steel);
    let mut castor = Assembly::new(name);

    castor.add_solid(
        Solid::cylinder(
            "core",
            Material::Fibreglass,
            WHEEL_RADIUS,
            WHEEL_THICKNESS,
            WHEEL_SEGMENTS,
        )?,
        on_axle(),
    );

    castor.add_solid(
        Solid::extruded(
            "tire",
            Material::WheelRubber,
            create_circle(TIRE_RADIUS, Some(WHEEL_RADIUS)),
            WHEEL_THICKNESS,
        )?,
        Transform::from_euler(
            Vector3::new(-WHEEL_THICKNESS / 2.0, 0.0, 0.0),
            0.0,
            FRAC_PI_2,
            0.0,
        ),
    );

    let mut spokes = Assembly::new("spokes");
    for i in 0..SPOKE_COUNT {
        let angle = 2.0 * PI * i as f64 / SPOKE_COUNT as f64;
        let placement = Transform::from_axis_angle(Vector3::zeros(), Vector3::y_axis(), angle)
            .then(&Transform::from_translation(WHEEL_RADIUS / 2.0, 0.0, 0.0));
        spokes.add_solid(
            Solid::cuboid(format!("spoke-{}", i), Material::Fibreglass, WHEEL_RADIUS, 2.0, 4.0)?,
            placement,
        );
    }
    castor.add_assembly(spokes, on_axle());

    castor.add_solid(
        Solid::cylinder("hub", steel, HUB_RADIUS, WHEEL_THICKNESS + 2.0, HUB_SEGMENTS)?,
        on_axle(),
    );

    let (fw, fh, fd) = FORK_SIZE;
    for (name, x) in [("fork-left", -fw / 2.0), ("fork-right", fw / 2.0)] {
        castor.add_solid(
            Solid::cuboid(name, steel, fw, fh, fd)?,
            Transform::from_translation(x, fh / 2.0, 0.0),
        );
    }

    let (mw, mh, md) = MOUNT_SIZE;
    castor.add_solid(
        Solid::cuboid("mount-plate", Material::Sheet(box_material), mw, mh, md)?,
        Transform::from_translation(0.0, TIRE_RADIUS - mh / 2.0, 0.0),
    );

    Ok(castor)
}

/// Castor positions under the corners, axle at tire radius below the
/// underside of the base sheet
pub fn wheel_positions(resolved: &ResolvedConfig) -> [Vector3<f64>; 4] {
    let c = &resolved.config;
    let x = c.length / 2.0 - WHEEL_OFFSET;
    let z = c.width / 2.0 - WHEEL_OFFSET;
    let y = -c.thickness - TIRE_RADIUS;
    [
        Vector3::new(x, y, z),
        Vector3::new(-x, y, z),
        Vector3::new(x, y, -z),
        Vector3::new(-x, y, -z),
    ]
}

/// All four castors, turned 45° about Y
pub fn build_wheels(resolved: &ResolvedConfig) -> Result<Assembly> {
    let mut wheels = Assembly::new("wheels");
    for (i, position) in wheel_positions(resolved).into_iter().enumerate() {
        wheels.add_assembly(
            castor(format!("castor-{}", i), resolved.config.material)?,
            Transform::from_euler(position, 0.0, FRAC_PI_4, 0.0),
        );
    }
    Ok(wheels)
}
