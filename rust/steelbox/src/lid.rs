// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hinged lid, lock hardware and support straps.
//!
//! The lid is built in a hinge frame whose origin is the hinge axis at the
//! lid's back edge: the top panel lies on `y = 0 .. LID_THICKNESS` and runs
//! towards +Z. The hinge frame is placed above the box's back edge and
//! tilted open.

use crate::config::ResolvedConfig;
use crate::error::Result;
use crate::material::Material;
use crate::scene::{Assembly, Solid, Transform};
use nalgebra::Vector3;
use std::f64::consts::FRAC_PI_4;
use steelbox_geometry::profiles::{rounded_rect, strap};

pub const LID_THICKNESS: f64 = 2.0;
pub const LID_OVERHANG: f64 = 2.0;
pub const FLANGE_HEIGHT: f64 = 5.0;
pub const FLANGE_THICKNESS: f64 = 2.0;
/// Opening angle of the lid about its hinge
pub const LID_OPEN_ANGLE: f64 = FRAC_PI_4;

const LOCK_ROUNDNESS: f64 = 2.0;
const STRAP_WIDTH: f64 = 8.0;
const STRAP_LEG: f64 = 40.0;
const STRAP_DIAGONAL: (f64, f64) = (15.0, 14.0);
const STRAP_THICKNESS: f64 = 2.0;

/// Size of the lock parts for a box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LockDims {
    pub catch_size: Vector3<f64>,
    pub tab_size: Vector3<f64>,
    /// X offsets of the two locks
    pub offsets: [f64; 2],
}

impl LockDims {
    pub fn new(resolved: &ResolvedConfig) -> Self {
        let c = &resolved.config;
        let h = resolved.dims.total_height;
        Self {
            catch_size: Vector3::new(0.06 * c.length, 0.08 * h, 0.025 * c.width),
            tab_size: Vector3::new(0.05 * c.length, 0.09 * h, 0.0233 * c.width),
            offsets: [0.3 * c.length, -0.3 * c.length],
        }
    }
}

fn top_size(resolved: &ResolvedConfig) -> (f64, f64) {
    (
        resolved.config.length + 2.0 * LID_OVERHANG,
        resolved.config.width + 2.0 * LID_OVERHANG,
    )
}

fn lock_part(name: String, size: &Vector3<f64>, material: Material) -> Result<Solid> {
    Solid::extruded(name, material, rounded_rect(size.x, size.y, LOCK_ROUNDNESS), size.z)
}

/// Hinge frame: on the back edge of the rim, tilted open
pub fn hinge_transform(resolved: &ResolvedConfig) -> Transform {
    let clearance = resolved.config.tuning.hinge_clearance;
    Transform::from_euler(
        Vector3::new(
            0.0,
            resolved.dims.rim_height + clearance,
            -resolved.config.width / 2.0 - clearance,
        ),
        -LID_OPEN_ANGLE,
        0.0,
        0.0,
    )
}

/// Lid panel with its flanges, and lock tabs when the lid locks
pub fn build_lid(resolved: &ResolvedConfig) -> Result<Assembly> {
    let c = &resolved.config;
    let material = Material::Sheet(c.material);
    let (top_l, top_w) = top_size(resolved);
    let mut lid = Assembly::new("lid");

    lid.add_solid(
        Solid::cuboid("lid-top", material, top_l, LID_THICKNESS, top_w)?,
        Transform::from_translation(0.0, LID_THICKNESS / 2.0, top_w / 2.0),
    );

    let y = -FLANGE_HEIGHT / 2.0;
    let inset = c.tuning.flange_inset + FLANGE_THICKNESS / 2.0;
    let flanges = [
        ("flange-front", top_l, top_w - inset, true),
        ("flange-back", top_l, inset, true),
        ("flange-left", -top_l / 2.0 + inset, top_w / 2.0, false),
        ("flange-right", top_l / 2.0 - inset, top_w / 2.0, false),
    ];
    for (name, a, z, along_x) in flanges {
        let (solid, x) = if along_x {
            (
                Solid::cuboid(name, material, a, FLANGE_HEIGHT, FLANGE_THICKNESS)?,
                0.0,
            )
        } else {
            (
                Solid::cuboid(name, material, FLANGE_THICKNESS, FLANGE_HEIGHT, top_w)?,
                a,
            )
        };
        lid.add_solid(solid, Transform::from_translation(x, y, z));
    }

    if c.lid.has_lock() {
        let lock = LockDims::new(resolved);
        for (i, x) in lock.offsets.into_iter().enumerate() {
            lid.add_solid(
                lock_part(format!("tab-{}", i), &lock.tab_size, material)?,
                Transform::from_translation(x, -lock.tab_size.y / 2.0, top_w),
            );
        }
    }

    tracing::debug!(length = top_l, width = top_w, "built lid");
    Ok(lid)
}

/// Lock catches on the front wall of the box
pub fn build_catches(resolved: &ResolvedConfig) -> Result<Assembly> {
    let c = &resolved.config;
    let lock = LockDims::new(resolved);
    let material = Material::Sheet(c.material);
    let y = resolved.dims.total_height - lock.catch_size.y;
    let z = c.width / 2.0 + c.tuning.catch_standoff;

    let mut catches = Assembly::new("lock");
    for (i, x) in lock.offsets.into_iter().enumerate() {
        catches.add_solid(
            lock_part(format!("catch-{}", i), &lock.catch_size, material)?,
            Transform::from_translation(x, y, z),
        );
    }
    Ok(catches)
}

/// Two rubber straps near the back corners, tilted towards the open lid
pub fn build_straps(resolved: &ResolvedConfig) -> Result<Assembly> {
    let c = &resolved.config;
    let profile = strap(STRAP_WIDTH, STRAP_LEG, STRAP_DIAGONAL.0, STRAP_DIAGONAL.1);
    let tilt = 5.0_f64.to_radians();
    let y = resolved.dims.rim_height - 10.0;
    let z = -c.width / 2.0 + 3.0;

    let mut straps = Assembly::new("straps");
    for (name, x, yaw) in [
        ("strap-left", -c.length / 2.0 + 10.0, tilt),
        ("strap-right", c.length / 2.0 - 20.0, -tilt),
    ] {
        straps.add_solid(
            Solid::extruded(name, Material::Rubber, profile.clone(), STRAP_THICKNESS)?,
            Transform::from_euler(Vector3::new(x, y, z), tilt, yaw, 0.0),
        );
    }
    Ok(straps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{resolve, BoxParams};
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn resolved(params: BoxParams) -> ResolvedConfig {
        resolve(&params).unwrap()
    }

    #[test]
    fn test_lid_parts() {
        let r = resolved(BoxParams::default());
        let lid = build_lid(&r).unwrap();
        // Top, four flanges, two tabs
        assert_eq!(lid.solid_count(), 7);

        let r = resolved(BoxParams {
            lock: false,
            ..Default::default()
        });
        assert_eq!(build_lid(&r).unwrap().solid_count(), 5);
    }

    #[test]
    fn test_lid_panel_in_hinge_frame() {
        let r = resolved(BoxParams::default());
        let flat = build_lid(&r).unwrap().flatten();
        let top = flat.iter().find(|s| s.path == "lid-top").unwrap();
        let (min, max) = top.mesh.bounds();
        assert_relative_eq!(min.z, 0.0, epsilon = 1e-4);
        assert_relative_eq!(max.z, 204.0, epsilon = 1e-4);
        assert_relative_eq!(max.x, 102.0, epsilon = 1e-4);
        assert_relative_eq!(min.y, 0.0, epsilon = 1e-4);

        let front = flat.iter().find(|s| s.path == "flange-front").unwrap();
        let (min, max) = front.mesh.bounds();
        assert_relative_eq!(max.z, 204.0, epsilon = 1e-4);
        assert_relative_eq!(min.y, -5.0, epsilon = 1e-4);
        assert_relative_eq!(max.y, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_hinge_sits_above_back_edge() {
        let r = resolved(BoxParams::default());
        let hinge = hinge_transform(&r);
        let origin = hinge.transform_point(&Point3::origin());
        assert_relative_eq!(origin, Point3::new(0.0, 223.0, -103.0), epsilon = 1e-12);
        // Lid opens upwards at 45 degrees
        let front = hinge.transform_point(&Point3::new(0.0, 0.0, 1.0)) - origin;
        assert_relative_eq!(front.y, front.z, epsilon = 1e-12);
        assert!(front.y > 0.0);
    }

    #[test]
    fn test_catches_on_front_wall() {
        let r = resolved(BoxParams {
            length: 300.0,
            ..Default::default()
        });
        let lock = LockDims::new(&r);
        assert_relative_eq!(lock.catch_size.x, 18.0, epsilon = 1e-9);
        assert_relative_eq!(lock.catch_size.y, 17.6, epsilon = 1e-9);
        assert_relative_eq!(lock.catch_size.z, 5.0, epsilon = 1e-9);

        let flat = build_catches(&r).unwrap().flatten();
        assert_eq!(flat.len(), 2);
        let (min, max) = flat[0].mesh.bounds();
        assert_relative_eq!(min.z, 101.0, epsilon = 1e-4);
        assert_relative_eq!(max.z, 106.0, epsilon = 1e-4);
        assert_relative_eq!(((min.x + max.x) / 2.0) as f64, 90.0, epsilon = 1e-4);
        assert_relative_eq!(((min.y + max.y) / 2.0) as f64, 220.0 - 17.6, epsilon = 1e-4);
    }

    #[test]
    fn test_straps_are_rubber() {
        let r = resolved(BoxParams {
            straps: true,
            ..Default::default()
        });
        let straps = build_straps(&r).unwrap();
        assert_eq!(straps.solid_count(), 2);
        assert!(straps
            .flatten()
            .iter()
            .all(|s| s.material == Material::Rubber));
    }
}
