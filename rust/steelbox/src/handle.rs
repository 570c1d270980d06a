// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Handle hardware for the two handle-bearing sides.
//!
//! Both builders work in a handle frame centered on the handle center of the
//! wall, X along the wall, Y up and Z pointing out of the box.

use crate::config::{DerivedDimensions, RIM_DEPTH, RIM_THICKNESS};
use crate::error::Result;
use crate::material::Material;
use crate::scene::{Assembly, Solid, Transform};
use nalgebra::Vector3;
use std::f64::consts::FRAC_PI_2;
use steelbox_geometry::profiles::{handle_rim, pill};
use steelbox_geometry::Profile2D;

const TUBE_SEGMENTS: usize = 16;
const BOLT_RADIUS: f64 = 4.0;
const BOLT_SEGMENTS: usize = 6;

/// Pill cutout of an integrated handle, centered on the origin
pub fn cutout(dims: &DerivedDimensions) -> Profile2D {
    pill(dims.pill_width(), dims.pill_height())
}

/// Outer size of the integrated rim, the area the cutout keeps clear
pub fn rim_outer_size(dims: &DerivedDimensions) -> (f64, f64) {
    (
        dims.pill_width() + 2.0 * RIM_THICKNESS,
        dims.pill_height() + 2.0 * RIM_THICKNESS,
    )
}

/// Rim recessed behind an integrated cutout
///
/// Extruded from `z = -RIM_DEPTH` to `0`, so placing it at the inner face of
/// the wall puts it fully inside the box.
pub fn integrated_rim(dims: &DerivedDimensions, material: Material) -> Result<Solid> {
    let profile = handle_rim(dims.pill_width(), dims.pill_height(), RIM_THICKNESS);
    Solid::extruded("rim", material, profile, RIM_DEPTH)
}

/// Transform placing the rim behind a wall of thickness `t`
pub fn rim_transform(center_y: f64, t: f64) -> Transform {
    Transform::from_translation(0.0, center_y, -t / 2.0 - RIM_DEPTH)
}

/// Bolt-on handle: base plate, two vertical tubes, grip, rubber sleeve and
/// four bolts
///
/// The plate sits on `z = 0` (the outer wall face) and the tubes stand off
/// by the plate depth.
pub fn bolt_on(dims: &DerivedDimensions, material: Material) -> Result<Assembly> {
    let mut handle = Assembly::new("handle");

    let plate_t = dims.base_plate_thickness;
    handle.add_solid(
        Solid::cuboid(
            "plate",
            material,
            dims.base_plate_width,
            dims.base_plate_height,
            plate_t,
        )?,
        Transform::from_translation(0.0, 0.0, plate_t / 2.0),
    );

    let r = dims.handle_tube_radius;
    let half_w = dims.handle_width / 2.0;
    let standoff = dims.base_plate_depth;
    for (name, x) in [("tube-left", -half_w), ("tube-right", half_w)] {
        handle.add_solid(
            Solid::cylinder(name, material, r, dims.handle_height, TUBE_SEGMENTS)?,
            Transform::from_translation(x, 0.0, standoff),
        );
    }

    // Grip joins the lower tube ends
    let grip_y = -dims.handle_height / 2.0;
    let grip_len = dims.handle_width - 2.0 * r;
    let lying = |y: f64| Transform::from_euler(Vector3::new(0.0, y, standoff), 0.0, 0.0, FRAC_PI_2);
    handle.add_solid(
        Solid::cylinder("grip", material, r, grip_len, TUBE_SEGMENTS)?,
        lying(grip_y),
    );

    let sleeve_len = dims.handle_width - 4.0 * r;
    if sleeve_len > 0.0 {
        handle.add_solid(
            Solid::cylinder(
                "sleeve",
                Material::Rubber,
                r + dims.rubber_grip_thickness,
                sleeve_len,
                TUBE_SEGMENTS,
            )?,
            lying(grip_y),
        );
    }

    for (i, (x, y)) in bolt_positions(dims).into_iter().enumerate() {
        handle.add_solid(
            Solid::cylinder(
                format!("bolt-{}", i),
                material,
                BOLT_RADIUS,
                2.0 * plate_t,
                BOLT_SEGMENTS,
            )?,
            Transform::from_euler(Vector3::new(x, y, plate_t / 2.0), FRAC_PI_2, 0.0, 0.0),
        );
    }

    Ok(handle)
}

/// Bolt centers on the base plate, a third of the plate size from its center
pub fn bolt_positions(dims: &DerivedDimensions) -> [(f64, f64); 4] {
    let bx = dims.base_plate_width / 3.0;
    let by = dims.base_plate_height / 3.0;
    [(-bx, -by), (bx, -by), (-bx, by), (bx, by)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{resolve, BoxMaterial, BoxParams};
    use approx::assert_relative_eq;

    const STEEL: Material = Material::Sheet(BoxMaterial::Steel);

    fn dims() -> DerivedDimensions {
        resolve(&BoxParams::default()).unwrap().dims
    }

    #[test]
    fn test_bolt_on_parts() {
        let handle = bolt_on(&dims(), STEEL).unwrap();
        assert_eq!(handle.solid_count(), 9);
        assert!(handle.child("plate").is_some());
        assert!(handle.child("sleeve").is_some());
        assert!(handle.child("bolt-3").is_some());
    }

    #[test]
    fn test_bolts_inside_plate() {
        let d = dims();
        for (x, y) in bolt_positions(&d) {
            assert!(x.abs() + BOLT_RADIUS < d.base_plate_width / 2.0);
            assert!(y.abs() + BOLT_RADIUS < d.base_plate_height / 2.0);
        }
        // 90 mm plate puts the bolts 30 mm off center
        assert_relative_eq!(bolt_positions(&d)[3].1, 30.0);
    }

    #[test]
    fn test_grip_spans_between_tubes() {
        let d = dims();
        let flat = bolt_on(&d, STEEL).unwrap().flatten();
        let grip = flat.iter().find(|s| s.path == "grip").unwrap();
        let (min, max) = grip.mesh.bounds();
        let half = (d.handle_width / 2.0 - d.handle_tube_radius) as f32;
        assert_relative_eq!(min.x, -half, epsilon = 1e-3);
        assert_relative_eq!(max.x, half, epsilon = 1e-3);
        let sleeve = flat.iter().find(|s| s.path == "sleeve").unwrap();
        assert_eq!(sleeve.material, Material::Rubber);
    }

    #[test]
    fn test_rim_sits_behind_wall() {
        let d = dims();
        let rim = integrated_rim(&d, STEEL).unwrap();
        let (w, h) = rim_outer_size(&d);
        let (min, max) = rim.mesh.bounds();
        assert_relative_eq!((max.x - min.x) as f64, w, epsilon = 1e-3);
        assert_relative_eq!((max.y - min.y) as f64, h, epsilon = 1e-3);

        let t = rim_transform(10.0, 2.0);
        let back = t.transform_point(&nalgebra::Point3::new(0.0, 0.0, RIM_DEPTH));
        assert_relative_eq!(back.z, -1.0);
    }
}
