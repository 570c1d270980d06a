// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use approx::assert_relative_eq;
use std::f64::consts::FRAC_PI_2;
use steelbox_geometry::profiles::straight_lip;
use steelbox_geometry::{
    apply_transform, create_rectangle, extrude_profile, ClippingProcessor, Matrix4, MiterPlaneSet,
    Side, Vector2, Vector3,
};

/// Extrude a profile along the front side of a `size` × `size` footprint
fn front_edge(profile: &steelbox_geometry::Profile2D, size: f64, overhang: f64) -> steelbox_geometry::Mesh {
    let mut mesh = extrude_profile(profile, size + 2.0 * overhang, None).unwrap();
    let place = Matrix4::new_translation(&Vector3::new(-size / 2.0 - overhang, 0.0, size / 2.0))
        * Matrix4::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2);
    apply_transform(&mut mesh, &place);
    mesh
}

#[test]
fn test_plain_edge_becomes_trapezoid() {
    // 2 mm sheet, 10 mm tall, drawn inward from the wall plane
    let profile = create_rectangle(2.0, 10.0).translated(Vector2::new(1.0, 5.0));
    let mesh = front_edge(&profile, 100.0, 0.0);

    let set = MiterPlaneSet::new(100.0, 100.0, 0.0);
    let clipped = ClippingProcessor::new().clip_mesh_all(&mesh, &set.for_side(Side::Front));

    let (min, max) = clipped.bounds();
    assert_relative_eq!(min.x, -50.0, epsilon = 1e-4);
    assert_relative_eq!(max.x, 50.0, epsilon = 1e-4);
    assert_relative_eq!(min.z, 48.0, epsilon = 1e-4);

    // Inner face is shortened by the sheet thickness at each end
    let inner: Vec<_> = clipped
        .vertices()
        .filter(|v| (v.z - 48.0).abs() < 1e-4)
        .collect();
    let inner_max = inner.iter().map(|v| v.x).fold(f64::MIN, f64::max);
    assert_relative_eq!(inner_max, 48.0, epsilon = 1e-4);
    assert!(clipped.surface_area() < mesh.surface_area());
}

#[test]
fn test_hemmed_lip_fits_its_wedge() {
    let profile = straight_lip(2.0, 10.0);
    let (min, _) = profile.bounds();
    let overhang = -min.x;
    let mesh = front_edge(&profile, 200.0, overhang);

    let set = MiterPlaneSet::new(200.0, 200.0, 0.0);
    let planes = set.for_side(Side::Front);
    let clipped = ClippingProcessor::new().clip_mesh_all(&mesh, &planes);
    assert!(!clipped.is_empty());
    for v in clipped.vertices() {
        for plane in &planes {
            assert!(plane.contains(&v, 1e-3));
        }
    }

    // The hem reaches past the wall, so the cut extends past the corner
    let (_, max) = clipped.bounds();
    assert!(max.x > 100.0);
    assert!(max.x <= (100.0 + overhang) as f32 + 1e-3);
}

#[test]
fn test_neighbouring_edges_do_not_overlap() {
    let profile = create_rectangle(2.0, 10.0).translated(Vector2::new(1.0, 5.0));
    let set = MiterPlaneSet::new(100.0, 100.0, 0.0);
    let clipper = ClippingProcessor::new();
    let front = clipper.clip_mesh_all(&front_edge(&profile, 100.0, 0.0), &set.for_side(Side::Front));

    // Every front vertex is on or outside the right wedge
    let right = set.for_side(Side::Right);
    for v in front.vertices() {
        let inside_right = right.iter().all(|p| p.signed_distance(&v) > 1e-3);
        assert!(!inside_right);
    }
}
