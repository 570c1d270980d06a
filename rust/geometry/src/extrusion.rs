// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extrusion operations - converting 2D profiles to 3D meshes

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::profile::{signed_area, Profile2D, Triangulation};
use nalgebra::{Matrix4, Point2, Point3, Vector3};

/// Extrude a 2D profile along the local +Z axis from z = 0 to z = `depth`
///
/// Caps are triangulated with earcutr; hole loops produce inner side walls.
/// Open profiles are closed by the chord between their end points.
#[inline]
pub fn extrude_profile(
    profile: &Profile2D,
    depth: f64,
    transform: Option<Matrix4<f64>>,
) -> Result<Mesh> {
    if !(depth > 0.0) || !depth.is_finite() {
        return Err(Error::InvalidExtrusion(format!(
            "Depth must be positive, got {}",
            depth
        )));
    }

    let triangulation = profile.triangulate()?;

    let outer = profile.ring();
    let side_vertex_count: usize =
        (outer.len() + profile.hole_rings().map(|h| h.len()).sum::<usize>()) * 4;
    let mut mesh = Mesh::with_capacity(
        triangulation.points.len() * 2 + side_vertex_count,
        triangulation.indices.len() * 2 + side_vertex_count * 3 / 2,
    );

    create_cap_mesh(&triangulation, 0.0, -1.0, &mut mesh);
    create_cap_mesh(&triangulation, depth, 1.0, &mut mesh);

    // Outer ring walls face away from the interior, hole walls face into the hole
    let outer_ccw = signed_area(outer) >= 0.0;
    create_side_walls(outer, depth, outer_ccw, &mut mesh);
    for hole in profile.hole_rings() {
        let hole_ccw = signed_area(hole) >= 0.0;
        create_side_walls(hole, depth, !hole_ccw, &mut mesh);
    }

    if let Some(mat) = transform {
        apply_transform(&mut mesh, &mat);
    }

    Ok(mesh)
}

/// Create a cap mesh (top or bottom) from triangulation
///
/// `facing` is +1 for the top cap and -1 for the bottom one; every triangle is
/// wound so its geometric normal agrees with the cap normal.
#[inline]
fn create_cap_mesh(triangulation: &Triangulation, z: f64, facing: f64, mesh: &mut Mesh) {
    let base_index = mesh.vertex_count() as u32;
    let normal = Vector3::new(0.0, 0.0, facing);

    for point in &triangulation.points {
        mesh.add_vertex(Point3::new(point.x, point.y, z), normal);
    }

    for tri in triangulation.indices.chunks_exact(3) {
        let (a, b, c) = (tri[0], tri[1], tri[2]);
        let ccw = cross_z(
            &triangulation.points[a],
            &triangulation.points[b],
            &triangulation.points[c],
        ) >= 0.0;
        let (i0, i1, i2) = (
            base_index + a as u32,
            base_index + b as u32,
            base_index + c as u32,
        );
        if ccw == (facing > 0.0) {
            mesh.add_triangle(i0, i1, i2);
        } else {
            mesh.add_triangle(i0, i2, i1);
        }
    }
}

#[inline]
fn cross_z(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Create side walls for a profile boundary
///
/// With `forward` set the ring is walked in stored order, otherwise in reverse.
/// The right-hand normal of each walked edge becomes the wall normal.
#[inline]
fn create_side_walls(boundary: &[Point2<f64>], depth: f64, forward: bool, mesh: &mut Mesh) {
    let n = boundary.len();
    let mut quad_count = 0u32;
    let base_index = mesh.vertex_count() as u32;

    for k in 0..n {
        let (i, j) = if forward { (k, (k + 1) % n) } else { ((k + 1) % n, k) };
        let p0 = &boundary[i];
        let p1 = &boundary[j];

        // Use try_normalize to skip degenerate edges
        let edge = Vector3::new(p1.x - p0.x, p1.y - p0.y, 0.0);
        let normal = match Vector3::new(edge.y, -edge.x, 0.0).try_normalize(1e-10) {
            Some(n) => n,
            None => continue,
        };

        let idx = base_index + quad_count * 4;
        mesh.add_vertex(Point3::new(p0.x, p0.y, 0.0), normal);
        mesh.add_vertex(Point3::new(p1.x, p1.y, 0.0), normal);
        mesh.add_vertex(Point3::new(p1.x, p1.y, depth), normal);
        mesh.add_vertex(Point3::new(p0.x, p0.y, depth), normal);

        mesh.add_triangle(idx, idx + 1, idx + 2);
        mesh.add_triangle(idx, idx + 2, idx + 3);

        quad_count += 1;
    }
}

/// Apply transformation matrix to mesh
#[inline]
pub fn apply_transform(mesh: &mut Mesh, transform: &Matrix4<f64>) {
    mesh.positions.chunks_exact_mut(3).for_each(|chunk| {
        let point = Point3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
        let transformed = transform.transform_point(&point);
        chunk[0] = transformed.x as f32;
        chunk[1] = transformed.y as f32;
        chunk[2] = transformed.z as f32;
    });

    // Normals use the inverse transpose
    let normal_matrix = transform.try_inverse().unwrap_or(*transform).transpose();

    mesh.normals.chunks_exact_mut(3).for_each(|chunk| {
        let normal = Vector3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
        let transformed = (normal_matrix * normal.to_homogeneous())
            .xyz()
            .try_normalize(1e-12)
            .unwrap_or(normal);
        chunk[0] = transformed.x as f32;
        chunk[1] = transformed.y as f32;
        chunk[2] = transformed.z as f32;
    });
}
