// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Half-space clipping
//!
//! A [`HalfSpace`] keeps every point with `normal·p + offset >= 0`. Meshes are
//! trimmed triangle by triangle; cut faces are left open, the same contract a
//! renderer's clipping planes give.

use crate::mesh::Mesh;
use nalgebra::{Point3, Vector3};

/// Oriented plane bounding a kept half of space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfSpace {
    /// Unit normal pointing into the kept side
    pub normal: Vector3<f64>,
    /// Signed offset along the normal
    pub offset: f64,
}

impl HalfSpace {
    /// Create a half-space; the normal is normalized and the offset scaled with it
    pub fn new(normal: Vector3<f64>, offset: f64) -> Self {
        let len = normal.norm();
        if len > 0.0 {
            Self {
                normal: normal / len,
                offset: offset / len,
            }
        } else {
            Self { normal, offset }
        }
    }

    /// Signed distance; positive values are on the kept side
    #[inline]
    pub fn signed_distance(&self, point: &Point3<f64>) -> f64 {
        self.normal.dot(&point.coords) + self.offset
    }

    /// True if the point is kept, within `epsilon`
    #[inline]
    pub fn contains(&self, point: &Point3<f64>, epsilon: f64) -> bool {
        self.signed_distance(point) >= -epsilon
    }
}

/// Triangle clipping result
#[derive(Debug, Clone)]
pub enum ClipResult {
    /// Triangle is completely on the kept side
    AllFront(Triangle),
    /// Triangle is completely discarded
    AllBehind,
    /// Triangle intersects the plane - returns the kept pieces
    Split(Vec<Triangle>),
}

/// Triangle definition
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub v0: Point3<f64>,
    pub v1: Point3<f64>,
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Create a new triangle
    pub fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Calculate triangle normal (zero for degenerate triangles)
    pub fn normal(&self) -> Vector3<f64> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        edge1
            .cross(&edge2)
            .try_normalize(1e-12)
            .unwrap_or_else(Vector3::zeros)
    }

    /// Calculate triangle area
    pub fn area(&self) -> f64 {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        edge1.cross(&edge2).norm() * 0.5
    }
}

/// Triangle clipper
pub struct ClippingProcessor {
    /// Epsilon for floating point comparisons
    pub epsilon: f64,
}

impl ClippingProcessor {
    /// Create a new clipping processor
    pub fn new() -> Self {
        Self { epsilon: 1e-6 }
    }

    /// Clip a triangle against a half-space
    /// Returns the pieces on the kept side, preserving winding
    pub fn clip_triangle(&self, triangle: &Triangle, plane: &HalfSpace) -> ClipResult {
        let verts = [triangle.v0, triangle.v1, triangle.v2];
        let dist = verts.map(|v| plane.signed_distance(&v));
        let keep = dist.map(|d| d >= -self.epsilon);
        let front_count = keep.iter().filter(|&&k| k).count();

        match front_count {
            0 => ClipResult::AllBehind,
            3 => ClipResult::AllFront(triangle.clone()),

            // One vertex kept - a single smaller triangle
            1 => {
                let a = keep.iter().position(|&k| k).unwrap_or(0);
                let (b, c) = ((a + 1) % 3, (a + 2) % 3);
                let p1 = lerp(&verts[a], &verts[b], dist[a], dist[b]);
                let p2 = lerp(&verts[a], &verts[c], dist[a], dist[c]);
                ClipResult::Split(vec![Triangle::new(verts[a], p1, p2)])
            }

            // Two vertices kept - a quad split into two triangles
            2 => {
                let back = keep.iter().position(|&k| !k).unwrap_or(0);
                let (f1, f2) = ((back + 1) % 3, (back + 2) % 3);
                let p1 = lerp(&verts[f1], &verts[back], dist[f1], dist[back]);
                let p2 = lerp(&verts[f2], &verts[back], dist[f2], dist[back]);
                ClipResult::Split(vec![
                    Triangle::new(verts[f1], verts[f2], p2),
                    Triangle::new(verts[f1], p2, p1),
                ])
            }

            _ => unreachable!(),
        }
    }

    /// Clip an entire mesh against a half-space
    pub fn clip_mesh(&self, mesh: &Mesh, plane: &HalfSpace) -> Mesh {
        self.clip_mesh_all(mesh, std::slice::from_ref(plane))
    }

    /// Clip a mesh against every half-space in turn (intersection of kept sides)
    pub fn clip_mesh_all(&self, mesh: &Mesh, planes: &[HalfSpace]) -> Mesh {
        if planes.is_empty() {
            return mesh.clone();
        }

        let mut result = Mesh::with_capacity(mesh.indices.len(), mesh.indices.len());
        let mut pending: Vec<Triangle> = Vec::with_capacity(4);
        let mut next: Vec<Triangle> = Vec::with_capacity(4);

        for [v0, v1, v2] in mesh.triangles() {
            pending.clear();
            pending.push(Triangle::new(v0, v1, v2));

            for plane in planes {
                next.clear();
                for tri in pending.drain(..) {
                    match self.clip_triangle(&tri, plane) {
                        ClipResult::AllFront(t) => next.push(t),
                        ClipResult::AllBehind => {}
                        ClipResult::Split(pieces) => next.extend(pieces),
                    }
                }
                std::mem::swap(&mut pending, &mut next);
                if pending.is_empty() {
                    break;
                }
            }

            for tri in &pending {
                if tri.area() > self.epsilon * self.epsilon {
                    add_triangle_to_mesh(&mut result, tri);
                }
            }
        }

        result
    }
}

impl Default for ClippingProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn lerp(from: &Point3<f64>, to: &Point3<f64>, d_from: f64, d_to: f64) -> Point3<f64> {
    let denom = d_from - d_to;
    let t = if denom.abs() > f64::EPSILON {
        (d_from / denom).clamp(0.0, 1.0)
    } else {
        0.0
    };
    from + (to - from) * t
}

/// Add a flat-shaded triangle to a mesh
fn add_triangle_to_mesh(mesh: &mut Mesh, triangle: &Triangle) {
    let base_idx = mesh.vertex_count() as u32;
    let normal = triangle.normal();

    mesh.add_vertex(triangle.v0, normal);
    mesh.add_vertex(triangle.v1, normal);
    mesh.add_vertex(triangle.v2, normal);

    mesh.add_triangle(base_idx, base_idx + 1, base_idx + 2);
}
