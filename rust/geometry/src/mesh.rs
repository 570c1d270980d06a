// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures

use nalgebra::{Point3, Vector3};

/// Triangle mesh
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Vertex positions (x, y, z)
    pub positions: Vec<f32>,
    /// Vertex normals (nx, ny, nz)
    pub normals: Vec<f32>,
    /// Triangle indices (i0, i1, i2)
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Create a mesh with capacity
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
            indices: Vec::with_capacity(index_count),
        }
    }

    /// Add a vertex with normal
    #[inline]
    pub fn add_vertex(&mut self, position: Point3<f64>, normal: Vector3<f64>) {
        self.positions.push(position.x as f32);
        self.positions.push(position.y as f32);
        self.positions.push(position.z as f32);

        self.normals.push(normal.x as f32);
        self.normals.push(normal.y as f32);
        self.normals.push(normal.z as f32);
    }

    /// Add a triangle
    #[inline]
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position of vertex `index` in f64
    #[inline]
    pub fn position(&self, index: usize) -> Point3<f64> {
        let i = index * 3;
        Point3::new(
            self.positions[i] as f64,
            self.positions[i + 1] as f64,
            self.positions[i + 2] as f64,
        )
    }

    /// Iterate vertex positions in f64
    pub fn vertices(&self) -> impl Iterator<Item = Point3<f64>> + '_ {
        self.positions
            .chunks_exact(3)
            .map(|c| Point3::new(c[0] as f64, c[1] as f64, c[2] as f64))
    }

    /// Iterate triangles as corner positions
    pub fn triangles(&self) -> impl Iterator<Item = [Point3<f64>; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |t| {
            [
                self.position(t[0] as usize),
                self.position(t[1] as usize),
                self.position(t[2] as usize),
            ]
        })
    }

    /// Total surface area
    pub fn surface_area(&self) -> f64 {
        self.triangles()
            .map(|[a, b, c]| (b - a).cross(&(c - a)).norm() * 0.5)
            .sum()
    }

    /// Axis-aligned bounds (min, max); the origin twice for an empty mesh
    pub fn bounds(&self) -> (Point3<f32>, Point3<f32>) {
        let mut points = self
            .positions
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]));
        let Some(first) = points.next() else {
            return (Point3::origin(), Point3::origin());
        };
        points.fold((first, first), |(lo, hi), p| (lo.inf(&p), hi.sup(&p)))
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0), Vector3::z());
        mesh.add_vertex(Point3::new(1.0, 0.0, 0.0), Vector3::z());
        mesh.add_vertex(Point3::new(0.0, 1.0, 0.0), Vector3::z());
        mesh.add_triangle(0, 1, 2);
        mesh
    }

    #[test]
    fn test_mesh_creation() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_add_vertex() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(1.0, 2.0, 3.0), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.positions, vec![1.0, 2.0, 3.0]);
        assert_eq!(mesh.normals, vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_surface_area_and_bounds() {
        let mesh = unit_triangle();
        assert!((mesh.surface_area() - 0.5).abs() < 1e-9);

        let (min, max) = mesh.bounds();
        assert_eq!(min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(max, Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_triangles_and_vertices() {
        let mesh = unit_triangle();
        let tris: Vec<_> = mesh.triangles().collect();
        assert_eq!(tris.len(), 1);
        assert_eq!(tris[0][1], Point3::new(1.0, 0.0, 0.0));
        assert_eq!(mesh.vertices().count(), 3);
        assert_eq!(mesh.position(2), Point3::new(0.0, 1.0, 0.0));
    }
}
