// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene graph: solids, transforms and assemblies.
//!
//! The tree is strictly owned; every node sits in exactly one parent. Frames
//! follow the box convention: Y up, length along X, width along Z.
//!
//! Clipping half-spaces on a solid are expressed in the root frame and are
//! only applied by [`Assembly::flatten`]; stored meshes are never trimmed.

use crate::error::Result;
use crate::material::Material;
use nalgebra::{Isometry3, Matrix4, Point3, Translation3, Unit, UnitQuaternion, Vector3};
use smallvec::SmallVec;
use steelbox_geometry::{
    apply_transform, create_circle_with_segments, create_rectangle, extrude_profile,
    ClippingProcessor, HalfSpace, Mesh, Profile2D,
};

/// Rigid placement of a node inside its parent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vector3<f64>,
    pub rotation: UnitQuaternion<f64>,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            translation: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
        }
    }

    pub fn from_translation(x: f64, y: f64, z: f64) -> Self {
        Self {
            translation: Vector3::new(x, y, z),
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Translation plus an intrinsic X-then-Y-then-Z Euler rotation
    pub fn from_euler(translation: Vector3<f64>, x: f64, y: f64, z: f64) -> Self {
        let qx = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), x);
        let qy = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), y);
        let qz = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), z);
        Self {
            translation,
            rotation: qx * qy * qz,
        }
    }

    pub fn from_axis_angle(translation: Vector3<f64>, axis: Unit<Vector3<f64>>, angle: f64) -> Self {
        Self {
            translation,
            rotation: UnitQuaternion::from_axis_angle(&axis, angle),
        }
    }

    /// Child transform expressed in this transform's parent frame
    pub fn then(&self, child: &Transform) -> Transform {
        Transform {
            translation: self.translation + self.rotation * child.translation,
            rotation: self.rotation * child.rotation,
        }
    }

    pub fn to_isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(Translation3::from(self.translation), self.rotation)
    }

    pub fn to_matrix(&self) -> Matrix4<f64> {
        self.to_isometry().to_homogeneous()
    }

    pub fn transform_point(&self, p: &Point3<f64>) -> Point3<f64> {
        self.to_isometry().transform_point(p)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// How a solid was generated
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Profile swept along local +Z from 0 to `depth`
    Extrusion { profile: Profile2D, depth: f64 },
    /// Axis-aligned box centered on the origin
    Cuboid { size: Vector3<f64> },
    /// Cylinder along local Y, centered on the origin
    Cylinder { radius: f64, height: f64, segments: usize },
}

/// A meshed solid tagged with a logical material
#[derive(Debug, Clone, PartialEq)]
pub struct Solid {
    pub name: String,
    pub material: Material,
    pub shape: Shape,
    pub mesh: Mesh,
    /// Root-frame half-spaces the solid is trimmed to
    pub clipping: SmallVec<[HalfSpace; 2]>,
}

impl Solid {
    pub fn extruded(
        name: impl Into<String>,
        material: Material,
        profile: Profile2D,
        depth: f64,
    ) -> Result<Self> {
        let mesh = extrude_profile(&profile, depth, None)?;
        Ok(Self {
            name: name.into(),
            material,
            shape: Shape::Extrusion { profile, depth },
            mesh,
            clipping: SmallVec::new(),
        })
    }

    pub fn cuboid(
        name: impl Into<String>,
        material: Material,
        width: f64,
        height: f64,
        depth: f64,
    ) -> Result<Self> {
        let center = Matrix4::new_translation(&Vector3::new(0.0, 0.0, -depth / 2.0));
        let mesh = extrude_profile(&create_rectangle(width, height), depth, Some(center))?;
        Ok(Self {
            name: name.into(),
            material,
            shape: Shape::Cuboid {
                size: Vector3::new(width, height, depth),
            },
            mesh,
            clipping: SmallVec::new(),
        })
    }

    pub fn cylinder(
        name: impl Into<String>,
        material: Material,
        radius: f64,
        height: f64,
        segments: usize,
    ) -> Result<Self> {
        // Sweep along Z, then stand the axis up along Y
        let upright = Matrix4::from_axis_angle(&Vector3::x_axis(), -std::f64::consts::FRAC_PI_2)
            * Matrix4::new_translation(&Vector3::new(0.0, 0.0, -height / 2.0));
        let profile = create_circle_with_segments(radius, segments);
        let mesh = extrude_profile(&profile, height, Some(upright))?;
        Ok(Self {
            name: name.into(),
            material,
            shape: Shape::Cylinder {
                radius,
                height,
                segments,
            },
            mesh,
            clipping: SmallVec::new(),
        })
    }

    /// Attach trimming half-spaces
    pub fn trimmed(mut self, planes: impl IntoIterator<Item = HalfSpace>) -> Self {
        self.clipping.extend(planes);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Solid(Solid),
    Assembly(Assembly),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Solid(s) => &s.name,
            Node::Assembly(a) => &a.name,
        }
    }
}

/// A node with its placement in the parent
#[derive(Debug, Clone, PartialEq)]
pub struct Placed {
    pub node: Node,
    pub transform: Transform,
}

/// Named ordered collection of placed nodes
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    pub name: String,
    pub children: Vec<Placed>,
}

/// A solid with world transform and clipping applied
#[derive(Debug, Clone)]
pub struct FlatSolid {
    /// Slash-separated path from the root
    pub path: String,
    pub material: Material,
    pub mesh: Mesh,
}

impl Assembly {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn add_solid(&mut self, solid: Solid, transform: Transform) {
        self.children.push(Placed {
            node: Node::Solid(solid),
            transform,
        });
    }

    pub fn add_assembly(&mut self, assembly: Assembly, transform: Transform) {
        self.children.push(Placed {
            node: Node::Assembly(assembly),
            transform,
        });
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes below this assembly
    pub fn node_count(&self) -> usize {
        self.children
            .iter()
            .map(|p| match &p.node {
                Node::Solid(_) => 1,
                Node::Assembly(a) => 1 + a.node_count(),
            })
            .sum()
    }

    /// Number of solids below this assembly
    pub fn solid_count(&self) -> usize {
        self.children
            .iter()
            .map(|p| match &p.node {
                Node::Solid(_) => 1,
                Node::Assembly(a) => a.solid_count(),
            })
            .sum()
    }

    /// Direct child by name
    pub fn child(&self, name: &str) -> Option<&Placed> {
        self.children.iter().find(|p| p.node.name() == name)
    }

    /// Direct child assembly by name
    pub fn child_assembly(&self, name: &str) -> Option<&Assembly> {
        self.child(name).and_then(|p| match &p.node {
            Node::Assembly(a) => Some(a),
            Node::Solid(_) => None,
        })
    }

    /// Depth-first search for a node by name
    pub fn find(&self, name: &str) -> Option<&Node> {
        self.children.iter().find_map(|p| {
            if p.node.name() == name {
                Some(&p.node)
            } else if let Node::Assembly(a) = &p.node {
                a.find(name)
            } else {
                None
            }
        })
    }

    /// Visit every solid with its transform relative to this assembly
    pub fn visit_solids<'a>(&'a self, visit: &mut dyn FnMut(&str, &'a Solid, &Transform)) {
        self.visit_inner("", &Transform::identity(), visit);
    }

    fn visit_inner<'a>(
        &'a self,
        prefix: &str,
        parent: &Transform,
        visit: &mut dyn FnMut(&str, &'a Solid, &Transform),
    ) {
        for placed in &self.children {
            let world = parent.then(&placed.transform);
            let path = if prefix.is_empty() {
                placed.node.name().to_string()
            } else {
                format!("{}/{}", prefix, placed.node.name())
            };
            match &placed.node {
                Node::Solid(solid) => visit(&path, solid, &world),
                Node::Assembly(a) => a.visit_inner(&path, &world, visit),
            }
        }
    }

    /// All solids in this assembly's frame with clipping applied
    pub fn flatten(&self) -> Vec<FlatSolid> {
        let clipper = ClippingProcessor::new();
        let mut out = Vec::with_capacity(self.solid_count());
        self.visit_solids(&mut |path, solid, world| {
            let mut mesh = solid.mesh.clone();
            apply_transform(&mut mesh, &world.to_matrix());
            if !solid.clipping.is_empty() {
                mesh = clipper.clip_mesh_all(&mesh, &solid.clipping);
            }
            out.push(FlatSolid {
                path: path.to_string(),
                material: solid.material,
                mesh,
            });
        });
        out
    }
}
