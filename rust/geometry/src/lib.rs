// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Steelbox Geometry
//!
//! Geometry primitives for the sheet-metal box synthesizer: 2D profiles and
//! the builders for every cross-section the box uses, straight extrusion into
//! triangle meshes (earcutr caps), and half-space clipping including the
//! diagonal miter planes that trim the top edges.

pub mod clipping;
pub mod error;
pub mod extrusion;
pub mod mesh;
pub mod miter;
pub mod profile;
pub mod profiles;

// Re-export nalgebra types for convenience
pub use nalgebra::{Isometry3, Matrix4, Point2, Point3, UnitQuaternion, Vector2, Vector3};

pub use clipping::{ClipResult, ClippingProcessor, HalfSpace, Triangle};
pub use error::{Error, Result};
pub use extrusion::{apply_transform, extrude_profile};
pub use mesh::Mesh;
pub use miter::{MiterPlaneSet, Side};
pub use profile::{
    calculate_circle_segments, circle_points, create_circle, create_circle_with_segments,
    create_rectangle, Profile2D,
};
