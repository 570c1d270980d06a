// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wavefront OBJ export and scene statistics.

use crate::error::Result;
use crate::scene::{Assembly, FlatSolid};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::io::Write;

/// Write the flattened scene as OBJ, one object per solid
pub fn write_obj<W: Write>(root: &Assembly, writer: &mut W) -> Result<()> {
    let solids = root.flatten();
    writeln!(writer, "# {}", root.name)?;

    let mut base = 1usize;
    let mut triangles = 0usize;
    for solid in &solids {
        write_solid(writer, solid, base)?;
        base += solid.mesh.vertex_count();
        triangles += solid.mesh.triangle_count();
    }

    tracing::info!(
        objects = solids.len(),
        vertices = base - 1,
        triangles,
        "wrote OBJ"
    );
    Ok(())
}

fn write_solid<W: Write>(writer: &mut W, solid: &FlatSolid, base: usize) -> Result<()> {
    let mesh = &solid.mesh;
    writeln!(writer, "o {}", solid.path)?;
    writeln!(writer, "usemtl {}", solid.material)?;
    for p in mesh.positions.chunks_exact(3) {
        writeln!(writer, "v {} {} {}", p[0], p[1], p[2])?;
    }
    for n in mesh.normals.chunks_exact(3) {
        writeln!(writer, "vn {} {} {}", n[0], n[1], n[2])?;
    }
    for tri in mesh.indices.chunks_exact(3) {
        let (a, b, c) = (
            tri[0] as usize + base,
            tri[1] as usize + base,
            tri[2] as usize + base,
        );
        writeln!(writer, "f {a}//{a} {b}//{b} {c}//{c}")?;
    }
    Ok(())
}

/// Per-material tally in a [`SceneSummary`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialTally {
    pub material: String,
    pub solids: usize,
    pub triangles: usize,
}

/// Counts and extents of a synthesized scene
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneSummary {
    pub nodes: usize,
    pub solids: usize,
    pub triangles: usize,
    /// Sorted by material name
    pub materials: Vec<MaterialTally>,
    pub bounds_min: [f32; 3],
    pub bounds_max: [f32; 3],
}

impl SceneSummary {
    pub fn from_assembly(root: &Assembly) -> Self {
        let solids = root.flatten();
        let mut tallies: FxHashMap<&'static str, (usize, usize)> = FxHashMap::default();
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        let mut triangles = 0;

        for solid in &solids {
            let entry = tallies.entry(solid.material.name()).or_default();
            entry.0 += 1;
            entry.1 += solid.mesh.triangle_count();
            triangles += solid.mesh.triangle_count();
            if solid.mesh.is_empty() {
                continue;
            }
            let (lo, hi) = solid.mesh.bounds();
            for i in 0..3 {
                min[i] = min[i].min(lo[i]);
                max[i] = max[i].max(hi[i]);
            }
        }

        let mut materials: Vec<MaterialTally> = tallies
            .into_iter()
            .map(|(name, (solids, triangles))| MaterialTally {
                material: name.to_string(),
                solids,
                triangles,
            })
            .collect();
        materials.sort_by(|a, b| a.material.cmp(&b.material));

        if triangles == 0 {
            min = [0.0; 3];
            max = [0.0; 3];
        }

        Self {
            nodes: root.node_count(),
            solids: solids.len(),
            triangles,
            materials,
            bounds_min: min,
            bounds_max: max,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
