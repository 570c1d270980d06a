// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Top-level box synthesis.
//!
//! Root children, in order: `base`, the four `wall-*` assemblies, the four
//! `edge-*` solids, then the optional `lining`, `lid`, `lock`, `straps` and
//! `wheels`.

use crate::config::{resolve, BoxParams, LidStyle, ResolvedConfig};
use crate::edges::build_edges;
use crate::error::Result;
use crate::lid::{build_catches, build_lid, build_straps, hinge_transform};
use crate::lining::build_lining;
use crate::material::Material;
use crate::panel::{compose_wall, side_transform};
use crate::scene::{Assembly, Solid, Transform};
use crate::wheel::build_wheels;
use steelbox_geometry::{MiterPlaneSet, Side};

/// Validate `params` and build the box
pub fn synthesize(params: &BoxParams) -> Result<Assembly> {
    let resolved = resolve(params)?;
    synthesize_resolved(&resolved)
}

/// Build the box of an already validated configuration
pub fn synthesize_resolved(resolved: &ResolvedConfig) -> Result<Assembly> {
    let c = &resolved.config;
    let dims = &resolved.dims;
    tracing::info!(
        length = c.length,
        width = c.width,
        height = dims.total_height,
        material = c.material.name(),
        "synthesizing box"
    );

    let mut root = Assembly::new("box");

    root.add_solid(
        Solid::cuboid("base", Material::Sheet(c.material), c.length, c.thickness, c.width)?,
        Transform::from_translation(0.0, -c.thickness / 2.0, 0.0),
    );

    for side in Side::ALL {
        root.add_assembly(compose_wall(resolved, side)?, side_transform(side, resolved));
    }

    let miters = MiterPlaneSet::new(c.length, c.width, c.tuning.miter_offset);
    for (solid, transform) in build_edges(resolved, &miters)? {
        root.add_solid(solid, transform);
    }

    if let Some(lining) = &c.rubber_lining {
        root.add_assembly(build_lining(resolved, lining)?, Transform::identity());
    }

    if c.lid != LidStyle::None {
        root.add_assembly(build_lid(resolved)?, hinge_transform(resolved));
        if c.lid.has_lock() {
            root.add_assembly(build_catches(resolved)?, Transform::identity());
        }
        if c.lid.has_straps() {
            root.add_assembly(build_straps(resolved)?, Transform::identity());
        }
    }

    if c.wheels {
        root.add_assembly(build_wheels(resolved)?, Transform::identity());
    }

    tracing::debug!(
        nodes = root.node_count(),
        solids = root.solid_count(),
        "box synthesized"
    );
    Ok(root)
}
