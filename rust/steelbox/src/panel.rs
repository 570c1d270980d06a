// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall panels
//!
//! Each side of the box is a wall assembly holding the sheet panel and
//! whatever hangs off it: the integrated handle rim or the bolt-on handle,
//! and the stiffening ribs.
//!
//! Panel frame: origin at the panel center, X along the wall, Y up and Z out
//! of the box. The sheet spans `z = -t/2 .. t/2`.

use crate::config::{Finish, HandleStyle, ResolvedConfig};
use crate::error::Result;
use crate::handle;
use crate::material::Material;
use crate::ribs::{self, RibExclusion};
use crate::scene::{Assembly, Solid, Transform};
use nalgebra::{Point2, Vector2, Vector3};
use std::f64::consts::{FRAC_PI_2, PI};
use steelbox_geometry::profiles::pill_points;
use steelbox_geometry::{circle_points, create_rectangle, Profile2D, Side};

/// Perforation hole radius
pub const HOLE_RADIUS: f64 = 1.5;
/// Center spacing of perforation holes
pub const HOLE_PITCH: f64 = 12.0;
/// Unperforated border around the panel edge
pub const HOLE_MARGIN: f64 = 12.0;
const HOLE_SEGMENTS: usize = 8;
/// Upper bound on hole rows and columns
const MAX_HOLE_SPAN: usize = 1024;

/// Handle treatment of a single panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelHandle {
    None,
    Integrated,
    BoltOn,
}

/// Area kept free of perforation, centered on the handle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExclusionZone {
    Rect { center: Point2<f64>, width: f64, height: f64 },
    Pill { center: Point2<f64>, width: f64, height: f64 },
}

impl ExclusionZone {
    /// True when a circle of `radius` at `point` touches the zone
    pub fn overlaps_circle(&self, point: &Point2<f64>, radius: f64) -> bool {
        match *self {
            ExclusionZone::Rect { center, width, height } => {
                let d = point - center;
                let nearest = Vector2::new(
                    d.x.clamp(-width / 2.0, width / 2.0),
                    d.y.clamp(-height / 2.0, height / 2.0),
                );
                (d - nearest).norm() < radius
            }
            ExclusionZone::Pill { center, width, height } => {
                // Distance to the pill's spine segment
                let r = width.min(height) / 2.0;
                let hx = (width / 2.0 - r).max(0.0);
                let hy = (height / 2.0 - r).max(0.0);
                let d = point - center;
                let nearest = Vector2::new(d.x.clamp(-hx, hx), d.y.clamp(-hy, hy));
                (d - nearest).norm() < r + radius
            }
        }
    }

    pub fn width(&self) -> f64 {
        match *self {
            ExclusionZone::Rect { width, .. } | ExclusionZone::Pill { width, .. } => width,
        }
    }

    pub fn height(&self) -> f64 {
        match *self {
            ExclusionZone::Rect { height, .. } | ExclusionZone::Pill { height, .. } => height,
        }
    }
}

/// Everything needed to build one wall
#[derive(Debug, Clone, PartialEq)]
pub struct WallPanel {
    pub side: Side,
    pub width: f64,
    pub height: f64,
    pub thickness: f64,
    pub finish: Finish,
    pub handle: PanelHandle,
    /// Handle center height above the panel bottom
    pub handle_center: f64,
    pub ribs: bool,
    pub material: Material,
}

impl WallPanel {
    pub fn for_side(resolved: &ResolvedConfig, side: Side) -> Self {
        let config = &resolved.config;
        let width = if side.is_long() { config.length } else { config.width };
        let height = resolved.dims.wall_height;
        let handle = match (side, config.handle) {
            (Side::Front | Side::Back, _) => PanelHandle::None,
            (_, HandleStyle::Integrated) => {
                if cutout_fits(resolved, width, height) {
                    PanelHandle::Integrated
                } else {
                    tracing::debug!(
                        side = side.name(),
                        width,
                        height,
                        "integrated handle does not fit the wall, leaving it out"
                    );
                    PanelHandle::None
                }
            }
            (_, HandleStyle::BoltOn) => PanelHandle::BoltOn,
        };
        Self {
            side,
            width,
            height,
            thickness: config.thickness,
            finish: config.finish,
            handle,
            handle_center: resolved.dims.handle_center_height,
            ribs: config.ribs,
            material: Material::Sheet(config.material),
        }
    }

    /// Handle center in panel coordinates
    pub fn handle_center_local(&self) -> Point2<f64> {
        Point2::new(0.0, self.handle_center - self.height / 2.0)
    }
}

/// True when the integrated rim lies fully inside a `width` × `height` wall
pub fn cutout_fits(resolved: &ResolvedConfig, width: f64, height: f64) -> bool {
    let (rim_w, rim_h) = handle::rim_outer_size(&resolved.dims);
    let center = resolved.dims.handle_center_height;
    rim_w < width && center - rim_h / 2.0 > 0.0 && center + rim_h / 2.0 < height
}

/// Centers of the perforation holes of a `width` × `height` panel, in
/// centered panel coordinates, row by row from the top
pub fn perforation_pattern(
    width: f64,
    height: f64,
    exclusion: Option<&ExclusionZone>,
) -> Vec<Point2<f64>> {
    let span = |extent: f64| {
        (((extent - 2.0 * HOLE_MARGIN) / HOLE_PITCH).floor().max(0.0) as usize).min(MAX_HOLE_SPAN)
    };
    let (rows, cols) = (span(height), span(width));
    let offset = HOLE_MARGIN + HOLE_PITCH / 2.0;

    let mut holes = Vec::with_capacity(rows.saturating_mul(cols));
    for i in 0..rows {
        let y = height / 2.0 - (offset + i as f64 * HOLE_PITCH);
        for j in 0..cols {
            let x = -width / 2.0 + offset + j as f64 * HOLE_PITCH;
            let center = Point2::new(x, y);
            if exclusion.map_or(true, |zone| !zone.overlaps_circle(&center, HOLE_RADIUS)) {
                holes.push(center);
            }
        }
    }
    holes
}

/// Perforation exclusion zone of a panel, if it carries a handle
pub fn exclusion_zone(panel: &WallPanel, resolved: &ResolvedConfig) -> Option<ExclusionZone> {
    let center = panel.handle_center_local();
    let dims = &resolved.dims;
    match panel.handle {
        PanelHandle::None => None,
        PanelHandle::BoltOn => Some(ExclusionZone::Rect {
            center,
            width: dims.base_plate_width,
            height: dims.base_plate_height,
        }),
        PanelHandle::Integrated => {
            let (width, height) = handle::rim_outer_size(dims);
            Some(ExclusionZone::Pill {
                center,
                width,
                height,
            })
        }
    }
}

/// Rib keep-out zone of a panel, if it carries a handle
pub fn rib_exclusion(panel: &WallPanel, resolved: &ResolvedConfig) -> Option<RibExclusion> {
    let dims = &resolved.dims;
    let (width, height) = match panel.handle {
        PanelHandle::None => return None,
        PanelHandle::BoltOn => (dims.base_plate_width, dims.base_plate_height),
        PanelHandle::Integrated => handle::rim_outer_size(dims),
    };
    Some(RibExclusion {
        center: panel.handle_center,
        height,
        width,
    })
}

/// Sheet silhouette of a panel with every hole loop cut in
pub fn panel_profile(panel: &WallPanel, resolved: &ResolvedConfig) -> Profile2D {
    let mut profile = create_rectangle(panel.width, panel.height);
    let center = panel.handle_center_local();

    if panel.handle == PanelHandle::Integrated {
        let mut cut = pill_points(resolved.dims.pill_width(), resolved.dims.pill_height());
        cut.reverse();
        profile.add_hole(cut.into_iter().map(|p| p + center.coords).collect());
    }

    if panel.finish == Finish::Perforated {
        let zone = exclusion_zone(panel, resolved);
        for hole in perforation_pattern(panel.width, panel.height, zone.as_ref()) {
            let mut ring = circle_points(hole, HOLE_RADIUS, HOLE_SEGMENTS);
            ring.reverse();
            profile.add_hole(ring);
        }
    }

    profile
}

/// Placement of a wall assembly in the box frame
pub fn side_transform(side: Side, resolved: &ResolvedConfig) -> Transform {
    let config = &resolved.config;
    let y = resolved.dims.wall_height / 2.0;
    let (hl, hw) = (config.length / 2.0, config.width / 2.0);
    let (position, angle) = match side {
        Side::Front => (Vector3::new(0.0, y, hw), 0.0),
        Side::Back => (Vector3::new(0.0, y, -hw), PI),
        Side::Left => (Vector3::new(-hl, y, 0.0), -FRAC_PI_2),
        Side::Right => (Vector3::new(hl, y, 0.0), FRAC_PI_2),
    };
    Transform::from_euler(position, 0.0, angle, 0.0)
}

/// Build the wall assembly of one side
pub fn compose_wall(resolved: &ResolvedConfig, side: Side) -> Result<Assembly> {
    let panel = WallPanel::for_side(resolved, side);
    let t = panel.thickness;
    let mut wall = Assembly::new(format!("wall-{}", side.name()));

    let profile = panel_profile(&panel, resolved);
    wall.add_solid(
        Solid::extruded("panel", panel.material, profile, t)?,
        Transform::from_translation(0.0, 0.0, -t / 2.0),
    );

    let center = panel.handle_center_local();
    match panel.handle {
        PanelHandle::None => {}
        PanelHandle::Integrated => {
            wall.add_solid(
                handle::integrated_rim(&resolved.dims, panel.material)?,
                handle::rim_transform(center.y, t),
            );
        }
        PanelHandle::BoltOn => {
            wall.add_assembly(
                handle::bolt_on(&resolved.dims, panel.material)?,
                Transform::from_translation(0.0, center.y, t / 2.0),
            );
        }
    }

    if panel.ribs {
        let exclusion = rib_exclusion(&panel, resolved);
        let segments = ribs::layout(panel.width, panel.height, exclusion.as_ref());
        for (solid, transform) in ribs::build(&segments, panel.width, panel.height, t, panel.material)? {
            wall.add_solid(solid, transform);
        }
    }

    tracing::debug!(
        side = side.name(),
        width = panel.width,
        height = panel.height,
        handle = ?panel.handle,
        solids = wall.solid_count(),
        "composed wall"
    );
    Ok(wall)
}
