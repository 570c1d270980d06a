// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Box parameters, validation and derived dimensions.
//!
//! [`BoxParams`] is the raw, serde-friendly input with every field defaulted.
//! [`resolve`] validates it into an immutable [`Configuration`] and computes
//! the [`DerivedDimensions`] every downstream builder reads.

use crate::error::{Result, SynthError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Rib depth (bump amplitude)
pub const RIB_DEPTH: f64 = 4.0;
/// Rib width (bump span)
pub const RIB_WIDTH: f64 = 16.0;
/// Nominal vertical spacing between rib bands
pub const RIB_INTERVAL: f64 = 200.0;
/// Rim thickness around an integrated handle cutout
pub const RIM_THICKNESS: f64 = 4.0;
/// Depth of the integrated handle rim
pub const RIM_DEPTH: f64 = 6.0;

/// Raw box parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoxParams {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub thickness: f64,
    /// Bolt-on handles; otherwise the integrated cutout is used
    pub handles: bool,
    pub perforation: bool,
    pub wheels: bool,
    pub ribs: bool,
    pub straight_top: bool,
    pub rubber_lining: bool,
    pub lid: bool,
    pub lock: bool,
    pub straps: bool,
    pub hemmed_edges: bool,
    pub material: String,
    pub rubber_color: String,
    pub rubber_thickness: f64,
    pub rubber_height: f64,
    pub rubber_overhang: f64,
    pub step_height: f64,
    pub step_inset: f64,
    pub tuning: Tuning,
}

impl Default for BoxParams {
    fn default() -> Self {
        Self {
            length: 200.0,
            width: 200.0,
            height: 200.0,
            thickness: 2.0,
            handles: false,
            perforation: false,
            wheels: false,
            ribs: false,
            straight_top: true,
            rubber_lining: false,
            lid: true,
            lock: true,
            straps: false,
            hemmed_edges: false,
            material: "steel".into(),
            rubber_color: "blue".into(),
            rubber_thickness: 2.0,
            rubber_height: 5.0,
            rubber_overhang: 0.0,
            step_height: 5.0,
            step_inset: 5.0,
            tuning: Tuning::default(),
        }
    }
}

impl BoxParams {
    /// Parse parameters from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Small clearances that keep touching parts from coinciding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tuning {
    /// Gap between the box rim and the lid hinge axis
    pub hinge_clearance: f64,
    /// Gap between the front wall and a lock catch
    pub catch_standoff: f64,
    /// Inward shift of the lid flanges from the lid edge
    pub flange_inset: f64,
    /// Offset applied to every miter plane
    pub miter_offset: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            hinge_clearance: 3.0,
            catch_standoff: 1.0,
            flange_inset: 0.0,
            miter_offset: 0.0,
        }
    }
}

/// Sheet material of the box body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoxMaterial {
    Steel,
    MildSteel,
    DarkSteel,
    Aluminium,
}

impl BoxMaterial {
    pub fn name(self) -> &'static str {
        match self {
            BoxMaterial::Steel => "steel",
            BoxMaterial::MildSteel => "mildSteel",
            BoxMaterial::DarkSteel => "darkSteel",
            BoxMaterial::Aluminium => "aluminium",
        }
    }
}

impl FromStr for BoxMaterial {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "steel" => Ok(BoxMaterial::Steel),
            "mildSteel" => Ok(BoxMaterial::MildSteel),
            "darkSteel" => Ok(BoxMaterial::DarkSteel),
            "aluminium" => Ok(BoxMaterial::Aluminium),
            other => Err(SynthError::UnknownMaterial(other.to_string())),
        }
    }
}

/// Color of the rubber lining
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RubberColor {
    Black,
    Blue,
    Steel,
}

impl RubberColor {
    pub fn name(self) -> &'static str {
        match self {
            RubberColor::Black => "black",
            RubberColor::Blue => "blue",
            RubberColor::Steel => "steel",
        }
    }
}

impl FromStr for RubberColor {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "black" => Ok(RubberColor::Black),
            "blue" => Ok(RubberColor::Blue),
            "steel" => Ok(RubberColor::Steel),
            other => Err(SynthError::UnknownMaterial(format!("rubber color {}", other))),
        }
    }
}

/// How the handle-bearing sides are gripped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HandleStyle {
    /// Plate with tubular grip mounted outside the wall
    BoltOn,
    /// Pill cutout through the wall with a recessed rim
    Integrated,
}

/// Wall sheet finish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Finish {
    Solid,
    Perforated,
}

/// Treatment of the top rim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TopStyle {
    /// Walls run to full height and carry a hemmed lip
    Straight,
    /// Two-step folded edge above the walls
    Stepped { hemmed: bool },
}

/// Lid and the parts that only exist with it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LidStyle {
    None,
    Hinged { lock: bool, straps: bool },
}

impl LidStyle {
    pub fn has_lock(self) -> bool {
        matches!(self, LidStyle::Hinged { lock: true, .. })
    }

    pub fn has_straps(self) -> bool {
        matches!(self, LidStyle::Hinged { straps: true, .. })
    }
}

/// Rubber strip along the top rim
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RubberLining {
    pub color: RubberColor,
    pub thickness: f64,
    pub height: f64,
    pub overhang: f64,
}

/// Validated, immutable box configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Configuration {
    pub length: f64,
    pub width: f64,
    /// Requested height, before any top addend
    pub height: f64,
    pub thickness: f64,
    pub handle: HandleStyle,
    pub finish: Finish,
    pub wheels: bool,
    pub ribs: bool,
    pub top: TopStyle,
    pub rubber_lining: Option<RubberLining>,
    pub lid: LidStyle,
    pub material: BoxMaterial,
    pub step_height: f64,
    pub step_inset: f64,
    pub tuning: Tuning,
}

impl Configuration {
    pub fn is_straight_top(&self) -> bool {
        matches!(self.top, TopStyle::Straight)
    }

    /// Combined height of both steps, the addend a straight top carries
    pub fn step_addend(&self) -> f64 {
        2.0 * self.step_height + 2.0 * self.step_inset
    }
}

/// Scalars derived from the configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedDimensions {
    /// Requested height plus the straight-top addend
    pub total_height: f64,
    /// Height of the wall panels
    pub wall_height: f64,
    /// Height of the top of the rim (stepped edge or lip), where the lid sits
    pub rim_height: f64,
    pub base_plate_width: f64,
    pub base_plate_height: f64,
    pub base_plate_thickness: f64,
    /// Standoff of the handle grip from the wall
    pub base_plate_depth: f64,
    pub handle_width: f64,
    pub handle_height: f64,
    pub handle_tube_radius: f64,
    pub rubber_grip_thickness: f64,
    /// Height of the handle center above the base
    pub handle_center_height: f64,
    pub lining_vertical_offset: f64,
}

impl DerivedDimensions {
    /// Integrated handle cutout width
    pub fn pill_width(&self) -> f64 {
        0.8 * self.base_plate_width
    }

    /// Integrated handle cutout height
    pub fn pill_height(&self) -> f64 {
        0.3 * self.base_plate_height
    }
}

/// Configuration together with its derived dimensions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedConfig {
    pub config: Configuration,
    pub dims: DerivedDimensions,
}

fn positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SynthError::dimension(name, value))
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SynthError::dimension(name, value))
    }
}

/// Validate raw parameters and compute derived dimensions
pub fn resolve(params: &BoxParams) -> Result<ResolvedConfig> {
    let length = positive("length", params.length)?;
    let width = positive("width", params.width)?;
    let height = positive("height", params.height)?;
    let thickness = positive("thickness", params.thickness)?;
    let step_height = non_negative("stepHeight", params.step_height)?;
    let step_inset = non_negative("stepInset", params.step_inset)?;

    let material = BoxMaterial::from_str(&params.material)?;
    let rubber_color = RubberColor::from_str(&params.rubber_color)?;

    let rubber_lining = if params.rubber_lining {
        Some(RubberLining {
            color: rubber_color,
            thickness: positive("rubberThickness", params.rubber_thickness)?,
            height: positive("rubberHeight", params.rubber_height)?,
            overhang: non_negative("rubberOverhang", params.rubber_overhang)?,
        })
    } else {
        None
    };

    let lid = if params.lid {
        LidStyle::Hinged {
            lock: params.lock,
            straps: params.straps,
        }
    } else {
        if params.lock || params.straps {
            tracing::debug!(
                lock = params.lock,
                straps = params.straps,
                "lock and straps need a lid, dropping them"
            );
        }
        LidStyle::None
    };

    let top = if params.straight_top {
        TopStyle::Straight
    } else {
        // The stepped fold self-intersects unless the sheet is thinner than the inset
        if thickness >= step_inset {
            return Err(SynthError::dimension("stepInset", step_inset));
        }
        TopStyle::Stepped {
            hemmed: params.hemmed_edges,
        }
    };

    let tuning = params.tuning;
    for (name, value) in [
        ("hingeClearance", tuning.hinge_clearance),
        ("catchStandoff", tuning.catch_standoff),
        ("flangeInset", tuning.flange_inset),
        ("miterOffset", tuning.miter_offset),
    ] {
        non_negative(name, value)?;
    }

    let config = Configuration {
        length,
        width,
        height,
        thickness,
        handle: if params.handles {
            HandleStyle::BoltOn
        } else {
            HandleStyle::Integrated
        },
        finish: if params.perforation {
            Finish::Perforated
        } else {
            Finish::Solid
        },
        wheels: params.wheels,
        ribs: params.ribs,
        top,
        rubber_lining,
        lid,
        material,
        step_height,
        step_inset,
        tuning,
    };

    let dims = derive_dimensions(&config);
    Ok(ResolvedConfig { config, dims })
}

/// Compute derived dimensions of an already validated configuration
pub fn derive_dimensions(config: &Configuration) -> DerivedDimensions {
    let width = config.width;
    let addend = config.step_addend();

    let total_height = config.height + if config.is_straight_top() { addend } else { 0.0 };
    let wall_height = if config.is_straight_top() {
        total_height
    } else {
        config.height
    };
    let lining_vertical_offset = if config.is_straight_top() { 0.0 } else { addend };

    let base_plate_width = (0.6 * width).min(130.0);
    let base_plate_height = (0.45 * width).min(95.0);

    DerivedDimensions {
        total_height,
        wall_height,
        rim_height: wall_height + lining_vertical_offset,
        base_plate_width,
        base_plate_height,
        base_plate_thickness: (0.015 * width).max(3.0),
        base_plate_depth: (0.05 * width).max(10.0),
        handle_width: 0.75 * base_plate_width,
        handle_height: 0.4 * base_plate_height,
        handle_tube_radius: (0.015 * width).max(3.0),
        rubber_grip_thickness: (0.005 * width).max(1.0),
        handle_center_height: 0.7 * wall_height,
        lining_vertical_offset,
    }
}
