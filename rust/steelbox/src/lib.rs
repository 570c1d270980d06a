// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Steelbox
//!
//! Parametric synthesizer for sheet-metal storage boxes. A flat set of
//! [`BoxParams`] is validated into a [`Configuration`] with derived
//! dimensions, then turned into a deterministic scene graph: a root
//! [`Assembly`] of named, material-tagged solids (base, walls, mitred top
//! edges and the optional lining, lid, lock, straps and castors).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use steelbox::{synthesize, write_obj, BoxParams};
//!
//! let params = BoxParams {
//!     length: 400.0,
//!     handles: true,
//!     ..Default::default()
//! };
//! let root = synthesize(&params)?;
//! let mut out = Vec::new();
//! write_obj(&root, &mut out)?;
//! # Ok::<(), steelbox::SynthError>(())
//! ```

pub mod config;
pub mod edges;
pub mod error;
pub mod export;
pub mod handle;
pub mod lid;
pub mod lining;
pub mod material;
pub mod panel;
pub mod ribs;
pub mod scene;
pub mod synth;
pub mod wheel;

pub use config::{
    derive_dimensions, resolve, BoxMaterial, BoxParams, Configuration, DerivedDimensions, Finish,
    HandleStyle, LidStyle, ResolvedConfig, RubberColor, RubberLining, TopStyle, Tuning,
};
pub use error::{Result, SynthError};
pub use export::{write_obj, MaterialTally, SceneSummary};
pub use material::Material;
pub use panel::{compose_wall, perforation_pattern, ExclusionZone, PanelHandle, WallPanel};
pub use ribs::{band_heights, split_band, RibExclusion, RibSegment};
pub use scene::{Assembly, FlatSolid, Node, Placed, Shape, Solid, Transform};
pub use synth::{synthesize, synthesize_resolved};

pub use steelbox_geometry::{MiterPlaneSet, Side};
