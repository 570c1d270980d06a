// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for box synthesis.

use thiserror::Error;

/// Result type alias for synthesis operations.
pub type Result<T> = std::result::Result<T, SynthError>;

/// Errors that can occur while resolving parameters or building the box.
#[derive(Debug, Error)]
pub enum SynthError {
    /// A dimension is non-positive, non-finite or otherwise unusable.
    #[error("invalid dimension `{name}`: {value}")]
    InvalidDimension { name: &'static str, value: f64 },

    /// The material selector or rubber color names no known material.
    #[error("unknown material: {0}")]
    UnknownMaterial(String),

    /// A profile or extrusion could not be built.
    #[error("geometry error: {0}")]
    Geometry(#[from] steelbox_geometry::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SynthError {
    pub(crate) fn dimension(name: &'static str, value: f64) -> Self {
        SynthError::InvalidDimension { name, value }
    }
}
