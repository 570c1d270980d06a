// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Logical materials carried by solids. Appearance is resolved by the consumer.

use crate::config::{BoxMaterial, RubberColor};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Material {
    /// Box body sheet, also used for handle hardware and wheel hubs
    Sheet(BoxMaterial),
    /// Handle grip sleeves and lid straps
    Rubber,
    /// Top rim lining
    Lining(RubberColor),
    /// Castor core and spokes
    Fibreglass,
    /// Castor tire
    WheelRubber,
}

impl Material {
    pub fn name(self) -> &'static str {
        match self {
            Material::Sheet(m) => m.name(),
            Material::Rubber => "rubber",
            Material::Lining(RubberColor::Black) => "rubberBlack",
            Material::Lining(RubberColor::Blue) => "rubberBlue",
            Material::Lining(RubberColor::Steel) => "rubberSteel",
            Material::Fibreglass => "fibreglass",
            Material::WheelRubber => "wheelRubber",
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
