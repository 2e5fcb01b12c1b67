// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Roof shape classification and cross-section profiles

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// One point of a roof half-profile
///
/// `radial` is the fraction of the eave-to-ridge distance still remaining
/// (1 at the eave, 0 at the ridge) and `height` the fraction of the roof height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfilePoint {
    pub radial: f32,
    pub height: f32,
}

const fn pp(radial: f32, height: f32) -> ProfilePoint {
    ProfilePoint { radial, height }
}

const ONION_PROFILE: [ProfilePoint; 8] = [
    pp(1.0, 0.0),
    pp(0.2, 0.01),
    pp(0.875, 0.1875),
    pp(1.0, 0.375),
    pp(0.875, 0.5625),
    pp(0.5, 0.75),
    pp(0.2, 0.8125),
    pp(0.0, 1.0),
];

const DOME_PROFILE: [ProfilePoint; 4] = [
    pp(1.0, 0.0),
    pp(0.825, 0.5),
    pp(0.5, 0.825),
    pp(0.0, 1.0),
];

const SALTBOX_PROFILE: [ProfilePoint; 3] = [pp(1.0, 0.0), pp(0.5, 1.0), pp(0.0, 1.0)];

const MANSARD_PROFILE: [ProfilePoint; 3] = [pp(1.0, 0.0), pp(0.75, 0.75), pp(0.0, 1.0)];

const STRAIGHT_PROFILE: [ProfilePoint; 2] = [pp(1.0, 0.0), pp(0.0, 1.0)];

/// Coarse grouping of roof shapes by the builder that handles them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoofFamily {
    Flat,
    Skillion,
    Pyramidal,
    /// Hip/gable family, built around computed ridge points
    Ridge,
    /// Revolved profiles
    Circular,
}

/// Roof shape classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum RoofShape {
    #[default]
    Flat,
    Skillion,
    Pyramidal,
    Hipped,
    Gabled,
    HalfHipped,
    Gambrel,
    Mansard,
    Saltbox,
    Round,
    Onion,
    Dome,
}

impl RoofShape {
    pub const ALL: [RoofShape; 12] = [
        RoofShape::Flat,
        RoofShape::Skillion,
        RoofShape::Pyramidal,
        RoofShape::Hipped,
        RoofShape::Gabled,
        RoofShape::HalfHipped,
        RoofShape::Gambrel,
        RoofShape::Mansard,
        RoofShape::Saltbox,
        RoofShape::Round,
        RoofShape::Onion,
        RoofShape::Dome,
    ];

    /// Tag value of this shape
    pub fn as_str(&self) -> &'static str {
        match self {
            RoofShape::Flat => "flat",
            RoofShape::Skillion => "skillion",
            RoofShape::Pyramidal => "pyramidal",
            RoofShape::Hipped => "hipped",
            RoofShape::Gabled => "gabled",
            RoofShape::HalfHipped => "half-hipped",
            RoofShape::Gambrel => "gambrel",
            RoofShape::Mansard => "mansard",
            RoofShape::Saltbox => "saltbox",
            RoofShape::Round => "round",
            RoofShape::Onion => "onion",
            RoofShape::Dome => "dome",
        }
    }

    pub fn family(&self) -> RoofFamily {
        match self {
            RoofShape::Flat => RoofFamily::Flat,
            RoofShape::Skillion => RoofFamily::Skillion,
            RoofShape::Pyramidal => RoofFamily::Pyramidal,
            RoofShape::Onion | RoofShape::Dome => RoofFamily::Circular,
            RoofShape::Hipped
            | RoofShape::Gabled
            | RoofShape::HalfHipped
            | RoofShape::Gambrel
            | RoofShape::Mansard
            | RoofShape::Saltbox
            | RoofShape::Round => RoofFamily::Ridge,
        }
    }

    /// Shapes whose ridge ends in vertical gable walls instead of hips
    pub fn is_gabled(&self) -> bool {
        matches!(
            self,
            RoofShape::Gabled | RoofShape::Gambrel | RoofShape::Saltbox | RoofShape::Round
        )
    }

    /// Half cross-section from eave (first entry) to ridge (last entry)
    pub fn cross_section(&self) -> &'static [ProfilePoint] {
        match self {
            RoofShape::Onion => &ONION_PROFILE,
            RoofShape::Round | RoofShape::Dome => &DOME_PROFILE,
            RoofShape::Saltbox => &SALTBOX_PROFILE,
            RoofShape::Mansard | RoofShape::Gambrel => &MANSARD_PROFILE,
            _ => &STRAIGHT_PROFILE,
        }
    }
}

impl FromStr for RoofShape {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        RoofShape::ALL
            .iter()
            .copied()
            .find(|shape| shape.as_str() == normalized)
            .ok_or_else(|| Error::UnknownRoofShape(value.to_string()))
    }
}

impl fmt::Display for RoofShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
