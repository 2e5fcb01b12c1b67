// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-building roof parameters and tag value parsing

use crate::error::{Error, Result};
use crate::roof::RoofShape;

/// Everything a mesh builder needs besides the footprint itself
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoofRequest {
    pub shape: RoofShape,
    /// Eave height (bottom of the roof)
    pub min_height: f32,
    /// Ridge height (top of the roof)
    pub max_height: f32,
    /// Ridge runs across the short axis of the footprint
    pub orientation_across: bool,
    /// Downhill compass direction in degrees, used by skillion roofs
    pub direction: Option<f32>,
}

impl RoofRequest {
    pub fn new(shape: RoofShape, min_height: f32, max_height: f32) -> Self {
        Self {
            shape,
            min_height,
            max_height,
            orientation_across: false,
            direction: None,
        }
    }

    pub fn with_orientation_across(mut self, across: bool) -> Self {
        self.orientation_across = across;
        self
    }

    pub fn with_direction(mut self, degrees: f32) -> Self {
        self.direction = Some(degrees);
        self
    }

    /// Height difference between eave and ridge
    #[inline]
    pub fn height_range(&self) -> f32 {
        self.max_height - self.min_height
    }

    /// Skillion slope direction, defaulting to north
    #[inline]
    pub fn direction_or_default(&self) -> f32 {
        self.direction.unwrap_or(0.0)
    }

    /// Reject heights a builder cannot work with
    pub fn validate(&self) -> Result<()> {
        if !self.min_height.is_finite()
            || !self.max_height.is_finite()
            || self.max_height < self.min_height
        {
            return Err(Error::InvalidHeights {
                min: self.min_height,
                max: self.max_height,
            });
        }
        if let Some(direction) = self.direction {
            if !direction.is_finite() {
                return Err(Error::InvalidDirection(direction.to_string()));
            }
        }
        Ok(())
    }
}

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Parse a roof direction given in degrees or as a 16-point compass value
pub fn parse_direction(value: &str) -> Result<f32> {
    let trimmed = value.trim();
    if let Ok(degrees) = trimmed.parse::<f32>() {
        if degrees.is_finite() {
            return Ok(degrees.rem_euclid(360.0));
        }
    }
    let upper = trimmed.to_ascii_uppercase();
    COMPASS_POINTS
        .iter()
        .position(|&point| point == upper)
        .map(|i| i as f32 * 22.5)
        .ok_or_else(|| Error::InvalidDirection(value.to_string()))
}

/// Parse a roof orientation tag: `true` for `across`, `false` for `along`
///
/// Unknown values are treated as `along`, the natural ridge orientation.
pub fn parse_orientation(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("across")
}
