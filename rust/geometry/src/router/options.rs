// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tuning knobs for the roof builders

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Ridge candidates closer than this collapse into one point
pub const DEFAULT_SNAP_THRESHOLD: f64 = 5.0;

/// How strictly implausible ridge geometry is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum RidgeValidation {
    /// Untessellable ridge caps and ambiguous split lines fall back
    #[default]
    Strict,
    /// Both are logged and tolerated
    Relaxed,
    /// Like `Relaxed`, and caps turning against the footprint are dropped
    Experimental,
}

impl RidgeValidation {
    pub fn as_str(&self) -> &'static str {
        match self {
            RidgeValidation::Strict => "strict",
            RidgeValidation::Relaxed => "relaxed",
            RidgeValidation::Experimental => "experimental",
        }
    }

    #[inline]
    pub fn is_strict(&self) -> bool {
        *self == RidgeValidation::Strict
    }
}

impl FromStr for RidgeValidation {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(RidgeValidation::Strict),
            "relaxed" => Ok(RidgeValidation::Relaxed),
            "experimental" => Ok(RidgeValidation::Experimental),
            other => Err(Error::InvalidOption(format!(
                "unknown ridge validation '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for RidgeValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options shared by every builder of a [`RoofRouter`](super::RoofRouter)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeshOptions {
    /// Distance below which ridge points are merged, in footprint units
    pub snap_threshold: f64,
    pub ridge_validation: RidgeValidation,
}

impl MeshOptions {
    pub fn new() -> Self {
        Self {
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
            ridge_validation: RidgeValidation::Strict,
        }
    }

    pub fn with_snap_threshold(mut self, threshold: f64) -> Self {
        self.snap_threshold = threshold;
        self
    }

    pub fn with_ridge_validation(mut self, validation: RidgeValidation) -> Self {
        self.ridge_validation = validation;
        self
    }
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self::new()
    }
}
