// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Builder selection and the fallback decision table

use roofmesh_core::{RoofFamily, RoofShape};
use std::fmt;

/// Minimum outer ring size for the ridge and circular builders
pub const MIN_RIDGE_POINTS: usize = 4;

/// The mesh builders a roof request can end up in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum BuilderKind {
    /// Tessellated footprint at ridge height
    Flat,
    /// Tessellated footprint at eave height, the last resort of sloped roofs
    EavesFlat,
    Skillion,
    Pyramidal,
    Ridge,
    /// Footprint split in two skillion halves
    SimpleGabled,
    Circular,
    /// Vertical walls between eave and ridge height
    Outline,
}

impl BuilderKind {
    pub const ALL: [BuilderKind; 8] = [
        BuilderKind::Flat,
        BuilderKind::EavesFlat,
        BuilderKind::Skillion,
        BuilderKind::Pyramidal,
        BuilderKind::Ridge,
        BuilderKind::SimpleGabled,
        BuilderKind::Circular,
        BuilderKind::Outline,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuilderKind::Flat => "flat",
            BuilderKind::EavesFlat => "eaves-flat",
            BuilderKind::Skillion => "skillion",
            BuilderKind::Pyramidal => "pyramidal",
            BuilderKind::Ridge => "ridge",
            BuilderKind::SimpleGabled => "simple-gabled",
            BuilderKind::Circular => "circular",
            BuilderKind::Outline => "outline",
        }
    }
}

impl fmt::Display for BuilderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a builder declined to produce a mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Fallback {
    /// Outer ring too small for the builder
    TooFewPoints,
    /// Hip roofs follow their natural ridge orientation only
    AcrossHipRoof,
    /// No convex right angle to start a ridge from
    NoRightAngle,
    /// The ridge walk committed no ridge point
    NoRidgePoints,
    /// A ridge point landed outside the footprint
    RidgeOutsideFootprint { vertex: usize },
    /// The ridge top could not be tessellated
    CapTessellation,
    /// The split line crosses the footprint more than twice
    AmbiguousSplit,
    /// A split half is degenerate
    DegenerateSplit,
    /// No usable roof plane through the ground points
    DegeneratePlane,
    /// The tessellator rejected the footprint
    Tessellation,
}

impl fmt::Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fallback::TooFewPoints => f.write_str("too few points"),
            Fallback::AcrossHipRoof => f.write_str("hip roof cannot run across"),
            Fallback::NoRightAngle => f.write_str("no right angle to start a ridge"),
            Fallback::NoRidgePoints => f.write_str("no ridge points"),
            Fallback::RidgeOutsideFootprint { vertex } => {
                write!(f, "ridge point of vertex {} outside footprint", vertex)
            }
            Fallback::CapTessellation => f.write_str("ridge cap not tessellable"),
            Fallback::AmbiguousSplit => f.write_str("split line crosses footprint more than twice"),
            Fallback::DegenerateSplit => f.write_str("degenerate split"),
            Fallback::DegeneratePlane => f.write_str("degenerate roof plane"),
            Fallback::Tessellation => f.write_str("tessellation failed"),
        }
    }
}

/// Builder a request starts in
///
/// Ridge and circular shapes need at least [`MIN_RIDGE_POINTS`] ground points;
/// smaller footprints go straight to the pyramidal builder.
pub fn initial_builder(shape: RoofShape, point_count: usize) -> BuilderKind {
    match shape.family() {
        RoofFamily::Flat => BuilderKind::Flat,
        RoofFamily::Skillion => BuilderKind::Skillion,
        RoofFamily::Pyramidal => BuilderKind::Pyramidal,
        RoofFamily::Ridge if point_count < MIN_RIDGE_POINTS => BuilderKind::Pyramidal,
        RoofFamily::Ridge => BuilderKind::Ridge,
        RoofFamily::Circular if point_count < MIN_RIDGE_POINTS => BuilderKind::Pyramidal,
        RoofFamily::Circular => BuilderKind::Circular,
    }
}

/// Builder to try after `from` declined with `reason`, `None` when the chain ends
pub fn next_builder(shape: RoofShape, from: BuilderKind, reason: Fallback) -> Option<BuilderKind> {
    let gabled = shape.is_gabled();
    match (from, reason) {
        (BuilderKind::Ridge, Fallback::TooFewPoints | Fallback::AcrossHipRoof) => {
            Some(BuilderKind::Pyramidal)
        }
        (BuilderKind::Ridge, Fallback::NoRightAngle) if gabled => Some(BuilderKind::SimpleGabled),
        (BuilderKind::Ridge, Fallback::NoRightAngle) => Some(BuilderKind::Pyramidal),
        (
            BuilderKind::Ridge,
            Fallback::NoRidgePoints
            | Fallback::RidgeOutsideFootprint { .. }
            | Fallback::CapTessellation,
        ) if gabled => Some(BuilderKind::SimpleGabled),
        (
            BuilderKind::Ridge,
            Fallback::NoRidgePoints
            | Fallback::RidgeOutsideFootprint { .. }
            | Fallback::CapTessellation,
        ) => Some(BuilderKind::EavesFlat),
        (BuilderKind::SimpleGabled, Fallback::TooFewPoints) => Some(BuilderKind::Pyramidal),
        (BuilderKind::SimpleGabled, _) => Some(BuilderKind::EavesFlat),
        (BuilderKind::Skillion, _) => Some(BuilderKind::EavesFlat),
        (BuilderKind::Circular, Fallback::TooFewPoints) => Some(BuilderKind::Pyramidal),
        _ => None,
    }
}
