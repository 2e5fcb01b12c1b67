// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::router::{BuilderKind, Fallback};
use roofmesh_core::RoofShape;
use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during roof mesh generation
#[derive(Error, Debug)]
pub enum Error {
    #[error("Triangulation failed: {0}")]
    TriangulationError(String),

    #[error("Invalid footprint: {0}")]
    InvalidFootprint(String),

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("No mesh for {shape} roof: {builder} builder gave up ({reason})")]
    Unrenderable {
        shape: RoofShape,
        builder: BuilderKind,
        reason: Fallback,
    },

    #[error("Core error: {0}")]
    CoreError(#[from] roofmesh_core::Error),
}
