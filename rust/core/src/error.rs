// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or validating roof inputs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid geometry buffer: {0}")]
    InvalidBuffer(String),

    #[error("Unknown roof shape: {0}")]
    UnknownRoofShape(String),

    #[error("Invalid heights: min={min}, max={max}")]
    InvalidHeights { min: f32, max: f32 },

    #[error("Invalid roof direction: {0}")]
    InvalidDirection(String),
}
