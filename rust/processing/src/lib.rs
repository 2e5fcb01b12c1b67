// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Batch roof meshing
//!
//! Meshes many building parts in parallel on a rayon pool, with
//! configuration from the environment and JSON input.

pub mod batch;
pub mod config;
pub mod error;

pub use batch::{
    process_json, process_parts, BatchResult, BatchStats, BuildingPart, MeshedPart, SkippedPart,
};
pub use config::Config;
pub use error::{Error, Result};
