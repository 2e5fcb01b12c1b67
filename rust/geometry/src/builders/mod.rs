// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Roof mesh builders
//!
//! One builder per roof algorithm. A builder either returns a mesh or names
//! the [`Fallback`] reason it declined with; choosing the next builder is the
//! router's job.

mod circular;
mod flat;
mod gabled;
mod outline;
mod pyramidal;
mod ridge;
mod skillion;

pub use circular::CircularBuilder;
pub use flat::FlatBuilder;
pub use gabled::SimpleGabledBuilder;
pub use outline::{outline_mesh, OutlineBuilder};
pub use pyramidal::PyramidalBuilder;
pub use ridge::RidgeBuilder;
pub use skillion::SkillionBuilder;

use crate::footprint::Footprint;
use crate::mesh::RoofMesh;
use crate::router::{BuilderKind, Fallback};
use roofmesh_core::RoofRequest;

/// Outcome of a single builder
pub type BuildResult = std::result::Result<RoofMesh, Fallback>;

/// Roof builder trait
/// Each builder implements one roof algorithm
pub trait RoofBuilder: Send + Sync {
    /// Build the roof of `footprint`
    fn build(&self, footprint: &Footprint, request: &RoofRequest) -> BuildResult;

    /// Which entry of the decision table this builder is
    fn kind(&self) -> BuilderKind;
}

/// Eave and ridge height in working precision
#[inline]
fn heights(request: &RoofRequest) -> (f64, f64) {
    (f64::from(request.min_height), f64::from(request.max_height))
}
