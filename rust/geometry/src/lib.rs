// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Roofmesh Geometry Processing
//!
//! Roof mesh generation for building footprints using earcutr triangulation
//! and nalgebra vector math.
//!
//! A [`RoofRouter`] picks the builder for a roof shape (flat, pyramidal,
//! ridge family, skillion, circular) and falls back to simpler builders when
//! the footprint does not fit the preferred one.

pub mod angles;
pub mod builders;
pub mod error;
pub mod footprint;
pub mod mesh;
pub mod ridge;
pub mod router;
pub mod triangulation;
pub mod vector;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};

pub use angles::{classify_turns, Turn};
pub use builders::{
    outline_mesh, BuildResult, CircularBuilder, FlatBuilder, OutlineBuilder, PyramidalBuilder,
    RidgeBuilder, RoofBuilder, SimpleGabledBuilder, SkillionBuilder,
};
pub use error::{Error, Result};
pub use footprint::{Footprint, GroundRing, Triangulation};
pub use mesh::{Mesh, RoofMesh};
pub use ridge::{solve_ridges, RidgeSolution};
pub use router::{
    BuilderKind, Fallback, FallbackTrail, MeshOptions, RidgeValidation, RoofOutput, RoofRouter,
    DEFAULT_SNAP_THRESHOLD,
};
pub use triangulation::tessellate;
