// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Roof Router - Dynamic dispatch to roof builders
//!
//! Picks the builder for a roof shape and walks the fallback chain until a
//! builder produces a mesh.

mod fallback;
mod options;


pub use fallback::{initial_builder, next_builder, BuilderKind, Fallback, MIN_RIDGE_POINTS};
pub use options::{MeshOptions, RidgeValidation, DEFAULT_SNAP_THRESHOLD};

use crate::builders::{
    CircularBuilder, FlatBuilder, OutlineBuilder, PyramidalBuilder, RidgeBuilder, RoofBuilder,
    SimpleGabledBuilder, SkillionBuilder,
};
use crate::footprint::Footprint;
use crate::mesh::RoofMesh;
use crate::{Error, Result};
use roofmesh_core::{GeometryBuffer, RoofRequest};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::debug;

/// Builders that declined a request, with their reason, in the order tried
pub type FallbackTrail = SmallVec<[(BuilderKind, Fallback); 4]>;

/// Result of routing one footprint
#[derive(Debug, Clone)]
pub struct RoofOutput {
    /// Roof surface as a triangle buffer
    pub roof: GeometryBuffer,
    /// Filler geometry (gable ends, outline walls)
    pub special: Option<GeometryBuffer>,
    /// Builder that produced the mesh
    pub builder: BuilderKind,
    pub fallbacks: FallbackTrail,
}

/// Roof router - routes requests to builders and handles fallbacks
pub struct RoofRouter {
    options: MeshOptions,
    builders: FxHashMap<BuilderKind, Arc<dyn RoofBuilder>>,
}

impl RoofRouter {
    /// Create new router with default builders and options
    pub fn new() -> Self {
        Self::with_options(MeshOptions::default())
    }

    /// Create router whose builders share `options`
    pub fn with_options(options: MeshOptions) -> Self {
        let mut router = Self {
            options,
            builders: FxHashMap::default(),
        };

        router.register(Arc::new(FlatBuilder::at_ridge()));
        router.register(Arc::new(FlatBuilder::at_eaves()));
        router.register(Arc::new(PyramidalBuilder));
        router.register(Arc::new(RidgeBuilder::new(options)));
        router.register(Arc::new(SimpleGabledBuilder::new(options.ridge_validation)));
        router.register(Arc::new(SkillionBuilder));
        router.register(Arc::new(CircularBuilder));
        router.register(Arc::new(OutlineBuilder));

        router
    }

    /// Register a builder, replacing any builder of the same kind
    pub fn register(&mut self, builder: Arc<dyn RoofBuilder>) {
        self.builders.insert(builder.kind(), builder);
    }

    pub fn options(&self) -> &MeshOptions {
        &self.options
    }

    /// Run a single builder, a missing registration counts as a decline
    fn run(
        &self,
        kind: BuilderKind,
        footprint: &Footprint,
        request: &RoofRequest,
    ) -> std::result::Result<RoofMesh, Fallback> {
        match self.builders.get(&kind) {
            Some(builder) => builder.build(footprint, request),
            None => {
                debug!(builder = %kind, "no builder registered");
                Err(Fallback::Tessellation)
            }
        }
    }

    /// Mesh the roof of a polygon buffer, following the fallback chain
    pub fn build(&self, buffer: &GeometryBuffer, request: &RoofRequest) -> Result<RoofOutput> {
        request.validate()?;
        let footprint = Footprint::from_buffer(buffer)?;

        let mut fallbacks = FallbackTrail::new();
        let mut kind = initial_builder(request.shape, footprint.outer.len());
        loop {
            match self.run(kind, &footprint, request) {
                Ok(mesh) => {
                    return Ok(RoofOutput {
                        roof: mesh.roof.into_buffer(),
                        special: mesh.special.map(|s| s.into_buffer()),
                        builder: kind,
                        fallbacks,
                    });
                }
                Err(reason) => {
                    debug!(
                        shape = %request.shape,
                        builder = %kind,
                        reason = %reason,
                        "roof builder declined"
                    );
                    fallbacks.push((kind, reason));
                    match next_builder(request.shape, kind, reason) {
                        Some(next) => kind = next,
                        None => {
                            return Err(Error::Unrenderable {
                                shape: request.shape,
                                builder: kind,
                                reason,
                            });
                        }
                    }
                }
            }
        }
    }

    /// Replace `buffer` by its roof mesh
    ///
    /// Filler geometry goes to `special` when given. Returns `false` and
    /// leaves both buffers untouched when no builder succeeds.
    pub fn mesh_in_place(
        &self,
        buffer: &mut GeometryBuffer,
        special: Option<&mut GeometryBuffer>,
        request: &RoofRequest,
    ) -> bool {
        let output = match self.build(buffer, request) {
            Ok(output) => output,
            Err(err) => {
                debug!(error = %err, "roof left unmeshed");
                return false;
            }
        };
        *buffer = output.roof;
        if let (Some(target), Some(filler)) = (special, output.special) {
            *target = filler;
        }
        true
    }

    /// Vertical walls along every ring between eave and ridge height
    pub fn outline(&self, buffer: &GeometryBuffer, request: &RoofRequest) -> Result<GeometryBuffer> {
        request.validate()?;
        let footprint = Footprint::from_buffer(buffer)?;
        self.run(BuilderKind::Outline, &footprint, request)
            .map(|mesh| mesh.roof.into_buffer())
            .map_err(|reason| Error::Unrenderable {
                shape: request.shape,
                builder: BuilderKind::Outline,
                reason,
            })
    }
}

impl Default for RoofRouter {
    fn default() -> Self {
        Self::new()
    }
}
