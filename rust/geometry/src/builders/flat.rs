// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flat roof: the triangulated footprint at a single height

use super::{heights, BuildResult, RoofBuilder};
use crate::footprint::Footprint;
use crate::mesh::{Mesh, RoofMesh};
use crate::router::{BuilderKind, Fallback};
use nalgebra::Point3;
use roofmesh_core::RoofRequest;

/// Flat roof builder
///
/// Places the footprint at the ridge height, or at the eave height for the
/// last-resort variant the router falls back to.
#[derive(Debug, Clone, Copy)]
pub struct FlatBuilder {
    at_eaves: bool,
}

impl FlatBuilder {
    /// Flat roof at the ridge height
    pub fn at_ridge() -> Self {
        Self { at_eaves: false }
    }

    /// Flat roof at the eave height
    pub fn at_eaves() -> Self {
        Self { at_eaves: true }
    }
}

impl RoofBuilder for FlatBuilder {
    fn build(&self, footprint: &Footprint, request: &RoofRequest) -> BuildResult {
        let (min, max) = heights(request);
        let z = if self.at_eaves { min } else { max };
        flat_mesh(footprint, z).map(RoofMesh::roof_only)
    }

    fn kind(&self) -> BuilderKind {
        if self.at_eaves {
            BuilderKind::EavesFlat
        } else {
            BuilderKind::Flat
        }
    }
}

/// Triangulate `footprint` and lift every vertex to `z`
pub(crate) fn flat_mesh(footprint: &Footprint, z: f64) -> Result<Mesh, Fallback> {
    let triangulation = footprint.triangulate().map_err(|err| {
        tracing::debug!(error = %err, "flat roof tessellation failed");
        Fallback::Tessellation
    })?;

    let mut mesh = Mesh::with_capacity(triangulation.points.len(), triangulation.indices.len());
    for p in &triangulation.points {
        mesh.add_vertex(Point3::new(p.x, p.y, z));
    }
    for tri in triangulation.indices.chunks_exact(3) {
        mesh.add_triangle(tri[0] as u32, tri[1] as u32, tri[2] as u32);
    }
    Ok(mesh)
}
