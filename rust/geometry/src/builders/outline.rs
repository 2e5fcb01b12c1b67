// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vertical outline walls between eave and ridge height

use super::{heights, BuildResult, RoofBuilder};
use crate::footprint::Footprint;
use crate::mesh::{Mesh, RoofMesh};
use crate::router::{BuilderKind, Fallback};
use nalgebra::Point3;
use roofmesh_core::RoofRequest;

/// Outline wall builder
///
/// Not part of the fallback chain; used for filler geometry and on request.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineBuilder;

impl RoofBuilder for OutlineBuilder {
    fn build(&self, footprint: &Footprint, request: &RoofRequest) -> BuildResult {
        if footprint.outer.len() < 2 {
            return Err(Fallback::TooFewPoints);
        }
        let (min, max) = heights(request);
        Ok(RoofMesh::roof_only(outline_mesh(footprint, min, max)))
    }

    fn kind(&self) -> BuilderKind {
        BuilderKind::Outline
    }
}

/// Build a wall strip along every ring of `footprint`
///
/// Ring point `j` yields vertex `2j` at `min` and `2j + 1` at `max`, rings
/// following each other in footprint order. An `n`-point ring therefore
/// contributes `2n` vertices and `2n` triangles.
pub fn outline_mesh(footprint: &Footprint, min: f64, max: f64) -> Mesh {
    let total = footprint.point_count();
    let mut mesh = Mesh::with_capacity(total * 2, total * 6);

    for ring in footprint.rings() {
        let base = mesh.vertex_count() as u32;
        let size = (ring.len() * 2) as u32;
        for p in ring {
            mesh.add_vertex(Point3::new(p.x, p.y, min));
            mesh.add_vertex(Point3::new(p.x, p.y, max));
        }
        for j in (0..size).step_by(2) {
            mesh.add_triangle(base + (j + 3) % size, base + (j + 1) % size, base + j);
            mesh.add_triangle(base + j, base + (j + 2) % size, base + (j + 3) % size);
        }
    }
    mesh
}
