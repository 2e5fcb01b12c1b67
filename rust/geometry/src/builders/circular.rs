// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Circular roofs: a half cross-section revolved around the footprint centroid

use super::{heights, BuildResult, RoofBuilder};
use crate::footprint::Footprint;
use crate::mesh::{Mesh, RoofMesh};
use crate::router::{BuilderKind, Fallback};
use crate::vector::centroid;
use nalgebra::Point3;
use roofmesh_core::RoofRequest;

/// Dome and onion roof builder
///
/// Every outer point starts a section; the first profile entry sits exactly on
/// that point, later entries lie on the circle of the footprint's largest
/// radius scaled by the profile. The sections are stitched into quads.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircularBuilder;

impl RoofBuilder for CircularBuilder {
    fn build(&self, footprint: &Footprint, request: &RoofRequest) -> BuildResult {
        let outer = &footprint.outer;
        let n = outer.len();
        if n < 3 {
            return Err(Fallback::TooFewPoints);
        }
        let profile = request.shape.cross_section();
        let len = profile.len();
        let (min, max) = heights(request);
        let range = max - min;

        let center = centroid(outer);
        let radius = outer
            .iter()
            .map(|p| (p - center).norm())
            .fold(0.0_f64, f64::max);

        let mut mesh = Mesh::with_capacity(n * len, n * (len - 1) * 6);
        for p in outer {
            let offset = p - center;
            let phi = offset.y.atan2(offset.x);
            mesh.add_vertex(Point3::new(p.x, p.y, min));
            for section in &profile[1..] {
                let r = radius * f64::from(section.radial);
                mesh.add_vertex(Point3::new(
                    center.x + r * phi.cos(),
                    center.y + r * phi.sin(),
                    min + range * f64::from(section.height),
                ));
            }
        }

        let size = (n * len) as u32;
        let len = len as u32;
        for i in 0..n as u32 {
            for j in 0..len - 1 {
                let p = i * len + j;
                let q = (p + len) % size;
                mesh.add_triangle(q, p + 1, p);
                mesh.add_triangle(q, (p + len + 1) % size, p + 1);
            }
        }
        Ok(RoofMesh::roof_only(mesh))
    }

    fn kind(&self) -> BuilderKind {
        BuilderKind::Circular
    }
}
