// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pyramidal roof: one triangle per outer edge, meeting at the centroid

use super::{heights, BuildResult, RoofBuilder};
use crate::footprint::Footprint;
use crate::mesh::{Mesh, RoofMesh};
use crate::router::{BuilderKind, Fallback};
use crate::vector::centroid;
use nalgebra::Point3;
use roofmesh_core::RoofRequest;

/// Pyramidal roof builder
///
/// Holes are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct PyramidalBuilder;

impl RoofBuilder for PyramidalBuilder {
    fn build(&self, footprint: &Footprint, request: &RoofRequest) -> BuildResult {
        let outer = &footprint.outer;
        let n = outer.len();
        if n < 3 {
            return Err(Fallback::TooFewPoints);
        }
        let (min, max) = heights(request);

        let mut mesh = Mesh::with_capacity(n + 1, n * 3);
        for p in outer {
            mesh.add_vertex(Point3::new(p.x, p.y, min));
        }
        let center = centroid(outer);
        let apex = mesh.add_vertex(Point3::new(center.x, center.y, max));

        for j in 0..n {
            mesh.add_triangle(j as u32, ((j + 1) % n) as u32, apex);
        }
        Ok(RoofMesh::roof_only(mesh))
    }

    fn kind(&self) -> BuilderKind {
        BuilderKind::Pyramidal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point2;
    use roofmesh_core::RoofShape;

    #[test]
    fn test_pyramid_on_square() {
        let footprint = Footprint::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ]);
        let request = RoofRequest::new(RoofShape::Pyramidal, 2.0, 6.0);
        let mesh = PyramidalBuilder.build(&footprint, &request).unwrap();

        assert_eq!(mesh.roof.vertex_count(), 5);
        assert_eq!(mesh.roof.triangle_count(), 4);

        let apex = mesh.roof.vertex(4).unwrap();
        assert_relative_eq!(apex.x, 5.0);
        assert_relative_eq!(apex.y, 5.0);
        assert_relative_eq!(apex.z, 6.0);
        assert!((0..4).all(|i| mesh.roof.vertex(i).unwrap().z == 2.0));
    }

    #[test]
    fn test_pyramid_on_triangle() {
        let footprint = Footprint::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(6.0, 0.0),
            Point2::new(0.0, 6.0),
        ]);
        let request = RoofRequest::new(RoofShape::Hipped, 0.0, 3.0);
        let mesh = PyramidalBuilder.build(&footprint, &request).unwrap();

        assert_eq!(mesh.roof.indices, vec![0, 1, 3, 1, 2, 3, 2, 0, 3]);
    }

    #[test]
    fn test_pyramid_needs_three_points() {
        let footprint = Footprint::new(vec![Point2::new(0.0, 0.0), Point2::new(6.0, 0.0)]);
        let request = RoofRequest::new(RoofShape::Pyramidal, 0.0, 3.0);

        assert_eq!(
            PyramidalBuilder.build(&footprint, &request),
            Err(Fallback::TooFewPoints)
        );
    }
}
