// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building footprints loaded from polygon buffers

use crate::error::{Error, Result};
use crate::triangulation::tessellate;
use crate::vector::{bisector, signed_area};
use crate::{Point2, Vector2};
use roofmesh_core::GeometryBuffer;

/// 2D footprint with optional holes
#[derive(Debug, Clone, PartialEq)]
pub struct Footprint {
    /// Outer boundary, in input order
    pub outer: Vec<Point2<f64>>,
    /// Holes, in input order
    pub holes: Vec<Vec<Point2<f64>>>,
}

impl Footprint {
    /// Create a footprint without holes
    pub fn new(outer: Vec<Point2<f64>>) -> Self {
        Self {
            outer: clean_ring(outer),
            holes: Vec::new(),
        }
    }

    /// Add a hole to the footprint
    pub fn add_hole(&mut self, hole: Vec<Point2<f64>>) {
        self.holes.push(clean_ring(hole));
    }

    /// Load the rings of a polygon buffer
    pub fn from_buffer(buffer: &GeometryBuffer) -> Result<Self> {
        if !buffer.is_polygon() {
            return Err(Error::InvalidFootprint(
                "buffer does not hold a polygon".to_string(),
            ));
        }
        buffer.validate()?;

        let mut contours = buffer.contours().map(|coords| {
            coords
                .chunks_exact(2)
                .map(|c| Point2::new(c[0] as f64, c[1] as f64))
                .collect::<Vec<_>>()
        });

        let outer = contours
            .next()
            .ok_or_else(|| Error::InvalidFootprint("polygon has no contour".to_string()))?;
        if outer.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(Error::InvalidFootprint(
                "outer ring has non-finite coordinates".to_string(),
            ));
        }

        let mut footprint = Footprint::new(outer);
        for hole in contours {
            footprint.add_hole(hole);
        }
        Ok(footprint)
    }

    /// Number of outer ring vertices
    #[inline]
    pub fn point_count(&self) -> usize {
        self.outer.len()
    }

    /// All rings, outer first
    pub fn rings(&self) -> impl Iterator<Item = &[Point2<f64>]> + '_ {
        std::iter::once(self.outer.as_slice()).chain(self.holes.iter().map(Vec::as_slice))
    }

    /// Working state of the outer ring in input order
    pub fn ground_ring(&self) -> GroundRing {
        GroundRing::new(self.outer.clone())
    }

    /// Working state of the outer ring, oriented counter-clockwise
    ///
    /// Convex corners of a counter-clockwise ring turn left, which the angle
    /// classifier reports as positive turns.
    pub fn ccw_ring(&self) -> GroundRing {
        let mut points = self.outer.clone();
        if signed_area(&points) < 0.0 {
            points.reverse();
        }
        GroundRing::new(points)
    }

    /// Triangulate the footprint using earcutr
    pub fn triangulate(&self) -> Result<Triangulation> {
        let indices = tessellate(&self.outer, &self.holes)?;
        let points = self.rings().flatten().copied().collect();
        Ok(Triangulation { points, indices })
    }
}

/// Triangulated footprint
#[derive(Debug, Clone)]
pub struct Triangulation {
    /// All vertices (outer + holes)
    pub points: Vec<Point2<f64>>,
    /// Triangle indices
    pub indices: Vec<usize>,
}

/// Per-contour working state: vertices, unit edge directions and edge lengths
///
/// Edge `k` runs from vertex `k` to vertex `k + 1` (wrapping).
#[derive(Debug, Clone)]
pub struct GroundRing {
    pub points: Vec<Point2<f64>>,
    pub directions: Vec<Vector2<f64>>,
    pub lengths: Vec<f64>,
}

impl GroundRing {
    pub fn new(points: Vec<Point2<f64>>) -> Self {
        let n = points.len();
        let mut directions = Vec::with_capacity(n);
        let mut lengths = Vec::with_capacity(n);
        for i in 0..n {
            let edge = points[(i + 1) % n] - points[i];
            let length = edge.norm();
            lengths.push(length);
            directions.push(if length > 0.0 {
                edge / length
            } else {
                Vector2::zeros()
            });
        }
        Self {
            points,
            directions,
            lengths,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Direction of the edge arriving at vertex `k`
    #[inline]
    pub fn incoming(&self, k: usize) -> &Vector2<f64> {
        let n = self.len();
        &self.directions[(k + n - 1) % n]
    }

    /// Angle bisector at every vertex
    pub fn bisectors(&self) -> Vec<Vector2<f64>> {
        (0..self.len())
            .map(|k| bisector(self.incoming(k), &self.directions[k]))
            .collect()
    }
}

/// Drop repeated vertices and a closing vertex equal to the first
fn clean_ring(mut ring: Vec<Point2<f64>>) -> Vec<Point2<f64>> {
    ring.dedup();
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}

#[cfg(test)]
mod tests {
    use super::*;
    use roofmesh_core::GeometryType;

    #[test]
    fn test_from_buffer_reads_rings() {
        let buffer = GeometryBuffer::from_rings(
            &[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]],
            &[vec![[2.0, 2.0], [2.0, 4.0], [4.0, 4.0]]],
        );
        let footprint = Footprint::from_buffer(&buffer).unwrap();
        assert_eq!(footprint.point_count(), 4);
        assert_eq!(footprint.holes.len(), 1);
        assert_eq!(footprint.holes[0][2], Point2::new(4.0, 4.0));
        assert_eq!(footprint.rings().count(), 2);
    }

    #[test]
    fn test_from_buffer_rejects_meshes() {
        let mesh = GeometryBuffer::triangles(vec![0.0; 9], vec![0, 1, 2]);
        assert!(matches!(
            Footprint::from_buffer(&mesh),
            Err(Error::InvalidFootprint(_))
        ));
        assert!(Footprint::from_buffer(&GeometryBuffer::polygon()).is_ok());
    }

    #[test]
    fn test_from_buffer_rejects_broken_contours() {
        let odd = GeometryBuffer {
            points: vec![0.0, 0.0, 4.0, 0.0, 4.0, 3.0, 0.0],
            index: vec![7, -1],
            geometry_type: GeometryType::Polygon,
        };
        assert!(matches!(
            Footprint::from_buffer(&odd),
            Err(Error::CoreError(_))
        ));
    }

    #[test]
    fn test_duplicates_and_closing_point_dropped() {
        let footprint = Footprint::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 3.0),
            Point2::new(0.0, 0.0),
        ]);
        assert_eq!(footprint.point_count(), 3);
    }

    #[test]
    fn test_ccw_ring_reverses_clockwise_input() {
        let footprint = Footprint::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 10.0),
            Point2::new(10.0, 10.0),
            Point2::new(10.0, 0.0),
        ]);
        let ring = footprint.ccw_ring();
        assert!(signed_area(&ring.points) > 0.0);
        assert_eq!(ring.points[0], Point2::new(10.0, 0.0));
        assert_eq!(ring.directions[0], Vector2::new(0.0, 1.0));
        assert_eq!(ring.lengths, vec![10.0; 4]);
        assert_eq!(ring.incoming(0), &Vector2::new(1.0, 0.0));
    }

    #[test]
    fn test_triangulate_includes_hole_points() {
        let mut footprint = Footprint::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ]);
        footprint.add_hole(vec![
            Point2::new(3.0, 3.0),
            Point2::new(3.0, 7.0),
            Point2::new(7.0, 7.0),
            Point2::new(7.0, 3.0),
        ]);
        let triangulation = footprint.triangulate().unwrap();
        assert_eq!(triangulation.points.len(), 8);
        assert_eq!(triangulation.indices.len() % 3, 0);
    }
}
