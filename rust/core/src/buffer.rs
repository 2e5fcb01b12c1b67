// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flat geometry buffers shared by footprints and meshes
//!
//! A buffer is either a polygon (2D-packed `x, y` coordinates, `index` holding
//! `2 * point_count` per contour followed by a negative sentinel) or a triangle
//! mesh (3D-packed `x, y, z` coordinates, `index` holding three vertex indices
//! per triangle).

use crate::error::{Error, Result};
use smallvec::SmallVec;

/// Terminates the contour list of a polygon buffer
pub const INDEX_SENTINEL: i32 = -1;

/// Kind of data held by a [`GeometryBuffer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GeometryType {
    /// Outer ring followed by holes, 2D coordinates
    #[default]
    Polygon,
    /// Triangle list, 3D coordinates
    Triangles,
}

/// Coordinate and index arrays tagged with their [`GeometryType`]
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometryBuffer {
    /// Packed coordinates (`x, y` for polygons, `x, y, z` for meshes)
    pub points: Vec<f32>,
    /// Contour sizes (polygons) or triangle vertex indices (meshes)
    pub index: Vec<i32>,
    /// Interpretation of `points` and `index`
    pub geometry_type: GeometryType,
}

impl GeometryBuffer {
    /// Create an empty polygon with one open contour
    pub fn polygon() -> Self {
        Self {
            points: Vec::new(),
            index: vec![0, INDEX_SENTINEL],
            geometry_type: GeometryType::Polygon,
        }
    }

    /// Create a polygon from an outer ring and optional holes
    pub fn from_rings(outer: &[[f32; 2]], holes: &[Vec<[f32; 2]>]) -> Self {
        let mut buffer = Self::polygon();
        for &[x, y] in outer {
            buffer.add_point(x, y);
        }
        for hole in holes {
            buffer.start_hole();
            for &[x, y] in hole {
                buffer.add_point(x, y);
            }
        }
        buffer
    }

    /// Create a triangle mesh from 3D points and triangle indices
    pub fn triangles(points: Vec<f32>, index: Vec<i32>) -> Self {
        Self {
            points,
            index,
            geometry_type: GeometryType::Triangles,
        }
    }

    /// Append a point to the contour currently being written
    pub fn add_point(&mut self, x: f32, y: f32) {
        let slot = self.open_contour_slot();
        self.index[slot] += 2;
        self.points.push(x);
        self.points.push(y);
    }

    /// Close the current contour and start a hole
    ///
    /// Does nothing while the current contour is still empty.
    pub fn start_hole(&mut self) {
        let slot = self.open_contour_slot();
        if self.index[slot] == 0 {
            return;
        }
        self.index.insert(slot + 1, 0);
    }

    /// Position in `index` of the contour that receives new points
    fn open_contour_slot(&mut self) -> usize {
        match self.index.iter().position(|&len| len < 0) {
            Some(0) => {
                self.index.insert(0, 0);
                0
            }
            Some(sentinel) => sentinel - 1,
            None => {
                if self.index.is_empty() {
                    self.index.push(0);
                }
                self.index.push(INDEX_SENTINEL);
                self.index.len() - 2
            }
        }
    }

    #[inline]
    pub fn is_polygon(&self) -> bool {
        self.geometry_type == GeometryType::Polygon
    }

    #[inline]
    pub fn is_triangles(&self) -> bool {
        self.geometry_type == GeometryType::Triangles
    }

    /// Coordinates per vertex for this buffer type
    #[inline]
    pub fn dimension(&self) -> usize {
        match self.geometry_type {
            GeometryType::Polygon => 2,
            GeometryType::Triangles => 3,
        }
    }

    /// Number of vertices stored in `points`
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.points.len() / self.dimension()
    }

    /// Number of triangles (zero for polygons)
    #[inline]
    pub fn triangle_count(&self) -> usize {
        if self.is_triangles() {
            self.index.len() / 3
        } else {
            0
        }
    }

    /// Iterate polygon contours as packed `x, y` slices, outer ring first
    ///
    /// Stops at the sentinel, at the first contour with an odd coordinate
    /// count or one that would overrun `points`, and yields nothing for
    /// triangle meshes.
    pub fn contours(&self) -> impl Iterator<Item = &[f32]> + '_ {
        let limit = if self.is_polygon() { self.index.len() } else { 0 };
        let mut offset = 0usize;
        self.index
            .iter()
            .take(limit)
            .take_while(|&&len| len >= 0 && len % 2 == 0)
            .map_while(move |&len| {
                let end = offset + len as usize;
                let contour = self.points.get(offset..end)?;
                offset = end;
                Some(contour)
            })
    }

    /// Point counts of all polygon contours
    pub fn contour_sizes(&self) -> SmallVec<[usize; 4]> {
        self.contours().map(|c| c.len() / 2).collect()
    }

    /// Check the structural invariants of the buffer
    pub fn validate(&self) -> Result<()> {
        match self.geometry_type {
            GeometryType::Polygon => {
                if self.points.len() % 2 != 0 {
                    return Err(Error::InvalidBuffer(format!(
                        "polygon coordinate count {} is odd",
                        self.points.len()
                    )));
                }
                let mut total = 0usize;
                for &len in self.index.iter().take_while(|&&len| len >= 0) {
                    if len % 2 != 0 {
                        return Err(Error::InvalidBuffer(format!(
                            "contour size {} is not a coordinate pair count",
                            len
                        )));
                    }
                    total += len as usize;
                }
                if total != self.points.len() {
                    return Err(Error::InvalidBuffer(format!(
                        "contours cover {} coordinates, buffer holds {}",
                        total,
                        self.points.len()
                    )));
                }
            }
            GeometryType::Triangles => {
                if self.points.len() % 3 != 0 {
                    return Err(Error::InvalidBuffer(format!(
                        "mesh coordinate count {} is not a multiple of 3",
                        self.points.len()
                    )));
                }
                if self.index.len() % 3 != 0 {
                    return Err(Error::InvalidBuffer(format!(
                        "mesh index count {} is not a multiple of 3",
                        self.index.len()
                    )));
                }
                let vertex_count = self.vertex_count();
                if let Some(bad) = self
                    .index
                    .iter()
                    .find(|&&i| i < 0 || i as usize >= vertex_count)
                {
                    return Err(Error::InvalidBuffer(format!(
                        "triangle index {} out of range 0..{}",
                        bad, vertex_count
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_builder() {
        let mut buffer = GeometryBuffer::polygon();
        buffer.add_point(0.0, 0.0);
        buffer.add_point(10.0, 0.0);
        buffer.add_point(10.0, 10.0);

        assert_eq!(buffer.index, vec![6, INDEX_SENTINEL]);
        assert_eq!(buffer.vertex_count(), 3);
        assert!(buffer.validate().is_ok());
    }

    #[test]
    fn test_polygon_with_hole() {
        let buffer = GeometryBuffer::from_rings(
            &[[0.0, 0.0], [20.0, 0.0], [20.0, 20.0], [0.0, 20.0]],
            &[vec![[5.0, 5.0], [5.0, 10.0], [10.0, 10.0]]],
        );

        assert_eq!(buffer.index, vec![8, 6, INDEX_SENTINEL]);
        assert_eq!(buffer.contour_sizes().as_slice(), &[4, 3]);
        let contours: Vec<&[f32]> = buffer.contours().collect();
        assert_eq!(contours[1], &[5.0, 5.0, 5.0, 10.0, 10.0, 10.0]);
    }

    #[test]
    fn test_start_hole_on_empty_contour_is_noop() {
        let mut buffer = GeometryBuffer::polygon();
        buffer.start_hole();
        buffer.add_point(1.0, 2.0);
        assert_eq!(buffer.index, vec![2, INDEX_SENTINEL]);
    }

    #[test]
    fn test_contours_stop_at_sentinel() {
        let buffer = GeometryBuffer {
            points: vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0],
            index: vec![6, INDEX_SENTINEL, 4],
            geometry_type: GeometryType::Polygon,
        };
        assert_eq!(buffer.contours().count(), 1);
    }

    #[test]
    fn test_contours_stop_at_odd_coordinate_count() {
        let buffer = GeometryBuffer {
            points: vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.5],
            index: vec![6, 3, INDEX_SENTINEL],
            geometry_type: GeometryType::Polygon,
        };
        let contours: Vec<&[f32]> = buffer.contours().collect();
        assert_eq!(contours, vec![&[0.0, 0.0, 1.0, 0.0, 1.0, 1.0][..]]);
        assert_eq!(buffer.contour_sizes().as_slice(), &[3]);
        assert!(buffer.validate().is_err());
    }

    #[test]
    fn test_validate_polygon_mismatch() {
        let buffer = GeometryBuffer {
            points: vec![0.0, 0.0, 1.0, 0.0],
            index: vec![6, INDEX_SENTINEL],
            geometry_type: GeometryType::Polygon,
        };
        assert!(matches!(buffer.validate(), Err(Error::InvalidBuffer(_))));
    }

    #[test]
    fn test_validate_triangles() {
        let mesh = GeometryBuffer::triangles(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            vec![0, 1, 2],
        );
        assert!(mesh.validate().is_ok());
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.contours().count(), 0);

        let broken = GeometryBuffer::triangles(mesh.points.clone(), vec![0, 1, 3]);
        assert!(broken.validate().is_err());
    }
}
