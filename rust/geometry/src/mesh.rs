// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures

use nalgebra::Point3;
use roofmesh_core::GeometryBuffer;

/// Triangle mesh
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Vertex positions (x, y, z)
    pub positions: Vec<f32>,
    /// Triangle indices (i0, i1, i2)
    pub indices: Vec<u32>,
}

/// Output of a single roof builder
///
/// `special` holds filler geometry (gable ends, outline walls) that closes the
/// building volume but is not part of the roof surface itself.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoofMesh {
    pub roof: Mesh,
    pub special: Option<Mesh>,
}

impl RoofMesh {
    /// Roof surface without filler parts
    pub fn roof_only(roof: Mesh) -> Self {
        Self {
            roof,
            special: None,
        }
    }

    /// Roof surface plus filler parts
    pub fn with_special(roof: Mesh, special: Mesh) -> Self {
        Self {
            roof,
            special: Some(special),
        }
    }

    /// Total triangle count, filler parts included
    pub fn triangle_count(&self) -> usize {
        self.roof.triangle_count() + self.special.as_ref().map_or(0, Mesh::triangle_count)
    }
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Create a mesh with capacity
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            indices: Vec::with_capacity(index_count),
        }
    }

    /// Add a vertex, returning its index
    #[inline]
    pub fn add_vertex(&mut self, position: Point3<f64>) -> u32 {
        let index = self.vertex_count() as u32;
        self.positions.push(position.x as f32);
        self.positions.push(position.y as f32);
        self.positions.push(position.z as f32);
        index
    }

    /// Add a triangle
    #[inline]
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);
    }

    /// Vertex position as a point
    #[inline]
    pub fn vertex(&self, index: usize) -> Option<Point3<f32>> {
        let chunk = self.positions.get(index * 3..index * 3 + 3)?;
        Some(Point3::new(chunk[0], chunk[1], chunk[2]))
    }

    /// Overwrite the height of one vertex
    #[inline]
    pub fn set_height(&mut self, index: usize, z: f32) {
        if let Some(h) = self.positions.get_mut(index * 3 + 2) {
            *h = z;
        }
    }

    /// Merge another mesh into this one
    #[inline]
    pub fn merge(&mut self, other: &Mesh) {
        if other.is_empty() {
            return;
        }

        let vertex_offset = (self.positions.len() / 3) as u32;

        self.positions.reserve(other.positions.len());
        self.indices.reserve(other.indices.len());

        self.positions.extend_from_slice(&other.positions);
        self.indices
            .extend(other.indices.iter().map(|&i| i + vertex_offset));
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Calculate bounds (min, max)
    #[inline]
    pub fn bounds(&self) -> (Point3<f32>, Point3<f32>) {
        if self.is_empty() {
            return (Point3::origin(), Point3::origin());
        }

        let mut min = Point3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Point3::new(f32::MIN, f32::MIN, f32::MIN);

        self.positions.chunks_exact(3).for_each(|chunk| {
            min.x = min.x.min(chunk[0]);
            min.y = min.y.min(chunk[1]);
            min.z = min.z.min(chunk[2]);
            max.x = max.x.max(chunk[0]);
            max.y = max.y.max(chunk[1]);
            max.z = max.z.max(chunk[2]);
        });

        (min, max)
    }

    /// Iterate triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
    }

    /// Convert into a triangle-list buffer
    pub fn into_buffer(self) -> GeometryBuffer {
        let index = self.indices.into_iter().map(|i| i as i32).collect();
        GeometryBuffer::triangles(self.positions, index)
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_creation() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_add_vertex() {
        let mut mesh = Mesh::new();
        assert_eq!(mesh.add_vertex(Point3::new(1.0, 2.0, 3.0)), 0);
        assert_eq!(mesh.add_vertex(Point3::new(4.0, 5.0, 6.0)), 1);
        assert_eq!(mesh.vertex_count(), 2);
        assert_eq!(mesh.positions, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(mesh.vertex(1), Some(Point3::new(4.0, 5.0, 6.0)));
        assert_eq!(mesh.vertex(2), None);
    }

    #[test]
    fn test_merge_offsets_indices() {
        let mut mesh1 = Mesh::new();
        for x in 0..3 {
            mesh1.add_vertex(Point3::new(x as f64, 0.0, 0.0));
        }
        mesh1.add_triangle(0, 1, 2);

        let mut mesh2 = mesh1.clone();
        mesh2.set_height(2, 7.0);

        mesh1.merge(&mesh2);
        assert_eq!(mesh1.vertex_count(), 6);
        assert_eq!(mesh1.triangle_count(), 2);
        assert_eq!(mesh1.indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(mesh1.vertex(5).unwrap().z, 7.0);
    }

    #[test]
    fn test_bounds_and_buffer() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(-1.0, 2.0, 0.0));
        mesh.add_vertex(Point3::new(3.0, -4.0, 5.0));
        mesh.add_vertex(Point3::new(0.0, 0.0, 1.0));
        mesh.add_triangle(0, 1, 2);

        let (min, max) = mesh.bounds();
        assert_eq!(min, Point3::new(-1.0, -4.0, 0.0));
        assert_eq!(max, Point3::new(3.0, 2.0, 5.0));

        let buffer = mesh.into_buffer();
        assert!(buffer.is_triangles());
        assert_eq!(buffer.index, vec![0, 1, 2]);
        assert!(buffer.validate().is_ok());
    }
}
