// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Skillion roof: a single inclined plane over the footprint

use super::outline::outline_mesh;
use super::{heights, BuildResult, RoofBuilder};
use crate::footprint::Footprint;
use crate::mesh::{Mesh, RoofMesh};
use crate::router::{BuilderKind, Fallback};
use crate::vector::{intersect_line_plane, plane_normal};
use nalgebra::{Point2, Point3, Vector3};
use roofmesh_core::RoofRequest;

/// Distance of the reference point the slope direction points at
const FAR_DISTANCE: f64 = 1e8;

/// Skillion roof builder
///
/// The slope runs downhill towards `request.direction`, a compass bearing in
/// degrees with north along +y. The outline walls up to the roof plane are
/// returned as filler geometry.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkillionBuilder;

impl RoofBuilder for SkillionBuilder {
    fn build(&self, footprint: &Footprint, request: &RoofRequest) -> BuildResult {
        let (min, max) = heights(request);
        skillion_mesh(footprint, min, max, f64::from(request.direction_or_default()))
    }

    fn kind(&self) -> BuilderKind {
        BuilderKind::Skillion
    }
}

/// Point far away in the given compass direction
fn far_point(degrees: f64) -> Point2<f64> {
    let rad = degrees.to_radians();
    Point2::new(FAR_DISTANCE * rad.sin(), FAR_DISTANCE * rad.cos())
}

/// Two closest and two farthest outer points, by distance to the far point
#[derive(Debug, Default)]
struct Extremes {
    min1: Option<(usize, f64)>,
    min2: Option<(usize, f64)>,
    max1: Option<(usize, f64)>,
    max2: Option<(usize, f64)>,
}

impl Extremes {
    fn scan(outer: &[Point2<f64>], far: &Point2<f64>) -> Self {
        let mut ext = Self::default();
        for (k, p) in outer.iter().enumerate() {
            let dif = (p - far).norm();

            match ext.max1 {
                Some((_, d1)) if dif <= d1 => {
                    if ext.max2.map_or(true, |(_, d2)| dif > d2) {
                        ext.max2 = Some((k, dif));
                    }
                }
                _ => {
                    if ext.max1.is_some() {
                        ext.max2 = ext.max1;
                    }
                    ext.max1 = Some((k, dif));
                }
            }

            match ext.min1 {
                Some((_, d1)) if dif >= d1 => {
                    if ext.min2.map_or(true, |(_, d2)| dif < d2) {
                        ext.min2 = Some((k, dif));
                    }
                }
                _ => {
                    if ext.min1.is_some() {
                        ext.min2 = ext.min1;
                    }
                    ext.min1 = Some((k, dif));
                }
            }
        }
        ext
    }
}

/// Build a skillion roof and its outline walls
///
/// `degrees` is the downhill compass direction. Vertex `i` of the roof is
/// triangulation point `i` (outer ring first, then holes); the top of its
/// outline wall is filler vertex `2i + 1`.
pub(crate) fn skillion_mesh(footprint: &Footprint, min: f64, max: f64, degrees: f64) -> BuildResult {
    let outer = &footprint.outer;
    if outer.len() < 3 {
        return Err(Fallback::TooFewPoints);
    }
    let triangulation = footprint.triangulate().map_err(|err| {
        tracing::debug!(error = %err, "skillion tessellation failed");
        Fallback::Tessellation
    })?;

    let ext = Extremes::scan(outer, &far_point(degrees));
    let (Some((min1, min_dif1)), Some((min2, min_dif2)), Some((max1, max_dif1)), Some((max2, max_dif2))) =
        (ext.min1, ext.min2, ext.max1, ext.max2)
    else {
        return Err(Fallback::DegeneratePlane);
    };
    if min1 == max1 {
        return Err(Fallback::DegeneratePlane);
    }

    let lift = |k: usize, z: f64| Point3::new(outer[k].x, outer[k].y, z);
    let a = lift(min1, min);
    let b = lift(max1, max);
    // third point from the tighter of the two pairs
    let c = if (min_dif2 - min_dif1).abs() < (max_dif2 - max_dif1).abs() {
        lift(min2, min)
    } else {
        lift(max2, max)
    };
    let normal = plane_normal(&a, &b, &c).ok_or(Fallback::DegeneratePlane)?;

    let up = Vector3::z();
    let mut roof = Mesh::with_capacity(triangulation.points.len(), triangulation.indices.len());
    for p in &triangulation.points {
        let hit = intersect_line_plane(&Point3::new(p.x, p.y, 0.0), &up, &a, &normal)
            .ok_or(Fallback::DegeneratePlane)?;
        let mut z = hit.z;
        if z > 2.0 * max {
            z = max;
        }
        roof.add_vertex(Point3::new(p.x, p.y, z.max(min).min(max)));
    }
    for tri in triangulation.indices.chunks_exact(3) {
        roof.add_triangle(tri[0] as u32, tri[1] as u32, tri[2] as u32);
    }

    let mut walls = outline_mesh(footprint, min, min);
    for i in 0..roof.vertex_count() {
        if let Some(v) = roof.vertex(i) {
            walls.set_height(2 * i + 1, v.z);
        }
    }

    Ok(RoofMesh::with_special(roof, walls))
}
