// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hip and gable roofs built around solved ridge points
//!
//! Vertex layout: every ground vertex `l` owns a column of `pv` vertices
//! starting at `l * pv` (the ground point followed by the inner cross-section
//! points), where `pv` is the profile length minus the ridge entry. The ridge
//! points follow after all columns, in ground vertex order.

use super::{heights, BuildResult, RoofBuilder};
use crate::angles::{classify_turns, next_turn, Turn};
use crate::footprint::{Footprint, GroundRing};
use crate::mesh::{Mesh, RoofMesh};
use crate::ridge::{solve_ridges, RidgeSolution};
use crate::router::{BuilderKind, Fallback, MeshOptions, RidgeValidation};
use crate::triangulation::tessellate;
use crate::vector::orientation;
use nalgebra::{Point2, Point3};
use roofmesh_core::{ProfilePoint, RoofRequest};
use rustc_hash::FxHashSet;
use tracing::debug;

/// Ridge triples flatter than this are dropped from the cap
const COLLINEAR_EPSILON: f64 = 0.001;

/// Builder for the ridge family (hipped, gabled, half-hipped, gambrel,
/// mansard, saltbox, round)
#[derive(Debug, Clone, Copy, Default)]
pub struct RidgeBuilder {
    options: MeshOptions,
}

impl RidgeBuilder {
    pub fn new(options: MeshOptions) -> Self {
        Self { options }
    }
}

impl RoofBuilder for RidgeBuilder {
    fn build(&self, footprint: &Footprint, request: &RoofRequest) -> BuildResult {
        let ring = footprint.ccw_ring();
        let turns = classify_turns(&ring.directions);
        let gabled = request.shape.is_gabled();

        let solution = solve_ridges(
            &ring,
            &turns,
            gabled,
            request.orientation_across,
            self.options.snap_threshold,
        )?;

        let (min, max) = heights(request);
        let emitter = RidgeEmitter {
            ring: &ring,
            turns: &turns,
            solution: &solution,
            ranks: solution.ranks(),
            profile: request.shape.cross_section(),
            gabled,
            min,
            max,
        };
        emitter.emit(self.options.ridge_validation)
    }

    fn kind(&self) -> BuilderKind {
        BuilderKind::Ridge
    }
}

struct RidgeEmitter<'a> {
    ring: &'a GroundRing,
    turns: &'a [Turn],
    solution: &'a RidgeSolution,
    ranks: Vec<Option<u32>>,
    profile: &'static [ProfilePoint],
    gabled: bool,
    min: f64,
    max: f64,
}

impl RidgeEmitter<'_> {
    /// Mesh index of the ridge vertex owned by ground vertex `vertex`
    fn ridge_index(&self, ring_vertices: u32, vertex: usize) -> Result<u32, Fallback> {
        self.ranks[vertex]
            .map(|rank| ring_vertices + rank)
            .ok_or(Fallback::NoRidgePoints)
    }

    fn emit(&self, validation: RidgeValidation) -> BuildResult {
        let n = self.ring.len();
        let pv = self.profile.len() - 1;
        let inner = (pv - 1) as u32;
        let pv32 = pv as u32;
        let rv = (n * pv) as u32;
        let range = self.max - self.min;

        let mut roof = Mesh::with_capacity(n * pv + self.solution.len(), n * pv * 9);
        let mut gable_indices: Vec<u32> = Vec::new();

        for l in 0..n {
            let k = (l * pv) as u32;
            let owner = self.solution.owner(l).ok_or(Fallback::NoRidgePoints)?;
            let ridge = self.solution.ridge_points[owner].ok_or(Fallback::NoRidgePoints)?;
            let r1 = self.ridge_index(rv, owner)?;

            let is_gable = self.gabled
                && self.solution.gable_points[owner]
                && next_turn(self.turns, owner) == next_turn(self.turns, l);

            let next_top = (k + pv32 + inner) % rv;
            if is_gable {
                gable_indices.extend_from_slice(&[k + inner, next_top, r1]);
            } else {
                roof.add_triangle(k + inner, next_top, r1);
            }

            let next_owner = self.solution.owner((l + 1) % n).ok_or(Fallback::NoRidgePoints)?;
            if next_owner != owner {
                let r2 = self.ridge_index(rv, next_owner)?;
                roof.add_triangle(r1, next_top, r2);
            }

            let ground = self.ring.points[l];
            roof.add_vertex(Point3::new(ground.x, ground.y, self.min));

            for (m, section) in self.profile.iter().enumerate().take(pv).skip(1) {
                let o = k + m as u32 - 1;
                let quad = [
                    o,
                    (o + pv32) % rv,
                    (o + 1) % rv,
                    (o + pv32) % rv,
                    (o + 1 + pv32) % rv,
                    (o + 1) % rv,
                ];
                if is_gable {
                    gable_indices.extend_from_slice(&quad);
                } else {
                    roof.indices.extend_from_slice(&quad);
                }
                let xy = ridge + (ground - ridge) * f64::from(section.radial);
                roof.add_vertex(Point3::new(
                    xy.x,
                    xy.y,
                    self.min + range * f64::from(section.height),
                ));
            }
        }

        for (_, p) in self.solution.points() {
            roof.add_vertex(Point3::new(p.x, p.y, self.max));
        }

        if self.solution.len() > 2 {
            self.cap(&mut roof, rv, validation)?;
        }

        if !self.gabled {
            return Ok(RoofMesh::roof_only(roof));
        }
        let special = Mesh {
            positions: roof.positions.clone(),
            indices: gable_indices,
        };
        Ok(RoofMesh::with_special(roof, special))
    }

    /// Close the area enclosed by three or more ridge points at ridge height
    fn cap(&self, roof: &mut Mesh, rv: u32, validation: RidgeValidation) -> Result<(), Fallback> {
        let keys: Vec<usize> = self.solution.points().map(|(k, _)| k).collect();
        let point = |k: usize| self.solution.ridge_points[k].unwrap_or_else(Point2::origin);
        let count = keys.len();

        let mut skip: FxHashSet<usize> = FxHashSet::default();
        for (i, &k) in keys.iter().enumerate() {
            let middle = keys[(i + 1) % count];
            let second = keys[(i + 2) % count];
            let turn = orientation(&point(k), &point(middle), &point(second));
            if turn.abs() < COLLINEAR_EPSILON {
                skip.insert(middle);
                if point(k) == point(second) {
                    skip.insert(k);
                }
            } else if validation == RidgeValidation::Experimental && turn < 0.0 {
                debug!(vertex = k, "ridge cap turns against the footprint, skipped");
                return Ok(());
            }
        }

        // Ridges meeting in a line or a point leave nothing to close
        let face: Vec<usize> = keys.into_iter().filter(|k| !skip.contains(k)).collect();
        if face.len() < 3 {
            return Ok(());
        }
        let face_points: Vec<Point2<f64>> = face.iter().map(|&k| point(k)).collect();
        match tessellate(&face_points, &[]) {
            Ok(indices) => {
                for i in indices {
                    roof.indices.push(self.ridge_index(rv, face[i])?);
                }
                Ok(())
            }
            Err(err) if validation.is_strict() => {
                debug!(error = %err, points = face.len(), "ridge cap tessellation failed");
                Err(Fallback::CapTessellation)
            }
            Err(err) => {
                debug!(error = %err, points = face.len(), "ridge cap omitted");
                Ok(())
            }
        }
    }
}
