// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Simple gabled roof: split the footprint in two and slope each half

use super::skillion::skillion_mesh;
use super::{heights, BuildResult, RoofBuilder};
use crate::angles::{classify_turns, longest_side, next_turn, previous_convex};
use crate::footprint::Footprint;
use crate::mesh::RoofMesh;
use crate::router::{BuilderKind, Fallback, RidgeValidation};
use crate::vector::{distance_to_line, intersect_lines, orientation, sign};
use nalgebra::{Point2, Vector2};
use roofmesh_core::RoofRequest;
use tracing::debug;

/// Simple gabled roof builder
///
/// A split line parallel to the longest side (or to the adjacent side when the
/// ridge runs across) cuts the footprint through the middle of its extent.
/// Each half becomes a skillion roof sloping away from the split line, whose
/// points are then raised to the ridge height.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleGabledBuilder {
    validation: RidgeValidation,
}

impl SimpleGabledBuilder {
    pub fn new(validation: RidgeValidation) -> Self {
        Self { validation }
    }
}

/// Footprint halves on either side of the split line
#[derive(Debug)]
struct Split {
    halves: [Vec<Point2<f64>>; 2],
    /// Positions of the split line points inside each half
    ridge: [Vec<usize>; 2],
    /// Downhill bearing of the first half
    degrees: f64,
}

impl SimpleGabledBuilder {
    fn split(&self, footprint: &Footprint, across: bool) -> Result<Split, Fallback> {
        let ring = footprint.ccw_ring();
        let n = ring.len();
        if n < 4 {
            return Err(Fallback::TooFewPoints);
        }
        let points = &ring.points;
        let directions = &ring.directions;
        let turns = classify_turns(directions);

        let (mut side, _) = longest_side(&turns, &ring.lengths, None);
        if across {
            side = previous_convex(&turns, side).unwrap_or_else(|| next_turn(&turns, side));
        }
        let line_dir = directions[side];
        let line_origin = points[side];

        let (farthest, max_distance) = points
            .iter()
            .map(|p| distance_to_line(p, &line_origin, &line_dir))
            .enumerate()
            .fold((None, 0.0), |(best, max), (k, d)| {
                if d > max {
                    (Some(k), d)
                } else {
                    (best, max)
                }
            });
        let farthest = farthest.ok_or(Fallback::DegenerateSplit)?;

        let offset = f64::from(sign(orientation(
            &line_origin,
            &(line_origin + line_dir),
            &points[farthest],
        ))) * max_distance
            / 2.0;
        let normal = Vector2::new(-line_dir.y, line_dir.x);
        let split_origin = line_origin + normal * (offset / line_dir.norm());
        let split_end = split_origin + line_dir;
        let side_of = |p: &Point2<f64>| sign(orientation(&split_origin, &split_end, p));

        // walk from the last vertex off the split line so each crossing is seen once
        let last_off = (0..n)
            .rev()
            .find(|&k| side_of(&points[k]) != 0)
            .ok_or(Fallback::DegenerateSplit)?;
        let first_side = side_of(&points[last_off]);
        let mut last_side = first_side;
        let mut halves: [Vec<Point2<f64>>; 2] = [Vec::new(), Vec::new()];
        let mut ridge: [Vec<usize>; 2] = [Vec::new(), Vec::new()];
        let mut changes = 0usize;
        // vertex on the split line, placed once the next side is known
        let mut on_line: Option<Point2<f64>> = None;

        for k in (last_off + 1..last_off + 1 + n).map(|k| k % n) {
            let current = side_of(&points[k]);
            if current == 0 {
                if let Some(p) = on_line.replace(points[k]) {
                    halves[changes % 2].push(p);
                }
                continue;
            }
            if current != last_side {
                if changes > 2 {
                    if self.validation.is_strict() {
                        return Err(Fallback::AmbiguousSplit);
                    }
                    debug!(changes, "split line crosses the footprint more than twice");
                }
                let crossing = match on_line.take() {
                    Some(p) => p,
                    None => {
                        let prev = (k + n - 1) % n;
                        intersect_lines(&split_origin, &line_dir, &points[prev], &directions[prev])
                            .ok_or(Fallback::DegenerateSplit)?
                    }
                };
                for (half, idx) in halves.iter_mut().zip(ridge.iter_mut()) {
                    idx.push(half.len());
                    half.push(crossing);
                }
                changes += 1;
            } else if let Some(p) = on_line.take() {
                // touches the split line without crossing it
                halves[changes % 2].push(p);
            }
            halves[changes % 2].push(points[k]);
            last_side = current;
        }

        if halves.iter().any(|h| h.len() < 3) {
            return Err(Fallback::DegenerateSplit);
        }

        // the first half lies on the side of the last vertex off the line
        let downhill = if first_side < 0 { -normal } else { normal };
        let degrees = downhill.x.atan2(downhill.y).to_degrees();

        Ok(Split {
            halves,
            ridge,
            degrees,
        })
    }
}

impl RoofBuilder for SimpleGabledBuilder {
    fn build(&self, footprint: &Footprint, request: &RoofRequest) -> BuildResult {
        let (min, max) = heights(request);
        let split = self.split(footprint, request.orientation_across)?;

        let mut result = RoofMesh::default();
        for (i, (half, ridge)) in split.halves.into_iter().zip(split.ridge).enumerate() {
            let degrees = split.degrees + 180.0 * i as f64;
            // halves are used as cut, without deduplication, so ridge indices stay valid
            let part = Footprint {
                outer: half,
                holes: Vec::new(),
            };
            let RoofMesh { mut roof, special } = skillion_mesh(&part, min, max, degrees)?;
            let mut walls = special.unwrap_or_default();
            for &r in &ridge {
                roof.set_height(r, max as f32);
                walls.set_height(2 * r + 1, max as f32);
            }
            result.roof.merge(&roof);
            result.special.get_or_insert_with(Default::default).merge(&walls);
        }
        Ok(result)
    }

    fn kind(&self) -> BuilderKind {
        BuilderKind::SimpleGabled
    }
}
