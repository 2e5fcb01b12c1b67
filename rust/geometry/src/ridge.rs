// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ridge solver for the hip and gable roof family
//!
//! Starting from the classified corners of a counter-clockwise ground ring,
//! the solver walks the ring once and commits ridge points at structurally
//! significant vertices. Convex corners intersect the running ridge line with
//! their bisector (or, for gable ends, with their own wall), concave corners
//! join the ridges of the convex corners around them. Every committed point is
//! snapped onto an existing ridge point within the snap threshold.
//!
//! Ridge state is kept in arrays indexed by ground vertex: a vertex is
//! significant exactly when it holds a ridge point.

use crate::angles::{
    next_convex, next_turn, previous_convex, simple_lengths, start_index, Turn,
};
use crate::footprint::GroundRing;
use crate::router::Fallback;
use crate::vector::{intersect_lines, point_in_polygon};
use crate::{Point2, Vector2};
use tracing::debug;

/// Ridge points and gable flags per ground vertex
#[derive(Debug, Clone, PartialEq)]
pub struct RidgeSolution {
    pub ridge_points: Vec<Option<Point2<f64>>>,
    /// Vertices whose ridge point ends in a vertical gable wall
    pub gable_points: Vec<bool>,
}

impl RidgeSolution {
    /// Number of committed ridge points
    pub fn len(&self) -> usize {
        self.ridge_points.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Committed ridge points with their vertex, in vertex order
    pub fn points(&self) -> impl Iterator<Item = (usize, Point2<f64>)> + '_ {
        self.ridge_points
            .iter()
            .enumerate()
            .filter_map(|(k, p)| p.map(|p| (k, p)))
    }

    /// Position of each vertex's ridge point among all committed ones
    pub fn ranks(&self) -> Vec<Option<u32>> {
        let mut rank = 0u32;
        self.ridge_points
            .iter()
            .map(|p| {
                p.map(|_| {
                    rank += 1;
                    rank - 1
                })
            })
            .collect()
    }

    /// Nearest vertex at or before `index` that holds a ridge point
    pub fn owner(&self, index: usize) -> Option<usize> {
        let n = self.ridge_points.len();
        (0..n)
            .map(|step| (index + n - step) % n)
            .find(|&k| self.ridge_points[k].is_some())
    }
}

/// Working arrays of one ridge walk
struct RidgeState {
    points: Vec<Option<Point2<f64>>>,
    lines: Vec<Option<Vector2<f64>>>,
    gables: Vec<bool>,
    snap_threshold: f64,
}

impl RidgeState {
    fn new(n: usize, snap_threshold: f64) -> Self {
        Self {
            points: vec![None; n],
            lines: vec![None; n],
            gables: vec![false; n],
            snap_threshold,
        }
    }

    /// Commit a ridge point, reusing an existing one within the snap threshold
    fn snap(&mut self, vertex: usize, point: Option<Point2<f64>>) {
        let Some(point) = point else {
            return;
        };
        let existing = self
            .points
            .iter()
            .flatten()
            .find(|p| (**p - point).norm() < self.snap_threshold)
            .copied();
        self.points[vertex] = Some(existing.unwrap_or(point));
    }

    /// Intersect the ridge running through `from` with a line
    fn extend(
        &self,
        from: usize,
        origin: &Point2<f64>,
        direction: &Vector2<f64>,
    ) -> Option<Point2<f64>> {
        let point = self.points[from]?;
        let line = self.lines[from]?;
        intersect_lines(&point, &line, origin, direction)
    }
}

/// Compute ridge points for a ground ring
///
/// `ring` must be oriented counter-clockwise and `turns` must be its
/// classification.
pub fn solve_ridges(
    ring: &GroundRing,
    turns: &[Turn],
    gabled: bool,
    across: bool,
    snap_threshold: f64,
) -> Result<RidgeSolution, Fallback> {
    let n = ring.len();
    if n < 4 {
        return Err(Fallback::TooFewPoints);
    }
    if !gabled && across {
        return Err(Fallback::AcrossHipRoof);
    }
    let start = start_index(turns, &ring.lengths, across).ok_or(Fallback::NoRightAngle)?;

    let points = &ring.points;
    let dirs = &ring.directions;
    let bisectors = ring.bisectors();
    let simple = simple_lengths(turns, &ring.lengths);
    let concave_count = turns.iter().filter(|t| t.value() < -1).count();

    // Where each corner's bisector meets the bisector of the next corner
    let mut intersections: Vec<Option<Point2<f64>>> = (0..n)
        .map(|k| {
            let next = next_turn(turns, k);
            intersect_lines(&points[next], &bisectors[next], &points[k], &bisectors[k])
        })
        .collect();

    // Three convex corners in a row: move the hip intersection onto the
    // ridge line of the longer side
    for k in 0..n {
        if !turns[k].is_convex() {
            continue;
        }
        let next = next_turn(turns, k);
        if !turns[next].is_convex() {
            continue;
        }
        let after = next_turn(turns, next);
        if !turns[after].is_convex() {
            continue;
        }
        if simple[next] < simple[k] && !across {
            intersections[k] = intersections[next]
                .and_then(|p| intersect_lines(&p, &dirs[k], &points[k], &bisectors[k]));
        } else {
            intersections[next] = intersections[k]
                .and_then(|p| intersect_lines(&points[after], &bisectors[after], &p, &dirs[next]));
        }
    }

    let mut state = RidgeState::new(n, snap_threshold);
    let mut current: Option<usize> = None;
    let mut active = true;

    for step in 0..n {
        let shift = (step + start) % n;
        let turn = turns[shift];
        let mut next_active = true;

        if turn.is_straight() {
            continue;
        }

        if turn.is_concave() {
            let mut pos_a = None;
            let mut pos_b = None;

            // Two convex corners before the concave one
            let prev = previous_convex(turns, shift);
            let prev2 = previous_convex(turns, prev.unwrap_or((shift + n - 1) % n));
            if let (Some(prev), Some(prev2)) = (prev, prev2) {
                state.lines[prev2] = Some(dirs[prev]);
                pos_a = intersections[prev2];
                current = None;

                // T and Z shapes disagree on which side gets the gable:
                // the shorter side does
                let prev3 = previous_convex(turns, prev2);
                if prev3.map_or(true, |p3| simple[p3] > simple[prev2]) {
                    if turns[prev2] == Turn::CONVEX_RIGHT {
                        current = Some(prev2);
                    }
                    if gabled {
                        pos_a = pos_a.and_then(|a| {
                            intersect_lines(&a, &dirs[prev], &points[prev2], &dirs[prev2])
                        });
                        state.gables[prev2] = true;
                    }
                }
                state.points[prev2] = pos_a;

                if !active {
                    state.points[prev] = None;
                    state.lines[prev] = None;
                }
            }

            // Two convex corners after it
            let next = next_convex(turns, shift);
            let next2 = next_convex(turns, next.unwrap_or((shift + 1) % n));
            if let (Some(next), Some(next2)) = (next, next2) {
                if turns[next] == Turn::CONVEX {
                    // Probably no real corner, keep the concave wall direction
                    state.lines[next] = Some(dirs[shift]);
                    pos_b = intersections[next];
                    state.points[next] = pos_b;
                } else if state.points[next].is_none() {
                    state.lines[next] = Some(dirs[shift]);
                    pos_b = intersections[next];

                    let next3 = next_convex(turns, next2);
                    if gabled && (next3.is_none() || simple[next2] > simple[next]) {
                        pos_b = pos_b.and_then(|b| {
                            intersect_lines(&b, &dirs[shift], &points[next], &dirs[next])
                        });
                        state.gables[next] = true;
                    }
                    state.points[next] = pos_b;
                } else {
                    pos_b = state.points[next];
                }
            }

            let (a, b) = match (pos_a, pos_b) {
                (Some(a), Some(b)) => (a, b),
                _ => {
                    // Neighbouring concave corners
                    if pos_a.is_none() && pos_b.is_none() {
                        pos_a = current.and_then(|c| state.points[c]);
                    }
                    match (pos_a, pos_b, current) {
                        (Some(a), None, Some(c)) => {
                            let point = state.lines[c].and_then(|line| {
                                intersect_lines(&a, &line, &points[shift], &bisectors[shift])
                            });
                            current = Some(shift);
                            state.snap(shift, point);
                            state.lines[shift] = Some(dirs[shift]);
                        }
                        (None, Some(b), _) => {
                            let point = next
                                .and_then(|nx| state.lines[nx])
                                .and_then(|line| {
                                    intersect_lines(&b, &line, &points[shift], &bisectors[shift])
                                });
                            state.snap(shift, point);
                            current = None;
                        }
                        _ => {
                            debug!(vertex = shift, "concave corner could not be resolved");
                            current = None;
                        }
                    }
                    continue;
                }
            };

            let Some(line_b) = next.and_then(|nx| state.lines[nx]) else {
                debug!(vertex = shift, "concave corner has no following ridge");
                current = None;
                continue;
            };
            let line_a = match current {
                None => prev.map(|p| dirs[p]),
                Some(c) => state.lines[c],
            };
            let point = line_a.and_then(|line_a| intersect_lines(&a, &line_a, &b, &line_b));
            if point.is_none() {
                debug!(vertex = shift, "ridge intersection missing");
            }
            state.snap(shift, point);
            current = None;
        } else if !active {
            next_active = true;
        } else {
            if turn.value() > 1 && concave_count == 0 {
                // Convex shapes only seed ridges at every other corner
                next_active = false;
            }

            if state.points[shift].is_some() && state.lines[shift].is_some() {
                current = Some(shift);
                next_active = false;
            } else if let Some(c) = current {
                let next = next_convex(turns, shift).filter(|&nx| state.lines[nx].is_some());
                if let Some(nx) = next {
                    // Meet the ridge the next corner already has
                    let point = match (state.points[nx], state.lines[nx]) {
                        (Some(p), Some(line)) => state.extend(c, &p, &line),
                        _ => None,
                    };
                    state.snap(shift, point);
                } else if gabled && concave_count == 0 && turn == Turn::CONVEX_RIGHT {
                    state.points[shift] = state.extend(c, &points[shift], &dirs[shift]);
                    state.gables[shift] = true;
                } else {
                    let point = state.extend(c, &points[shift], &bisectors[shift]);
                    state.snap(shift, point);
                }

                if next_active {
                    state.lines[shift] = Some(dirs[shift]);
                    current = Some(shift);
                } else {
                    current = None;
                }
            } else {
                let Some(nx) = next_convex(turns, shift) else {
                    continue;
                };
                current = Some(shift);
                if state.lines[shift].is_none() {
                    state.lines[shift] = Some(dirs[nx]);
                }

                let mut point = intersections[shift];
                if gabled && concave_count == 0 && turn == Turn::CONVEX_RIGHT {
                    // Gable end: stop the ridge at the wall
                    point = match (point, state.lines[shift]) {
                        (Some(p), Some(line)) => {
                            intersect_lines(&p, &line, &points[shift], &dirs[shift])
                        }
                        _ => None,
                    };
                    state.gables[shift] = true;
                }
                state.snap(shift, point);
            }
        }

        active = next_active;
    }

    if state.points.iter().all(Option::is_none) {
        return Err(Fallback::NoRidgePoints);
    }

    for (k, point) in state.points.iter().enumerate() {
        let Some(point) = point else {
            continue;
        };
        // Gable points sit on the wall; only hips and concave joints must be inside
        if (!gabled || turns[k].is_concave()) && !point_in_polygon(point, points) {
            return Err(Fallback::RidgeOutsideFootprint { vertex: k });
        }
    }

    Ok(RidgeSolution {
        ridge_points: state.points,
        gable_points: state.gables,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angles::classify_turns;
    use crate::router::DEFAULT_SNAP_THRESHOLD;

    fn ring(coords: &[(f64, f64)]) -> GroundRing {
        GroundRing::new(coords.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    fn solve(ring: &GroundRing, gabled: bool, across: bool) -> Result<RidgeSolution, Fallback> {
        let turns = classify_turns(&ring.directions);
        solve_ridges(ring, &turns, gabled, across, DEFAULT_SNAP_THRESHOLD)
    }

    fn rectangle() -> GroundRing {
        ring(&[(0.0, 0.0), (20.0, 0.0), (20.0, 15.0), (0.0, 15.0)])
    }

    #[test]
    fn test_hipped_rectangle_has_one_ridge() {
        let solution = solve(&rectangle(), false, false).unwrap();
        let points: Vec<_> = solution.points().collect();
        assert_eq!(
            points,
            vec![(1, Point2::new(12.5, 7.5)), (3, Point2::new(7.5, 7.5))]
        );
        assert!(solution.gable_points.iter().all(|g| !g));
    }

    #[test]
    fn test_gabled_rectangle_ends_at_walls() {
        let solution = solve(&rectangle(), true, false).unwrap();
        let points: Vec<_> = solution.points().collect();
        assert_eq!(
            points,
            vec![(1, Point2::new(20.0, 7.5)), (3, Point2::new(0.0, 7.5))]
        );
        assert_eq!(solution.gable_points, vec![false, true, false, true]);
    }

    #[test]
    fn test_gabled_rectangle_across() {
        let solution = solve(&rectangle(), true, true).unwrap();
        let points: Vec<_> = solution.points().collect();
        assert_eq!(
            points,
            vec![(0, Point2::new(10.0, 0.0)), (2, Point2::new(10.0, 15.0))]
        );
    }

    #[test]
    fn test_l_shape_attributes_a_point_to_the_concave_corner() {
        let l_shape = ring(&[
            (0.0, 0.0),
            (12.0, 0.0),
            (20.0, 0.0),
            (20.0, 15.0),
            (12.0, 15.0),
            (12.0, 10.0),
            (0.0, 10.0),
        ]);
        let solution = solve(&l_shape, false, false).unwrap();
        assert_eq!(solution.ridge_points[5], Some(Point2::new(16.0, 5.0)));
        assert_eq!(solution.ridge_points[6], Some(Point2::new(5.0, 5.0)));
        assert_eq!(solution.ridge_points[3], Some(Point2::new(16.0, 11.0)));
        assert_eq!(solution.len(), 4);
        for (_, p) in solution.points() {
            assert!(point_in_polygon(&p, &l_shape.points));
        }
    }

    #[test]
    fn test_early_fallbacks() {
        let triangle = ring(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)]);
        assert_eq!(solve(&triangle, false, false), Err(Fallback::TooFewPoints));
        assert_eq!(solve(&rectangle(), false, true), Err(Fallback::AcrossHipRoof));

        let octagon = ring(&[
            (10.0, 0.0),
            (20.0, 0.0),
            (30.0, 10.0),
            (30.0, 20.0),
            (20.0, 30.0),
            (10.0, 30.0),
            (0.0, 20.0),
            (0.0, 10.0),
        ]);
        assert_eq!(solve(&octagon, false, false), Err(Fallback::NoRightAngle));
    }

    #[test]
    fn test_close_candidates_snap_together() {
        let mut state = RidgeState::new(4, DEFAULT_SNAP_THRESHOLD);
        state.snap(0, Some(Point2::new(10.0, 10.0)));
        state.snap(2, Some(Point2::new(13.0, 11.0)));
        state.snap(3, Some(Point2::new(15.0, 10.0)));
        state.snap(1, None);
        assert_eq!(state.points[2], Some(Point2::new(10.0, 10.0)));
        assert_eq!(state.points[3], Some(Point2::new(15.0, 10.0)));
        assert_eq!(state.points[1], None);
    }

    #[test]
    fn test_solution_ranks_and_owners() {
        let solution = RidgeSolution {
            ridge_points: vec![None, Some(Point2::new(1.0, 1.0)), None, Some(Point2::new(2.0, 1.0))],
            gable_points: vec![false; 4],
        };
        assert_eq!(solution.ranks(), vec![None, Some(0), None, Some(1)]);
        assert_eq!(solution.owner(0), Some(3));
        assert_eq!(solution.owner(2), Some(1));
        assert_eq!(solution.owner(3), Some(3));
    }
}
