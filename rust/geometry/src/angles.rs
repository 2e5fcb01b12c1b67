// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Angle classification of footprint corners
//!
//! Every vertex of a ring gets a discrete [`Turn`]: straight, obtuse or
//! right-angled, signed by the turn direction. For a counter-clockwise ring
//! positive turns are convex corners and negative turns are concave ones.
//! Nearly straight vertices accumulate their small angles until the sum forms
//! a real corner, and an obtuse corner directly followed by another one of the
//! same direction is merged into a right angle when both add up to a half turn.
//! Footprints from tagged map data are noisy, so the thresholds matter.

use crate::vector::sign;
use crate::Vector2;
use std::f64::consts::{FRAC_PI_2, PI};

/// Tolerance for the right-angle and straight classes
pub const ANGLE_TOLERANCE: f64 = PI / 12.0;

/// Discretized turn at a ring vertex, one of `-2..=2`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Turn(i8);

impl Turn {
    pub const STRAIGHT: Turn = Turn(0);
    pub const CONVEX: Turn = Turn(1);
    pub const CONVEX_RIGHT: Turn = Turn(2);
    pub const CONCAVE: Turn = Turn(-1);
    pub const CONCAVE_RIGHT: Turn = Turn(-2);

    /// Build a turn from a signed category value, clamped to `-2..=2`
    #[inline]
    pub fn new(value: i8) -> Self {
        Turn(value.clamp(-2, 2))
    }

    #[inline]
    pub fn value(self) -> i8 {
        self.0
    }

    #[inline]
    pub fn is_straight(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn is_convex(self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub fn is_concave(self) -> bool {
        self.0 < 0
    }

    /// Right angle (or sharper) in either direction
    #[inline]
    pub fn is_right(self) -> bool {
        self.0.abs() == 2
    }

    #[inline]
    fn direction(self) -> i8 {
        self.0.signum()
    }
}

/// Classify the turn at every vertex of a closed ring
///
/// `directions[k]` is the unit direction of the edge leaving vertex `k`.
pub fn classify_turns(directions: &[Vector2<f64>]) -> Vec<Turn> {
    let n = directions.len();
    let mut turns: Vec<Turn> = Vec::with_capacity(n);
    if n == 0 {
        return turns;
    }

    let mut angle_sum = 0.0;
    let mut prev_angle = 0.0;
    let mut first_angle = 0.0;

    for k in 0..n {
        let incoming = &directions[(k + n - 1) % n];
        let outgoing = &directions[k];
        let angle = incoming.dot(outgoing).clamp(-1.0, 1.0).acos();
        let mut turn = sign(incoming.perp(outgoing));

        if angle > FRAC_PI_2 - ANGLE_TOLERANCE {
            // Two halves of one corner
            if k >= 1 && turns[k - 1].value() == turn && prev_angle + angle > PI - ANGLE_TOLERANCE
            {
                turns[k - 1] = Turn(turn * 2);
            }
            angle_sum = 0.0;
            turn *= 2;
        } else if angle < ANGLE_TOLERANCE {
            angle_sum += f64::from(turn) * angle;
            if angle_sum.abs() > ANGLE_TOLERANCE {
                turn = sign(angle_sum);
                angle_sum = 0.0;
                if k >= 1
                    && turns[k - 1].value() == turn * 2
                    && prev_angle + angle > PI - ANGLE_TOLERANCE
                {
                    turn *= 2;
                }
            } else {
                turn = 0;
            }
        } else {
            angle_sum = 0.0;
        }

        if k == 0 {
            first_angle = angle;
        }
        prev_angle = angle;
        turns.push(Turn(turn));
    }

    let last = n - 1;
    if turns[0].direction() == turns[last].direction()
        && prev_angle + first_angle > PI - ANGLE_TOLERANCE
    {
        let merged = Turn(turns[0].direction() * 2);
        turns[0] = merged;
        turns[last] = merged;
    }

    turns
}

/// Index of the first non-straight vertex after `index`
pub fn next_turn(turns: &[Turn], index: usize) -> usize {
    let n = turns.len();
    (index + 1..index + n)
        .map(|i| i % n)
        .find(|&i| !turns[i].is_straight())
        .unwrap_or((index + 1) % n)
}

/// Index of the next convex vertex after `index`, `None` if a concave one comes first
pub fn next_convex(turns: &[Turn], index: usize) -> Option<usize> {
    let n = turns.len();
    for i in (index + 1..index + n).map(|i| i % n) {
        if turns[i].is_convex() {
            return Some(i);
        } else if turns[i].is_concave() {
            return None;
        }
    }
    Some((index + 1) % n)
}

/// Index of the previous convex vertex before `index`, `None` if a concave one comes first
pub fn previous_convex(turns: &[Turn], index: usize) -> Option<usize> {
    let n = turns.len();
    for step in 1..=n {
        let i = (index + n * 2 - step) % n;
        if turns[i].is_convex() {
            return Some(i);
        } else if turns[i].is_concave() {
            return None;
        }
    }
    Some((index + n - 1) % n)
}

/// Side lengths measured between turns
///
/// The length of a straight run of edges is credited to the turn vertex the
/// run starts at; straight vertices get zero.
pub fn simple_lengths(turns: &[Turn], lengths: &[f64]) -> Vec<f64> {
    let n = turns.len();
    let mut simple = vec![0.0; n];
    if n == 0 {
        return simple;
    }
    let start = next_turn(turns, 0);
    let mut current = start;
    for i in (start..start + n).map(|i| i % n) {
        if turns[i].is_straight() {
            simple[current] += lengths[i];
        } else {
            current = i;
            simple[i] = lengths[i];
        }
    }
    simple
}

/// Longest side between two turns, as `(first vertex, vertex after its last edge)`
///
/// The scan starts at `start`, or at the first convex vertex when `None`.
pub fn longest_side(turns: &[Turn], lengths: &[f64], start: Option<usize>) -> (usize, usize) {
    let n = turns.len();
    if n == 0 {
        return (0, 0);
    }
    let start = start
        .or_else(|| turns.iter().position(|t| t.is_convex()))
        .unwrap_or(0);

    let mut longest = 0.0;
    let mut current_length = 0.0;
    let mut current_side = start;
    let mut side = (0, 0);
    for i in (start..start + n).map(|i| i % n) {
        if turns[i].is_straight() {
            current_length += lengths[i];
        } else {
            current_length = lengths[i];
            current_side = i;
        }
        if current_length > longest {
            longest = current_length;
            side = (current_side, (i + 1) % n);
        }
    }
    side
}

/// Best vertex to start the ridge walk from
///
/// Needs at least one convex right angle. The first concave right angle wins
/// if there is one; otherwise the corner after the longest side is used, or
/// the side itself when the ridge runs across.
pub fn start_index(turns: &[Turn], lengths: &[f64], across: bool) -> Option<usize> {
    let first_right = turns.iter().position(|&t| t == Turn::CONVEX_RIGHT)?;

    if let Some(concave) = turns.iter().position(|&t| t == Turn::CONCAVE_RIGHT) {
        return Some(concave);
    }

    let (side_start, side_end) = longest_side(turns, lengths, Some(first_right));
    if across {
        return Some(side_start);
    }
    if turns[side_end].value() < 2 {
        previous_convex(turns, side_start)
    } else {
        Some(side_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprint::GroundRing;
    use crate::Point2;

    fn ring(coords: &[(f64, f64)]) -> GroundRing {
        GroundRing::new(coords.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    fn values(turns: &[Turn]) -> Vec<i8> {
        turns.iter().map(|t| t.value()).collect()
    }

    fn l_shape() -> GroundRing {
        ring(&[
            (0.0, 0.0),
            (12.0, 0.0),
            (20.0, 0.0),
            (20.0, 15.0),
            (12.0, 15.0),
            (12.0, 10.0),
            (0.0, 10.0),
        ])
    }

    #[test]
    fn test_rectangle_is_all_right_angles() {
        let r = ring(&[(0.0, 0.0), (20.0, 0.0), (20.0, 15.0), (0.0, 15.0)]);
        assert_eq!(values(&classify_turns(&r.directions)), vec![2, 2, 2, 2]);
    }

    #[test]
    fn test_clockwise_rectangle_turns_negative() {
        let r = ring(&[(0.0, 0.0), (0.0, 15.0), (20.0, 15.0), (20.0, 0.0)]);
        assert_eq!(values(&classify_turns(&r.directions)), vec![-2, -2, -2, -2]);
    }

    #[test]
    fn test_l_shape_classification() {
        let turns = classify_turns(&l_shape().directions);
        assert_eq!(values(&turns), vec![2, 0, 2, 2, 2, -2, 2]);
    }

    #[test]
    fn test_obtuse_and_sharp_corner_merge_into_right_angles() {
        // Turns of 70 and 110 degrees at the top end add up to a half turn
        let top = 10.0 + 20.0 * 20f64.to_radians().tan();
        let r = ring(&[(0.0, 0.0), (20.0, 0.0), (20.0, 10.0), (0.0, top)]);
        let turns = classify_turns(&r.directions);
        assert_eq!(values(&turns), vec![2, 2, 2, 2]);
    }

    #[test]
    fn test_chamfered_corner_stays_obtuse() {
        let r = ring(&[
            (0.0, 0.0),
            (20.0, 0.0),
            (20.0, 13.0),
            (18.0, 15.0),
            (0.0, 15.0),
        ]);
        let turns = classify_turns(&r.directions);
        assert_eq!(values(&turns), vec![2, 2, 1, 1, 2]);
    }

    #[test]
    fn test_octagon_corners_stay_obtuse() {
        let r = ring(&[
            (1.0, 0.0),
            (2.0, 0.0),
            (3.0, 1.0),
            (3.0, 2.0),
            (2.0, 3.0),
            (1.0, 3.0),
            (0.0, 2.0),
            (0.0, 1.0),
        ]);
        let turns = classify_turns(&r.directions);
        assert!(turns.iter().all(|t| t.is_convex()));
        assert!(turns.iter().any(|t| t.value() == 1));
    }

    #[test]
    fn test_small_bends_accumulate_into_a_corner() {
        // Three 10 degree bends; the second pushes the sum past the tolerance
        let mut coords = vec![(0.0, 0.0)];
        let mut heading: f64 = 0.0;
        let mut p = (0.0, 0.0);
        for _ in 0..3 {
            p = (p.0 + 10.0 * heading.cos(), p.1 + 10.0 * heading.sin());
            coords.push(p);
            heading += 10f64.to_radians();
        }
        coords.push((p.0, p.1 + 30.0));
        coords.push((0.0, 30.0));
        let r = ring(&coords);
        let turns = classify_turns(&r.directions);
        assert_eq!(turns[1], Turn::STRAIGHT);
        assert_eq!(turns[2], Turn::CONVEX);
    }

    #[test]
    fn test_classification_is_stable_under_cyclic_shift() {
        let base = l_shape();
        let expected = classify_turns(&base.directions);
        let n = base.len();
        for shift in 1..n {
            let mut points = base.points.clone();
            points.rotate_left(shift);
            let turns = classify_turns(&GroundRing::new(points).directions);
            let mut rotated = expected.clone();
            rotated.rotate_left(shift);
            assert_eq!(turns, rotated, "shift {}", shift);
        }
    }

    #[test]
    fn test_navigation_helpers() {
        let turns = classify_turns(&l_shape().directions);
        assert_eq!(next_turn(&turns, 0), 2);
        assert_eq!(next_turn(&turns, 6), 0);
        assert_eq!(next_convex(&turns, 3), Some(4));
        assert_eq!(next_convex(&turns, 4), None);
        assert_eq!(previous_convex(&turns, 5), Some(4));
        assert_eq!(previous_convex(&turns, 6), None);
        assert_eq!(previous_convex(&turns, 2), Some(0));
    }

    #[test]
    fn test_simple_lengths_credit_straight_runs() {
        let r = l_shape();
        let turns = classify_turns(&r.directions);
        let simple = simple_lengths(&turns, &r.lengths);
        assert_eq!(simple, vec![20.0, 0.0, 15.0, 8.0, 5.0, 12.0, 10.0]);
    }

    #[test]
    fn test_longest_side_and_start() {
        let r = ring(&[(0.0, 0.0), (20.0, 0.0), (20.0, 15.0), (0.0, 15.0)]);
        let turns = classify_turns(&r.directions);
        assert_eq!(longest_side(&turns, &r.lengths, None), (0, 1));
        assert_eq!(start_index(&turns, &r.lengths, false), Some(1));
        assert_eq!(start_index(&turns, &r.lengths, true), Some(0));

        let l = l_shape();
        let turns = classify_turns(&l.directions);
        assert_eq!(start_index(&turns, &l.lengths, false), Some(5));
    }

    #[test]
    fn test_start_requires_a_right_angle() {
        let turns = vec![Turn::CONVEX; 6];
        assert_eq!(start_index(&turns, &[1.0; 6], false), None);
    }
}
