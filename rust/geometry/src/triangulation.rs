// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon tessellation
//!
//! Wrapper around earcutr for 2D polygon triangulation. Every index returned
//! points into the concatenation of the outer ring and its holes.

use crate::{Error, Point2, Result};

/// Check if a polygon is convex (all cross products have same sign)
#[inline]
fn is_convex(points: &[Point2<f64>]) -> bool {
    if points.len() < 3 {
        return false;
    }

    let n = points.len();
    let mut sign = 0i8;

    for i in 0..n {
        let p0 = &points[i];
        let p1 = &points[(i + 1) % n];
        let p2 = &points[(i + 2) % n];

        let cross = (p1.x - p0.x) * (p2.y - p1.y) - (p1.y - p0.y) * (p2.x - p1.x);

        if cross.abs() > 1e-10 {
            let current_sign = if cross > 0.0 { 1i8 } else { -1i8 };
            if sign == 0 {
                sign = current_sign;
            } else if sign != current_sign {
                return false;
            }
        }
    }

    // All collinear
    sign != 0
}

/// Simple fan triangulation for convex polygons
#[inline]
fn fan_triangulate(n: usize) -> Vec<usize> {
    let mut indices = Vec::with_capacity((n - 2) * 3);
    for i in 1..n - 1 {
        indices.push(0);
        indices.push(i);
        indices.push(i + 1);
    }
    indices
}

/// Triangulate a polygon with holes
///
/// Holes with fewer than three points are ignored but still occupy their
/// index range, so callers can keep a flat vertex array of all rings.
pub fn tessellate(outer: &[Point2<f64>], holes: &[Vec<Point2<f64>>]) -> Result<Vec<usize>> {
    let n = outer.len();
    if n < 3 {
        return Err(Error::TriangulationError(
            "Need at least 3 points in outer boundary".to_string(),
        ));
    }

    let has_holes = holes.iter().any(|h| h.len() >= 3);

    if !has_holes {
        // FAST PATH: Triangle - no triangulation needed
        if n == 3 && is_convex(outer) {
            return Ok(vec![0, 1, 2]);
        }
        // FAST PATH: Small convex polygon - fan
        if n <= 8 && is_convex(outer) {
            return Ok(fan_triangulate(n));
        }
    }

    let total_points: usize = n + holes.iter().map(|h| h.len()).sum::<usize>();
    let mut vertices = Vec::with_capacity(total_points * 2);
    for p in outer {
        vertices.push(p.x);
        vertices.push(p.y);
    }

    let mut hole_indices = Vec::with_capacity(holes.len());
    let mut skipped = 0usize;
    let mut offsets = Vec::with_capacity(holes.len());
    for hole in holes {
        if hole.len() < 3 {
            skipped += hole.len();
            continue;
        }
        hole_indices.push(vertices.len() / 2);
        offsets.push((vertices.len() / 2, skipped));
        for p in hole {
            vertices.push(p.x);
            vertices.push(p.y);
        }
    }

    let indices = earcutr::earcut(&vertices, &hole_indices, 2)
        .map_err(|e| Error::TriangulationError(format!("{:?}", e)))?;

    if indices.is_empty() {
        return Err(Error::TriangulationError(
            "Tessellator produced no triangles".to_string(),
        ));
    }

    if skipped == 0 {
        return Ok(indices);
    }

    // Shift indices past the degenerate holes that were left out
    Ok(indices
        .into_iter()
        .map(|i| {
            let shift = offsets
                .iter()
                .rev()
                .find(|(start, _)| i >= *start)
                .map_or(0, |(_, skipped)| *skipped);
            i + shift
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(min: f64, max: f64) -> Vec<Point2<f64>> {
        vec![
            Point2::new(min, min),
            Point2::new(max, min),
            Point2::new(max, max),
            Point2::new(min, max),
        ]
    }

    #[test]
    fn test_tessellate_square() {
        let indices = tessellate(&square(0.0, 1.0), &[]).unwrap();
        assert_eq!(indices.len(), 6);
    }

    #[test]
    fn test_tessellate_triangle() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.5, 1.0),
        ];
        assert_eq!(tessellate(&points, &[]).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_tessellate_concave_polygon() {
        let l_shape = vec![
            Point2::new(0.0, 0.0),
            Point2::new(20.0, 0.0),
            Point2::new(20.0, 15.0),
            Point2::new(12.0, 15.0),
            Point2::new(12.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        let indices = tessellate(&l_shape, &[]).unwrap();
        assert_eq!(indices.len(), 12);
    }

    #[test]
    fn test_tessellate_insufficient_points() {
        let points = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)];
        assert!(tessellate(&points, &[]).is_err());
    }

    #[test]
    fn test_tessellate_collinear_points_fails() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        ];
        assert!(tessellate(&points, &[]).is_err());
    }

    #[test]
    fn test_tessellate_square_with_hole() {
        let indices = tessellate(&square(0.0, 10.0), &[square(3.0, 7.0)]).unwrap();
        assert_eq!(indices.len(), 24);
        assert!(indices.iter().any(|&i| i >= 4));
        assert!(indices.iter().all(|&i| i < 8));
    }

    #[test]
    fn test_tessellate_skips_degenerate_hole() {
        let degenerate = vec![Point2::new(1.0, 1.0), Point2::new(2.0, 1.0)];
        let indices =
            tessellate(&square(0.0, 20.0), &[degenerate, square(5.0, 10.0)]).unwrap();
        // The real hole occupies indices 6..10 behind the two skipped points
        assert!(indices.iter().all(|&i| i < 4 || (6..10).contains(&i)));
        assert!(indices.iter().any(|&i| i >= 6));
    }
}
