// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar and spatial vector helpers used by the roof builders

use crate::{Point2, Point3, Vector2, Vector3};

/// Relative tolerance below which two directions count as parallel
const PARALLEL_EPSILON: f64 = 1e-9;

/// Sign of a value as -1, 0 or 1 (zero stays zero, unlike `f64::signum`)
#[inline]
pub fn sign(value: f64) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

/// Signed double area of the triangle `a, b, c`
///
/// Positive when the triangle turns counter-clockwise (y up).
#[inline]
pub fn orientation(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    (b - a).perp(&(c - a))
}

/// Signed area of a closed ring (shoelace), positive for counter-clockwise
pub fn signed_area(ring: &[Point2<f64>]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| {
            let p = &ring[i];
            let q = &ring[(i + 1) % n];
            p.x * q.y - q.x * p.y
        })
        .sum();
    twice / 2.0
}

/// Vertex average of a ring
pub fn centroid(ring: &[Point2<f64>]) -> Point2<f64> {
    if ring.is_empty() {
        return Point2::origin();
    }
    let sum = ring
        .iter()
        .fold(Vector2::zeros(), |acc, p| acc + p.coords);
    Point2::from(sum / ring.len() as f64)
}

/// Angle bisector direction at a vertex
///
/// `incoming` and `outgoing` are the unit directions of the edges meeting at
/// the vertex. The result is deliberately left unnormalized; only its direction
/// is used, and skipping the square root keeps axis-aligned corners exact.
/// A full reversal yields the left perpendicular of `outgoing`.
#[inline]
pub fn bisector(incoming: &Vector2<f64>, outgoing: &Vector2<f64>) -> Vector2<f64> {
    let sum = outgoing - incoming;
    if sum.norm_squared() < 1e-12 {
        Vector2::new(-outgoing.y, outgoing.x)
    } else {
        sum
    }
}

/// Intersection of the lines `pa + t * va` and `pb + s * vb`
///
/// Returns `None` for parallel or degenerate lines.
#[inline]
pub fn intersect_lines(
    pa: &Point2<f64>,
    va: &Vector2<f64>,
    pb: &Point2<f64>,
    vb: &Vector2<f64>,
) -> Option<Point2<f64>> {
    let det = va.perp(vb);
    let scale = va.norm() * vb.norm();
    if scale == 0.0 || det.abs() <= PARALLEL_EPSILON * scale {
        return None;
    }
    let t = (pb - pa).perp(vb) / det;
    Some(pa + va * t)
}

/// Crossing-number point in polygon test
///
/// Points exactly on the boundary may fall either way.
pub fn point_in_polygon(point: &Point2<f64>, ring: &[Point2<f64>]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = &ring[i];
        let pj = &ring[j];
        if (pi.y > point.y) != (pj.y > point.y)
            && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Perpendicular distance from `point` to the line through `origin` along `direction`
#[inline]
pub fn distance_to_line(
    point: &Point2<f64>,
    origin: &Point2<f64>,
    direction: &Vector2<f64>,
) -> f64 {
    let len = direction.norm();
    if len == 0.0 {
        return (point - origin).norm();
    }
    (point - origin).perp(direction).abs() / len
}

/// Unit normal of the plane through three points
#[inline]
pub fn plane_normal(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> Option<Vector3<f64>> {
    (b - a).cross(&(c - a)).try_normalize(1e-12)
}

/// Intersection of the line `origin + t * direction` with a plane
#[inline]
pub fn intersect_line_plane(
    origin: &Point3<f64>,
    direction: &Vector3<f64>,
    plane_point: &Point3<f64>,
    plane_normal: &Vector3<f64>,
) -> Option<Point3<f64>> {
    let denom = plane_normal.dot(direction);
    if denom.abs() < 1e-12 {
        return None;
    }
    let t = plane_normal.dot(&(plane_point - origin)) / denom;
    Some(origin + direction * t)
}
