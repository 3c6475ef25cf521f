//! Analytic geometry primitives used by the biarc construction.
//!
//! Every function that can hit a singular configuration takes the
//! tolerance `eps` explicitly and reports a [`GeometryError`] instead of
//! dividing by a near-zero value.

use num_traits::Float;

use crate::error::GeometryError;
use crate::{NativeFloat, Point2};

/// Euclidean distance between `p` and `q`
#[inline]
pub fn distance(p: Point2, q: Point2) -> NativeFloat {
    p.distance(q)
}

/// Dot product of `p` and `q` taken as vectors from the origin
#[inline]
pub fn dot(p: Point2, q: Point2) -> NativeFloat {
    p.dot(q)
}

/// Signed area (times two) of the triangle (p0, p1, p2)
#[inline]
fn signed_area(p0: Point2, p1: Point2, p2: Point2) -> NativeFloat {
    (p1 - p0).cross(p2 - p0)
}

/// Intersection of the infinite line through (a0, a1) with the infinite line through (b0, b1).
///
/// The first line is parameterized as `a0 + t * (a1 - a0)`; `t` is the ratio of the
/// signed area of (a0, b0, b1) to the difference of the signed areas of (a0, a1, b0)
/// and (a0, a1, b1).
pub fn line_intersection(
    a0: Point2,
    a1: Point2,
    b0: Point2,
    b1: Point2,
    eps: NativeFloat,
) -> Result<Point2, GeometryError> {
    let area_b0 = signed_area(a0, a1, b0);
    let area_b1 = signed_area(a0, a1, b1);
    let denominator = area_b1 - area_b0;
    if denominator.abs() <= eps {
        return Err(GeometryError::ParallelLines);
    }
    let t = signed_area(a0, b0, b1) / denominator;
    Ok(a0 + (a1 - a0) * t)
}

/// Incenter of the triangle (p1, p2, p3): the vertices weighted by the length
/// of the side opposite to them.
pub fn incenter(
    p1: Point2,
    p2: Point2,
    p3: Point2,
    eps: NativeFloat,
) -> Result<Point2, GeometryError> {
    let a = p2.distance(p3);
    let b = p1.distance(p3);
    let c = p1.distance(p2);
    let perimeter = a + b + c;
    if perimeter <= eps {
        return Err(GeometryError::DegenerateTriangle);
    }
    Ok((p1 * a + p2 * b + p3 * c) * (1.0 / perimeter))
}

/// Solves the system
/// ```text
/// a11 * x + a12 * y = b1
/// a21 * x + a22 * y = b2
/// ```
/// by Cramer's rule, returning (x, y) as a point.
pub fn solve_2x2(
    a11: NativeFloat,
    a12: NativeFloat,
    b1: NativeFloat,
    a21: NativeFloat,
    a22: NativeFloat,
    b2: NativeFloat,
    eps: NativeFloat,
) -> Result<Point2, GeometryError> {
    let det = a11 * a22 - a12 * a21;
    if det.abs() <= eps {
        return Err(GeometryError::SingularSystem);
    }
    Ok(Point2::new(
        (b1 * a22 - a12 * b2) / det,
        (a11 * b2 - b1 * a21) / det,
    ))
}

/// Unit tangent of the circle around `center` at `point_on_circle`: the radius
/// vector rotated by -90 degrees.
pub fn unit_tangent_of_circle(center: Point2, point_on_circle: Point2, eps: NativeFloat) -> Point2 {
    let delta = point_on_circle - center;
    // vertical radius
    if delta.x.abs() <= eps {
        return if delta.y > 0.0 {
            Point2::new(1.0, 0.0)
        } else {
            Point2::new(-1.0, 0.0)
        };
    }
    let radius = delta.length();
    Point2::new(delta.y / radius, -delta.x / radius)
}

/// Angle between the positive x-axis and the ray from `center` through `point`, in (-pi, pi]
#[inline]
pub fn angle_to_x_axis(center: Point2, point: Point2) -> NativeFloat {
    let delta = point - center;
    delta.y.atan2(delta.x)
}
