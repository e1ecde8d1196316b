//! Planar polygon measures.
//!
//! A polygon is an ordered, implicitly closed loop of points. Winding follows
//! the right-hand rule: counter-clockwise seen from the tip of the normal.

use crate::Tolerance;
use crate::error::GeometryError;
use crate::plane::Plane;
use crate::point::Point3d;
use crate::vector::Vec3;

/// Newell vector of a closed loop: direction is the loop normal, magnitude is
/// twice the (projected) enclosed area. Robust for slightly non-planar loops.
pub fn newell_vector(points: &[Point3d]) -> Vec3 {
    let n = points.len();
    let mut v = Vec3::ZERO;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        v.x += (a.y - b.y) * (a.z + b.z);
        v.y += (a.z - b.z) * (a.x + b.x);
        v.z += (a.x - b.x) * (a.y + b.y);
    }
    v
}

/// Reject loops with fewer than 3 points, non-finite coordinates, or
/// consecutive vertices closer than the coincidence tolerance.
pub fn check_loop(points: &[Point3d], tol: &Tolerance) -> Result<(), GeometryError> {
    let n = points.len();
    if n < 3 {
        return Err(GeometryError::TooFewPoints { count: n });
    }
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(GeometryError::NonFiniteCoordinate { index });
    }
    if let Some(index) = (0..n).find(|&i| tol.points_coincident(&points[i], &points[(i + 1) % n])) {
        return Err(GeometryError::ZeroLengthEdge { index });
    }
    Ok(())
}

/// Newell vector of a loop that passes [`check_loop`] and has non-zero area.
pub fn checked_newell_vector(
    points: &[Point3d],
    tol: &Tolerance,
) -> Result<Vec3, GeometryError> {
    check_loop(points, tol)?;
    let v = newell_vector(points);
    let magnitude = v.length();
    if tol.is_zero_area(magnitude * 0.5) {
        return Err(GeometryError::ZeroArea { magnitude });
    }
    Ok(v)
}

/// Unsigned area of a planar loop.
pub fn polygon_area(points: &[Point3d]) -> f64 {
    newell_vector(points).length() * 0.5
}

/// Area of the loop measured against `plane`'s normal: positive when the
/// loop winds counter-clockwise around the normal, negative otherwise.
pub fn signed_area(points: &[Point3d], plane: &Plane) -> f64 {
    newell_vector(points).dot(&plane.normal()) * 0.5
}

/// Vertex average of the loop.
pub fn centroid(points: &[Point3d]) -> Point3d {
    if points.is_empty() {
        return Point3d::ORIGIN;
    }
    let mut sum = Vec3::ZERO;
    for p in points {
        sum += p.to_vec3();
    }
    Point3d::ORIGIN + sum / points.len() as f64
}
