use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

use crate::Tolerance;
use crate::vector::Vec3;

/// A point in 3D Euclidean space.
///
/// Equality between points is always tolerance-based; use
/// [`Point3d::is_almost_equal`] rather than `==` in geometric predicates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3d {
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        self.distance_squared_to(other).sqrt()
    }

    pub fn distance_squared_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    pub fn is_almost_equal(&self, other: &Self, tol: &Tolerance) -> bool {
        tol.points_coincident(self, other)
    }

    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            x: self.x + t * (other.x - self.x),
            y: self.y + t * (other.y - self.y),
            z: self.z + t * (other.z - self.z),
        }
    }

    /// True when `self` lies on the open segment `start..end`: within
    /// tolerance of the segment line, projecting strictly inside it, and not
    /// coincident with either endpoint.
    pub fn lies_strictly_between(
        &self,
        start: &Point3d,
        end: &Point3d,
        tol: &Tolerance,
    ) -> bool {
        if tol.points_coincident(self, start) || tol.points_coincident(self, end) {
            return false;
        }
        let segment = *end - *start;
        let len_sq = segment.length_squared();
        if len_sq < tol.coincidence * tol.coincidence {
            return false;
        }
        let t = (*self - *start).dot(&segment) / len_sq;
        if t <= 0.0 || t >= 1.0 {
            return false;
        }
        let foot = start.lerp(end, t);
        self.distance_to(&foot) < tol.coincidence
    }

    pub fn to_vec3(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl Add<Vec3> for Point3d {
    type Output = Point3d;
    fn add(self, rhs: Vec3) -> Self::Output {
        Point3d::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3d {
    type Output = Vec3;
    fn sub(self, rhs: Self) -> Self::Output {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Sub<Vec3> for Point3d {
    type Output = Point3d;
    fn sub(self, rhs: Vec3) -> Self::Output {
        Point3d::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}
