use nalgebra::{Matrix3, SymmetricEigen};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Tolerance;
use crate::error::GeometryError;
use crate::point::Point3d;
use crate::polygon::{centroid, newell_vector};
use crate::vector::Vec3;

/// An infinite plane in Hessian normal form: `normal · p + d = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    normal: Vec3,
    d: f64,
}

impl Plane {
    /// Plane through `point` with the given (not necessarily unit) normal.
    pub fn from_point_normal(point: Point3d, normal: Vec3) -> Result<Self, GeometryError> {
        let normal = normal.normalized().ok_or(GeometryError::DegeneratePlane)?;
        Ok(Self {
            normal,
            d: -normal.dot(&point.to_vec3()),
        })
    }

    /// Least-squares plane through three or more points.
    ///
    /// The normal is the eigenvector of the centred covariance matrix with
    /// the least spread, oriented to agree with the loop's Newell vector so
    /// that the plane normal follows the point winding.
    pub fn from_points(points: &[Point3d]) -> Result<Self, GeometryError> {
        if points.len() < 3 {
            return Err(GeometryError::TooFewPoints { count: points.len() });
        }
        let winding = newell_vector(points)
            .normalized()
            .ok_or(GeometryError::DegeneratePlane)?;

        let c = centroid(points);
        let mut covariance = Matrix3::<f64>::zeros();
        for p in points {
            let offset = (*p - c).to_nalgebra();
            covariance += offset * offset.transpose();
        }

        // Eigenvalues are not sorted and need not follow column order, so each
        // eigenvector is ranked by its own spread `vᵀ·C·v`.
        let eigen = SymmetricEigen::new(covariance);
        let (axis, residual) = eigen
            .eigenvectors
            .column_iter()
            .filter_map(|column| column.into_owned().try_normalize(f64::EPSILON))
            .map(|axis| {
                let spread = axis.dot(&(covariance * axis));
                (axis, spread)
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .ok_or(GeometryError::DegeneratePlane)?;

        let mut normal = Vec3::from_nalgebra(&axis)
            .normalized()
            .ok_or(GeometryError::DegeneratePlane)?;
        if normal.dot(&winding) < 0.0 {
            normal = -normal;
        }

        debug!(points = points.len(), residual, "fitted plane");

        Ok(Self {
            normal,
            d: -normal.dot(&c.to_vec3()),
        })
    }

    /// Unit normal.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Signed offset of the plane from the origin along `-normal`.
    pub fn d(&self) -> f64 {
        self.d
    }

    pub fn signed_distance(&self, p: &Point3d) -> f64 {
        self.normal.dot(&p.to_vec3()) + self.d
    }

    pub fn contains_point(&self, p: &Point3d, tol: &Tolerance) -> bool {
        tol.is_zero_length(self.signed_distance(p))
    }

    pub fn reversed(&self) -> Self {
        Self {
            normal: -self.normal,
            d: -self.d,
        }
    }
}
