//! Geometry primitives for zone enclosure checks.
//!
//! Points, vectors, least-squares planes and polygon measures (Newell
//! vector, area, signed area). All comparisons go through an explicit
//! [`Tolerance`] so results stay reproducible across unit scales.

pub mod error;
pub mod plane;
pub mod point;
pub mod polygon;
pub mod vector;

pub use error::GeometryError;
pub use plane::Plane;
pub use point::Point3d;
pub use polygon::{
    centroid, check_loop, checked_newell_vector, newell_vector, polygon_area, signed_area,
};
pub use vector::Vec3;

use serde::{Deserialize, Serialize};

/// Tolerance configuration for geometric comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Points closer than this are considered coincident (model units, metres for buildings).
    pub coincidence: f64,
}

impl Tolerance {
    /// Building-scale default: 1 mm when coordinates are in metres.
    pub const DEFAULT: Self = Self { coincidence: 1e-3 };

    pub fn new(coincidence: f64) -> Self {
        Self { coincidence }
    }

    pub fn points_coincident(&self, a: &Point3d, b: &Point3d) -> bool {
        a.distance_to(b) < self.coincidence
    }

    pub fn is_zero_length(&self, length: f64) -> bool {
        length.abs() < self.coincidence
    }

    /// Areas below the square of the linear tolerance are treated as zero.
    pub fn is_zero_area(&self, area: f64) -> bool {
        area.abs() < self.coincidence * self.coincidence
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
