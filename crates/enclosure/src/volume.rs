//! Two independent enclosed-volume estimates.

use zone_geometry::{GeometryError, Point3d, signed_area};

use crate::face::Face;

/// Volume from Newell vectors: each face contributes the signed volume of
/// the pyramid from the origin, `newell · (v0 - origin) / 6` (the Newell
/// vector carries twice the area, the pyramid formula a further third).
///
/// Positive for outward-wound closed shells, negative when every face is
/// wound inward.
pub fn newell_volume(faces: &[Face]) -> f64 {
    let total: f64 = faces
        .iter()
        .filter_map(|face| {
            let reference = face.vertices().first()?;
            Some(face.newell_vector().dot(&(*reference - Point3d::ORIGIN)))
        })
        .sum();
    total / 6.0
}

/// Volume from the divergence theorem over fitted face planes:
/// `Σ -(d · signed_area) / 3`.
pub fn divergence_theorem_volume(faces: &[Face]) -> Result<f64, GeometryError> {
    let mut volume = 0.0;
    for face in faces {
        let plane = face.plane()?;
        let area = signed_area(face.vertices(), &plane);
        volume += -(plane.d() * area) / 3.0;
    }
    Ok(volume)
}
