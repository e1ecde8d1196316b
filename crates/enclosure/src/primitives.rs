//! Builders for simple zone shells, wound outward.

use tracing::info;
use zone_geometry::{Point3d, Vec3};

use crate::error::EnclosureError;
use crate::face::Face;

/// Axis-aligned box between `min` and `max`.
///
/// Face order is stable: Floor, Roof, South (min y), North (max y),
/// West (min x), East (max x).
pub fn make_box_faces(min: Point3d, max: Point3d) -> Result<Vec<Face>, EnclosureError> {
    info!(min = ?min.to_array(), max = ?max.to_array(), "creating box zone");
    let (x0, y0, z0) = (min.x, min.y, min.z);
    let (x1, y1, z1) = (max.x, max.y, max.z);
    let v = [
        Point3d::new(x0, y0, z0), // 0: south-west floor
        Point3d::new(x1, y0, z0), // 1: south-east floor
        Point3d::new(x1, y1, z0), // 2: north-east floor
        Point3d::new(x0, y1, z0), // 3: north-west floor
        Point3d::new(x0, y0, z1), // 4: south-west roof
        Point3d::new(x1, y0, z1), // 5: south-east roof
        Point3d::new(x1, y1, z1), // 6: north-east roof
        Point3d::new(x0, y1, z1), // 7: north-west roof
    ];

    let face_defs: [(&str, [usize; 4]); 6] = [
        ("Floor", [0, 3, 2, 1]),
        ("Roof", [4, 5, 6, 7]),
        ("South", [0, 1, 5, 4]),
        ("North", [2, 3, 7, 6]),
        ("West", [3, 0, 4, 7]),
        ("East", [1, 2, 6, 5]),
    ];

    face_defs
        .iter()
        .enumerate()
        .map(|(index, (name, ids))| Face::new(ids.iter().map(|&i| v[i]).collect(), *name, index))
        .collect()
}

/// Vertical extrusion of a floor outline.
///
/// `floor_ccw` must wind counter-clockwise seen from above. Faces are
/// Floor, Roof, then one wall per outline edge (`Wall 1`, `Wall 2`, ...).
pub fn make_prism_faces(floor_ccw: &[Point3d], height: f64) -> Result<Vec<Face>, EnclosureError> {
    info!(sides = floor_ccw.len(), height, "creating prism zone");
    let rise = Vec3::new(0.0, 0.0, height);
    let roof: Vec<Point3d> = floor_ccw.iter().map(|p| *p + rise).collect();
    let floor: Vec<Point3d> = floor_ccw.iter().rev().copied().collect();

    let mut faces = Vec::with_capacity(floor_ccw.len() + 2);
    faces.push(Face::new(floor, "Floor", 0)?);
    faces.push(Face::new(roof.clone(), "Roof", 1)?);

    let n = floor_ccw.len();
    for k in 0..n {
        let next = (k + 1) % n;
        let wall = vec![floor_ccw[k], floor_ccw[next], roof[next], roof[k]];
        faces.push(Face::new(wall, format!("Wall {}", k + 1), k + 2)?);
    }
    Ok(faces)
}

/// Every face wound the other way, indices unchanged.
pub fn reversed(faces: &[Face]) -> Vec<Face> {
    faces.iter().map(Face::reversed).collect()
}
