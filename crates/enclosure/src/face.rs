use serde::Serialize;
use zone_geometry::{
    GeometryError, Plane, Point3d, Tolerance, Vec3, newell_vector, polygon_area,
};

use crate::edge::Edge;
use crate::error::EnclosureError;

/// A planar polygon bounding the zone: an ordered, implicitly closed vertex
/// loop plus its derived edges.
///
/// Edge `k` always runs from `vertices[k]` to `vertices[(k + 1) % n]`, so
/// `edges.len() == vertices.len()` holds through every mutation.
#[derive(Debug, Clone, Serialize)]
pub struct Face {
    index: usize,
    name: String,
    vertices: Vec<Point3d>,
    edges: Vec<Edge>,
}

impl Face {
    /// Build a face from its vertex loop, a display name and the caller's
    /// stable index (used as the join key for edge ownership).
    pub fn new(
        vertices: Vec<Point3d>,
        name: impl Into<String>,
        index: usize,
    ) -> Result<Self, EnclosureError> {
        let name = name.into();
        if vertices.len() < 3 {
            return Err(EnclosureError::TooFewVertices {
                name,
                count: vertices.len(),
            });
        }
        let n = vertices.len();
        let edges = (0..n)
            .map(|k| Edge::new(vertices[k], vertices[(k + 1) % n], index, name.clone()))
            .collect();
        Ok(Self {
            index,
            name,
            vertices,
            edges,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Point3d] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Fraction of this face's edges flagged as conflicted.
    pub fn conflict_ratio(&self) -> f64 {
        if self.edges.is_empty() {
            return 0.0;
        }
        let conflicted = self.edges.iter().filter(|e| e.is_conflicted()).count();
        conflicted as f64 / self.edges.len() as f64
    }

    pub fn newell_vector(&self) -> Vec3 {
        newell_vector(&self.vertices)
    }

    pub fn area(&self) -> f64 {
        polygon_area(&self.vertices)
    }

    pub fn plane(&self) -> Result<Plane, GeometryError> {
        Plane::from_points(&self.vertices)
    }

    /// The same face wound the other way.
    pub fn reversed(&self) -> Face {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        let n = vertices.len();
        let edges = (0..n)
            .map(|k| Edge::new(vertices[k], vertices[(k + 1) % n], self.index, self.name.clone()))
            .collect();
        Face {
            index: self.index,
            name: self.name.clone(),
            vertices,
            edges,
        }
    }

    pub(crate) fn edges_mut(&mut self) -> &mut [Edge] {
        &mut self.edges
    }

    /// Insert `point` into the loop by splitting edge `edge_index` in two.
    pub(crate) fn split_edge(&mut self, edge_index: usize, point: Point3d) {
        let remainder = self.edges[edge_index].split_at(point);
        self.vertices.insert(edge_index + 1, point);
        self.edges.insert(edge_index + 1, remainder);
        debug_assert_eq!(self.edges.len(), self.vertices.len());
    }
}

/// All loop vertices across `faces`, deduplicated within tolerance.
pub fn unique_vertices(faces: &[Face], tol: &Tolerance) -> Vec<Point3d> {
    let mut unique: Vec<Point3d> = Vec::new();
    for v in faces.iter().flat_map(|f| f.vertices()) {
        if !unique.iter().any(|u| u.is_almost_equal(v, tol)) {
            unique.push(*v);
        }
    }
    unique
}

/// All edges across `faces`, deduplicated by undirected tolerance equality.
/// The first occurrence of each segment is kept.
pub fn unique_edges(faces: &[Face], tol: &Tolerance) -> Vec<Edge> {
    dedup_edges(faces.iter().flat_map(|f| f.edges()), tol)
}

pub(crate) fn dedup_edges<'a>(
    edges: impl Iterator<Item = &'a Edge>,
    tol: &Tolerance,
) -> Vec<Edge> {
    let mut unique: Vec<Edge> = Vec::new();
    for e in edges {
        if !unique.iter().any(|u| u.matches(e, tol)) {
            unique.push(e.clone());
        }
    }
    unique
}
