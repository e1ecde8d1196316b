use serde::Serialize;
use zone_geometry::{Point3d, Tolerance};

/// An undirected segment between two consecutive vertices of a face.
///
/// The edge keeps the direction its own face walks it (`start → end`), the
/// indices of every face found to share it, and two diagnostic flags.
/// The first owner is always the face the edge was built from.
#[derive(Debug, Clone, Serialize)]
pub struct Edge {
    start: Point3d,
    end: Point3d,
    owners: Vec<usize>,
    first_owner_name: String,
    conflicted: bool,
    created: bool,
}

impl Edge {
    pub fn new(start: Point3d, end: Point3d, owner: usize, owner_name: impl Into<String>) -> Self {
        Self {
            start,
            end,
            owners: vec![owner],
            first_owner_name: owner_name.into(),
            conflicted: false,
            created: false,
        }
    }

    pub fn start(&self) -> Point3d {
        self.start
    }

    pub fn end(&self) -> Point3d {
        self.end
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Indices of all faces sharing this edge, own face first.
    pub fn owners(&self) -> &[usize] {
        &self.owners
    }

    /// Number of faces sharing this edge.
    pub fn count(&self) -> usize {
        self.owners.len()
    }

    pub fn first_owner(&self) -> usize {
        self.owners[0]
    }

    pub fn first_owner_name(&self) -> &str {
        &self.first_owner_name
    }

    pub fn is_owned_by(&self, face: usize) -> bool {
        self.owners.contains(&face)
    }

    /// Two faces walk this edge in the same direction.
    pub fn is_conflicted(&self) -> bool {
        self.conflicted
    }

    /// Produced by splitting an original edge during colinear repair.
    pub fn is_created(&self) -> bool {
        self.created
    }

    /// Direction-independent equality: `(A, B)` matches `(B, A)`.
    pub fn matches(&self, other: &Edge, tol: &Tolerance) -> bool {
        self.is_same_direction(other, tol) || self.is_reverse_of(other, tol)
    }

    pub fn is_same_direction(&self, other: &Edge, tol: &Tolerance) -> bool {
        self.start.is_almost_equal(&other.start, tol) && self.end.is_almost_equal(&other.end, tol)
    }

    pub fn is_reverse_of(&self, other: &Edge, tol: &Tolerance) -> bool {
        self.start.is_almost_equal(&other.end, tol) && self.end.is_almost_equal(&other.start, tol)
    }

    /// `point` is colinear with this edge and strictly inside it.
    pub fn contains_point_strictly(&self, point: &Point3d, tol: &Tolerance) -> bool {
        point.lies_strictly_between(&self.start, &self.end, tol)
    }

    pub(crate) fn add_owner(&mut self, face: usize) {
        self.owners.push(face);
    }

    pub(crate) fn mark_conflicted(&mut self) {
        self.conflicted = true;
    }

    /// Drop matching results, keeping only the own face and the `created` flag.
    pub(crate) fn reset_matching(&mut self) {
        self.owners.truncate(1);
        self.conflicted = false;
    }

    /// Shorten this edge to end at `point` and return the remainder
    /// `point → old end`. Both pieces are marked created.
    pub(crate) fn split_at(&mut self, point: Point3d) -> Edge {
        let owner_name = self.first_owner_name.clone();
        let mut remainder = Edge::new(point, self.end, self.first_owner(), owner_name);
        remainder.created = true;
        self.end = point;
        self.created = true;
        remainder
    }
}
