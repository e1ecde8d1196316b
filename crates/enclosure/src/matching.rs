//! Pairwise edge matching across faces.
//!
//! Every edge of every face is compared against every edge of every other
//! face by undirected tolerance equality. A match records mutual ownership;
//! when both faces walk the shared segment in the same direction the two
//! edges are flagged as conflicted.

use serde::Serialize;
use tracing::{debug, instrument};
use zone_geometry::Tolerance;

use crate::edge::Edge;
use crate::face::{Face, dedup_edges};

/// Outcome of one matching pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    /// Edge pairs recorded as shared.
    pub matched_pairs: usize,
    /// Shared edge pairs walked in the same direction by both faces.
    pub conflicted_pairs: usize,
}

impl MatchSummary {
    pub fn has_conflicts(&self) -> bool {
        self.conflicted_pairs > 0
    }
}

/// Record shared edges between all face pairs.
///
/// Ownership is recorded on both edges at once, so visiting the unordered
/// pair `(i, j)` covers `(j, i)` as well. The resulting owner counts and
/// conflict flags do not depend on face order.
#[instrument(skip_all, fields(faces = faces.len()))]
pub fn perform_edge_matching(faces: &mut [Face], tol: &Tolerance) -> MatchSummary {
    let mut summary = MatchSummary::default();

    for i in 0..faces.len() {
        for j in (i + 1)..faces.len() {
            let (face_i, face_j) = pair_mut(faces, i, j);
            let (index_i, index_j) = (face_i.index(), face_j.index());

            for edge_i in face_i.edges_mut() {
                for edge_j in face_j.edges_mut() {
                    if !edge_i.matches(edge_j, tol) {
                        continue;
                    }
                    if edge_i.is_owned_by(index_j) || edge_j.is_owned_by(index_i) {
                        continue;
                    }
                    edge_i.add_owner(index_j);
                    edge_j.add_owner(index_i);
                    summary.matched_pairs += 1;

                    if !edge_i.is_reverse_of(edge_j, tol) {
                        edge_i.mark_conflicted();
                        edge_j.mark_conflicted();
                        summary.conflicted_pairs += 1;
                    }
                }
            }
        }
    }

    debug!(
        matched_pairs = summary.matched_pairs,
        conflicted_pairs = summary.conflicted_pairs,
        "edge matching complete"
    );
    summary
}

/// Clear all ownership and conflict state so matching can run again.
pub fn reset_edge_matching(faces: &mut [Face]) {
    for face in faces.iter_mut() {
        for edge in face.edges_mut() {
            edge.reset_matching();
        }
    }
}

/// True when some edge is not shared by exactly two faces.
pub fn has_edges_not_two(faces: &[Face]) -> bool {
    faces
        .iter()
        .flat_map(|f| f.edges())
        .any(|e| e.count() != 2)
}

/// Edges not shared by exactly two faces, deduplicated. Edges produced by
/// colinear repair are left out unless `include_created` is set.
pub fn edges_not_two(faces: &[Face], include_created: bool, tol: &Tolerance) -> Vec<Edge> {
    dedup_edges(
        faces
            .iter()
            .flat_map(|f| f.edges())
            .filter(|e| e.count() != 2)
            .filter(|e| include_created || !e.is_created()),
        tol,
    )
}

fn pair_mut(faces: &mut [Face], i: usize, j: usize) -> (&mut Face, &mut Face) {
    debug_assert!(i < j);
    let (head, tail) = faces.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}
