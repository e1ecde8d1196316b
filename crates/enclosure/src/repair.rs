//! Colinear-point repair.
//!
//! Heals the common near-miss where one face's edge passes through a vertex
//! that a neighbouring face includes at that location, e.g. a wall split
//! into two coplanar pieces next to a single full-height wall. The edge is
//! split at the foreign vertex so both sides can match.

use tracing::{debug, info, instrument};
use zone_geometry::{Point3d, Tolerance};

use crate::face::{Face, unique_vertices};

/// Split edges at foreign vertices until no more splits apply.
///
/// Returns the number of vertices inserted. The candidate set is the
/// deduplicated vertex set of all faces taken before any insertion.
#[instrument(skip_all, fields(faces = faces.len()))]
pub fn insert_colinear_points(faces: &mut [Face], tol: &Tolerance) -> usize {
    let candidates = unique_vertices(faces, tol);
    let before: usize = faces.iter().map(Face::num_vertices).sum();

    let mut passes = 0usize;
    while repair_pass(faces, &candidates, tol) {
        passes += 1;
    }

    let inserted = faces.iter().map(Face::num_vertices).sum::<usize>() - before;
    if inserted > 0 {
        info!(inserted, passes, "inserted colinear points");
    }
    inserted
}

/// One pass over all faces. Returns whether any vertex was inserted.
fn repair_pass(faces: &mut [Face], candidates: &[Point3d], tol: &Tolerance) -> bool {
    let mut changed = false;
    for face in faces.iter_mut() {
        changed |= split_face_edges(face, candidates, tol) > 0;
    }
    changed
}

/// Split one face's edges until none contains a candidate strictly inside.
///
/// The scan restarts after every split since a new piece may itself need
/// splitting at a different vertex. A split point becomes an endpoint of
/// both pieces, and endpoints are never split candidates, so the number of
/// splits is bounded by edges times candidates.
fn split_face_edges(face: &mut Face, candidates: &[Point3d], tol: &Tolerance) -> usize {
    let mut inserted = 0;
    while let Some((edge_index, point)) = find_split(face, candidates, tol) {
        debug!(face = face.index(), edge_index, ?point, "splitting edge at colinear point");
        face.split_edge(edge_index, point);
        inserted += 1;
    }
    inserted
}

fn find_split(
    face: &Face,
    candidates: &[Point3d],
    tol: &Tolerance,
) -> Option<(usize, Point3d)> {
    face.edges().iter().enumerate().find_map(|(k, edge)| {
        candidates
            .iter()
            .find(|p| edge.contains_point_strictly(p, tol))
            .map(|p| (k, *p))
    })
}
