//! The zone enclosure engine.
//!
//! [`validate`] runs the whole pipeline once: input checks, edge matching,
//! optional colinear repair, orientation classification and volume. A
//! [`Polyhedron`] keeps its result and only answers queries afterwards.

use std::collections::BTreeSet;

use approx::relative_eq;
use tracing::{error, info, instrument, warn};
use zone_geometry::{Point3d, checked_newell_vector};

use crate::config::EnclosureConfig;
use crate::edge::Edge;
use crate::error::EnclosureError;
use crate::face::{Face, unique_edges, unique_vertices};
use crate::matching::{
    edges_not_two, has_edges_not_two, perform_edge_matching, reset_edge_matching,
};
use crate::repair::insert_colinear_points;
use crate::report::{
    Diagnostic, DiagnosticCode, EnclosureReport, EntityCounts, OrientationState, Severity,
};
use crate::volume::{divergence_theorem_volume, newell_volume};

/// Ratios closer than this are treated as a tie when blaming faces.
const RATIO_EPSILON: f64 = 1e-12;

/// Validate a face list and classify the shell it forms.
///
/// Returns the faces (with any inserted colinear points) together with the
/// report. Fails only on malformed input; open or inconsistently wound
/// shells are described by the report's diagnostics.
#[instrument(skip_all, fields(faces = faces.len()))]
pub fn validate(
    mut faces: Vec<Face>,
    config: &EnclosureConfig,
) -> Result<(Vec<Face>, EnclosureReport), EnclosureError> {
    check_inputs(&faces, config)?;
    let tol = &config.tolerance;
    let mut diagnostics = Vec::new();

    reset_edge_matching(&mut faces);
    let mut summary = perform_edge_matching(&mut faces, tol);
    let mut enclosed = !has_edges_not_two(&faces);

    let mut added_colinear = false;
    if !enclosed && config.repair_colinear_points {
        let inserted = insert_colinear_points(&mut faces, tol);
        if inserted > 0 {
            reset_edge_matching(&mut faces);
            summary = perform_edge_matching(&mut faces, tol);
            enclosed = !has_edges_not_two(&faces);
            added_colinear = true;

            let repaired: Vec<usize> = faces
                .iter()
                .filter(|f| f.edges().iter().any(Edge::is_created))
                .map(Face::index)
                .collect();
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticCode::ColinearPointsAdded,
                    Severity::Info,
                    format!(
                        "inserted {inserted} colinear points (enclosed after repair: {enclosed})"
                    ),
                )
                .with_faces(repaired),
            );
        }
    }

    let raw_volume = newell_volume(&faces);
    let conflicts = summary.has_conflicts();

    let (orientation, volume) = if !enclosed {
        (OrientationState::NotEnclosed, raw_volume)
    } else if conflicts {
        (OrientationState::MixedConflict, raw_volume)
    } else if raw_volume < 0.0 {
        (OrientationState::CompletelyInsideOut, -raw_volume)
    } else {
        (OrientationState::Consistent, raw_volume)
    };
    let inside_out = orientation == OrientationState::CompletelyInsideOut;

    let suspect_faces = if orientation == OrientationState::MixedConflict {
        blame_conflicted_faces(&faces)
    } else {
        Vec::new()
    };

    match orientation {
        OrientationState::NotEnclosed => {
            let open = edges_not_two(&faces, true, tol);
            let touched: BTreeSet<usize> = open.iter().map(Edge::first_owner).collect();
            warn!(edges = open.len(), "zone is not an enclosed volume");
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticCode::NotEnclosed,
                    Severity::Warning,
                    format!("{} edges are not shared by exactly two faces", open.len()),
                )
                .with_faces(touched.into_iter().collect()),
            );
        }
        OrientationState::MixedConflict => {
            warn!(
                conflicted_pairs = summary.conflicted_pairs,
                suspects = ?suspect_faces,
                "faces with inconsistent orientation"
            );
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticCode::MixedOrientationConflict,
                    Severity::Warning,
                    format!(
                        "{} shared edges are traversed in the same direction",
                        summary.conflicted_pairs
                    ),
                )
                .with_faces(suspect_faces.clone()),
            );
        }
        OrientationState::CompletelyInsideOut => {
            info!(raw_volume, "all faces wound inward, volume sign corrected");
            diagnostics.push(Diagnostic::new(
                DiagnosticCode::GloballyInsideOut,
                Severity::Info,
                "every face is wound inward; volume sign was flipped",
            ));
        }
        OrientationState::Consistent => {}
    }

    let counts = EntityCounts {
        faces: faces.len(),
        loop_vertices: faces.iter().map(Face::num_vertices).sum(),
        unique_vertices: unique_vertices(&faces, tol).len(),
        unique_edges: unique_edges(&faces, tol).len(),
    };

    info!(
        orientation = ?orientation,
        enclosed,
        volume,
        diagnostics = diagnostics.len(),
        "enclosure validation complete"
    );

    let report = EnclosureReport {
        is_enclosed_volume: enclosed,
        has_any_surface_with_incorrect_orientation: conflicts || inside_out,
        is_completely_inside_out: inside_out,
        has_added_colinear_points: added_colinear,
        orientation,
        volume,
        raw_volume,
        suspect_faces,
        counts,
        diagnostics,
    };
    Ok((faces, report))
}

fn check_inputs(faces: &[Face], config: &EnclosureConfig) -> Result<(), EnclosureError> {
    if faces.is_empty() {
        return Err(EnclosureError::NoFaces);
    }
    for (position, face) in faces.iter().enumerate() {
        if face.index() != position {
            return Err(EnclosureError::FaceIndexMismatch {
                name: face.name().to_string(),
                position,
                index: face.index(),
            });
        }
        let malformed = |source| EnclosureError::MalformedFace {
            index: face.index(),
            name: face.name().to_string(),
            source,
        };
        checked_newell_vector(face.vertices(), &config.tolerance).map_err(malformed)?;
        face.plane().map_err(malformed)?;
    }
    Ok(())
}

/// For each conflicted edge, blame whichever owner has more of its edges
/// conflicted. Equal ratios blame both.
fn blame_conflicted_faces(faces: &[Face]) -> Vec<usize> {
    let mut suspects = BTreeSet::new();
    for edge in faces.iter().flat_map(|f| f.edges()).filter(|e| e.is_conflicted()) {
        let ratios: Vec<(usize, f64)> = edge
            .owners()
            .iter()
            .filter_map(|&i| faces.get(i).map(|f| (i, f.conflict_ratio())))
            .collect();
        let max = ratios.iter().map(|&(_, r)| r).fold(f64::NEG_INFINITY, f64::max);
        suspects.extend(
            ratios
                .iter()
                .filter(|&&(_, r)| max - r < RATIO_EPSILON)
                .map(|&(i, _)| i),
        );
    }
    suspects.into_iter().collect()
}

/// A validated zone shell.
///
/// All state is computed in construction; every accessor is read-only.
#[derive(Debug, Clone)]
pub struct Polyhedron {
    faces: Vec<Face>,
    report: EnclosureReport,
    config: EnclosureConfig,
}

impl Polyhedron {
    /// Validate with the default configuration (1 mm tolerance, repair on).
    pub fn new(faces: Vec<Face>) -> Result<Self, EnclosureError> {
        Self::with_config(faces, EnclosureConfig::default())
    }

    pub fn with_config(faces: Vec<Face>, config: EnclosureConfig) -> Result<Self, EnclosureError> {
        let (faces, report) = validate(faces, &config)?;
        Ok(Self {
            faces,
            report,
            config,
        })
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn report(&self) -> &EnclosureReport {
        &self.report
    }

    pub fn config(&self) -> &EnclosureConfig {
        &self.config
    }

    pub fn orientation_state(&self) -> OrientationState {
        self.report.orientation
    }

    pub fn is_enclosed_volume(&self) -> bool {
        self.report.is_enclosed_volume
    }

    pub fn has_any_surface_with_incorrect_orientation(&self) -> bool {
        self.report.has_any_surface_with_incorrect_orientation
    }

    pub fn is_completely_inside_out(&self) -> bool {
        self.report.is_completely_inside_out
    }

    pub fn has_added_colinear_points(&self) -> bool {
        self.report.has_added_colinear_points
    }

    /// Newell volume, positive for inside-out shells. Open or mixed shells
    /// still get a number, but it does not describe an enclosed volume.
    pub fn polyhedron_volume(&self) -> f64 {
        if !self.report.is_volume_reliable() {
            warn!(
                orientation = ?self.report.orientation,
                volume = self.report.volume,
                "volume requested for a zone that is not a consistent enclosure"
            );
        }
        self.report.volume
    }

    /// Divergence-theorem volume over fitted face planes. Not sign-corrected.
    pub fn calc_divergence_theorem_volume(&self) -> f64 {
        match divergence_theorem_volume(&self.faces) {
            Ok(volume) => volume,
            Err(err) => {
                error!(%err, "plane fit failed on a validated face");
                f64::NAN
            }
        }
    }

    /// Whether the uncorrected Newell volume and the divergence-theorem
    /// volume agree within `max_relative`.
    pub fn volumes_agree(&self, max_relative: f64) -> bool {
        let divergence = self.calc_divergence_theorem_volume();
        relative_eq!(
            self.report.raw_volume,
            divergence,
            epsilon = f64::EPSILON,
            max_relative = max_relative
        )
    }

    /// Faces blamed for orientation conflicts. Empty unless the shell is
    /// closed with mixed winding.
    pub fn find_surfaces_with_incorrect_orientation(&self) -> Vec<&Face> {
        self.report
            .suspect_faces
            .iter()
            .filter_map(|&i| self.faces.get(i))
            .collect()
    }

    pub fn edges_not_two(&self, include_created_edges: bool) -> Vec<Edge> {
        edges_not_two(&self.faces, include_created_edges, &self.config.tolerance)
    }

    /// Edges produced by colinear repair, per face.
    pub fn created_edges(&self) -> Vec<&Edge> {
        self.faces
            .iter()
            .flat_map(|f| f.edges())
            .filter(|e| e.is_created())
            .collect()
    }

    pub fn unique_vertices(&self) -> Vec<Point3d> {
        unique_vertices(&self.faces, &self.config.tolerance)
    }

    pub fn unique_edges(&self) -> Vec<Edge> {
        unique_edges(&self.faces, &self.config.tolerance)
    }

    /// Total loop length over all faces; shared corners count once per face.
    pub fn num_vertices(&self) -> usize {
        self.faces.iter().map(Face::num_vertices).sum()
    }
}
