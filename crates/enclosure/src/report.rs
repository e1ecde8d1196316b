//! Shared types for enclosure validation.
//!
//! Defines orientation states, diagnostic codes, severity levels, entity
//! counts, and the immutable `EnclosureReport`.

use std::fmt;

use serde::Serialize;

/// Outcome of orientation classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrientationState {
    /// Closed, every shared edge traversed in opposite directions, outward winding.
    Consistent,
    /// Closed and consistent, but every face wound inward. Volume sign corrected.
    CompletelyInsideOut,
    /// Closed, but some shared edges are traversed in the same direction.
    MixedConflict,
    /// Some edge is not shared by exactly two faces.
    NotEnclosed,
}

impl OrientationState {
    /// Whether the reported volume is a trustworthy enclosed volume.
    pub fn is_volume_reliable(&self) -> bool {
        matches!(self, Self::Consistent | Self::CompletelyInsideOut)
    }
}

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// Informational, already handled (e.g. sign flip, inserted points).
    Info,
    /// The volume or orientation result should not be trusted as-is.
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticCode {
    /// Some edge is not shared by exactly two faces.
    NotEnclosed,
    /// Shared edges traversed in the same direction by both faces.
    MixedOrientationConflict,
    /// Every face wound inward; volume sign was flipped.
    GloballyInsideOut,
    /// Edges were split at colinear vertices of neighbouring faces.
    ColinearPointsAdded,
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A single non-fatal finding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub message: String,
    /// Face indices the finding relates to, if any.
    pub faces: Vec<usize>,
}

impl Diagnostic {
    pub(crate) fn new(
        code: DiagnosticCode,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            severity,
            message: message.into(),
            faces: Vec::new(),
        }
    }

    pub(crate) fn with_faces(mut self, faces: Vec<usize>) -> Self {
        self.faces = faces;
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sev = match self.severity {
            Severity::Info => "INFO",
            Severity::Warning => "WARN",
        };
        write!(f, "[{}] {}: {}", sev, self.code, self.message)?;
        if !self.faces.is_empty() {
            write!(f, " faces={:?}", self.faces)?;
        }
        Ok(())
    }
}

/// Counts of entities in a validated zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EntityCounts {
    pub faces: usize,
    /// Sum of loop lengths (shared corners counted once per face).
    pub loop_vertices: usize,
    pub unique_vertices: usize,
    pub unique_edges: usize,
}

/// Everything learned about a face list, computed once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnclosureReport {
    pub is_enclosed_volume: bool,
    pub has_any_surface_with_incorrect_orientation: bool,
    pub is_completely_inside_out: bool,
    pub has_added_colinear_points: bool,
    pub orientation: OrientationState,
    /// Newell volume, sign-corrected when the shell is inside out.
    pub volume: f64,
    /// Newell volume as summed, before any sign correction.
    pub raw_volume: f64,
    /// Faces blamed for orientation conflicts, ordered by index.
    pub suspect_faces: Vec<usize>,
    pub counts: EntityCounts,
    pub diagnostics: Vec<Diagnostic>,
}

impl EnclosureReport {
    pub fn diagnostics_of(&self, code: DiagnosticCode) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.code == code).collect()
    }

    pub fn has_diagnostic(&self, code: DiagnosticCode) -> bool {
        self.diagnostics.iter().any(|d| d.code == code)
    }

    pub fn is_volume_reliable(&self) -> bool {
        self.orientation.is_volume_reliable()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for EnclosureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "EnclosureReport: orientation={:?}, enclosed={}, volume={:.6}, faces={}, \
             diagnostics={}",
            self.orientation,
            self.is_enclosed_volume,
            self.volume,
            self.counts.faces,
            self.diagnostics.len()
        )?;
        for d in &self.diagnostics {
            writeln!(f, "  {d}")?;
        }
        Ok(())
    }
}
