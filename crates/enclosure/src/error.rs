use thiserror::Error;
use zone_geometry::GeometryError;

/// Construction-time failures. Topology problems (open shells, winding
/// conflicts) are not errors; they are reported through
/// [`EnclosureReport`](crate::report::EnclosureReport) diagnostics.
#[derive(Debug, Error)]
pub enum EnclosureError {
    #[error("No faces supplied")]
    NoFaces,

    #[error("Face '{name}' has {count} vertices (at least 3 required)")]
    TooFewVertices { name: String, count: usize },

    #[error("Face '{name}' at position {position} carries index {index}")]
    FaceIndexMismatch {
        name: String,
        position: usize,
        index: usize,
    },

    #[error("Face '{name}' (index {index}) is malformed: {source}")]
    MalformedFace {
        index: usize,
        name: String,
        #[source]
        source: GeometryError,
    },
}
