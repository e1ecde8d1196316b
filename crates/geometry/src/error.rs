use thiserror::Error;

/// Failures of the polygon and plane primitives.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("Polygon needs at least 3 points, got {count}")]
    TooFewPoints { count: usize },
    #[error("Polygon has zero area (Newell vector magnitude {magnitude:.3e})")]
    ZeroArea { magnitude: f64 },
    #[error("Vertex {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },
    #[error("Edge {index} has zero length")]
    ZeroLengthEdge { index: usize },
    #[error("Points do not define a unique plane")]
    DegeneratePlane,
}
