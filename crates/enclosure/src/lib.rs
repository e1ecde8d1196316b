//! Zone enclosure validation and volume.
//!
//! Takes the planar polygons bounding a building zone, checks that they
//! close a watertight shell, reports faces wound against their neighbours,
//! heals vertices lying un-split on neighbouring edges, and computes the
//! enclosed volume two independent ways.
//!
//! ```no_run
//! use zone_enclosure::{Point3d, Polyhedron, make_box_faces};
//!
//! let faces = make_box_faces(Point3d::ORIGIN, Point3d::new(4.0, 3.0, 2.5))?;
//! let zone = Polyhedron::new(faces)?;
//! assert!(zone.is_enclosed_volume());
//! println!("{}", zone.report());
//! # Ok::<(), zone_enclosure::EnclosureError>(())
//! ```

pub mod config;
pub mod edge;
pub mod error;
pub mod face;
pub mod matching;
pub mod polyhedron;
pub mod primitives;
pub mod repair;
pub mod report;
pub mod volume;

pub use config::EnclosureConfig;
pub use edge::Edge;
pub use error::EnclosureError;
pub use face::{Face, unique_edges, unique_vertices};
pub use matching::{
    MatchSummary, edges_not_two, has_edges_not_two, perform_edge_matching, reset_edge_matching,
};
pub use polyhedron::{Polyhedron, validate};
pub use primitives::{make_box_faces, make_prism_faces, reversed};
pub use repair::insert_colinear_points;
pub use report::{
    Diagnostic, DiagnosticCode, EnclosureReport, EntityCounts, OrientationState, Severity,
};
pub use volume::{divergence_theorem_volume, newell_volume};
pub use zone_geometry::{GeometryError, Point3d, Tolerance, Vec3};
