//! Configuration for the enclosure checks.

use serde::{Deserialize, Serialize};
use zone_geometry::Tolerance;

/// Controls tolerance and which repair steps run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnclosureConfig {
    /// Point coincidence and colinearity tolerance.
    pub tolerance: Tolerance,
    /// Split edges at foreign vertices lying on them when the first
    /// matching pass finds the shape open.
    pub repair_colinear_points: bool,
}

impl Default for EnclosureConfig {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::DEFAULT,
            repair_colinear_points: true,
        }
    }
}

impl EnclosureConfig {
    /// Matching only; the colinear-point repair is skipped.
    pub fn without_repair() -> Self {
        Self {
            repair_colinear_points: false,
            ..Self::default()
        }
    }

    /// Default behaviour with a custom coincidence tolerance.
    pub fn with_tolerance(coincidence: f64) -> Self {
        Self {
            tolerance: Tolerance::new(coincidence),
            ..Self::default()
        }
    }
}
