// Pluggable outlier detection over a distance matrix
// Same registry layout as other pluggable strategies in the crate

use crate::core::distance::DistanceMatrix;
use std::fmt::Debug;

/// Result of running a detector over a distance matrix
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detection {
    /// Index of the representative sequence, when the method uses one
    pub reference: Option<usize>,
    /// Flagged sequence indices in ascending order
    pub flagged: Vec<usize>,
}

/// Trait for outlier detection strategies.
///
/// Implementations must be deterministic for a given matrix and cutoff, and
/// monotone: raising the cutoff never adds a flagged sequence.
pub trait OutlierDetector: Send + Sync + Debug {
    /// Registry name
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Flag sequences whose divergence exceeds `cutoff`
    fn detect(&self, matrix: &DistanceMatrix, cutoff: f64) -> Detection;
}

pub mod mean;
pub mod medoid;
pub mod registry;

pub use mean::MeanDistanceDetector;
pub use medoid::{find_medoid, MedoidDetector};
pub use registry::{DetectorRegistry, DEFAULT_DETECTOR};
