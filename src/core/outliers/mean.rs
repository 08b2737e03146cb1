// mean.rs - Mean pairwise distance outlier detection

use super::{Detection, OutlierDetector};
use crate::core::distance::DistanceMatrix;

/// Flags every sequence whose mean distance to the others exceeds the cutoff
#[derive(Debug, Clone, Default)]
pub struct MeanDistanceDetector;

impl OutlierDetector for MeanDistanceDetector {
    fn name(&self) -> &'static str {
        "mean"
    }

    fn description(&self) -> &'static str {
        "Mean distance to all other sequences exceeds the cutoff"
    }

    fn detect(&self, matrix: &DistanceMatrix, cutoff: f64) -> Detection {
        let flagged = (0..matrix.len())
            .filter(|&i| matrix.mean_distance(i) > cutoff)
            .collect();

        Detection {
            reference: None,
            flagged,
        }
    }
}
