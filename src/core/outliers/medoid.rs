// medoid.rs - Distance-from-medoid outlier detection

use super::{Detection, OutlierDetector};
use crate::core::distance::DistanceMatrix;

/// Index of the sequence with the smallest total distance to all others.
/// Ties resolve to the lowest index.
pub fn find_medoid(matrix: &DistanceMatrix) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for i in 0..matrix.len() {
        let total = matrix.row_sum(i);
        match best {
            Some((_, best_total)) if total >= best_total => {}
            _ => best = Some((i, total)),
        }
    }
    best.map(|(i, _)| i)
}

/// Flags every sequence farther than the cutoff from the medoid
#[derive(Debug, Clone, Default)]
pub struct MedoidDetector;

impl OutlierDetector for MedoidDetector {
    fn name(&self) -> &'static str {
        "medoid"
    }

    fn description(&self) -> &'static str {
        "Distance from the medoid sequence exceeds the cutoff"
    }

    fn detect(&self, matrix: &DistanceMatrix, cutoff: f64) -> Detection {
        let Some(medoid) = find_medoid(matrix) else {
            return Detection::default();
        };

        let flagged = matrix
            .row(medoid)
            .iter()
            .enumerate()
            .filter(|&(_, &d)| d > cutoff)
            .map(|(i, _)| i)
            .collect();

        Detection {
            reference: Some(medoid),
            flagged,
        }
    }
}
