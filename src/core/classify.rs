// classify.rs - Outlier classification with the pair and all-but-one rules

use crate::core::distance::DistanceMatrix;
use crate::core::outliers::OutlierDetector;
use crate::error::PruneError;
use log::{debug, warn};
use serde::Serialize;

/// Which rule produced the classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationBranch {
    /// Exactly two sequences: their single distance is compared directly
    Pair,
    /// Three or more sequences: delegated to an [`OutlierDetector`]
    Detector,
}

/// Outcome of classifying a distance matrix
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Outlier indices in alignment order
    pub outliers: Vec<usize>,
    /// Representative chosen by the detector, if any
    pub reference: Option<usize>,
    pub branch: ClassificationBranch,
    /// Number flagged before the all-but-one rule was applied
    pub flagged_before_safeguard: usize,
    pub safeguard_triggered: bool,
}

impl Classification {
    pub fn is_empty(&self) -> bool {
        self.outliers.is_empty()
    }

    /// Outlier identifiers in alignment order
    pub fn outlier_ids<'a>(&self, matrix: &'a DistanceMatrix) -> Vec<&'a str> {
        self.outliers.iter().map(|&i| matrix.id(i)).collect()
    }
}

/// Classify sequences of `matrix` as outliers relative to `cutoff`.
///
/// Two sequences are both outliers when their distance is strictly greater
/// than the cutoff. Larger sets go through `detector`. Whenever every
/// sequence but one is flagged, the remaining one is flagged as well.
pub fn classify(
    matrix: &DistanceMatrix,
    cutoff: f64,
    detector: &dyn OutlierDetector,
) -> Result<Classification, PruneError> {
    if !cutoff.is_finite() || cutoff < 0.0 {
        return Err(PruneError::Argument(format!(
            "cutoff must be a finite non-negative number, got {}",
            cutoff
        )));
    }

    let n = matrix.len();
    if n < 2 {
        return Err(PruneError::Computation(format!(
            "at least 2 sequences are required for outlier detection, found {}",
            n
        )));
    }

    let (mut outliers, reference, branch) = if n == 2 {
        let distance = matrix.get(0, 1);
        debug!(
            "Two sequences: d({}, {}) = {} vs cutoff {}",
            matrix.id(0),
            matrix.id(1),
            distance,
            cutoff
        );
        let outliers = if distance > cutoff { vec![0, 1] } else { Vec::new() };
        (outliers, None, ClassificationBranch::Pair)
    } else {
        let detection = detector.detect(matrix, cutoff);
        if let Some(&bad) = detection.flagged.iter().find(|&&i| i >= n) {
            return Err(PruneError::Computation(format!(
                "detector '{}' flagged index {} outside a {}-sequence matrix",
                detector.name(),
                bad,
                n
            )));
        }
        if let Some(reference) = detection.reference {
            if reference >= n {
                return Err(PruneError::Computation(format!(
                    "detector '{}' chose reference {} outside a {}-sequence matrix",
                    detector.name(),
                    reference,
                    n
                )));
            }
            debug!("Reference sequence: {}", matrix.id(reference));
        }
        (detection.flagged, detection.reference, ClassificationBranch::Detector)
    };

    outliers.sort_unstable();
    outliers.dedup();
    let flagged_before_safeguard = outliers.len();

    let safeguard_triggered = flagged_before_safeguard == n - 1;
    if safeguard_triggered {
        warn!(
            "⚠️  {} of {} sequences flagged; flagging the remaining sequence as well",
            flagged_before_safeguard, n
        );
        outliers = (0..n).collect();
    }

    Ok(Classification {
        outliers,
        reference,
        branch,
        flagged_before_safeguard,
        safeguard_triggered,
    })
}
