// distance.rs - Pairwise distance matrix with pairwise deletion

use crate::data::{Alignment, MISSING};
use crate::error::PruneError;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, log_enabled, warn, Level};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

/// Substitution model used to turn site counts into a distance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceModel {
    /// Proportion of differing sites
    Raw,
    /// Jukes-Cantor 1969 correction
    Jc69,
    /// Kimura 1980 two-parameter correction
    #[default]
    K80,
}

impl FromStr for DistanceModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "raw" | "p" | "p-distance" => Ok(DistanceModel::Raw),
            "jc69" | "jc" => Ok(DistanceModel::Jc69),
            "k80" | "k2p" => Ok(DistanceModel::K80),
            _ => Err(format!("Invalid distance model: {}. Use: raw, jc69, k80", s)),
        }
    }
}

impl fmt::Display for DistanceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DistanceModel::Raw => "raw",
            DistanceModel::Jc69 => "jc69",
            DistanceModel::K80 => "k80",
        };
        write!(f, "{}", name)
    }
}

impl DistanceModel {
    pub fn description(&self) -> &str {
        match self {
            DistanceModel::Raw => "uncorrected p-distance",
            DistanceModel::Jc69 => "Jukes-Cantor (JC69)",
            DistanceModel::K80 => "Kimura two-parameter (K80)",
        }
    }

    /// Distance for one pair of sequences; `None` when no site was comparable.
    /// Saturated corrections return `f64::INFINITY`.
    pub fn distance(&self, counts: &SiteCounts) -> Option<f64> {
        if counts.compared == 0 {
            return None;
        }
        let length = counts.compared as f64;
        let p_ts = counts.transitions as f64 / length;
        let q_tv = counts.transversions as f64 / length;
        let p = p_ts + q_tv;

        let d = match self {
            DistanceModel::Raw => p,
            DistanceModel::Jc69 => {
                let arg = 1.0 - 4.0 * p / 3.0;
                if arg <= 0.0 {
                    f64::INFINITY
                } else {
                    -0.75 * arg.ln()
                }
            }
            DistanceModel::K80 => {
                let a = 1.0 - 2.0 * p_ts - q_tv;
                let b = 1.0 - 2.0 * q_tv;
                if a <= 0.0 || b <= 0.0 {
                    f64::INFINITY
                } else {
                    -0.5 * a.ln() - 0.25 * b.ln()
                }
            }
        };

        // -0.0 from ln(1.0) on identical sequences
        Some(if d == 0.0 { 0.0 } else { d })
    }
}

/// Site tallies for one pair after pairwise deletion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SiteCounts {
    pub compared: usize,
    pub transitions: usize,
    pub transversions: usize,
}

impl SiteCounts {
    pub fn differences(&self) -> usize {
        self.transitions + self.transversions
    }
}

/// Count comparable sites between two encoded sequences.
/// A column is skipped when either side is [`MISSING`].
pub fn count_sites(seq1: &[u8], seq2: &[u8]) -> SiteCounts {
    let mut counts = SiteCounts::default();
    for (&a, &b) in seq1.iter().zip(seq2) {
        if a == MISSING || b == MISSING {
            continue;
        }
        counts.compared += 1;
        if a != b {
            // codes 0,1 are purines and 2,3 pyrimidines
            if (a < 2) == (b < 2) {
                counts.transitions += 1;
            } else {
                counts.transversions += 1;
            }
        }
    }
    counts
}

/// Progress bar over pair comparisons, hidden unless info logging is on
fn progress_bar(len: u64) -> ProgressBar {
    if !log_enabled!(Level::Info) {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb
}

/// Square, symmetric, zero-diagonal distance matrix in alignment order
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    ids: Vec<String>,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Compute all pairwise distances of an alignment. A pair without any
    /// comparable site is infinitely distant.
    pub fn from_alignment(
        alignment: &Alignment,
        model: DistanceModel,
    ) -> Result<Self, PruneError> {
        let n = alignment.len();
        let ids = alignment.ids();
        let encoded: Vec<Vec<u8>> = alignment.sequences().iter().map(|s| s.encoded()).collect();
        let mut values = vec![0.0; n * n];

        let start = Instant::now();
        let total_comparisons = n * n.saturating_sub(1) / 2;
        info!(
            "🔄 Computing distance matrix ({} sequences, {} comparisons, model: {})...",
            n,
            total_comparisons,
            model.description()
        );

        let pb = progress_bar(total_comparisons as u64);

        let mut saturated = 0usize;
        for i in 0..n {
            for j in (i + 1)..n {
                let counts = count_sites(&encoded[i], &encoded[j]);
                let d = match model.distance(&counts) {
                    Some(d) => {
                        if d.is_infinite() {
                            saturated += 1;
                        }
                        d
                    }
                    None => {
                        warn!(
                            "⚠️  Sequences '{}' and '{}' share no comparable sites; distance set to infinity",
                            ids[i], ids[j]
                        );
                        f64::INFINITY
                    }
                };
                values[i * n + j] = d;
                values[j * n + i] = d;
                pb.inc(1);
            }
        }
        pb.finish_and_clear();

        if saturated > 0 {
            warn!(
                "⚠️  {} pair(s) are saturated under {} and were given an infinite distance",
                saturated, model
            );
        }
        info!(
            "✅ Distance matrix computed in {:.2}s",
            start.elapsed().as_secs_f64()
        );

        Ok(Self { ids, values })
    }

    /// Build a matrix from explicit rows, validating shape and invariants
    pub fn from_rows(ids: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self, PruneError> {
        let n = ids.len();
        if n == 0 {
            return Err(PruneError::Computation("distance matrix is empty".to_string()));
        }
        if rows.len() != n {
            return Err(PruneError::Computation(format!(
                "distance matrix has {} rows for {} identifiers",
                rows.len(),
                n
            )));
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(PruneError::Computation(format!(
                    "row {} ('{}') has {} columns, expected {}",
                    i + 1,
                    ids[i],
                    row.len(),
                    n
                )));
            }
        }

        for i in 0..n {
            if rows[i][i] != 0.0 {
                return Err(PruneError::Computation(format!(
                    "non-zero self distance for '{}'",
                    ids[i]
                )));
            }
            for j in 0..n {
                let d = rows[i][j];
                if d.is_nan() || d < 0.0 {
                    return Err(PruneError::Computation(format!(
                        "invalid distance {} between '{}' and '{}'",
                        d, ids[i], ids[j]
                    )));
                }
                if d != rows[j][i] {
                    return Err(PruneError::Computation(format!(
                        "distance matrix is not symmetric at '{}'/'{}'",
                        ids[i], ids[j]
                    )));
                }
            }
        }

        let values = rows.into_iter().flatten().collect();
        Ok(Self { ids, values })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn id(&self, index: usize) -> &str {
        &self.ids[index]
    }

    /// Distance between sequences `i` and `j`
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.len() + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        let n = self.len();
        &self.values[i * n..(i + 1) * n]
    }

    /// Total distance from `i` to every sequence
    pub fn row_sum(&self, i: usize) -> f64 {
        self.row(i).iter().sum()
    }

    /// Mean distance from `i` to every other sequence
    pub fn mean_distance(&self, i: usize) -> f64 {
        let others = self.len().saturating_sub(1);
        if others == 0 {
            return 0.0;
        }
        self.row_sum(i) / others as f64
    }
}
