// lib.rs - distprune library root

//! # distprune - Distance-based outlier pruning for multiple sequence alignments
//!
//! Reads an aligned FASTA file, computes pairwise genetic distances with
//! pairwise deletion of gap/missing sites, and reports the sequences that
//! are too divergent to keep.
//!
//! ## Features
//!
//! - **Pairwise deletion**: each pair is compared on the columns where both
//!   sequences carry an unambiguous base
//! - **Substitution models**: raw p-distance, JC69 and K80
//! - **Pluggable detectors**: medoid distance (default) or mean distance,
//!   behind the [`OutlierDetector`] trait
//! - **All-but-one rule**: when every sequence but one is flagged, all are
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use distprune::prelude::*;
//!
//! let alignment = Alignment::from_fasta(std::path::Path::new("aln.fasta"))?;
//! let matrix = DistanceMatrix::from_alignment(&alignment, DistanceModel::K80)?;
//! let classification = classify(&matrix, 0.1, &MedoidDetector)?;
//! write_prune_list("prune.txt", &classification.outlier_ids(&matrix))?;
//! # Ok::<(), distprune::PruneError>(())
//! ```

pub mod cli;
pub mod core;
pub mod data;
pub mod error;
pub mod output;
pub mod pipeline;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, ValidationResult};
    pub use crate::core::{classify, Classification, DistanceMatrix, DistanceModel};
    pub use crate::core::{DetectorRegistry, MeanDistanceDetector, MedoidDetector, OutlierDetector};
    pub use crate::data::{AlignedSequence, Alignment};
    pub use crate::error::PruneError;
    pub use crate::output::{write_matrix, write_prune_list};
    pub use crate::pipeline::{run, PruneOutcome, PruneRequest};
}

// Re-export main types at the root level for convenience
pub use crate::core::{DistanceMatrix, DistanceModel, OutlierDetector};
pub use crate::data::Alignment;
pub use crate::error::PruneError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
