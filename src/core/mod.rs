// mod.rs - Core logic module

pub mod classify;
pub mod distance;
pub mod outliers;

// Re-export main types for convenience
pub use classify::{classify, Classification, ClassificationBranch};
pub use distance::{count_sites, DistanceMatrix, DistanceModel, SiteCounts};
pub use outliers::{
    find_medoid, Detection, DetectorRegistry, MeanDistanceDetector, MedoidDetector,
    OutlierDetector,
};
