// registry.rs - Registry of available outlier detectors

use super::{MeanDistanceDetector, MedoidDetector, OutlierDetector};
use std::collections::BTreeMap;

/// Name of the detector used when none is requested
pub const DEFAULT_DETECTOR: &str = "medoid";

/// Registry for available outlier detectors
pub struct DetectorRegistry {
    detectors: BTreeMap<String, Box<dyn OutlierDetector>>,
}

impl DetectorRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            detectors: BTreeMap::new(),
        };

        // Register built-in detectors
        registry.register_detector(Box::new(MedoidDetector));
        registry.register_detector(Box::new(MeanDistanceDetector));

        registry
    }

    /// Register a detector under its own name
    pub fn register_detector(&mut self, detector: Box<dyn OutlierDetector>) {
        self.detectors.insert(detector.name().to_string(), detector);
    }

    /// Get a detector by name
    pub fn get_detector(&self, name: &str) -> Option<&dyn OutlierDetector> {
        self.detectors.get(name).map(|d| d.as_ref())
    }

    pub fn has_detector(&self, name: &str) -> bool {
        self.detectors.contains_key(name)
    }

    /// List all available detectors as (name, description)
    pub fn list_detectors(&self) -> Vec<(&str, &str)> {
        self.detectors
            .values()
            .map(|d| (d.name(), d.description()))
            .collect()
    }

    pub fn get_detector_names(&self) -> Vec<&str> {
        self.detectors.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for DetectorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::distance::DistanceMatrix;
    use crate::core::outliers::Detection;

    /// Flags nothing, whatever the cutoff
    #[derive(Debug)]
    struct NeverDetector;

    impl OutlierDetector for NeverDetector {
        fn name(&self) -> &'static str {
            "never"
        }

        fn description(&self) -> &'static str {
            "Never flags anything"
        }

        fn detect(&self, _matrix: &DistanceMatrix, _cutoff: f64) -> Detection {
            Detection::default()
        }
    }

    #[test]
    fn test_builtin_detectors() {
        let registry = DetectorRegistry::new();
        assert!(registry.has_detector(DEFAULT_DETECTOR));
        assert!(registry.has_detector("mean"));
        assert!(!registry.has_detector("nonexistent"));
        assert_eq!(registry.get_detector_names(), vec!["mean", "medoid"]);
        assert_eq!(registry.list_detectors().len(), 2);
        assert_eq!(registry.get_detector("medoid").unwrap().name(), "medoid");
    }

    #[test]
    fn test_register_custom_detector() {
        let mut registry = DetectorRegistry::new();
        registry.register_detector(Box::new(NeverDetector));
        assert!(registry.has_detector("never"));
        assert_eq!(registry.list_detectors().len(), 3);
    }
}
