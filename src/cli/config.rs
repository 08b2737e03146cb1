// config.rs - Configuration file support

use crate::error::PruneError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Optional settings read from a TOML file. The three positional
/// arguments are always taken from the command line.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    // Distance and detection
    pub model: Option<String>,
    pub strategy: Option<String>,

    // Extra outputs
    pub distances: Option<String>,
    pub format: Option<String>,
    pub report: Option<String>,

    // Flags
    pub quiet: Option<bool>,
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PruneError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            PruneError::Argument(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml(&content).map_err(|e| {
            PruneError::Argument(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e.message()
            ))
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, PruneError> {
        toml::from_str(content).map_err(|e| PruneError::Argument(e.to_string()))
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# distprune.toml - Configuration file for distprune
# Command line options override these settings

# Distance model: raw, jc69, k80
model = "k80"

# Outlier detection strategy: medoid, mean
strategy = "medoid"

# Write the full distance matrix as well
# distances = "distances.tsv"

# Distance matrix format: tsv, phylip
format = "tsv"

# JSON run report
# report = "run.json"

# Only log warnings and errors
quiet = false
"#
        .to_string()
    }
}
