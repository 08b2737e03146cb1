// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};
use crate::error::PruneError;

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Core settings (defaults are applied later, during validation)
        if self.model.is_none() {
            self.model = config.model;
        }
        if self.strategy.is_none() {
            self.strategy = config.strategy;
        }
        if self.format.is_none() {
            self.format = config.format;
        }

        // Extra outputs
        if self.distances.is_none() {
            self.distances = config.distances;
        }
        if self.report.is_none() {
            self.report = config.report;
        }

        // Flags
        if !self.quiet && config.quiet.unwrap_or(false) {
            self.quiet = true;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self, PruneError> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}
