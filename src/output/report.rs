// report.rs - JSON run report

use crate::core::{ClassificationBranch, DistanceModel};
use crate::error::PruneError;
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};

/// Summary of one pruning run
#[derive(Debug, Clone, Serialize)]
pub struct PruneReport {
    pub version: String,
    pub generated: String,
    pub alignment: String,
    pub prune_output: String,
    pub cutoff: f64,
    pub model: DistanceModel,
    pub strategy: String,
    pub sequences: usize,
    pub columns: usize,
    pub branch: ClassificationBranch,
    pub reference: Option<String>,
    pub flagged_before_safeguard: usize,
    pub safeguard_triggered: bool,
    pub outliers: Vec<String>,
}

/// Write the report as pretty-printed JSON
pub fn write_report(file_path: &str, report: &PruneReport) -> Result<(), PruneError> {
    super::ensure_parent_dir(file_path)?;
    let file = File::create(file_path).map_err(|e| {
        PruneError::Io(format!("Failed to create report file '{}': {}", file_path, e))
    })?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, report)
        .map_err(|e| PruneError::Io(format!("Failed to serialize report: {}", e)))?;
    writeln!(writer).map_err(|e| super::write_error(file_path, e))?;
    writer.flush().map_err(|e| super::write_error(file_path, e))?;

    info!("📄 Run report written to: {}", file_path);
    Ok(())
}
