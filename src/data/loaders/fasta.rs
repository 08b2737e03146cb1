// fasta.rs - FASTA loader for aligned sequences

use crate::data::alignment::{AlignedSequence, Alignment};
use crate::error::PruneError;
use bio::io::fasta;
use log::{debug, info};
use std::fs::File;
use std::io::Read;
use std::path::Path;

impl Alignment {
    /// Load an aligned FASTA file
    pub fn from_fasta(file_path: &Path) -> Result<Self, PruneError> {
        info!("🧬 Loading alignment: {}", file_path.display());

        let file = File::open(file_path).map_err(|e| {
            PruneError::Parse(format!(
                "Failed to open alignment '{}': {}",
                file_path.display(),
                e
            ))
        })?;

        let alignment = Self::from_reader(file, &file_path.display().to_string())?;
        info!(
            "✅ Alignment loaded: {} sequences × {} columns",
            alignment.len(),
            alignment.width()
        );
        Ok(alignment)
    }

    /// Parse aligned FASTA records from any reader; `source` names the input in errors
    pub fn from_reader<R: Read>(reader: R, source: &str) -> Result<Self, PruneError> {
        let reader = fasta::Reader::new(reader);
        let mut sequences = Vec::new();

        for (index, record_result) in reader.records().enumerate() {
            let record = record_result.map_err(|e| {
                PruneError::Parse(format!(
                    "Invalid FASTA record {} in {}: {}",
                    index + 1,
                    source,
                    e
                ))
            })?;

            debug!("Read '{}' ({} columns)", record.id(), record.seq().len());
            sequences.push(AlignedSequence::new(record.id(), record.seq()));
        }

        Alignment::new(sequences).map_err(|e| match e {
            PruneError::Parse(msg) => PruneError::Parse(format!("{}: {}", source, msg)),
            other => other,
        })
    }
}
