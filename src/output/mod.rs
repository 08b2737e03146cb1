// mod.rs - Output writers module

pub mod report;

use crate::core::DistanceMatrix;
use crate::error::PruneError;
use log::info;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub use report::{write_report, PruneReport};

/// Distance matrix format used when none is requested
pub const DEFAULT_FORMAT: &str = "tsv";

fn write_error(file_path: &str, e: std::io::Error) -> PruneError {
    PruneError::Io(format!("Write error on '{}': {}", file_path, e))
}

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &str) -> Result<(), PruneError> {
    if let Some(parent) = Path::new(file_path).parent() {
        if parent.as_os_str().is_empty() {
            return Ok(());
        }
        create_dir_all(parent).map_err(|e| {
            PruneError::Io(format!(
                "Failed to create parent directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }
    Ok(())
}

fn create_writer(file_path: &str) -> Result<BufWriter<File>, PruneError> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path).map_err(|e| {
        PruneError::Io(format!(
            "Failed to create output file '{}': {}",
            file_path, e
        ))
    })?;
    Ok(BufWriter::new(file))
}

/// Write identifiers to prune, one per line. An empty list still creates
/// an (empty) file.
pub fn write_prune_list<S: AsRef<str>>(file_path: &str, ids: &[S]) -> Result<(), PruneError> {
    let mut writer = create_writer(file_path)?;
    for id in ids {
        writeln!(writer, "{}", id.as_ref()).map_err(|e| write_error(file_path, e))?;
    }
    writer.flush().map_err(|e| write_error(file_path, e))?;
    info!("✅ {} identifier(s) to prune written to: {}", ids.len(), file_path);
    Ok(())
}

fn format_distance(d: f64) -> String {
    if d.is_infinite() {
        "inf".to_string()
    } else {
        format!("{:.6}", d)
    }
}

/// Write distance matrix in TSV format
pub fn write_tsv(
    file_path: &str,
    matrix: &DistanceMatrix,
    command_line: &str,
) -> Result<(), PruneError> {
    let mut writer = create_writer(file_path)?;
    let err = |e| write_error(file_path, e);

    writeln!(writer, "# Command: {}", command_line).map_err(err)?;
    writeln!(writer, "# distprune v{}", crate::VERSION).map_err(err)?;

    write!(writer, "Sequence").map_err(err)?;
    for id in matrix.ids() {
        write!(writer, "\t{}", id).map_err(err)?;
    }
    writeln!(writer).map_err(err)?;

    for i in 0..matrix.len() {
        write!(writer, "{}", matrix.id(i)).map_err(err)?;
        for &d in matrix.row(i) {
            write!(writer, "\t{}", format_distance(d)).map_err(err)?;
        }
        writeln!(writer).map_err(err)?;
    }

    writer.flush().map_err(err)?;
    info!("✅ Distance matrix written to: {}", file_path);
    Ok(())
}

/// Write distance matrix in square PHYLIP format
pub fn write_phylip(file_path: &str, matrix: &DistanceMatrix) -> Result<(), PruneError> {
    let mut writer = create_writer(file_path)?;
    let err = |e| write_error(file_path, e);

    writeln!(writer, "    {}", matrix.len()).map_err(err)?;
    for i in 0..matrix.len() {
        write!(writer, "{:<10}", matrix.id(i)).map_err(err)?;
        for &d in matrix.row(i) {
            write!(writer, "  {}", format_distance(d)).map_err(err)?;
        }
        writeln!(writer).map_err(err)?;
    }

    writer.flush().map_err(err)?;
    info!("✅ Distance matrix written to: {} (PHYLIP format)", file_path);
    Ok(())
}

/// Write distance matrix in the specified format
pub fn write_matrix(
    file_path: &str,
    format: &str,
    matrix: &DistanceMatrix,
    command_line: &str,
) -> Result<(), PruneError> {
    match format.to_lowercase().as_str() {
        "tsv" => write_tsv(file_path, matrix, command_line),
        "phylip" => write_phylip(file_path, matrix),
        _ => Err(PruneError::Argument(format!(
            "Unsupported matrix format: {}. Use: tsv, phylip",
            format
        ))),
    }
}
