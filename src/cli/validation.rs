// validation.rs - Input validation utilities

use crate::cli::args::Args;
use crate::core::outliers::DEFAULT_DETECTOR;
use crate::core::{DetectorRegistry, DistanceModel};
use crate::error::PruneError;
use crate::output::DEFAULT_FORMAT;
use std::path::Path;
use std::str::FromStr;

pub struct ValidationResult {
    pub cutoff: f64,
    pub model: DistanceModel,
    pub strategy: String,
    pub format: String,
}

/// Parse the cutoff argument as a finite, non-negative number
pub fn parse_cutoff(raw: &str) -> Result<f64, PruneError> {
    let cutoff: f64 = raw
        .trim()
        .parse()
        .map_err(|_| PruneError::Argument(format!("cutoff '{}' is not a number", raw)))?;

    if !cutoff.is_finite() {
        return Err(PruneError::Argument(format!(
            "cutoff '{}' must be a finite number",
            raw
        )));
    }
    if cutoff < 0.0 {
        return Err(PruneError::Argument(format!(
            "cutoff '{}' must not be negative",
            raw
        )));
    }
    Ok(cutoff)
}

/// Outputs must not overwrite the input alignment or each other
pub fn check_output_paths(input: &str, outputs: &[&str]) -> Result<(), PruneError> {
    let input = Path::new(input);
    for (i, output) in outputs.iter().enumerate() {
        if Path::new(output) == input {
            return Err(PruneError::Argument(format!(
                "output path '{}' is the input alignment",
                output
            )));
        }
        if outputs[..i].iter().any(|other| Path::new(other) == Path::new(output)) {
            return Err(PruneError::Argument(format!(
                "output path '{}' is used for more than one output",
                output
            )));
        }
    }
    Ok(())
}

/// Validate all command line arguments, filling in defaults for unset options
pub fn validate_args(args: &Args) -> Result<ValidationResult, PruneError> {
    let cutoff = parse_cutoff(&args.cutoff)?;

    let model = match &args.model {
        Some(name) => DistanceModel::from_str(name).map_err(PruneError::Argument)?,
        None => DistanceModel::default(),
    };

    let strategy = args.strategy.as_deref().unwrap_or(DEFAULT_DETECTOR);
    let registry = DetectorRegistry::new();
    if !registry.has_detector(strategy) {
        return Err(PruneError::Argument(format!(
            "Invalid strategy '{}'. Available: {}",
            strategy,
            registry.get_detector_names().join(", ")
        )));
    }

    let format = args
        .format
        .as_deref()
        .unwrap_or(DEFAULT_FORMAT)
        .to_lowercase();
    if format != "tsv" && format != "phylip" {
        return Err(PruneError::Argument(format!(
            "Invalid matrix format '{}'. Use: tsv, phylip",
            format
        )));
    }

    if args.prune_output.trim().is_empty() {
        return Err(PruneError::Argument(
            "prune output path must not be empty".to_string(),
        ));
    }

    let outputs: Vec<&str> = std::iter::once(args.prune_output.as_str())
        .chain(args.distances.as_deref())
        .chain(args.report.as_deref())
        .collect();
    check_output_paths(&args.alignment, &outputs)?;

    Ok(ValidationResult {
        cutoff,
        model,
        strategy: strategy.to_string(),
        format,
    })
}
