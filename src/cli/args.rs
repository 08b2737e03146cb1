// args.rs - Command line arguments definition

use crate::error::PruneError;
use argh::{EarlyExit, FromArgs};
use std::path::Path;

#[derive(FromArgs, Debug)]
/// distprune - Flag divergent sequences of an alignment by pairwise distance
pub struct Args {
    /// aligned FASTA file
    #[argh(positional)]
    pub alignment: String,

    /// distance cutoff; sequences beyond it are pruned
    #[argh(positional)]
    pub cutoff: String,

    /// output file listing sequence identifiers to prune, one per line
    #[argh(positional)]
    pub prune_output: String,

    /// distance model: raw, jc69, k80 (default: k80)
    #[argh(option)]
    pub model: Option<String>,

    /// outlier detection strategy: medoid, mean (default: medoid)
    #[argh(option)]
    pub strategy: Option<String>,

    /// also write the pairwise distance matrix to this file
    #[argh(option)]
    pub distances: Option<String>,

    /// distance matrix format: tsv, phylip (default: tsv)
    #[argh(option)]
    pub format: Option<String>,

    /// write a JSON run report to this file
    #[argh(option)]
    pub report: Option<String>,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// only log warnings and errors
    #[argh(switch, short = 'q')]
    pub quiet: bool,

    /// print a sample TOML configuration and exit
    #[argh(switch)]
    pub generate_config: bool,

    /// list the available outlier detection strategies and exit
    #[argh(switch)]
    pub list_strategies: bool,
}

/// What the command line asked for
#[derive(Debug)]
pub enum Invocation {
    Run(Args),
    /// `--help` was requested; carries the usage text
    Help(String),
    GenerateConfig,
    ListStrategies,
}

impl Args {
    /// Parse a full argv (program name first). Usage errors become
    /// [`PruneError::Argument`] instead of exiting the process.
    pub fn parse_from(argv: &[String]) -> Result<Invocation, PruneError> {
        let (program, rest) = argv
            .split_first()
            .ok_or_else(|| PruneError::Argument("empty command line".to_string()))?;
        let command = Path::new(program)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(program.as_str());
        let rest: Vec<&str> = rest.iter().map(String::as_str).collect();

        match Args::from_args(&[command], &rest) {
            Ok(args) if args.generate_config => Ok(Invocation::GenerateConfig),
            Ok(args) if args.list_strategies => Ok(Invocation::ListStrategies),
            Ok(args) => Ok(Invocation::Run(args)),
            Err(EarlyExit {
                output,
                status: Ok(()),
            }) => Ok(Invocation::Help(output)),
            Err(EarlyExit {
                output,
                status: Err(()),
            }) => {
                // Utility switches work without the positional arguments
                if rest.contains(&"--generate-config") {
                    Ok(Invocation::GenerateConfig)
                } else if rest.contains(&"--list-strategies") {
                    Ok(Invocation::ListStrategies)
                } else {
                    Err(PruneError::Argument(output.trim_end().to_string()))
                }
            }
        }
    }
}
