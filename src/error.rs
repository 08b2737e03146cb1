// error.rs - Error taxonomy for the pruning pipeline

use std::fmt::Display;

/// Errors raised by each stage of the pipeline. The message names the
/// failing input or operation; the variant names the stage.
#[derive(Debug, Clone, PartialEq)]
pub enum PruneError {
    /// Wrong arguments, or a cutoff that is not a usable number
    Argument(String),
    /// Alignment missing, unreadable or malformed
    Parse(String),
    /// Distance matrix or classifier received degenerate input
    Computation(String),
    /// Output could not be created or written
    Io(String),
}

impl PruneError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            PruneError::Argument(_) => 2,
            PruneError::Parse(_) => 3,
            PruneError::Computation(_) => 4,
            PruneError::Io(_) => 5,
        }
    }

    pub fn stage(&self) -> &'static str {
        match self {
            PruneError::Argument(_) => "argument error",
            PruneError::Parse(_) => "parse error",
            PruneError::Computation(_) => "computation error",
            PruneError::Io(_) => "I/O error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            PruneError::Argument(m)
            | PruneError::Parse(m)
            | PruneError::Computation(m)
            | PruneError::Io(m) => m,
        }
    }
}

impl Display for PruneError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}: {}", self.stage(), self.message())
    }
}

impl std::error::Error for PruneError {}
