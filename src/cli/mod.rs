// mod.rs - CLI module

pub mod args;
pub mod config;
pub mod merge;
pub mod validation;

// Re-export main types for convenience
pub use args::{Args, Invocation};
pub use config::Config;
pub use validation::{check_output_paths, parse_cutoff, validate_args, ValidationResult};
