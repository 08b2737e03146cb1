// mod.rs - Data structures module

pub mod alignment;
pub mod loaders;

// Re-export main types for convenience
pub use alignment::{encode_base, AlignedSequence, Alignment, MISSING};
