// mod.rs - Input format loaders

pub mod fasta;
