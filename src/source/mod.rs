// file: src/source/mod.rs
// description: dataset input boundary module exports
// reference: internal module structure

pub mod loader;
pub mod scanner;

pub use loader::{Dataset, DatasetLoader};
pub use scanner::{DatasetScanner, ScannedDataset};
