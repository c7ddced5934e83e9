// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod incident;
pub mod raw;
pub mod severity;

pub use incident::Incident;
pub use raw::RawIncident;
pub use severity::{SEVERITY_LABELS, SEVERITY_RANK, UNKNOWN, severity_label, severity_rank};
