// file: src/source/loader.rs
// description: load-once dataset reader with provenance tracking
// reference: static JSON input boundary

use crate::config::SourceConfig;
use crate::error::{InsightsError, Result};
use crate::source::scanner::DatasetScanner;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{info, warn};
use uuid::Uuid;

/// The raw record collection as loaded from disk, with provenance fields.
/// Loaded once per invocation; the pipeline never observes partial data.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<Value>,
    pub sources: Vec<String>,
    pub content_hash: String,
    pub loaded_at: u64,
    pub load_id: Uuid,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub struct DatasetLoader {
    config: SourceConfig,
}

impl DatasetLoader {
    pub fn new(config: SourceConfig) -> Self {
        Self { config }
    }

    /// Loads the full collection: either the explicitly configured dataset
    /// file, or every dataset file discovered under the data directory,
    /// merged in scan order.
    pub fn load(&self) -> Result<Dataset> {
        let mut records = Vec::new();
        let mut sources = Vec::new();
        let mut hasher = Sha256::new();

        if let Some(dataset) = &self.config.dataset {
            let loaded = self.load_file(dataset, &mut hasher)?;
            sources.push(dataset.display().to_string());
            records.extend(loaded);
        } else {
            let scanner = DatasetScanner::new(self.config.clone());
            let scanned = scanner.scan()?;
            if scanned.is_empty() {
                warn!(
                    "No dataset files found under {}",
                    self.config.data_dir.display()
                );
            }
            for file in scanned {
                let loaded = self.load_file(&file.path, &mut hasher)?;
                sources.push(file.relative_path);
                records.extend(loaded);
            }
        }

        let loaded_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_secs();

        let dataset = Dataset {
            records,
            sources,
            content_hash: format!("{:x}", hasher.finalize()),
            loaded_at,
            load_id: Uuid::new_v4(),
        };

        info!(
            "Loaded {} raw records from {} file(s)",
            dataset.len(),
            dataset.sources.len()
        );
        Ok(dataset)
    }

    fn load_file(&self, path: &Path, hasher: &mut Sha256) -> Result<Vec<Value>> {
        let content = fs::read_to_string(path).map_err(|source| InsightsError::FileOperation {
            path: path.to_path_buf(),
            source,
        })?;
        hasher.update(content.as_bytes());

        let value: Value =
            serde_json::from_str(&content).map_err(|e| InsightsError::DatasetParse {
                file: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::unwrap_records(value).ok_or_else(|| InsightsError::DatasetParse {
            file: path.display().to_string(),
            message: "expected a JSON array of incident records".to_string(),
        })
    }

    /// Accepts a top-level array, or an object wrapping the array under an
    /// `incidents` or `records` key.
    fn unwrap_records(value: Value) -> Option<Vec<Value>> {
        match value {
            Value::Array(records) => Some(records),
            Value::Object(mut map) => match map.remove("incidents").or_else(|| map.remove("records"))
            {
                Some(Value::Array(records)) => Some(records),
                _ => None,
            },
            _ => None,
        }
    }
}
