// file: src/utils/validation.rs
// description: data validation utilities and helpers
// reference: input validation patterns

use crate::error::{InsightsError, Result};
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_dataset_path(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(InsightsError::Validation(format!(
                "Dataset file does not exist: {}",
                path.display()
            )));
        }

        if !path.is_file() {
            return Err(InsightsError::Validation(format!(
                "Dataset path is not a file: {}",
                path.display()
            )));
        }

        Self::validate_json_extension(path)
    }

    pub fn validate_data_dir(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(InsightsError::Validation(format!(
                "Data directory does not exist: {}",
                path.display()
            )));
        }

        if !path.is_dir() {
            return Err(InsightsError::Validation(format!(
                "Path is not a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    pub fn validate_json_extension(path: &Path) -> Result<()> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(()),
            _ => Err(InsightsError::Validation(format!(
                "File is not a JSON file: {}",
                path.display()
            ))),
        }
    }

    pub fn validate_limit(limit: usize) -> Result<()> {
        if limit == 0 {
            return Err(InsightsError::Validation(
                "Ranking limit must be greater than 0".to_string(),
            ));
        }

        if limit > 1000 {
            return Err(InsightsError::Validation(
                "Ranking limit too large (max 1000)".to_string(),
            ));
        }

        Ok(())
    }

    /// Shortens a chart label to `max_length` characters. Presentation
    /// shaping only; aggregate keys are never truncated.
    pub fn truncate_label(label: &str, max_length: usize) -> String {
        if label.chars().count() <= max_length {
            label.to_string()
        } else {
            let kept: String = label.chars().take(max_length).collect();
            format!("{}...", kept)
        }
    }
}
