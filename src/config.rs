// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{InsightsError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub source: SourceConfig,
    pub pipeline: PipelineConfig,
    pub charts: ChartConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Directory scanned for dataset files.
    pub data_dir: PathBuf,
    /// Optional explicit dataset file; skips directory scanning when set.
    #[serde(default)]
    pub dataset: Option<PathBuf>,
    #[serde(default)]
    pub skip_patterns: Vec<String>,
    pub max_file_size_mb: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    pub top_locations_limit: usize,
}

/// Presentation knobs consumed by the CLI renderer and exporter, kept out of
/// the analytics core.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChartConfig {
    pub label_max_len: usize,
    #[serde(default = "default_severity_display_order")]
    pub severity_display_order: Vec<String>,
}

fn default_severity_display_order() -> Vec<String> {
    ["None", "Low", "Medium", "High", "Critical"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("INCIDENT_INSIGHTS")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| InsightsError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| InsightsError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            source: SourceConfig {
                data_dir: PathBuf::from("./data"),
                dataset: None,
                skip_patterns: vec!["*.tmp".to_string(), ".git/*".to_string()],
                max_file_size_mb: 50,
            },
            pipeline: PipelineConfig {
                top_locations_limit: 10,
            },
            charts: ChartConfig {
                label_max_len: 32,
                severity_display_order: default_severity_display_order(),
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.source.max_file_size_mb == 0 {
            return Err(InsightsError::Config(
                "max_file_size_mb must be greater than 0".to_string(),
            ));
        }

        if self.pipeline.top_locations_limit == 0 {
            return Err(InsightsError::Config(
                "top_locations_limit must be greater than 0".to_string(),
            ));
        }

        if self.charts.label_max_len < 4 {
            return Err(InsightsError::Config(
                "label_max_len must be at least 4".to_string(),
            ));
        }

        Ok(())
    }
}
