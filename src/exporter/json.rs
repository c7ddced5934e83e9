// file: src/exporter/json.rs
// description: json export of the dashboard payload for chart widgets
// reference: static chart-widget data handoff

use crate::error::{InsightsError, Result};
use crate::pipeline::DashboardData;
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct ExportManifest {
    pub export_id: Uuid,
    pub exported_at: String,
    pub record_count: usize,
    pub files: Vec<String>,
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    /// Writes the dashboard payload plus a manifest describing the export.
    pub fn export(&self, data: &DashboardData, pretty: bool) -> Result<ExportManifest> {
        info!("Exporting dashboard payload to {:?}", self.output_dir);

        let dashboard_file = self.write_json("dashboard.json", data, pretty)?;

        let manifest = ExportManifest {
            export_id: Uuid::new_v4(),
            exported_at: Utc::now().to_rfc3339(),
            record_count: data.kpis.total_incidents,
            files: vec![dashboard_file],
        };
        self.write_json("manifest.json", &manifest, pretty)?;

        info!(
            "Export complete: {} records across {} payload file(s)",
            manifest.record_count,
            manifest.files.len()
        );
        Ok(manifest)
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T, pretty: bool) -> Result<String> {
        let path = self.output_dir.join(name);
        let content = if pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };

        fs::write(&path, content).map_err(|source| InsightsError::FileOperation {
            path: path.clone(),
            source,
        })?;
        Ok(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{SeverityFilter, YearFilter};
    use crate::config::Config;
    use crate::normalizer::IncidentNormalizer;
    use crate::pipeline::DashboardPipeline;
    use serde_json::json;
    use tempfile::tempdir;

    fn sample_payload() -> DashboardData {
        let incidents = IncidentNormalizer::new().normalize(&json!([
            {"incident_date": "2023-03-10", "severity_level": 2, "location": "Dock"}
        ]));
        DashboardPipeline::new(Config::default_config()).build(
            &incidents,
            &YearFilter::All,
            &SeverityFilter::All,
        )
    }

    #[test]
    fn test_exporter_creation() {
        let dir = tempdir().unwrap();
        assert!(JsonExporter::new(dir.path()).is_ok());
    }

    #[test]
    fn test_export_writes_payload_and_manifest() {
        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path()).unwrap();

        let manifest = exporter.export(&sample_payload(), true).unwrap();
        assert_eq!(manifest.record_count, 1);
        assert_eq!(manifest.files, vec!["dashboard.json"]);

        let payload = fs::read_to_string(dir.path().join("dashboard.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["kpis"]["totalIncidents"], 1);

        assert!(dir.path().join("manifest.json").exists());
    }
}
