// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod analytics;
pub mod config;
pub mod error;
pub mod exporter;
pub mod models;
pub mod normalizer;
pub mod pipeline;
pub mod source;
pub mod utils;

pub use analytics::{
    CategoryCounts, KpiSummary, LocationCount, MonthCount, MonthKey, SeverityFilter,
    SeverityMonthRow, YearFilter, behavior_type_data, calculate_kpis, count_by_month,
    filter_by_severity, filter_by_year, group_by_field, job_data, severity_by_month,
    severity_distribution, top_locations, unique_severities, unique_years,
};
pub use config::{ChartConfig, Config, PipelineConfig, SourceConfig};
pub use error::{InsightsError, Result};
pub use exporter::{ExportManifest, JsonExporter};
pub use models::{Incident, RawIncident, severity_label};
pub use normalizer::{IncidentNormalizer, parse_date};
pub use pipeline::{DashboardData, DashboardPipeline, PipelineStats, ProgressTracker};
pub use source::{Dataset, DatasetLoader, DatasetScanner};
pub use utils::{OperationTimer, PerformanceMetrics, Validator};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let _config = Config::default_config();
        let _normalizer = IncidentNormalizer::new();
    }
}
