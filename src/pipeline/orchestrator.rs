// file: src/pipeline/orchestrator.rs
// description: wires loading, normalization, filtering, and aggregation
// reference: dashboard payload assembly

use crate::analytics::{
    CategoryCounts, KpiSummary, LocationCount, MonthCount, SeverityFilter, SeverityMonthRow,
    YearFilter, behavior_type_data, calculate_kpis, count_by_month, filter_by_severity,
    filter_by_year, group_by_field, job_data, severity_by_month, severity_distribution,
    top_locations, unique_severities, unique_years,
};
use crate::config::Config;
use crate::error::Result;
use crate::models::Incident;
use crate::normalizer::IncidentNormalizer;
use crate::pipeline::progress::ProgressTracker;
use crate::source::{Dataset, DatasetLoader};
use serde::Serialize;
use tracing::info;

/// Everything the presentation layer consumes, computed in one pass.
///
/// Facet option lists come from the unfiltered collection so selecting a
/// year never hides the other years from the picker; every aggregate below
/// them reflects the filtered collection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub years: Vec<i32>,
    pub severities: Vec<String>,
    pub filtered_count: usize,
    pub kpis: KpiSummary,
    pub by_action_cause: CategoryCounts,
    pub severity_distribution: CategoryCounts,
    pub monthly: Vec<MonthCount>,
    pub top_locations: Vec<LocationCount>,
    pub by_region: CategoryCounts,
    pub by_behavior_type: CategoryCounts,
    pub by_job: CategoryCounts,
    pub severity_by_month: Vec<SeverityMonthRow>,
}

pub struct DashboardPipeline {
    config: Config,
    normalizer: IncidentNormalizer,
}

impl DashboardPipeline {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            normalizer: IncidentNormalizer::new(),
        }
    }

    pub fn load(&self) -> Result<Dataset> {
        DatasetLoader::new(self.config.source.clone()).load()
    }

    pub fn normalize(&self, dataset: &Dataset) -> Vec<Incident> {
        self.normalizer.normalize_records(&dataset.records)
    }

    /// Normalization with per-record progress reporting for CLI runs.
    pub fn normalize_tracked(&self, dataset: &Dataset, tracker: &ProgressTracker) -> Vec<Incident> {
        dataset
            .records
            .iter()
            .map(|record| {
                let incident = self.normalizer.normalize_record(record);
                tracker.observe(&incident);
                incident
            })
            .collect()
    }

    /// Assembles the full dashboard payload for the given facet selections.
    /// Pure and idempotent; recomputed from scratch on every selection
    /// change.
    pub fn build(
        &self,
        incidents: &[Incident],
        year: &YearFilter,
        severity: &SeverityFilter,
    ) -> DashboardData {
        let years = unique_years(incidents);
        let severities = unique_severities(incidents);

        let filtered = filter_by_severity(&filter_by_year(incidents, year), severity);
        info!(
            "Building dashboard payload over {} of {} records",
            filtered.len(),
            incidents.len()
        );

        DashboardData {
            years,
            severities,
            filtered_count: filtered.len(),
            kpis: calculate_kpis(&filtered),
            by_action_cause: group_by_field(&filtered, "action_cause"),
            severity_distribution: severity_distribution(&filtered),
            monthly: count_by_month(&filtered),
            top_locations: top_locations(&filtered, self.config.pipeline.top_locations_limit),
            by_region: group_by_field(&filtered, "region"),
            by_behavior_type: behavior_type_data(&filtered),
            by_job: job_data(&filtered),
            severity_by_month: severity_by_month(&filtered),
        }
    }

    /// Load + normalize + build in one call.
    pub fn run(&self, year: &YearFilter, severity: &SeverityFilter) -> Result<DashboardData> {
        let dataset = self.load()?;
        let incidents = self.normalize(&dataset);
        Ok(self.build(&incidents, year, severity))
    }
}
