// file: src/analytics/kpi.rs
// description: headline statistics over the filtered collection
// reference: KPI card summary semantics

use crate::analytics::groups::{group_by_field, severity_distribution};
use crate::models::Incident;
use crate::models::severity::UNKNOWN;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    pub total_incidents: usize,
    pub highest_severity_count: u64,
    pub highest_severity_level: String,
    pub most_common_action_cause: String,
    pub most_common_location: String,
}

impl Default for KpiSummary {
    fn default() -> Self {
        Self {
            total_incidents: 0,
            highest_severity_count: 0,
            highest_severity_level: UNKNOWN.to_string(),
            most_common_action_cause: UNKNOWN.to_string(),
            most_common_location: UNKNOWN.to_string(),
        }
    }
}

/// Reduces the collection to the KPI card values. Empty input yields the
/// zeroed defaults; all "most common" picks break count ties by first
/// encounter in the source data, never alphabetically.
pub fn calculate_kpis(data: &[Incident]) -> KpiSummary {
    if data.is_empty() {
        return KpiSummary::default();
    }

    let (highest_severity_level, highest_severity_count) = severity_distribution(data)
        .stable_max()
        .map(|(label, count)| (label.to_string(), count))
        .unwrap_or_else(|| (UNKNOWN.to_string(), 0));

    KpiSummary {
        total_incidents: data.len(),
        highest_severity_count,
        highest_severity_level,
        most_common_action_cause: most_common(data, "action_cause"),
        most_common_location: most_common(data, "location"),
    }
}

fn most_common(data: &[Incident], field: &str) -> String {
    group_by_field(data, field)
        .stable_max()
        .map(|(key, _)| key.to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}
