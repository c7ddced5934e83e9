// file: src/models/incident.rs
// description: canonical incident record, fully defaulted after normalization
// reference: internal data structures

use crate::models::severity::UNKNOWN;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A normalized incident record. Every categorical field is a non-empty
/// string (the `Unknown` sentinel stands in for missing data); only the
/// date-derived fields may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: String,
    /// Parsed calendar date, absent when the raw value was unparseable.
    pub incident_date: Option<NaiveDate>,
    /// Raw date value preserved verbatim for traceability.
    pub incident_timestamp: Option<Value>,
    pub year: Option<i32>,
    /// 1-based month number.
    pub month: Option<u32>,
    /// Raw severity code preserved verbatim.
    pub severity_level: Option<Value>,
    pub severity_label: String,
    pub action_cause: String,
    pub location: String,
    pub region: String,
    pub behavior_type: String,
    pub primary_category: String,
    pub job: String,
    pub gbu: String,
}

impl Incident {
    /// Categorical fields addressable by name in grouping operations.
    pub const CATEGORY_FIELDS: [&'static str; 8] = [
        "id",
        "action_cause",
        "location",
        "region",
        "behavior_type",
        "primary_category",
        "job",
        "gbu",
    ];

    /// Record with every field defaulted to its sentinel. Produced for raw
    /// array elements that are not objects at all.
    pub fn unknown() -> Self {
        Self {
            id: UNKNOWN.to_string(),
            incident_date: None,
            incident_timestamp: None,
            year: None,
            month: None,
            severity_level: None,
            severity_label: UNKNOWN.to_string(),
            action_cause: UNKNOWN.to_string(),
            location: UNKNOWN.to_string(),
            region: UNKNOWN.to_string(),
            behavior_type: UNKNOWN.to_string(),
            primary_category: UNKNOWN.to_string(),
            job: UNKNOWN.to_string(),
            gbu: UNKNOWN.to_string(),
        }
    }

    /// Looks up a categorical field by name. `severity_label` is addressable
    /// here too so severity distributions reuse the grouping path.
    pub fn category(&self, field: &str) -> Option<&str> {
        match field {
            "id" => Some(&self.id),
            "action_cause" => Some(&self.action_cause),
            "location" => Some(&self.location),
            "region" => Some(&self.region),
            "behavior_type" => Some(&self.behavior_type),
            "primary_category" => Some(&self.primary_category),
            "job" => Some(&self.job),
            "gbu" => Some(&self.gbu),
            "severity_label" => Some(&self.severity_label),
            _ => None,
        }
    }

    /// Number of categorical fields that carry the sentinel.
    pub fn sentinel_fields(&self) -> usize {
        Self::CATEGORY_FIELDS
            .into_iter()
            .filter(|&field| self.category(field) == Some(UNKNOWN))
            .count()
    }
}

impl Default for Incident {
    fn default() -> Self {
        Self::unknown()
    }
}
