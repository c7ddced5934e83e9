// file: src/normalizer/record.rs
// description: converts raw incident records into canonical form
// reference: field-level degradation with sentinel substitution

use crate::models::severity::{UNKNOWN, severity_label};
use crate::models::{Incident, RawIncident};
use crate::normalizer::dates::parse_date;
use chrono::Datelike;
use serde_json::Value;

pub struct IncidentNormalizer;

impl IncidentNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalizes a whole collection. Non-array input yields an empty
    /// vector; array elements map one-to-one, preserving count and order.
    pub fn normalize(&self, data: &Value) -> Vec<Incident> {
        match data.as_array() {
            Some(records) => self.normalize_records(records),
            None => Vec::new(),
        }
    }

    pub fn normalize_records(&self, records: &[Value]) -> Vec<Incident> {
        records
            .iter()
            .map(|record| self.normalize_record(record))
            .collect()
    }

    /// Normalizes a single record. Malformed fields degrade to sentinels;
    /// a non-object element degrades to the all-sentinel record.
    pub fn normalize_record(&self, value: &Value) -> Incident {
        let raw = RawIncident::new(value);
        if !raw.is_record() {
            return Incident::unknown();
        }

        let incident_date = raw.field("incident_date").and_then(parse_date);
        let year = raw
            .integer("year")
            .filter(|year| *year != 0)
            .and_then(|year| i32::try_from(year).ok())
            .or_else(|| incident_date.map(|date| date.year()));
        let month = raw
            .integer("month")
            .filter(|month| *month != 0)
            .and_then(|month| u32::try_from(month).ok())
            .or_else(|| incident_date.map(|date| date.month()));

        let severity_level = raw.field("severity_level").cloned();

        Incident {
            id: self.categorical(raw.text_any(&["id", "incident_number"])),
            incident_date,
            incident_timestamp: raw.field("incident_date").cloned(),
            year,
            month,
            severity_label: severity_label(severity_level.as_ref()),
            severity_level,
            action_cause: self.categorical(raw.text("action_cause")),
            location: self.categorical(raw.text("location")),
            region: self.categorical(raw.text("region")),
            behavior_type: self
                .categorical(raw.text_any(&["behavior_type", "unsafe_condition_or_behavior"])),
            primary_category: self.categorical(raw.text("primary_category")),
            job: self.categorical(raw.text("job")),
            gbu: self.categorical(raw.text("gbu")),
        }
    }

    fn categorical(&self, value: Option<String>) -> String {
        value.unwrap_or_else(|| UNKNOWN.to_string())
    }
}

impl Default for IncidentNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
