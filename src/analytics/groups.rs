// file: src/analytics/groups.rs
// description: grouping and ranking operations over canonical incidents
// reference: chart aggregate construction

use crate::analytics::buckets::CategoryCounts;
use crate::models::Incident;
use crate::models::severity::UNKNOWN;
use serde::Serialize;

/// Counts occurrences of each value of a categorical field, keys in
/// first-seen order.
///
/// The null/empty substitution is applied again here defensively: an empty
/// value or an unrecognized field name buckets records under the sentinel.
/// An empty field *name* yields an empty bucket.
pub fn group_by_field(data: &[Incident], field: &str) -> CategoryCounts {
    let mut counts = CategoryCounts::new();
    if field.is_empty() {
        return counts;
    }

    for incident in data {
        let key = match incident.category(field) {
            Some(value) if !value.is_empty() => value,
            _ => UNKNOWN,
        };
        counts.increment(key);
    }
    counts
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationCount {
    pub location: String,
    pub count: u64,
}

/// Locations ranked descending by incident count, truncated to `limit`.
/// Ties keep first-seen order.
pub fn top_locations(data: &[Incident], limit: usize) -> Vec<LocationCount> {
    group_by_field(data, "location")
        .ranked()
        .into_iter()
        .take(limit)
        .map(|(location, count)| LocationCount { location, count })
        .collect()
}

pub fn behavior_type_data(data: &[Incident]) -> CategoryCounts {
    group_by_field(data, "behavior_type")
}

pub fn job_data(data: &[Incident]) -> CategoryCounts {
    group_by_field(data, "job")
}

/// Incident counts per severity label, feeding the severity pie widget and
/// the KPI block.
pub fn severity_distribution(data: &[Incident]) -> CategoryCounts {
    group_by_field(data, "severity_label")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::IncidentNormalizer;
    use serde_json::json;

    fn incidents(data: serde_json::Value) -> Vec<Incident> {
        IncidentNormalizer::new().normalize(&data)
    }

    #[test]
    fn test_group_by_field_with_sentinel_substitution() {
        let data = incidents(json!([
            {"action_cause": "Slip"},
            {"action_cause": null},
            {"action_cause": "Slip"}
        ]));

        let counts = group_by_field(&data, "action_cause");
        assert_eq!(counts.count("Slip"), 2);
        assert_eq!(counts.count(UNKNOWN), 1);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_unrecognized_field_buckets_everything_unknown() {
        let data = incidents(json!([{"location": "A"}, {"location": "B"}]));
        let counts = group_by_field(&data, "shift_lead");

        assert_eq!(counts.count(UNKNOWN), 2);
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn test_empty_field_name_yields_empty_bucket() {
        let data = incidents(json!([{"location": "A"}]));
        assert!(group_by_field(&data, "").is_empty());
    }

    #[test]
    fn test_top_locations_limit_and_ordering() {
        let data = incidents(json!([
            {"location": "Dock"},
            {"location": "Plant"},
            {"location": "Dock"},
            {"location": "Office"},
            {"location": "Plant"},
            {"location": "Dock"}
        ]));

        let top = top_locations(&data, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].location, "Dock");
        assert_eq!(top[0].count, 3);
        assert_eq!(top[1].location, "Plant");
        assert!(top[0].count >= top[1].count);
    }

    #[test]
    fn test_severity_distribution_totals() {
        let data = incidents(json!([
            {"severity_level": 3},
            {"severity_level": 3},
            {"severity_level": 1},
            {}
        ]));

        let distribution = severity_distribution(&data);
        assert_eq!(distribution.count("High"), 2);
        assert_eq!(distribution.count("Low"), 1);
        assert_eq!(distribution.count(UNKNOWN), 1);
        assert_eq!(distribution.total(), data.len() as u64);
    }

    #[test]
    fn test_specialized_groupings() {
        let data = incidents(json!([
            {"behavior_type": "Rushing", "job": "Maintenance"},
            {"job": "Maintenance"}
        ]));

        assert_eq!(behavior_type_data(&data).count("Rushing"), 1);
        assert_eq!(job_data(&data).count("Maintenance"), 2);
    }
}
