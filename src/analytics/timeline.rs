// file: src/analytics/timeline.rs
// description: month-bucketed series for line and stacked-bar widgets
// reference: chronological chart series construction

use crate::models::Incident;
use serde::Serialize;

const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Derived (year, month) pair a month bucket sorts on. Rows compare on this
/// key directly rather than re-parsing their label strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    /// Key for an incident, absent when no month/year pair is derivable.
    /// Records without a key are excluded from month series, not bucketed
    /// under a sentinel.
    pub fn of(incident: &Incident) -> Option<Self> {
        match (incident.year, incident.month) {
            (Some(year), Some(month)) => Some(Self { year, month }),
            _ => None,
        }
    }

    /// Display label, e.g. `"Mar 2023"`. An out-of-range month renders as
    /// `"Month <m> <year>"`.
    pub fn label(&self) -> String {
        match MONTH_ABBREV.get((self.month as usize).wrapping_sub(1)) {
            Some(name) => format!("{} {}", name, self.year),
            None => format!("Month {} {}", self.month, self.year),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthCount {
    pub month: String,
    pub count: u64,
}

/// Incident counts per month, sorted chronologically.
pub fn count_by_month(data: &[Incident]) -> Vec<MonthCount> {
    let mut buckets: Vec<(MonthKey, u64)> = Vec::new();

    for incident in data {
        let Some(key) = MonthKey::of(incident) else {
            continue;
        };
        match buckets.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, count)) => *count += 1,
            None => buckets.push((key, 1)),
        }
    }

    buckets.sort_by_key(|(key, _)| *key);
    buckets
        .into_iter()
        .map(|(key, count)| MonthCount {
            month: key.label(),
            count,
        })
        .collect()
}

/// One stacked-bar row: a month label plus per-severity-label sub-counts.
/// Labels outside the known set accumulate under `Unknown`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeverityMonthRow {
    pub name: String,
    #[serde(rename = "None")]
    pub none: u64,
    #[serde(rename = "Low")]
    pub low: u64,
    #[serde(rename = "Medium")]
    pub medium: u64,
    #[serde(rename = "High")]
    pub high: u64,
    #[serde(rename = "Critical")]
    pub critical: u64,
    #[serde(rename = "Unknown")]
    pub unknown: u64,
}

impl SeverityMonthRow {
    fn new(name: String) -> Self {
        Self {
            name,
            none: 0,
            low: 0,
            medium: 0,
            high: 0,
            critical: 0,
            unknown: 0,
        }
    }

    fn record(&mut self, label: &str) {
        match label {
            "None" => self.none += 1,
            "Low" => self.low += 1,
            "Medium" => self.medium += 1,
            "High" => self.high += 1,
            "Critical" => self.critical += 1,
            _ => self.unknown += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.none + self.low + self.medium + self.high + self.critical + self.unknown
    }

    /// Counter for a display label; unrecognized labels read as zero.
    pub fn count_for(&self, label: &str) -> u64 {
        match label {
            "None" => self.none,
            "Low" => self.low,
            "Medium" => self.medium,
            "High" => self.high,
            "Critical" => self.critical,
            "Unknown" => self.unknown,
            _ => 0,
        }
    }
}

/// Severity distribution per month for the stacked bar widget, sorted
/// chronologically like `count_by_month`.
pub fn severity_by_month(data: &[Incident]) -> Vec<SeverityMonthRow> {
    let mut rows: Vec<(MonthKey, SeverityMonthRow)> = Vec::new();

    for incident in data {
        let Some(key) = MonthKey::of(incident) else {
            continue;
        };
        let position = match rows.iter().position(|(existing, _)| *existing == key) {
            Some(position) => position,
            None => {
                rows.push((key, SeverityMonthRow::new(key.label())));
                rows.len() - 1
            }
        };
        rows[position].1.record(&incident.severity_label);
    }

    rows.sort_by_key(|(key, _)| *key);
    rows.into_iter().map(|(_, row)| row).collect()
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
    fn test_count_by_month_is_chronological() {
        let data = incidents(json!([
            {"incident_date": "2023-03-10"},
            {"incident_date": "2023-01-05"},
            {"incident_date": "2024-02-20"},
            {"incident_date": "2023-01-22"}
        ]));

        let series = count_by_month(&data);
        let labels: Vec<&str> = series.iter().map(|row| row.month.as_str()).collect();
        assert_eq!(labels, vec!["Jan 2023", "Mar 2023", "Feb 2024"]);
        assert_eq!(series[0].count, 2);
    }

    #[test]
    fn test_records_without_month_are_excluded() {
        let data = incidents(json!([
            {"incident_date": "2023-01-05"},
            {"incident_date": "not a date"},
            {}
        ]));

        let series = count_by_month(&data);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].count, 1);
    }

    #[test]
    fn test_explicit_fields_feed_labels() {
        let data = incidents(json!([
            {"year": 2023, "month": 7},
            {"year": 2023, "month": 13}
        ]));

        let series = count_by_month(&data);
        let labels: Vec<&str> = series.iter().map(|row| row.month.as_str()).collect();
        assert_eq!(labels, vec!["Jul 2023", "Month 13 2023"]);
    }

    #[test]
    fn test_severity_by_month_counters() {
        let data = incidents(json!([
            {"incident_date": "2023-01-05", "severity_level": 3},
            {"incident_date": "2023-01-12", "severity_level": 3},
            {"incident_date": "2023-01-20", "severity_level": 0},
            {"incident_date": "2023-02-01", "severity_level": 99},
            {"incident_date": "2023-02-03"}
        ]));

        let rows = severity_by_month(&data);
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].name, "Jan 2023");
        assert_eq!(rows[0].high, 2);
        assert_eq!(rows[0].none, 1);
        assert_eq!(rows[0].total(), 3);

        // "99" is not a known label, so it folds into Unknown.
        assert_eq!(rows[1].name, "Feb 2023");
        assert_eq!(rows[1].unknown, 2);
    }

    #[test]
    fn test_severity_rows_serialize_with_display_names() {
        let data = incidents(json!([
            {"incident_date": "2023-01-05", "severity_level": 4}
        ]));

        let json = serde_json::to_value(severity_by_month(&data)).unwrap();
        assert_eq!(json[0]["name"], "Jan 2023");
        assert_eq!(json[0]["Critical"], 1);
        assert_eq!(json[0]["None"], 0);
    }
}
