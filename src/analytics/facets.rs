// file: src/analytics/facets.rs
// description: facet value derivation and equality filters
// reference: user-selectable filter dimensions

use crate::models::Incident;
use crate::models::severity::severity_rank;
use std::cmp::Ordering;
use std::convert::Infallible;
use std::str::FromStr;

/// Distinct years present in the collection, most recent first.
pub fn unique_years(data: &[Incident]) -> Vec<i32> {
    let mut years: Vec<i32> = Vec::new();
    for incident in data {
        if let Some(year) = incident.year
            && !years.contains(&year)
        {
            years.push(year);
        }
    }
    years.sort_unstable_by(|a, b| b.cmp(a));
    years
}

/// Distinct severity labels, ordered by the fixed rank table. Labels outside
/// the table sort after all known labels, lexicographic among themselves.
pub fn unique_severities(data: &[Incident]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for incident in data {
        if !labels.contains(&incident.severity_label) {
            labels.push(incident.severity_label.clone());
        }
    }

    labels.sort_by(|a, b| match (severity_rank(a), severity_rank(b)) {
        (Some(rank_a), Some(rank_b)) => rank_a.cmp(&rank_b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    });
    labels
}

/// Year facet selection. Non-coercible input degrades to the no-op `All`
/// rather than erroring or dropping every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearFilter {
    #[default]
    All,
    Year(i32),
}

impl YearFilter {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Self::All;
        }
        match trimmed.parse() {
            Ok(year) => Self::Year(year),
            Err(_) => Self::All,
        }
    }

    pub fn matches(&self, incident: &Incident) -> bool {
        match self {
            Self::All => true,
            Self::Year(year) => incident.year == Some(*year),
        }
    }
}

impl FromStr for YearFilter {
    type Err = Infallible;

    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(input))
    }
}

/// Severity facet selection; exact match on the severity label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SeverityFilter {
    #[default]
    All,
    Label(String),
}

impl SeverityFilter {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Self::All;
        }
        Self::Label(trimmed.to_string())
    }

    pub fn matches(&self, incident: &Incident) -> bool {
        match self {
            Self::All => true,
            Self::Label(label) => incident.severity_label == *label,
        }
    }
}

impl FromStr for SeverityFilter {
    type Err = Infallible;

    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(input))
    }
}

/// Keeps incidents from the selected year. Records with no derivable year
/// are excluded when a concrete year is selected; `All` is the identity.
pub fn filter_by_year(data: &[Incident], filter: &YearFilter) -> Vec<Incident> {
    data.iter()
        .filter(|incident| filter.matches(incident))
        .cloned()
        .collect()
}

/// Keeps incidents whose severity label matches; `All` is the identity.
pub fn filter_by_severity(data: &[Incident], filter: &SeverityFilter) -> Vec<Incident> {
    data.iter()
        .filter(|incident| filter.matches(incident))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::IncidentNormalizer;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn incidents(data: serde_json::Value) -> Vec<Incident> {
        IncidentNormalizer::new().normalize(&data)
    }

    fn sample() -> Vec<Incident> {
        incidents(json!([
            {"incident_date": "2023-03-10", "severity_level": 3},
            {"incident_date": "2022-06-01", "severity_level": 1},
            {"year": 2023, "severity_level": 3},
            {"severity_level": "ZZZ"},
            {"incident_date": "2024-01-15"}
        ]))
    }

    #[test]
    fn test_unique_years_descending() {
        assert_eq!(unique_years(&sample()), vec![2024, 2023, 2022]);
        assert_eq!(unique_years(&[]), Vec::<i32>::new());
    }

    #[test]
    fn test_unique_severities_rank_then_lexicographic() {
        let data = incidents(json!([
            {"severity_level": 3},
            {},
            {"severity_level": 1},
            {"severity_level": "ZZZ"}
        ]));

        assert_eq!(
            unique_severities(&data),
            vec!["Low", "High", "Unknown", "ZZZ"]
        );
    }

    #[test]
    fn test_all_filters_are_identities() {
        let data = sample();
        assert_eq!(filter_by_year(&data, &YearFilter::All), data);
        assert_eq!(filter_by_severity(&data, &SeverityFilter::All), data);
    }

    #[test]
    fn test_year_filter_parse() {
        assert_eq!(YearFilter::parse("All"), YearFilter::All);
        assert_eq!(YearFilter::parse("2023"), YearFilter::Year(2023));
        assert_eq!(YearFilter::parse(" 2023 "), YearFilter::Year(2023));
        // non-coercible input degrades to a no-op
        assert_eq!(YearFilter::parse("soon"), YearFilter::All);
        assert_eq!(YearFilter::parse(""), YearFilter::All);
    }

    #[test]
    fn test_filter_by_year_matches_derived_years() {
        let data = sample();
        let filtered = filter_by_year(&data, &YearFilter::Year(2023));

        // one explicit year field, one derived from the date; the dateless
        // record is excluded
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|i| i.year == Some(2023)));
    }

    #[test]
    fn test_filter_by_severity_exact_label() {
        let data = sample();
        let filtered = filter_by_severity(&data, &SeverityFilter::parse("High"));
        assert_eq!(filtered.len(), 2);

        let missing = filter_by_severity(&data, &SeverityFilter::parse("Medium"));
        assert!(missing.is_empty());
    }

    #[test]
    fn test_filters_commute() {
        let data = sample();
        let year = YearFilter::Year(2023);
        let severity = SeverityFilter::parse("High");

        let year_first = filter_by_severity(&filter_by_year(&data, &year), &severity);
        let severity_first = filter_by_year(&filter_by_severity(&data, &severity), &year);
        assert_eq!(year_first, severity_first);
    }
}
