// file: src/analytics/mod.rs
// description: aggregation module exports
// reference: internal module structure

pub mod buckets;
pub mod facets;
pub mod groups;
pub mod kpi;
pub mod timeline;

pub use buckets::CategoryCounts;
pub use facets::{
    SeverityFilter, YearFilter, filter_by_severity, filter_by_year, unique_severities,
    unique_years,
};
pub use groups::{
    LocationCount, behavior_type_data, group_by_field, job_data, severity_distribution,
    top_locations,
};
pub use kpi::{KpiSummary, calculate_kpis};
pub use timeline::{MonthCount, MonthKey, SeverityMonthRow, count_by_month, severity_by_month};
