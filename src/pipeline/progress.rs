// file: src/pipeline/progress.rs
// description: progress tracking and normalization statistics
// reference: uses indicatif for progress bars and tracks degradation counters

use crate::models::Incident;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Counters describing how much of the raw data degraded to sentinels
/// during normalization.
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    pub records_processed: usize,
    pub records_without_date: usize,
    pub fields_defaulted: u64,
    pub duration_secs: u64,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_incidents(incidents: &[Incident], duration: Duration) -> Self {
        Self {
            records_processed: incidents.len(),
            records_without_date: incidents
                .iter()
                .filter(|incident| incident.incident_date.is_none())
                .count(),
            fields_defaulted: incidents
                .iter()
                .map(|incident| incident.sentinel_fields() as u64)
                .sum(),
            duration_secs: duration.as_secs(),
        }
    }

    pub fn records_per_second(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        self.records_processed as f64 / self.duration_secs as f64
    }

    /// Share of records carrying a parseable calendar date, as a percentage.
    pub fn date_coverage(&self) -> f64 {
        if self.records_processed == 0 {
            return 0.0;
        }
        let dated = self.records_processed - self.records_without_date;
        (dated as f64 / self.records_processed as f64) * 100.0
    }

    pub fn avg_defaulted_fields(&self) -> f64 {
        if self.records_processed == 0 {
            return 0.0;
        }
        self.fields_defaulted as f64 / self.records_processed as f64
    }
}

pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    records_processed: Arc<AtomicUsize>,
    records_without_date: Arc<AtomicUsize>,
    fields_defaulted: Arc<AtomicU64>,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total_records: usize) -> Self {
        Self::with_color(total_records, true)
    }

    pub fn with_color(total_records: usize, colored: bool) -> Self {
        let multi_progress = MultiProgress::new();

        let main_bar = create_progress_bar(&multi_progress, total_records as u64, colored);
        let detail_bar = create_detail_bar(&multi_progress);

        Self {
            main_bar,
            detail_bar,
            records_processed: Arc::new(AtomicUsize::new(0)),
            records_without_date: Arc::new(AtomicUsize::new(0)),
            fields_defaulted: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    /// Records one normalized incident and its degradation counters.
    pub fn observe(&self, incident: &Incident) {
        self.records_processed.fetch_add(1, Ordering::SeqCst);
        if incident.incident_date.is_none() {
            self.records_without_date.fetch_add(1, Ordering::SeqCst);
        }
        self.fields_defaulted
            .fetch_add(incident.sentinel_fields() as u64, Ordering::SeqCst);

        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn finish(&self) {
        self.main_bar.finish_with_message("Normalization complete");
        self.detail_bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> PipelineStats {
        PipelineStats {
            records_processed: self.records_processed.load(Ordering::SeqCst),
            records_without_date: self.records_without_date.load(Ordering::SeqCst),
            fields_defaulted: self.fields_defaulted.load(Ordering::SeqCst),
            duration_secs: self.start_time.elapsed().as_secs(),
        }
    }

    fn update_detail_bar(&self) {
        let undated = self.records_without_date.load(Ordering::SeqCst);
        let defaulted = self.fields_defaulted.load(Ordering::SeqCst);

        let message = format!("Undated: {} | Defaulted fields: {}", undated, defaulted);
        self.detail_bar.set_message(message);
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64, colored: bool) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    if colored {
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
                )
                .expect("Failed to create progress bar template")
                .progress_chars("█▓▒░"),
        );
    } else {
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({eta}) {msg}")
                .expect("Failed to create progress bar template")
                .progress_chars("=>-"),
        );
    }
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    let style = ProgressStyle::default_bar()
        .template("{msg}")
        .expect("Failed to create detail bar template");
    bar.set_style(style);
    bar
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
    fn test_stats_from_incidents() {
        let data = incidents(json!([
            {"incident_date": "2023-01-05", "location": "Dock"},
            {"incident_date": "bad date"}
        ]));

        let stats = PipelineStats::from_incidents(&data, Duration::from_secs(2));
        assert_eq!(stats.records_processed, 2);
        assert_eq!(stats.records_without_date, 1);
        assert_eq!(stats.date_coverage(), 50.0);
        assert_eq!(stats.records_per_second(), 1.0);
    }

    #[test]
    fn test_stats_zero_duration_and_empty_input() {
        let stats = PipelineStats::new();
        assert_eq!(stats.records_per_second(), 0.0);
        assert_eq!(stats.date_coverage(), 0.0);
        assert_eq!(stats.avg_defaulted_fields(), 0.0);
    }

    #[test]
    fn test_tracker_observation() {
        let data = incidents(json!([
            {"incident_date": "2023-01-05"},
            {}
        ]));

        let tracker = ProgressTracker::with_color(data.len(), false);
        for incident in &data {
            tracker.observe(incident);
        }

        let stats = tracker.get_stats();
        assert_eq!(stats.records_processed, 2);
        assert_eq!(stats.records_without_date, 1);
        assert!(stats.fields_defaulted > 0);
    }
}
