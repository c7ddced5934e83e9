// file: src/analytics/buckets.rs
// description: insertion-ordered category counting
// reference: aggregate bucket semantics for chart consumers

use serde::Serialize;
use serde::ser::SerializeMap;
use std::collections::HashMap;

/// Counts per category value, with keys kept in first-seen order.
///
/// First-seen ordering is load-bearing: ranked series break count ties by it
/// and the KPI "most common" picks depend on it, so it must track raw input
/// order exactly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryCounts {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl CategoryCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&position) => self.entries[position].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    pub fn count(&self, key: &str) -> u64 {
        self.index
            .get(key)
            .map(|&position| self.entries[position].1)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Keys and counts in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(key, count)| (key.as_str(), *count))
    }

    /// Entries sorted descending by count. The sort is stable, so tied
    /// categories keep their first-seen order.
    pub fn ranked(&self) -> Vec<(String, u64)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// Entry with the maximum count; ties resolve to the earliest-seen key.
    pub fn stable_max(&self) -> Option<(&str, u64)> {
        let mut best: Option<(&str, u64)> = None;
        for (key, count) in self.iter() {
            if best.is_none_or(|(_, best_count)| count > best_count) {
                best = Some((key, count));
            }
        }
        best
    }
}

impl Serialize for CategoryCounts {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}
