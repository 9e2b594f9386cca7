use std::collections::HashSet;

use serde::Serialize;
use tracing::info;

use super::{ordered_counts, LabeledRecord};

/// Configuration for the minimum-count filter
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// Characters with fewer records than this are removed
    pub min_count: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self { min_count: 3 }
    }
}

/// Records split by the filter, plus a summary
#[derive(Debug, Clone)]
pub struct FilterOutcome<T> {
    pub kept: Vec<T>,
    pub removed: Vec<T>,
    pub summary: FilterSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSummary {
    pub original_rows: usize,
    pub clean_rows: usize,
    pub unique_characters_original: usize,
    pub unique_characters_kept: usize,
    /// Removed labels with their counts, first twenty in first-occurrence order
    pub removed_sample: Vec<(String, usize)>,
}

/// Drop records whose label occurs fewer than `min_count` times
///
/// Both outputs keep the input order.
pub fn filter_min_count<T>(records: Vec<T>, config: &FilterConfig) -> FilterOutcome<T>
where
    T: LabeledRecord,
{
    let counts = ordered_counts(records.iter().map(LabeledRecord::label));
    let keep: HashSet<String> = counts
        .iter()
        .filter(|(_, count)| *count >= config.min_count)
        .map(|(label, _)| label.to_string())
        .collect();
    let removed_sample: Vec<(String, usize)> = counts
        .iter()
        .filter(|(_, count)| *count < config.min_count)
        .take(20)
        .map(|(label, count)| (label.to_string(), *count))
        .collect();
    let unique_characters_original = counts.len();

    let original_rows = records.len();
    let (kept, removed): (Vec<T>, Vec<T>) = records
        .into_iter()
        .partition(|record| keep.contains(record.label()));

    info!(
        "Keeping {} characters with >= {} records; removing {} characters",
        keep.len(),
        config.min_count,
        unique_characters_original - keep.len()
    );

    FilterOutcome {
        summary: FilterSummary {
            original_rows,
            clean_rows: kept.len(),
            unique_characters_original,
            unique_characters_kept: keep.len(),
            removed_sample,
        },
        kept,
        removed,
    }
}
