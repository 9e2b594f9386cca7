use std::collections::HashSet;

use serde::Serialize;

use super::{ordered_counts, LabeledRecord};

/// Summary statistics of a dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetStats {
    pub total_rows: usize,
    pub unique_sagas: usize,
    pub unique_songs: usize,
    pub unique_characters: usize,
    pub rows_per_saga_top10: Vec<(String, usize)>,
    pub top_characters: Vec<(String, usize)>,
    pub avg_chars_per_record: f64,
    pub avg_words_per_record: f64,
}

/// Compute summary statistics
///
/// Top-ten lists are ordered by count, ties by first occurrence. Averages
/// are 0 for an empty dataset.
pub fn summarize<T: LabeledRecord>(records: &[T]) -> DatasetStats {
    let total_rows = records.len();
    let sagas = ordered_counts(records.iter().map(LabeledRecord::saga));
    let characters = ordered_counts(records.iter().map(LabeledRecord::label));
    let songs: HashSet<(&str, &str)> = records.iter().map(|r| (r.saga(), r.song())).collect();

    let total_chars: usize = records.iter().map(|r| r.text().chars().count()).sum();
    let total_words: usize = records
        .iter()
        .map(|r| r.text().split_whitespace().count())
        .sum();
    let average = |total: usize| {
        if total_rows == 0 {
            0.0
        } else {
            total as f64 / total_rows as f64
        }
    };

    DatasetStats {
        total_rows,
        unique_sagas: sagas.len(),
        unique_songs: songs.len(),
        unique_characters: characters.len(),
        rows_per_saga_top10: most_common(sagas, 10),
        top_characters: most_common(characters, 10),
        avg_chars_per_record: average(total_chars),
        avg_words_per_record: average(total_words),
    }
}

fn most_common(mut counts: Vec<(&str, usize)>, n: usize) -> Vec<(String, usize)> {
    // stable: equal counts keep first-occurrence order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(n)
        .map(|(key, count)| (key.to_string(), count))
        .collect()
}
