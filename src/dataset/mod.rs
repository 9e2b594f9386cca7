pub mod filter;
pub mod split;
pub mod stats;

pub use filter::*;
pub use split::*;
pub use stats::*;

use std::collections::HashMap;

use crate::models::{CharacterRecord, SegmentRecord};

/// A dataset row with a class label, as consumed by the dataset tooling
pub trait LabeledRecord {
    fn saga(&self) -> &str;
    fn song(&self) -> &str;
    /// Speaker label the row is classified under
    fn label(&self) -> &str;
    fn text(&self) -> &str;
}

impl LabeledRecord for CharacterRecord {
    fn saga(&self) -> &str {
        &self.saga
    }

    fn song(&self) -> &str {
        &self.song
    }

    fn label(&self) -> &str {
        &self.character
    }

    fn text(&self) -> &str {
        &self.text
    }
}

impl LabeledRecord for SegmentRecord {
    fn saga(&self) -> &str {
        &self.saga
    }

    fn song(&self) -> &str {
        &self.song
    }

    fn label(&self) -> &str {
        &self.speaker_attribution
    }

    fn text(&self) -> &str {
        &self.text
    }
}

/// Count occurrences of each key, keeping first-occurrence order
pub(crate) fn ordered_counts<'a, I>(keys: I) -> Vec<(&'a str, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for key in keys {
        match index.get(key) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(key, counts.len());
                counts.push((key, 1));
            }
        }
    }

    counts
}
