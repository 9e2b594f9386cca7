use std::fmt;

use serde::{Deserialize, Serialize};

/// Output granularity of the aggregator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// One record per segment, attribution kept as the canonical string
    PerSegment,
    /// One record per speaker per song, segments joined by a blank line
    #[default]
    PerCharacter,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PerSegment => write!(f, "per-segment"),
            Self::PerCharacter => write!(f, "per-character"),
        }
    }
}

/// One row per segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub saga: String,
    pub song: String,
    /// Full canonical speaker string, e.g. "ODYSSEUS, POSEIDON"
    pub speaker_attribution: String,
    pub text: String,
}

/// One row per speaker per song
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub saga: String,
    pub song: String,
    /// Title-cased single speaker name
    pub character: String,
    pub text: String,
}

/// Aggregated rows of a single document, in one of the two output modes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "records", rename_all = "kebab-case")]
pub enum OutputRecords {
    PerSegment(Vec<SegmentRecord>),
    PerCharacter(Vec<CharacterRecord>),
}

impl OutputRecords {
    pub fn empty(mode: OutputMode) -> Self {
        match mode {
            OutputMode::PerSegment => Self::PerSegment(Vec::new()),
            OutputMode::PerCharacter => Self::PerCharacter(Vec::new()),
        }
    }

    pub fn mode(&self) -> OutputMode {
        match self {
            Self::PerSegment(_) => OutputMode::PerSegment,
            Self::PerCharacter(_) => OutputMode::PerCharacter,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::PerSegment(records) => records.len(),
            Self::PerCharacter(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append another document's records; both sides must share a mode
    pub fn extend(&mut self, other: OutputRecords) {
        match (self, other) {
            (Self::PerSegment(into), Self::PerSegment(from)) => into.extend(from),
            (Self::PerCharacter(into), Self::PerCharacter(from)) => into.extend(from),
            (into, from) => {
                tracing::warn!(
                    "Dropping {} {} records appended to a {} collection",
                    from.len(),
                    from.mode(),
                    into.mode()
                );
            }
        }
    }
}
