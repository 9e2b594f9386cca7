use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Location of one song transcript inside a saga-organized corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSource {
    /// Saga (album) name, taken from the parent directory
    pub saga: String,
    /// Song title, taken from the file stem with underscores as spaces
    pub song: String,
    /// Path to the transcript file
    pub path: PathBuf,
}

/// One song transcript as loaded text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub saga: String,
    pub song: String,
    /// Raw, already-decoded transcript text
    pub text: String,
}

impl Document {
    pub fn new(saga: impl Into<String>, song: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            saga: saga.into(),
            song: song.into(),
            text: text.into(),
        }
    }
}

/// Song title derived from a transcript file stem
pub fn song_title_from_stem(stem: &str) -> String {
    stem.replace('_', " ")
}
