use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{OutputMode, OutputRecords};

/// Dataset file: run metadata plus the records of one output mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetFile {
    pub metadata: DatasetMetadata,
    pub dataset: OutputRecords,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub mode: OutputMode,
    pub documents: usize,
    pub records: usize,
    pub failures: usize,
    pub annotations_rewritten: usize,
    /// RFC 3339 timestamp of when the file was produced
    pub generated_at: String,
}

impl DatasetFile {
    /// Wrap records, refreshing mode, record count and timestamp
    pub fn new(
        dataset: OutputRecords,
        documents: usize,
        failures: usize,
        annotations_rewritten: usize,
    ) -> Self {
        Self {
            metadata: DatasetMetadata {
                mode: dataset.mode(),
                documents,
                records: dataset.len(),
                failures,
                annotations_rewritten,
                generated_at: chrono::Utc::now().to_rfc3339(),
            },
            dataset,
        }
    }

    /// Same provenance, different records
    pub fn derive(&self, dataset: OutputRecords) -> Self {
        Self::new(
            dataset,
            self.metadata.documents,
            self.metadata.failures,
            self.metadata.annotations_rewritten,
        )
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path).map_err(|e| Error::io(e, path))?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Read from a JSON file
    pub fn read_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(e, path))?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Human-readable listing of a dataset
pub struct HumanDataset<'a> {
    records: &'a OutputRecords,
}

impl<'a> HumanDataset<'a> {
    pub fn new(records: &'a OutputRecords) -> Self {
        Self { records }
    }

    /// Format as "saga / song" headers followed by speaker blocks
    pub fn format(&self) -> String {
        let rows: Vec<(&str, &str, &str, &str)> = match self.records {
            OutputRecords::PerSegment(records) => records
                .iter()
                .map(|r| {
                    (
                        r.saga.as_str(),
                        r.song.as_str(),
                        r.speaker_attribution.as_str(),
                        r.text.as_str(),
                    )
                })
                .collect(),
            OutputRecords::PerCharacter(records) => records
                .iter()
                .map(|r| {
                    (
                        r.saga.as_str(),
                        r.song.as_str(),
                        r.character.as_str(),
                        r.text.as_str(),
                    )
                })
                .collect(),
        };

        let mut output = String::new();
        let mut current: Option<(&str, &str)> = None;

        for (saga, song, speaker, text) in rows {
            if current != Some((saga, song)) {
                if current.is_some() {
                    output.push('\n');
                }
                output.push_str(&format!("== {} / {} ==\n\n", saga, song));
                current = Some((saga, song));
            }
            output.push_str(&format!("[{}]\n", speaker));
            if !text.is_empty() {
                output.push_str(text);
                output.push('\n');
            }
            output.push('\n');
        }

        output
    }

    /// Write to a text file
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path).map_err(|e| Error::io(e, path))?;
        write!(file, "{}", self.format()).map_err(|e| Error::io(e, path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CharacterRecord, SegmentRecord};

    fn segment_record(song: &str, speaker: &str, text: &str) -> SegmentRecord {
        SegmentRecord {
            saga: "The Circe Saga".to_string(),
            song: song.to_string(),
            speaker_attribution: speaker.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_human_format_groups_by_song() {
        let records = OutputRecords::PerSegment(vec![
            segment_record("Done For", "CIRCE", "Who are you"),
            segment_record("Done For", "ODYSSEUS, CIRCE", ""),
            segment_record("There Are Other Ways", "CIRCE", "Stop"),
        ]);
        let text = HumanDataset::new(&records).format();

        assert_eq!(
            text,
            "== The Circe Saga / Done For ==\n\n[CIRCE]\nWho are you\n\n[ODYSSEUS, CIRCE]\n\n\
             \n== The Circe Saga / There Are Other Ways ==\n\n[CIRCE]\nStop\n\n"
        );
    }

    #[test]
    fn test_dataset_json_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lines.json");
        let dataset = DatasetFile::new(
            OutputRecords::PerCharacter(vec![CharacterRecord {
                saga: "The Circe Saga".to_string(),
                song: "Done For".to_string(),
                character: "Circe".to_string(),
                text: "Who are you".to_string(),
            }]),
            1,
            0,
            2,
        );

        dataset.write_json(&path).unwrap();
        let read = DatasetFile::read_json(&path).unwrap();

        assert_eq!(read, dataset);
        assert_eq!(read.metadata.mode, OutputMode::PerCharacter);
        assert_eq!(read.metadata.records, 1);
    }

    #[test]
    fn test_dataset_json_shape() {
        let dataset = DatasetFile::new(OutputRecords::PerSegment(vec![]), 0, 0, 0);
        let value = serde_json::to_value(&dataset).unwrap();
        assert_eq!(value["dataset"]["mode"], "per-segment");
        assert!(value["dataset"]["records"].as_array().unwrap().is_empty());
        assert_eq!(value["metadata"]["mode"], "per-segment");
    }
}
