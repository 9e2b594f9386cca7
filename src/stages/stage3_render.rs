use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::io::{DatasetFile, HumanDataset};

/// Configuration for Stage 3 rendering
#[derive(Debug, Clone)]
pub struct Stage3Config {
    /// Whether to generate the JSON dataset
    pub generate_machine: bool,
    /// Whether to generate the human-readable listing
    pub generate_human: bool,
}

impl Default for Stage3Config {
    fn default() -> Self {
        Self {
            generate_machine: true,
            generate_human: true,
        }
    }
}

/// Result of Stage 3 rendering
#[derive(Debug, Default)]
pub struct Stage3Result {
    /// Path to the JSON dataset (if generated)
    pub machine_path: Option<PathBuf>,
    /// Path to the human-readable listing (if generated)
    pub human_path: Option<PathBuf>,
}

/// Execute Stage 3: Rendering
///
/// Produces two output views:
/// 1. Machine dataset: JSON with run metadata and records
/// 2. Human listing: records grouped by song with speaker headers
pub fn execute_stage3(
    dataset: &DatasetFile,
    machine_output: Option<&Path>,
    human_output: Option<&Path>,
    config: &Stage3Config,
) -> Result<Stage3Result> {
    let mut result = Stage3Result::default();

    if config.generate_machine {
        if let Some(path) = machine_output {
            info!("Writing {} records to {:?}", dataset.metadata.records, path);
            dataset.write_json(path)?;
            result.machine_path = Some(path.to_path_buf());
        }
    }

    if config.generate_human {
        if let Some(path) = human_output {
            info!("Writing human-readable listing to {:?}", path);
            HumanDataset::new(&dataset.dataset).write_file(path)?;
            result.human_path = Some(path.to_path_buf());
        }
    }

    Ok(result)
}
