use std::path::PathBuf;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::io::{load_document, write_backup_if_missing, write_text};
use crate::models::{Document, DocumentSource, OutputMode, OutputRecords, Segment};
use crate::stages::{aggregate, clean_document, segment_text, CleanResult, SegmentConfig};
use crate::text::NormalizeConfig;

/// Configuration for the per-document pipeline
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub normalize: NormalizeConfig,
    pub segment: SegmentConfig,
    pub mode: OutputMode,
}

/// What to do with the cleaned text of each source file
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteBackOptions {
    /// Overwrite source files with their cleaned text
    pub write_back: bool,
    /// Keep a `.bak` of the original before the first overwrite
    pub backup: bool,
}

impl WriteBackOptions {
    pub fn in_place() -> Self {
        Self {
            write_back: true,
            backup: true,
        }
    }
}

/// Everything produced for one document
#[derive(Debug, Clone)]
pub struct DocumentOutput {
    /// Stage 0 output: cleaned text, candidates, rewrite count
    pub clean: CleanResult,
    /// Stage 1 output
    pub segments: Vec<Segment>,
    /// Stage 2 output
    pub records: OutputRecords,
}

/// Run all stages over one loaded document
///
/// Total over any text; nothing here can fail.
pub fn process_document(document: &Document, config: &PipelineConfig) -> DocumentOutput {
    let clean = clean_document(&document.text, &config.normalize);
    let segments = segment_text(&clean.text, &config.segment);
    let records = aggregate(document, &segments, config.mode);

    debug!(
        "{} / {}: {} candidates, {} annotations rewritten, {} segments, {} records",
        document.saga,
        document.song,
        clean.candidates.len(),
        clean.annotations_rewritten,
        segments.len(),
        records.len()
    );

    DocumentOutput {
        clean,
        segments,
        records,
    }
}

/// A document that could not be processed
#[derive(Debug, Clone, Serialize)]
pub struct DocumentFailure {
    pub saga: String,
    pub song: String,
    pub path: PathBuf,
    pub message: String,
}

/// Result of processing a whole corpus
#[derive(Debug)]
pub struct CorpusResult {
    /// Successful documents, in source order
    pub documents: Vec<(DocumentSource, DocumentOutput)>,
    /// Failed documents, in source order
    pub failures: Vec<DocumentFailure>,
    /// Number of source files overwritten with cleaned text
    pub files_written: usize,
}

impl CorpusResult {
    /// All records of all successful documents, in source order
    pub fn records(&self, mode: OutputMode) -> OutputRecords {
        let mut records = OutputRecords::empty(mode);
        for (_, output) in &self.documents {
            records.extend(output.records.clone());
        }
        records
    }

    pub fn annotations_rewritten(&self) -> usize {
        self.documents
            .iter()
            .map(|(_, output)| output.clean.annotations_rewritten)
            .sum()
    }
}

/// Process every source independently and in parallel
///
/// Output order matches `sources` regardless of scheduling. A failure on one
/// document is recorded and the others carry on.
pub fn process_corpus(
    sources: &[DocumentSource],
    config: &PipelineConfig,
    options: WriteBackOptions,
) -> CorpusResult {
    info!("Processing {} documents", sources.len());

    let outcomes: Vec<_> = sources
        .par_iter()
        .map(|source| {
            process_source(source, config, options).map_err(|e| DocumentFailure {
                saga: source.saga.clone(),
                song: source.song.clone(),
                path: source.path.clone(),
                message: e.to_string(),
            })
        })
        .collect();

    let mut result = CorpusResult {
        documents: Vec::with_capacity(sources.len()),
        failures: Vec::new(),
        files_written: 0,
    };

    for (source, outcome) in sources.iter().zip(outcomes) {
        match outcome {
            Ok((output, written)) => {
                if written {
                    result.files_written += 1;
                }
                result.documents.push((source.clone(), output));
            }
            Err(failure) => {
                warn!(
                    "Skipping {} / {} ({:?}): {}",
                    failure.saga, failure.song, failure.path, failure.message
                );
                result.failures.push(failure);
            }
        }
    }

    info!(
        "Processed {} documents, {} failed, {} annotations rewritten",
        result.documents.len(),
        result.failures.len(),
        result.annotations_rewritten()
    );

    result
}

/// Load, process and optionally write back one source file
fn process_source(
    source: &DocumentSource,
    config: &PipelineConfig,
    options: WriteBackOptions,
) -> Result<(DocumentOutput, bool)> {
    let document = load_document(source)?;
    let output = process_document(&document, config);

    let mut written = false;
    if options.write_back && output.clean.needs_backup() {
        if options.backup && write_backup_if_missing(&source.path, &document.text)? {
            debug!("Saved backup of {:?}", source.path);
        }
        write_text(&source.path, &output.clean.text)?;
        written = true;
    }

    Ok((output, written))
}
