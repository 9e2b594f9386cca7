pub mod dataset;
pub mod error;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod stages;
pub mod text;

pub use dataset::{
    FilterConfig, LabeledRecord, SplitConfig, filter_min_count, split_dataset, summarize,
};
pub use error::{Error, Result};
pub use io::{discover_corpus, load_document, DatasetFile, HumanDataset};
pub use models::{
    Annotation, CharacterRecord, Document, DocumentSource, OutputMode, OutputRecords, Segment,
    SegmentRecord,
};
pub use pipeline::{process_corpus, process_document, PipelineConfig, WriteBackOptions};
pub use stages::{
    aggregate, clean_document, execute_stage3, segment_text, SegmentConfig, Stage3Config,
};
pub use text::{
    clean_whitespace, extract_named_candidates, normalize_token, scan_annotations,
    NamedCandidates, NormalizeConfig,
};
