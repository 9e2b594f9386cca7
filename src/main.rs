use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use libretto::io::source_from_path;
use libretto::{
    clean_whitespace, discover_corpus, execute_stage3, extract_named_candidates,
    filter_min_count, load_document, normalize_token, process_corpus, process_document,
    scan_annotations, split_dataset, summarize, DatasetFile, FilterConfig, NormalizeConfig,
    OutputMode, OutputRecords, PipelineConfig, SplitConfig, Stage3Config, WriteBackOptions,
};

#[derive(Parser)]
#[command(name = "libretto")]
#[command(author, version, about = "Speaker-annotated lyric transcript pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// One record per speaker per song
    PerCharacter,
    /// One record per annotated segment
    PerSegment,
}

impl From<Mode> for OutputMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::PerCharacter => OutputMode::PerCharacter,
            Mode::PerSegment => OutputMode::PerSegment,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite song files in place with clean spacing and canonical speaker tokens
    Normalize {
        /// Corpus root: one directory per saga containing *.txt songs
        #[arg(short, long)]
        root: PathBuf,

        /// Do not keep a .bak of each original file
        #[arg(long)]
        no_backup: bool,

        /// Report what would change without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Keep BOTH/ALL as literal names instead of expanding them
        #[arg(long)]
        no_expand: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Build a speaker/lines dataset from a corpus
    Extract {
        /// Corpus root: one directory per saga containing *.txt songs
        #[arg(short, long)]
        root: PathBuf,

        /// Output file for the dataset (JSON)
        #[arg(short, long)]
        output: PathBuf,

        /// Output file for a human-readable listing (text)
        #[arg(long)]
        human_readable: Option<PathBuf>,

        /// Record granularity
        #[arg(long, value_enum, default_value = "per-character")]
        mode: Mode,

        /// Keep BOTH/ALL as literal names instead of expanding them
        #[arg(long)]
        no_expand: bool,

        /// Also write the cleaned text back over each song file
        #[arg(long)]
        write_back: bool,

        /// With --write-back, do not keep a .bak of each original file
        #[arg(long)]
        no_backup: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show how one song file is normalized and segmented
    Analyze {
        /// Song transcript file
        #[arg(short, long)]
        input: PathBuf,

        /// Keep BOTH/ALL as literal names instead of expanding them
        #[arg(long)]
        no_expand: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Remove characters with too few records from a dataset
    Filter {
        /// Dataset produced by `extract`
        #[arg(short, long)]
        input: PathBuf,

        /// Filtered dataset
        #[arg(short, long)]
        output: PathBuf,

        /// Minimum records a character needs to be kept
        #[arg(short, long, default_value = "3")]
        min_count: usize,

        /// Optional file for the removed records
        #[arg(long)]
        removed: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print dataset statistics and write a seeded train/test split
    Split {
        /// Dataset produced by `extract` or `filter`
        #[arg(short, long)]
        input: PathBuf,

        /// Training split output
        #[arg(long)]
        train: PathBuf,

        /// Test split output
        #[arg(long)]
        test: PathBuf,

        /// Fraction of records in the test split
        #[arg(long, default_value = "0.2")]
        test_size: f64,

        /// Shuffle seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Normalize {
            root,
            no_backup,
            dry_run,
            no_expand,
            verbose,
        } => {
            setup_logging(verbose);
            normalize_corpus(root, no_backup, dry_run, no_expand)
        }
        Commands::Extract {
            root,
            output,
            human_readable,
            mode,
            no_expand,
            write_back,
            no_backup,
            verbose,
        } => {
            setup_logging(verbose);
            extract_dataset(
                root,
                output,
                human_readable,
                mode.into(),
                no_expand,
                write_back,
                no_backup,
            )
        }
        Commands::Analyze {
            input,
            no_expand,
            verbose,
        } => {
            setup_logging(verbose);
            analyze_song(input, no_expand)
        }
        Commands::Filter {
            input,
            output,
            min_count,
            removed,
            verbose,
        } => {
            setup_logging(verbose);
            filter_dataset(input, output, min_count, removed)
        }
        Commands::Split {
            input,
            train,
            test,
            test_size,
            seed,
            verbose,
        } => {
            setup_logging(verbose);
            split_and_stats(input, train, test, SplitConfig { test_size, seed })
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn normalize_config(no_expand: bool) -> NormalizeConfig {
    if no_expand {
        NormalizeConfig::without_expansion()
    } else {
        NormalizeConfig::default()
    }
}

fn normalize_corpus(root: PathBuf, no_backup: bool, dry_run: bool, no_expand: bool) -> Result<()> {
    info!("Discovering songs under {:?}", root);
    let sources = discover_corpus(&root).context("Failed to discover corpus")?;

    let config = PipelineConfig {
        normalize: normalize_config(no_expand),
        ..Default::default()
    };
    let options = WriteBackOptions {
        write_back: !dry_run,
        backup: !no_backup,
    };
    let result = process_corpus(&sources, &config, options);

    let changed = result
        .documents
        .iter()
        .filter(|(_, output)| output.clean.needs_backup())
        .count();

    if dry_run {
        for (source, output) in &result.documents {
            if output.clean.needs_backup() {
                println!(
                    "would rewrite {:?} ({} annotations)",
                    source.path, output.clean.annotations_rewritten
                );
            }
        }
    }

    info!(
        "Processed {} files ({} changed, {} written), rewrote {} annotations, {} failures",
        result.documents.len(),
        changed,
        result.files_written,
        result.annotations_rewritten(),
        result.failures.len()
    );

    Ok(())
}

fn extract_dataset(
    root: PathBuf,
    output: PathBuf,
    human_readable: Option<PathBuf>,
    mode: OutputMode,
    no_expand: bool,
    write_back: bool,
    no_backup: bool,
) -> Result<()> {
    info!("Discovering songs under {:?}", root);
    let sources = discover_corpus(&root).context("Failed to discover corpus")?;

    let config = PipelineConfig {
        normalize: normalize_config(no_expand),
        mode,
        ..Default::default()
    };
    let options = WriteBackOptions {
        write_back,
        backup: !no_backup,
    };
    let result = process_corpus(&sources, &config, options);

    let dataset = DatasetFile::new(
        result.records(mode),
        result.documents.len(),
        result.failures.len(),
        result.annotations_rewritten(),
    );

    let stage3 = execute_stage3(
        &dataset,
        Some(output.as_path()),
        human_readable.as_deref(),
        &Stage3Config::default(),
    )
    .context("Failed to write dataset")?;

    if let Some(path) = stage3.machine_path {
        info!("Dataset written to {:?}", path);
    }
    if let Some(path) = stage3.human_path {
        info!("Human-readable listing written to {:?}", path);
    }

    for failure in &result.failures {
        warn!("Failed: {} / {}: {}", failure.saga, failure.song, failure.message);
    }

    info!(
        "Complete: {} {} records from {} songs",
        dataset.metadata.records, mode, dataset.metadata.documents
    );

    Ok(())
}

fn analyze_song(input: PathBuf, no_expand: bool) -> Result<()> {
    info!("Analyzing song from {:?}", input);
    let source = source_from_path(&input);
    let document = load_document(&source).context("Failed to read song")?;

    let normalize = normalize_config(no_expand);
    let spaced = clean_whitespace(&document.text);
    let candidates = extract_named_candidates(&spaced);

    println!("Song Analysis: {} / {}", document.saga, document.song);
    println!("==============");
    println!("Named candidates: {}", candidates.as_slice().join(", "));
    println!();

    println!("Annotations");
    println!("-----------");
    for annotation in scan_annotations(&spaced) {
        let canonical = normalize_token(&annotation.inner, &candidates, &normalize);
        let marker = if canonical == annotation.inner { " " } else { "*" };
        println!("{} [{}] -> [{}]", marker, annotation.inner, canonical);
    }
    println!();

    let config = PipelineConfig {
        normalize,
        mode: OutputMode::PerSegment,
        ..Default::default()
    };
    let output = process_document(&document, &config);

    println!("Segments");
    println!("--------");
    for segment in &output.segments {
        let preview: String = segment.text.chars().take(60).collect();
        println!(
            "{:<30} {:>5} chars  {}",
            segment.attribution(),
            segment.text.chars().count(),
            preview.replace('\n', " / ")
        );
    }
    println!();
    println!(
        "{} annotations rewritten, backup needed: {}",
        output.clean.annotations_rewritten,
        output.clean.needs_backup()
    );

    Ok(())
}

fn filter_dataset(
    input: PathBuf,
    output: PathBuf,
    min_count: usize,
    removed: Option<PathBuf>,
) -> Result<()> {
    let file = DatasetFile::read_json(&input).context("Failed to read dataset")?;
    info!("Read {} records from {:?}", file.dataset.len(), input);

    let config = FilterConfig { min_count };
    let (kept, dropped, summary) = match file.dataset.clone() {
        OutputRecords::PerSegment(records) => {
            let outcome = filter_min_count(records, &config);
            (
                OutputRecords::PerSegment(outcome.kept),
                OutputRecords::PerSegment(outcome.removed),
                outcome.summary,
            )
        }
        OutputRecords::PerCharacter(records) => {
            let outcome = filter_min_count(records, &config);
            (
                OutputRecords::PerCharacter(outcome.kept),
                OutputRecords::PerCharacter(outcome.removed),
                outcome.summary,
            )
        }
    };

    file.derive(kept)
        .write_json(&output)
        .context("Failed to write filtered dataset")?;
    info!("Wrote {} records to {:?}", summary.clean_rows, output);

    if let Some(path) = removed {
        file.derive(dropped)
            .write_json(&path)
            .context("Failed to write removed records")?;
        info!("Wrote removed records to {:?}", path);
    }

    println!("Summary:");
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

fn split_and_stats(
    input: PathBuf,
    train: PathBuf,
    test: PathBuf,
    config: SplitConfig,
) -> Result<()> {
    let file = DatasetFile::read_json(&input).context("Failed to read dataset")?;
    info!("Read {} records from {:?}", file.dataset.len(), input);

    let (stats, train_records, test_records) = match file.dataset.clone() {
        OutputRecords::PerSegment(records) => {
            let stats = summarize(&records);
            let (train, test) = split_dataset(records, &config)?;
            (
                stats,
                OutputRecords::PerSegment(train),
                OutputRecords::PerSegment(test),
            )
        }
        OutputRecords::PerCharacter(records) => {
            let stats = summarize(&records);
            let (train, test) = split_dataset(records, &config)?;
            (
                stats,
                OutputRecords::PerCharacter(train),
                OutputRecords::PerCharacter(test),
            )
        }
    };

    println!("Summary stats:");
    println!("{}", serde_json::to_string_pretty(&stats)?);

    let train_count = train_records.len();
    let test_count = test_records.len();
    file.derive(train_records)
        .write_json(&train)
        .context("Failed to write training split")?;
    file.derive(test_records)
        .write_json(&test)
        .context("Failed to write test split")?;

    info!("Wrote {} records to {:?}", train_count, train);
    info!("Wrote {} records to {:?}", test_count, test);

    Ok(())
}
