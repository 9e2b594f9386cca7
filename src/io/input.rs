use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::models::{song_title_from_stem, Document, DocumentSource};

/// Extension of song transcript files
pub const TRANSCRIPT_EXTENSION: &str = "txt";

/// Suffix appended to a transcript path for its pristine copy
pub const BACKUP_SUFFIX: &str = ".bak";

/// Discover song transcripts under a corpus root
///
/// The corpus is one directory per saga, each holding `*.txt` songs.
/// Sagas and songs come back sorted by file name. Files directly under the
/// root, deeper nesting, and directories named like `*.py` are ignored.
pub fn discover_corpus(root: &Path) -> Result<Vec<DocumentSource>> {
    let mut sources = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(2)
        .max_depth(2)
        .sort_by_file_name()
    {
        let entry = entry?;
        let path = entry.path();

        if !entry.file_type().is_file() || !is_transcript(path) {
            continue;
        }

        let Some(saga) = path
            .parent()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
        else {
            continue;
        };
        if saga.to_lowercase().ends_with(".py") {
            continue;
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        sources.push(DocumentSource {
            saga,
            song: song_title_from_stem(&stem),
            path: path.to_path_buf(),
        });
    }

    debug!("Discovered {} transcripts under {:?}", sources.len(), root);
    Ok(sources)
}

fn is_transcript(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == TRANSCRIPT_EXTENSION)
}

/// Source for a single transcript file outside a corpus layout
pub fn source_from_path(path: &Path) -> DocumentSource {
    let saga = path
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    DocumentSource {
        saga,
        song: song_title_from_stem(&stem),
        path: path.to_path_buf(),
    }
}

/// Read a transcript as UTF-8 text
pub fn load_document(source: &DocumentSource) -> Result<Document> {
    let text = std::fs::read_to_string(&source.path).map_err(|e| Error::io(e, &source.path))?;
    Ok(Document::new(source.saga.clone(), source.song.clone(), text))
}

/// Path of the pristine copy kept next to a transcript (`song.txt.bak`)
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Save `original` as the backup of `path` unless one already exists
///
/// Returns whether a backup was written.
pub fn write_backup_if_missing(path: &Path, original: &str) -> Result<bool> {
    let backup = backup_path(path);
    if backup.exists() {
        return Ok(false);
    }
    std::fs::write(&backup, original).map_err(|e| Error::io(e, &backup))?;
    Ok(true)
}

/// Overwrite a transcript with new text
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).map_err(|e| Error::io(e, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_discover_corpus_sorted() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "The Troy Saga/The_Horse_and_the_Infant.txt", "[ZEUS]");
        write(dir.path(), "The Troy Saga/Full_Speed_Ahead.txt", "[ODYSSEUS]");
        write(dir.path(), "The Cyclops Saga/Polyphemus.txt", "[POLYPHEMUS]");
        write(dir.path(), "The Cyclops Saga/notes.md", "ignored");
        write(dir.path(), "readme.txt", "ignored");
        write(dir.path(), "scripts.py/helper.txt", "ignored");
        write(dir.path(), "The Troy Saga/extra/deep.txt", "ignored");

        let sources = discover_corpus(dir.path()).unwrap();
        let ids: Vec<(&str, &str)> = sources
            .iter()
            .map(|s| (s.saga.as_str(), s.song.as_str()))
            .collect();

        assert_eq!(
            ids,
            vec![
                ("The Cyclops Saga", "Polyphemus"),
                ("The Troy Saga", "Full Speed Ahead"),
                ("The Troy Saga", "The Horse and the Infant"),
            ]
        );
    }

    #[test]
    fn test_backup_path_appends_suffix() {
        assert_eq!(
            backup_path(Path::new("saga/song.txt")),
            PathBuf::from("saga/song.txt.bak")
        );
    }

    #[test]
    fn test_backup_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "Saga/Song.txt", "original");

        assert!(write_backup_if_missing(&path, "original").unwrap());
        assert!(!write_backup_if_missing(&path, "second").unwrap());
        assert_eq!(
            std::fs::read_to_string(backup_path(&path)).unwrap(),
            "original"
        );
    }

    #[test]
    fn test_load_document_reports_path() {
        let source = DocumentSource {
            saga: "Saga".to_string(),
            song: "Missing".to_string(),
            path: PathBuf::from("/nonexistent/Saga/Missing.txt"),
        };
        let err = load_document(&source).unwrap_err();
        assert!(err.to_string().contains("Missing.txt"));
    }

    #[test]
    fn test_source_from_path() {
        let source =
            source_from_path(Path::new("corpus/The Ithaca Saga/Would_You_Fall_in_Love.txt"));
        assert_eq!(source.saga, "The Ithaca Saga");
        assert_eq!(source.song, "Would You Fall in Love");
    }
}
