use tracing::debug;

use crate::text::{
    NamedCandidates, NormalizeConfig, clean_whitespace, extract_named_candidates,
    normalize_annotations,
};

/// Result of Stage 0 cleaning
#[derive(Debug, Clone)]
pub struct CleanResult {
    /// Whitespace-normalized text with every annotation rewritten
    pub text: String,
    /// Named candidates discovered in the whitespace-normalized text
    pub candidates: NamedCandidates,
    /// Number of annotations whose content changed
    pub annotations_rewritten: usize,
    /// Whether the cleaned text differs from the input
    pub changed: bool,
}

impl CleanResult {
    /// Whether a pristine copy of the input should be kept before the
    /// cleaned text is written back over it
    pub fn needs_backup(&self) -> bool {
        self.changed
    }
}

/// Perform Stage 0: whitespace cleanup and annotation rewrite
///
/// This stage:
/// 1. Normalizes line endings and spacing
/// 2. Discovers the document's named candidates
/// 3. Rewrites every annotation to its canonical speaker string
///
/// The candidate set is built from the whole document before any rewrite,
/// so a placeholder near the top still expands to names introduced later.
pub fn clean_document(text: &str, config: &NormalizeConfig) -> CleanResult {
    let spaced = clean_whitespace(text);
    let candidates = extract_named_candidates(&spaced);

    debug!(
        "Named candidates: [{}]",
        candidates.as_slice().join(", ")
    );

    let (rewritten, annotations_rewritten) = normalize_annotations(&spaced, &candidates, config);
    let changed = rewritten != text;

    CleanResult {
        text: rewritten,
        candidates,
        annotations_rewritten,
        changed,
    }
}
