//! Speaker-name heuristics shared by candidate extraction and token
//! normalization.
//!
//! A bracket's content is split into parts on `,` `/` `\` `&` and the word
//! "and". Each part loses its parenthetical asides, is cut before the first
//! lowercase descriptor word ("HERMES giggles" -> "HERMES"), and what remains
//! contributes its leading run of uppercase name words.

use std::sync::LazyLock;

use regex::Regex;

use super::scanner::scan_annotations;

/// Collective placeholders that stand for "every named speaker"
pub const COLLECTIVE_TOKENS: [&str; 2] = ["ALL", "BOTH"];

/// Separators between names inside one bracket
static PART_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[,/\\&]|\band\b").expect("Invalid separator regex"));

/// Parenthetical asides, e.g. "(spoken)"
static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*?\)").expect("Invalid parenthetical regex"));

/// Leading run of uppercase name words: letters, digits, apostrophes, hyphens
static LEADING_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z0-9'’\-]+(?:\s+[A-Z0-9'’\-]+)*)").expect("Invalid leading name regex")
});

/// Ordered, de-duplicated speaker names found in one document
///
/// Scoped to a single document. Collective placeholders may be stored here
/// when they are written in uppercase; see [`is_collective`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedCandidates {
    names: Vec<String>,
}

impl NamedCandidates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append unless already present. Returns whether it was added.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.names.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Every stored entry, placeholders included, in first-occurrence order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }
}

impl<S: Into<String>> FromIterator<S> for NamedCandidates {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut candidates = Self::new();
        for name in iter {
            candidates.insert(name);
        }
        candidates
    }
}

/// Whether a trimmed, uppercased token is a collective placeholder
pub fn is_collective(token: &str) -> bool {
    COLLECTIVE_TOKENS.contains(&token)
}

/// Split bracket content into raw name parts
pub fn split_parts(inner: &str) -> impl Iterator<Item = &str> {
    PART_SEPARATOR.split(inner)
}

/// Byte offset of the first lowercase descriptor word in `part`
///
/// A descriptor is a whole word of two or more ASCII lowercase letters: the
/// run is not glued to other letters, digits or underscores on either side.
/// "HERMES giggles" has one at 7; "Odysseus" has none.
pub fn descriptor_start(part: &str) -> Option<usize> {
    let chars: Vec<(usize, char)> = part.char_indices().collect();
    let mut i = 0;

    while i < chars.len() {
        if !chars[i].1.is_ascii_lowercase() {
            i += 1;
            continue;
        }

        let run_start = i;
        while i < chars.len() && chars[i].1.is_ascii_lowercase() {
            i += 1;
        }

        let bounded_left = run_start == 0 || !is_word_char(chars[run_start - 1].1);
        let bounded_right = i == chars.len() || !is_word_char(chars[i].1);
        if i - run_start >= 2 && bounded_left && bounded_right {
            return Some(chars[run_start].0);
        }
    }

    None
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Strip asides and descriptors from one part
///
/// Returns `None` when nothing is left.
pub fn clean_part(part: &str) -> Option<String> {
    let stripped = PARENTHETICAL.replace_all(part, "");
    let trimmed = stripped.trim();
    if trimmed.is_empty() {
        return None;
    }
    let kept = match descriptor_start(trimmed) {
        Some(at) => trimmed[..at].trim(),
        None => trimmed,
    };
    (!kept.is_empty()).then(|| kept.to_string())
}

/// Longest leading run of uppercase name words
pub fn leading_name(part: &str) -> Option<&str> {
    LEADING_NAME
        .captures(part)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|name| !name.is_empty())
}

/// Collect the document's named candidates from every annotation
///
/// Parts are visited left to right within each annotation, annotations left
/// to right across the text; the first occurrence fixes a name's position.
pub fn extract_named_candidates(text: &str) -> NamedCandidates {
    let mut candidates = NamedCandidates::new();

    for annotation in scan_annotations(text) {
        for part in split_parts(&annotation.inner) {
            let Some(cleaned) = clean_part(part) else {
                continue;
            };
            if let Some(name) = leading_name(&cleaned) {
                candidates.insert(name);
            } else {
                let upper = cleaned.trim().to_uppercase();
                if is_collective(&upper) {
                    candidates.insert(upper);
                }
            }
        }
    }

    candidates
}
