use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Text attributed to the speaker(s) named by the annotation before it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Annotation content exactly as it appears in the rewritten text
    pub canonical: String,
    /// Individual speaker names, in canonical order
    pub speakers: Vec<String>,
    /// Segment text, trimmed
    pub text: String,
    /// Untrimmed byte range of the segment in the rewritten text
    pub span: Range<usize>,
}

impl Segment {
    /// Unsplit attribution, verbatim from the annotation
    pub fn attribution(&self) -> &str {
        &self.canonical
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribution_is_verbatim_canonical() {
        let segment = Segment {
            canonical: "ODYSSEUS, POSEIDON".to_string(),
            speakers: vec!["ODYSSEUS".to_string(), "POSEIDON".to_string()],
            text: "We fight.".to_string(),
            span: 0..9,
        };
        assert_eq!(segment.attribution(), "ODYSSEUS, POSEIDON");
        assert!(!segment.is_empty());

        let fallback = Segment {
            canonical: "spoken, ".to_string(),
            speakers: vec!["spoken".to_string()],
            text: String::new(),
            span: 0..0,
        };
        assert_eq!(fallback.attribution(), "spoken, ");
        assert!(fallback.is_empty());
    }
}
