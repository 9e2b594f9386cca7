use tracing::debug;

use crate::models::Segment;
use crate::text::scan_annotations;

/// Speaker used for documents without any annotation
pub const NARRATION_SPEAKER: &str = "NARRATION";

/// Configuration for Stage 1 segmentation
#[derive(Debug, Clone)]
pub struct SegmentConfig {
    /// Speaker attributed to an annotation-free document
    pub narration_speaker: String,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            narration_speaker: NARRATION_SPEAKER.to_string(),
        }
    }
}

/// Perform Stage 1: split rewritten text into speaker segments
///
/// Annotations are always re-scanned from `text`; offsets from before the
/// rewrite are never reused. Each segment runs from the end of one
/// annotation to the start of the next (or the end of the text). Text before
/// the first annotation belongs to no segment.
pub fn segment_text(text: &str, config: &SegmentConfig) -> Vec<Segment> {
    let annotations = scan_annotations(text);

    if annotations.is_empty() {
        let content = text.trim();
        if content.is_empty() {
            return Vec::new();
        }
        return vec![Segment {
            canonical: config.narration_speaker.clone(),
            speakers: vec![config.narration_speaker.clone()],
            text: content.to_string(),
            span: 0..text.len(),
        }];
    }

    let prelude = text[..annotations[0].outer_start()].trim();
    if !prelude.is_empty() {
        debug!("Ignoring {} bytes before the first annotation", prelude.len());
    }

    annotations
        .iter()
        .enumerate()
        .map(|(i, annotation)| {
            let start = annotation.outer_end();
            let end = annotations
                .get(i + 1)
                .map_or(text.len(), |next| next.outer_start());
            Segment {
                canonical: annotation.inner.clone(),
                speakers: split_speakers(&annotation.inner),
                text: text[start..end].trim().to_string(),
                span: start..end,
            }
        })
        .collect()
}

/// Split a canonical speaker string into individual names
pub fn split_speakers(canonical: &str) -> Vec<String> {
    canonical
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::clean_document;
    use crate::text::NormalizeConfig;

    fn segment(text: &str) -> Vec<Segment> {
        segment_text(text, &SegmentConfig::default())
    }

    #[test]
    fn test_segments_follow_annotations() {
        let segments = segment("[ODYSSEUS] Hello\n[HERMES] Hi there\n");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].speakers, vec!["ODYSSEUS"]);
        assert_eq!(segments[0].text, "Hello");
        assert_eq!(segments[1].speakers, vec!["HERMES"]);
        assert_eq!(segments[1].text, "Hi there");
    }

    #[test]
    fn test_multi_speaker_segment() {
        let segments = segment("[ODYSSEUS, POSEIDON] We fight.\n");
        assert_eq!(segments[0].speakers, vec!["ODYSSEUS", "POSEIDON"]);
    }

    #[test]
    fn test_canonical_kept_verbatim() {
        let segments = segment("[ (laughs) ] hi\n[,] hey\n[spoken, ] yo");
        let canonical: Vec<&str> = segments.iter().map(|s| s.canonical.as_str()).collect();
        assert_eq!(canonical, vec![" (laughs) ", ",", "spoken, "]);
        assert_eq!(segments[0].speakers, vec!["(laughs)"]);
        assert!(segments[1].speakers.is_empty());
        assert_eq!(segments[2].speakers, vec!["spoken"]);
    }

    #[test]
    fn test_no_annotations_is_narration() {
        let segments = segment("  Sing, O Muse\n");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].speakers, vec![NARRATION_SPEAKER]);
        assert_eq!(segments[0].text, "Sing, O Muse");
    }

    #[test]
    fn test_whitespace_document_has_no_segments() {
        assert!(segment(" \n\t\n").is_empty());
        assert!(segment("").is_empty());
    }

    #[test]
    fn test_empty_segments_are_kept() {
        let segments = segment("[ZEUS]\n[HERA] Listen\n[ATHENA]");
        assert_eq!(segments.len(), 3);
        assert!(segments[0].is_empty());
        assert_eq!(segments[1].text, "Listen");
        assert!(segments[2].is_empty());
    }

    #[test]
    fn test_unterminated_bracket_stays_in_text() {
        let segments = segment("[ZEUS] Kneel [before me\n");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "Kneel [before me");
    }

    #[test]
    fn test_custom_narration_speaker() {
        let config = SegmentConfig {
            narration_speaker: "CHORUS".to_string(),
        };
        let segments = segment_text("la la", &config);
        assert_eq!(segments[0].speakers, vec!["CHORUS"]);
    }

    #[test]
    fn test_segments_tile_the_rewritten_text() {
        let raw = "Prelude\n[ODYSSEUS, spoken]  Hello\r\n\r\n\r\n[BOTH] Hi\n\
                   [PENELOPE (sings)] End [unterminated  ";
        let cleaned = clean_document(raw, &NormalizeConfig::default());
        let text = cleaned.text.as_str();
        let annotations = scan_annotations(text);
        let segments = segment(text);

        assert_eq!(segments.len(), annotations.len());

        let mut rebuilt = String::from(&text[..annotations[0].outer_start()]);
        for (annotation, segment) in annotations.iter().zip(&segments) {
            assert_eq!(annotation.outer_end(), segment.span.start);
            assert_eq!(text[segment.span.clone()].trim(), segment.text);
            rebuilt.push_str(&text[annotation.outer_range()]);
            rebuilt.push_str(&text[segment.span.clone()]);
        }
        assert_eq!(rebuilt, text);
    }
}
