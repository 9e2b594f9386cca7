use std::collections::HashMap;

use crate::models::{CharacterRecord, Document, OutputMode, OutputRecords, Segment, SegmentRecord};

/// Perform Stage 2: turn a document's segments into output rows
///
/// The two modes deliberately disagree on empty segments and on name case;
/// pick one explicitly.
pub fn aggregate(document: &Document, segments: &[Segment], mode: OutputMode) -> OutputRecords {
    match mode {
        OutputMode::PerSegment => OutputRecords::PerSegment(aggregate_segments(document, segments)),
        OutputMode::PerCharacter => {
            OutputRecords::PerCharacter(aggregate_characters(document, segments))
        }
    }
}

/// One record per segment, empty ones included, attribution unsplit
pub fn aggregate_segments(document: &Document, segments: &[Segment]) -> Vec<SegmentRecord> {
    segments
        .iter()
        .map(|segment| SegmentRecord {
            saga: document.saga.clone(),
            song: document.song.clone(),
            speaker_attribution: segment.attribution().to_string(),
            text: segment.text.clone(),
        })
        .collect()
}

/// One record per title-cased speaker, in order of first appearance
///
/// Empty segments are skipped, so a speaker whose segments are all empty
/// gets no record. A segment naming several speakers is credited to each.
pub fn aggregate_characters(document: &Document, segments: &[Segment]) -> Vec<CharacterRecord> {
    let mut order: Vec<(String, Vec<&str>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for segment in segments.iter().filter(|s| !s.is_empty()) {
        for speaker in &segment.speakers {
            let key = title_case(speaker);
            let slot = *index.entry(key.clone()).or_insert_with(|| {
                order.push((key, Vec::new()));
                order.len() - 1
            });
            order[slot].1.push(&segment.text);
        }
    }

    order
        .into_iter()
        .filter(|(_, texts)| !texts.is_empty())
        .map(|(character, texts)| CharacterRecord {
            saga: document.saga.clone(),
            song: document.song.clone(),
            character,
            text: texts.join("\n\n"),
        })
        .collect()
}

/// Title-case a speaker name: a letter is uppercased when it follows a
/// non-letter, lowercased otherwise ("ANTINOUS'S MEN" -> "Antinous'S Men")
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut after_letter = false;

    for c in name.chars() {
        if c.is_alphabetic() {
            if after_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            after_letter = true;
        } else {
            out.push(c);
            after_letter = false;
        }
    }

    out
}
