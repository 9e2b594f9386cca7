use std::sync::LazyLock;

use regex::Regex;

use crate::models::Annotation;

/// `[` + one or more non-`]` characters + `]`
static ANNOTATION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]").expect("Invalid annotation regex"));

/// Find every bracketed annotation, left to right, non-overlapping
///
/// An opening bracket with no closing bracket after it yields nothing and
/// stays ordinary text, as does an empty `[]`.
pub fn scan_annotations(text: &str) -> Vec<Annotation> {
    ANNOTATION_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|inner| Annotation {
            inner: inner.as_str().to_string(),
            start: inner.start(),
            end: inner.end(),
        })
        .collect()
}

/// Replace the content of every annotation with `rewrite(inner)`
///
/// Returns the new text and how many annotations actually changed.
pub fn rewrite_annotations<F>(text: &str, mut rewrite: F) -> (String, usize)
where
    F: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(text.len());
    let mut changed = 0usize;
    let mut cursor = 0usize;

    for annotation in scan_annotations(text) {
        let replacement = rewrite(&annotation.inner);
        if replacement != annotation.inner {
            changed += 1;
        }
        out.push_str(&text[cursor..annotation.outer_start()]);
        out.push('[');
        out.push_str(&replacement);
        out.push(']');
        cursor = annotation.outer_end();
    }
    out.push_str(&text[cursor..]);

    (out, changed)
}
