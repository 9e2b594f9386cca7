use std::sync::LazyLock;

use regex::Regex;

/// Two or more spaces/tabs inside a line
static HORIZONTAL_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]{2,}").expect("Invalid horizontal whitespace regex"));

/// Three or more newlines in a row
static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("Invalid blank line regex"));

/// Canonicalize line endings and spacing of a transcript
///
/// Applied in order:
/// 1. `\r\n` and lone `\r` become `\n`
/// 2. Trailing whitespace is stripped from every line
/// 3. Runs of spaces/tabs inside a line collapse to one space
/// 4. Three or more consecutive newlines collapse to two (one blank line)
/// 5. The document is trimmed and ends with exactly one newline
///
/// Total over any input; empty text yields `"\n"`. Idempotent.
pub fn clean_whitespace(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");

    let lines: Vec<String> = text
        .split('\n')
        .map(|line| HORIZONTAL_RUN.replace_all(line.trim_end(), " ").into_owned())
        .collect();
    let joined = lines.join("\n");

    let collapsed = BLANK_RUN.replace_all(&joined, "\n\n");

    let mut out = collapsed.trim().to_string();
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_endings() {
        assert_eq!(clean_whitespace("a\r\nb\rc"), "a\nb\nc\n");
    }

    #[test]
    fn test_trailing_and_inner_spaces() {
        assert_eq!(
            clean_whitespace("[ZEUS]   Bow \t to me   \nnow\t\t"),
            "[ZEUS] Bow to me\nnow\n"
        );
    }

    #[test]
    fn test_blank_runs_collapse() {
        assert_eq!(clean_whitespace("a\n\n\n\n\nb"), "a\n\nb\n");
        assert_eq!(clean_whitespace("a\n\nb"), "a\n\nb\n");
        assert_eq!(clean_whitespace("a\n  \n \n\nb"), "a\n\nb\n");
    }

    #[test]
    fn test_trim_document() {
        assert_eq!(clean_whitespace("\n\n  hello  \n\n"), "hello\n");
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(clean_whitespace(""), "\n");
        assert_eq!(clean_whitespace(" \r\n\t "), "\n");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "",
            "[ODYSSEUS]  Hold  on\r\n\r\n\r\n\r\n[CREW]\tAye  ",
            "  leading\n\n\n\ntrailing   \n\n",
            "one line",
        ];
        for input in inputs {
            let once = clean_whitespace(input);
            assert_eq!(clean_whitespace(&once), once);
        }
    }
}
