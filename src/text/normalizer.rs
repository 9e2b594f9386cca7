use super::scanner::rewrite_annotations;
use super::speakers::{clean_part, is_collective, leading_name, split_parts, NamedCandidates};

/// Configuration for annotation normalization
#[derive(Debug, Clone)]
pub struct NormalizeConfig {
    /// Expand collective placeholders ("BOTH", "ALL") into the document's
    /// named candidates. When off, a placeholder is kept as a plain name.
    pub expand_collectives: bool,
    /// Also emit placeholder entries stored in the candidate set while
    /// expanding. Reproduces the legacy output where "[BOTH]" could expand
    /// into a list containing "BOTH" itself. Off by default, a deliberate
    /// departure from that legacy output so placeholders never reach a
    /// rewritten annotation.
    pub self_expansion: bool,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            expand_collectives: true,
            self_expansion: false,
        }
    }
}

impl NormalizeConfig {
    /// Context-free normalization: no placeholder expansion
    pub fn without_expansion() -> Self {
        Self {
            expand_collectives: false,
            ..Default::default()
        }
    }
}

/// Normalize the content of one annotation into a canonical speaker string
///
/// Each part is cleaned and uppercased. A collective placeholder appends the
/// whole candidate set (document-wide, not just names seen so far); any
/// other part contributes its leading name, or its full uppercased text when
/// it has none. Names are de-duplicated in first-mention order and joined
/// with ", ". If nothing survives, `inner` is returned unchanged.
pub fn normalize_token(
    inner: &str,
    candidates: &NamedCandidates,
    config: &NormalizeConfig,
) -> String {
    let mut names: Vec<String> = Vec::new();
    let mut push = |name: &str| {
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    };

    for part in split_parts(inner) {
        let Some(cleaned) = clean_part(part) else {
            continue;
        };
        let upper = cleaned.to_uppercase();

        if config.expand_collectives && is_collective(&upper) {
            for name in candidates.iter() {
                if is_collective(name) && !config.self_expansion {
                    continue;
                }
                push(name);
            }
        } else if let Some(name) = leading_name(&upper) {
            push(name);
        } else {
            push(upper.trim());
        }
    }

    if names.is_empty() {
        return inner.to_string();
    }
    names.join(", ")
}

/// Rewrite every annotation of `text` to its canonical speaker string
///
/// Returns the rewritten text and the number of annotations that changed.
pub fn normalize_annotations(
    text: &str,
    candidates: &NamedCandidates,
    config: &NormalizeConfig,
) -> (String, usize) {
    rewrite_annotations(text, |inner| normalize_token(inner, candidates, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(names: &[&str]) -> NamedCandidates {
        names.iter().copied().collect()
    }

    fn normalize(inner: &str, names: &[&str]) -> String {
        normalize_token(inner, &candidates(names), &NormalizeConfig::default())
    }

    #[test]
    fn test_descriptors_are_dropped() {
        assert_eq!(normalize("ODYSSEUS, spoken", &[]), "ODYSSEUS");
        assert_eq!(normalize("HERMES giggles", &[]), "HERMES");
        assert_eq!(normalize("PENELOPE (whispering)", &[]), "PENELOPE");
    }

    #[test]
    fn test_separators_become_commas() {
        assert_eq!(normalize("ODYSSEUS & CIRCE", &[]), "ODYSSEUS, CIRCE");
        assert_eq!(normalize("ZEUS/HERA and ATHENA", &[]), "ZEUS, HERA, ATHENA");
    }

    #[test]
    fn test_duplicates_keep_first_mention() {
        assert_eq!(normalize("ZEUS & HERA & ZEUS", &[]), "ZEUS, HERA");
    }

    #[test]
    fn test_both_expands_to_candidates() {
        assert_eq!(
            normalize("BOTH", &["ODYSSEUS", "PENELOPE"]),
            "ODYSSEUS, PENELOPE"
        );
        assert_eq!(
            normalize("all", &["ODYSSEUS", "PENELOPE"]),
            "all",
            "lowercase 'all' is a descriptor and leaves nothing"
        );
    }

    #[test]
    fn test_expansion_merges_with_explicit_names() {
        assert_eq!(
            normalize("PENELOPE & ALL", &["ODYSSEUS", "PENELOPE", "TELEMACHUS"]),
            "PENELOPE, ODYSSEUS, TELEMACHUS"
        );
    }

    #[test]
    fn test_expansion_skips_stored_placeholders() {
        assert_eq!(
            normalize("BOTH", &["ODYSSEUS", "BOTH", "PENELOPE"]),
            "ODYSSEUS, PENELOPE"
        );
    }

    #[test]
    fn test_default_config_expands_without_self_expansion() {
        let config = NormalizeConfig::default();
        assert!(config.expand_collectives);
        assert!(!config.self_expansion);
        assert!(!NormalizeConfig::without_expansion().expand_collectives);
    }

    #[test]
    fn test_known_quirk_self_expansion() {
        let config = NormalizeConfig {
            self_expansion: true,
            ..Default::default()
        };
        let names = candidates(&["ODYSSEUS", "PENELOPE", "BOTH"]);
        assert_eq!(
            normalize_token("BOTH", &names, &config),
            "ODYSSEUS, PENELOPE, BOTH"
        );
    }

    #[test]
    fn test_unresolvable_placeholder_falls_back() {
        assert_eq!(normalize("BOTH", &[]), "BOTH");
        assert_eq!(normalize(" BOTH ", &["BOTH"]), " BOTH ");
    }

    #[test]
    fn test_empty_result_returns_inner_untouched() {
        assert_eq!(normalize(" (laughs) ", &["ZEUS"]), " (laughs) ");
        assert_eq!(normalize("spoken", &["ZEUS"]), "spoken");
    }

    #[test]
    fn test_fallback_keeps_unmatched_text() {
        assert_eq!(normalize("#CHORUS", &[]), "#CHORUS");
    }

    #[test]
    fn test_mixed_case_is_uppercased_before_matching() {
        assert_eq!(normalize("Odysseus", &[]), "ODYSSEUS");
    }

    #[test]
    fn test_without_expansion_keeps_placeholder() {
        let names = candidates(&["ODYSSEUS", "PENELOPE"]);
        let config = NormalizeConfig::without_expansion();
        assert_eq!(normalize_token("BOTH", &names, &config), "BOTH");
        assert_eq!(
            normalize_token("ODYSSEUS & CIRCE", &names, &config),
            "ODYSSEUS, CIRCE"
        );
    }

    #[test]
    fn test_normalize_annotations_rewrites_text() {
        let text = "[ODYSSEUS, spoken] Hello\n[HERMES giggles] Hi there\n";
        let names = candidates(&["ODYSSEUS", "HERMES"]);
        let (rewritten, changed) =
            normalize_annotations(text, &names, &NormalizeConfig::default());
        assert_eq!(rewritten, "[ODYSSEUS] Hello\n[HERMES] Hi there\n");
        assert_eq!(changed, 2);
    }
}
