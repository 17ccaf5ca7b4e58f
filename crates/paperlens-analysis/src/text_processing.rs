use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::config::AnalysisConfig;

/// Common compound-word suffixes that should keep the hyphen when
/// compound preservation is enabled.
pub(crate) static COMPOUND_SUFFIXES: &[&str] = &[
    "centered",
    "based",
    "driven",
    "aware",
    "oriented",
    "specific",
    "related",
    "dependent",
    "independent",
    "like",
    "free",
    "friendly",
    "rich",
    "poor",
    "scale",
    "level",
    "order",
    "class",
    "type",
    "style",
    "wise",
    "fold",
    "shot",
    "step",
    "time",
    "world",
    "source",
    "domain",
    "task",
    "modal",
    "intensive",
    "efficient",
    "agnostic",
    "invariant",
    "sensitive",
    "grained",
];

static HYPHEN_BREAK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w)-\s+(\w)").unwrap());
static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Expand common typographic ligatures found in PDFs.
pub fn expand_ligatures(text: &str) -> String {
    text.replace('\u{FB00}', "ff")
        .replace('\u{FB01}', "fi")
        .replace('\u{FB02}', "fl")
        .replace('\u{FB03}', "ffi")
        .replace('\u{FB04}', "ffl")
        .replace(['\u{FB05}', '\u{FB06}'], "st")
}

/// Join words split by PDF line-break hyphenation.
///
/// `"educa- tional"` and `"educa-\ntional"` both become `"educational"`.
pub fn fix_hyphenation(text: &str) -> String {
    HYPHEN_BREAK_RE.replace_all(text, "${1}${2}").into_owned()
}

/// Like [`fix_hyphenation`], but keeps the hyphen when the continuation is a
/// known compound suffix: `"data- driven"` → `"data-driven"`.
pub fn fix_hyphenation_preserving_compounds(text: &str, suffixes: &[String]) -> String {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w)-\s+(\w)(\w*)").unwrap());

    let suffix_set: HashSet<String> = suffixes.iter().map(|s| s.to_lowercase()).collect();

    RE.replace_all(text, |caps: &regex::Captures| {
        let before = &caps[1];
        let after_word = format!("{}{}", &caps[2], &caps[3]);

        // Digits before the hyphen mark product/model names ("GPT-4- turbo")
        if before.chars().last().is_some_and(|c| c.is_ascii_digit()) {
            return format!("{}-{}", before, after_word);
        }

        if suffix_set.contains(&after_word.to_lowercase()) {
            return format!("{}-{}", before, after_word);
        }

        format!("{}{}", before, after_word)
    })
    .into_owned()
}

/// Collapse every whitespace run to a single space and trim.
pub fn normalize_whitespace(text: &str) -> String {
    WS_RE.replace_all(text, " ").trim().to_string()
}

/// Hyphenation repair followed by whitespace normalization.
///
/// This is the shared preprocessing step of the keyword ranker and the
/// summarizer.
pub fn clean_text(text: &str) -> String {
    clean_text_with_config(text, &AnalysisConfig::default())
}

/// Config-aware version of [`clean_text`].
pub(crate) fn clean_text_with_config(text: &str, config: &AnalysisConfig) -> String {
    let joined = if config.preserve_compound_hyphens {
        let suffixes = config.compound_suffixes.resolve_words(COMPOUND_SUFFIXES);
        fix_hyphenation_preserving_compounds(text, &suffixes)
    } else {
        fix_hyphenation(text)
    };
    normalize_whitespace(&joined)
}

/// The longest prefix of `text` holding at most `max_chars` characters.
pub fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_ligatures() {
        assert_eq!(expand_ligatures("ﬁnding ﬂow"), "finding flow");
        assert_eq!(expand_ligatures("eﬃcient oﬄine"), "efficient offline");
        assert_eq!(expand_ligatures("no ligatures here"), "no ligatures here");
    }

    #[test]
    fn test_fix_hyphenation_syllable_break() {
        assert_eq!(fix_hyphenation("educa- tional"), "educational");
        assert_eq!(fix_hyphenation("detec-\ntion"), "detection");
        assert_eq!(fix_hyphenation("classi- fication"), "classification");
    }

    #[test]
    fn test_fix_hyphenation_leaves_real_hyphens() {
        assert_eq!(fix_hyphenation("state-of-the-art"), "state-of-the-art");
        assert_eq!(fix_hyphenation("pre -trained"), "pre -trained");
    }

    #[test]
    fn test_fix_hyphenation_joins_compounds_by_default() {
        assert_eq!(fix_hyphenation("data- driven"), "datadriven");
    }

    #[test]
    fn test_fix_hyphenation_preserving_compounds() {
        let suffixes: Vec<String> = COMPOUND_SUFFIXES.iter().map(|s| s.to_string()).collect();
        let input = "We use a human- centered approach for detec- tion of data- driven models.";
        let expected = "We use a human-centered approach for detection of data-driven models.";
        assert_eq!(fix_hyphenation_preserving_compounds(input, &suffixes), expected);
    }

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(
            clean_text("  Deep\n\nlearn- ing \t models  "),
            "Deep learning models"
        );
    }

    #[test]
    fn test_clean_text_with_compound_config() {
        let config = crate::AnalysisConfigBuilder::new()
            .preserve_compound_hyphens(true)
            .build()
            .unwrap();
        assert_eq!(
            clean_text_with_config("task- agnostic\nencoders", &config),
            "task-agnostic encoders"
        );
    }

    #[test]
    fn test_clean_text_with_replaced_suffixes() {
        let config = crate::AnalysisConfigBuilder::new()
            .preserve_compound_hyphens(true)
            .set_compound_suffixes(vec!["agnostic".to_string()])
            .add_compound_suffix("ready".to_string())
            .build()
            .unwrap();
        assert_eq!(
            clean_text_with_config("task- agnostic data- driven cloud- ready", &config),
            "task-agnostic datadriven cloud-ready"
        );
    }

    #[test]
    fn test_char_prefix() {
        assert_eq!(char_prefix("abcdef", 3), "abc");
        assert_eq!(char_prefix("abc", 10), "abc");
        assert_eq!(char_prefix("äöü", 2), "äö");
        assert_eq!(char_prefix("abc", 0), "");
    }
}
