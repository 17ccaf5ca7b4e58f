use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Abbreviations whose trailing period never ends a sentence.
static ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "vs", "eg", "ie", "cf", "fig", "figs", "eq", "eqs", "sec", "ch", "pt", "no", "al", "dr",
        "mr", "mrs", "ms", "prof", "approx", "ref", "refs", "resp", "vol", "pp", "st",
    ]
    .into_iter()
    .collect()
});

static BOUNDARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[.!?]+["'\u{201d}\u{2019})\]]*\s+"#).unwrap());

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\W\d_](?:[^\W\d_]|['-])*").unwrap());

/// Split text into sentences.
///
/// A boundary is terminal punctuation followed by whitespace and a
/// non-lowercase character. Periods after known abbreviations ("e.g.",
/// "Fig.", "et al.") and single-letter initials do not split.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in BOUNDARY_RE.find_iter(text) {
        let Some(next) = text[m.end()..].chars().next() else {
            break;
        };
        if next.is_lowercase() {
            continue;
        }
        if m.as_str().starts_with('.') && is_abbreviation(&text[start..m.start()]) {
            continue;
        }
        let sentence = text[start..m.end()].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
        start = m.end();
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }
    sentences
}

/// Whether the last token before a period is an abbreviation or an initial.
fn is_abbreviation(before: &str) -> bool {
    let Some(token) = before.split_whitespace().last() else {
        return false;
    };
    let token: String = token
        .trim_start_matches(['(', '[', '"', '\''])
        .chars()
        .filter(|c| *c != '.')
        .collect::<String>()
        .to_lowercase();
    let mut chars = token.chars();
    let single_letter = matches!(
        (chars.next(), chars.next()),
        (Some(c), None) if c.is_alphabetic()
    );
    single_letter || ABBREVIATIONS.contains(token.as_str())
}

/// Lowercase words of a sentence; numbers and punctuation are dropped.
pub fn sentence_words(sentence: &str) -> Vec<String> {
    WORD_RE
        .find_iter(sentence)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_basic() {
        let s = split_sentences("First one. Second one! Third one? Fourth");
        assert_eq!(s, vec!["First one.", "Second one!", "Third one?", "Fourth"]);
    }

    #[test]
    fn test_split_skips_abbreviations_and_initials() {
        let s = split_sentences(
            "Prior work (e.g. Smith et al. 2020) is slow. See Fig. 3 for details. J. Doe agrees.",
        );
        assert_eq!(
            s,
            vec![
                "Prior work (e.g. Smith et al. 2020) is slow.",
                "See Fig. 3 for details.",
                "J. Doe agrees."
            ]
        );
    }

    #[test]
    fn test_split_keeps_decimals_and_lowercase_continuations() {
        let s = split_sentences("Accuracy rose to 93.5 percent. the end was near. New line.");
        assert_eq!(s, vec!["Accuracy rose to 93.5 percent. the end was near.", "New line."]);
    }

    #[test]
    fn test_split_closing_quote() {
        let s = split_sentences("He said \"stop.\" Then left.");
        assert_eq!(s, vec!["He said \"stop.\"", "Then left."]);
    }

    #[test]
    fn test_split_empty() {
        assert!(split_sentences("   ").is_empty());
    }

    #[test]
    fn test_sentence_words() {
        assert_eq!(
            sentence_words("The 3 state-of-the-art models, don't fail."),
            vec!["the", "state-of-the-art", "models", "don't", "fail"]
        );
    }
}
