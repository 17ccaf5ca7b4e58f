use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

use crate::config::AnalysisConfig;
use crate::stopwords::is_stop_word;
use crate::text_processing::clean_text_with_config;

/// Generic academic phrases that are never useful as keywords.
pub(crate) static BLACKLIST_PHRASES: &[&str] = &[
    "in order",
    "on the",
    "such as",
    "based on",
    "this study",
    "this paper",
    "paper presents",
    "results show",
    "growing demand",
    "different faculties",
    "educational systems",
    "data collection",
    "data processing",
];

/// Meta/noise tokens; a phrase containing any of them is dropped.
pub(crate) static META_TOKENS: &[&str] = &[
    "abstract",
    "analysis",
    "results",
    "result",
    "paper",
    "study",
    "method",
    "methods",
    "approach",
    "dataset",
    "introduction",
    "conclusion",
    "keywords",
    "index",
    "terms",
];

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());
static DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").unwrap());

/// A scored bigram.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPhrase {
    pub phrase: String,
    pub count: usize,
    pub weight: f64,
}

/// Rank concept-like two-word phrases by TF-IDF salience.
///
/// Text shorter than 200 characters after cleaning yields an empty list.
/// Returned phrases are lowercase, in descending score order, at most
/// `top_k` long, and never substrings of one another.
pub fn rank_keywords(text: &str, top_k: usize) -> Vec<String> {
    rank_keywords_with_config(text, top_k, &AnalysisConfig::default())
}

/// Config-aware version of [`rank_keywords`].
pub(crate) fn rank_keywords_with_config(
    text: &str,
    top_k: usize,
    config: &AnalysisConfig,
) -> Vec<String> {
    let text = clean_text_with_config(text, config);
    if text.chars().count() < config.min_text_chars {
        tracing::debug!(chars = text.chars().count(), "text too short for keywords");
        return Vec::new();
    }

    let tokens = tokenize(&text);
    let scored = score_tokens(&tokens, config.max_features);
    let trigrams: HashSet<String> = tokens.windows(3).map(|w| w.join(" ")).collect();
    let keywords = filter_phrases(&scored, &trigrams, top_k, config);
    tracing::debug!(
        candidates = scored.len(),
        kept = keywords.len(),
        "ranked keywords"
    );
    keywords
}

/// Score every bigram of the text with TF-IDF over a single-document corpus.
///
/// Tokens are lowercase words of two or more word characters with English
/// stop words removed; bigrams join consecutive surviving tokens. The
/// vocabulary keeps the `max_features` most frequent bigrams. Weights are
/// `count * idf`, L2-normalized, where `idf = ln((1 + n) / (1 + df)) + 1`.
/// The result is sorted by descending weight; ties keep first-encounter order.
pub fn score_bigrams(text: &str, max_features: usize) -> Vec<ScoredPhrase> {
    score_tokens(&tokenize(text), max_features)
}

/// Lowercase word tokens with stop words removed.
fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|t| !is_stop_word(t))
        .map(str::to_string)
        .collect()
}

fn score_tokens(tokens: &[String], max_features: usize) -> Vec<ScoredPhrase> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for pair in tokens.windows(2) {
        let phrase = format!("{} {}", pair[0], pair[1]);
        match index.get(&phrase) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(phrase.clone(), counts.len());
                counts.push((phrase, 1));
            }
        }
    }

    // Stable: equal counts keep encounter order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(max_features);

    // One document containing every phrase: df = n = 1
    let n_docs = 1.0_f64;
    let df = 1.0_f64;
    let idf = ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0;

    let raw: Vec<f64> = counts.iter().map(|(_, c)| *c as f64 * idf).collect();
    let norm = raw.iter().map(|w| w * w).sum::<f64>().sqrt();

    let mut scored: Vec<ScoredPhrase> = counts
        .into_iter()
        .zip(raw)
        .map(|((phrase, count), w)| ScoredPhrase {
            phrase,
            count,
            weight: if norm > 0.0 { w / norm } else { 0.0 },
        })
        .collect();
    scored.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    scored
}

/// Apply the keyword filters in order and keep the first `top_k` survivors.
///
/// `trigrams` holds the three-token runs of the text; two bigrams that are
/// the halves of one of them count as near-duplicates.
fn filter_phrases(
    scored: &[ScoredPhrase],
    trigrams: &HashSet<String>,
    top_k: usize,
    config: &AnalysisConfig,
) -> Vec<String> {
    let blacklist: HashSet<String> = config
        .blacklist_phrases
        .resolve_words(BLACKLIST_PHRASES)
        .into_iter()
        .collect();
    let meta: HashSet<String> = config
        .meta_tokens
        .resolve_words(META_TOKENS)
        .into_iter()
        .collect();

    let mut keywords: Vec<String> = Vec::new();
    for candidate in scored {
        if keywords.len() >= top_k {
            break;
        }
        let kw = candidate.phrase.trim().to_lowercase();

        if kw.chars().count() < config.min_keyword_chars {
            continue;
        }
        if DIGIT_RE.is_match(&kw) {
            continue;
        }
        if blacklist.contains(&kw) {
            continue;
        }
        if kw.split_whitespace().any(|t| meta.contains(t)) {
            continue;
        }
        if is_verb_like(&kw) {
            continue;
        }
        if keywords
            .iter()
            .any(|k| k.contains(kw.as_str()) || kw.contains(k.as_str()))
        {
            continue;
        }
        if keywords.iter().any(|k| overlapping_halves(k, &kw, trigrams)) {
            continue;
        }
        keywords.push(kw);
    }
    keywords
}

/// Whether `a` and `b` chain into a trigram that occurs in the text
/// ("neural network" + "network models").
fn overlapping_halves(a: &str, b: &str, trigrams: &HashSet<String>) -> bool {
    let (Some((a_first, a_last)), Some((b_first, b_last))) = (a.split_once(' '), b.split_once(' '))
    else {
        return false;
    };
    (a_last == b_first && trigrams.contains(&format!("{} {}", a, b_last)))
        || (b_last == a_first && trigrams.contains(&format!("{} {}", b, a_last)))
}

/// Phrases with an "-ing"/"-ed" token read as actions, not concepts.
fn is_verb_like(phrase: &str) -> bool {
    phrase
        .split_whitespace()
        .any(|t| t.ends_with("ing") || t.ends_with("ed"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repeat_sentence(s: &str, n: usize) -> String {
        std::iter::repeat_n(s, n).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_short_text_yields_nothing() {
        let text = "a".repeat(150);
        assert!(rank_keywords(&text, 10).is_empty());
        let text = "Graph neural networks for protein folding. ".repeat(3);
        assert!(text.trim().len() < 200);
        assert!(rank_keywords(&text, 10).is_empty());
    }

    #[test]
    fn test_score_bigrams_skips_stop_words() {
        let scored = score_bigrams("the protein of the folding protein structure", 100);
        let phrases: Vec<&str> = scored.iter().map(|s| s.phrase.as_str()).collect();
        assert_eq!(
            phrases,
            vec!["protein folding", "folding protein", "protein structure"]
        );
    }

    #[test]
    fn test_score_bigrams_orders_by_count_then_encounter() {
        let scored = score_bigrams("alpha beta gamma delta gamma delta", 100);
        assert_eq!(scored[0].phrase, "gamma delta");
        assert_eq!(scored[0].count, 2);
        assert_eq!(scored[1].phrase, "alpha beta");
        assert!(scored[0].weight > scored[1].weight);
    }

    #[test]
    fn test_score_bigrams_caps_vocabulary() {
        let scored = score_bigrams("one1 two2 three3 four4 five5", 2);
        assert_eq!(scored.len(), 2);
    }

    #[test]
    fn test_near_duplicates_suppressed() {
        let text = repeat_sentence(
            "Neural network models improve protein structure prediction.",
            6,
        );
        let keywords = rank_keywords(&text, 10);
        let has_nn = keywords.iter().any(|k| k == "neural network");
        let has_nm = keywords.iter().any(|k| k == "network models");
        assert!(has_nn ^ has_nm, "{keywords:?}");
        for (i, a) in keywords.iter().enumerate() {
            for b in keywords.iter().skip(i + 1) {
                assert!(!a.contains(b.as_str()) && !b.contains(a.as_str()));
            }
        }
    }

    #[test]
    fn test_filters_apply() {
        let text = repeat_sentence(
            "Graph kernels compare molecules. This paper presents sparse solvers. \
             Deep learning uses 3d convolution filters. Our dataset contains molecular graphs. Proposed models outperform baselines.",
            4,
        );
        let keywords = rank_keywords(&text, 20);
        for kw in &keywords {
            assert!(kw.chars().count() >= 10, "{kw}");
            assert!(!kw.chars().any(|c| c.is_ascii_digit()), "{kw}");
            assert!(!kw.contains("dataset"), "{kw}");
            assert!(kw.split(' ').all(|t| !t.ends_with("ing") && !t.ends_with("ed")), "{kw}");
            assert_eq!(kw.split(' ').count(), 2);
        }
        assert!(keywords.contains(&"graph kernels".to_string()), "{keywords:?}");
        assert!(!keywords.contains(&"paper presents".to_string()));
    }

    #[test]
    fn test_top_k_respected() {
        let text = repeat_sentence(
            "Sparse attention kernels accelerate transformer inference on mobile hardware accelerators.",
            5,
        );
        assert!(rank_keywords(&text, 2).len() <= 2);
        assert!(rank_keywords(&text, 0).is_empty());
    }

    #[test]
    fn test_custom_blacklist() {
        let text = repeat_sentence("Sparse attention kernels accelerate transformer inference.", 6);
        let config = crate::AnalysisConfigBuilder::new()
            .add_blacklist_phrase("sparse attention".to_string())
            .build()
            .unwrap();
        let keywords = rank_keywords_with_config(&text, 10, &config);
        assert!(!keywords.contains(&"sparse attention".to_string()));
        assert!(rank_keywords(&text, 10).contains(&"sparse attention".to_string()));
    }

    #[test]
    fn test_replaced_blacklist_and_meta_tokens() {
        let text = repeat_sentence(
            "Data collection pipelines scale well. Graph kernels compare molecules. \
             Sparse solvers factor matrices.",
            6,
        );
        let defaults = rank_keywords(&text, 10);
        assert!(!defaults.contains(&"data collection".to_string()), "{defaults:?}");

        let config = crate::AnalysisConfigBuilder::new()
            .set_blacklist_phrases(vec!["sparse solvers".to_string()])
            .set_meta_tokens(vec!["kernels".to_string()])
            .add_meta_token("Molecules".to_string())
            .build()
            .unwrap();
        let keywords = rank_keywords_with_config(&text, 10, &config);
        assert_eq!(keywords[0], "data collection");
        assert!(!keywords.contains(&"sparse solvers".to_string()));
        for kw in &keywords {
            assert!(!kw.contains("kernels") && !kw.contains("molecules"), "{kw}");
        }
    }

    #[test]
    fn test_rank_keywords_deterministic() {
        let text = repeat_sentence("Quantum error correction codes protect logical qubits.", 6);
        assert_eq!(rank_keywords(&text, 5), rank_keywords(&text, 5));
    }
}
