use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::AnalysisConfig;
use crate::sentences::{sentence_words, split_sentences};
use crate::text_processing::{char_prefix, clean_text_with_config};
use crate::textrank::TextRank;

/// Markers that end the abstract window.
pub(crate) static ABSTRACT_STOP_MARKERS: &[&str] = &[
    "introduction",
    "1 introduction",
    "keywords",
    "index terms",
    "contents",
];

static ABSTRACT_LABEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^abstract\s+").unwrap());

/// Produce an extractive summary of `sentence_count` sentences.
///
/// Text shorter than 200 characters after cleaning is returned as is. The
/// selected sentences keep their original order and are joined by single
/// spaces.
pub fn summarize(text: &str, sentence_count: usize) -> String {
    summarize_with_config(text, sentence_count, &AnalysisConfig::default())
}

/// Config-aware version of [`summarize`].
pub(crate) fn summarize_with_config(
    text: &str,
    sentence_count: usize,
    config: &AnalysisConfig,
) -> String {
    let text = clean_text_with_config(text, config);
    if text.chars().count() < config.min_text_chars {
        return text;
    }
    if sentence_count == 0 {
        return String::new();
    }

    let window = select_window_with_config(&text, config);
    let window = ABSTRACT_LABEL_RE.replace(window, "");

    let sentences = split_sentences(&window);
    let words: Vec<Vec<String>> = sentences.iter().map(|s| sentence_words(s)).collect();
    let scores = TextRank::new()
        .with_damping(config.damping)
        .with_threshold(config.convergence_threshold)
        .with_max_iterations(config.max_iterations)
        .rank(&words);

    let mut order: Vec<usize> = (0..sentences.len()).collect();
    // Stable: equal scores keep the earlier sentence first
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    order.truncate(sentence_count);
    order.sort_unstable();

    tracing::debug!(
        sentences = sentences.len(),
        selected = order.len(),
        "summarized"
    );

    order
        .into_iter()
        .map(|i| sentences[i])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pick the part of the cleaned text to summarize.
///
/// Starting at the first "abstract" (any case), up to 5000 characters are
/// taken and cut at the earliest stop marker found more than 50 characters
/// in. If that leaves fewer than 200 characters (or there is no
/// "abstract"), the first 4000 characters of the text are used instead.
pub fn select_window(text: &str) -> &str {
    select_window_with_config(text, &AnalysisConfig::default())
}

pub(crate) fn select_window_with_config<'a>(text: &'a str, config: &AnalysisConfig) -> &'a str {
    if let Some(window) = abstract_window(text, config)
        && window.chars().count() >= config.min_text_chars
    {
        tracing::debug!(chars = window.chars().count(), "using abstract window");
        return window;
    }
    tracing::debug!("no usable abstract window, using text prefix");
    char_prefix(text, config.fallback_window_chars)
}

fn abstract_window<'a>(text: &'a str, config: &AnalysisConfig) -> Option<&'a str> {
    // ASCII lowercasing keeps byte offsets aligned with `text`
    let start = text.to_ascii_lowercase().find("abstract")?;
    let chunk = char_prefix(&text[start..], config.abstract_window_chars);
    let lower = chunk.to_ascii_lowercase();

    let markers = config
        .abstract_stop_markers
        .resolve_words(ABSTRACT_STOP_MARKERS);
    let cut = markers
        .iter()
        .filter_map(|marker| lower.find(marker.as_str()))
        .filter(|&pos| chunk[..pos].chars().count() > config.min_stop_marker_offset)
        .min();

    let window = match cut {
        Some(pos) => &chunk[..pos],
        None => chunk,
    };
    Some(window.trim())
}
