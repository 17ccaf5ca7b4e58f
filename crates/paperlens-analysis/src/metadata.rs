use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use paperlens_core::Metadata;

use crate::config::AnalysisConfig;
use crate::text_processing::{char_prefix, normalize_whitespace};

/// Lines that are section labels, never titles.
pub(crate) static TITLE_STOP_LINES: &[&str] = &["abstract", "keywords", "index terms", "contents"];

/// Substrings that mark affiliation or contact lines.
pub(crate) static AFFILIATION_MARKERS: &[&str] = &[
    "university",
    "department",
    "institute",
    "email",
    "http",
    "www",
];

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(19\d{2}|20\d{2})\b").unwrap());

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());

/// Line terminators recognized when splitting the leading lines.
const LINE_BREAKS: &[char] = &[
    '\n', '\r', '\u{0B}', '\u{0C}', '\u{1C}', '\u{1D}', '\u{1E}', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Guess title, year and contact emails from the full document text.
///
/// Each guess is independent and total: a miss is an empty string (or an
/// empty list), never an error.
pub fn extract_metadata(text: &str) -> Metadata {
    extract_metadata_with_config(text, &AnalysisConfig::default())
}

/// Config-aware version of [`extract_metadata`].
pub(crate) fn extract_metadata_with_config(text: &str, config: &AnalysisConfig) -> Metadata {
    let metadata = Metadata {
        title: guess_title_with_config(text, config),
        year: guess_year_with_config(text, config),
        emails: guess_emails_with_config(text, config),
    };
    tracing::debug!(
        has_title = !metadata.title.is_empty(),
        year = %metadata.year,
        emails = metadata.emails.len(),
        "extracted metadata"
    );
    metadata
}

/// Guess the paper title from its leading lines.
///
/// Looks at the first 25 non-blank lines, drops section labels, affiliation
/// and contact lines, and lines outside 12..=140 characters, then picks the
/// longest remaining line (the earliest one on ties).
pub fn guess_title(text: &str) -> String {
    guess_title_with_config(text, &AnalysisConfig::default())
}

pub(crate) fn guess_title_with_config(text: &str, config: &AnalysisConfig) -> String {
    let stop_lines: HashSet<String> = config
        .title_stop_lines
        .resolve_words(TITLE_STOP_LINES)
        .into_iter()
        .collect();
    let markers = config.affiliation_markers.resolve_words(AFFILIATION_MARKERS);

    let mut best: Option<(usize, String)> = None;

    let lines = text
        .split(LINE_BREAKS)
        .map(normalize_whitespace)
        .filter(|l| !l.is_empty())
        .take(config.max_title_lines);

    for line in lines {
        if line.contains('@') {
            continue;
        }
        let lower = line.to_lowercase();
        if stop_lines.contains(&lower) {
            continue;
        }
        let len = line.chars().count();
        if len < config.title_min_chars || len > config.title_max_chars {
            continue;
        }
        if markers.iter().any(|m| lower.contains(m.as_str())) {
            continue;
        }
        if best.as_ref().is_none_or(|(best_len, _)| len > *best_len) {
            best = Some((len, line));
        }
    }

    best.map(|(_, line)| line).unwrap_or_default()
}

/// Guess the publication year (1900–2099).
///
/// A year inside the first 3000 characters wins; otherwise the first year
/// anywhere in the text.
pub fn guess_year(text: &str) -> String {
    guess_year_with_config(text, &AnalysisConfig::default())
}

pub(crate) fn guess_year_with_config(text: &str, config: &AnalysisConfig) -> String {
    let head = char_prefix(text, config.year_head_chars);
    YEAR_RE
        .find(head)
        .or_else(|| YEAR_RE.find(text))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Collect contact emails, deduplicated case-insensitively.
///
/// The first spelling of each address is kept and at most 5 are returned.
pub fn guess_emails(text: &str) -> Vec<String> {
    guess_emails_with_config(text, &AnalysisConfig::default())
}

pub(crate) fn guess_emails_with_config(text: &str, config: &AnalysisConfig) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut emails = Vec::new();
    for m in EMAIL_RE.find_iter(text) {
        if emails.len() >= config.max_emails {
            break;
        }
        if seen.insert(m.as_str().to_lowercase()) {
            emails.push(m.as_str().to_string());
        }
    }
    emails
}
