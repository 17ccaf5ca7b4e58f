//! Heuristic analysis of scientific paper text: section segmentation,
//! metadata guessing, keyword ranking and extractive summarization.
//!
//! Every stage is a pure function of its input text. Degenerate input
//! produces empty values, never errors.

pub mod analyzer;
pub mod config;
pub mod keywords;
pub mod metadata;
pub mod section;
pub mod sentences;
pub mod stopwords;
pub mod summary;
pub mod text_processing;
pub mod textrank;

pub use analyzer::Analyzer;
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ListOverride};
pub use keywords::{ScoredPhrase, score_bigrams};
pub use metadata::{guess_emails, guess_title, guess_year};
pub use sentences::split_sentences;
pub use summary::select_window;
pub use textrank::TextRank;
// Re-export domain types from core (canonical definitions live there)
pub use paperlens_core::{AnalysisReport, Metadata, ReportStats, Section, SectionKind, SectionMap};

/// Split raw document text into named sections.
///
/// See [`section::segment`].
pub fn segment(text: &str) -> SectionMap {
    section::segment(text)
}

/// Guess title, publication year and contact emails.
pub fn extract_metadata(text: &str) -> Metadata {
    metadata::extract_metadata(text)
}

/// Rank up to `top_k` two-word keyword phrases.
pub fn rank_keywords(text: &str, top_k: usize) -> Vec<String> {
    keywords::rank_keywords(text, top_k)
}

/// Extractive summary of `sentence_count` sentences.
pub fn summarize(text: &str, sentence_count: usize) -> String {
    summary::summarize(text, sentence_count)
}

/// Run the whole pipeline with default settings.
///
/// Pipeline:
/// 1. Segment the text into sections
/// 2. Guess metadata from the full text
/// 3. Rank keywords (12) on the abstract section, or the full text without one
/// 4. Summarize (4 sentences) the same focus text
pub fn analyze(text: &str, source: &str) -> AnalysisReport {
    Analyzer::new().analyze(text, source)
}
