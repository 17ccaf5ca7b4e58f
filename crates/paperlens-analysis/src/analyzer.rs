use paperlens_core::{AnalysisReport, Metadata, ReportStats, SectionKind, SectionMap};

use crate::config::AnalysisConfig;
use crate::{keywords, metadata, section, summary};

/// A configurable document analysis pipeline.
///
/// Holds an [`AnalysisConfig`] and exposes each stage as a method.
/// The default constructor uses built-in defaults; use [`Analyzer::with_config`]
/// to supply custom patterns and thresholds.
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    /// Create an analyzer with default configuration.
    pub fn new() -> Self {
        Self {
            config: AnalysisConfig::default(),
        }
    }

    /// Create an analyzer with a custom configuration.
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the current config.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Split text into named sections.
    pub fn segment(&self, text: &str) -> SectionMap {
        section::segment_with_config(text, &self.config)
    }

    /// Guess title, year and emails.
    pub fn extract_metadata(&self, text: &str) -> Metadata {
        metadata::extract_metadata_with_config(text, &self.config)
    }

    /// Rank up to `top_k` keyword phrases.
    pub fn rank_keywords(&self, text: &str, top_k: usize) -> Vec<String> {
        keywords::rank_keywords_with_config(text, top_k, &self.config)
    }

    /// Summarize in `sentence_count` sentences.
    pub fn summarize(&self, text: &str, sentence_count: usize) -> String {
        summary::summarize_with_config(text, sentence_count, &self.config)
    }

    /// Run the full pipeline on already-extracted text.
    ///
    /// Keywords and summary are computed on the abstract section when one was
    /// detected, and on the whole text otherwise. The abstract is passed with
    /// its heading line so the summarizer anchors its window on it rather than
    /// on a later "abstract" in the prose. `source` is carried into the report
    /// unchanged.
    pub fn analyze(&self, text: &str, source: &str) -> AnalysisReport {
        let sections = self.segment(text);
        let metadata = self.extract_metadata(text);

        let focus = match sections.get(SectionKind::Abstract) {
            Some(section) => {
                tracing::debug!(range = ?section.span, "analyzing abstract section");
                &text[section.span.clone()]
            }
            None => text,
        };
        let keywords = self.rank_keywords(focus, self.config.top_k);
        let summary = self.summarize(focus, self.config.summary_sentences);

        let stats = ReportStats {
            text_length_chars: text.chars().count(),
            num_sections_detected: sections.len(),
            num_keywords: keywords.len(),
        };

        tracing::debug!(
            source,
            chars = stats.text_length_chars,
            sections = stats.num_sections_detected,
            keywords = stats.num_keywords,
            "analysis complete"
        );

        AnalysisReport {
            source: source.to_string(),
            stats,
            metadata,
            keywords,
            summary,
            sections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_without_abstract_uses_whole_text() {
        let text = "Plain notes about sparse matrices and solvers. ".repeat(10);
        let report = Analyzer::new().analyze(&text, "notes.txt");
        assert_eq!(report.source, "notes.txt");
        assert!(report.sections.is_empty());
        assert_eq!(report.stats.num_sections_detected, 0);
        assert_eq!(report.stats.text_length_chars, text.chars().count());
        assert_eq!(report.stats.num_keywords, report.keywords.len());
        assert!(report.keywords.contains(&"sparse matrices".to_string()));
        assert!(!report.summary.is_empty());
    }

    #[test]
    fn test_analyze_respects_configured_counts() {
        let config = crate::AnalysisConfigBuilder::new()
            .top_k(1)
            .summary_sentences(1)
            .build()
            .unwrap();
        let text = "Graph kernels compare molecules at scale. Sparse solvers finish quickly. "
            .repeat(6);
        let report = Analyzer::with_config(config).analyze(&text, "x");
        assert_eq!(report.keywords.len(), 1);
        assert_eq!(crate::sentences::split_sentences(&report.summary).len(), 1);
    }

    #[test]
    fn test_analyze_empty_text() {
        let report = Analyzer::new().analyze("", "empty");
        assert!(report.keywords.is_empty());
        assert_eq!(report.summary, "");
        assert_eq!(report.metadata, Metadata::default());
    }
}
