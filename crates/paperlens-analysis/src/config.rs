use paperlens_core::SectionKind;
use regex::Regex;

/// Controls how a list of patterns/values is overridden from its defaults.
#[derive(Debug, Clone, Default)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }
}

impl ListOverride<String> {
    /// Resolve against a static word list, lowercasing every entry.
    pub(crate) fn resolve_words(&self, defaults: &[&str]) -> Vec<String> {
        let defaults: Vec<String> = defaults.iter().map(|s| s.to_string()).collect();
        self.resolve(&defaults)
            .into_iter()
            .map(|s| s.trim().to_lowercase())
            .collect()
    }
}

/// Configuration for the analysis pipeline.
///
/// The defaults are the stock heuristics; every knob exists
/// so callers can tune a heuristic without forking it.
/// Use [`AnalysisConfigBuilder`] to construct with string patterns.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    // ── section.rs ──
    /// Per-section heading regexes replacing the built-in table entries.
    pub(crate) heading_overrides: Vec<(SectionKind, Regex)>,

    // ── metadata.rs ──
    /// Number of non-blank leading lines considered for the title (default: 25).
    pub(crate) max_title_lines: usize,
    /// Inclusive character-length bounds for a title candidate (default: 12..=140).
    pub(crate) title_min_chars: usize,
    pub(crate) title_max_chars: usize,
    /// Lines that can never be a title when matched exactly (case-insensitive).
    pub(crate) title_stop_lines: ListOverride<String>,
    /// Substrings marking affiliation/contact lines.
    pub(crate) affiliation_markers: ListOverride<String>,
    /// Leading window (in chars) in which a year is preferred (default: 3000).
    pub(crate) year_head_chars: usize,
    /// Maximum number of emails kept (default: 5).
    pub(crate) max_emails: usize,

    // ── text_processing.rs ──
    /// Keep hyphens in front of known compound suffixes ("data- driven").
    pub(crate) preserve_compound_hyphens: bool,
    /// Compound-word suffixes used when `preserve_compound_hyphens` is set.
    pub(crate) compound_suffixes: ListOverride<String>,

    // ── keywords.rs ──
    /// Cleaned texts shorter than this (in chars) yield no keywords / no summary.
    pub(crate) min_text_chars: usize,
    /// Maximum number of distinct bigrams scored (default: 6000).
    pub(crate) max_features: usize,
    /// Minimum keyword length in chars (default: 10).
    pub(crate) min_keyword_chars: usize,
    /// Generic academic phrases never reported as keywords.
    pub(crate) blacklist_phrases: ListOverride<String>,
    /// Tokens that disqualify a phrase (meta/noise words).
    pub(crate) meta_tokens: ListOverride<String>,

    // ── summary.rs ──
    /// Characters taken from the "abstract" marker onwards (default: 5000).
    pub(crate) abstract_window_chars: usize,
    /// Prefix length used when no usable abstract is found (default: 4000).
    pub(crate) fallback_window_chars: usize,
    /// Markers that end the abstract window.
    pub(crate) abstract_stop_markers: ListOverride<String>,
    /// A stop marker only counts past this many chars into the window (default: 50).
    pub(crate) min_stop_marker_offset: usize,
    /// TextRank damping factor (default: 0.85).
    pub(crate) damping: f64,
    /// Power-iteration convergence threshold (default: 1e-4).
    pub(crate) convergence_threshold: f64,
    /// Upper bound on power iterations (default: 500).
    pub(crate) max_iterations: usize,

    // ── analyzer.rs ──
    /// Keywords kept by [`crate::Analyzer::analyze`] (default: 12).
    pub(crate) top_k: usize,
    /// Summary sentences produced by [`crate::Analyzer::analyze`] (default: 4).
    pub(crate) summary_sentences: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            heading_overrides: Vec::new(),
            max_title_lines: 25,
            title_min_chars: 12,
            title_max_chars: 140,
            title_stop_lines: ListOverride::Default,
            affiliation_markers: ListOverride::Default,
            year_head_chars: 3000,
            max_emails: 5,
            preserve_compound_hyphens: false,
            compound_suffixes: ListOverride::Default,
            min_text_chars: 200,
            max_features: 6000,
            min_keyword_chars: 10,
            blacklist_phrases: ListOverride::Default,
            meta_tokens: ListOverride::Default,
            abstract_window_chars: 5000,
            fallback_window_chars: 4000,
            abstract_stop_markers: ListOverride::Default,
            min_stop_marker_offset: 50,
            damping: 0.85,
            convergence_threshold: 1e-4,
            max_iterations: 500,
            top_k: 12,
            summary_sentences: 4,
        }
    }
}

impl AnalysisConfig {
    /// Keyword count used by the full pipeline.
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Summary length (in sentences) used by the full pipeline.
    pub fn summary_sentences(&self) -> usize {
        self.summary_sentences
    }

    pub(crate) fn heading_override(&self, kind: SectionKind) -> Option<&Regex> {
        self.heading_overrides
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, re)| re)
    }
}

/// Builder for [`AnalysisConfig`].
///
/// Accepts string patterns that are compiled to `Regex` in [`build()`](Self::build).
/// Fails fast with `regex::Error` if any pattern is invalid.
#[derive(Debug, Clone, Default)]
pub struct AnalysisConfigBuilder {
    heading_overrides: Vec<(SectionKind, String)>,
    max_title_lines: Option<usize>,
    title_length_range: Option<(usize, usize)>,
    title_stop_lines: ListOverride<String>,
    affiliation_markers: ListOverride<String>,
    year_head_chars: Option<usize>,
    max_emails: Option<usize>,
    preserve_compound_hyphens: Option<bool>,
    compound_suffixes: ListOverride<String>,
    min_text_chars: Option<usize>,
    max_features: Option<usize>,
    min_keyword_chars: Option<usize>,
    blacklist_phrases: ListOverride<String>,
    meta_tokens: ListOverride<String>,
    abstract_window_chars: Option<usize>,
    fallback_window_chars: Option<usize>,
    abstract_stop_markers: ListOverride<String>,
    min_stop_marker_offset: Option<usize>,
    damping: Option<f64>,
    convergence_threshold: Option<f64>,
    max_iterations: Option<usize>,
    top_k: Option<usize>,
    summary_sentences: Option<usize>,
}

fn push_extend(list: &mut ListOverride<String>, value: String) {
    match list {
        ListOverride::Extend(v) | ListOverride::Replace(v) => v.push(value),
        ListOverride::Default => *list = ListOverride::Extend(vec![value]),
    }
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Sections ──

    /// Replace the heading regex for one section kind. The pattern is used
    /// as-is, so it should carry its own `(?im)` flags and line anchors.
    pub fn section_heading_regex(mut self, kind: SectionKind, pattern: &str) -> Self {
        self.heading_overrides.retain(|(k, _)| *k != kind);
        self.heading_overrides.push((kind, pattern.to_string()));
        self
    }

    // ── Metadata ──

    pub fn max_title_lines(mut self, n: usize) -> Self {
        self.max_title_lines = Some(n);
        self
    }

    pub fn title_length_range(mut self, min: usize, max: usize) -> Self {
        self.title_length_range = Some((min, max));
        self
    }

    pub fn set_title_stop_lines(mut self, lines: Vec<String>) -> Self {
        self.title_stop_lines = ListOverride::Replace(lines);
        self
    }

    pub fn add_affiliation_marker(mut self, marker: String) -> Self {
        push_extend(&mut self.affiliation_markers, marker);
        self
    }

    pub fn year_head_chars(mut self, n: usize) -> Self {
        self.year_head_chars = Some(n);
        self
    }

    pub fn max_emails(mut self, n: usize) -> Self {
        self.max_emails = Some(n);
        self
    }

    // ── Hyphenation ──

    pub fn preserve_compound_hyphens(mut self, preserve: bool) -> Self {
        self.preserve_compound_hyphens = Some(preserve);
        self
    }

    pub fn set_compound_suffixes(mut self, suffixes: Vec<String>) -> Self {
        self.compound_suffixes = ListOverride::Replace(suffixes);
        self
    }

    pub fn add_compound_suffix(mut self, suffix: String) -> Self {
        push_extend(&mut self.compound_suffixes, suffix);
        self
    }

    // ── Keywords ──

    pub fn min_text_chars(mut self, n: usize) -> Self {
        self.min_text_chars = Some(n);
        self
    }

    pub fn max_features(mut self, n: usize) -> Self {
        self.max_features = Some(n);
        self
    }

    pub fn min_keyword_chars(mut self, n: usize) -> Self {
        self.min_keyword_chars = Some(n);
        self
    }

    pub fn set_blacklist_phrases(mut self, phrases: Vec<String>) -> Self {
        self.blacklist_phrases = ListOverride::Replace(phrases);
        self
    }

    pub fn add_blacklist_phrase(mut self, phrase: String) -> Self {
        push_extend(&mut self.blacklist_phrases, phrase);
        self
    }

    pub fn set_meta_tokens(mut self, tokens: Vec<String>) -> Self {
        self.meta_tokens = ListOverride::Replace(tokens);
        self
    }

    pub fn add_meta_token(mut self, token: String) -> Self {
        push_extend(&mut self.meta_tokens, token);
        self
    }

    // ── Summary ──

    pub fn abstract_window_chars(mut self, n: usize) -> Self {
        self.abstract_window_chars = Some(n);
        self
    }

    pub fn fallback_window_chars(mut self, n: usize) -> Self {
        self.fallback_window_chars = Some(n);
        self
    }

    pub fn add_abstract_stop_marker(mut self, marker: String) -> Self {
        push_extend(&mut self.abstract_stop_markers, marker);
        self
    }

    pub fn min_stop_marker_offset(mut self, n: usize) -> Self {
        self.min_stop_marker_offset = Some(n);
        self
    }

    pub fn damping(mut self, damping: f64) -> Self {
        self.damping = Some(damping);
        self
    }

    pub fn convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = Some(threshold);
        self
    }

    pub fn max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = Some(n);
        self
    }

    // ── Pipeline ──

    pub fn top_k(mut self, n: usize) -> Self {
        self.top_k = Some(n);
        self
    }

    pub fn summary_sentences(mut self, n: usize) -> Self {
        self.summary_sentences = Some(n);
        self
    }

    /// Compile all string patterns into regexes and produce an [`AnalysisConfig`].
    pub fn build(self) -> Result<AnalysisConfig, regex::Error> {
        let heading_overrides = self
            .heading_overrides
            .into_iter()
            .map(|(kind, pattern)| Regex::new(&pattern).map(|re| (kind, re)))
            .collect::<Result<Vec<_>, _>>()?;

        let defaults = AnalysisConfig::default();
        let (title_min_chars, title_max_chars) = self
            .title_length_range
            .unwrap_or((defaults.title_min_chars, defaults.title_max_chars));

        Ok(AnalysisConfig {
            heading_overrides,
            max_title_lines: self.max_title_lines.unwrap_or(defaults.max_title_lines),
            title_min_chars,
            title_max_chars,
            title_stop_lines: self.title_stop_lines,
            affiliation_markers: self.affiliation_markers,
            year_head_chars: self.year_head_chars.unwrap_or(defaults.year_head_chars),
            max_emails: self.max_emails.unwrap_or(defaults.max_emails),
            preserve_compound_hyphens: self
                .preserve_compound_hyphens
                .unwrap_or(defaults.preserve_compound_hyphens),
            compound_suffixes: self.compound_suffixes,
            min_text_chars: self.min_text_chars.unwrap_or(defaults.min_text_chars),
            max_features: self.max_features.unwrap_or(defaults.max_features),
            min_keyword_chars: self.min_keyword_chars.unwrap_or(defaults.min_keyword_chars),
            blacklist_phrases: self.blacklist_phrases,
            meta_tokens: self.meta_tokens,
            abstract_window_chars: self
                .abstract_window_chars
                .unwrap_or(defaults.abstract_window_chars),
            fallback_window_chars: self
                .fallback_window_chars
                .unwrap_or(defaults.fallback_window_chars),
            abstract_stop_markers: self.abstract_stop_markers,
            min_stop_marker_offset: self
                .min_stop_marker_offset
                .unwrap_or(defaults.min_stop_marker_offset),
            damping: self.damping.unwrap_or(defaults.damping),
            convergence_threshold: self
                .convergence_threshold
                .unwrap_or(defaults.convergence_threshold),
            max_iterations: self.max_iterations.unwrap_or(defaults.max_iterations),
            top_k: self.top_k.unwrap_or(defaults.top_k),
            summary_sentences: self.summary_sentences.unwrap_or(defaults.summary_sentences),
        })
    }
}
