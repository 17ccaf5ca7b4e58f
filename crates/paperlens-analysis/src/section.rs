use once_cell::sync::Lazy;
use regex::Regex;

use paperlens_core::{Section, SectionKind, SectionMap};

use crate::config::AnalysisConfig;

/// Heading synonyms per section, as regex alternations.
///
/// Adding a section type or a synonym is a change to this table only.
pub(crate) const HEADING_SYNONYMS: [(SectionKind, &str); 7] = [
    (SectionKind::Abstract, r"abstract"),
    (SectionKind::Introduction, r"introduction"),
    (
        SectionKind::Methods,
        r"methods?|materials\s+and\s+methods?|approach",
    ),
    (SectionKind::Results, r"results?|experiments?"),
    (SectionKind::Discussion, r"discussion"),
    (SectionKind::Conclusion, r"conclusions?"),
    (SectionKind::References, r"references"),
];

/// Build the line-anchored heading regex for one synonym alternation.
///
/// The heading must fill its whole line; an optional section number
/// (`1`, `2.`, `3.1`, `IV.`) may precede it.
fn heading_regex(synonyms: &str) -> Regex {
    let pattern = format!(
        r"(?im)^[ \t]*(?:(?:\d{{1,2}}(?:\.\d{{1,2}})*\.?|[ivx]{{1,4}}\.)[ \t]+)?(?:{})[ \t]*\r?$",
        synonyms
    );
    Regex::new(&pattern).unwrap()
}

static HEADING_TABLE: Lazy<Vec<(SectionKind, Regex)>> = Lazy::new(|| {
    HEADING_SYNONYMS
        .iter()
        .map(|(kind, synonyms)| (*kind, heading_regex(synonyms)))
        .collect()
});

/// A detected heading position.
#[derive(Debug, Clone)]
struct Anchor {
    kind: SectionKind,
    start: usize,
    heading_end: usize,
}

/// Split raw document text into sections.
///
/// Every section in the fixed table is located by its heading line. Only the
/// first heading of each kind becomes a split point. A section spans from its
/// heading to the next detected heading (or the end of the text), and sections
/// come back in the order their headings appear. Text without any recognized
/// heading yields an empty map.
///
/// Heading words standing alone on a line inside prose are indistinguishable
/// from real headings and will split there.
pub fn segment(text: &str) -> SectionMap {
    segment_with_config(text, &AnalysisConfig::default())
}

/// Config-aware version of [`segment`].
pub(crate) fn segment_with_config(text: &str, config: &AnalysisConfig) -> SectionMap {
    let mut anchors: Vec<Anchor> = HEADING_TABLE
        .iter()
        .filter_map(|(kind, default_re)| {
            let re = config.heading_override(*kind).unwrap_or(default_re);
            re.find(text).map(|m| Anchor {
                kind: *kind,
                start: m.start(),
                heading_end: m.end(),
            })
        })
        .collect();

    // Stable: a tie keeps table order
    anchors.sort_by_key(|a| a.start);

    // Overlapping custom patterns could produce nested anchors; keep the first.
    anchors.dedup_by(|next, prev| next.start < prev.heading_end);

    let mut sections = SectionMap::new();
    for (i, anchor) in anchors.iter().enumerate() {
        let end = anchors.get(i + 1).map_or(text.len(), |next| next.start);
        sections.insert(Section {
            kind: anchor.kind,
            heading: text[anchor.start..anchor.heading_end].trim().to_string(),
            body: text[anchor.heading_end..end].trim().to_string(),
            span: anchor.start..end,
        });
    }

    tracing::debug!(
        anchors = anchors.len(),
        sections = ?sections.names(),
        "segmented document"
    );

    sections
}
