use std::fmt;
use std::ops::Range;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

pub mod backend;
pub mod config_file;
pub mod sink;

pub use backend::{DocumentLoader, LoaderError};
pub use sink::{ReportError, ReportSink};

/// The closed set of section names the segmenter recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKind {
    Abstract,
    Introduction,
    Methods,
    Results,
    Discussion,
    Conclusion,
    References,
}

impl SectionKind {
    /// All kinds, in canonical table order.
    pub const ALL: [SectionKind; 7] = [
        SectionKind::Abstract,
        SectionKind::Introduction,
        SectionKind::Methods,
        SectionKind::Results,
        SectionKind::Discussion,
        SectionKind::Conclusion,
        SectionKind::References,
    ];

    /// Lowercase name used as the report key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Abstract => "abstract",
            Self::Introduction => "introduction",
            Self::Methods => "methods",
            Self::Results => "results",
            Self::Discussion => "discussion",
            Self::Conclusion => "conclusion",
            Self::References => "references",
        }
    }

    /// Parse a lowercase section name (as produced by [`SectionKind::as_str`]).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected section of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    /// The heading line as it appears in the source (trimmed).
    pub heading: String,
    /// Text following the heading line up to the next anchor, trimmed.
    pub body: String,
    /// Byte range in the source text: heading start up to the next anchor
    /// (or end of text).
    pub span: Range<usize>,
}

/// Detected sections, ordered by where their anchors appear in the text.
///
/// Holds at most one section per [`SectionKind`]. Serializes as an ordered
/// `name -> body` object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    sections: Vec<Section>,
}

impl SectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a section. Returns `false` (and keeps the existing entry) when a
    /// section of the same kind is already present.
    pub fn insert(&mut self, section: Section) -> bool {
        if self.contains(section.kind) {
            return false;
        }
        self.sections.push(section);
        true
    }

    pub fn get(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// Body text of the section of the given kind, if detected.
    pub fn body(&self, kind: SectionKind) -> Option<&str> {
        self.get(kind).map(|s| s.body.as_str())
    }

    pub fn contains(&self, kind: SectionKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    /// Section names in emission order.
    pub fn names(&self) -> Vec<&'static str> {
        self.sections.iter().map(|s| s.kind.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a SectionMap {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

impl Serialize for SectionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for section in &self.sections {
            map.serialize_entry(section.kind.as_str(), &section.body)?;
        }
        map.end()
    }
}

/// Heuristic bibliographic metadata. Misses are empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: String,
    pub year: String,
    pub emails: Vec<String>,
}

/// Simple counts carried alongside a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportStats {
    /// Length of the analyzed text in characters.
    pub text_length_chars: usize,
    pub num_sections_detected: usize,
    pub num_keywords: usize,
}

/// Everything produced for one document; the unit handed to a [`ReportSink`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Provenance label, e.g. `"File: paper.pdf"`.
    pub source: String,
    pub stats: ReportStats,
    pub metadata: Metadata,
    pub keywords: Vec<String>,
    pub summary: String,
    pub sections: SectionMap,
}

impl AnalysisReport {
    /// Serialize the report as a pretty-printed JSON document.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(kind: SectionKind, body: &str, span: Range<usize>) -> Section {
        Section {
            kind,
            heading: kind.as_str().to_string(),
            body: body.to_string(),
            span,
        }
    }

    #[test]
    fn test_section_kind_names_round_trip() {
        for kind in SectionKind::ALL {
            assert_eq!(SectionKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(SectionKind::from_name(" Results "), Some(SectionKind::Results));
        assert_eq!(SectionKind::from_name("appendix"), None);
    }

    #[test]
    fn test_section_map_keeps_first_of_kind() {
        let mut map = SectionMap::new();
        assert!(map.insert(section(SectionKind::Results, "first", 0..10)));
        assert!(!map.insert(section(SectionKind::Results, "second", 10..20)));
        assert_eq!(map.len(), 1);
        assert_eq!(map.body(SectionKind::Results), Some("first"));
    }

    #[test]
    fn test_section_map_serializes_in_emission_order() {
        let mut map = SectionMap::new();
        map.insert(section(SectionKind::Results, "r", 0..5));
        map.insert(section(SectionKind::Abstract, "a", 5..10));
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"results":"r","abstract":"a"}"#);
    }

    #[test]
    fn test_report_top_level_keys() {
        let report = AnalysisReport {
            source: "Sample: x.pdf".into(),
            stats: ReportStats::default(),
            metadata: Metadata::default(),
            keywords: vec![],
            summary: String::new(),
            sections: SectionMap::new(),
        };
        let json = report.to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let obj = value.as_object().unwrap();
        for key in ["source", "stats", "metadata", "keywords", "summary", "sections"] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert_eq!(value["stats"]["num_sections_detected"], 0);
        assert_eq!(value["metadata"]["emails"], serde_json::json!([]));
    }
}
