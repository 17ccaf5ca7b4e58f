use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use paperlens_core::{AnalysisReport, ReportError, ReportSink};

use crate::export::render;
use crate::types::ExportFormat;

static NON_ALNUM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());
static UNDERSCORES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").unwrap());

/// Longest file stem produced by [`report_filename`], in characters.
const MAX_STEM_CHARS: usize = 80;

/// File stem for a report, derived from the paper title.
///
/// Lowercases, turns every run of characters outside `[a-z0-9]` into one
/// underscore, trims underscores from both ends and keeps at most 80
/// characters. An empty result becomes `"paper"`.
pub fn report_filename(title: &str) -> String {
    let lower = title.trim().to_lowercase();
    let replaced = NON_ALNUM_RE.replace_all(&lower, "_");
    let collapsed = UNDERSCORES_RE.replace_all(&replaced, "_");
    let stem: String = collapsed
        .trim_matches('_')
        .chars()
        .take(MAX_STEM_CHARS)
        .collect();
    if stem.is_empty() {
        "paper".to_string()
    } else {
        stem
    }
}

/// Writes each report into a directory as `<title stem>.<ext>`.
///
/// The directory is created on first save. An existing file with the same
/// name is overwritten.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    format: ExportFormat,
}

impl DirectorySink {
    /// A sink writing pretty-printed JSON reports.
    pub fn json(dir: impl Into<PathBuf>) -> Self {
        Self::new(dir, ExportFormat::Json)
    }

    pub fn new(dir: impl Into<PathBuf>, format: ExportFormat) -> Self {
        Self {
            dir: dir.into(),
            format,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where a report would be written.
    pub fn path_for(&self, report: &AnalysisReport) -> PathBuf {
        let stem = report_filename(&report.metadata.title);
        self.dir
            .join(format!("{}.{}", stem, self.format.extension()))
    }
}

impl ReportSink for DirectorySink {
    fn save(&self, report: &AnalysisReport) -> Result<PathBuf, ReportError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(report);
        let content = render(report, self.format)?;
        std::fs::write(&path, content)?;
        tracing::debug!(path = %path.display(), format = %self.format, "saved report");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperlens_core::{Metadata, SectionMap};

    fn report(title: &str) -> AnalysisReport {
        AnalysisReport {
            source: "File: test.pdf".to_string(),
            metadata: Metadata {
                title: title.to_string(),
                ..Default::default()
            },
            stats: Default::default(),
            keywords: vec!["graph kernels".to_string()],
            summary: "Short summary.".to_string(),
            sections: SectionMap::new(),
        }
    }

    #[test]
    fn test_report_filename_basic() {
        assert_eq!(
            report_filename("  Deep Learning: A Survey (2nd ed.) "),
            "deep_learning_a_survey_2nd_ed"
        );
    }

    #[test]
    fn test_report_filename_empty_and_symbols() {
        assert_eq!(report_filename(""), "paper");
        assert_eq!(report_filename("***"), "paper");
        assert_eq!(report_filename("Über Graphen"), "ber_graphen");
    }

    #[test]
    fn test_report_filename_truncated() {
        let name = report_filename(&"word ".repeat(40));
        assert_eq!(name.chars().count(), 80);
        assert!(name.starts_with("word_word"));
    }

    #[test]
    fn test_json_sink_creates_dir_and_writes() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = DirectorySink::json(tmp.path().join("reports"));
        let path = sink.save(&report("Graph Kernels Revisited")).unwrap();
        assert_eq!(
            path,
            tmp.path().join("reports").join("graph_kernels_revisited.json")
        );
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["metadata"]["title"], "Graph Kernels Revisited");
        assert_eq!(value["keywords"][0], "graph kernels");
    }

    #[test]
    fn test_json_sink_untitled_and_non_ascii() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = DirectorySink::json(tmp.path());
        let mut r = report("");
        r.summary = "Résumé of Straße.".to_string();
        let path = sink.save(&r).unwrap();
        assert_eq!(path.file_name().unwrap(), "paper.json");
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("Résumé of Straße."));
        assert!(raw.contains("\n  \"source\""));
    }

    #[test]
    fn test_markdown_sink_extension() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(tmp.path(), ExportFormat::Markdown);
        let path = sink.save(&report("A Title")).unwrap();
        assert_eq!(path.file_name().unwrap(), "a_title.md");
    }
}
