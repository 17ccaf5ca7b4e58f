//! Report export for paperlens.
//!
//! Turns an [`AnalysisReport`] into files: pretty JSON (the default saved
//! report), Markdown, plain text, or a metadata-only JSON document.

pub mod export;
pub mod sink;
pub mod types;

pub use export::{export_markdown, export_metadata_json, export_report, export_text};
pub use sink::{DirectorySink, report_filename};
pub use types::ExportFormat;

pub use paperlens_core::{AnalysisReport, ReportError, ReportSink};
