use std::path::PathBuf;

use thiserror::Error;

use crate::AnalysisReport;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Destination for finished reports.
///
/// Returns the location the report was written to.
pub trait ReportSink {
    fn save(&self, report: &AnalysisReport) -> Result<PathBuf, ReportError>;
}
