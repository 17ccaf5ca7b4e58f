use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("document not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to open document: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for document text loaders.
///
/// Implementors turn a source file into plain UTF-8 text with page order
/// preserved and pages joined by newlines. The analysis pipeline (sections,
/// metadata, keywords, summary) lives in `paperlens_analysis` and only ever
/// sees the returned string.
pub trait DocumentLoader: Send + Sync {
    /// Extract the full text content of a document.
    fn load_text(&self, path: &Path) -> Result<String, LoaderError>;
}
