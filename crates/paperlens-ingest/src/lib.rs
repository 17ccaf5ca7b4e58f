use std::path::{Path, PathBuf};

use thiserror::Error;

use paperlens_analysis::text_processing::expand_ligatures;
use paperlens_core::LoaderError;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error("no text could be extracted (scanned or protected PDF?)")]
    EmptyText,
    #[cfg(not(feature = "pdf"))]
    #[error("PDF support not compiled in (enable the `pdf` feature of paperlens-ingest)")]
    NoPdfSupport,
}

/// Extensions read as plain UTF-8 text instead of going through the PDF loader.
const TEXT_EXTENSIONS: &[&str] = &["txt", "md", "text"];

/// Load the full text of a document.
///
/// Dispatches on file extension:
/// - `.txt`, `.md`, `.text` → read as UTF-8
/// - anything else → PDF loader (requires `pdf` feature / mupdf), with
///   typographic ligatures expanded
///
/// A document that yields only whitespace is an error.
pub fn load_document(path: &Path) -> Result<String, IngestError> {
    if !path.exists() {
        return Err(LoaderError::NotFound(path.to_path_buf()).into());
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let text = if TEXT_EXTENSIONS.contains(&ext.as_str()) {
        std::fs::read_to_string(path).map_err(LoaderError::from)?
    } else {
        expand_ligatures(&load_pdf(path)?)
    };

    if text.trim().is_empty() {
        tracing::warn!(path = %path.display(), "document produced no text");
        return Err(IngestError::EmptyText);
    }
    tracing::debug!(path = %path.display(), chars = text.chars().count(), "loaded document");
    Ok(text)
}

#[cfg(feature = "pdf")]
fn load_pdf(path: &Path) -> Result<String, IngestError> {
    use paperlens_core::DocumentLoader;
    let loader = paperlens_pdf_mupdf::MupdfLoader::default();
    Ok(loader.load_text(path)?)
}

#[cfg(not(feature = "pdf"))]
fn load_pdf(_path: &Path) -> Result<String, IngestError> {
    Err(IngestError::NoPdfSupport)
}

/// Label used for a document in reports: its file name.
pub fn source_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// List the PDFs directly inside `dir`, sorted by path.
///
/// A missing directory yields an empty list.
pub fn list_pdfs(dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut pdfs = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(LoaderError::from)? {
        let path = entry.map_err(LoaderError::from)?.path();
        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
        if is_pdf && path.is_file() {
            pdfs.push(path);
        }
    }
    pdfs.sort();
    Ok(pdfs)
}
