use std::path::Path;

use mupdf::{Document, TextPageFlags};

use paperlens_core::{DocumentLoader, LoaderError};

/// MuPDF-based implementation of [`DocumentLoader`].
///
/// This crate is the sole AGPL island: it isolates the mupdf dependency
/// (which is AGPL-3.0) so that plain-text code paths do not transitively
/// depend on it.
///
/// Pages that yield no text are skipped. The remaining page texts are joined
/// with a newline and the result is trimmed.
#[derive(Default)]
pub struct MupdfLoader;

impl MupdfLoader {
    pub fn new() -> Self {
        Self
    }

    fn page_text(&self, page: &mupdf::Page) -> Result<String, LoaderError> {
        let text_page = page
            .to_text_page(TextPageFlags::empty())
            .map_err(|e| LoaderError::ExtractionError(e.to_string()))?;

        let mut text = String::new();
        for block in text_page.blocks() {
            for line in block.lines() {
                let line_text: String = line
                    .chars()
                    .map(|c| c.char().unwrap_or('\u{FFFD}'))
                    .collect();
                text.push_str(&line_text);
                text.push('\n');
            }
        }
        Ok(text)
    }
}

/// Join page texts with newlines, dropping blank pages.
fn join_pages(pages: impl IntoIterator<Item = String>) -> String {
    pages
        .into_iter()
        .filter(|page| !page.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

impl DocumentLoader for MupdfLoader {
    fn load_text(&self, path: &Path) -> Result<String, LoaderError> {
        if !path.exists() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }
        let path_str = path
            .to_str()
            .ok_or_else(|| LoaderError::OpenError("invalid path encoding".into()))?;

        let document =
            Document::open(path_str).map_err(|e| LoaderError::OpenError(e.to_string()))?;

        let mut pages = Vec::new();
        for page in document
            .pages()
            .map_err(|e| LoaderError::ExtractionError(e.to_string()))?
        {
            let page = page.map_err(|e| LoaderError::ExtractionError(e.to_string()))?;
            pages.push(self.page_text(&page)?);
        }

        tracing::debug!(path = %path.display(), pages = pages.len(), "extracted pdf text");
        Ok(join_pages(pages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_not_found() {
        let err = MupdfLoader::new()
            .load_text(Path::new("/definitely/not/here.pdf"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::NotFound(_)));
    }

    #[test]
    fn test_garbage_file_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();
        let err = MupdfLoader::new().load_text(&path).unwrap_err();
        assert!(matches!(
            err,
            LoaderError::OpenError(_) | LoaderError::ExtractionError(_)
        ));
    }

    #[test]
    fn test_join_pages_skips_blank_pages() {
        let pages = vec![
            "Title\nAbstract\n".to_string(),
            String::new(),
            "  \n".to_string(),
            "Introduction\n".to_string(),
        ];
        assert_eq!(join_pages(pages), "Title\nAbstract\n\nIntroduction");
    }

    #[test]
    fn test_join_pages_all_blank() {
        assert_eq!(join_pages(vec![String::new(), "\n".to_string()]), "");
    }
}
