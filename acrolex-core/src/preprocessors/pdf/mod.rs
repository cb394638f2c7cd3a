//! PDF Preprocessor
//!
//! Extracts page text from PDF documents with lopdf. Pages are visited in page
//! number order; a page whose content stream cannot be decoded contributes an
//! empty page rather than failing the whole document.

use crate::preprocessors::traits::{document_name, has_extension, Preprocessor};
use crate::types::ExtractedDocument;
use anyhow::{Context, Result};
use lopdf::Document;
use std::path::Path;

#[derive(Debug, Default)]
pub struct PdfPreprocessor;

impl PdfPreprocessor {
    pub fn new() -> Self {
        Self
    }

    fn page_texts(document: &Document) -> Vec<String> {
        // get_pages() is keyed by 1-based page number, already ordered
        document
            .get_pages()
            .keys()
            .map(|&page_number| match document.extract_text(&[page_number]) {
                Ok(text) => text,
                Err(e) => {
                    log::warn!("Could not extract text from page {page_number}: {e}");
                    String::new()
                }
            })
            .collect()
    }
}

impl Preprocessor for PdfPreprocessor {
    fn extract(&self, input: &Path) -> Result<ExtractedDocument> {
        let document = Document::load(input)
            .with_context(|| format!("Failed to load PDF {}", input.display()))?;

        let pages = Self::page_texts(&document);
        log::debug!("Extracted {} pages from {}", pages.len(), input.display());

        Ok(ExtractedDocument::new(document_name(input), pages))
    }

    fn name(&self) -> &str {
        "lopdf"
    }

    fn supports_file_type(&self, path: &Path) -> bool {
        has_extension(path, "pdf")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supports_only_pdf_files() {
        let preprocessor = PdfPreprocessor::new();
        assert!(preprocessor.supports_file_type(Path::new("a.pdf")));
        assert!(preprocessor.supports_file_type(Path::new("b.Pdf")));
        assert!(!preprocessor.supports_file_type(Path::new("c.txt")));
    }

    #[test]
    fn unreadable_pdf_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"not a pdf").unwrap();

        let err = PdfPreprocessor::new().extract(&path).unwrap_err();
        assert!(err.to_string().contains("broken.pdf"));
    }
}
