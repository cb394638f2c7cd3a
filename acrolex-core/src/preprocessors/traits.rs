// Preprocessor abstraction for document text extraction
//
// This module defines the boundary between reading a source document and the
// extraction rules. Everything after this point works with plain page text and
// is format-agnostic.

use crate::types::ExtractedDocument;
use anyhow::Result;
use std::path::Path;

/// Preprocessor trait - converts a document on disk into page texts
pub trait Preprocessor {
    /// Extract the text of every page, in page order.
    ///
    /// A document with no extractable text is not an error: return an
    /// `ExtractedDocument` whose pages are empty and let the caller skip it.
    fn extract(&self, input: &Path) -> Result<ExtractedDocument>;

    /// Get preprocessor name for debugging/logging
    fn name(&self) -> &str;

    /// Check if preprocessor supports the given file type
    fn supports_file_type(&self, path: &Path) -> bool;
}

/// Case-insensitive extension check shared by preprocessors.
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// File name used in reports and the processing log.
pub fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
