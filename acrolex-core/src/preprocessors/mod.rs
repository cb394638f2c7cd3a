//! Document Preprocessors
//!
//! This module provides the text-extraction boundary: each preprocessor turns
//! one source document into an `ExtractedDocument` (page texts in order) that
//! the extraction rules consume.
//!
//! ## Architecture
//!
//! ```text
//! Document (PDF)
//!     ↓
//! [Format-specific Preprocessor]
//!     ↓
//! ExtractedDocument (page texts)
//!     ↓
//! [DocumentProcessor: headings → tokens / candidates → aggregator]
//! ```
//!
//! ## Available Preprocessors
//!
//! - `PdfPreprocessor` - PDF documents via lopdf page text extraction

pub mod traits;
pub mod pdf;

// Re-export main types
pub use traits::Preprocessor;
pub use pdf::PdfPreprocessor;
