use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

// ===== OPERATING MODES =====

/// The two independent configurations of the extraction engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingMode {
    /// Lowercase words plus standalone acronyms.
    #[default]
    Vocabulary,
    /// Acronym -> long form mappings plus standalone acronyms.
    Definitions,
}

impl fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingMode::Vocabulary => write!(f, "vocabulary"),
            ProcessingMode::Definitions => write!(f, "definitions"),
        }
    }
}

// ===== TOKEN / CANDIDATE TYPES =====

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Acronym,
    Word,
}

/// A parenthesised short form together with the clause that precedes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcronymCandidate {
    pub short_form: String,
    pub long_form_candidate: String,
}

impl AcronymCandidate {
    pub fn new(short_form: impl Into<String>, long_form_candidate: impl Into<String>) -> Self {
        Self {
            short_form: short_form.into(),
            long_form_candidate: long_form_candidate.into(),
        }
    }
}

/// Stored definition for a short form. The long form is fixed at first sight,
/// the frequency keeps counting every accepted occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcronymMapping {
    pub long_form: String,
    pub frequency: u64,
}

// ===== PREPROCESSOR OUTPUT =====

/// Text pulled out of one source document, page by page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub name: String,
    pub page_count: usize,
    pub pages: Vec<String>,
}

impl ExtractedDocument {
    pub fn new(name: impl Into<String>, pages: Vec<String>) -> Self {
        Self {
            name: name.into(),
            page_count: pages.len(),
            pages,
        }
    }

    /// Trimmed, non-empty lines in page order (vocabulary mode input)
    pub fn lines(&self) -> Vec<&str> {
        self.pages
            .iter()
            .flat_map(|page| page.split('\n'))
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// All pages as one flat string (definitions mode input)
    pub fn flat_text(&self) -> String {
        let mut text = String::new();
        for page in &self.pages {
            text.push_str(page);
            text.push('\n');
        }
        text
    }

    pub fn has_text(&self) -> bool {
        self.pages.iter().any(|page| !page.trim().is_empty())
    }
}

// ===== PROCESSING RESULTS =====

/// Counts extracted from a single document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DocumentCounts {
    Vocabulary {
        /// Ordinary word occurrences found in this document
        lowercase_words: usize,
        /// Unique standalone acronyms across the run so far
        standalone_acronyms: usize,
    },
    Definitions {
        /// Candidates accepted in this document
        accepted_definitions: usize,
        /// Unique mappings across the run so far
        acronym_mappings: usize,
        /// Unique standalone acronyms across the run so far
        standalone_acronyms: usize,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub name: String,
    pub page_count: usize,
    pub headings_skipped: usize,
    pub counts: DocumentCounts,
    pub source_deleted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    NoTextExtracted,
    NoValidWords,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoTextExtracted => write!(f, "no text extracted"),
            SkipReason::NoValidWords => write!(f, "no valid words found"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub enum DocumentOutcome {
    Processed(DocumentReport),
    Skipped { name: String, reason: SkipReason },
}

/// End-of-run totals.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    pub documents_found: usize,
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub unique_lowercase_words: usize,
    pub unique_standalone_acronyms: usize,
    pub unique_acronym_mappings: usize,
    pub output_files: Vec<PathBuf>,
}
