// Acrolex Core Library
//
// Builds a domain vocabulary from a folder of documents: ordinary words,
// standalone acronyms and acronym -> long form definitions.
// Main interface is `DocumentProcessor`, which runs one batch over a directory.

pub mod aggregator;
pub mod cleanup;
pub mod config;
pub mod error;
pub mod preprocessors;
pub mod processor;
pub mod rules;
pub mod stopwords;
pub mod storage;
pub mod types;

// Re-export main types and functions for easy use
pub use aggregator::{AggregatorSnapshot, FrequencyAggregator};
pub use cleanup::RetryPolicy;
pub use config::{
    AcronymConfig, ExtractionConfig, HeadingConfig, HeadingOverrides, LongFormConfig, OutputConfig,
};
pub use error::BatchError;
pub use preprocessors::{PdfPreprocessor, Preprocessor};
pub use processor::{DefinitionExtraction, DocumentProcessor, StepProfiler, VocabularyExtraction};
pub use stopwords::Stopwords;
pub use storage::{CsvStorage, NoOpStorage, ResultStorage};
pub use types::*;
