use crate::aggregator::FrequencyAggregator;
use crate::config::ExtractionConfig;
use crate::error::BatchError;
use crate::preprocessors::{PdfPreprocessor, Preprocessor};
use crate::rules::{
    AcronymClassifier, CandidateExtractor, HeadingClassifier, LongFormCleaner, LongFormMatcher,
    LongFormValidator, TokenNormalizer,
};
use crate::stopwords::Stopwords;
use crate::storage::{CsvStorage, ResultStorage};
use crate::types::*;
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Simple profiler that collects timings for pipeline steps
pub struct StepProfiler {
    enabled: bool,
    timings: Vec<(String, Duration)>,
}

impl StepProfiler {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            timings: Vec::new(),
        }
    }

    pub fn time_step<F, R>(&mut self, step_name: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        if !self.enabled {
            return f();
        }

        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();

        self.timings.push((step_name.to_string(), elapsed));
        println!("⏱️  {}: {:.0}ms", step_name, elapsed.as_millis());

        result
    }

    pub fn print_summary(&self) {
        if !self.enabled || self.timings.is_empty() {
            return;
        }

        println!("\n📊 Performance Summary:");
        let total: Duration = self.timings.iter().map(|(_, d)| *d).sum();

        for (step, duration) in &self.timings {
            let percentage = if total.is_zero() {
                0.0
            } else {
                (duration.as_secs_f64() / total.as_secs_f64()) * 100.0
            };
            println!(
                "   {:.<35} {:.0}ms ({:.1}%)",
                step,
                duration.as_millis(),
                percentage
            );
        }
        println!("   {:.<35} {:.0}ms", "Total", total.as_millis());
    }
}

/// Vocabulary-mode result for one document, not yet merged into the aggregator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabularyExtraction {
    pub headings_skipped: usize,
    /// Ordinary words, lowercased, in order of appearance
    pub lowercase_words: Vec<String>,
    /// Acronym-like tokens as written, in order of appearance
    pub acronyms: Vec<String>,
}

impl VocabularyExtraction {
    pub fn is_empty(&self) -> bool {
        self.lowercase_words.is_empty() && self.acronyms.is_empty()
    }
}

/// Definitions-mode result for one document, not yet merged into the aggregator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefinitionExtraction {
    pub headings_skipped: usize,
    /// Accepted `(short form, long form)` pairs in document order
    pub definitions: Vec<(String, String)>,
    /// Every valid uppercase short form in the body, defined or not
    pub acronyms: Vec<String>,
}

pub struct DocumentProcessor {
    config: ExtractionConfig,
    preprocessor: Box<dyn Preprocessor>,
    storage: Box<dyn ResultStorage>,
    headings: HeadingClassifier,
    normalizer: TokenNormalizer,
    acronyms: AcronymClassifier,
    candidates: CandidateExtractor,
    matcher: LongFormMatcher,
    cleaner: Option<LongFormCleaner>,
    validator: LongFormValidator,
    aggregator: FrequencyAggregator,
    enable_profiling: bool,
}

impl DocumentProcessor {
    /// Create DocumentProcessor with full dependency injection
    pub fn new_with_dependencies(
        config: ExtractionConfig,
        preprocessor: Box<dyn Preprocessor>,
        storage: Box<dyn ResultStorage>,
    ) -> Result<Self> {
        let stopwords = Stopwords::load(config.stopwords_path.as_deref())?;

        Ok(Self {
            headings: HeadingClassifier::new(config.heading_config())?,
            normalizer: TokenNormalizer::new(stopwords)?,
            acronyms: AcronymClassifier::new(&config.acronyms),
            candidates: CandidateExtractor::new(&config.acronyms, &config.long_form)?,
            matcher: LongFormMatcher::new(),
            cleaner: config
                .long_form
                .clean_long_forms
                .then(|| LongFormCleaner::new(&config.long_form)),
            validator: LongFormValidator::new(&config.long_form),
            aggregator: FrequencyAggregator::new(),
            enable_profiling: false,
            config,
            preprocessor,
            storage,
        })
    }

    /// Convenience constructor for CLI usage: lopdf text extraction, CSV output
    pub fn new_cli(config: ExtractionConfig) -> Result<Self> {
        let storage = Box::new(CsvStorage::new(&config.output)?);
        Self::new_with_dependencies(config, Box::new(PdfPreprocessor::new()), storage)
    }

    pub fn with_profiling(mut self, enabled: bool) -> Self {
        self.enable_profiling = enabled;
        self
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    pub fn mode(&self) -> ProcessingMode {
        self.config.mode
    }

    pub fn aggregator(&self) -> &FrequencyAggregator {
        &self.aggregator
    }

    /// Start a new batch with empty tables.
    pub fn reset(&mut self) {
        self.aggregator.reset();
    }

    // ===== PURE TEXT ENTRY POINTS =====

    /// Vocabulary mode over already split lines.
    pub fn extract_vocabulary(&self, lines: &[&str]) -> VocabularyExtraction {
        let mut extraction = VocabularyExtraction::default();

        for line in lines {
            if self.headings.is_heading(line) {
                extraction.headings_skipped += 1;
                continue;
            }

            for token in self.normalizer.normalize(line) {
                match self.acronyms.classify(&token) {
                    TokenKind::Acronym => extraction.acronyms.push(token),
                    TokenKind::Word => extraction.lowercase_words.push(token.to_lowercase()),
                }
            }
        }

        extraction
    }

    /// Definitions mode over the flat text of a document.
    pub fn extract_definitions(&self, text: &str) -> DefinitionExtraction {
        let (body, headings_skipped) = self.headings.strip_headings(text);
        let mut extraction = DefinitionExtraction {
            headings_skipped,
            ..DefinitionExtraction::default()
        };

        for candidate in self.candidates.extract(&body, &self.acronyms) {
            if let Some(long_form) = self.resolve_long_form(&candidate) {
                extraction
                    .definitions
                    .push((candidate.short_form, long_form));
            }
        }

        extraction.acronyms = self
            .candidates
            .standalone_acronyms(&body, &self.acronyms)
            .into_iter()
            .map(str::to_string)
            .collect();

        extraction
    }

    /// Match, clean and validate one candidate.
    pub fn resolve_long_form(&self, candidate: &AcronymCandidate) -> Option<String> {
        let short_form = candidate.short_form.as_str();

        let matched = self
            .matcher
            .find_long_form(short_form, &candidate.long_form_candidate)?;
        let long_form = match &self.cleaner {
            Some(cleaner) => cleaner.clean(&matched),
            None => matched,
        };

        match self.validator.first_failure(short_form, &long_form) {
            None => Some(long_form),
            Some(rule) => {
                log::debug!("Rejected {short_form} = {long_form:?} ({rule})");
                None
            }
        }
    }

    /// Merge a vocabulary extraction into the run tables.
    pub fn record_vocabulary(&mut self, extraction: &VocabularyExtraction) -> DocumentCounts {
        for word in &extraction.lowercase_words {
            self.aggregator.record_word(word);
        }
        for acronym in &extraction.acronyms {
            self.aggregator.record_standalone(acronym);
        }

        DocumentCounts::Vocabulary {
            lowercase_words: extraction.lowercase_words.len(),
            standalone_acronyms: self.aggregator.standalone_acronyms().len(),
        }
    }

    /// Merge a definitions extraction into the run tables. Definitions go
    /// first so that a short form defined anywhere in the document is not
    /// counted as standalone.
    pub fn record_definitions(&mut self, extraction: &DefinitionExtraction) -> DocumentCounts {
        for (short_form, long_form) in &extraction.definitions {
            if self.aggregator.record_definition(short_form, long_form) {
                log::info!("✓ {short_form} = {long_form}");
            }
        }
        for acronym in &extraction.acronyms {
            self.aggregator.record_standalone(acronym);
        }

        DocumentCounts::Definitions {
            accepted_definitions: extraction.definitions.len(),
            acronym_mappings: self.aggregator.mappings().len(),
            standalone_acronyms: self.aggregator.standalone_acronyms().len(),
        }
    }

    // ===== DOCUMENT / BATCH =====

    /// Extract, aggregate, persist and then delete one source document.
    pub fn process_document(&mut self, path: &Path) -> Result<DocumentOutcome> {
        let start_time = Instant::now();
        let mut profiler = StepProfiler::new(self.enable_profiling);

        let document =
            profiler.time_step("1. Text Extraction", || self.preprocessor.extract(path))?;

        if !document.has_text() {
            log::warn!("✗ No text extracted from {}", document.name);
            return Ok(DocumentOutcome::Skipped {
                name: document.name,
                reason: SkipReason::NoTextExtracted,
            });
        }
        log::info!(
            "📄 {}: extracted text from {} pages",
            document.name,
            document.page_count
        );

        let (counts, headings_skipped) = match self.config.mode {
            ProcessingMode::Vocabulary => {
                let extraction = profiler.time_step("2. Vocabulary Rules", || {
                    self.extract_vocabulary(&document.lines())
                });

                if extraction.is_empty() {
                    log::warn!("✗ No valid words found in {}", document.name);
                    return Ok(DocumentOutcome::Skipped {
                        name: document.name,
                        reason: SkipReason::NoValidWords,
                    });
                }

                let counts = profiler.time_step("3. Aggregation", || {
                    self.record_vocabulary(&extraction)
                });
                (counts, extraction.headings_skipped)
            }
            ProcessingMode::Definitions => {
                let extraction = profiler.time_step("2. Definition Rules", || {
                    self.extract_definitions(&document.flat_text())
                });
                log::info!(
                    "Found {} accepted definitions, {} acronym occurrences",
                    extraction.definitions.len(),
                    extraction.acronyms.len()
                );

                let counts = profiler.time_step("3. Aggregation", || {
                    self.record_definitions(&extraction)
                });
                (counts, extraction.headings_skipped)
            }
        };
        log::info!("✓ Skipped {headings_skipped} heading lines");

        let mut report = DocumentReport {
            name: document.name,
            page_count: document.page_count,
            headings_skipped,
            counts,
            source_deleted: false,
        };

        profiler.time_step("4. Persistence", || -> Result<()> {
            self.storage
                .save_tables(self.config.mode, &self.aggregator.snapshot())?;
            self.storage.log_document(&report)
        })?;

        if self.config.output.delete_processed_sources {
            report.source_deleted =
                profiler.time_step("5. Source Cleanup", || self.delete_source(path));
        }

        profiler.print_summary();
        log::info!(
            "⏱️  {} processed in {:.0}ms",
            report.name,
            start_time.elapsed().as_millis()
        );

        Ok(DocumentOutcome::Processed(report))
    }

    /// Deletion failures are reported but never fail the document.
    fn delete_source(&self, path: &Path) -> bool {
        match self.config.cleanup.remove_file(path) {
            Ok(deleted) => deleted,
            Err(e) => {
                log::error!("✗ {e}");
                false
            }
        }
    }

    /// Supported documents directly inside `input_dir`, sorted by file name.
    pub fn collect_documents(&self, input_dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
        let entries = fs::read_dir(input_dir).map_err(|source| BatchError::InputDirectory {
            path: input_dir.to_path_buf(),
            source,
        })?;

        let mut documents: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && self.preprocessor.supports_file_type(path))
            .collect();
        documents.sort();

        Ok(documents)
    }

    /// Process every supported document in `input_dir`, one at a time.
    ///
    /// A failing document is logged and counted; the batch carries on.
    pub fn run_batch(&mut self, input_dir: &Path) -> Result<BatchSummary> {
        let documents = self.collect_documents(input_dir)?;
        let mut summary = BatchSummary {
            documents_found: documents.len(),
            ..BatchSummary::default()
        };

        if documents.is_empty() {
            log::warn!("No PDF documents found in {}", input_dir.display());
            return Ok(summary);
        }

        log::info!(
            "Found {} document(s) to process with {} ({} mode)",
            documents.len(),
            self.preprocessor.name(),
            self.config.mode
        );

        for path in &documents {
            match self.process_document(path) {
                Ok(DocumentOutcome::Processed(_)) => summary.processed += 1,
                Ok(DocumentOutcome::Skipped { name, reason }) => {
                    log::warn!("Skipped {name}: {reason}");
                    summary.skipped += 1;
                }
                Err(e) => {
                    log::error!("Error processing {}: {e:#}", path.display());
                    summary.failed += 1;
                }
            }
        }

        self.storage
            .save_tables(self.config.mode, &self.aggregator.snapshot())?;

        summary.unique_lowercase_words = self.aggregator.lowercase_words().len();
        summary.unique_standalone_acronyms = self.aggregator.standalone_acronyms().len();
        summary.unique_acronym_mappings = self.aggregator.mappings().len();
        summary.output_files = self.storage.output_files(self.config.mode);

        Ok(summary)
    }
}
