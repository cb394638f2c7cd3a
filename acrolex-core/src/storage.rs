use crate::aggregator::AggregatorSnapshot;
use crate::config::OutputConfig;
use crate::types::{DocumentCounts, DocumentReport, ProcessingMode};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Storage abstraction for run results
pub trait ResultStorage {
    /// Rewrite the result tables for `mode` from a snapshot. Returns the files written.
    fn save_tables(&self, mode: ProcessingMode, snapshot: &AggregatorSnapshot)
        -> Result<Vec<PathBuf>>;

    /// Append one document's entry to the processing log.
    fn log_document(&self, report: &DocumentReport) -> Result<()>;

    /// Every file this storage produces for `mode`, log included.
    fn output_files(&self, mode: ProcessingMode) -> Vec<PathBuf>;
}

#[derive(Serialize)]
struct WordRow<'a> {
    word: &'a str,
    frequency: u64,
}

#[derive(Serialize)]
struct AcronymRow<'a> {
    acronym: &'a str,
    frequency: u64,
}

#[derive(Serialize)]
struct MappingRow<'a> {
    acronym: &'a str,
    full_form: &'a str,
    frequency: u64,
}

/// CSV tables plus a plain-text processing log in one output directory
pub struct CsvStorage {
    config: OutputConfig,
}

impl CsvStorage {
    pub fn new(config: &OutputConfig) -> Result<Self> {
        fs::create_dir_all(&config.directory).with_context(|| {
            format!(
                "Failed to create output directory {}",
                config.directory.display()
            )
        })?;

        Ok(Self {
            config: config.clone(),
        })
    }

    pub fn directory(&self) -> &Path {
        &self.config.directory
    }

    fn path(&self, file_name: &str) -> PathBuf {
        self.config.directory.join(file_name)
    }

    pub fn log_path(&self) -> PathBuf {
        self.path(&self.config.log_file)
    }

    fn table_paths(&self, mode: ProcessingMode) -> Vec<PathBuf> {
        match mode {
            ProcessingMode::Vocabulary => vec![
                self.path(&self.config.lowercase_words_file),
                self.path(&self.config.vocabulary_acronyms_file),
            ],
            ProcessingMode::Definitions => vec![
                self.path(&self.config.mappings_file),
                self.path(&self.config.definitions_acronyms_file),
            ],
        }
    }

    /// Header is written explicitly so empty tables still get one.
    fn write_table<R: Serialize>(path: &Path, header: &[&str], rows: &[R]) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;

        writer.write_record(header)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        log::debug!("Wrote {} rows to {}", rows.len(), path.display());
        Ok(())
    }

    fn write_words(path: &Path, counts: &[(String, u64)]) -> Result<()> {
        let rows: Vec<WordRow> = counts
            .iter()
            .map(|(word, frequency)| WordRow {
                word,
                frequency: *frequency,
            })
            .collect();
        Self::write_table(path, &["word", "frequency"], &rows)
    }

    fn write_acronyms(path: &Path, counts: &[(String, u64)]) -> Result<()> {
        let rows: Vec<AcronymRow> = counts
            .iter()
            .map(|(acronym, frequency)| AcronymRow {
                acronym,
                frequency: *frequency,
            })
            .collect();
        Self::write_table(path, &["acronym", "frequency"], &rows)
    }

    fn format_log_entry(report: &DocumentReport, timestamp: &str) -> String {
        let rule = "=".repeat(60);
        let mut entry = format!(
            "\n{rule}\nDocument: {}\nProcessing Time: {timestamp}\nPages: {}\n",
            report.name, report.page_count
        );

        match &report.counts {
            DocumentCounts::Vocabulary {
                lowercase_words,
                standalone_acronyms,
            } => {
                entry.push_str(&format!("Lowercase Words: {lowercase_words}\n"));
                entry.push_str(&format!("Standalone Acronyms: {standalone_acronyms}\n"));
            }
            DocumentCounts::Definitions {
                accepted_definitions,
                acronym_mappings,
                standalone_acronyms,
            } => {
                entry.push_str(&format!("Accepted Definitions: {accepted_definitions}\n"));
                entry.push_str(&format!("Acronym Mappings: {acronym_mappings}\n"));
                entry.push_str(&format!("Standalone Acronyms: {standalone_acronyms}\n"));
            }
        }

        entry.push_str(&format!("Headings Skipped: {}\n{rule}\n", report.headings_skipped));
        entry
    }
}

impl ResultStorage for CsvStorage {
    fn save_tables(
        &self,
        mode: ProcessingMode,
        snapshot: &AggregatorSnapshot,
    ) -> Result<Vec<PathBuf>> {
        let paths = self.table_paths(mode);

        match mode {
            ProcessingMode::Vocabulary => {
                Self::write_words(&paths[0], &snapshot.lowercase_words)?;
                Self::write_acronyms(&paths[1], &snapshot.standalone_acronyms)?;
            }
            ProcessingMode::Definitions => {
                let rows: Vec<MappingRow> = snapshot
                    .mappings
                    .iter()
                    .map(|(acronym, mapping)| MappingRow {
                        acronym,
                        full_form: &mapping.long_form,
                        frequency: mapping.frequency,
                    })
                    .collect();
                Self::write_table(&paths[0], &["acronym", "full_form", "frequency"], &rows)?;
                Self::write_acronyms(&paths[1], &snapshot.standalone_acronyms)?;
            }
        }

        Ok(paths)
    }

    fn log_document(&self, report: &DocumentReport) -> Result<()> {
        let path = self.log_path();
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string();

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open processing log {}", path.display()))?;
        file.write_all(Self::format_log_entry(report, &timestamp).as_bytes())?;
        Ok(())
    }

    fn output_files(&self, mode: ProcessingMode) -> Vec<PathBuf> {
        let mut files = self.table_paths(mode);
        files.push(self.log_path());
        files
    }
}

/// Storage that keeps nothing; for pure in-memory runs
pub struct NoOpStorage;

impl Default for NoOpStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl NoOpStorage {
    pub fn new() -> Self {
        Self
    }
}

impl ResultStorage for NoOpStorage {
    fn save_tables(
        &self,
        _mode: ProcessingMode,
        _snapshot: &AggregatorSnapshot,
    ) -> Result<Vec<PathBuf>> {
        Ok(Vec::new())
    }

    fn log_document(&self, _report: &DocumentReport) -> Result<()> {
        Ok(())
    }

    fn output_files(&self, _mode: ProcessingMode) -> Vec<PathBuf> {
        Vec::new()
    }
}
