use crate::cleanup::RetryPolicy;
use crate::types::ProcessingMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExtractionConfig {
    #[serde(default)]
    pub mode: ProcessingMode,
    /// Heading rule overrides, layered on the preset matching `mode`
    #[serde(default)]
    pub heading: HeadingOverrides,
    #[serde(default)]
    pub acronyms: AcronymConfig,
    #[serde(default)]
    pub long_form: LongFormConfig,
    /// File with one stopword per line; the built-in English list otherwise
    #[serde(default)]
    pub stopwords_path: Option<PathBuf>,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub cleanup: RetryPolicy,
}

impl ExtractionConfig {
    pub fn for_mode(mode: ProcessingMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Heading rules in effect: the mode preset with any configured fields replaced
    pub fn heading_config(&self) -> HeadingConfig {
        self.heading.apply(HeadingConfig::for_mode(self.mode))
    }

    /// Load config from file path
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {path}"))?;
        let config: ExtractionConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config file {path}"))?;
        Ok(config)
    }

    /// Load config with fallback to default
    pub fn load_with_fallback(path: Option<&str>) -> Self {
        match path {
            Some(p) => Self::load_from_file(p).unwrap_or_else(|e| {
                log::warn!("Failed to load config from {p} ({e:#}), using defaults");
                Self::default()
            }),
            None => Self::default(),
        }
    }
}

/// Lexical heading rules. The two operating modes were tuned separately and
/// keep their own presets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingConfig {
    /// Lowercased prefixes that mark a heading line
    pub keywords: Vec<String>,
    /// Word-count bounds for the all-uppercase rule
    pub allcaps_min_words: usize,
    pub allcaps_max_words: usize,
    /// Word-count bounds for the title-case rule
    pub titlecase_min_words: usize,
    pub titlecase_max_words: usize,
    /// Fraction of words starting uppercase for the title-case rule
    pub titlecase_ratio: f32,
}

impl HeadingConfig {
    pub fn vocabulary() -> Self {
        Self {
            keywords: strings(&[
                "chapter",
                "section",
                "part",
                "article",
                "annexure",
                "appendix",
                "volume",
                "abstract",
                "introduction",
                "conclusion",
                "summary",
                "references",
                "index",
                "contents",
            ]),
            allcaps_min_words: 1,
            allcaps_max_words: 12,
            titlecase_min_words: 2,
            titlecase_max_words: 6,
            titlecase_ratio: 0.7,
        }
    }

    pub fn definitions() -> Self {
        let mut keywords = Self::vocabulary().keywords;
        keywords.extend(strings(&[
            "session",
            "appendices",
            "preface",
            "foreword",
            "acknowledgment",
            "bibliography",
        ]));

        Self {
            keywords,
            allcaps_min_words: 2,
            allcaps_max_words: 12,
            titlecase_min_words: 2,
            titlecase_max_words: 8,
            titlecase_ratio: 0.7,
        }
    }

    pub fn for_mode(mode: ProcessingMode) -> Self {
        match mode {
            ProcessingMode::Vocabulary => Self::vocabulary(),
            ProcessingMode::Definitions => Self::definitions(),
        }
    }
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self::vocabulary()
    }
}

/// Partial `heading:` section. Unset fields keep the mode preset's value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadingOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allcaps_min_words: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allcaps_max_words: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub titlecase_min_words: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub titlecase_max_words: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub titlecase_ratio: Option<f32>,
}

impl HeadingOverrides {
    pub fn apply(&self, preset: HeadingConfig) -> HeadingConfig {
        HeadingConfig {
            keywords: self.keywords.clone().unwrap_or(preset.keywords),
            allcaps_min_words: self.allcaps_min_words.unwrap_or(preset.allcaps_min_words),
            allcaps_max_words: self.allcaps_max_words.unwrap_or(preset.allcaps_max_words),
            titlecase_min_words: self
                .titlecase_min_words
                .unwrap_or(preset.titlecase_min_words),
            titlecase_max_words: self
                .titlecase_max_words
                .unwrap_or(preset.titlecase_max_words),
            titlecase_ratio: self.titlecase_ratio.unwrap_or(preset.titlecase_ratio),
        }
    }
}

fn default_known_mixed_case() -> Vec<String> {
    strings(&[
        "phd",
        "mba",
        "latex",
        "mysql",
        "postgresql",
        "javascript",
        "iphone",
        "ipad",
        "ipod",
        "macbook",
        "ios",
        "macos",
        "ebay",
        "etsy",
        "paypal",
        "linkedin",
        "youtube",
        "mphil",
        "btech",
        "mtech",
    ])
}

fn default_false_positives() -> Vec<String> {
    strings(&["NO", "YES", "OK", "AM", "PM", "AD", "BC"])
}

fn default_min_short_form_len() -> usize {
    2
}

fn default_max_short_form_len() -> usize {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcronymConfig {
    /// Lowercased mixed-case terms always treated as acronyms (vocabulary mode)
    #[serde(default = "default_known_mixed_case")]
    pub known_mixed_case: Vec<String>,
    /// Uppercase words that look like acronyms but are not
    #[serde(default = "default_false_positives")]
    pub false_positives: Vec<String>,
    #[serde(default = "default_min_short_form_len")]
    pub min_short_form_len: usize,
    #[serde(default = "default_max_short_form_len")]
    pub max_short_form_len: usize,
}

impl Default for AcronymConfig {
    fn default() -> Self {
        Self {
            known_mixed_case: default_known_mixed_case(),
            false_positives: default_false_positives(),
            min_short_form_len: default_min_short_form_len(),
            max_short_form_len: default_max_short_form_len(),
        }
    }
}

fn default_candidate_window() -> usize {
    200
}

fn default_sentence_markers() -> Vec<char> {
    vec!['.', '!', '?', ';', ':']
}

fn default_verb_markers() -> Vec<String> {
    strings(&[
        " has ",
        " have ",
        " is ",
        " are ",
        " was ",
        " were ",
        " established ",
        " created ",
    ])
}

fn default_min_capitalized_ratio() -> f32 {
    0.4
}

fn default_min_initials_ratio() -> f32 {
    0.3
}

fn default_leading_stopwords() -> Vec<String> {
    strings(&[
        "the", "a", "an", "and", "or", "of", "for", "in", "on", "at", "to", "by", "with",
    ])
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LongFormConfig {
    /// Characters of preceding text captured before a parenthesised short form
    #[serde(default = "default_candidate_window")]
    pub candidate_window: usize,
    /// The candidate is cut after the last of these marks
    #[serde(default = "default_sentence_markers")]
    pub sentence_markers: Vec<char>,
    /// Space-padded verbs that mark a sentence rather than a noun phrase
    #[serde(default = "default_verb_markers")]
    pub verb_markers: Vec<String>,
    #[serde(default = "default_min_capitalized_ratio")]
    pub min_capitalized_ratio: f32,
    #[serde(default = "default_min_initials_ratio")]
    pub min_initials_ratio: f32,
    /// Trim leading stopwords/lowercase words and trailing punctuation before validation
    #[serde(default = "default_true")]
    pub clean_long_forms: bool,
    #[serde(default = "default_leading_stopwords")]
    pub leading_stopwords: Vec<String>,
}

impl Default for LongFormConfig {
    fn default() -> Self {
        Self {
            candidate_window: default_candidate_window(),
            sentence_markers: default_sentence_markers(),
            verb_markers: default_verb_markers(),
            min_capitalized_ratio: default_min_capitalized_ratio(),
            min_initials_ratio: default_min_initials_ratio(),
            clean_long_forms: true,
            leading_stopwords: default_leading_stopwords(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("acrolex_output")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,
    #[serde(default = "OutputConfig::default_lowercase_words_file")]
    pub lowercase_words_file: String,
    #[serde(default = "OutputConfig::default_vocabulary_acronyms_file")]
    pub vocabulary_acronyms_file: String,
    #[serde(default = "OutputConfig::default_mappings_file")]
    pub mappings_file: String,
    #[serde(default = "OutputConfig::default_definitions_acronyms_file")]
    pub definitions_acronyms_file: String,
    #[serde(default = "OutputConfig::default_log_file")]
    pub log_file: String,
    /// Remove each source document once its results are persisted
    #[serde(default = "default_true")]
    pub delete_processed_sources: bool,
}

impl OutputConfig {
    fn default_lowercase_words_file() -> String {
        "lowercase_words_alphabetical.csv".to_string()
    }

    fn default_vocabulary_acronyms_file() -> String {
        "standalone_acronyms_alphabetical.csv".to_string()
    }

    fn default_mappings_file() -> String {
        "acronym_mappings.csv".to_string()
    }

    fn default_definitions_acronyms_file() -> String {
        "standalone_acronyms.csv".to_string()
    }

    fn default_log_file() -> String {
        "processing_log.txt".to_string()
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            lowercase_words_file: Self::default_lowercase_words_file(),
            vocabulary_acronyms_file: Self::default_vocabulary_acronyms_file(),
            mappings_file: Self::default_mappings_file(),
            definitions_acronyms_file: Self::default_definitions_acronyms_file(),
            log_file: Self::default_log_file(),
            delete_processed_sources: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_preset_follows_mode() {
        let vocabulary = ExtractionConfig::for_mode(ProcessingMode::Vocabulary);
        assert_eq!(vocabulary.heading_config(), HeadingConfig::vocabulary());

        let definitions = ExtractionConfig::for_mode(ProcessingMode::Definitions);
        let heading = definitions.heading_config();
        assert_eq!(heading.allcaps_min_words, 2);
        assert_eq!(heading.titlecase_max_words, 8);
        assert!(heading.keywords.iter().any(|k| k == "bibliography"));
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let yaml = "mode: definitions\nlong_form:\n  min_capitalized_ratio: 0.5\n";
        let config: ExtractionConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.mode, ProcessingMode::Definitions);
        assert_eq!(config.long_form.min_capitalized_ratio, 0.5);
        assert_eq!(config.long_form.candidate_window, 200);
        assert!(config.long_form.clean_long_forms);
        assert_eq!(config.acronyms.max_short_form_len, 10);
        assert_eq!(config.cleanup.max_attempts, 5);
        assert!(config.output.delete_processed_sources);
    }

    #[test]
    fn explicit_heading_overrides_preset() {
        let yaml = "mode: vocabulary\nheading:\n  keywords: [part]\n  allcaps_min_words: 3\n  allcaps_max_words: 4\n  titlecase_min_words: 2\n  titlecase_max_words: 3\n  titlecase_ratio: 1.0\n";
        let config: ExtractionConfig = serde_yaml::from_str(yaml).unwrap();
        let heading = config.heading_config();

        assert_eq!(heading.keywords, vec!["part".to_string()]);
        assert_eq!(heading.allcaps_min_words, 3);
    }

    #[test]
    fn partial_heading_section_layers_on_mode_preset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("acrolex.yaml");
        std::fs::write(
            &path,
            "mode: definitions\nheading:\n  titlecase_max_words: 5\noutput:\n  delete_processed_sources: false\n",
        )
        .unwrap();
        let path = path.to_str().unwrap();

        let config = ExtractionConfig::load_from_file(path).unwrap();
        let heading = config.heading_config();
        assert_eq!(heading.titlecase_max_words, 5);
        assert_eq!(heading.allcaps_min_words, 2);
        assert_eq!(heading.keywords, HeadingConfig::definitions().keywords);

        let fallback = ExtractionConfig::load_with_fallback(Some(path));
        assert_eq!(fallback.mode, ProcessingMode::Definitions);
        assert!(!fallback.output.delete_processed_sources);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = ExtractionConfig::load_with_fallback(Some("/nonexistent/acrolex.yaml"));
        assert_eq!(config.mode, ProcessingMode::Vocabulary);
    }
}
