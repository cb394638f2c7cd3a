// Main rules module - the extraction rules, one concern per file:
// - heading_detection.rs: lexical heading lines, two mode presets
// - token_normalizer.rs: vocabulary-mode tokenization and filtering
// - acronym_classifier.rs: acronym vs ordinary word, strict short-form test
// - candidate_extraction.rs: "long form (SHORT)" candidates and standalone scan
// - long_form.rs: Schwartz-Hearst backward matching and long form cleanup
// - validation.rs: rule-based acceptance of a matched long form
//
// Every rule here is a pure function of its input and configuration. A rule
// that does not apply answers `false` or `None`; none of them return errors
// for unmatched input.

pub mod acronym_classifier;
pub mod candidate_extraction;
pub mod heading_detection;
pub mod long_form;
pub mod token_normalizer;
pub mod validation;

pub use acronym_classifier::AcronymClassifier;
pub use candidate_extraction::CandidateExtractor;
pub use heading_detection::HeadingClassifier;
pub use long_form::{LongFormCleaner, LongFormMatcher};
pub use token_normalizer::TokenNormalizer;
pub use validation::LongFormValidator;
