use super::acronym_classifier::AcronymClassifier;
use crate::config::{AcronymConfig, LongFormConfig};
use crate::types::AcronymCandidate;
use anyhow::Result;
use regex::Regex;

// CandidateExtractor - finds "long form (SHORT)" patterns in body text.
pub struct CandidateExtractor {
    pattern: Regex,
    standalone: Regex,
    sentence_markers: Vec<char>,
}

impl CandidateExtractor {
    pub fn new(acronyms: &AcronymConfig, long_form: &LongFormConfig) -> Result<Self> {
        // up to `window` chars of preceding text, then "(" 2-10 capitals ")"
        let pattern = format!(
            r"([^(]{{0,{window}}})\(([A-Z]{{{min},{max}}})\)",
            window = long_form.candidate_window,
            min = acronyms.min_short_form_len,
            max = acronyms.max_short_form_len,
        );

        let standalone = format!(
            r"\b[A-Z]{{{min},{max}}}\b",
            min = acronyms.min_short_form_len,
            max = acronyms.max_short_form_len,
        );

        Ok(Self {
            pattern: Regex::new(&pattern)?,
            standalone: Regex::new(&standalone)?,
            sentence_markers: long_form.sentence_markers.clone(),
        })
    }

    pub fn extract(&self, text: &str, acronyms: &AcronymClassifier) -> Vec<AcronymCandidate> {
        let mut candidates = Vec::new();

        for captures in self.pattern.captures_iter(text) {
            let (Some(preceding), Some(short_form)) = (captures.get(1), captures.get(2)) else {
                continue;
            };

            let short_form = short_form.as_str().trim();
            if !acronyms.is_valid_acronym(short_form) {
                log::debug!("Dropping candidate ({short_form}): not a valid short form");
                continue;
            }

            let clause = self.last_clause(preceding.as_str().trim());
            if clause.is_empty() {
                continue;
            }

            candidates.push(AcronymCandidate::new(short_form, clause));
        }

        candidates
    }

    /// Every uppercase run in `text` that passes the strict short-form test,
    /// in order of appearance, parenthesised ones included.
    pub fn standalone_acronyms<'t>(
        &self,
        text: &'t str,
        acronyms: &AcronymClassifier,
    ) -> Vec<&'t str> {
        self.standalone
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|token| acronyms.is_valid_acronym(token))
            .collect()
    }

    /// Keep only the text after the last sentence boundary mark.
    pub fn last_clause<'t>(&self, text: &'t str) -> &'t str {
        match text.rfind(self.sentence_markers.as_slice()) {
            Some(pos) => {
                // markers are single chars; step past the one found
                let marker_len = text[pos..].chars().next().map_or(1, char::len_utf8);
                text[pos + marker_len..].trim()
            }
            None => text,
        }
    }
}
