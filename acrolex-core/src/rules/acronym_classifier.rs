use crate::config::AcronymConfig;
use crate::types::TokenKind;
use std::collections::HashSet;

// AcronymClassifier - decides whether a token reads as an acronym.
//
// Two separate questions live here:
// - `is_acronym`: loose vocabulary-mode test applied to every surviving token
// - `is_valid_acronym`: strict short-form test used for "(ABC)" candidates and
//   for standalone uppercase tokens in definitions mode
pub struct AcronymClassifier {
    known_mixed_case: HashSet<String>,
    false_positives: HashSet<String>,
    min_len: usize,
    max_len: usize,
}

impl Default for AcronymClassifier {
    fn default() -> Self {
        Self::new(&AcronymConfig::default())
    }
}

impl AcronymClassifier {
    pub fn new(config: &AcronymConfig) -> Self {
        Self {
            known_mixed_case: config
                .known_mixed_case
                .iter()
                .map(|t| t.to_lowercase())
                .collect(),
            false_positives: config.false_positives.iter().cloned().collect(),
            min_len: config.min_short_form_len,
            max_len: config.max_short_form_len,
        }
    }

    pub fn classify(&self, token: &str) -> TokenKind {
        if self.is_acronym(token) {
            TokenKind::Acronym
        } else {
            TokenKind::Word
        }
    }

    pub fn is_acronym(&self, token: &str) -> bool {
        if self.known_mixed_case.contains(&token.to_lowercase()) {
            return true;
        }

        let chars: Vec<char> = token.chars().collect();
        let len = chars.len();
        let upper_count = chars.iter().filter(|c| c.is_uppercase()).count();

        if len >= 2 && is_all_uppercase(token) {
            return true;
        }

        if upper_count >= 2 && len <= 6 {
            return true;
        }

        len >= 3
            && upper_count >= 2
            && chars
                .windows(2)
                .any(|pair| pair[0].is_uppercase() && pair[1].is_uppercase())
    }

    pub fn is_valid_acronym(&self, text: &str) -> bool {
        if text.is_empty() || !is_all_uppercase(text) {
            return false;
        }
        if !text.chars().all(char::is_alphabetic) {
            return false;
        }

        let len = text.chars().count();
        if len < self.min_len || len > self.max_len {
            return false;
        }

        // "AA", "X"
        let distinct: HashSet<char> = text.chars().collect();
        if distinct.len() == 1 && len <= 2 {
            return false;
        }

        !self.false_positives.contains(text)
    }
}

/// Has at least one cased character and none of them lowercase.
fn is_all_uppercase(text: &str) -> bool {
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_caps_token_is_acronym() {
        let classifier = AcronymClassifier::default();
        assert_eq!(classifier.classify("USN"), TokenKind::Acronym);
        assert_eq!(classifier.classify("NATO"), TokenKind::Acronym);
    }

    #[test]
    fn capitalised_word_is_ordinary() {
        let classifier = AcronymClassifier::default();
        assert_eq!(classifier.classify("Ship"), TokenKind::Word);
        assert_eq!(classifier.classify("destroyer"), TokenKind::Word);
    }

    #[test]
    fn known_mixed_case_terms() {
        let classifier = AcronymClassifier::default();
        assert!(classifier.is_acronym("PhD"));
        assert!(classifier.is_acronym("iPhone"));
        assert!(classifier.is_acronym("YouTube"));
    }

    #[test]
    fn mixed_case_rules() {
        let classifier = AcronymClassifier::default();
        // two capitals in a short token
        assert!(classifier.is_acronym("SoNaR"));
        // long token with adjacent capitals
        assert!(classifier.is_acronym("NAVSEAsystems"));
        // long token, two capitals, never adjacent
        assert!(!classifier.is_acronym("McDonaldson"));
    }

    #[test]
    fn classification_is_stable() {
        let classifier = AcronymClassifier::default();
        for token in ["USN", "Ship", "iPhone", "SoNaR", "McDonaldson"] {
            let first = classifier.classify(token);
            let strict = classifier.is_valid_acronym(token);
            for _ in 0..5 {
                assert_eq!(classifier.classify(token), first);
                assert_eq!(classifier.is_valid_acronym(token), strict);
            }
        }
    }

    #[test]
    fn valid_short_forms() {
        let classifier = AcronymClassifier::default();
        assert!(classifier.is_valid_acronym("NATO"));
        assert!(classifier.is_valid_acronym("RD"));
        assert!(classifier.is_valid_acronym("AAA"));
    }

    #[test]
    fn rejected_short_forms() {
        let classifier = AcronymClassifier::default();
        for text in ["", "AA", "N", "OK", "PM", "Nato", "N4TO", "ABCDEFGHIJK"] {
            assert!(!classifier.is_valid_acronym(text), "{text} should be rejected");
        }
    }
}
