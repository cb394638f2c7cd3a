use crate::config::HeadingConfig;
use anyhow::Result;
use regex::Regex;

// HeadingClassifier - lexical heading detection for a single line of text.
// A line is a heading when ANY of the rules below fires; there is no ordering
// between them.
pub struct HeadingClassifier {
    config: HeadingConfig,
    numbering: Regex,
}

impl HeadingClassifier {
    pub fn new(config: HeadingConfig) -> Result<Self> {
        let keywords = config
            .keywords
            .iter()
            .map(|k| k.to_lowercase())
            .collect();

        Ok(Self {
            config: HeadingConfig { keywords, ..config },
            // "1. ", "1.2 ", "IV. "
            numbering: Regex::new(r"^(\d+\.|\d+\.\d+|[IVXLCDM]+\.)\s+")?,
        })
    }

    pub fn is_heading(&self, line: &str) -> bool {
        let line = line.trim();
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            return false;
        }

        self.is_allcaps_heading(line, words.len())
            || self.is_titlecase_heading(&words)
            || self.starts_with_keyword(line)
            || line.ends_with(':')
            || self.numbering.is_match(line)
    }

    /// Split `text` on newlines and drop heading lines.
    /// Returns the remaining text and the number of lines removed.
    pub fn strip_headings(&self, text: &str) -> (String, usize) {
        let mut removed = 0;
        let body: Vec<&str> = text
            .split('\n')
            .filter(|line| {
                let heading = self.is_heading(line);
                if heading {
                    removed += 1;
                }
                !heading
            })
            .collect();

        (body.join("\n"), removed)
    }

    fn is_allcaps_heading(&self, line: &str, word_count: usize) -> bool {
        is_uppercase_text(line)
            && word_count >= self.config.allcaps_min_words
            && word_count <= self.config.allcaps_max_words
    }

    fn is_titlecase_heading(&self, words: &[&str]) -> bool {
        if words.len() < self.config.titlecase_min_words
            || words.len() > self.config.titlecase_max_words
        {
            return false;
        }

        let capitalized = words
            .iter()
            .filter(|w| w.chars().next().is_some_and(char::is_uppercase))
            .count();

        capitalized as f32 / words.len() as f32 >= self.config.titlecase_ratio
    }

    fn starts_with_keyword(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        self.config
            .keywords
            .iter()
            .any(|keyword| lower.starts_with(keyword.as_str()))
    }
}

/// At least one cased character and no lowercase ones. Digits, punctuation
/// and spaces do not count against the line.
pub fn is_uppercase_text(text: &str) -> bool {
    let mut has_cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocabulary() -> HeadingClassifier {
        HeadingClassifier::new(HeadingConfig::vocabulary()).unwrap()
    }

    fn definitions() -> HeadingClassifier {
        HeadingClassifier::new(HeadingConfig::definitions()).unwrap()
    }

    #[test]
    fn empty_line_is_never_a_heading() {
        assert!(!vocabulary().is_heading(""));
        assert!(!vocabulary().is_heading("   \t"));
    }

    #[test]
    fn chapter_line_is_heading() {
        for classifier in [vocabulary(), definitions()] {
            assert!(classifier.is_heading("CHAPTER 1: INTRODUCTION"));
        }
    }

    #[test]
    fn allcaps_word_bounds_differ_per_preset() {
        // single uppercase word: vocabulary allows 1 word, definitions needs 2
        assert!(vocabulary().is_heading("OVERVIEW"));
        assert!(!definitions().is_heading("OVERVIEW"));

        let thirteen = "A B C D E F G H I J K L M";
        assert!(!vocabulary().is_heading(thirteen));
        assert!(!definitions().is_heading(thirteen));
    }

    #[test]
    fn titlecase_range_differs_per_preset() {
        let seven_words = "Fleet Maintenance And Repair Of Surface Vessels";
        assert!(!vocabulary().is_heading(seven_words));
        assert!(definitions().is_heading(seven_words));
    }

    #[test]
    fn titlecase_ratio_threshold() {
        // 2 of 3 capitalised = 0.67 < 0.7
        assert!(!vocabulary().is_heading("Fleet Maintenance schedule"));
        // 3 of 4 capitalised = 0.75
        assert!(vocabulary().is_heading("Fleet Maintenance Schedule overview"));
    }

    #[test]
    fn keyword_prefix_is_heading() {
        assert!(vocabulary().is_heading("appendix b lists every signal code used"));
        assert!(definitions().is_heading("preface to the revised edition of this manual"));
        assert!(!vocabulary().is_heading("preface to the revised edition of this manual"));
    }

    #[test]
    fn colon_and_numbering_rules() {
        let classifier = vocabulary();
        assert!(classifier.is_heading("the following ships were inspected:"));
        assert!(classifier.is_heading("1. the ship left port at dawn and sailed north"));
        assert!(classifier.is_heading("2.3 the escort group joined the convoy later"));
        assert!(classifier.is_heading("IV. the fleet returned to harbour in the spring"));
        assert!(!classifier.is_heading("the ship left port at dawn and sailed north"));
    }

    #[test]
    fn body_sentence_is_not_heading() {
        let line = "The fleet sailed from the harbour before the storm arrived.";
        assert!(!vocabulary().is_heading(line));
        assert!(!definitions().is_heading(line));
    }

    #[test]
    fn decision_is_stable() {
        let classifier = definitions();
        let line = "Naval Operations Summary";
        let first = classifier.is_heading(line);
        for _ in 0..5 {
            assert_eq!(classifier.is_heading(line), first);
        }
    }

    #[test]
    fn strip_headings_counts_removed_lines() {
        let text = "CHAPTER 1: INTRODUCTION\nthe ship sailed north with the escort group\nSummary:";
        let (body, removed) = definitions().strip_headings(text);
        assert_eq!(removed, 2);
        assert_eq!(body, "the ship sailed north with the escort group");
    }
}
