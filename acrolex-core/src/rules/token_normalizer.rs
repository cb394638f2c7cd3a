use crate::stopwords::Stopwords;
use anyhow::Result;
use regex::Regex;

// TokenNormalizer - vocabulary-mode tokenization of a body line.
//
// Parenthesised spans are removed before tokenizing, so neither the acronym
// nor its definition inside "(...)" ever reaches the classifier.
pub struct TokenNormalizer {
    parenthetical: Regex,
    token: Regex,
    roman_numeral: Regex,
    stopwords: Stopwords,
}

impl TokenNormalizer {
    pub fn new(stopwords: Stopwords) -> Result<Self> {
        Ok(Self {
            parenthetical: Regex::new(r"\s*\([^)]*\)")?,
            token: Regex::new(r"\b[a-zA-Z]{2,}\b")?,
            roman_numeral: Regex::new(
                r"(?i)^M{0,3}(CM|CD|D?C{0,3})(XC|XL|L?X{0,3})(IX|IV|V?I{0,3})$",
            )?,
            stopwords,
        })
    }

    pub fn strip_parentheticals(&self, line: &str) -> String {
        self.parenthetical.replace_all(line, "").into_owned()
    }

    pub fn is_roman_numeral(&self, token: &str) -> bool {
        !token.is_empty() && self.roman_numeral.is_match(token)
    }

    /// Tokens of `line` that survive filtering, in order of appearance.
    pub fn normalize(&self, line: &str) -> Vec<String> {
        let cleaned = self.strip_parentheticals(line);

        self.token
            .find_iter(&cleaned)
            .map(|m| m.as_str())
            .filter(|token| self.keep(token))
            .map(str::to_string)
            .collect()
    }

    fn keep(&self, token: &str) -> bool {
        token.is_ascii()
            && token.chars().all(|c| c.is_ascii_alphabetic())
            && !self.is_roman_numeral(token)
            && !self.stopwords.contains(&token.to_lowercase())
    }
}
