use crate::config::LongFormConfig;
use std::collections::HashSet;

/// Schwartz-Hearst long form matching.
///
/// Short-form characters are aligned against the candidate clause from right
/// to left. Each character consumes the nearest case-insensitive match to the
/// left of the previous one; the first short-form character must additionally
/// sit at the start of a word. The long form then starts at the word boundary
/// at or before the first aligned character.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongFormMatcher;

impl LongFormMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Long forms are assumed to sit right before the short form, so only the
    /// trailing `min(len + 5, len * 2)` words of the clause are considered.
    pub fn max_words(short_form_len: usize) -> usize {
        std::cmp::min(short_form_len + 5, short_form_len * 2)
    }

    pub fn bound_candidate(short_form: &str, candidate: &str) -> String {
        let max_words = Self::max_words(short_form.chars().count());
        let words: Vec<&str> = candidate.split_whitespace().collect();

        if words.len() > max_words {
            words[words.len() - max_words..].join(" ")
        } else {
            candidate.to_string()
        }
    }

    pub fn find_long_form(&self, short_form: &str, candidate: &str) -> Option<String> {
        let short_form: Vec<char> = short_form.trim().chars().collect();
        let candidate = candidate.trim();

        if short_form.is_empty() || candidate.chars().count() < short_form.len() {
            return None;
        }

        let sf_string: String = short_form.iter().collect();
        let long_form: Vec<char> = Self::bound_candidate(&sf_string, candidate)
            .chars()
            .collect();

        // cursor into long_form; one past the next position to inspect
        let mut cursor = long_form.len();

        for (sf_index, &sf_char) in short_form.iter().enumerate().rev() {
            if !sf_char.is_alphanumeric() {
                continue;
            }

            loop {
                if cursor == 0 {
                    return None;
                }
                let lf_index = cursor - 1;
                let matches = same_letter(long_form[lf_index], sf_char);
                let at_word_start = lf_index == 0 || !long_form[lf_index - 1].is_alphanumeric();
                cursor -= 1;

                if matches && (sf_index > 0 || at_word_start) {
                    break;
                }
            }
        }

        let mut start = cursor;
        while start > 0 && !long_form[start - 1].is_whitespace() {
            start -= 1;
        }

        let matched: String = long_form[start..].iter().collect();
        let matched = matched.trim();
        if matched.is_empty() {
            None
        } else {
            Some(matched.to_string())
        }
    }
}

fn same_letter(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Tidies a matched long form before validation: leading stopwords and
/// lowercase words go, trailing punctuation on the last word goes, and the
/// result starts with a capital.
#[derive(Debug, Clone)]
pub struct LongFormCleaner {
    leading_stopwords: HashSet<String>,
}

impl Default for LongFormCleaner {
    fn default() -> Self {
        Self::new(&LongFormConfig::default())
    }
}

impl LongFormCleaner {
    pub fn new(config: &LongFormConfig) -> Self {
        Self {
            leading_stopwords: config
                .leading_stopwords
                .iter()
                .map(|w| w.to_lowercase())
                .collect(),
        }
    }

    pub fn clean(&self, long_form: &str) -> String {
        let mut words: Vec<&str> = long_form.split_whitespace().collect();

        let drop_count = words
            .iter()
            .take_while(|w| {
                self.leading_stopwords.contains(&w.to_lowercase())
                    || !w.chars().next().is_some_and(char::is_uppercase)
            })
            .count();
        words.drain(..drop_count);

        if let Some(last) = words.pop() {
            words.push(last.trim_end_matches(['.', ',', ';', ':', '!', '?']));
        }

        let joined = words.join(" ");
        let mut chars = joined.chars();
        match chars.next() {
            Some(first) if first.is_lowercase() => first.to_uppercase().chain(chars).collect(),
            _ => joined,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nato_matches_full_organisation_name() {
        let matched =
            LongFormMatcher::new().find_long_form("NATO", "the North Atlantic Treaty Organization");
        assert_eq!(matched.as_deref(), Some("North Atlantic Treaty Organization"));
    }

    #[test]
    fn match_stops_at_word_boundary() {
        let matched = LongFormMatcher::new()
            .find_long_form("RD", "annual report on Research And Development");
        assert_eq!(matched.as_deref(), Some("Research And Development"));
    }

    #[test]
    fn hyphenated_words_stay_whole() {
        let matched = LongFormMatcher::new()
            .find_long_form("ASW", "conducted Anti-Submarine Warfare");
        assert_eq!(matched.as_deref(), Some("Anti-Submarine Warfare"));
    }

    #[test]
    fn first_letter_must_start_a_word() {
        let matcher = LongFormMatcher::new();
        // the only X sits inside "eXtensible"
        assert_eq!(matcher.find_long_form("XML", "the eXtensible Markup Language"), None);
        assert_eq!(
            matcher
                .find_long_form("XML", "the Xtended Markup Language")
                .as_deref(),
            Some("Xtended Markup Language")
        );
        assert_eq!(
            matcher.find_long_form("ROV", "a Remotely Operated Vehicle").as_deref(),
            Some("Remotely Operated Vehicle")
        );
    }

    #[test]
    fn missing_letters_give_no_match() {
        assert_eq!(
            LongFormMatcher::new().find_long_form("XYZ", "the fleet sailed north"),
            None
        );
    }

    #[test]
    fn candidate_shorter_than_short_form_is_rejected() {
        assert_eq!(LongFormMatcher::new().find_long_form("NATO", "NAT"), None);
    }

    #[test]
    fn candidate_is_bounded_to_trailing_words() {
        assert_eq!(LongFormMatcher::max_words(2), 4);
        assert_eq!(LongFormMatcher::max_words(4), 8);
        assert_eq!(LongFormMatcher::max_words(6), 11);

        let bounded = LongFormMatcher::bound_candidate(
            "GPS",
            "data from the old and unreliable Global Positioning System",
        );
        assert_eq!(bounded, "old and unreliable Global Positioning System");

        // G only occurs before the bounded window
        assert_eq!(
            LongFormMatcher::new().find_long_form("GR", "grand harbour was a safe anchorage for ships"),
            None
        );
    }

    #[test]
    fn cleaner_trims_leading_words_and_punctuation() {
        let cleaner = LongFormCleaner::default();
        assert_eq!(
            cleaner.clean("the Naval Sea Systems Command,"),
            "Naval Sea Systems Command"
        );
        assert_eq!(
            cleaner.clean("and then Fleet Readiness Center."),
            "Fleet Readiness Center"
        );
        assert_eq!(cleaner.clean("the end of the"), "");
    }
}
