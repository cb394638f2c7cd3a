use crate::config::LongFormConfig;

// ============================================================================
// LONG FORM VALIDATION - rejects matches that do not read like a definition
// ============================================================================

/// A single acceptance check on a matched long form
trait LongFormRule {
    fn accepts(&self, short_form: &str, long_form: &str, words: &[&str]) -> bool;
    fn name(&self) -> &str;
}

/// Minimum length: at least 3 characters and 2 words
struct MinimumSizeRule;

impl LongFormRule for MinimumSizeRule {
    fn accepts(&self, _short_form: &str, long_form: &str, words: &[&str]) -> bool {
        long_form.chars().count() >= 3 && words.len() >= 2
    }

    fn name(&self) -> &str {
        "MinimumSizeRule"
    }
}

/// An all-uppercase phrase of 3+ words is a heading fragment
struct HeadingFragmentRule;

impl LongFormRule for HeadingFragmentRule {
    fn accepts(&self, _short_form: &str, long_form: &str, words: &[&str]) -> bool {
        let all_upper = long_form.chars().any(char::is_uppercase)
            && !long_form.chars().any(char::is_lowercase);
        !(all_upper && words.len() >= 3)
    }

    fn name(&self) -> &str {
        "HeadingFragmentRule"
    }
}

/// Verbs like " is " or " were " mark a sentence, not a noun phrase
struct VerbMarkerRule {
    markers: Vec<String>,
}

impl LongFormRule for VerbMarkerRule {
    fn accepts(&self, _short_form: &str, long_form: &str, _words: &[&str]) -> bool {
        let lower = long_form.to_lowercase();
        !self.markers.iter().any(|marker| lower.contains(marker.as_str()))
    }

    fn name(&self) -> &str {
        "VerbMarkerRule"
    }
}

/// Enough words must start with a capital letter
struct CapitalizationRule {
    min_ratio: f32,
}

impl LongFormRule for CapitalizationRule {
    fn accepts(&self, _short_form: &str, _long_form: &str, words: &[&str]) -> bool {
        if words.is_empty() {
            return false;
        }
        let capitalized = words
            .iter()
            .filter(|w| w.chars().next().is_some_and(char::is_uppercase))
            .count();
        capitalized as f32 / words.len() as f32 >= self.min_ratio
    }

    fn name(&self) -> &str {
        "CapitalizationRule"
    }
}

/// Short-form letters must line up, in order, with enough word initials
struct InitialsRule {
    min_ratio: f32,
}

impl InitialsRule {
    fn initials(words: &[&str]) -> Vec<char> {
        words
            .iter()
            .filter_map(|w| w.chars().next())
            .filter(|c| c.is_alphabetic())
            .flat_map(char::to_uppercase)
            .collect()
    }

    fn match_ratio(short_form: &str, words: &[&str]) -> f32 {
        let initials = Self::initials(words);
        let sf_len = short_form.chars().count();
        if sf_len == 0 {
            return 0.0;
        }

        let mut matches = 0;
        let mut cursor = 0;
        for sf_char in short_form.chars() {
            while cursor < initials.len() {
                let initial = initials[cursor];
                cursor += 1;
                if initial == sf_char {
                    matches += 1;
                    break;
                }
            }
        }

        matches as f32 / sf_len as f32
    }
}

impl LongFormRule for InitialsRule {
    fn accepts(&self, short_form: &str, _long_form: &str, words: &[&str]) -> bool {
        Self::match_ratio(short_form, words) >= self.min_ratio
    }

    fn name(&self) -> &str {
        "InitialsRule"
    }
}

/// Rule-based acceptance of a matched long form
pub struct LongFormValidator {
    rules: Vec<Box<dyn LongFormRule + Send + Sync>>,
}

impl Default for LongFormValidator {
    fn default() -> Self {
        Self::new(&LongFormConfig::default())
    }
}

impl LongFormValidator {
    pub fn new(config: &LongFormConfig) -> Self {
        Self {
            rules: vec![
                Box::new(MinimumSizeRule),
                Box::new(HeadingFragmentRule),
                Box::new(VerbMarkerRule {
                    markers: config.verb_markers.iter().map(|m| m.to_lowercase()).collect(),
                }),
                Box::new(CapitalizationRule {
                    min_ratio: config.min_capitalized_ratio,
                }),
                Box::new(InitialsRule {
                    min_ratio: config.min_initials_ratio,
                }),
            ],
        }
    }

    pub fn validate(&self, short_form: &str, long_form: &str) -> bool {
        self.first_failure(short_form, long_form).is_none()
    }

    /// Name of the first rule that rejects the pair, if any
    pub fn first_failure(&self, short_form: &str, long_form: &str) -> Option<&str> {
        let words: Vec<&str> = long_form.split_whitespace().collect();

        self.rules
            .iter()
            .find(|rule| !rule.accepts(short_form, long_form, &words))
            .map(|rule| rule.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_nato_definition() {
        let validator = LongFormValidator::default();
        assert!(validator.validate("NATO", "North Atlantic Treaty Organization"));
    }

    #[test]
    fn rejects_sentence_fragment() {
        let validator = LongFormValidator::default();
        assert!(!validator.validate("ITB", "is the best"));
        // markers are space-padded, so a leading "is" is left to the capitalisation check
        assert_eq!(
            validator.first_failure("ITB", "is the best"),
            Some("CapitalizationRule")
        );
    }

    #[test]
    fn rejects_phrase_with_inner_verb() {
        let validator = LongFormValidator::default();
        assert_eq!(
            validator.first_failure("FIB", "Fleet Inspection is Best"),
            Some("VerbMarkerRule")
        );
        assert_eq!(
            validator.first_failure("SWE", "Ships Were Escorted"),
            Some("VerbMarkerRule")
        );
    }

    #[test]
    fn rejects_short_or_single_word() {
        let validator = LongFormValidator::default();
        assert_eq!(validator.first_failure("NA", ""), Some("MinimumSizeRule"));
        assert_eq!(validator.first_failure("NA", "Na"), Some("MinimumSizeRule"));
        assert_eq!(validator.first_failure("NAV", "Navigation"), Some("MinimumSizeRule"));
    }

    #[test]
    fn rejects_uppercase_heading_fragment() {
        let validator = LongFormValidator::default();
        assert_eq!(
            validator.first_failure("FOS", "FLEET OPERATIONS SUMMARY"),
            Some("HeadingFragmentRule")
        );
        // two uppercase words are still acceptable
        assert!(validator.validate("FO", "FLEET OPERATIONS"));
    }

    #[test]
    fn rejects_mostly_lowercase_phrase() {
        let validator = LongFormValidator::default();
        assert_eq!(
            validator.first_failure("DPS", "data processing System"),
            Some("CapitalizationRule")
        );
    }

    #[test]
    fn rejects_unrelated_initials() {
        let validator = LongFormValidator::default();
        assert_eq!(
            validator.first_failure("XYZ", "Fleet Readiness Center"),
            Some("InitialsRule")
        );
        // one of three letters is enough (>= 0.3)
        assert!(validator.validate("FXY", "Fleet Readiness Center"));
    }

    #[test]
    fn initials_are_consumed_in_order() {
        assert_eq!(
            InitialsRule::match_ratio("NATO", &["North", "Atlantic", "Treaty", "Organization"]),
            1.0
        );
        // "T" consumes the last initial, leaving nothing for "A"
        assert_eq!(InitialsRule::match_ratio("TA", &["Atlantic", "Treaty"]), 0.5);
    }
}
