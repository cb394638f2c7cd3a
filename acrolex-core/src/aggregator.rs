use crate::types::AcronymMapping;
use std::collections::BTreeMap;

/// Frequency tables for one batch run.
///
/// Owned by the `DocumentProcessor` and threaded through every document. The
/// maps are ordered so snapshots come out sorted by key without a second pass.
///
/// A short form is never a key of both `mappings` and `standalone_acronyms`.
#[derive(Debug, Clone, Default)]
pub struct FrequencyAggregator {
    lowercase_words: BTreeMap<String, u64>,
    standalone_acronyms: BTreeMap<String, u64>,
    mappings: BTreeMap<String, AcronymMapping>,
}

/// Point-in-time copy of the aggregator, used for persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatorSnapshot {
    pub lowercase_words: Vec<(String, u64)>,
    pub standalone_acronyms: Vec<(String, u64)>,
    pub mappings: Vec<(String, AcronymMapping)>,
}

impl FrequencyAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_word(&mut self, word: &str) {
        *self.lowercase_words.entry(word.to_lowercase()).or_insert(0) += 1;
    }

    /// Count a standalone acronym occurrence unless it already has a definition.
    /// Returns whether it was counted.
    pub fn record_standalone(&mut self, acronym: &str) -> bool {
        if self.mappings.contains_key(acronym) {
            return false;
        }
        *self
            .standalone_acronyms
            .entry(acronym.to_string())
            .or_insert(0) += 1;
        true
    }

    /// Record an accepted definition. The first long form seen for a short
    /// form is kept; every call counts towards its frequency.
    ///
    /// Returns `true` when this call created the mapping.
    pub fn record_definition(&mut self, short_form: &str, long_form: &str) -> bool {
        if let Some(mapping) = self.mappings.get_mut(short_form) {
            if mapping.long_form != long_form {
                log::debug!(
                    "Keeping {short_form} = {}; ignoring later long form {long_form}",
                    mapping.long_form
                );
            }
            mapping.frequency += 1;
            return false;
        }

        // earlier documents may have seen it undefined
        if let Some(previous) = self.standalone_acronyms.remove(short_form) {
            log::debug!("{short_form} now defined; dropping {previous} standalone occurrences");
        }

        self.mappings.insert(
            short_form.to_string(),
            AcronymMapping {
                long_form: long_form.to_string(),
                frequency: 1,
            },
        );
        true
    }

    pub fn lowercase_words(&self) -> &BTreeMap<String, u64> {
        &self.lowercase_words
    }

    pub fn standalone_acronyms(&self) -> &BTreeMap<String, u64> {
        &self.standalone_acronyms
    }

    pub fn mappings(&self) -> &BTreeMap<String, AcronymMapping> {
        &self.mappings
    }

    pub fn mapping(&self, short_form: &str) -> Option<&AcronymMapping> {
        self.mappings.get(short_form)
    }

    pub fn is_empty(&self) -> bool {
        self.lowercase_words.is_empty()
            && self.standalone_acronyms.is_empty()
            && self.mappings.is_empty()
    }

    pub fn snapshot(&self) -> AggregatorSnapshot {
        AggregatorSnapshot {
            lowercase_words: self
                .lowercase_words
                .iter()
                .map(|(k, v)| (k.clone(), *v))
                .collect(),
            standalone_acronyms: self
                .standalone_acronyms
                .iter()
                .map(|(k, v)| (k.clone(), *v))
                .collect(),
            mappings: self
                .mappings
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// Clear all tables, starting a new batch.
    pub fn reset(&mut self) {
        self.lowercase_words.clear();
        self.standalone_acronyms.clear();
        self.mappings.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_are_counted_lowercased() {
        let mut aggregator = FrequencyAggregator::new();
        aggregator.record_word("Ship");
        aggregator.record_word("ship");
        aggregator.record_word("harbour");

        assert_eq!(aggregator.lowercase_words().get("ship"), Some(&2));
        assert_eq!(aggregator.lowercase_words().get("harbour"), Some(&1));
        assert!(!aggregator.lowercase_words().contains_key("Ship"));
    }

    #[test]
    fn first_long_form_wins_and_frequency_counts_all() {
        let mut aggregator = FrequencyAggregator::new();
        assert!(aggregator.record_definition("CIC", "Combat Information Center"));
        assert!(!aggregator.record_definition("CIC", "Commander In Chief"));

        let mapping = aggregator.mapping("CIC").unwrap();
        assert_eq!(mapping.long_form, "Combat Information Center");
        assert_eq!(mapping.frequency, 2);
    }

    #[test]
    fn defined_acronym_is_never_standalone() {
        let mut aggregator = FrequencyAggregator::new();
        aggregator.record_definition("NATO", "North Atlantic Treaty Organization");

        assert!(!aggregator.record_standalone("NATO"));
        assert!(aggregator.record_standalone("USN"));
        assert!(!aggregator.standalone_acronyms().contains_key("NATO"));
    }

    #[test]
    fn later_definition_moves_acronym_out_of_standalone() {
        let mut aggregator = FrequencyAggregator::new();
        aggregator.record_standalone("ASW");
        aggregator.record_standalone("ASW");
        aggregator.record_definition("ASW", "Anti-Submarine Warfare");

        assert!(!aggregator.standalone_acronyms().contains_key("ASW"));
        assert_eq!(aggregator.mapping("ASW").unwrap().frequency, 1);
    }

    #[test]
    fn snapshot_is_sorted_and_reset_clears() {
        let mut aggregator = FrequencyAggregator::new();
        aggregator.record_standalone("USN");
        aggregator.record_standalone("ASW");
        aggregator.record_word("vessel");

        let snapshot = aggregator.snapshot();
        let keys: Vec<&str> = snapshot
            .standalone_acronyms
            .iter()
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(keys, vec!["ASW", "USN"]);
        assert_eq!(snapshot.lowercase_words, vec![("vessel".to_string(), 1)]);

        aggregator.reset();
        assert!(aggregator.is_empty());
    }
}
