use std::collections::HashSet;

use stop_words::{get, LANGUAGE};

/// A stopword set used to exclude high-frequency, low-information words
/// from the frequency table. Built once, up front; there is no hidden
/// corpus download behind the first lookup.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    words: HashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::for_language("en")
    }
}

impl StopwordFilter {
    /// Build the stopword set for a language tag. Unknown tags fall back
    /// to English.
    pub fn for_language(language: &str) -> Self {
        let lang = match language.to_lowercase().as_str() {
            "en" | "english" => LANGUAGE::English,
            "de" | "german" => LANGUAGE::German,
            "fr" | "french" => LANGUAGE::French,
            "es" | "spanish" => LANGUAGE::Spanish,
            "it" | "italian" => LANGUAGE::Italian,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            "nl" | "dutch" => LANGUAGE::Dutch,
            _ => LANGUAGE::English,
        };
        let words = get(lang).iter().map(|w| w.to_lowercase()).collect();
        Self { words }
    }

    /// An empty set (no filtering).
    pub fn empty() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    /// Build from an explicit word list. Used by tests and by callers that
    /// want full control over the set.
    pub fn from_list<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().to_lowercase())
            .collect();
        Self { words }
    }

    /// Add extra stopwords (e.g. from config) on top of the base set.
    pub fn add_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for w in words {
            self.words.insert(w.as_ref().to_lowercase());
        }
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_defaults() {
        let sw = StopwordFilter::default();
        assert!(sw.contains("the"));
        assert!(sw.contains("The"));
        assert!(sw.contains("is"));
        assert!(!sw.contains("transcript"));
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        let sw = StopwordFilter::for_language("tlh");
        assert!(sw.contains("the"));
    }

    #[test]
    fn custom_list_and_additions() {
        let mut sw = StopwordFilter::from_list(["are", "and", "too"]);
        assert!(sw.contains("and"));
        assert!(!sw.contains("the"));

        sw.add_words(["Like"]);
        assert!(sw.contains("like"));
    }

    #[test]
    fn empty_set_filters_nothing() {
        let sw = StopwordFilter::empty();
        assert!(!sw.contains("the"));
        assert!(sw.is_empty());
    }
}
