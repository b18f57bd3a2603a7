pub mod stopwords;
pub mod tokenize;

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::error::Error;
use stopwords::StopwordFilter;
use tokenize::{EnglishTokenizer, Tokenizer};

/// Default number of sentences in a summary.
pub const DEFAULT_SENTENCE_COUNT: usize = 5;

/// A sentence with its frequency score and original position.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredSentence {
    pub text: String,
    pub score: usize,
    /// Zero-based position in the source text. Duplicate sentence text is
    /// kept distinct by position.
    pub position: usize,
}

/// Frequency-based extractive summarizer.
///
/// Scores every sentence by the summed corpus frequency of its words and
/// selects the top-k. Pure: identical input always yields identical output.
pub struct Summarizer {
    tokenizer: Box<dyn Tokenizer>,
    stopwords: StopwordFilter,
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Summarizer {
    /// Summarizer with the built-in English tokenizer and stopword set.
    pub fn new() -> Self {
        Self {
            tokenizer: Box::new(EnglishTokenizer),
            stopwords: StopwordFilter::default(),
        }
    }

    /// Use the stopword set for the given language tag.
    pub fn for_language(language: &str) -> Self {
        Self {
            tokenizer: Box::new(EnglishTokenizer),
            stopwords: StopwordFilter::for_language(language),
        }
    }

    /// Replace the stopword set.
    pub fn with_stopwords(mut self, stopwords: StopwordFilter) -> Self {
        self.stopwords = stopwords;
        self
    }

    /// Replace the tokenizer.
    pub fn with_tokenizer(mut self, tokenizer: Box<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Produce an extractive summary of at most `sentence_count` sentences,
    /// joined by single spaces in descending score order.
    ///
    /// Empty text produces an empty summary. A `sentence_count` larger than
    /// the number of available sentences returns every sentence in score
    /// order. Ties break toward the earlier sentence.
    pub fn summarize(&self, text: &str, sentence_count: usize) -> Result<String, Error> {
        let ranked = self.rank_sentences(text)?;
        let take = sentence_count.min(ranked.len());
        let summary = ranked[..take]
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        debug!(
            sentences_in = ranked.len(),
            sentences_out = take,
            "summarized text"
        );
        Ok(summary)
    }

    /// Score every sentence and return them in rank order (descending
    /// score, earlier position first on ties).
    pub fn rank_sentences(&self, text: &str) -> Result<Vec<ScoredSentence>, Error> {
        let sentences = self.tokenizer.sentences(text)?;
        if sentences.is_empty() {
            return Ok(Vec::new());
        }

        let freq = self.word_frequencies(text)?;

        let mut scored = Vec::with_capacity(sentences.len());
        for (position, text) in sentences.into_iter().enumerate() {
            // Per-sentence words are NOT stopword-filtered: stopwords are
            // absent from the table and contribute 0. Re-filtering here
            // would change scores for sentences dense in stopwords.
            let score = self
                .tokenizer
                .words(&text)?
                .iter()
                .map(|w| freq.get(&w.to_lowercase()).copied().unwrap_or(0))
                .sum();
            scored.push(ScoredSentence {
                text,
                score,
                position,
            });
        }

        scored.sort_by(|a, b| b.score.cmp(&a.score).then(a.position.cmp(&b.position)));
        Ok(scored)
    }

    /// Count occurrences of each normalized word across the whole text.
    /// Words are lowercased; pure punctuation tokens and stopwords are
    /// excluded.
    pub fn word_frequencies(&self, text: &str) -> Result<HashMap<String, usize>, Error> {
        let mut freq = HashMap::new();
        for token in self.tokenizer.words(text)? {
            let token = token.to_lowercase();
            if is_punctuation(&token) || self.stopwords.contains(&token) {
                continue;
            }
            *freq.entry(token).or_insert(0) += 1;
        }
        Ok(freq)
    }
}

fn is_punctuation(token: &str) -> bool {
    !token.chars().any(|c| c.is_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PETS: &str = "Cats are great. Dogs are great too. Cats and dogs are pets.";

    fn pets_summarizer() -> Summarizer {
        Summarizer::new().with_stopwords(StopwordFilter::from_list(["are", "and", "too"]))
    }

    #[test]
    fn empty_text_empty_summary() {
        let s = Summarizer::new();
        assert_eq!(s.summarize("", 5).unwrap(), "");
        assert_eq!(s.summarize("", 1).unwrap(), "");
    }

    #[test]
    fn frequency_scoring_picks_richest_sentence() {
        // cats=2 dogs=2 great=2 pets=1: sentence 3 scores 5, the others 4.
        let out = pets_summarizer().summarize(PETS, 1).unwrap();
        assert_eq!(out, "Cats and dogs are pets.");
    }

    #[test]
    fn tie_breaks_toward_earlier_sentence() {
        // Sentences 1 and 2 both score 4; rank order puts sentence 1 second.
        let out = pets_summarizer().summarize(PETS, 2).unwrap();
        assert_eq!(out, "Cats and dogs are pets. Cats are great.");
    }

    #[test]
    fn count_exceeding_sentences_returns_all_in_score_order() {
        let out = pets_summarizer().summarize(PETS, 10).unwrap();
        assert_eq!(
            out,
            "Cats and dogs are pets. Cats are great. Dogs are great too."
        );
    }

    #[test]
    fn output_sentence_count_is_min() {
        let s = pets_summarizer();
        for n in 0..5 {
            let ranked = s.rank_sentences(PETS).unwrap();
            let out = s.summarize(PETS, n).unwrap();
            let got = if out.is_empty() {
                0
            } else {
                EnglishTokenizer.sentences(&out).unwrap().len()
            };
            assert_eq!(got, n.min(ranked.len()));
        }
    }

    #[test]
    fn output_sentences_are_verbatim() {
        let out = pets_summarizer().summarize(PETS, 3).unwrap();
        for sentence in EnglishTokenizer.sentences(&out).unwrap() {
            assert!(PETS.contains(&sentence));
        }
    }

    #[test]
    fn deterministic() {
        let s = Summarizer::new();
        let text = "The quick brown fox jumps. The lazy dog sleeps. Foxes jump over dogs. \
                    Quick foxes are quick. Dogs sleep all day.";
        let a = s.summarize(text, 2).unwrap();
        let b = s.summarize(text, 2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn stopwords_excluded_from_table_but_not_refiltered() {
        let s = pets_summarizer();
        let freq = s.word_frequencies(PETS).unwrap();
        assert_eq!(freq.get("cats"), Some(&2));
        assert_eq!(freq.get("are"), None);
        assert_eq!(freq.get("."), None);

        // Scores come only from table hits, so the heavy stopword density
        // of sentence 2 adds nothing.
        let ranked = s.rank_sentences(PETS).unwrap();
        assert_eq!(ranked[0].score, 5);
        assert_eq!(ranked[1].score, 4);
        assert_eq!(ranked[2].score, 4);
    }

    #[test]
    fn duplicate_sentences_stay_distinct_by_position() {
        let text = "Cats rule. Cats rule. Dogs drool.";
        let s = Summarizer::new().with_stopwords(StopwordFilter::empty());
        let ranked = s.rank_sentences(text).unwrap();
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].position, 0);
        assert_eq!(ranked[1].position, 1);
        assert_eq!(ranked[0].text, ranked[1].text);
    }

    #[test]
    fn single_sentence_returned_whole() {
        let s = Summarizer::new();
        let out = s.summarize("Just one sentence here.", 5).unwrap();
        assert_eq!(out, "Just one sentence here.");
    }
}
