use crate::error::Error;

/// Splits raw text into sentences and words.
///
/// The trait is fallible so alternative tokenizers can reject malformed
/// input; the built-in English tokenizer never does.
pub trait Tokenizer {
    /// Ordered sentence list. Each returned sentence is a trimmed verbatim
    /// substring of the input.
    fn sentences(&self, text: &str) -> Result<Vec<String>, Error>;

    /// Word-level tokens. Standalone punctuation is emitted as its own
    /// token; downstream stages decide what to drop.
    fn words(&self, text: &str) -> Result<Vec<String>, Error>;
}

/// Rule-based English tokenizer.
///
/// Sentence boundaries are runs of `.` `!` `?` (plus trailing quotes or
/// parens) followed by whitespace or end of input, with a guard for common
/// abbreviations and single-letter initials. Words are maximal runs of
/// alphanumerics with interior apostrophes and hyphens kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishTokenizer;

const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "approx", "dept", "fig",
    "inc",
];

impl Tokenizer for EnglishTokenizer {
    fn sentences(&self, text: &str) -> Result<Vec<String>, Error> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut out = Vec::new();
        let mut start = 0usize;
        let mut i = 0usize;

        while i < chars.len() {
            let (pos, ch) = chars[i];
            if ch == '.' || ch == '!' || ch == '?' {
                // Swallow the whole terminator run and any closing quotes.
                let mut j = i + 1;
                while j < chars.len()
                    && matches!(chars[j].1, '.' | '!' | '?' | '"' | '\'' | '\u{201d}' | '\u{2019}' | ')')
                {
                    j += 1;
                }
                let at_end = j >= chars.len();
                let followed_by_space = !at_end && chars[j].1.is_whitespace();
                let abbrev = ch == '.' && j == i + 1 && is_abbreviation(&text[..pos]);

                if (at_end || followed_by_space) && !abbrev {
                    let end = if at_end { text.len() } else { chars[j].0 };
                    let sentence = text[start..end].trim();
                    if !sentence.is_empty() {
                        out.push(sentence.to_string());
                    }
                    start = end;
                }
                i = j;
            } else {
                i += 1;
            }
        }

        let tail = text[start..].trim();
        if !tail.is_empty() {
            out.push(tail.to_string());
        }

        Ok(out)
    }

    fn words(&self, text: &str) -> Result<Vec<String>, Error> {
        let mut out = Vec::new();
        let mut current = String::new();

        for ch in text.chars() {
            let word_char = ch.is_alphanumeric()
                || (!current.is_empty() && matches!(ch, '\'' | '\u{2019}' | '-'));
            if word_char {
                current.push(ch);
            } else {
                flush_word(&mut current, &mut out);
                if !ch.is_whitespace() {
                    out.push(ch.to_string());
                }
            }
        }
        flush_word(&mut current, &mut out);

        Ok(out)
    }
}

fn flush_word(current: &mut String, out: &mut Vec<String>) {
    if current.is_empty() {
        return;
    }
    // A trailing apostrophe or hyphen belongs to punctuation, not the word.
    // The first char is always alphanumeric, so this never trims to empty.
    let trimmed = current.trim_end_matches(['\'', '\u{2019}', '-']);
    out.push(trimmed.to_string());
    current.clear();
}

/// True when the text ends in a token that takes a period without closing
/// a sentence: a known abbreviation or a single-letter initial (covers
/// names like "J. Smith" and the tails of "e.g." / "i.e.").
fn is_abbreviation(before: &str) -> bool {
    let word: String = before
        .chars()
        .rev()
        .take_while(|c| c.is_alphabetic())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if word.is_empty() {
        return false;
    }
    if word.chars().count() == 1 {
        return true;
    }
    ABBREVIATIONS.contains(&word.to_lowercase().as_str())
}
