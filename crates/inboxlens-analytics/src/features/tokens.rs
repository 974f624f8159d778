//! Tokenization and phrase matching.

use super::model::Hits;
use crate::config::Lexicon;

/// Minimum length of an all-caps word that counts as shouting.
const SHOUTED_MIN_LEN: usize = 5;

/// Lexical statistics of a piece of text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextScan {
    /// Lowercased word tokens, URLs excluded.
    pub tokens: Vec<String>,
    /// URL-looking chunks.
    pub links: u32,
    /// Alphabetic characters outside URLs.
    pub letters: u32,
    /// Uppercase characters outside URLs.
    pub uppercase: u32,
    /// All-caps words of at least five letters.
    pub shouted: u32,
    /// `!` characters.
    pub exclamations: u32,
    /// Runs of two or more `!`.
    pub exclamation_runs: u32,
    /// `?` characters.
    pub questions: u32,
}

impl TextScan {
    /// Scan one piece of text.
    #[must_use]
    pub fn scan(text: &str) -> Self {
        let mut scan = Self::default();
        scan.feed(text);
        scan
    }

    /// Append another piece of text to this scan.
    pub fn feed(&mut self, text: &str) {
        for chunk in text.split_whitespace() {
            self.count_punctuation(chunk);
            if looks_like_link(chunk) {
                self.links += 1;
                continue;
            }
            for word in chunk
                .split(|c: char| !c.is_alphanumeric())
                .filter(|w| !w.is_empty())
            {
                self.count_case(word);
                self.tokens.push(word.to_lowercase());
            }
        }
    }

    fn count_punctuation(&mut self, chunk: &str) {
        let mut run = 0u32;
        for c in chunk.chars() {
            match c {
                '!' => {
                    self.exclamations += 1;
                    run += 1;
                    if run == 2 {
                        self.exclamation_runs += 1;
                    }
                }
                '?' => {
                    self.questions += 1;
                    run = 0;
                }
                _ => run = 0,
            }
        }
    }

    fn count_case(&mut self, word: &str) {
        let mut letters = 0usize;
        let mut upper = 0usize;
        for c in word.chars().filter(|c| c.is_alphabetic()) {
            letters += 1;
            if c.is_uppercase() {
                upper += 1;
            }
        }
        self.letters += saturating_u32(letters);
        self.uppercase += saturating_u32(upper);
        if letters >= SHOUTED_MIN_LEN && letters == upper && letters == word.chars().count() {
            self.shouted += 1;
        }
    }
}

fn looks_like_link(chunk: &str) -> bool {
    let lower = chunk.to_ascii_lowercase();
    let trimmed = lower.trim_start_matches(|c: char| !c.is_alphanumeric());
    trimmed.starts_with("http://") || trimmed.starts_with("https://") || trimmed.starts_with("www.")
}

/// Lowercased word tokens of a string, as used for lexicon terms.
#[must_use]
pub fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// A lexicon pre-split into token sequences.
#[derive(Debug, Clone, Default)]
pub struct CompiledLexicon {
    phrases: Vec<(Vec<String>, f64)>,
}

impl CompiledLexicon {
    /// Compile a lexicon. Terms without word characters are dropped.
    #[must_use]
    pub fn compile(lexicon: &Lexicon) -> Self {
        Self {
            phrases: lexicon
                .terms()
                .iter()
                .map(|term| (words(&term.term), term.weight))
                .filter(|(phrase, _)| !phrase.is_empty())
                .collect(),
        }
    }

    /// Count phrase occurrences on token boundaries.
    #[must_use]
    pub fn count(&self, tokens: &[String]) -> Hits {
        let mut hits = Hits::default();
        for (phrase, weight) in &self.phrases {
            let occurrences = tokens
                .windows(phrase.len())
                .filter(|window| *window == phrase.as_slice())
                .count();
            hits.record(saturating_u32(occurrences), *weight);
        }
        hits
    }

    /// Check whether any phrase occurs.
    #[must_use]
    pub fn matches_any(&self, tokens: &[String]) -> bool {
        self.phrases.iter().any(|(phrase, _)| {
            tokens
                .windows(phrase.len())
                .any(|window| window == phrase.as_slice())
        })
    }
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
