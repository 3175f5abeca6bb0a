//! Misspelling counting against a reference word list
//!
//! Cleans the candidate sentence of tokens unlikely to be real words
//! (digits, punctuation, non-initial capitalized tokens), then counts
//! the distinct cleaned tokens missing from the reference list.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use regex::Regex;

use crate::error::Result;

/// Spell checker backed by a plain word-list file.
///
/// The list is loaded once at startup and lookups are case-sensitive
/// against the list as loaded.
pub struct SpellChecker {
    words: HashSet<String>,
    strip_chars: Regex,
    capitalized: Regex,
    tabs: Regex,
    spaces: Regex,
}

impl SpellChecker {
    /// Load the reference word list, one word per line. Failure to load
    /// is fatal to the pipeline.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);

        let mut words = HashSet::new();
        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if !word.is_empty() {
                words.insert(word.to_string());
            }
        }

        Ok(Self {
            words,
            strip_chars: Regex::new(r"[\d.,;:?!()\[\]-]").expect("strip regex"),
            capitalized: Regex::new(r" [A-ZÜİŞÇÖ]+[^ ]*").expect("capitalized regex"),
            tabs: Regex::new(r"\t+").expect("tab regex"),
            spaces: Regex::new(r" +").expect("space regex"),
        })
    }

    /// Number of words in the reference list.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Distinct misspelled tokens in first-occurrence order.
    ///
    /// Each distinct token is reported at most once no matter how often
    /// it repeats in the sentence.
    pub fn misspelled(&self, sentence: &str) -> Vec<String> {
        let cleaned = self.clean(sentence);
        let mut seen = HashSet::new();
        let mut missing = Vec::new();
        for token in cleaned.split_whitespace() {
            if !self.words.contains(token) && seen.insert(token.to_string()) {
                missing.push(token.to_string());
            }
        }
        missing
    }

    /// Count of distinct misspelled tokens.
    pub fn misspelled_count(&self, sentence: &str) -> usize {
        self.misspelled(sentence).len()
    }

    /// Strip digits and punctuation, blank out capitalized tokens that
    /// follow a space (the proper-noun/acronym heuristic; a
    /// sentence-initial token has no preceding space and is kept), and
    /// collapse whitespace.
    fn clean(&self, sentence: &str) -> String {
        let cleaned = self.strip_chars.replace_all(sentence, "");
        let cleaned = self.capitalized.replace_all(&cleaned, " ");
        let cleaned = self.tabs.replace_all(&cleaned, " ");
        self.spaces.replace_all(&cleaned, " ").trim().to_string()
    }
}
