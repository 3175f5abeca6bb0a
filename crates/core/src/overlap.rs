//! Dictionary-overlap scoring
//!
//! Estimates how much of the target sentence is explainable as a
//! translation of the source sentence: dictionary translations of every
//! source word, plus source words that look like numbers or proper nouns
//! (expected to reappear verbatim), form a candidate bag; each target
//! word is counted as translated if its truncated form occurs in the bag
//! as a space-bounded substring.

use crate::dictionary::BilingualDictionary;

/// Punctuation removed from both sentences before tokenization.
const STRIPPED: &[char] = &['.', ',', ';', ':', '?', '!', '"'];

/// Target words longer than this are truncated before matching, a
/// stemming-like approximation for suffixing languages.
const TRUNCATE_AT: usize = 5;

/// Fraction of target words explainable from the source sentence,
/// in `[0, 1]`.
///
/// Dictionary misses are expected and silent. An empty or
/// whitespace-only target sentence scores 0.0; the pre-filter's minimum
/// length keeps that case out of the normal flow.
pub fn overlap_ratio(source: &str, target: &str, dictionary: &BilingualDictionary) -> f64 {
    let source = strip_punctuation(source);
    let target = strip_punctuation(target);

    let bag = candidate_bag(&source, dictionary);

    let mut total = 0usize;
    let mut translated = 0usize;
    for word in target.split_whitespace() {
        total += 1;
        let word = truncate(&word.to_lowercase());
        if bag.contains(&format!("{} ", word)) || bag.contains(&format!(" {}", word)) {
            translated += 1;
        }
    }

    if total == 0 {
        return 0.0;
    }
    translated as f64 / total as f64
}

/// Build the candidate-text bag for a source sentence.
///
/// Words containing a digit or starting with an ASCII uppercase letter
/// are added verbatim (lowercased); dictionary translations are appended
/// as free text, not split into tokens, so matching stays a substring
/// search over the whole bag.
fn candidate_bag(source: &str, dictionary: &BilingualDictionary) -> String {
    let mut bag = String::new();
    for word in source.split_whitespace() {
        let carries_over = word.chars().any(|c| c.is_ascii_digit())
            || word.chars().next().is_some_and(|c| c.is_ascii_uppercase());
        if carries_over {
            bag.push(' ');
            bag.push_str(&word.to_lowercase());
        }
        if let Some(entry) = dictionary.joined_translations(&word.to_lowercase()) {
            bag.push(' ');
            bag.push_str(&entry.to_lowercase());
        }
    }
    bag
}

fn strip_punctuation(sentence: &str) -> String {
    sentence.chars().filter(|c| !STRIPPED.contains(c)).collect()
}

fn truncate(word: &str) -> String {
    if word.chars().count() > TRUNCATE_AT {
        word.chars().take(TRUNCATE_AT).collect()
    } else {
        word.to_string()
    }
}
