//! Feature vector assembly
//!
//! Combines the four scorer outputs for one sentence pair into a single
//! fixed-order numeric vector. Both the training-row printer and the
//! live classifier consume the same order through [`FeatureVector::as_array`],
//! so ordering stability is the one contract this module carries.

use crate::dictionary::BilingualDictionary;
use crate::length;
use crate::lm::NgramModel;
use crate::overlap;
use crate::spelling::SpellChecker;

/// Number of features per pair. Never varies across inputs.
pub const FEATURE_COUNT: usize = 6;

/// Attribute names in canonical vector order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "misspelled_count",
    "lm_score",
    "source_word_count",
    "overlap_ratio",
    "length_diff",
    "length_ratio",
];

/// The scored signals for one sentence pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub misspelled_count: f64,
    pub lm_score: f64,
    pub source_word_count: f64,
    pub overlap_ratio: f64,
    pub length_diff: f64,
    pub length_ratio: f64,
}

impl FeatureVector {
    /// The canonical fixed order. This is the single definition both the
    /// ARFF row printer and the classifier query rely on.
    pub fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.misspelled_count,
            self.lm_score,
            self.source_word_count,
            self.overlap_ratio,
            self.length_diff,
            self.length_ratio,
        ]
    }
}

/// Owns the loaded read-only scoring resources and runs all four
/// scorers over one pair.
///
/// Constructed once at startup and shared for the whole run; there is no
/// global state.
pub struct FeatureExtractor {
    dictionary: BilingualDictionary,
    model: NgramModel,
    spell: SpellChecker,
}

impl FeatureExtractor {
    pub fn new(dictionary: BilingualDictionary, model: NgramModel, spell: SpellChecker) -> Self {
        Self {
            dictionary,
            model,
            spell,
        }
    }

    pub fn dictionary(&self) -> &BilingualDictionary {
        &self.dictionary
    }

    pub fn model(&self) -> &NgramModel {
        &self.model
    }

    pub fn spell(&self) -> &SpellChecker {
        &self.spell
    }

    /// Score one pair with every scorer in sequence.
    ///
    /// Per-pair degradations (dictionary misses, out-of-vocabulary
    /// words) lower individual signals but never fail the extraction;
    /// the vector is always fully populated.
    pub fn extract(&self, source: &str, target: &str) -> FeatureVector {
        let misspelled = self.spell.misspelled_count(source);
        let lm_score = self.model.score_sentence(source);
        let overlap = overlap::overlap_ratio(source, target, &self.dictionary);
        let lengths = length::length_stats(source, target);

        FeatureVector {
            misspelled_count: misspelled as f64,
            lm_score,
            source_word_count: lengths.source_words,
            overlap_ratio: overlap,
            length_diff: lengths.diff,
            length_ratio: lengths.ratio,
        }
    }
}
