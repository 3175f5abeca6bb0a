//! Per-pair quality scoring for parallel corpora
//!
//! This crate provides the heuristic scorers that turn a sentence pair
//! into a fixed-order numeric feature vector: dictionary overlap, n-gram
//! language-model score, misspelling count, and length statistics, plus
//! the text normalizer and the cheap pre-filter applied before scoring.

pub mod dictionary;
pub mod error;
pub mod features;
pub mod length;
pub mod lm;
pub mod normalize;
pub mod overlap;
pub mod prefilter;
pub mod spelling;

pub use dictionary::BilingualDictionary;
pub use error::{Error, Result};
pub use features::{FeatureExtractor, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
