//! Cheap pre-filter applied before any scoring
//!
//! Rejects pairs containing mis-encoding artifacts or sentences too
//! short to score meaningfully. Rejected pairs vanish from every output
//! stream; they are not errors and are never written to the eliminated
//! file.

use serde::{Deserialize, Serialize};

/// Configuration for the pre-filter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreFilterConfig {
    /// Minimum sentence length in characters.
    pub min_chars: usize,
    /// Characters that mark a sentence as mis-encoded noise.
    pub denylist: String,
}

impl Default for PreFilterConfig {
    fn default() -> Self {
        Self {
            min_chars: 40,
            denylist: "©~½$#=&Ä±Ã§Â»".to_string(),
        }
    }
}

/// Content-blind rejection pass shared by both pipeline modes.
pub struct PreFilter {
    config: PreFilterConfig,
}

impl PreFilter {
    pub fn new(config: PreFilterConfig) -> Self {
        Self { config }
    }

    /// True if both sentences survive the denylist and length checks.
    pub fn accepts(&self, source: &str, target: &str) -> bool {
        self.sentence_ok(source) && self.sentence_ok(target)
    }

    fn sentence_ok(&self, sentence: &str) -> bool {
        if sentence.chars().any(|c| self.config.denylist.contains(c)) {
            return false;
        }
        sentence.chars().count() >= self.config.min_chars
    }
}

impl Default for PreFilter {
    fn default() -> Self {
        Self::new(PreFilterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG: &str = "this sentence is comfortably longer than forty characters";

    #[test]
    fn test_long_clean_pair_accepted() {
        let filter = PreFilter::default();
        assert!(filter.accepts(LONG, LONG));
    }

    #[test]
    fn test_short_sentence_rejected() {
        let filter = PreFilter::default();
        assert!(!filter.accepts("too short", LONG));
        assert!(!filter.accepts(LONG, "too short"));
    }

    #[test]
    fn test_denylisted_character_rejected_even_if_long() {
        let filter = PreFilter::default();
        let noisy = format!("{} ©", LONG);
        assert!(!filter.accepts(&noisy, LONG));
        assert!(!filter.accepts(LONG, &noisy));
    }

    #[test]
    fn test_length_is_counted_in_chars() {
        let filter = PreFilter::new(PreFilterConfig {
            min_chars: 5,
            ..Default::default()
        });
        // Five multi-byte characters pass a 5-char minimum.
        assert!(filter.accepts("ğüşıö", "ğüşıö"));
    }

    #[test]
    fn test_mojibake_artifacts_rejected() {
        let filter = PreFilter::default();
        let mojibake = format!("{} Ã§", LONG);
        assert!(!filter.accepts(&mojibake, LONG));
    }
}
