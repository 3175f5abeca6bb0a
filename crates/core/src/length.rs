//! Length statistics for a sentence pair

/// Word-count-derived length signals for one pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthStats {
    /// Biased word count of the source sentence.
    pub source_words: f64,
    /// Absolute difference of the biased word counts.
    pub diff: f64,
    /// Source count divided by target count.
    pub ratio: f64,
}

/// Whitespace token count plus one.
///
/// The +1 bias is inherited from the original feature definition and is
/// kept for scale compatibility with previously trained models. It also
/// makes the count at least 1 for any input, so the length ratio is a
/// total function.
pub fn word_count(sentence: &str) -> usize {
    sentence.trim().split_whitespace().count() + 1
}

/// Length statistics for a source/target pair.
pub fn length_stats(source: &str, target: &str) -> LengthStats {
    let source_count = word_count(source);
    let target_count = word_count(target);
    LengthStats {
        source_words: source_count as f64,
        diff: (source_count as i64 - target_count as i64).unsigned_abs() as f64,
        ratio: source_count as f64 / target_count as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_biased_word_count() {
        assert_eq!(word_count("a b c"), 4);
        assert_eq!(word_count("x y"), 3);
        assert_eq!(word_count("single"), 2);
    }

    #[test]
    fn test_stats_for_three_and_two_tokens() {
        let stats = length_stats("a b c", "x y");
        assert_eq!(stats.source_words, 4.0);
        assert_eq!(stats.diff, 1.0);
        assert!((stats.ratio - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_strings_do_not_divide_by_zero() {
        let stats = length_stats("", "");
        assert_eq!(stats.source_words, 1.0);
        assert_eq!(stats.diff, 0.0);
        assert_eq!(stats.ratio, 1.0);
    }

    #[test]
    fn test_extra_whitespace_ignored() {
        assert_eq!(word_count("  a   b  "), 3);
    }
}
