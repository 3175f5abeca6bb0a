//! N-gram language-model scoring
//!
//! Loads a pretrained back-off model from an ARPA-format weights file
//! once at startup and scores sentences by summed conditional log10
//! probabilities. Fluent in-vocabulary sentences score closer to zero;
//! out-of-vocabulary-heavy sentences score more negative. No bound on
//! sign or magnitude is enforced.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::warn;

use crate::error::{Error, Result};

const BOS: &str = "<s>";
const EOS: &str = "</s>";
const UNK: &str = "<unk>";

/// Log10 probability assigned to out-of-vocabulary words when the model
/// declares no `<unk>` entry.
const OOV_LOG10: f64 = -100.0;

#[derive(Debug, Clone, Copy)]
struct Entry {
    logprob: f64,
    backoff: f64,
}

/// A back-off n-gram language model loaded from an ARPA file.
///
/// Entries are keyed by the space-joined n-gram. The model is read-only
/// after load and is shared across every sentence scored in a run.
#[derive(Debug)]
pub struct NgramModel {
    order: usize,
    entries: HashMap<String, Entry>,
}

impl NgramModel {
    /// Parse an ARPA back-off file. A missing or unreadable file is a
    /// fatal setup error; individual malformed entry lines are skipped
    /// with a warning.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);

        let mut order = 0usize;
        let mut section = 0usize;
        let mut entries = HashMap::new();

        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed == "\\data\\" || trimmed.starts_with("ngram ") {
                continue;
            }
            if trimmed == "\\end\\" {
                break;
            }
            if let Some(n) = parse_section_header(trimmed) {
                section = n;
                order = order.max(n);
                continue;
            }
            if section == 0 {
                continue;
            }

            let fields: Vec<&str> = trimmed.split_whitespace().collect();
            // logprob, n words, optional backoff weight
            if fields.len() < section + 1 {
                warn!("Skipping short ARPA entry at line {}: {}", number + 1, trimmed);
                continue;
            }
            let logprob: f64 = match fields[0].parse() {
                Ok(v) => v,
                Err(_) => {
                    warn!("Skipping unparsable ARPA entry at line {}: {}", number + 1, trimmed);
                    continue;
                }
            };
            let key = fields[1..=section].join(" ");
            let backoff = fields
                .get(section + 1)
                .and_then(|f| f.parse().ok())
                .unwrap_or(0.0);
            entries.insert(key, Entry { logprob, backoff });
        }

        if order == 0 || entries.is_empty() {
            return Err(Error::InvalidModel(format!(
                "no n-gram sections found in {}",
                path.as_ref().display()
            )));
        }

        Ok(Self { order, entries })
    }

    /// Maximum n-gram order declared by the model.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of n-gram entries across all orders.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Score a sentence by naive whitespace tokenization.
    ///
    /// The token sequence is wrapped in `<s>`/`</s>` markers and each
    /// word is scored against its longest available context, backing off
    /// to shorter contexts where the model has no entry.
    pub fn score_sentence(&self, sentence: &str) -> f64 {
        let mut sequence: Vec<&str> = Vec::with_capacity(8);
        sequence.push(BOS);
        sequence.extend(sentence.split_whitespace());
        sequence.push(EOS);

        let mut total = 0.0;
        for i in 1..sequence.len() {
            let start = (i + 1).saturating_sub(self.order);
            total += self.conditional(&sequence[start..=i]);
        }
        total
    }

    /// Conditional log10 probability of the last word of `ngram` given
    /// the preceding words, with back-off recursion.
    fn conditional(&self, ngram: &[&str]) -> f64 {
        if let Some(entry) = self.entries.get(&ngram.join(" ")) {
            return entry.logprob;
        }
        if ngram.len() == 1 {
            return self
                .entries
                .get(UNK)
                .map(|e| e.logprob)
                .unwrap_or(OOV_LOG10);
        }
        let context = &ngram[..ngram.len() - 1];
        let backoff = self
            .entries
            .get(&context.join(" "))
            .map(|e| e.backoff)
            .unwrap_or(0.0);
        backoff + self.conditional(&ngram[1..])
    }
}

fn parse_section_header(line: &str) -> Option<usize> {
    line.strip_prefix('\\')?
        .strip_suffix("-grams:")?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TOY_ARPA: &str = "\
\\data\\
ngram 1=5
ngram 2=4

\\1-grams:
-1.0\t<s>\t-0.5
-1.0\t</s>
-0.5\tthe\t-0.3
-0.7\tcat\t-0.3
-0.9\tsat
\\2-grams:
-0.2\t<s> the
-0.3\tthe cat
-0.4\tcat sat
-0.5\tsat </s>

\\end\\
";

    fn toy_model() -> NgramModel {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(TOY_ARPA.as_bytes()).unwrap();
        file.flush().unwrap();
        NgramModel::load(file.path()).unwrap()
    }

    #[test]
    fn test_load_orders_and_entries() {
        let model = toy_model();
        assert_eq!(model.order(), 2);
        assert_eq!(model.len(), 9);
    }

    #[test]
    fn test_in_vocabulary_sentence_uses_bigrams() {
        let model = toy_model();
        // Every transition is a stored bigram: -0.2 -0.3 -0.4 -0.5
        let score = model.score_sentence("the cat sat");
        assert!((score - (-1.4)).abs() < 1e-9);
    }

    #[test]
    fn test_backoff_path_for_unseen_bigram() {
        let model = toy_model();
        // "cat the" is not a stored bigram: backoff("cat") + p("the")
        // = -0.3 + -0.5 = -0.8 for that transition.
        let seen = model.score_sentence("the cat");
        let unseen = model.score_sentence("cat the");
        assert!(unseen < seen);
    }

    #[test]
    fn test_oov_scores_worse_than_in_vocabulary() {
        let model = toy_model();
        let fluent = model.score_sentence("the cat sat");
        let garbage = model.score_sentence("zzz qqq xxx");
        assert!(garbage < fluent);
        // No <unk> entry in the toy model, so each OOV word hits the floor.
        assert!(garbage <= 3.0 * OOV_LOG10);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        assert!(NgramModel::load("/nonexistent/model.arpa").is_err());
    }

    #[test]
    fn test_file_without_sections_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not an arpa file").unwrap();
        file.flush().unwrap();
        let result = NgramModel::load(file.path());
        assert!(matches!(result, Err(Error::InvalidModel(_))));
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let model = toy_model();
        let a = model.score_sentence("the cat sat");
        let b = model.score_sentence("the cat sat");
        assert_eq!(a, b);
    }
}
