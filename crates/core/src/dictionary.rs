//! Bilingual word-list store
//!
//! Loads a `source_word <> translation` file into an in-memory mapping.
//! Duplicate source words accumulate their translations instead of
//! overwriting; the overlap scorer joins them back into one candidate
//! string at lookup time.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::warn;

use crate::error::Result;

/// Separator between the source word and its translation in the
/// dictionary file. Only the first occurrence splits the line, so
/// translations may themselves contain the separator text.
const SEPARATOR: &str = " <> ";

/// Mapping from source-language word to its known translations.
///
/// Keys are stored exactly as they appear in the file; callers lowercase
/// the query side themselves, so entries with uppercase keys are never
/// matched by sentence lookups.
#[derive(Debug, Default)]
pub struct BilingualDictionary {
    entries: HashMap<String, Vec<String>>,
}

impl BilingualDictionary {
    /// Load a dictionary from a UTF-8 word-list file.
    ///
    /// A missing or unreadable file is fatal to the pipeline; lines
    /// without the separator are skipped with a warning.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);

        let mut entries: HashMap<String, Vec<String>> = HashMap::new();
        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match line.split_once(SEPARATOR) {
                Some((word, translation)) => {
                    entries
                        .entry(word.to_string())
                        .or_default()
                        .push(translation.to_string());
                }
                None => {
                    warn!(
                        "Skipping dictionary line {} without separator: {}",
                        number + 1,
                        line
                    );
                }
            }
        }

        Ok(Self { entries })
    }

    /// All translations recorded for `word`, in file order.
    pub fn translations(&self, word: &str) -> Option<&[String]> {
        self.entries.get(word).map(|v| v.as_slice())
    }

    /// Translations joined into a single space-separated string, the
    /// shape consumed by the overlap scorer's candidate bag.
    pub fn joined_translations(&self, word: &str) -> Option<String> {
        self.entries.get(word).map(|v| v.join(" "))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_dict(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_basic_load() {
        let file = write_dict(&["cat <> kedi", "dog <> köpek"]);
        let dict = BilingualDictionary::load(file.path()).unwrap();

        assert_eq!(dict.len(), 2);
        assert_eq!(dict.translations("cat").unwrap(), &["kedi".to_string()]);
        assert!(dict.translations("bird").is_none());
    }

    #[test]
    fn test_duplicate_keys_merge() {
        let file = write_dict(&["run <> koşmak", "run <> çalıştırmak"]);
        let dict = BilingualDictionary::load(file.path()).unwrap();

        assert_eq!(dict.len(), 1);
        let joined = dict.joined_translations("run").unwrap();
        assert!(joined.contains("koşmak"));
        assert!(joined.contains("çalıştırmak"));
        assert_eq!(joined, "koşmak çalıştırmak");
    }

    #[test]
    fn test_split_on_first_separator_only() {
        let file = write_dict(&["a <> b <> c"]);
        let dict = BilingualDictionary::load(file.path()).unwrap();

        assert_eq!(dict.translations("a").unwrap(), &["b <> c".to_string()]);
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let file = write_dict(&["cat <> kedi", "no separator here", ""]);
        let dict = BilingualDictionary::load(file.path()).unwrap();

        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = BilingualDictionary::load("/nonexistent/dictionary.txt");
        assert!(result.is_err());
    }

    #[test]
    fn test_keys_are_case_preserving() {
        let file = write_dict(&["Cat <> kedi"]);
        let dict = BilingualDictionary::load(file.path()).unwrap();

        assert!(dict.translations("Cat").is_some());
        assert!(dict.translations("cat").is_none());
    }
}
