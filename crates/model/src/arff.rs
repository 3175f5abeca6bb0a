//! ARFF-style schema, row formatting, and dataset loading
//!
//! One schema serves both pipeline modes: train mode prints the header
//! and data rows, test mode parses the same shape back into a labeled
//! dataset. Attribute order and count come from the canonical feature
//! order, so the emitter and the classifier can never disagree.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use paraclean_core::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};

use crate::error::{Error, Result};

/// Relation name declared in the header.
pub const RELATION: &str = "parallel_sentence_quality";

/// Nominal class values, kept class first. "first class probability
/// equals 1" is the routing rule, so the kept class must stay at
/// index 0.
pub const CLASS_VALUES: [&str; 2] = ["good", "noise"];

/// Index of the kept class within [`CLASS_VALUES`].
pub const KEPT_CLASS: usize = 0;

/// Fixed schema header: relation, six numeric attributes in feature
/// order, the two-valued class attribute, and the data marker.
pub fn header() -> String {
    let mut out = String::new();
    out.push_str(&format!("@relation {}\n", RELATION));
    for name in FEATURE_NAMES {
        out.push_str(&format!("@attribute {} numeric\n", name));
    }
    out.push_str(&format!(
        "@attribute class {{'{}', '{}'}}\n",
        CLASS_VALUES[0], CLASS_VALUES[1]
    ));
    out.push_str("@data");
    out
}

/// One comma-joined data row: each feature to exactly two decimal
/// places with `.` as the decimal point, then the quoted class label.
pub fn format_row(features: &FeatureVector, label: &str) -> String {
    let mut out = String::new();
    for value in features.as_array() {
        out.push_str(&format!("{:.2},", value));
    }
    out.push_str(&format!("'{}'", label));
    out
}

/// A labeled tabular dataset parsed from an ARFF-style file.
///
/// The class attribute is the last declared attribute; its index is
/// fixed at load time and never changes afterwards.
#[derive(Debug)]
pub struct Dataset {
    pub attributes: Vec<String>,
    pub class_values: Vec<String>,
    pub rows: Vec<[f64; FEATURE_COUNT]>,
    pub labels: Vec<usize>,
}

impl Dataset {
    /// Parse a labeled dataset file. Any structural mismatch with the
    /// declared schema (attribute count, row arity, unknown label) is a
    /// fatal setup error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);

        let mut attributes = Vec::new();
        let mut class_values: Vec<String> = Vec::new();
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        let mut in_data = false;

        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('%') {
                continue;
            }

            if !in_data {
                let lower = trimmed.to_lowercase();
                if lower.starts_with("@relation") {
                    continue;
                }
                if lower.starts_with("@data") {
                    in_data = true;
                    continue;
                }
                if lower.starts_with("@attribute") {
                    let rest = trimmed["@attribute".len()..].trim();
                    if let Some(open) = rest.find('{') {
                        let close = rest.rfind('}').ok_or_else(|| {
                            Error::InvalidDataset(format!(
                                "line {}: unterminated nominal declaration",
                                number + 1
                            ))
                        })?;
                        class_values = rest[open + 1..close]
                            .split(',')
                            .map(|v| v.trim().trim_matches('\'').to_string())
                            .collect();
                    } else {
                        let name = rest.split_whitespace().next().unwrap_or_default();
                        attributes.push(name.to_string());
                    }
                }
                continue;
            }

            let fields: Vec<&str> = trimmed.split(',').collect();
            if fields.len() != FEATURE_COUNT + 1 {
                return Err(Error::InvalidDataset(format!(
                    "line {}: expected {} fields, found {}",
                    number + 1,
                    FEATURE_COUNT + 1,
                    fields.len()
                )));
            }
            let mut row = [0.0; FEATURE_COUNT];
            for (slot, field) in row.iter_mut().zip(&fields[..FEATURE_COUNT]) {
                *slot = field.trim().parse().map_err(|_| {
                    Error::InvalidDataset(format!(
                        "line {}: unparsable numeric value {:?}",
                        number + 1,
                        field
                    ))
                })?;
            }
            let label = fields[FEATURE_COUNT].trim().trim_matches('\'');
            let class = class_values
                .iter()
                .position(|v| v == label)
                .ok_or_else(|| {
                    Error::InvalidDataset(format!(
                        "line {}: unknown class label {:?}",
                        number + 1,
                        label
                    ))
                })?;
            rows.push(row);
            labels.push(class);
        }

        if attributes.len() != FEATURE_COUNT {
            return Err(Error::InvalidDataset(format!(
                "expected {} numeric attributes, found {}",
                FEATURE_COUNT,
                attributes.len()
            )));
        }
        if class_values.len() != 2 {
            return Err(Error::InvalidDataset(format!(
                "expected a two-valued class attribute, found {} values",
                class_values.len()
            )));
        }

        Ok(Self {
            attributes,
            class_values,
            rows,
            labels,
        })
    }

    /// Index of the class attribute: always the column after the
    /// numeric attributes.
    pub fn class_index(&self) -> usize {
        self.attributes.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_vector() -> FeatureVector {
        FeatureVector {
            misspelled_count: 1.0,
            lm_score: -12.345,
            source_word_count: 7.0,
            overlap_ratio: 0.5,
            length_diff: 2.0,
            length_ratio: 1.4,
        }
    }

    #[test]
    fn test_header_shape() {
        let header = header();
        assert!(header.starts_with("@relation parallel_sentence_quality"));
        assert_eq!(header.matches("numeric").count(), FEATURE_COUNT);
        assert!(header.contains("@attribute class {'good', 'noise'}"));
        assert!(header.ends_with("@data"));
    }

    #[test]
    fn test_row_formatting() {
        let row = format_row(&sample_vector(), "noise");
        assert_eq!(row, "1.00,-12.35,7.00,0.50,2.00,1.40,'noise'");
    }

    #[test]
    fn test_row_uses_dot_decimal_point() {
        let row = format_row(&sample_vector(), "good");
        assert!(row.contains("-12.35"));
        assert!(!row.contains("12,35"));
    }

    #[test]
    fn test_emitted_document_parses_back() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", header()).unwrap();
        writeln!(file, "{}", format_row(&sample_vector(), "noise")).unwrap();
        writeln!(file, "{}", format_row(&sample_vector(), "good")).unwrap();
        file.flush().unwrap();

        let dataset = Dataset::load(file.path()).unwrap();
        assert_eq!(dataset.attributes.len(), FEATURE_COUNT);
        assert_eq!(dataset.class_index(), 6);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.labels, vec![1, 0]);
        assert_eq!(dataset.rows[0][1], -12.35);
    }

    #[test]
    fn test_unknown_label_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", header()).unwrap();
        writeln!(file, "1.00,2.00,3.00,4.00,5.00,6.00,'bogus'").unwrap();
        file.flush().unwrap();

        assert!(matches!(
            Dataset::load(file.path()),
            Err(Error::InvalidDataset(_))
        ));
    }

    #[test]
    fn test_wrong_arity_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", header()).unwrap();
        writeln!(file, "1.00,2.00,'noise'").unwrap();
        file.flush().unwrap();

        assert!(matches!(
            Dataset::load(file.path()),
            Err(Error::InvalidDataset(_))
        ));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        assert!(Dataset::load("/nonexistent/data.arff").is_err());
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "% generated corpus").unwrap();
        writeln!(file, "{}", header()).unwrap();
        writeln!(file).unwrap();
        writeln!(file, "{}", format_row(&sample_vector(), "good")).unwrap();
        file.flush().unwrap();

        let dataset = Dataset::load(file.path()).unwrap();
        assert_eq!(dataset.len(), 1);
    }
}
