//! Streaming reader for aligned sentence-pair files
//!
//! Reads two line-aligned text files in lockstep, yielding one pair per
//! line. Iteration stops at the end of the shorter file; trailing
//! unmatched lines in the longer file have no partner and are never
//! scored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Result;

/// One aligned sentence pair with its 1-based line index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentencePair {
    pub source: String,
    pub target: String,
    pub line: usize,
}

/// Lockstep reader over a source file and a target file.
pub struct BitextReader {
    source: BufReader<File>,
    target: BufReader<File>,
    line: usize,
}

impl BitextReader {
    pub fn open<P: AsRef<Path>>(source_path: P, target_path: P) -> Result<Self> {
        Ok(Self {
            source: BufReader::new(File::open(source_path.as_ref())?),
            target: BufReader::new(File::open(target_path.as_ref())?),
            line: 0,
        })
    }

    /// Number of pairs yielded so far.
    pub fn pairs_read(&self) -> usize {
        self.line
    }
}

fn read_trimmed_line(reader: &mut BufReader<File>) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    let n = reader.read_line(&mut line)?;
    if n == 0 {
        return Ok(None);
    }
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(Some(line))
}

impl Iterator for BitextReader {
    type Item = Result<SentencePair>;

    fn next(&mut self) -> Option<Self::Item> {
        let source = match read_trimmed_line(&mut self.source) {
            Ok(Some(line)) => line,
            Ok(None) => return None,
            Err(e) => return Some(Err(e.into())),
        };
        let target = match read_trimmed_line(&mut self.target) {
            Ok(Some(line)) => line,
            Ok(None) => return None,
            Err(e) => return Some(Err(e.into())),
        };
        self.line += 1;
        Some(Ok(SentencePair {
            source,
            target,
            line: self.line,
        }))
    }
}

/// Line count of a text file, used for progress totals.
pub fn count_lines<P: AsRef<Path>>(path: P) -> Result<usize> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let mut count = 0;
    for line in reader.lines() {
        line?;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_with(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_pairs_in_lockstep() {
        let source = file_with(&["one", "two", "three"]);
        let target = file_with(&["bir", "iki", "üç"]);

        let reader = BitextReader::open(source.path(), target.path()).unwrap();
        let pairs: Vec<_> = reader.collect::<Result<Vec<_>>>().unwrap();

        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0].source, "one");
        assert_eq!(pairs[0].target, "bir");
        assert_eq!(pairs[0].line, 1);
        assert_eq!(pairs[2].line, 3);
    }

    #[test]
    fn test_stops_at_shorter_file() {
        let source = file_with(&["one", "two", "three"]);
        let target = file_with(&["bir"]);

        let mut reader = BitextReader::open(source.path(), target.path()).unwrap();
        assert!(reader.next().is_some());
        assert!(reader.next().is_none());
        assert_eq!(reader.pairs_read(), 1);
    }

    #[test]
    fn test_crlf_input_trimmed() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"one\r\ntwo\r\n").unwrap();
        file.flush().unwrap();
        let target = file_with(&["bir", "iki"]);

        let reader = BitextReader::open(file.path(), target.path()).unwrap();
        let pairs: Vec<_> = reader.collect::<Result<Vec<_>>>().unwrap();
        assert_eq!(pairs[0].source, "one");
        assert_eq!(pairs[1].source, "two");
    }

    #[test]
    fn test_count_lines() {
        let file = file_with(&["a", "b", "c", "d"]);
        assert_eq!(count_lines(file.path()).unwrap(), 4);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let target = file_with(&["bir"]);
        assert!(BitextReader::open(Path::new("/nonexistent/src.txt"), target.path()).is_err());
    }
}
