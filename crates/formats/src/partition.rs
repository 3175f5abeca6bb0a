//! Partitioned output streams for classified pairs
//!
//! Three append-only streams: kept-source and kept-target (one sentence
//! per line) and eliminated (source, target, blank line per block). A
//! scored pair goes to exactly one destination set. All streams use
//! CRLF line endings for compatibility with the original corpus format
//! and are flushed after every pair so a crash loses at most the
//! in-flight pair.

use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::bitext::SentencePair;
use crate::error::Result;

const CRLF: &str = "\r\n";

const KEPT_SUFFIX: &str = "_Filtered.txt";
const ELIMINATED_SUFFIX: &str = "_Eliminated.txt";

/// Derive the three output paths from the input file paths:
/// `<source>_Filtered.txt`, `<target>_Filtered.txt`,
/// `<target>_Eliminated.txt`.
pub fn output_paths(source: &Path, target: &Path) -> (PathBuf, PathBuf, PathBuf) {
    (
        suffixed(source, KEPT_SUFFIX),
        suffixed(target, KEPT_SUFFIX),
        suffixed(target, ELIMINATED_SUFFIX),
    )
}

fn suffixed(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Writer over the three partition streams.
pub struct PartitionWriter {
    kept_source: BufWriter<File>,
    kept_target: BufWriter<File>,
    eliminated: BufWriter<File>,
    kept: usize,
    eliminated_pairs: usize,
}

impl PartitionWriter {
    /// Create (truncating) the three output files next to the inputs.
    pub fn create(source: &Path, target: &Path) -> Result<Self> {
        let (kept_source, kept_target, eliminated) = output_paths(source, target);
        Ok(Self {
            kept_source: BufWriter::new(File::create(kept_source)?),
            kept_target: BufWriter::new(File::create(kept_target)?),
            eliminated: BufWriter::new(File::create(eliminated)?),
            kept: 0,
            eliminated_pairs: 0,
        })
    }

    /// Route a pair to the kept streams: source sentence to the
    /// kept-source file, target sentence to the kept-target file.
    pub fn write_kept(&mut self, pair: &SentencePair) -> Result<()> {
        write!(self.kept_source, "{}{}", pair.source, CRLF)?;
        write!(self.kept_target, "{}{}", pair.target, CRLF)?;
        self.kept += 1;
        self.flush()
    }

    /// Route a pair to the eliminated stream as a source/target/blank
    /// block.
    pub fn write_eliminated(&mut self, pair: &SentencePair) -> Result<()> {
        write!(
            self.eliminated,
            "{}{}{}{}{}",
            pair.source, CRLF, pair.target, CRLF, CRLF
        )?;
        self.eliminated_pairs += 1;
        self.flush()
    }

    fn flush(&mut self) -> Result<()> {
        self.kept_source.flush()?;
        self.kept_target.flush()?;
        self.eliminated.flush()?;
        Ok(())
    }

    /// Pairs routed to the kept streams.
    pub fn kept(&self) -> usize {
        self.kept
    }

    /// Pairs routed to the eliminated stream.
    pub fn eliminated(&self) -> usize {
        self.eliminated_pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn pair(source: &str, target: &str, line: usize) -> SentencePair {
        SentencePair {
            source: source.to_string(),
            target: target.to_string(),
            line,
        }
    }

    #[test]
    fn test_output_path_derivation() {
        let (ks, kt, el) = output_paths(Path::new("corpus.en"), Path::new("corpus.tr"));
        assert_eq!(ks, Path::new("corpus.en_Filtered.txt"));
        assert_eq!(kt, Path::new("corpus.tr_Filtered.txt"));
        assert_eq!(el, Path::new("corpus.tr_Eliminated.txt"));
    }

    #[test]
    fn test_kept_streams_stay_aligned() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("src.txt");
        let target = dir.path().join("tgt.txt");
        std::fs::write(&source, "").unwrap();
        std::fs::write(&target, "").unwrap();

        let mut writer = PartitionWriter::create(&source, &target).unwrap();
        writer.write_kept(&pair("one", "bir", 1)).unwrap();
        writer.write_kept(&pair("two", "iki", 2)).unwrap();
        writer.write_eliminated(&pair("bad", "kötü", 3)).unwrap();

        let (ks, kt, _) = output_paths(&source, &target);
        let kept_source = std::fs::read_to_string(ks).unwrap();
        let kept_target = std::fs::read_to_string(kt).unwrap();

        assert_eq!(kept_source, "one\r\ntwo\r\n");
        assert_eq!(kept_target, "bir\r\niki\r\n");
        assert_eq!(
            kept_source.matches(CRLF).count(),
            kept_target.matches(CRLF).count()
        );
        assert_eq!(writer.kept(), 2);
    }

    #[test]
    fn test_eliminated_block_shape() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("src.txt");
        let target = dir.path().join("tgt.txt");
        std::fs::write(&source, "").unwrap();
        std::fs::write(&target, "").unwrap();

        let mut writer = PartitionWriter::create(&source, &target).unwrap();
        writer.write_eliminated(&pair("bad line", "kötü satır", 1)).unwrap();

        let (_, _, el) = output_paths(&source, &target);
        let eliminated = std::fs::read_to_string(el).unwrap();
        assert_eq!(eliminated, "bad line\r\nkötü satır\r\n\r\n");
        assert_eq!(writer.eliminated(), 1);
    }

    #[test]
    fn test_each_pair_lands_in_exactly_one_partition() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("src.txt");
        let target = dir.path().join("tgt.txt");
        std::fs::write(&source, "").unwrap();
        std::fs::write(&target, "").unwrap();

        let mut writer = PartitionWriter::create(&source, &target).unwrap();
        writer.write_kept(&pair("keep me", "tut beni", 1)).unwrap();
        writer.write_eliminated(&pair("drop me", "at beni", 2)).unwrap();

        let (ks, _, el) = output_paths(&source, &target);
        let kept = std::fs::read_to_string(ks).unwrap();
        let eliminated = std::fs::read_to_string(el).unwrap();

        assert!(kept.contains("keep me"));
        assert!(!kept.contains("drop me"));
        assert!(eliminated.contains("drop me"));
        assert!(!eliminated.contains("keep me"));
    }
}
