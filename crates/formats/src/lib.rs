//! Line-oriented I/O for aligned parallel corpora
//!
//! Streaming reader over two aligned text files and the partitioned
//! writer for the kept and eliminated output streams.

pub mod bitext;
pub mod error;
pub mod partition;

pub use bitext::{count_lines, BitextReader, SentencePair};
pub use error::{Error, Result};
pub use partition::{output_paths, PartitionWriter};
