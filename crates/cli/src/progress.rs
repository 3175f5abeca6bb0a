//! Progress reporting and run summary for the CLI

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};

/// Pair-based progress bar for test mode, drawn to stderr.
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a reporter for a known number of input pairs.
    pub fn new(total_pairs: u64) -> Self {
        let bar = ProgressBar::new(total_pairs);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {human_pos}/{human_len} ({per_sec}) {msg}")
                .unwrap()
                .progress_chars("█▓▒░-"),
        );
        Self { bar }
    }

    /// Update position after a pair is processed.
    pub fn update(&self, processed: usize) {
        self.bar.set_position(processed as u64);
        self.bar.set_message("Classifying...");
    }

    /// Finish progress reporting.
    pub fn finish(&self) {
        self.bar.finish_with_message("Complete!");
    }
}

/// Print a formatted summary report for a test-mode run
pub fn print_summary_report(
    source: &Path,
    target: &Path,
    total: usize,
    prefiltered: usize,
    kept: usize,
    eliminated: usize,
) {
    println!("\n{}", "═".repeat(60));
    println!("Corpus Classification Complete");
    println!("{}", "═".repeat(60));
    println!("Source input:       {}", source.display());
    println!("Target input:       {}", target.display());
    println!("Total pairs:        {}", format_with_commas(total));

    if prefiltered > 0 {
        println!(
            "Pre-filtered:       {} ({:.1}%)",
            format_with_commas(prefiltered),
            (prefiltered as f64 / total as f64) * 100.0
        );
    }

    println!(
        "Kept pairs:         {} ({:.1}%)",
        format_with_commas(kept),
        (kept as f64 / total as f64) * 100.0
    );
    println!(
        "Eliminated pairs:   {} ({:.1}%)",
        format_with_commas(eliminated),
        (eliminated as f64 / total as f64) * 100.0
    );

    println!("{}", "═".repeat(60));
}

/// Format number with thousand separators
fn format_with_commas(n: usize) -> String {
    n.to_string()
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(std::str::from_utf8)
        .collect::<Result<Vec<&str>, _>>()
        .unwrap()
        .join(",")
}
