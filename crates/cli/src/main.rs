//! paraclean CLI
//!
//! Scores aligned sentence pairs from a purported translation corpus and
//! either emits labeled training rows (train mode) or classifies each
//! pair and partitions the corpus into kept and eliminated files
//! (test mode).

mod progress;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use paraclean_core::lm::NgramModel;
use paraclean_core::normalize::Normalizer;
use paraclean_core::prefilter::PreFilter;
use paraclean_core::spelling::SpellChecker;
use paraclean_core::{BilingualDictionary, FeatureExtractor};
use paraclean_formats::{count_lines, output_paths, BitextReader, PartitionWriter, SentencePair};
use paraclean_model::{arff, Dataset, ForestConfig, RandomForest, KEPT_CLASS};

use progress::ProgressReporter;

#[derive(Parser)]
#[command(name = "paraclean")]
#[command(version, about = "Parallel corpus quality scoring and filtering", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output the run summary in JSON format
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Score pairs and print an ARFF-style training document to stdout
    Train {
        /// Bilingual dictionary file (one `word <> translation` per line)
        dictionary: PathBuf,

        /// Source-language corpus, one sentence per line
        source: PathBuf,

        /// Target-language corpus, aligned line-by-line with the source
        target: PathBuf,

        /// Reference word list for the spelling scorer
        #[arg(long)]
        wordlist: PathBuf,

        /// Pretrained ARPA language-model weights
        #[arg(long)]
        lm: PathBuf,

        /// Class label written on every emitted row; relabeling rows for
        /// training is a manual step outside this tool
        #[arg(long, default_value = "noise")]
        label: String,
    },

    /// Classify pairs and partition them into kept and eliminated files
    Test {
        /// Bilingual dictionary file (one `word <> translation` per line)
        dictionary: PathBuf,

        /// Source-language corpus, one sentence per line
        source: PathBuf,

        /// Target-language corpus, aligned line-by-line with the source
        target: PathBuf,

        /// Reference word list for the spelling scorer
        #[arg(long)]
        wordlist: PathBuf,

        /// Pretrained ARPA language-model weights
        #[arg(long)]
        lm: PathBuf,

        /// Labeled ARFF dataset the classifier is trained from
        #[arg(long)]
        dataset: PathBuf,
    },
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return;
        }
        Err(e) => {
            // Unrecognized mode or malformed usage: diagnostic, exit 1.
            let _ = e.print();
            std::process::exit(1);
        }
    };

    // Logging goes to stderr so train-mode stdout stays a clean ARFF
    // document.
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Train {
            dictionary,
            source,
            target,
            wordlist,
            lm,
            label,
        } => train(&dictionary, &source, &target, &wordlist, &lm, &label),
        Commands::Test {
            dictionary,
            source,
            target,
            wordlist,
            lm,
            dataset,
        } => test(&dictionary, &source, &target, &wordlist, &lm, &dataset, cli.json),
    }
}

/// Load every read-only scoring resource once, before the first pair.
/// Any failure here aborts the run.
fn load_extractor(dictionary: &Path, wordlist: &Path, lm: &Path) -> Result<FeatureExtractor> {
    let dictionary = BilingualDictionary::load(dictionary)
        .with_context(|| format!("Failed to load dictionary: {}", dictionary.display()))?;
    info!("Loaded dictionary: {} entries", dictionary.len());

    let model = NgramModel::load(lm)
        .with_context(|| format!("Failed to load language model: {}", lm.display()))?;
    info!(
        "Loaded {}-gram language model: {} entries",
        model.order(),
        model.len()
    );

    let spell = SpellChecker::load(wordlist)
        .with_context(|| format!("Failed to load word list: {}", wordlist.display()))?;
    info!("Loaded reference word list: {} words", spell.len());

    Ok(FeatureExtractor::new(dictionary, model, spell))
}

fn normalized(normalizer: &Normalizer, pair: SentencePair) -> SentencePair {
    SentencePair {
        source: normalizer.normalize(&pair.source),
        target: normalizer.normalize(&pair.target),
        line: pair.line,
    }
}

fn train(
    dictionary: &Path,
    source: &Path,
    target: &Path,
    wordlist: &Path,
    lm: &Path,
    label: &str,
) -> Result<()> {
    let extractor = load_extractor(dictionary, wordlist, lm)?;
    let normalizer = Normalizer::new();
    let prefilter = PreFilter::default();

    let reader = BitextReader::open(source, target)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", arff::header())?;

    let mut total = 0usize;
    let mut emitted = 0usize;
    let mut prefiltered = 0usize;

    for pair in reader {
        let pair = pair?;
        total += 1;
        let pair = normalized(&normalizer, pair);
        if !prefilter.accepts(&pair.source, &pair.target) {
            prefiltered += 1;
            continue;
        }
        let features = extractor.extract(&pair.source, &pair.target);
        writeln!(out, "{}", arff::format_row(&features, label))?;
        emitted += 1;
    }
    out.flush()?;

    info!(
        "Emitted {} training rows; {} of {} pairs pre-filtered",
        emitted, prefiltered, total
    );
    Ok(())
}

fn test(
    dictionary: &Path,
    source: &Path,
    target: &Path,
    wordlist: &Path,
    lm: &Path,
    dataset: &Path,
    json_output: bool,
) -> Result<()> {
    let extractor = load_extractor(dictionary, wordlist, lm)?;
    let normalizer = Normalizer::new();
    let prefilter = PreFilter::default();

    let labeled = Dataset::load(dataset)
        .with_context(|| format!("Failed to load labeled dataset: {}", dataset.display()))?;
    info!(
        "Training classifier on {} labeled rows (class index {})",
        labeled.len(),
        labeled.class_index()
    );
    let forest = RandomForest::train(&labeled, &ForestConfig::default())
        .context("Failed to train classifier")?;
    info!("Classifier ready: {} trees", forest.n_trees());

    let total_lines = count_lines(source)?;
    let reader = BitextReader::open(source, target)?;
    let mut writer = PartitionWriter::create(source, target)?;
    let progress = ProgressReporter::new(total_lines as u64);

    let mut total = 0usize;
    let mut prefiltered = 0usize;

    for pair in reader {
        let pair = pair?;
        total += 1;
        let pair = normalized(&normalizer, pair);
        if prefilter.accepts(&pair.source, &pair.target) {
            let features = extractor.extract(&pair.source, &pair.target);
            let distribution = forest.distribution(&features.as_array());
            // Hard decision: only a unanimous ensemble keeps the pair.
            if distribution[KEPT_CLASS] >= 1.0 {
                writer.write_kept(&pair)?;
            } else {
                writer.write_eliminated(&pair)?;
            }
        } else {
            prefiltered += 1;
        }
        progress.update(total);
    }
    progress.finish();

    let (kept_source, kept_target, eliminated) = output_paths(source, target);
    if json_output {
        let report = serde_json::json!({
            "source": source.to_string_lossy(),
            "target": target.to_string_lossy(),
            "total_pairs": total,
            "prefiltered": prefiltered,
            "kept": writer.kept(),
            "eliminated": writer.eliminated(),
            "kept_source": kept_source.to_string_lossy(),
            "kept_target": kept_target.to_string_lossy(),
            "eliminated_output": eliminated.to_string_lossy(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        progress::print_summary_report(
            source,
            target,
            total,
            prefiltered,
            writer.kept(),
            writer.eliminated(),
        );
        println!("  Kept source:  {}", kept_source.display());
        println!("  Kept target:  {}", kept_target.display());
        println!("  Eliminated:   {}", eliminated.display());
    }

    Ok(())
}
