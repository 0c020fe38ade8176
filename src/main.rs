use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use convbow::{
    aggregate_all, ensure_counts_present, load_inputs, write_outputs, AggregationContext,
    SourceRegistry, DEFAULT_COUNTS_HELPER,
};

const DEFAULT_SMOOTH_UNIGRAM_COUNTS: f64 = 1.0;

/// Gets per-conversation word-count pairs from Fisher/Switchboard transcripts.
///
/// E.g. convbow --vocab-file=data/rnnlm/vocab/words.txt
/// --data-weights-file=exp/rnnlm/data_weights.txt --output-path=exp/rnnlm/egs data/rnnlm/data
#[derive(Parser)]
#[command(name = "convbow")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Vocabulary file with `<word> <id>` lines
    #[arg(long)]
    vocab_file: PathBuf,

    /// Words not in the vocabulary are mapped to this word (e.g. <unk>);
    /// if empty, out-of-vocabulary words are an error
    #[arg(long, default_value = "")]
    unk_word: String,

    /// Multiplicity and weight per data source, e.g. 'foo 1 0.5' and 'bar 5 1.5'
    #[arg(long)]
    data_weights_file: PathBuf,

    /// Constant for unigram smoothing (accepted for compatibility, not applied)
    #[arg(long, default_value_t = DEFAULT_SMOOTH_UNIGRAM_COUNTS)]
    smooth_unigram_counts: f64,

    /// Directory for the `<source>.txt` and `<source>.label.txt` outputs
    #[arg(long)]
    output_path: PathBuf,

    /// Helper run on the text directory to create missing .counts files
    #[arg(long, default_value = DEFAULT_COUNTS_HELPER)]
    counts_helper: PathBuf,

    /// JSON file mapping source names to transcript dialects
    /// (defaults to the fisher/swbd sources and their _sub/dev_ variants)
    #[arg(long)]
    source_registry: Option<PathBuf>,

    /// Write a JSON summary of what each source contributed
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Directory in which to look for data
    text_dir: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    run(cli)
}

fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn run(cli: Cli) -> Result<()> {
    if cli.smooth_unigram_counts != DEFAULT_SMOOTH_UNIGRAM_COUNTS {
        warn!(
            "--smooth-unigram-counts={} has no effect on the generated counts",
            cli.smooth_unigram_counts
        );
    }

    ensure_counts_present(&cli.counts_helper, &cli.text_dir);

    let registry = match &cli.source_registry {
        Some(path) => SourceRegistry::from_json_file(path)
            .with_context(|| format!("Failed to load source registry {:?}", path))?,
        None => SourceRegistry::default(),
    };
    debug!("Using {} source registry rules", registry.rules().len());

    let inputs = load_inputs(
        &cli.text_dir,
        &cli.data_weights_file,
        &cli.vocab_file,
        &cli.unk_word,
    )
    .context("Failed to load inputs")?;

    let ctx = AggregationContext {
        vocab: &inputs.vocab,
    };
    let aggregated = aggregate_all(&inputs.catalog, &inputs.weights, &registry, &ctx)
        .context("Failed to aggregate conversation counts")?;

    let summary = write_outputs(&cli.output_path, &aggregated, &inputs.vocab)
        .context("Failed to write outputs")?;

    if let Some(path) = &cli.summary_json {
        summary
            .write_json(path)
            .with_context(|| format!("Failed to write summary {:?}", path))?;
        info!("Summary written to {:?}", path);
    }

    // printed regardless of the log filter
    let names: Vec<&str> = summary.sources.iter().map(|s| s.name.as_str()).collect();
    eprintln!(
        "convbow: generated {} source(s) in {}: {}",
        names.len(),
        cli.output_path.display(),
        names.join(", ")
    );

    Ok(())
}
