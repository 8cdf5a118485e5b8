use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use fightin_words::config::{parse_max_features, Config};
use fightin_words::counter::{decode_document, DecodePolicy, TermWeighting};
use fightin_words::output::report::ComparisonReport;
use fightin_words::output::terminal::display_comparison;
use fightin_words::{analyze, Prior};

/// Fightin' words: find the vocabulary that most distinguishes two corpora.
///
/// Ranks every term by its log-odds-ratio with an informative Dirichlet
/// prior (Monroe et al. 2008). Positive scores favor corpus A.
#[derive(Parser)]
#[command(name = "fightin-words", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two corpora and rank their distinctive terms
    Compare {
        /// Files making up corpus A
        #[arg(short = 'a', long = "corpus-a", required = true, num_args = 1..)]
        corpus_a: Vec<PathBuf>,

        /// Files making up corpus B
        #[arg(short = 'b', long = "corpus-b", required = true, num_args = 1..)]
        corpus_b: Vec<PathBuf>,

        /// Display name for corpus A (default: "A")
        #[arg(long, default_value = "A")]
        label_a: String,

        /// Display name for corpus B (default: "B")
        #[arg(long, default_value = "B")]
        label_b: String,

        /// Uniform prior ("0.01") or comma-separated per-term priors
        #[arg(long)]
        prior: Option<String>,

        /// Vocabulary cap ("none" or 0 for unlimited)
        #[arg(long)]
        max_features: Option<String>,

        /// Built-in stop word list to remove (e.g. english)
        #[arg(long)]
        stop_words: Option<String>,

        /// Word n-gram range as MIN,MAX (default: 1,1)
        #[arg(long, value_parser = parse_ngram_range)]
        ngram: Option<(usize, usize)>,

        /// How term occurrences are weighted per document
        #[arg(long, value_enum, default_value = "count")]
        weighting: WeightingArg,

        /// Treat each non-empty line as a separate document
        #[arg(long)]
        lines: bool,

        /// Terms to show per corpus
        #[arg(long)]
        top: Option<usize>,

        /// Print the full ranked list as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the terms extracted from a piece of text
    Tokens {
        /// The text to tokenize
        text: String,

        /// Built-in stop word list to remove (e.g. english)
        #[arg(long)]
        stop_words: Option<String>,

        /// Word n-gram range as MIN,MAX (default: 1,1)
        #[arg(long, value_parser = parse_ngram_range)]
        ngram: Option<(usize, usize)>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum WeightingArg {
    Count,
    Binary,
    Tfidf,
}

impl From<WeightingArg> for TermWeighting {
    fn from(arg: WeightingArg) -> Self {
        match arg {
            WeightingArg::Count => TermWeighting::Count,
            WeightingArg::Binary => TermWeighting::Binary,
            WeightingArg::Tfidf => TermWeighting::TfIdf,
        }
    }
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("fightin_words=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compare {
            corpus_a,
            corpus_b,
            label_a,
            label_b,
            prior,
            max_features,
            stop_words,
            ngram,
            weighting,
            lines,
            top,
            json,
        } => {
            let mut config = Config::load()?;
            if let Some(raw) = prior {
                config.prior = raw
                    .parse::<Prior>()
                    .with_context(|| format!("invalid --prior '{raw}'"))?;
            }
            if let Some(raw) = max_features {
                config.max_features = parse_max_features(&raw)
                    .with_context(|| format!("invalid --max-features '{raw}'"))?;
            }
            if stop_words.is_some() {
                config.stop_words = stop_words;
            }
            if let Some(top) = top {
                config.top = top;
            }

            let mut vectorizer = config.vectorizer()?.with_weighting(weighting.into());
            if let Some((min_n, max_n)) = ngram {
                vectorizer = vectorizer.with_ngram_range(min_n, max_n);
            }

            let docs_a = read_corpus(&corpus_a, lines)?;
            let docs_b = read_corpus(&corpus_b, lines)?;
            info!(
                docs_a = docs_a.len(),
                docs_b = docs_b.len(),
                prior = %config.prior,
                "Comparing corpora"
            );

            let analysis = analyze(&docs_a, &docs_b, &config.prior, &vectorizer)?;

            if json {
                println!("{}", ComparisonReport::from_analysis(&analysis).to_json()?);
            } else {
                display_comparison(&analysis, &label_a, &label_b, config.top);
            }
        }

        Commands::Tokens {
            text,
            stop_words,
            ngram,
        } => {
            let config = Config {
                stop_words,
                ..Config::load()?
            };
            let mut vectorizer = config.vectorizer()?;
            if let Some((min_n, max_n)) = ngram {
                vectorizer = vectorizer.with_ngram_range(min_n, max_n);
            }
            for term in vectorizer.analyze(&text) {
                println!("{term}");
            }
        }
    }

    Ok(())
}

/// Read every file as bytes, dropping invalid UTF-8, one document per file
/// or one per non-empty line.
fn read_corpus(paths: &[PathBuf], per_line: bool) -> Result<Vec<String>> {
    let mut documents = Vec::new();
    for path in paths {
        let text = read_document(path)?;
        if per_line {
            documents.extend(
                text.lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(str::to_string),
            );
        } else {
            documents.push(text);
        }
    }
    Ok(documents)
}

fn read_document(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(decode_document(&bytes, DecodePolicy::Ignore)?)
}

fn parse_ngram_range(raw: &str) -> std::result::Result<(usize, usize), String> {
    let (min, max) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected MIN,MAX, got '{raw}'"))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<usize>()
            .map_err(|_| format!("'{}' is not a positive integer", s.trim()))
    };
    let (min, max) = (parse(min)?, parse(max)?);
    if min == 0 || min > max {
        return Err(format!("invalid n-gram range {min},{max}"));
    }
    Ok((min, max))
}
