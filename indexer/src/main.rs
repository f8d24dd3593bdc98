use anyhow::Result;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use search_core::corpus::{generate_products, load_corpus};
use search_core::{Page, Scoring, SearchEngine};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Generate product corpora and query them offline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a seeded synthetic product corpus as JSONL
    Generate {
        /// Output JSONL file
        #[arg(long)]
        output: PathBuf,
        /// Number of products
        #[arg(long, default_value_t = 1_000_000)]
        count: u32,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Build an in-memory index from a corpus and print the ranked records as JSON
    Query {
        /// Input path (file or directory)
        #[arg(long)]
        input: PathBuf,
        /// Query string
        #[arg(long)]
        q: String,
        #[arg(long, default_value_t = 50)]
        limit: i64,
        #[arg(long, default_value_t = 0)]
        offset: i64,
        /// Divide term frequencies by document length
        #[arg(long, default_value_t = false)]
        normalized: bool,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { output, count, seed } => generate(&output, count, seed),
        Commands::Query { input, q, limit, offset, normalized } => {
            let scoring = if normalized { Scoring::LengthNormalized } else { Scoring::TermFrequency };
            query(&input, &q, Page::new(limit, offset)?, scoring)
        }
    }
}

fn generate(output: &Path, count: u32, seed: u64) -> Result<()> {
    if let Some(dir) = output.parent() {
        fs::create_dir_all(dir)?;
    }
    let docs = generate_products(count, &mut StdRng::seed_from_u64(seed));
    let mut out = BufWriter::new(File::create(output)?);
    for doc in &docs {
        serde_json::to_writer(&mut out, doc)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    tracing::info!(count, seed, output = %output.display(), "corpus written");
    Ok(())
}

fn query(input: &Path, q: &str, page: Page, scoring: Scoring) -> Result<()> {
    let engine = SearchEngine::build(load_corpus(input)?)?.with_scoring(scoring);
    let hits = engine.search(q, page)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &hits)?;
    out.write_all(b"\n")?;
    Ok(())
}
