use anyhow::Result;
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use search_core::corpus::{generate_products, load_corpus};
use search_core::{Scoring, SearchEngine};
use search_server::{build_app, AppConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Number of synthetic products to generate
    #[arg(long, default_value_t = 1_000_000)]
    docs: u32,
    /// Seed for the product generator; drawn at random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Load documents from a JSON/JSONL file or directory instead of generating them
    #[arg(long)]
    corpus: Option<PathBuf>,
    /// Results per page when the request has no limit
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u64).range(1..))]
    page_size: u64,
    /// Upper bound applied to requested limits
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    max_page_size: u64,
    /// Seconds in-flight requests get to finish after a shutdown signal
    #[arg(long, default_value_t = 5)]
    grace_secs: u64,
    #[arg(long, value_enum, default_value_t = ScoringArg::Tf)]
    scoring: ScoringArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScoringArg {
    Tf,
    Normalized,
}

impl From<ScoringArg> for Scoring {
    fn from(arg: ScoringArg) -> Self {
        match arg {
            ScoringArg::Tf => Scoring::TermFrequency,
            ScoringArg::Normalized => Scoring::LengthNormalized,
        }
    }
}

fn build_engine(docs: u32, seed: Option<u64>, corpus: Option<PathBuf>, scoring: Scoring) -> Result<SearchEngine> {
    let documents = match corpus {
        Some(path) => load_corpus(&path)?,
        None => {
            let seed = seed.unwrap_or_else(rand::random);
            tracing::info!(docs, seed, "generating products");
            generate_products(docs, &mut StdRng::seed_from_u64(seed))
        }
    };
    Ok(SearchEngine::build(documents)?.with_scoring(scoring))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    // The listener is only bound once the index exists.
    let scoring: Scoring = args.scoring.into();
    let (docs, seed, corpus) = (args.docs, args.seed, args.corpus.clone());
    let engine = tokio::task::spawn_blocking(move || build_engine(docs, seed, corpus, scoring)).await??;
    let config = AppConfig {
        page_size: usize::try_from(args.page_size)?,
        max_page_size: usize::try_from(args.max_page_size)?,
    };
    let app = build_app(Arc::new(engine), config);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                stop_rx.await.ok();
            })
            .await
    });

    tokio::select! {
        res = &mut server => {
            res??;
            return Ok(());
        }
        _ = shutdown_signal() => {}
    }

    tracing::info!(grace_secs = args.grace_secs, "shutting down server");
    stop_tx.send(()).ok();
    match tokio::time::timeout(Duration::from_secs(args.grace_secs), server).await {
        Ok(res) => {
            res??;
            tracing::info!("server exited cleanly");
        }
        Err(_) => tracing::warn!("grace period elapsed, dropping in-flight requests"),
    }
    Ok(())
}
