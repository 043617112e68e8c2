//! `linguafeed` binary: loads a config file, builds the in-memory repos and
//! configured engines, and starts the scheduler. Grounded on the teacher's
//! `main.rs` shape (clap `Args` with a config path, `init_tracing` early,
//! then run until a shutdown signal) with everything HTTP/UI-serving
//! stripped, since this binary never serves requests (§1 Non-goals).

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use linguafeed::config::PipelineConfig;
use linguafeed::db::memory::{MemoryCacheRepo, MemorySourceFeedRepo, MemoryTranslatedFeedRepo};
use linguafeed::engine::build_engines;
use linguafeed::jobs::{JobQueue, PipelineContext, run_scheduler};
use linguafeed::observability::init_tracing;

#[derive(Parser, Debug)]
#[command(version, about = "RSS/Atom feed translation and summarization pipeline", long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "linguafeed.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match PipelineConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("failed to load config from {}: {error}", args.config.display());
            std::process::exit(1);
        }
    };

    let _tracing_guard = match init_tracing(&config.observability) {
        Ok(guard) => guard,
        Err(error) => {
            eprintln!("failed to initialize tracing: {error}");
            std::process::exit(1);
        }
    };

    tracing::info!(config = %args.config.display(), "starting linguafeed");

    let engines = build_engines(&config.engines);
    let engine_names: Vec<&str> = engines.keys().map(String::as_str).collect();
    tracing::info!(engines = ?engine_names, "configured engines");

    let ctx = PipelineContext {
        source_feeds: Arc::new(MemorySourceFeedRepo::default()),
        translated_feeds: Arc::new(MemoryTranslatedFeedRepo::default()),
        cache: Arc::new(MemoryCacheRepo::default()),
        engines,
        http: reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.scheduler.engine_timeout_secs))
            .build()
            .expect("reqwest client config is always valid"),
        server: config.server.clone(),
        scheduler: config.scheduler.clone(),
        queue: JobQueue::new(),
    };

    if let Err(error) = run_scheduler(ctx).await {
        tracing::error!(%error, "scheduler failed to start");
        std::process::exit(1);
    }

    wait_for_shutdown().await;
    tracing::info!("shutdown signal received, exiting");
}

async fn wait_for_shutdown() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
