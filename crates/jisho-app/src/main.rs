use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use jisho_config::{BackendKind, Config};
use jisho_core::{SearchController, SearchPolicy};
use jisho_remote::Backend;
use tokio::signal;
use tracing_subscriber::EnvFilter;

mod controller;
mod events;
mod io;
mod render;

use self::controller::AppController;

/// Incremental Japanese dictionary search in the terminal
#[derive(Parser)]
#[command(name = "jisho", version)]
struct Args {
    /// JSON config profile
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where entries come from: api or scrape
    #[arg(long)]
    backend: Option<BackendKind>,

    #[arg(long)]
    base_url: Option<String>,

    /// Shortest query that triggers a search
    #[arg(long)]
    min_chars: Option<usize>,
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("Loading config from {}", path.display());
            Config::from_json_file(path)?
        }
        None => Config::new(),
    };

    if let Some(backend) = args.backend {
        config.lookup.backend = backend;
    }
    if let Some(base_url) = &args.base_url {
        config.lookup.base_url = base_url.clone();
    }
    if let Some(min_chars) = args.min_chars {
        config.search.min_query_chars = min_chars;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let backend = Backend::from_config(&config.lookup)?;
    let controller = Arc::new(SearchController::new(
        Arc::new(backend),
        SearchPolicy {
            min_query_chars: config.search.min_query_chars,
        },
    )?);

    let app = AppController::new(controller);
    let mut tasks = app.spawn_tasks()?;

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("Task finished, shutting down"),
                Ok(Err(e)) => tracing::error!("Task failed: {e}"),
                Err(e) => tracing::error!("Task panicked: {e}"),
            }
        }
    }

    app.shutdown();
    while tasks.join_next().await.is_some() {}

    Ok(())
}
