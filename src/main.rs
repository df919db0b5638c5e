//! Headless hash router.
//!
//! Builds the router for a site, replays hash navigations against it and
//! prints the resulting document.
//!
//! # Architecture Overview
//!
//! ```text
//!   hashes (argv)
//!        │  first → Load, rest → HashChange
//!        ▼
//!   ┌──────────┐   ┌──────────────┐   ┌────────────┐   ┌──────────┐
//!   │  mpsc    │──▶│   Router     │──▶│ ViewLoader │──▶│ Fetcher  │── fragments
//!   │ events   │   │ (route table)│   │            │   │ fs/http  │
//!   └──────────┘   └──────┬───────┘   └─────┬──────┘   └──────────┘
//!                         │ 404             │ inject, title, loading
//!                         ▼                 ▼
//!                    ┌─────────────────────────────┐
//!                    │ MemoryDocument → stdout     │
//!                    └─────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::mpsc;

use hash_router::config::{load_config, SiteConfig};
use hash_router::dom::{DocumentSnapshot, LoggingScriptHost, MemoryDocument};
use hash_router::fetch::{FileFetcher, Fetcher, HttpFetcher};
use hash_router::observability::logging;
use hash_router::{NavigationEvent, Router, StalePolicy, ViewLoader};

#[derive(Parser)]
#[command(name = "hash-router")]
#[command(about = "Replay hash navigations against a fragment site", long_about = None)]
struct Cli {
    /// Site config (TOML). Defaults to the built-in portfolio site.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Serve fragments from this directory.
    #[arg(long, conflicts_with = "base_url")]
    root: Option<PathBuf>,

    /// Fetch fragments over HTTP relative to this URL.
    #[arg(long)]
    base_url: Option<String>,

    /// Discard results of navigations superseded by a newer one.
    #[arg(long)]
    latest_wins: bool,

    /// Print the final document as JSON.
    #[arg(long)]
    json: bool,

    /// Hashes to visit, e.g. "#/" "#/about". The first is the page load.
    hashes: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SiteConfig::portfolio(),
    };
    if cli.latest_wins {
        config.navigation.stale_policy = StalePolicy::LatestWins;
    }

    logging::init(&config.observability.log_level);

    tracing::info!(
        site = %config.site.name,
        templates = config.templates.len(),
        routes = config.routes.len(),
        "Configuration loaded"
    );

    let fetcher = build_fetcher(&cli, &config)?;
    let document = Arc::new(
        MemoryDocument::builder()
            .site(&config.site)
            .script_host(Arc::new(LoggingScriptHost))
            .build(),
    );
    let loader = Arc::new(ViewLoader::new(document.clone(), fetcher, config.site.name.clone()));
    let router = Arc::new(Router::from_config(&config, loader));

    let (tx, rx) = mpsc::unbounded_channel();
    let listener = tokio::spawn(router.listen(rx));

    let mut hashes = cli.hashes.iter();
    tx.send(NavigationEvent::load(hashes.next().cloned().unwrap_or_default()))?;
    for hash in hashes {
        tx.send(NavigationEvent::hash_change(hash.clone()))?;
    }
    drop(tx);
    listener.await?;

    print_snapshot(&document.snapshot(), cli.json)?;
    Ok(())
}

fn build_fetcher(cli: &Cli, config: &SiteConfig) -> Result<Arc<dyn Fetcher>, Box<dyn std::error::Error>> {
    let fetcher: Arc<dyn Fetcher> = if let Some(root) = &cli.root {
        Arc::new(FileFetcher::new(root))
    } else if let Some(base) = &cli.base_url {
        Arc::new(HttpFetcher::new(base)?)
    } else if let Some(root) = &config.fetch.root_dir {
        Arc::new(FileFetcher::new(root))
    } else if let Some(base) = &config.fetch.base_url {
        Arc::new(HttpFetcher::new(base)?)
    } else {
        Arc::new(FileFetcher::new("."))
    };
    Ok(fetcher)
}

fn print_snapshot(snapshot: &DocumentSnapshot, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
        return Ok(());
    }

    let loading = match &snapshot.loading_indicator {
        Some(indicator) if indicator.has_class("hidden") => "hidden",
        Some(_) => "visible",
        None => "none",
    };
    println!("title: {}", snapshot.title);
    println!("loading: {loading}");
    println!();
    println!("{}", snapshot.content);
    Ok(())
}
