//! Docrawl main entry point
//!
//! This is the command-line interface for the docrawl documentation crawler.

use clap::Parser;
use docrawl::config::load_config_with_hash;
use docrawl::crawler::run_crawl;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Docrawl: a resumable documentation-site crawler
///
/// Docrawl walks a single documentation site pinned to one language and one
/// version, stores every fetched page exactly once, and resumes interrupted
/// crawls from its SQLite work queue.
#[derive(Parser, Debug)]
#[command(name = "docrawl")]
#[command(version)]
#[command(about = "A resumable documentation-site crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Seed URL to start from (defaults to the configured docs root)
    #[arg(value_name = "SEED_URL")]
    seed: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Clear frontier and not-found state before crawling (stored pages are kept)
    #[arg(long)]
    fresh: bool,

    /// Show statistics from the database and exit
    #[arg(long, conflicts_with = "fresh")]
    stats: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };
    tracing::debug!("Config hash: {}", config_hash);

    if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_crawl(config, cli.seed, cli.fresh).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("docrawl=info,warn"),
            1 => EnvFilter::new("docrawl=debug,info"),
            2 => EnvFilter::new("docrawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &docrawl::config::Config) -> Result<(), Box<dyn std::error::Error>> {
    use docrawl::storage::{SqliteStorage, Storage};
    use std::path::Path;

    let storage = SqliteStorage::new(Path::new(&config.output.database_path))?;

    println!("Database: {}\n", config.output.database_path);
    println!("Stored pages:       {}", storage.count_pages()?);
    println!("Frontier entries:   {}", storage.count_frontier()?);
    println!("  unprocessed:      {}", storage.count_unprocessed()?);
    println!("Not-found URLs:     {}", storage.count_not_found()?);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: docrawl::config::Config,
    seed: Option<String>,
    fresh: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if fresh {
        tracing::info!("Starting fresh crawl (clearing previous frontier state)");
    } else {
        tracing::info!("Starting crawl (will resume if interrupted run exists)");
    }

    tracing::info!(
        "Scope: {} (language {}, version {})",
        config.site.base_url,
        config.site.language,
        config.site.version
    );

    match run_crawl(config, seed, fresh).await {
        Ok(()) => {
            tracing::info!("Crawl completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
