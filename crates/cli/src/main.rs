use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinevault_core::checker::{FfmpegValidator, IntegrityScanner};
use cinevault_core::crawler::Crawler;
use cinevault_core::dispatcher::{Aria2Dispatcher, Dispatcher};
use cinevault_core::fetcher::HttpFetcher;
use cinevault_core::judge::create_judge;
use cinevault_core::parser::{UNKNOWN_RESOLUTION, UNKNOWN_SUBTITLE, UNKNOWN_YEAR};
use cinevault_core::rematch::Rematcher;
use cinevault_core::store::{MovieStore, SqliteMovieStore};
use cinevault_core::{load_config, validate_config, Config};

#[derive(Parser)]
#[command(name = "cinevault", version, about = "Movie site crawler and media library manager")]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, global = true, env = "CINEVAULT_CONFIG", default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Crawl listing pages and persist discovered movies.
    Scrape {
        #[arg(long, default_value_t = 1)]
        start_page: u32,
        #[arg(long, default_value_t = 1)]
        end_page: u32,
        /// Also enqueue each new movie's link for download.
        #[arg(long)]
        download: bool,
    },
    /// Scan a library directory for damaged video files and recover their
    /// download links.
    Check {
        /// Files at or above this size (GB) are presumed complete.
        #[arg(long, default_value_t = 1.0)]
        max_size: f64,
        /// Library directory to scan.
        #[arg(long)]
        directory: PathBuf,
    },
    /// Print the movie catalog.
    List {
        /// Print bare download links only.
        #[arg(long)]
        links_only: bool,
    },
    /// Create the database and its schema.
    Init,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    validate_config(&config).context("Configuration validation failed")?;

    match cli.command {
        Command::Scrape {
            start_page,
            end_page,
            download,
        } => scrape(config, start_page, end_page, download).await,
        Command::Check {
            max_size,
            directory,
        } => check(config, max_size, &directory).await,
        Command::List { links_only } => list(config, links_only),
        Command::Init => init(config),
    }
}

fn open_store(config: &Config) -> Result<Arc<SqliteMovieStore>> {
    let store = SqliteMovieStore::new(&config.database.path)
        .with_context(|| format!("Failed to open database at {:?}", config.database.path))?;
    Ok(Arc::new(store))
}

async fn scrape(config: Config, start_page: u32, end_page: u32, download: bool) -> Result<()> {
    anyhow::ensure!(
        start_page <= end_page,
        "start-page must not exceed end-page"
    );

    let store = open_store(&config)?;
    let fetcher = Arc::new(
        HttpFetcher::new(config.fetcher.clone()).context("Failed to build HTTP client")?,
    );

    let dispatcher: Option<Arc<dyn Dispatcher>> = if download {
        let aria2_config = config.downloader.clone().unwrap_or_default();
        info!("Dispatching downloads to {}", aria2_config.rpc_url);
        Some(Arc::new(
            Aria2Dispatcher::new(aria2_config).context("Failed to build aria2 client")?,
        ))
    } else {
        None
    };

    let crawler = Crawler::new(fetcher, store, dispatcher, config.crawler.clone());
    let processed = crawler.run(start_page, end_page).await;
    println!(
        "Processed {} movie(s) across pages {}-{}",
        processed, start_page, end_page
    );
    Ok(())
}

async fn check(config: Config, max_size_gb: f64, directory: &PathBuf) -> Result<()> {
    anyhow::ensure!(max_size_gb > 0.0, "max-size must be positive");
    let max_size_bytes = (max_size_gb * 1024.0 * 1024.0 * 1024.0) as u64;

    let checker_config = config.checker.clone();
    let validator = Arc::new(FfmpegValidator::new(checker_config.ffmpeg_path.clone()));
    let scanner = IntegrityScanner::new(validator, checker_config);

    let verdicts = scanner
        .scan(directory, max_size_bytes)
        .await
        .with_context(|| format!("Failed to scan {:?}", directory))?;

    let damaged: Vec<PathBuf> = verdicts
        .iter()
        .filter_map(|(path, intact)| (!intact).then(|| path.clone()))
        .collect();
    println!(
        "Checked {} file(s): {} intact, {} damaged",
        verdicts.len(),
        verdicts.len() - damaged.len(),
        damaged.len()
    );
    for path in &damaged {
        println!("  damaged: {}", path.display());
    }
    if damaged.is_empty() {
        return Ok(());
    }

    let store = open_store(&config)?;
    let judge = create_judge(&config.judge);
    let rematcher = Rematcher::new(store, judge, config.rematch.clone());
    let recovered = rematcher.rematch(&damaged).await;

    println!("Recovered {} download link(s):", recovered.len());
    for item in &recovered {
        println!(
            "{} ({})",
            item.name,
            item.year.as_deref().unwrap_or(UNKNOWN_YEAR)
        );
        // Bare link on its own line for easy copying.
        println!("{}", item.link);
    }
    Ok(())
}

fn list(config: Config, links_only: bool) -> Result<()> {
    let store = open_store(&config)?;

    if links_only {
        for link in store.all_links().context("Failed to list links")? {
            println!("{}", link);
        }
        return Ok(());
    }

    let movies = store.all().context("Failed to list movies")?;
    println!("{:<6} {:<30} {:<10} {:<12} {:<10}", "id", "name", "year", "subtitle", "resolution");
    for movie in &movies {
        println!(
            "{:<6} {:<30} {:<10} {:<12} {:<10}",
            movie.id,
            movie.name,
            movie.year.as_deref().unwrap_or(UNKNOWN_YEAR),
            movie.subtitle.as_deref().unwrap_or(UNKNOWN_SUBTITLE),
            movie.resolution.as_deref().unwrap_or(UNKNOWN_RESOLUTION),
        );
        println!("       {}", movie.link);
    }
    println!("{} movie(s)", movies.len());
    Ok(())
}

fn init(config: Config) -> Result<()> {
    open_store(&config)?;
    println!("Database initialized at {}", config.database.path.display());
    Ok(())
}
