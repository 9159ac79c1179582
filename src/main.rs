use clap::Parser;
use product_image_scraper::bintang::BintangCrawler;
use product_image_scraper::{run_scraper, Config, HttpFetcher, DEFAULT_OUTPUT};
use std::{path::PathBuf, process, time::Duration};
use tracing::{error, info};
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;

/// Exit code when the HTML selectors cannot be compiled.
const EXIT_SELECTORS: i32 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "product-image-scraper",
    about = "Collect product image URLs from bintangpasundan.com into a YAML mapping"
)]
struct Cli {
    /// Mapping file to merge into
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Listing page to scan for product links (repeatable, replaces the built-in seeds)
    #[arg(long = "seed")]
    seeds: Vec<String>,

    /// Per request timeout
    #[arg(long, default_value_t = 15)]
    timeout_secs: u64,

    /// Log the merged mapping without writing it
    #[arg(long)]
    dry_run: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let defaults = Config::default();
        Config {
            seeds: if cli.seeds.is_empty() {
                defaults.seeds
            } else {
                cli.seeds
            },
            timeout: Duration::from_secs(cli.timeout_secs),
            output: cli.output,
            dry_run: cli.dry_run,
            ..defaults
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
                "info,html5ever=error,selectors=error,hyper=warn,reqwest=info".into()
            }),
        )
        .with(ErrorLayer::default())
        .init();

    let config = Config::from(Cli::parse());

    let crawler = match BintangCrawler::new() {
        Ok(crawler) => crawler,
        Err(e) => {
            error!("HTML parsing is unavailable: {}", e);
            process::exit(EXIT_SELECTORS);
        }
    };
    let fetcher = HttpFetcher::new(&config)?;

    let summary = run_scraper(&crawler, &fetcher, &config).await?;
    info!(
        "Done: {} candidates, {} with image, {} without, {} skipped, {} entries stored",
        summary.candidates, summary.discovered, summary.missing, summary.skipped, summary.total
    );

    Ok(())
}
