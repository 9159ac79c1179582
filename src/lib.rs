use scraper::Html;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};
use url::Url;

pub mod bintang;
pub mod persistent;

mod config;
mod error;
mod http;
mod utils;

pub use config::{Config, DEFAULT_OUTPUT, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use error::ScraperError;
pub use http::HttpFetcher;
pub use persistent::{ImageMap, ImageStore, StoredMap};
pub use utils::{resolve, slug_from_url};

/// Retrieves the body of a page.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, ScraperError>;
}

/// Site specific knowledge of where product links and images live.
pub trait ProductCrawler {
    /// Absolute product page URLs linked from `doc`, sorted and deduplicated.
    fn extract_product_links(&self, doc: &Html, base: &Url) -> Vec<String>;

    /// The representative image of a product page, resolved against `base`.
    fn extract_image(&self, doc: &Html, base: &Url) -> Option<String>;
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub candidates: usize,
    pub discovered: usize,
    pub missing: usize,
    pub skipped: usize,
    /// Entries in the mapping after the merge.
    pub total: usize,
}

/// Visits every seed and gathers the product links found on them. Seeds that
/// cannot be fetched are logged and skipped.
pub async fn collect_product_links<C, F>(crawler: &C, fetcher: &F, seeds: &[String]) -> Vec<String>
where
    C: ProductCrawler,
    F: Fetcher,
{
    let mut links = BTreeSet::new();

    for seed in seeds {
        let base = match Url::parse(seed).map_err(ScraperError::from) {
            Ok(base) => base,
            Err(e) => {
                warn!("Invalid seed url {}: {}", seed, e);
                continue;
            }
        };

        let html = match fetcher.fetch(seed).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Failed to fetch {}: {}", seed, e);
                continue;
            }
        };

        let found = {
            let doc = Html::parse_document(&html);
            crawler.extract_product_links(&doc, &base)
        };
        debug!("{} product links on {}", found.len(), seed);
        links.extend(found);
    }

    links.into_iter().collect()
}

/// Fetches a product page and picks its image. Fetch failures count as no image.
pub async fn find_product_image<C, F>(crawler: &C, fetcher: &F, url: &str) -> Option<String>
where
    C: ProductCrawler,
    F: Fetcher,
{
    let base = match Url::parse(url).map_err(ScraperError::from) {
        Ok(base) => base,
        Err(e) => {
            warn!("Invalid product url {}: {}", url, e);
            return None;
        }
    };

    let html = match fetcher.fetch(url).await {
        Ok(html) => html,
        Err(e) => {
            warn!("Error fetching product {}: {}", url, e);
            return None;
        }
    };

    let doc = Html::parse_document(&html);
    crawler.extract_image(&doc, &base)
}

/// Collects product links from the configured seeds, finds an image for each of
/// them and merges the result into the persisted mapping.
pub async fn run_scraper<C, F>(
    crawler: &C,
    fetcher: &F,
    config: &Config,
) -> Result<RunSummary, ScraperError>
where
    C: ProductCrawler,
    F: Fetcher,
{
    let links = collect_product_links(crawler, fetcher, &config.seeds).await;
    info!("Found {} candidate product links", links.len());

    let mut summary = RunSummary {
        candidates: links.len(),
        ..RunSummary::default()
    };

    let mut discovered = ImageMap::new();
    for link in &links {
        let Some(slug) = slug_from_url(link) else {
            debug!("No slug for {}", link);
            summary.skipped += 1;
            continue;
        };

        match find_product_image(crawler, fetcher, link).await {
            Some(image) => {
                info!("OK {} {}", slug, image);
                discovered.insert(slug, image);
            }
            None => {
                warn!("No image for {}", slug);
                summary.missing += 1;
            }
        }
    }
    summary.discovered = discovered.len();

    let store = ImageStore::new(config.output.clone());
    let merged = if config.dry_run {
        let mut map = store.load().await;
        persistent::overlay(&mut map, discovered);
        info!(
            "Dry run, {} not written:\n{}",
            store.path().display(),
            serde_yaml::to_string(&map)?
        );
        map
    } else {
        let map = store.merge(discovered).await?;
        info!("Wrote {}", store.path().display());
        map
    };
    summary.total = merged.len();

    Ok(summary)
}
