use crate::bintang::SEED_URLS;
use std::{path::PathBuf, time::Duration};

pub const DEFAULT_USER_AGENT: &str = "kharismasteel-scraper/1.0 (+https://kharismasteel.github.io)";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_OUTPUT: &str = "_data/product_images.yml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Listing pages scanned for product links, in visiting order.
    pub seeds: Vec<String>,
    pub user_agent: String,
    /// Total time allowed for each request.
    pub timeout: Duration,
    /// Where the slug to image mapping is persisted.
    pub output: PathBuf,
    /// Log the merged mapping instead of writing it.
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            seeds: SEED_URLS.iter().map(ToString::to_string).collect(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            output: PathBuf::from(DEFAULT_OUTPUT),
            dry_run: false,
        }
    }
}
