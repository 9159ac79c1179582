use crate::{utils, ProductCrawler, ScraperError};
use itertools::Itertools;
use scraper::{Html, Selector};
use tracing::warn;
use url::Url;

/// Href fragments that mark a product detail page.
pub const PRODUCT_PATH_MARKERS: [&str; 2] = ["/product/", "/produk/"];

const A: &str = "a[href]";
const OG_IMAGE: &str = r#"meta[property="og:image"]"#;
const IMG: &str = "img";

fn compile(selector: &'static str) -> Result<Selector, ScraperError> {
    Selector::parse(selector).map_err(|e| ScraperError::Selector {
        selector,
        reason: format!("{:?}", e),
    })
}

#[derive(Debug)]
pub struct BintangCrawler {
    a: Selector,
    og_image: Selector,
    img: Selector,
}

impl BintangCrawler {
    pub fn new() -> Result<Self, ScraperError> {
        Ok(BintangCrawler {
            a: compile(A)?,
            og_image: compile(OG_IMAGE)?,
            img: compile(IMG)?,
        })
    }
}

impl ProductCrawler for BintangCrawler {
    fn extract_product_links(&self, doc: &Html, base: &Url) -> Vec<String> {
        doc.select(&self.a)
            .filter_map(|a| a.value().attr("href"))
            .filter(|href| PRODUCT_PATH_MARKERS.iter().any(|m| href.contains(m)))
            .filter_map(|href| base.join(href).ok())
            .map(String::from)
            .sorted()
            .dedup()
            .collect()
    }

    fn extract_image(&self, doc: &Html, base: &Url) -> Option<String> {
        let og_image = doc
            .select(&self.og_image)
            .next()
            .and_then(|el| el.value().attr("content"))
            .filter(|content| !content.is_empty());

        let reference = match og_image {
            Some(content) => content,
            None => doc
                .select(&self.img)
                .next()
                .and_then(|el| el.value().attr("src"))
                .filter(|src| !src.is_empty())?,
        };

        match utils::resolve(base, reference) {
            Ok(image) => Some(image),
            Err(e) => {
                warn!("Unresolvable image {:?} on {}: {}", reference, base, e);
                None
            }
        }
    }
}
