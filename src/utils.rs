use crate::ScraperError;
use url::Url;

/// Resolves `reference` against `base` after trimming surrounding whitespace.
/// A reference that is empty once trimmed resolves to `base` itself.
pub fn resolve(base: &Url, reference: &str) -> Result<String, ScraperError> {
    Ok(base.join(reference.trim())?.into())
}

/// The last non-empty path segment of `url`, or `None` when the path is empty
/// once trailing slashes are removed.
pub fn slug_from_url(url: &str) -> Option<String> {
    let url = Url::parse(url).ok()?;
    let path = url.path().trim_end_matches('/');
    if path.is_empty() {
        return None;
    }

    path.rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}
