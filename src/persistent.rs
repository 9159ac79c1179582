use crate::ScraperError;
use std::{
    collections::BTreeMap,
    io,
    path::{Path, PathBuf},
};
use tokio::fs;
use tracing::{debug, warn};

/// Slug to absolute image URL, ordered by slug.
pub type ImageMap = BTreeMap<String, String>;

/// The mapping as stored on disk. Entries left without a value by hand
/// are kept as `None` so they are written back as `null`.
pub type StoredMap = BTreeMap<String, Option<String>>;

/// The YAML file holding every slug ever discovered.
pub struct ImageStore {
    path: PathBuf,
}

impl ImageStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        ImageStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored mapping. Anything that is not a readable YAML mapping
    /// is treated as an empty one.
    pub async fn load(&self) -> StoredMap {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No existing mapping at {}", self.path.display());
                return StoredMap::new();
            }
            Err(e) => {
                warn!(
                    "Unable to read {}, starting from an empty mapping: {}",
                    self.path.display(),
                    e
                );
                return StoredMap::new();
            }
        };

        if contents.trim().is_empty() {
            debug!("Existing mapping at {} is empty", self.path.display());
            return StoredMap::new();
        }

        match serde_yaml::from_str::<Option<StoredMap>>(&contents) {
            Ok(map) => map.unwrap_or_default(),
            Err(e) => {
                warn!(
                    "Unable to parse {}, starting from an empty mapping: {}",
                    self.path.display(),
                    e
                );
                StoredMap::new()
            }
        }
    }

    /// Replaces the file contents with `map`, creating parent directories first.
    pub async fn save(&self, map: &StoredMap) -> Result<(), ScraperError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let yaml = serde_yaml::to_string(map)?;
        fs::write(&self.path, yaml).await?;
        Ok(())
    }

    /// Loads, overlays `discovered` and saves. Returns the merged mapping.
    pub async fn merge(&self, discovered: ImageMap) -> Result<StoredMap, ScraperError> {
        let mut map = self.load().await;
        overlay(&mut map, discovered);
        self.save(&map).await?;
        Ok(map)
    }
}

/// Newly discovered entries win over existing ones with the same slug.
pub fn overlay(existing: &mut StoredMap, discovered: ImageMap) {
    existing.extend(discovered.into_iter().map(|(slug, url)| (slug, Some(url))));
}
