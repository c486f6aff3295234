//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    /// Author written into scaffolded posts
    pub author: String,

    // Content
    /// Directory (relative to the site) holding the markdown corpus
    pub content_dir: String,
    /// Per-document read timeout in milliseconds
    pub fetch_timeout_ms: u64,

    // Pagination
    pub per_page: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Inkpress".to_string(),
            author: crate::content::DEFAULT_AUTHOR.to_string(),
            content_dir: "blogposts".to_string(),
            fetch_timeout_ms: 5000,
            per_page: 10,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Timeout applied to each document read
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}
