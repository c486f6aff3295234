//! inkpress: a markdown content repository for a category-driven blog
//!
//! This crate discovers markdown posts with front matter, derives slugs from
//! their paths, and answers listing, lookup and category queries, either
//! through the CLI or a small JSON API.

pub mod commands;
pub mod config;
pub mod content;
pub mod server;

use anyhow::Result;
use std::path::Path;

use content::{FsSource, Repository};

/// The main application, rooted at a site directory
#[derive(Clone)]
pub struct Inkpress {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Markdown corpus directory
    pub content_dir: std::path::PathBuf,
}

impl Inkpress {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(config.content_dir.trim_matches('/'));

        Ok(Self {
            config,
            base_dir,
            content_dir,
        })
    }

    /// Repository over the on-disk corpus
    pub fn repository(&self) -> Repository<FsSource> {
        let source = FsSource::new(&self.base_dir, &self.config.content_dir);
        Repository::new(source, &self.config.content_dir)
            .with_fetch_timeout(self.config.fetch_timeout())
    }
}
