//! folio-rs: the content engine behind a personal engineering portfolio site
//!
//! This crate provides the file-based content repository and rendering
//! pipeline: markdown/HTML ingestion with front matter, anchor-tagged HTML,
//! table-of-contents extraction, related-content selection, a flat search
//! index, and an RSS feed, served over a small HTTP API.

pub mod commands;
pub mod config;
pub mod content;
pub mod feed;
pub mod search;
pub mod server;
pub mod toc;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::ContentStore;

/// The main application handle
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content directory (`content/<type>/<slug>.{md,html}`)
    pub content_dir: PathBuf,
    /// Static assets directory
    pub static_dir: PathBuf,
}

impl Folio {
    /// Create a new instance from a base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            static_dir,
        })
    }

    /// A fresh store over the content directory
    pub fn store(&self) -> ContentStore {
        ContentStore::new(&self.content_dir)
    }
}
