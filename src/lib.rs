//! folio: content store for a front-matter based portfolio site
//!
//! This crate loads and validates the blog posts and project write-ups that
//! an external static-site generator renders. Each content file is a YAML
//! (or TOML) front-matter header followed by a markup body.

pub mod commands;
pub mod config;
pub mod content;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use content::{ContentError, ContentStore, Page};

/// A site directory and its configuration
#[derive(Debug, Clone)]
pub struct Folio {
    /// Store configuration
    pub config: config::StoreConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content directory
    pub content_dir: PathBuf,
}

impl Folio {
    /// Open a site directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::StoreConfig::load(&config_path)?
        } else {
            config::StoreConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
        })
    }

    /// The content store described by the configuration
    pub fn store(&self) -> Result<ContentStore> {
        ContentStore::from_config(&self.base_dir, &self.config)
    }

    /// Create a new content file
    pub fn new_page(&self, title: &str, section: Option<&str>, draft: bool) -> Result<PathBuf> {
        commands::new::create_page(self, title, section, draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_open_without_config() {
        let tmp = tempfile::TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();
        assert_eq!(folio.content_dir, tmp.path().join("content"));
    }

    #[test]
    fn test_open_with_config() {
        let tmp = tempfile::TempDir::new().unwrap();
        fs::write(tmp.path().join("_config.yml"), "content_dir: src/pages\n").unwrap();
        fs::create_dir_all(tmp.path().join("src/pages/posts")).unwrap();
        fs::write(
            tmp.path().join("src/pages/posts/hello.md"),
            "---\ntitle: Hello\n---\nHi.\n",
        )
        .unwrap();

        let folio = Folio::new(tmp.path()).unwrap();
        let store = folio.store().unwrap();
        let page = store.get_page("posts/hello.md").unwrap();
        assert_eq!(page.title, "Hello");
    }
}
