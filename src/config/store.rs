//! Store configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    // Directory
    pub content_dir: String,
    pub extensions: Vec<String>,
    pub ignore: Vec<String>,

    // Publishing
    pub include_drafts: bool,
    pub summary_words: usize,

    // Writing
    pub default_section: String,

    // Date format (chrono syntax)
    pub date_format: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            content_dir: "content".to_string(),
            extensions: vec!["md".to_string(), "markdown".to_string()],
            ignore: Vec::new(),

            include_drafts: false,
            summary_words: 70,

            default_section: "posts".to_string(),

            date_format: "%Y-%m-%d".to_string(),
            extra: HashMap::new(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: StoreConfig =
            serde_yaml::from_str(&content).with_context(|| format!("Failed to parse {:?}", path))?;
        Ok(config)
    }
}
