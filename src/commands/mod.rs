//! CLI commands

pub mod check;
pub mod list;
pub mod new;
pub mod show;

use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;

use crate::config::StoreConfig;
use crate::content::Page;

/// A page together with the values a generator derives from it
#[derive(Debug, Serialize)]
pub struct PageView<'a> {
    #[serde(flatten)]
    pub page: &'a Page,
    pub section: &'a str,
    pub permalink: String,
    pub excerpt: String,
    pub word_count: usize,
    pub reading_time: usize,
}

impl<'a> PageView<'a> {
    pub fn new(page: &'a Page, config: &StoreConfig) -> Self {
        Self {
            page,
            section: page.section(),
            permalink: page.permalink(),
            excerpt: page.excerpt(config.summary_words),
            word_count: page.word_count(),
            reading_time: page.reading_time(),
        }
    }
}

/// Format an optional date for terminal output
fn display_date(date: Option<&NaiveDate>, format: &str) -> String {
    match date {
        Some(d) => d.format(format).to_string(),
        None => "(undated)".to_string(),
    }
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
