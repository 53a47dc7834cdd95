//! Content store - loads pages from the content directory

use anyhow::Context;
use glob::Pattern;
use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use super::error::{ContentError, Result};
use super::page::sort_by_date_desc;
use super::Page;
use crate::config::StoreConfig;

/// Read-only view over a directory of content files
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
    extensions: Vec<String>,
    ignore: Vec<Pattern>,
    include_drafts: bool,
}

impl ContentStore {
    /// Create a store over `root` with default settings
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extensions: vec!["md".to_string(), "markdown".to_string()],
            ignore: Vec::new(),
            include_drafts: false,
        }
    }

    /// Create a store for a site directory using its configuration
    pub fn from_config<P: AsRef<Path>>(base_dir: P, config: &StoreConfig) -> anyhow::Result<Self> {
        let ignore = config
            .ignore
            .iter()
            .map(|p| Pattern::new(p).with_context(|| format!("Invalid ignore pattern: {}", p)))
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self {
            root: base_dir.as_ref().join(&config.content_dir),
            extensions: config.extensions.clone(),
            ignore,
            include_drafts: config.include_drafts,
        })
    }

    /// Include draft pages in `list_pages`
    pub fn with_drafts(mut self, include_drafts: bool) -> Self {
        self.include_drafts = include_drafts;
        self
    }

    /// Skip files whose relative path matches `pattern`
    pub fn with_ignore(mut self, pattern: Pattern) -> Self {
        self.ignore.push(pattern);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All published pages, loaded lazily
    ///
    /// Every iteration walks the directory afresh, so the listing can be
    /// iterated any number of times and reflects edits made in between.
    pub fn list_pages(&self) -> PageListing<'_> {
        PageListing {
            store: self,
            include_drafts: self.include_drafts,
        }
    }

    /// Load the page at `path`, relative to the content directory
    ///
    /// A directory resolves to its `index.md`. Drafts are returned too, but
    /// files `list_pages` would never visit (hidden, ignored, or not content)
    /// are `NotFound`.
    pub fn get_page<P: AsRef<Path>>(&self, path: P) -> Result<Page> {
        let requested = path.as_ref();
        let not_found = || ContentError::NotFound {
            path: requested.to_path_buf(),
        };

        let relative = if requested.is_absolute() {
            requested.strip_prefix(&self.root).map_err(|_| not_found())?
        } else {
            requested
        };
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(not_found());
        }

        let mut full = self.root.join(relative);
        if full.is_dir() {
            full = full.join("index.md");
        }
        if !full.is_file() {
            return Err(not_found());
        }
        let resolved = full.strip_prefix(&self.root).unwrap_or(&full);
        if self.is_excluded(resolved) {
            tracing::debug!("{:?} is excluded from the store", resolved);
            return Err(not_found());
        }

        self.load(&full)
    }

    /// Check every content file, drafts included
    ///
    /// Unlike `list_pages` this does not stop at the first bad file: every
    /// malformed file is reported, along with published pages that resolve
    /// to the same permalink.
    pub fn validate(&self) -> Vec<ContentError> {
        let mut errors = Vec::new();
        let mut permalinks: HashMap<String, PathBuf> = HashMap::new();

        let listing = PageListing {
            store: self,
            include_drafts: true,
        };
        for result in &listing {
            match result {
                Ok(page) => {
                    tracing::debug!("Checked {:?}", page.source);
                    if page.draft {
                        continue;
                    }
                    let permalink = page.permalink();
                    if let Some(first) = permalinks.get(&permalink) {
                        errors.push(ContentError::DuplicatePermalink {
                            permalink,
                            first: first.clone(),
                            second: page.source,
                        });
                    } else {
                        permalinks.insert(permalink, page.source);
                    }
                }
                Err(e) => errors.push(e),
            }
        }

        errors
    }

    /// Load a single page from a file under the root
    fn load(&self, path: &Path) -> Result<Page> {
        let content = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let source = path.strip_prefix(&self.root).unwrap_or(path);
        let page = Page::from_source(source, &content)?;
        tracing::debug!("Loaded {:?} ({})", source, page.title);
        Ok(page)
    }

    /// Whether a walk of the store would pass over this file
    fn is_excluded(&self, relative: &Path) -> bool {
        let hidden = relative.components().any(|c| match c {
            Component::Normal(name) => name.to_str().is_some_and(|n| n.starts_with('.')),
            _ => false,
        });
        hidden
            || !self.is_content_file(relative)
            || relative.ancestors().any(|p| !p.as_os_str().is_empty() && self.is_ignored(p))
    }

    fn is_ignored(&self, relative: &Path) -> bool {
        self.ignore.iter().any(|p| p.matches_path(relative))
    }

    fn is_content_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.iter().any(|ext| ext == e))
            .unwrap_or(false)
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}

/// A restartable listing of the store's pages
#[derive(Debug, Clone, Copy)]
pub struct PageListing<'a> {
    store: &'a ContentStore,
    include_drafts: bool,
}

impl<'a> PageListing<'a> {
    /// Start a fresh walk of the content directory
    pub fn iter(&self) -> Pages<'a> {
        let walker = if self.store.root.is_dir() {
            Some(
                WalkDir::new(&self.store.root)
                    .follow_links(true)
                    .sort_by_file_name()
                    .into_iter(),
            )
        } else {
            tracing::debug!("Content directory {:?} does not exist", self.store.root);
            None
        };

        Pages {
            store: self.store,
            include_drafts: self.include_drafts,
            walker,
        }
    }

    /// Load every page, newest first, stopping at the first bad file
    pub fn collect_sorted(&self) -> Result<Vec<Page>> {
        let mut pages = self.iter().collect::<Result<Vec<_>>>()?;
        sort_by_date_desc(&mut pages);
        Ok(pages)
    }
}

impl<'a> IntoIterator for &PageListing<'a> {
    type Item = Result<Page>;
    type IntoIter = Pages<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for PageListing<'a> {
    type Item = Result<Page>;
    type IntoIter = Pages<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over pages, yielding an error for each file that fails to load
pub struct Pages<'a> {
    store: &'a ContentStore,
    include_drafts: bool,
    walker: Option<walkdir::IntoIter>,
}

impl Iterator for Pages<'_> {
    type Item = Result<Page>;

    fn next(&mut self) -> Option<Self::Item> {
        let walker = self.walker.as_mut()?;

        loop {
            let entry = match walker.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(e.into())),
            };
            if entry.depth() == 0 {
                continue;
            }

            let path = entry.path();
            let relative = path.strip_prefix(&self.store.root).unwrap_or(path);

            if entry.file_type().is_dir() {
                if is_hidden(relative) || self.store.is_ignored(relative) {
                    walker.skip_current_dir();
                }
                continue;
            }

            if is_hidden(relative)
                || !self.store.is_content_file(relative)
                || self.store.is_ignored(relative)
            {
                continue;
            }

            match self.store.load(path) {
                Ok(page) if page.draft && !self.include_drafts => {
                    tracing::debug!("Skipping draft {:?}", page.source);
                }
                result => return Some(result),
            }
        }
    }
}
