//! Page model

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;
use std::cmp::Ordering;
use std::path::{Component, Path, PathBuf};

use super::date::format_calendar_date;
use super::error::{ContentError, Result};
use super::markdown;
use super::FrontMatter;

/// Reading speed used for `reading_time`
const WORDS_PER_MINUTE: usize = 200;

/// A single content file: a blog post, a project write-up, or a standalone page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// Page title (never blank)
    pub title: String,

    /// Publication date
    pub date: Option<NaiveDate>,

    /// Last updated date
    pub updated: Option<NaiveDate>,

    /// Last updated date, declared with Hugo's `lastmod` key
    pub lastmod: Option<NaiveDate>,

    /// Drafts are left out of published listings
    pub draft: bool,

    pub tags: Vec<String>,

    pub categories: Vec<String>,

    /// Author-written summary
    pub summary: Option<String>,

    /// Routing override
    pub url: Option<String>,

    /// Layout template the generator should use
    pub layout: Option<String>,

    /// Declared slug, when it differs from the file name
    pub slug: Option<String>,

    /// Ordering hint for project listings
    pub weight: Option<i64>,

    /// Raw markup body
    pub body: String,

    /// Source file path relative to the content directory
    pub source: PathBuf,

    /// Custom front-matter fields
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl Page {
    /// Build a page from a content file's text
    ///
    /// `source` is the path relative to the content directory; it names the
    /// file in errors and determines the section and slug.
    pub fn from_source<P: AsRef<Path>>(source: P, content: &str) -> Result<Self> {
        let source = source.as_ref();
        let malformed = |reason| ContentError::malformed(source, reason);

        let (fm, body) = FrontMatter::parse(content).map_err(malformed)?;
        let title = fm.required_title().map_err(malformed)?.to_string();
        let date = fm.parse_date().map_err(malformed)?;
        let updated = fm.parse_updated().map_err(malformed)?;
        let lastmod = fm.parse_lastmod().map_err(malformed)?;

        Ok(Self {
            title,
            date,
            updated,
            lastmod,
            draft: fm.draft,
            tags: fm.tags,
            categories: fm.categories,
            summary: fm.summary,
            url: fm.url,
            layout: fm.layout,
            slug: fm.slug,
            weight: fm.weight,
            body: body.to_string(),
            source: source.to_path_buf(),
            extra: fm.extra,
        })
    }

    /// The header this page would be written with
    pub fn front_matter(&self) -> FrontMatter {
        FrontMatter {
            title: Some(self.title.clone()),
            date: self.date.as_ref().map(format_calendar_date),
            updated: self.updated.as_ref().map(format_calendar_date),
            lastmod: self.lastmod.as_ref().map(format_calendar_date),
            draft: self.draft,
            tags: self.tags.clone(),
            categories: self.categories.clone(),
            summary: self.summary.clone(),
            url: self.url.clone(),
            layout: self.layout.clone(),
            slug: self.slug.clone(),
            weight: self.weight,
            extra: self.extra.clone(),
        }
    }

    /// Serialize back into a complete content file
    pub fn to_source(&self) -> std::result::Result<String, serde_yaml::Error> {
        self.front_matter().render(&self.body)
    }

    /// Top-level directory the page lives in (`posts`, `projects`, ...)
    pub fn section(&self) -> &str {
        self.directories().next().unwrap_or("")
    }

    /// URL slug: the declared one, else the file stem or bundle directory
    pub fn slug(&self) -> &str {
        if let Some(slug) = self.slug.as_deref() {
            return slug;
        }
        if self.is_bundle_index() {
            return self.directories().last().unwrap_or("");
        }
        self.source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
    }

    /// Site-relative URL the generator will serve this page at
    pub fn permalink(&self) -> String {
        if let Some(url) = self.url.as_deref() {
            return url.to_string();
        }

        let mut parts: Vec<&str> = self.directories().collect();
        if self.is_bundle_index() {
            parts.pop();
        }
        let slug = self.slug();
        if !slug.is_empty() {
            parts.push(slug);
        }

        if parts.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", parts.join("/"))
        }
    }

    /// Short plain-text description for listings
    ///
    /// Prefers the declared summary, then the text before a `<!-- more -->`
    /// marker, then the first `words` words of the body.
    pub fn excerpt(&self, words: usize) -> String {
        if let Some(summary) = self.summary.as_deref() {
            return summary.to_string();
        }
        match markdown::split_excerpt(&self.body) {
            Some(before) => markdown::plain_text(before),
            None => markdown::truncate_words(&markdown::plain_text(&self.body), words),
        }
    }

    /// Most recent modification date, whichever key declared it
    pub fn last_updated(&self) -> Option<NaiveDate> {
        self.updated.or(self.lastmod)
    }

    pub fn word_count(&self) -> usize {
        markdown::word_count(&self.body)
    }

    /// Estimated reading time in whole minutes (at least one)
    pub fn reading_time(&self) -> usize {
        self.word_count().div_ceil(WORDS_PER_MINUTE).max(1)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// `index.md` and `_index.md` stand for their enclosing directory
    fn is_bundle_index(&self) -> bool {
        matches!(
            self.source.file_stem().and_then(|s| s.to_str()),
            Some("index") | Some("_index")
        )
    }

    fn directories(&self) -> impl Iterator<Item = &str> {
        self.source
            .parent()
            .into_iter()
            .flat_map(|p| p.components())
            .filter_map(|c| match c {
                Component::Normal(name) => name.to_str(),
                _ => None,
            })
    }
}

/// Presentational order: newest first, undated pages last, then by title
pub fn compare_by_date_desc(a: &Page, b: &Page) -> Ordering {
    match (a.date, b.date) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.title.cmp(&b.title))
}

/// Sort pages newest first
pub fn sort_by_date_desc(pages: &mut [Page]) {
    pages.sort_by(compare_by_date_desc);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Malformed;

    fn page(source: &str, content: &str) -> Page {
        Page::from_source(source, content).unwrap()
    }

    #[test]
    fn test_home_without_date() {
        let p = page("_index.md", "---\ntitle: \"Home\"\n---\nWelcome\n");
        assert_eq!(p.title, "Home");
        assert_eq!(p.date, None);
        assert!(!p.draft);
        assert_eq!(p.body, "Welcome\n");
    }

    #[test]
    fn test_invalid_date_is_malformed() {
        let err = Page::from_source("posts/bad.md", "---\ntitle: Bad\ndate: not-a-date\n---\n")
            .unwrap_err();
        match err {
            ContentError::MalformedContent { path, reason } => {
                assert_eq!(path, PathBuf::from("posts/bad.md"));
                assert!(matches!(reason, Malformed::InvalidDate { field: "date", .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_title_is_malformed() {
        let err = Page::from_source("posts/untitled.md", "---\ndate: 2024-01-01\n---\nbody")
            .unwrap_err();
        assert!(matches!(
            err,
            ContentError::MalformedContent {
                reason: Malformed::MissingTitle,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_updated_is_malformed() {
        let err = Page::from_source("a.md", "---\ntitle: A\nlastmod: soon\n---\n").unwrap_err();
        assert!(matches!(
            err,
            ContentError::MalformedContent {
                reason: Malformed::InvalidDate { field: "lastmod", .. },
                ..
            }
        ));
    }

    #[test]
    fn test_source_round_trip() {
        let content = r#"---
title: Optimizing Elasticsearch Clusters
date: 2022-09-14 18:20:00
tags:
  - Elasticsearch
  - search
categories: [projects]
summary: Shard sizing notes.
weight: 2
repo: https://example.com/es-tuning
---

## Shards

Keep shards between 10 and 50 GB.
"#;
        let original = page("projects/es-tuning.md", content);
        let rendered = original.to_source().unwrap();
        let reparsed = page("projects/es-tuning.md", &rendered);
        assert_eq!(original, reparsed);
        assert_eq!(rendered, reparsed.to_source().unwrap());
        assert_eq!(
            reparsed.extra.get("repo").and_then(|v| v.as_str()),
            Some("https://example.com/es-tuning")
        );
    }

    #[test]
    fn test_numeric_header_values_load() {
        let release = page("posts/go.md", "---\ntitle: Go 1.21 release\ntags: [go, 1.21]\n---\n");
        assert_eq!(release.tags, vec!["go", "1.21"]);

        let novel = page("posts/1984.md", "---\ntitle: 1984\n---\n");
        assert_eq!(novel.title, "1984");
        assert_eq!(page("posts/1984.md", &novel.to_source().unwrap()), novel);
    }

    #[test]
    fn test_lastmod_round_trip() {
        let original = page("a.md", "---\ntitle: A\nlastmod: 2024-03-02\n---\nx\n");
        assert_eq!(original.updated, None);
        assert_eq!(original.last_updated(), NaiveDate::from_ymd_opt(2024, 3, 2));

        let rendered = original.to_source().unwrap();
        assert_eq!(rendered, "---\ntitle: A\nlastmod: 2024-03-02\n---\n\nx\n");
        assert_eq!(page("a.md", &rendered), original);
    }

    #[test]
    fn test_section_slug_and_permalink() {
        let post = page("posts/go-context.md", "---\ntitle: Go context\n---\n");
        assert_eq!(post.section(), "posts");
        assert_eq!(post.slug(), "go-context");
        assert_eq!(post.permalink(), "/posts/go-context/");

        let bundle = page("projects/raft/index.md", "---\ntitle: Raft\n---\n");
        assert_eq!(bundle.section(), "projects");
        assert_eq!(bundle.slug(), "raft");
        assert_eq!(bundle.permalink(), "/projects/raft/");

        let list = page("posts/_index.md", "---\ntitle: Posts\n---\n");
        assert_eq!(list.permalink(), "/posts/");

        let about = page("about.md", "---\ntitle: About\n---\n");
        assert_eq!(about.section(), "");
        assert_eq!(about.permalink(), "/about/");

        let home = page("_index.md", "---\ntitle: Home\n---\n");
        assert_eq!(home.permalink(), "/");
    }

    #[test]
    fn test_declared_url_and_slug_win() {
        let p = page(
            "posts/2021-01-01-paxos.md",
            "---\ntitle: Paxos\nslug: paxos-made-simple\n---\n",
        );
        assert_eq!(p.permalink(), "/posts/paxos-made-simple/");

        let p = page("posts/x.md", "---\ntitle: X\nurl: /elsewhere/\n---\n");
        assert_eq!(p.permalink(), "/elsewhere/");
    }

    #[test]
    fn test_excerpt_sources() {
        let declared = page("a.md", "---\ntitle: A\nsummary: Declared.\n---\nBody words.");
        assert_eq!(declared.excerpt(70), "Declared.");

        let marked = page(
            "b.md",
            "---\ntitle: B\n---\nIntro **text**.\n\n<!-- more -->\n\nRest of it.",
        );
        assert_eq!(marked.excerpt(70), "Intro text.");

        let plain = page("c.md", "---\ntitle: C\n---\none two three four five");
        assert_eq!(plain.excerpt(3), "one two three");
    }

    #[test]
    fn test_reading_time() {
        let short = page("a.md", "---\ntitle: A\n---\nhello");
        assert_eq!(short.word_count(), 1);
        assert_eq!(short.reading_time(), 1);

        let body = "word ".repeat(450);
        let long = page("b.md", &format!("---\ntitle: B\n---\n{body}"));
        assert_eq!(long.reading_time(), 3);
    }

    #[test]
    fn test_sort_by_date_desc() {
        let mut pages = vec![
            page("a.md", "---\ntitle: Old\ndate: 2020-01-01\n---\n"),
            page("b.md", "---\ntitle: Undated\n---\n"),
            page("c.md", "---\ntitle: New\ndate: 2024-05-01\n---\n"),
        ];
        sort_by_date_desc(&mut pages);
        let titles: Vec<_> = pages.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["New", "Old", "Undated"]);
    }
}
