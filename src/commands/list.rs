//! List site content

use anyhow::Result;
use std::fmt::Write;

use super::{display_date, display_path, PageView};
use crate::config::StoreConfig;
use crate::content::{Page, TaxonomyIndex, TaxonomyKind};
use crate::Folio;

/// List site content by type
pub fn run(folio: &Folio, content_type: &str, drafts: bool, json: bool) -> Result<()> {
    let mut store = folio.store()?;
    if drafts {
        store = store.with_drafts(true);
    }
    let pages = store.list_pages().collect_sorted()?;
    tracing::debug!("Loaded {} pages from {:?}", pages.len(), store.root());

    let output = match content_type {
        "page" | "pages" | "post" | "posts" => render_pages(&pages, &folio.config, json)?,
        other => {
            let kind: TaxonomyKind = other.parse()?;
            render_taxonomy(&TaxonomyIndex::build(kind, &pages), json)?
        }
    };

    print!("{}", output);
    Ok(())
}

fn render_pages(pages: &[Page], config: &StoreConfig, json: bool) -> Result<String> {
    if json {
        let views: Vec<_> = pages.iter().map(|p| PageView::new(p, config)).collect();
        return Ok(serde_json::to_string_pretty(&views)? + "\n");
    }

    let mut out = String::new();
    writeln!(out, "Pages ({}):", pages.len())?;
    for page in pages {
        writeln!(
            out,
            "  {} - {}{} [{}]",
            display_date(page.date.as_ref(), &config.date_format),
            page.title,
            if page.draft { " (draft)" } else { "" },
            display_path(&page.source)
        )?;
    }
    Ok(out)
}

fn render_taxonomy(index: &TaxonomyIndex, json: bool) -> Result<String> {
    if json {
        let terms: Vec<_> = index.terms().collect();
        return Ok(serde_json::to_string_pretty(&terms)? + "\n");
    }

    let mut out = String::new();
    let heading = match index.kind {
        TaxonomyKind::Tags => "Tags",
        TaxonomyKind::Categories => "Categories",
    };
    writeln!(out, "{} ({}):", heading, index.len())?;
    for term in index.by_count() {
        writeln!(out, "  {} ({})", term.name, term.count())?;
    }
    Ok(out)
}
