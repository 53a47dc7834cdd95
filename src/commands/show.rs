//! Show a single page

use anyhow::Result;
use std::fmt::Write;

use super::{display_date, display_path, PageView};
use crate::config::StoreConfig;
use crate::content::Page;
use crate::Folio;

/// Print one page's metadata (and body, in JSON mode)
pub fn run(folio: &Folio, path: &str, json: bool) -> Result<()> {
    let store = folio.store()?;
    let page = store.get_page(path)?;
    print!("{}", render(&page, &folio.config, json)?);
    Ok(())
}

fn render(page: &Page, config: &StoreConfig, json: bool) -> Result<String> {
    let view = PageView::new(page, config);
    if json {
        return Ok(serde_json::to_string_pretty(&view)? + "\n");
    }

    let mut out = String::new();
    writeln!(out, "{}", page.title)?;
    writeln!(out, "  source:     {}", display_path(&page.source))?;
    writeln!(out, "  permalink:  {}", view.permalink)?;
    writeln!(
        out,
        "  date:       {}",
        display_date(page.date.as_ref(), &config.date_format)
    )?;
    if let Some(updated) = page.last_updated() {
        writeln!(out, "  updated:    {}", updated.format(&config.date_format))?;
    }
    if page.draft {
        writeln!(out, "  draft:      yes")?;
    }
    if !page.tags.is_empty() {
        writeln!(out, "  tags:       {}", page.tags.join(", "))?;
    }
    if !page.categories.is_empty() {
        writeln!(out, "  categories: {}", page.categories.join(", "))?;
    }
    if let Some(layout) = page.layout.as_deref() {
        writeln!(out, "  layout:     {}", layout)?;
    }
    writeln!(
        out,
        "  length:     {} words, {} min read",
        view.word_count, view.reading_time
    )?;
    if !view.excerpt.is_empty() {
        writeln!(out, "\n  {}", view.excerpt)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_text() {
        let page = Page::from_source(
            "projects/raft/index.md",
            concat!(
                "---\ntitle: Raft\ndate: 2022-11-20\ntags: [consensus]\nlayout: project\n---\n",
                "A log replication walkthrough.",
            ),
        )
        .unwrap();
        let out = render(&page, &StoreConfig::default(), false).unwrap();
        assert!(out.starts_with("Raft\n"));
        assert!(out.contains("  permalink:  /projects/raft/\n"));
        assert!(out.contains("  date:       2022-11-20\n"));
        assert!(out.contains("  tags:       consensus\n"));
        assert!(out.contains("  length:     4 words, 1 min read\n"));
        assert!(out.ends_with("\n  A log replication walkthrough.\n"));
    }

    #[test]
    fn test_render_json_includes_body() {
        let page = Page::from_source("about.md", "---\ntitle: About\n---\nHi there.").unwrap();
        let out = render(&page, &StoreConfig::default(), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["body"], "Hi there.");
        assert_eq!(value["section"], "");
        assert_eq!(value["reading_time"], 1);
    }
}
