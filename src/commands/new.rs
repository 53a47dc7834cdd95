//! Create a new content file

use anyhow::{Context, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::content::FrontMatter;
use crate::Folio;

/// Create a page under `section` (or the configured default section)
/// Returns the path of the new file
pub fn create_page(
    folio: &Folio,
    title: &str,
    section: Option<&str>,
    draft: bool,
) -> Result<PathBuf> {
    let section = section.unwrap_or(&folio.config.default_section);
    let inside_root = Path::new(section)
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if !inside_root {
        anyhow::bail!("Section must be a path inside the content directory: {}", section);
    }

    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title: {:?}", title);
    }

    let target_dir = folio.content_dir.join(section);
    let file_path = target_dir.join(format!("{}.md", slug));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let today = chrono::Local::now().date_naive();
    let front_matter = FrontMatter {
        title: Some(title.to_string()),
        date: Some(today.format("%Y-%m-%d").to_string()),
        draft,
        ..Default::default()
    };
    let content = front_matter.render("")?;

    fs::create_dir_all(&target_dir)
        .with_context(|| format!("Failed to create {:?}", target_dir))?;
    fs::write(&file_path, content).with_context(|| format!("Failed to write {:?}", file_path))?;
    tracing::info!("Created {:?}", file_path);

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_load() {
        let tmp = tempfile::TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();

        let path = create_page(&folio, "Why Raft Is Easier Than Paxos", None, true).unwrap();
        assert_eq!(
            path,
            tmp.path().join("content/posts/why-raft-is-easier-than-paxos.md")
        );

        let store = folio.store().unwrap();
        let page = store.get_page("posts/why-raft-is-easier-than-paxos.md").unwrap();
        assert_eq!(page.title, "Why Raft Is Easier Than Paxos");
        assert!(page.draft);
        assert!(page.date.is_some());
        assert_eq!(page.body, "");

        // Drafts stay out of the published listing
        assert_eq!(store.list_pages().iter().count(), 0);
    }

    #[test]
    fn test_refuses_overwrite() {
        let tmp = tempfile::TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();
        create_page(&folio, "Hello", Some("projects"), false).unwrap();
        let err = create_page(&folio, "Hello", Some("projects"), false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_rejects_bad_section_and_title() {
        let tmp = tempfile::TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();
        assert!(create_page(&folio, "x", Some("../outside"), false).is_err());
        assert!(create_page(&folio, "!!!", None, false).is_err());
    }
}
