//! Tag and category indexes

use anyhow::bail;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

use super::Page;

/// Which label list a taxonomy index is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxonomyKind {
    Tags,
    Categories,
}

impl TaxonomyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxonomyKind::Tags => "tags",
            TaxonomyKind::Categories => "categories",
        }
    }

    fn labels<'p>(&self, page: &'p Page) -> &'p [String] {
        match self {
            TaxonomyKind::Tags => &page.tags,
            TaxonomyKind::Categories => &page.categories,
        }
    }
}

impl FromStr for TaxonomyKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "tag" | "tags" => Ok(TaxonomyKind::Tags),
            "category" | "categories" => Ok(TaxonomyKind::Categories),
            _ => bail!("Unknown taxonomy: {}. Available: tags, categories", s),
        }
    }
}

/// One label and the pages carrying it
#[derive(Debug, Clone, Serialize)]
pub struct Term {
    pub name: String,
    pub slug: String,
    /// Sources of the pages with this label, in input order
    pub pages: Vec<PathBuf>,
}

impl Term {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            slug: slug::slugify(name),
            pages: Vec::new(),
        }
    }

    pub fn count(&self) -> usize {
        self.pages.len()
    }
}

/// Pages grouped by exact label string
#[derive(Debug, Clone, Serialize)]
pub struct TaxonomyIndex {
    pub kind: TaxonomyKind,
    terms: BTreeMap<String, Term>,
}

impl TaxonomyIndex {
    /// Group pages by their tags or categories
    pub fn build<'a, I>(kind: TaxonomyKind, pages: I) -> Self
    where
        I: IntoIterator<Item = &'a Page>,
    {
        let mut terms: BTreeMap<String, Term> = BTreeMap::new();

        for page in pages {
            for label in kind.labels(page) {
                let term = terms
                    .entry(label.clone())
                    .or_insert_with(|| Term::new(label));
                // A label repeated on one page still counts that page once
                if term.pages.last() != Some(&page.source) {
                    term.pages.push(page.source.clone());
                }
            }
        }

        Self { kind, terms }
    }

    pub fn get(&self, name: &str) -> Option<&Term> {
        self.terms.get(name)
    }

    /// Terms ordered by label
    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.terms.values()
    }

    /// Terms ordered by page count (most used first), then label
    pub fn by_count(&self) -> Vec<&Term> {
        let mut terms: Vec<&Term> = self.terms.values().collect();
        terms.sort_by(|a, b| b.count().cmp(&a.count()).then_with(|| a.name.cmp(&b.name)));
        terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(source: &str, header: &str) -> Page {
        Page::from_source(source, &format!("---\n{header}\n---\n")).unwrap()
    }

    #[test]
    fn test_groups_pages_by_tag() {
        let pages = vec![
            page("posts/context.md", "title: Context\ntags: [Go, concurrency]"),
            page("posts/channels.md", "title: Channels\ntags: [Go]"),
            page("posts/raft.md", "title: Raft\ntags: [consensus]"),
        ];

        let index = TaxonomyIndex::build(TaxonomyKind::Tags, &pages);
        assert_eq!(index.len(), 3);

        let go = index.get("Go").unwrap();
        assert_eq!(go.slug, "go");
        assert_eq!(
            go.pages,
            vec![
                PathBuf::from("posts/context.md"),
                PathBuf::from("posts/channels.md")
            ]
        );
        assert!(index.get("go").is_none());
    }

    #[test]
    fn test_categories_and_ordering() {
        let pages = vec![
            page("a.md", "title: A\ncategories: [writing]"),
            page("b.md", "title: B\ncategories: [projects]"),
            page("c.md", "title: C\ncategories: [projects, projects]"),
        ];

        let index = TaxonomyIndex::build(TaxonomyKind::Categories, &pages);
        let names: Vec<_> = index.terms().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["projects", "writing"]);

        let by_count: Vec<_> = index
            .by_count()
            .iter()
            .map(|t| (t.name.as_str(), t.count()))
            .collect();
        assert_eq!(by_count, vec![("projects", 2), ("writing", 1)]);
    }

    #[test]
    fn test_empty_index() {
        let index = TaxonomyIndex::build(TaxonomyKind::Tags, &Vec::<Page>::new());
        assert!(index.is_empty());
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("tag".parse::<TaxonomyKind>().unwrap(), TaxonomyKind::Tags);
        assert_eq!(
            "categories".parse::<TaxonomyKind>().unwrap(),
            TaxonomyKind::Categories
        );
        assert!("route".parse::<TaxonomyKind>().is_err());
    }
}
