//! Content module - front-matter, pages, and the content store

mod date;
mod error;
mod frontmatter;
pub mod loader;
pub mod markdown;
mod page;
pub mod taxonomy;

pub use date::parse_calendar_date;
pub use error::{ContentError, Malformed, Result};
pub use frontmatter::FrontMatter;
pub use loader::{ContentStore, PageListing, Pages};
pub use page::{compare_by_date_desc, sort_by_date_desc, Page};
pub use taxonomy::{TaxonomyIndex, TaxonomyKind, Term};
