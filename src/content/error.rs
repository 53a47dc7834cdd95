//! Content loading errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading pages from the content store
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Malformed content in {path:?}: {reason}")]
    MalformedContent { path: PathBuf, reason: Malformed },

    #[error("Page not found: {path:?}")]
    NotFound { path: PathBuf },

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk content directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Duplicate permalink {permalink}: {first:?} and {second:?}")]
    DuplicatePermalink {
        permalink: String,
        first: PathBuf,
        second: PathBuf,
    },
}

impl ContentError {
    /// Attach a file path to a front-matter failure
    pub fn malformed(path: impl Into<PathBuf>, reason: Malformed) -> Self {
        ContentError::MalformedContent {
            path: path.into(),
            reason,
        }
    }

    /// The file this error concerns, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            ContentError::MalformedContent { path, .. }
            | ContentError::NotFound { path }
            | ContentError::Io { path, .. } => Some(path),
            ContentError::DuplicatePermalink { second, .. } => Some(second),
            ContentError::Walk(_) => None,
        }
    }
}

/// Why a content file was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Malformed {
    #[error("missing front-matter header")]
    MissingHeader,

    #[error("front-matter header opened with `{0}` is never closed")]
    UnclosedHeader(&'static str),

    #[error("invalid front-matter: {0}")]
    InvalidHeader(String),

    #[error("required field `title` is missing or empty")]
    MissingTitle,

    #[error("invalid date in `{field}`: {value:?}")]
    InvalidDate { field: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, ContentError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_malformed_reason_reported_once() {
        let err = ContentError::malformed("posts/bad.md", Malformed::MissingTitle);
        assert_eq!(
            err.to_string(),
            "Malformed content in \"posts/bad.md\": required field `title` is missing or empty"
        );
        // The reason is part of the message, so it is not repeated as a cause
        assert!(err.source().is_none());

        let chain = format!("{:#}", anyhow::Error::from(err));
        assert_eq!(chain.matches("is missing or empty").count(), 1);
    }
}
