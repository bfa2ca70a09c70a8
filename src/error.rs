use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("no {kind} found for slug '{slug}'")]
    NotFound { kind: &'static str, slug: String },

    #[error("error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid front matter in {}: {reason}", path.display())]
    FrontMatter { path: PathBuf, reason: String },

    #[error("missing required field '{field}' in {}", path.display())]
    MissingField { path: PathBuf, field: &'static str },

    #[error("invalid date '{value}' in {}", path.display())]
    InvalidDate { path: PathBuf, value: String },

    #[error("error rendering {}: {reason}", path.display())]
    Render { path: PathBuf, reason: String },

    #[error("slug '{slug}' is used by both {} and {}", first.display(), second.display())]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}

impl ContentError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ContentError::Io { path: path.into(), source }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, ContentError>;
