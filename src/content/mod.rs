use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ContentError, Result};

pub mod content_file;
pub mod markdown_renderer;
pub mod parsing_utils;

/// A family of front-matter documents living in one directory (posts, projects).
pub trait ContentKind {
    /// Used in error messages, e.g. "no post found for slug".
    const NAME: &'static str;

    /// Loosely typed shape read from YAML.
    type FrontMatter: DeserializeOwned;

    /// Validated metadata exposed to callers.
    type Meta: Clone + Serialize + Send;

    fn validate(path: &Path, front_matter: Self::FrontMatter) -> Result<Self::Meta>;

    fn published_at(meta: &Self::Meta) -> NaiveDateTime;

    fn description(meta: &Self::Meta) -> Option<&str>;

    /// Excerpt used when the front matter carries no description.
    fn derive_excerpt(body: &str, excerpt_length: usize) -> String;

    fn is_draft(_meta: &Self::Meta) -> bool {
        false
    }
}

/// Summary of a document, as shown in listings.
#[derive(Debug, Clone, Serialize)]
pub struct ListItem<M> {
    pub slug: String,
    pub excerpt: String,
    #[serde(flatten)]
    pub meta: M,
}

/// A full document: summary fields plus the raw markdown body.
#[derive(Debug, Clone, Serialize)]
pub struct Document<M> {
    pub slug: String,
    pub excerpt: String,
    #[serde(flatten)]
    pub meta: M,
    pub body: String,
    #[serde(skip)]
    pub file_path: PathBuf,
}

impl<M> Document<M> {
    pub fn into_list_item(self) -> ListItem<M> {
        ListItem {
            slug: self.slug,
            excerpt: self.excerpt,
            meta: self.meta,
        }
    }

    pub fn render_html(&self) -> Result<String> {
        markdown_renderer::render_markdown(&self.body).map_err(|reason| ContentError::Render {
            path: self.file_path.clone(),
            reason,
        })
    }
}

/// Non-empty trimmed string of an optional front matter value.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Required string field: present and not blank.
pub(crate) fn required(path: &Path, field: &'static str, value: Option<String>) -> Result<String> {
    non_empty(value).ok_or_else(|| ContentError::MissingField {
        path: path.to_path_buf(),
        field,
    })
}

/// Required `publishedAt` field, parsed into a date time.
pub(crate) fn required_date(path: &Path, value: Option<String>) -> Result<NaiveDateTime> {
    let value = required(path, "publishedAt", value)?;
    crate::text_utils::parse_published_at(&value).map_err(|_| ContentError::InvalidDate {
        path: path.to_path_buf(),
        value,
    })
}
