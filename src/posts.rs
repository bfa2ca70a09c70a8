use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::content::{non_empty, required, required_date, ContentKind, Document, ListItem};
use crate::content_store::ContentStore;
use crate::error::Result;
use crate::text_utils::truncated_excerpt;

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PostFrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub published_at: Option<String>,
    pub tags: Option<Vec<String>>,
    pub cover_image: Option<String>,
    pub draft: Option<bool>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostMeta {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub published_at: NaiveDateTime,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub draft: bool,
}

pub struct PostKind;

impl ContentKind for PostKind {
    const NAME: &'static str = "post";
    type FrontMatter = PostFrontMatter;
    type Meta = PostMeta;

    fn validate(path: &Path, front_matter: PostFrontMatter) -> Result<PostMeta> {
        Ok(PostMeta {
            title: required(path, "title", front_matter.title)?,
            description: non_empty(front_matter.description),
            published_at: required_date(path, front_matter.published_at)?,
            tags: front_matter.tags.unwrap_or_default(),
            cover_image: non_empty(front_matter.cover_image),
            draft: front_matter.draft.unwrap_or(false),
        })
    }

    fn published_at(meta: &PostMeta) -> NaiveDateTime {
        meta.published_at
    }

    fn description(meta: &PostMeta) -> Option<&str> {
        meta.description.as_deref()
    }

    fn derive_excerpt(body: &str, excerpt_length: usize) -> String {
        truncated_excerpt(body, excerpt_length)
    }

    fn is_draft(meta: &PostMeta) -> bool {
        meta.draft
    }
}

pub type PostStore = ContentStore<PostKind>;
pub type PostListItem = ListItem<PostMeta>;
pub type Post = Document<PostMeta>;

pub fn post_store(config: &Config) -> PostStore {
    PostStore::new(
        config.posts_dir(),
        &config.defaults.post_extensions,
        config.defaults.excerpt_length,
    )
}
