use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::content::{non_empty, required, required_date, ContentKind, Document, ListItem};
use crate::content_store::ContentStore;
use crate::error::Result;
use crate::text_utils::first_paragraph;

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub published_at: Option<String>,
    pub status: Option<String>,
    pub tools: Option<Vec<String>>,
    pub cover_image: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMeta {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub published_at: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub tools: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub tags: Vec<String>,
}

pub struct ProjectKind;

impl ContentKind for ProjectKind {
    const NAME: &'static str = "project";
    type FrontMatter = ProjectFrontMatter;
    type Meta = ProjectMeta;

    fn validate(path: &Path, front_matter: ProjectFrontMatter) -> Result<ProjectMeta> {
        Ok(ProjectMeta {
            title: required(path, "title", front_matter.title)?,
            description: non_empty(front_matter.description),
            published_at: required_date(path, front_matter.published_at)?,
            status: non_empty(front_matter.status),
            tools: front_matter.tools.unwrap_or_default(),
            cover_image: non_empty(front_matter.cover_image),
            tags: front_matter.tags.unwrap_or_default(),
        })
    }

    fn published_at(meta: &ProjectMeta) -> NaiveDateTime {
        meta.published_at
    }

    fn description(meta: &ProjectMeta) -> Option<&str> {
        meta.description.as_deref()
    }

    fn derive_excerpt(body: &str, _excerpt_length: usize) -> String {
        first_paragraph(body)
    }
}

pub type ProjectStore = ContentStore<ProjectKind>;
pub type ProjectListItem = ListItem<ProjectMeta>;
pub type Project = Document<ProjectMeta>;

pub fn project_store(config: &Config) -> ProjectStore {
    ProjectStore::new(
        config.projects_dir(),
        &config.defaults.project_extensions,
        config.defaults.excerpt_length,
    )
}
