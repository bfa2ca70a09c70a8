use std::marker::PhantomData;
use std::path::PathBuf;

use rayon::prelude::*;
use spdlog::debug;

use crate::content::content_file::ContentFile;
use crate::content::parsing_utils::is_valid_slug;
use crate::content::{ContentKind, Document, ListItem};
use crate::content_list::{ContentLink, ContentList};
use crate::error::{ContentError, Result};

/// Loader for one directory of front-matter documents.
///
/// Nothing is cached: each call reads the directory and its files again.
pub struct ContentStore<K: ContentKind> {
    list: ContentList,
    excerpt_length: usize,
    kind: PhantomData<fn() -> K>,
}

impl<K: ContentKind> ContentStore<K> {
    pub fn new(root_dir: PathBuf, extensions: &[String], excerpt_length: usize) -> Self {
        ContentStore {
            list: ContentList {
                root_dir,
                extensions: extensions.to_vec(),
            },
            excerpt_length,
            kind: PhantomData,
        }
    }

    pub fn root_dir(&self) -> &PathBuf {
        &self.list.root_dir
    }

    /// Published items, newest first.
    pub fn list_all(&self) -> Result<Vec<ListItem<K::Meta>>> {
        let items = self.load_all()?
            .into_iter()
            .filter(|doc| !K::is_draft(&doc.meta))
            .map(Document::into_list_item)
            .collect();
        Ok(items)
    }

    /// All items, drafts included, newest first.
    pub fn list_all_including_drafts(&self) -> Result<Vec<ListItem<K::Meta>>> {
        let items = self.load_all()?
            .into_iter()
            .map(Document::into_list_item)
            .collect();
        Ok(items)
    }

    pub fn list_slugs(&self) -> Result<Vec<String>> {
        let slugs = self.list_all()?
            .into_iter()
            .map(|item| item.slug)
            .collect();
        Ok(slugs)
    }

    /// Reads a single document. Drafts are returned as well.
    pub fn get_by_slug(&self, slug: &str) -> Result<Document<K::Meta>> {
        let not_found = || ContentError::NotFound {
            kind: K::NAME,
            slug: slug.to_string(),
        };

        if !is_valid_slug(slug) {
            return Err(not_found());
        }

        match self.list.find_slug(slug)? {
            Some(link) => self.load(link),
            None => Err(not_found()),
        }
    }

    fn load_all(&self) -> Result<Vec<Document<K::Meta>>> {
        let links = self.list.retrieve_files()?;
        debug!("Loading {} {} files from {}", links.len(), K::NAME, self.list.root_dir.display());

        let mut docs = links
            .into_par_iter()
            .map(|link| self.load(link))
            .collect::<Result<Vec<_>>>()?;

        // Stable: equal dates keep file name order
        docs.sort_by(|a, b| K::published_at(&b.meta).cmp(&K::published_at(&a.meta)));
        Ok(docs)
    }

    fn load(&self, link: ContentLink) -> Result<Document<K::Meta>> {
        let content_file = ContentFile::from_file(link.slug, link.path)?;
        let (front_matter, body) = content_file.parse::<K::FrontMatter>()?;
        let meta = K::validate(&content_file.file_path, front_matter)?;

        let excerpt = match K::description(&meta) {
            Some(description) if !description.trim().is_empty() => description.to_string(),
            _ => K::derive_excerpt(body, self.excerpt_length),
        };
        let body = body.to_string();

        Ok(Document {
            slug: content_file.slug,
            excerpt,
            meta,
            body,
            file_path: content_file.file_path,
        })
    }
}
