use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::content::parsing_utils::slug_from_path;
use crate::error::{ContentError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct ContentLink {
    pub slug: String,
    pub path: PathBuf,
}

/// Enumerates the content files of one directory.
pub struct ContentList {
    pub root_dir: PathBuf,
    pub extensions: Vec<String>,
}

impl ContentList {
    /// Every file with a recognized extension, symlinks included, ordered by file name.
    /// Two files mapping to the same slug are rejected.
    pub fn retrieve_files(&self) -> Result<Vec<ContentLink>> {
        let mut links = vec![];
        let entries = fs::read_dir(&self.root_dir)
            .map_err(|e| ContentError::io(&self.root_dir, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| ContentError::io(&self.root_dir, e))?;
            let path = entry.path();
            let Some(slug) = slug_from_path(&path, &self.extensions) else {
                continue;
            };

            // Follows symlinks, as `find_slug` does
            let metadata = fs::metadata(&path).map_err(|e| ContentError::io(&path, e))?;
            if metadata.is_file() {
                links.push(ContentLink { slug, path });
            }
        }

        links.sort_by(|a, b| a.path.cmp(&b.path));
        Self::check_duplicates(&links)?;

        Ok(links)
    }

    /// Looks up the file holding `slug`, trying each extension.
    pub fn find_slug(&self, slug: &str) -> Result<Option<ContentLink>> {
        let mut found: Option<ContentLink> = None;

        for ext in self.extensions.iter() {
            let path = self.root_dir.join(format!("{}.{}", slug, ext));
            if !path.is_file() {
                continue;
            }
            if let Some(first) = found {
                return Err(ContentError::DuplicateSlug {
                    slug: slug.to_string(),
                    first: first.path,
                    second: path,
                });
            }
            found = Some(ContentLink { slug: slug.to_string(), path });
        }

        Ok(found)
    }

    fn check_duplicates(links: &[ContentLink]) -> Result<()> {
        let mut seen: HashMap<&str, &PathBuf> = HashMap::new();
        for link in links {
            if let Some(first) = seen.insert(&link.slug, &link.path) {
                return Err(ContentError::DuplicateSlug {
                    slug: link.slug.clone(),
                    first: first.clone(),
                    second: link.path.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(dir: &str, extensions: &[&str]) -> ContentList {
        ContentList {
            root_dir: PathBuf::from(dir),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        }
    }

    #[test]
    fn test_retrieve_files() {
        let links = list("res/test/content/projects", &["mdx", "md"]).retrieve_files().unwrap();
        let slugs: Vec<&str> = links.iter().map(|l| l.slug.as_str()).collect();
        assert_eq!(slugs, ["race-engine", "track-editor", "vector-shift"]);
    }

    #[test]
    fn test_ignores_other_extensions() {
        // The posts fixture holds a notes.txt that must not show up
        let links = list("res/test/content/posts", &["mdx"]).retrieve_files().unwrap();
        assert!(links.iter().all(|l| l.path.extension().unwrap() == "mdx"));
        assert!(!links.iter().any(|l| l.slug == "notes"));
    }

    #[test]
    fn test_duplicate_slugs() {
        let res = list("res/test/duplicates", &["mdx", "md"]).retrieve_files();
        match res {
            Err(ContentError::DuplicateSlug { slug, .. }) => assert_eq!(slug, "same-name"),
            _ => panic!("expected a duplicate slug error"),
        }
    }

    #[test]
    fn test_missing_dir() {
        let res = list("res/test/no-such-dir", &["mdx"]).retrieve_files();
        assert!(matches!(res, Err(ContentError::Io { .. })));
    }

    #[test]
    fn test_find_slug() {
        let projects = list("res/test/content/projects", &["mdx", "md"]);
        let link = projects.find_slug("track-editor").unwrap().unwrap();
        assert_eq!(link.path, PathBuf::from("res/test/content/projects/track-editor.md"));
        assert!(projects.find_slug("missing").unwrap().is_none());

        let duplicates = list("res/test/duplicates", &["mdx", "md"]);
        assert!(matches!(duplicates.find_slug("same-name"), Err(ContentError::DuplicateSlug { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_listed() {
        use std::os::unix::fs::symlink;

        let dir = std::env::temp_dir().join(format!("folio-symlinks-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("real.txt"), "---\ntitle: Linked\npublishedAt: 2024-01-01\n---\nBody\n").unwrap();
        symlink(dir.join("real.txt"), dir.join("linked.mdx")).unwrap();

        let posts = ContentList {
            root_dir: dir.clone(),
            extensions: vec!["mdx".to_string()],
        };
        let links = posts.retrieve_files().unwrap();
        let slugs: Vec<&str> = links.iter().map(|l| l.slug.as_str()).collect();
        assert_eq!(slugs, ["linked"]);
        assert_eq!(posts.find_slug("linked").unwrap(), links.into_iter().next());

        // A dangling content file is an error, not a silent skip
        symlink(dir.join("gone.txt"), dir.join("dangling.mdx")).unwrap();
        assert!(matches!(posts.retrieve_files(), Err(ContentError::Io { .. })));

        let _ = fs::remove_dir_all(&dir);
    }
}
