use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::content::content_file::ContentFile;
use crate::content::markdown_renderer::render_markdown;
use crate::content::non_empty;
use crate::error::{ContentError, Result};

#[derive(Deserialize, Debug, Default)]
struct BioFrontMatter {
    title: Option<String>,
    summary: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct Bio {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub body: String,
    #[serde(skip)]
    pub file_path: PathBuf,
}

impl Bio {
    pub fn render_html(&self) -> Result<String> {
        render_markdown(&self.body).map_err(|reason| ContentError::Render {
            path: self.file_path.clone(),
            reason,
        })
    }
}

/// Reads the bio page. Its front matter is optional.
pub fn read_bio(path: &Path) -> Result<Bio> {
    let slug = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();
    let content_file = ContentFile::from_file(slug, path.to_path_buf())?;
    let (front_matter, body) = content_file.parse::<BioFrontMatter>()?;

    Ok(Bio {
        title: non_empty(front_matter.title),
        summary: non_empty(front_matter.summary),
        body: body.to_string(),
        file_path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_bio() {
        let bio = read_bio(Path::new("res/test/content/bio/bio.mdx")).unwrap();
        assert_eq!(bio.title.as_deref(), Some("About me"));
        assert_eq!(bio.summary.as_deref(), Some("Researcher and occasional game developer."));
        assert_eq!(bio.body, "\nI work on programming languages and write about Rust.\n");
        assert_eq!(bio.render_html().unwrap(), "<p>I work on programming languages and write about Rust.</p>\n");
    }

    #[test]
    fn test_bio_without_front_matter() {
        let bio = read_bio(Path::new("res/test/content/bio/no-front-matter.mdx")).unwrap();
        assert!(bio.title.is_none());
        assert!(bio.summary.is_none());
        assert_eq!(bio.body, "Just a short bio without a header.\n");
    }

    #[test]
    fn test_missing_bio() {
        let res = read_bio(Path::new("res/test/content/bio/missing.mdx"));
        assert!(matches!(res, Err(ContentError::Io { .. })));
    }
}
