use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;

use crate::content::parsing_utils::split_front_matter;
use crate::error::{ContentError, Result};

/// A content file read from disk, not yet interpreted.
pub struct ContentFile {
    pub slug: String,
    pub file_path: PathBuf,
    pub raw_content: String,
}

impl ContentFile {
    pub fn from_file(slug: String, file_path: PathBuf) -> Result<ContentFile> {
        let raw_content = fs::read_to_string(&file_path)
            .map_err(|e| ContentError::io(&file_path, e))?;

        Ok(ContentFile {
            slug,
            file_path,
            raw_content,
        })
    }

    /// Splits the file into its deserialized front matter and the markdown body.
    /// A file without a front matter block yields an empty mapping.
    pub fn parse<F: DeserializeOwned>(&self) -> Result<(F, &str)> {
        let (yaml, body) = split_front_matter(&self.raw_content)
            .map_err(|reason| self.front_matter_error(reason))?;

        let front_matter = Self::deserialize(yaml.unwrap_or(""))
            .map_err(|reason| self.front_matter_error(reason))?;

        Ok((front_matter, body))
    }

    fn deserialize<F: DeserializeOwned>(yaml: &str) -> std::result::Result<F, String> {
        // An empty block is a null document; read it as an empty mapping instead
        let yaml = if yaml.trim().is_empty() { "{}" } else { yaml };
        serde_yaml::from_str::<F>(yaml).map_err(|e| e.to_string())
    }

    fn front_matter_error(&self, reason: String) -> ContentError {
        ContentError::FrontMatter {
            path: self.file_path.clone(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize, Debug, Default)]
    struct Header {
        title: Option<String>,
        tags: Option<Vec<String>>,
    }

    fn content(raw: &str) -> ContentFile {
        ContentFile {
            slug: "sample".to_string(),
            file_path: PathBuf::from("content/posts/sample.mdx"),
            raw_content: raw.to_string(),
        }
    }

    #[test]
    fn test_parse_front_matter() {
        let file = content("---\ntitle: Hello\ntags:\n  - rust\n  - web\n---\nBody text\n");
        let (header, body): (Header, &str) = file.parse().unwrap();
        assert_eq!(header.title.as_deref(), Some("Hello"));
        assert_eq!(header.tags.unwrap(), ["rust", "web"]);
        assert_eq!(body, "Body text\n");
    }

    #[test]
    fn test_parse_without_front_matter() {
        let file = content("Just a body");
        let (header, body): (Header, &str) = file.parse().unwrap();
        assert!(header.title.is_none());
        assert_eq!(body, "Just a body");
    }

    #[test]
    fn test_parse_empty_front_matter() {
        let file = content("---\n---\nBody");
        let (header, body): (Header, &str) = file.parse().unwrap();
        assert!(header.title.is_none());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let file = content("---\ntitle: [unclosed\n---\nBody");
        let res: Result<(Header, &str)> = file.parse();
        assert!(matches!(res, Err(ContentError::FrontMatter { .. })));
    }

    #[test]
    fn test_missing_file() {
        let res = ContentFile::from_file("nope".to_string(), PathBuf::from("res/test/does-not-exist.mdx"));
        assert!(matches!(res, Err(ContentError::Io { .. })));
    }
}
