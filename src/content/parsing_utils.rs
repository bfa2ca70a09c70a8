use std::path::{Component, Path};

const FRONT_MATTER_DELIMITER: &str = "---";

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == FRONT_MATTER_DELIMITER
}

/// Splits a document into its YAML front matter and the body that follows it.
///
/// The front matter must start on the first line with `---` and end with the next `---` line.
/// Documents that do not start with a delimiter have no front matter: the whole text is the body.
pub fn split_front_matter(raw: &str) -> Result<(Option<&str>, &str), String> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let first_line = match raw.split_inclusive('\n').next() {
        Some(line) if is_delimiter(line) => line,
        _ => return Ok((None, raw)),
    };

    let rest = &raw[first_line.len()..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if is_delimiter(line) {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok((Some(yaml), body));
        }
        offset += line.len();
    }

    Err("closing '---' of the front matter is missing".to_string())
}

/// Slug of a content file: the file name without its extension,
/// provided the extension is one of `extensions`.
pub fn slug_from_path(path: &Path, extensions: &[String]) -> Option<String> {
    let extension = path.extension()?.to_str()?;
    if !extensions.iter().any(|ext| ext == extension) {
        return None;
    }

    let stem = path.file_stem()?.to_str()?;
    if stem.is_empty() {
        return None;
    }
    Some(stem.to_string())
}

/// Slugs are file names, so anything that could walk out of the content directory is rejected.
/// Dots inside a name (`v1..2`) are fine.
pub fn is_valid_slug(slug: &str) -> bool {
    if slug.contains('/') || slug.contains('\\') {
        return false;
    }

    let mut components = Path::new(slug).components();
    matches!((components.next(), components.next()), (Some(Component::Normal(_)), None))
}
