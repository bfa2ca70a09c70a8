use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use spdlog::info;

use folio::config::Config;

use crate::PostArgs;

/// Lowercase ASCII slug: punctuation dropped, words joined by single dashes.
fn slug_from_title(title: &str) -> String {
    lazy_static! {
        static ref NON_WORD_REGEX: Regex = Regex::new(r"[^\w\s-]").unwrap();
        static ref SPACES_REGEX: Regex = Regex::new(r"\s+").unwrap();
        static ref DASHES_REGEX: Regex = Regex::new(r"-+").unwrap();
    }

    let ascii = unidecode::unidecode(title).to_lowercase();
    let words = NON_WORD_REGEX.replace_all(ascii.trim(), "");
    let dashed = SPACES_REGEX.replace_all(&words, "-");
    let slug = DASHES_REGEX.replace_all(&dashed, "-");
    slug.trim_matches('-').to_string()
}

fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

fn render_front_matter(args: &PostArgs, date: &NaiveDate) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "---");
    let _ = writeln!(&mut buf, "title: {}", quoted(&args.title));
    let _ = writeln!(&mut buf, "description: {}", quoted(&args.description));
    let _ = writeln!(&mut buf, "publishedAt: \"{}\"", date.format("%Y-%m-%d"));
    let _ = writeln!(&mut buf, "draft: true");
    if args.tags.is_empty() {
        let _ = writeln!(&mut buf, "tags: []");
    } else {
        let _ = writeln!(&mut buf, "tags:");
        for tag in &args.tags {
            let _ = writeln!(&mut buf, "  - {}", quoted(tag.trim()));
        }
    }
    if let Some(ref cover_image) = args.cover_image {
        let _ = writeln!(&mut buf, "coverImage: {}", quoted(cover_image));
    }
    let _ = writeln!(&mut buf, "---");
    let _ = writeln!(&mut buf);
    buf
}

fn render_body(cover_image: Option<&str>) -> String {
    let mut buf = String::new();

    if let Some(cover_image) = cover_image {
        let _ = writeln!(&mut buf, "![Cover image]({})", cover_image);
        let _ = writeln!(&mut buf);
    }
    let _ = writeln!(&mut buf, "## Introduction");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "Add your post content here.");

    buf
}

/// Writes `{date}-{slug}.mdx` into `posts_dir`. Existing files are never overwritten.
fn create_post(posts_dir: &Path, args: &PostArgs, date: &NaiveDate) -> Result<PathBuf> {
    if args.title.trim().is_empty() || args.description.trim().is_empty() {
        bail!("A post needs a non-empty title and description");
    }

    let slug = slug_from_title(&args.title);
    if slug.is_empty() {
        bail!("The title '{}' has no letters or digits to build a slug from", args.title);
    }

    let file_path = posts_dir.join(format!("{}-{}.mdx", date.format("%Y-%m-%d"), slug));
    if file_path.exists() {
        bail!("{} already exists", file_path.display());
    }

    fs::create_dir_all(posts_dir)
        .with_context(|| format!("Unable to create {}", posts_dir.display()))?;

    let content = render_front_matter(args, date) + &render_body(args.cover_image.as_deref());
    fs::write(&file_path, content)
        .with_context(|| format!("Unable to write {}", file_path.display()))?;

    info!("Created draft post {}", file_path.display());
    Ok(file_path)
}

pub fn post_cmd(config: &Config, args: PostArgs) -> Result<()> {
    let date = Utc::now().date_naive();
    let posts_dir = args.out_dir.clone().unwrap_or_else(|| config.posts_dir());
    let file_path = create_post(&posts_dir, &args, &date)?;
    println!("Created {}", file_path.display());
    Ok(())
}
