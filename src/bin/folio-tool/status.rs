use anyhow::Result;

use folio::config::Config;
use folio::posts::{post_store, PostListItem};
use folio::text_utils::format_date;

/// Publishable posts and drafts, both newest first.
fn partition_posts(config: &Config) -> Result<(Vec<PostListItem>, Vec<PostListItem>)> {
    let posts = post_store(config).list_all_including_drafts()?;
    Ok(posts.into_iter().partition(|post| !post.meta.draft))
}

fn print_section(name: &str, posts: &[PostListItem]) {
    println!("{} ({})", name, posts.len());
    for post in posts {
        println!("  {}  {}  {}", format_date(&post.meta.published_at), post.slug, post.meta.title);
    }
}

pub fn status_cmd(config: &Config) -> Result<()> {
    let (publishable, drafts) = partition_posts(config)?;
    print_section("Publishable", &publishable);
    println!();
    print_section("Drafts", &drafts);
    Ok(())
}
