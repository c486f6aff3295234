//! Show a single post

use anyhow::Result;

use crate::content::Post;
use crate::Inkpress;

/// Print one post with its body
pub async fn run(site: &Inkpress, slug: &str) -> Result<()> {
    match site.repository().get_post_by_slug(slug).await {
        Some(post) => print!("{}", format_post(&post)),
        None => println!("Post not found: {}", slug),
    }
    Ok(())
}

/// Header block followed by the raw markdown body
pub fn format_post(post: &Post) -> String {
    let mut out = format!(
        "{}\n{} | {} | {} | {}\n",
        post.title, post.date, post.author, post.category, post.read_time
    );
    if !post.excerpt.is_empty() {
        out.push_str(&format!("\n{}\n", post.excerpt));
    }
    out.push('\n');
    out.push_str(&post.content);
    if !post.content.ends_with('\n') {
        out.push('\n');
    }
    out
}
