//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::{category_slug, FrontMatter, DEFAULT_READ_TIME};
use crate::Inkpress;

/// Scaffold a post under the content directory and return its path.
///
/// Posts with a category go to `<content_dir>/<category-slug>/`, so the
/// category becomes part of the post's slug.
pub fn create_post(
    site: &Inkpress,
    title: &str,
    category: Option<&str>,
    author: Option<&str>,
) -> Result<PathBuf> {
    let now = chrono::Local::now();

    let name = slug::slugify(title);
    if name.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    let target_dir = match category.map(category_slug).filter(|c| !c.is_empty()) {
        Some(dir) => site.content_dir.join(dir),
        None => site.content_dir.clone(),
    };
    fs::create_dir_all(&target_dir)?;

    let file_path = target_dir.join(format!("{}.md", name));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let mut fm = FrontMatter::new();
    fm.insert("title", title);
    fm.insert("date", now.format("%Y-%m-%d").to_string());
    fm.insert("excerpt", "");
    fm.insert("cover", "");
    if let Some(category) = category {
        fm.insert("category", category);
    }
    fm.insert("readTime", DEFAULT_READ_TIME);
    fm.insert("author", author.unwrap_or(&site.config.author));

    fs::write(&file_path, fm.to_document(&format!("# {}\n", title)))?;
    tracing::info!("Created post {:?}", file_path);

    Ok(file_path)
}
