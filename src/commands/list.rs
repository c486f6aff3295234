//! List site content

use anyhow::Result;

use crate::content::{CategorySummary, Post};
use crate::Inkpress;

/// List site content by type
pub async fn run(site: &Inkpress, content_type: &str) -> Result<()> {
    let repo = site.repository();

    match content_type {
        "post" | "posts" => {
            let posts = repo.list_all_posts().await;
            print!("{}", format_posts("Posts", &posts));
        }
        "category" | "categories" => {
            let categories = repo.categories().await;
            print!("{}", format_categories(&categories));
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, category",
                content_type
            );
        }
    }

    Ok(())
}

/// List the posts of one category
pub async fn category(site: &Inkpress, name: &str) -> Result<()> {
    let posts = site.repository().get_posts_by_category(name).await;
    if posts.is_empty() {
        println!("No articles found in category '{}'", name);
    } else {
        print!("{}", format_posts(&format!("Category '{}'", name), &posts));
    }
    Ok(())
}

/// List posts matching a search query
pub async fn search(site: &Inkpress, query: &str) -> Result<()> {
    let posts = site.repository().search_posts(query).await;
    if posts.is_empty() {
        println!("No articles found for '{}'", query);
    } else {
        print!("{}", format_posts(&format!("Results for '{}'", query), &posts));
    }
    Ok(())
}

/// Render a post listing, one line per post
pub fn format_posts(heading: &str, posts: &[Post]) -> String {
    let mut out = format!("{} ({}):\n", heading, posts.len());
    for post in posts {
        let date = post
            .published_at()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "----------".to_string());
        out.push_str(&format!(
            "  {} - {} [{}] ({})\n",
            date, post.title, post.slug, post.category
        ));
    }
    out
}

/// Render category counts
pub fn format_categories(categories: &[CategorySummary]) -> String {
    let mut out = format!("Categories ({}):\n", categories.len());
    for cat in categories {
        out.push_str(&format!("  {} ({}) -> {}\n", cat.name, cat.count, cat.slug));
    }
    out
}
