//! Post model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::category::{category_slug, DEFAULT_CATEGORY};
use super::date::parse_date;
use super::{ContentError, FrontMatter};

/// Fallback read-time label
pub const DEFAULT_READ_TIME: &str = "5 min read";

/// Fallback author name
pub const DEFAULT_AUTHOR: &str = "Anonymous";

/// A blog post built from one markdown document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// List key for the UI; assigned per load and not stable across loads
    pub id: usize,

    /// Path-derived lookup key
    pub slug: String,

    pub title: String,

    /// Publication date as written in the front matter
    pub date: String,

    pub excerpt: String,

    /// Cover image URL
    pub cover: String,

    pub category: String,

    pub read_time: String,

    pub author: String,

    /// Raw markdown body
    pub content: String,
}

impl Post {
    /// Build a post from parsed front matter, applying defaults for every
    /// optional field. A missing or blank `title` is rejected.
    pub fn from_front_matter(
        id: usize,
        slug: String,
        fm: &FrontMatter,
        body: &str,
    ) -> Result<Self, ContentError> {
        let title = fm
            .get_non_empty("title")
            .ok_or_else(|| ContentError::MissingRequiredField {
                slug: slug.clone(),
                field: "title",
            })?;

        Ok(Self {
            id,
            title: title.to_string(),
            date: field_or(fm, "date", ""),
            excerpt: field_or(fm, "excerpt", ""),
            cover: field_or(fm, "cover", ""),
            category: field_or(fm, "category", DEFAULT_CATEGORY),
            read_time: field_or(fm, "readTime", DEFAULT_READ_TIME),
            author: field_or(fm, "author", DEFAULT_AUTHOR),
            content: body.to_string(),
            slug,
        })
    }

    /// Parsed publication date; `None` when missing or unparsable
    pub fn published_at(&self) -> Option<NaiveDateTime> {
        parse_date(&self.date)
    }

    /// URL segment of this post's category
    pub fn category_slug(&self) -> String {
        category_slug(&self.category)
    }

    /// Borrowed view without the body, for listings
    pub fn summary(&self) -> PostSummary<'_> {
        PostSummary {
            id: self.id,
            slug: &self.slug,
            title: &self.title,
            date: &self.date,
            excerpt: &self.excerpt,
            cover: &self.cover,
            category: &self.category,
            read_time: &self.read_time,
            author: &self.author,
        }
    }
}

fn field_or(fm: &FrontMatter, key: &str, default: &str) -> String {
    fm.get_non_empty(key).unwrap_or(default).to_string()
}

/// Post metadata without the body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary<'a> {
    pub id: usize,
    pub slug: &'a str,
    pub title: &'a str,
    pub date: &'a str,
    pub excerpt: &'a str,
    pub cover: &'a str,
    pub category: &'a str,
    pub read_time: &'a str,
    pub author: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn front_matter(pairs: &[(&str, &str)]) -> FrontMatter {
        let mut fm = FrontMatter::new();
        for (k, v) in pairs {
            fm.insert(*k, *v);
        }
        fm
    }

    #[test]
    fn test_defaults_applied() {
        let fm = front_matter(&[("title", "Hello")]);
        let post = Post::from_front_matter(1, "hello".into(), &fm, "body").unwrap();
        assert_eq!(post.title, "Hello");
        assert_eq!(post.category, "Uncategorized");
        assert_eq!(post.read_time, "5 min read");
        assert_eq!(post.author, "Anonymous");
        assert_eq!(post.excerpt, "");
        assert_eq!(post.cover, "");
        assert_eq!(post.date, "");
        assert_eq!(post.content, "body");
        assert_eq!(post.published_at(), None);
    }

    #[test]
    fn test_all_fields() {
        let fm = front_matter(&[
            ("title", "React Best Practices"),
            ("date", "2023-06-01"),
            ("excerpt", "Tips"),
            ("cover", "https://example.com/c.jpg"),
            ("category", "Web Development"),
            ("readTime", "8 min read"),
            ("author", "Sam"),
        ]);
        let post = Post::from_front_matter(3, "web-development/react".into(), &fm, "").unwrap();
        assert_eq!(post.id, 3);
        assert_eq!(post.read_time, "8 min read");
        assert_eq!(post.author, "Sam");
        assert_eq!(post.category_slug(), "web-development");
        assert!(post.published_at().is_some());
    }

    #[test]
    fn test_missing_title_rejected() {
        let fm = front_matter(&[("date", "2023-06-01")]);
        let err = Post::from_front_matter(1, "x".into(), &fm, "").unwrap_err();
        assert!(matches!(
            err,
            ContentError::MissingRequiredField { field: "title", .. }
        ));

        let blank = front_matter(&[("title", "  ")]);
        assert!(Post::from_front_matter(1, "x".into(), &blank, "").is_err());
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let fm = front_matter(&[("title", "T")]);
        let post = Post::from_front_matter(1, "t".into(), &fm, "secret body").unwrap();
        let json = serde_json::to_value(post.summary()).unwrap();
        assert_eq!(json["readTime"], "5 min read");
        assert!(json.get("content").is_none());
    }
}
