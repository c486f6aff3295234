//! Category normalization shared by queries and URL generation

use serde::Serialize;

/// Fallback category for posts that do not declare one
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Comparison key for a category query, typically a URL segment:
/// lower-cased, with every hyphen turned into a space.
///
/// Posts match when their lower-cased category equals this key, so
/// `"web-development"` finds posts filed under `"Web Development"`.
pub fn normalize_category(query: &str) -> String {
    query.to_lowercase().replace('-', " ")
}

/// Comparison key for a post's stored category: lower-cased only
pub fn category_key(name: &str) -> String {
    name.to_lowercase()
}

/// URL path segment for a category: lower-case, spaces become `-`.
///
/// For names without hyphens, `normalize_category(&category_slug(x))`
/// equals `category_key(x)`.
pub fn category_slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// A category with the number of posts filed under it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    /// Display name, as written by the most recent post in the category
    pub name: String,
    /// URL segment
    pub slug: String,
    pub count: usize,
}
