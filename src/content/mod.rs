//! Content module - front matter, posts, document sources and queries

mod category;
pub mod date;
mod frontmatter;
mod post;
mod repository;
pub mod source;

use std::time::Duration;
use thiserror::Error;

pub use category::{
    category_key, category_slug, normalize_category, CategorySummary, DEFAULT_CATEGORY,
};
pub use frontmatter::{FrontMatter, FrontMatterError};
pub use post::{Post, PostSummary, DEFAULT_AUTHOR, DEFAULT_READ_TIME};
pub use repository::{derive_slug, Repository};
pub use source::{DocumentSource, FsSource, MemorySource};

/// Reasons a single document contributes no post.
///
/// None of these reach query callers; the repository logs and skips.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    FetchFailure {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("timed out after {timeout:?} reading {path}")]
    FetchTimeout { path: String, timeout: Duration },

    #[error("failed to parse front matter in {path}: {source}")]
    ParseFailure {
        path: String,
        #[source]
        source: FrontMatterError,
    },

    #[error("{slug} is missing required field `{field}`")]
    MissingRequiredField { slug: String, field: &'static str },
}
