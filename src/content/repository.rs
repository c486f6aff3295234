//! Post repository - loads the corpus and answers queries
//!
//! Every query re-reads and re-parses the whole corpus. Nothing is cached,
//! so results always reflect the documents as they are at call time.

use indexmap::IndexMap;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

use super::category::{category_key, category_slug, normalize_category, CategorySummary};
use super::{ContentError, DocumentSource, FrontMatter, Post};

/// Default per-document fetch timeout
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Derive a post slug from a storage path.
///
/// Strips a leading `/`, the content `root` and the `.md` suffix. Nested
/// directories stay part of the slug. Returns `None` for paths outside the
/// root or without the markdown extension.
///
/// # Examples
/// ```
/// use inkpress::content::derive_slug;
///
/// assert_eq!(
///     derive_slug("/blogposts/web-development/react-best-practices.md", "blogposts").as_deref(),
///     Some("web-development/react-best-practices")
/// );
/// ```
pub fn derive_slug(path: &str, root: &str) -> Option<String> {
    let path = path.replace('\\', "/");
    let path = path.trim_start_matches('/');
    let root = root.trim_matches('/');

    let relative = if root.is_empty() {
        path
    } else {
        path.strip_prefix(root)?.strip_prefix('/')?
    };

    let slug = relative.strip_suffix(".md")?;
    if slug.is_empty() || slug.ends_with('/') {
        return None;
    }
    Some(slug.to_string())
}

/// Read-only view over a [`DocumentSource`]
pub struct Repository<S> {
    source: Arc<S>,
    root: String,
    fetch_timeout: Duration,
}

impl<S> Clone for Repository<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            root: self.root.clone(),
            fetch_timeout: self.fetch_timeout,
        }
    }
}

impl<S: DocumentSource> Repository<S> {
    /// Create a repository over `source`, whose paths live under `root`
    pub fn new(source: S, root: &str) -> Self {
        Self {
            source: Arc::new(source),
            root: root.trim_matches('/').to_string(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Limit how long a single document read may take
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Load every valid post in enumeration order.
    ///
    /// Documents that cannot be read or parsed, or that lack a title, are
    /// logged and left out. Ids count up from 1 over the posts kept.
    pub async fn load_posts(&self) -> Vec<Post> {
        // Enumeration may walk a directory tree; keep it off the async workers
        let source = Arc::clone(&self.source);
        let paths = match tokio::task::spawn_blocking(move || source.paths()).await {
            Ok(Ok(paths)) => paths,
            Ok(Err(e)) => {
                tracing::warn!("Failed to enumerate documents under {}: {}", self.root, e);
                return Vec::new();
            }
            Err(e) => {
                tracing::error!("Document enumeration task failed: {}", e);
                return Vec::new();
            }
        };

        let documents: Vec<(String, String)> = paths
            .into_iter()
            .filter_map(|path| match derive_slug(&path, &self.root) {
                Some(slug) => Some((path, slug)),
                None => {
                    tracing::debug!("Ignoring {}: not a markdown file under {}", path, self.root);
                    None
                }
            })
            .collect();

        let texts = self.fetch_all(&documents).await;

        let mut posts = Vec::with_capacity(documents.len());
        let mut seen = HashSet::new();
        for ((path, slug), text) in documents.into_iter().zip(texts) {
            let text = match text {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!("Skipping document: {}", e);
                    continue;
                }
            };

            if seen.contains(&slug) {
                tracing::warn!("Skipping {}: duplicate slug {}", path, slug);
                continue;
            }

            match parse_post(posts.len() + 1, &path, slug.clone(), &text) {
                Ok(post) => {
                    seen.insert(slug);
                    posts.push(post);
                }
                Err(e) => tracing::warn!("Skipping document: {}", e),
            }
        }

        tracing::debug!("Loaded {} posts from {}", posts.len(), self.root);
        posts
    }

    /// Read all documents concurrently; results line up with `documents`
    async fn fetch_all(&self, documents: &[(String, String)]) -> Vec<Result<String, ContentError>> {
        let mut set = JoinSet::new();
        for (index, (path, _)) in documents.iter().enumerate() {
            let source = Arc::clone(&self.source);
            let path = path.clone();
            let timeout = self.fetch_timeout;
            set.spawn(async move {
                let read = tokio::time::timeout(timeout, source.read(&path)).await;
                let result = match read {
                    Ok(Ok(text)) => Ok(text),
                    Ok(Err(source)) => Err(ContentError::FetchFailure { path, source }),
                    Err(_) => Err(ContentError::FetchTimeout { path, timeout }),
                };
                (index, result)
            });
        }

        let mut results: Vec<Option<Result<String, ContentError>>> =
            documents.iter().map(|_| None).collect();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, result)) => results[index] = Some(result),
                Err(e) => tracing::error!("Document fetch task failed: {}", e),
            }
        }

        results
            .into_iter()
            .zip(documents)
            .map(|(result, (path, _))| {
                result.unwrap_or_else(|| {
                    Err(ContentError::FetchFailure {
                        path: path.clone(),
                        source: std::io::Error::other("fetch task aborted"),
                    })
                })
            })
            .collect()
    }

    /// All posts, newest first. Posts without a parsable date come last.
    pub async fn list_all_posts(&self) -> Vec<Post> {
        let mut posts = self.load_posts().await;
        sort_by_date_desc(&mut posts);
        posts
    }

    /// The post whose slug equals `slug` exactly
    pub async fn get_post_by_slug(&self, slug: &str) -> Option<Post> {
        if slug.is_empty() {
            return None;
        }
        let post = self.load_posts().await.into_iter().find(|p| p.slug == slug);
        if post.is_none() {
            tracing::debug!("No post with slug {}", slug);
        }
        post
    }

    /// Posts in `category` (a display name or URL segment), newest first
    pub async fn get_posts_by_category(&self, category: &str) -> Vec<Post> {
        let wanted = normalize_category(category);
        let posts: Vec<Post> = self
            .list_all_posts()
            .await
            .into_iter()
            .filter(|p| category_key(&p.category) == wanted)
            .collect();
        tracing::debug!("Found {} posts in category '{}'", posts.len(), category);
        posts
    }

    /// Every category with its post count, largest first
    pub async fn categories(&self) -> Vec<CategorySummary> {
        let mut by_key: IndexMap<String, CategorySummary> = IndexMap::new();
        for post in self.list_all_posts().await {
            by_key
                .entry(category_key(&post.category))
                .or_insert_with(|| CategorySummary {
                    name: post.category.clone(),
                    slug: category_slug(&post.category),
                    count: 0,
                })
                .count += 1;
        }

        let mut categories: Vec<_> = by_key.into_values().collect();
        categories.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        categories
    }

    /// Up to `limit` other posts, same category first, then newest
    pub async fn related_posts(&self, slug: &str, limit: usize) -> Vec<Post> {
        let posts = self.list_all_posts().await;
        let Some(current) = posts.iter().find(|p| p.slug == slug) else {
            return Vec::new();
        };
        let category = category_key(&current.category);

        let (mut related, others): (Vec<Post>, Vec<Post>) = posts
            .into_iter()
            .filter(|p| p.slug != slug)
            .partition(|p| category_key(&p.category) == category);
        related.extend(others);
        related.truncate(limit);
        related
    }

    /// Posts whose title, excerpt or category contains `query`, ignoring case
    pub async fn search_posts(&self, query: &str) -> Vec<Post> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.list_all_posts()
            .await
            .into_iter()
            .filter(|p| {
                [&p.title, &p.excerpt, &p.category]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect()
    }
}

fn parse_post(id: usize, path: &str, slug: String, text: &str) -> Result<Post, ContentError> {
    let (fm, body) = FrontMatter::parse(text).map_err(|source| ContentError::ParseFailure {
        path: path.to_string(),
        source,
    })?;
    Post::from_front_matter(id, slug, &fm, body)
}

/// Stable sort, newest first; `None` dates rank below every real date
fn sort_by_date_desc(posts: &mut [Post]) {
    posts.sort_by_cached_key(|p| std::cmp::Reverse(p.published_at()));
}
