//! Document sources - where the markdown corpus is read from

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A corpus of markdown documents addressed by storage path.
///
/// Paths use `/` separators and include the content root, e.g.
/// `blogposts/web-development/react-best-practices.md`.
pub trait DocumentSource: Send + Sync + 'static {
    /// Enumerate every document path in the corpus
    fn paths(&self) -> io::Result<Vec<String>>;

    /// Fetch the text of one document
    fn read(&self, path: &str) -> impl Future<Output = io::Result<String>> + Send;
}

/// Reads documents from a site directory on disk
#[derive(Debug, Clone)]
pub struct FsSource {
    base_dir: PathBuf,
    root: String,
}

impl FsSource {
    /// Serve `<base_dir>/<root>/**/*.md`
    pub fn new<P: AsRef<Path>>(base_dir: P, root: &str) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            root: root.trim_matches('/').to_string(),
        }
    }

    /// Directory holding the corpus
    pub fn content_dir(&self) -> PathBuf {
        self.base_dir.join(&self.root)
    }
}

impl DocumentSource for FsSource {
    fn paths(&self) -> io::Result<Vec<String>> {
        let content_dir = self.content_dir();
        if !content_dir.exists() {
            tracing::debug!("Content directory {:?} does not exist", content_dir);
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(&content_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry under {:?}: {}", content_dir, e);
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }
            let Ok(relative) = path.strip_prefix(&self.base_dir) else {
                continue;
            };
            let parts: Vec<_> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect();
            paths.push(parts.join("/"));
        }

        Ok(paths)
    }

    async fn read(&self, path: &str) -> io::Result<String> {
        tokio::fs::read_to_string(self.base_dir.join(path)).await
    }
}

/// In-memory corpus, for tests and embedded content
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: Vec<(String, Option<String>)>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document
    pub fn with_document(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.documents.push((path.into(), Some(text.into())));
        self
    }

    /// Add a path that is listed but fails to read
    pub fn with_unreadable(mut self, path: impl Into<String>) -> Self {
        self.documents.push((path.into(), None));
        self
    }
}

impl DocumentSource for MemorySource {
    fn paths(&self) -> io::Result<Vec<String>> {
        Ok(self.documents.iter().map(|(p, _)| p.clone()).collect())
    }

    async fn read(&self, path: &str) -> io::Result<String> {
        self.documents
            .iter()
            .find(|(p, _)| p == path)
            .and_then(|(_, text)| text.clone())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.to_string()))
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}
