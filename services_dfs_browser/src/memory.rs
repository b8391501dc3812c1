//! In-memory namespace
//!
//! A directory tree held in memory, browsed through `memory://<cluster>`.
//! Listings keep insertion order.

use crate::operations::{default_fs, split_scheme, BrowserFactory, DirectoryBrowser, RemoteAccessError};
use dfs_path::{DirectoryEntry, EntryKind};
use services_site_config::SiteConfig;
use std::collections::BTreeMap;
use std::sync::Arc;

/// An in-memory directory tree
#[derive(Debug, Clone)]
pub struct MemoryNamespace {
    /// Children of every known directory, keyed by normalized path
    directories: BTreeMap<String, Vec<DirectoryEntry>>,
}

impl MemoryNamespace {
    /// Creates a namespace holding only `/`
    pub fn new() -> Self {
        let mut directories = BTreeMap::new();
        directories.insert("/".to_string(), Vec::new());
        Self { directories }
    }

    /// Creates a directory, along with any missing parents
    pub fn mkdir(&mut self, path: &str) -> Result<(), RemoteAccessError> {
        self.insert(path, EntryKind::Directory, 0)
    }

    /// Creates a file, along with any missing parent directories
    pub fn add_file(&mut self, path: &str, length: u64) -> Result<(), RemoteAccessError> {
        self.insert(path, EntryKind::File, length)
    }

    fn insert(&mut self, path: &str, kind: EntryKind, length: u64) -> Result<(), RemoteAccessError> {
        if !path.starts_with('/') {
            return Err(RemoteAccessError::NotFound(path.to_string()));
        }
        let path = normalize(path);
        if path == "/" {
            return match kind {
                EntryKind::Directory => Ok(()),
                EntryKind::File => Err(already_directory(path)),
            };
        }

        let parent = parent_of(path).to_string();
        if !self.directories.contains_key(&parent) {
            self.insert(&parent, EntryKind::Directory, 0)?;
        }

        let children = self
            .directories
            .get_mut(&parent)
            .ok_or_else(|| RemoteAccessError::NotFound(parent.clone()))?;

        if let Some(existing) = children.iter().find(|e| e.path() == path) {
            return match (existing.kind(), kind) {
                (EntryKind::Directory, EntryKind::Directory) | (EntryKind::File, EntryKind::File) => {
                    Ok(())
                }
                (EntryKind::File, EntryKind::Directory) => {
                    Err(RemoteAccessError::NotADirectory(path.to_string()))
                }
                (EntryKind::Directory, EntryKind::File) => Err(already_directory(path)),
            };
        }

        children.push(DirectoryEntry::new(path, kind).with_length(length));
        if kind == EntryKind::Directory {
            self.directories.entry(path.to_string()).or_default();
        }
        Ok(())
    }

    fn is_file(&self, path: &str) -> bool {
        self.directories
            .get(parent_of(path))
            .map(|children| {
                children
                    .iter()
                    .any(|e| e.path() == path && e.kind() == EntryKind::File)
            })
            .unwrap_or(false)
    }
}

impl Default for MemoryNamespace {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryBrowser for MemoryNamespace {
    fn browse(&self, path: &str) -> Result<Vec<DirectoryEntry>, RemoteAccessError> {
        let key = normalize(path);
        if let Some(children) = self.directories.get(key) {
            return Ok(children.clone());
        }
        if self.is_file(key) {
            return Err(RemoteAccessError::NotADirectory(path.to_string()));
        }
        Err(RemoteAccessError::NotFound(path.to_string()))
    }
}

/// Strips trailing separators, keeping `/` for the root
fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// Parent of a normalized, non-root path
fn parent_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(idx) => &path[..idx],
    }
}

fn already_directory(path: &str) -> RemoteAccessError {
    RemoteAccessError::Io {
        path: path.to_string(),
        message: "already exists as a directory".to_string(),
    }
}

/// Browser over a shared in-memory namespace
#[derive(Debug, Clone)]
pub struct MemoryBrowser {
    namespace: Arc<MemoryNamespace>,
}

impl MemoryBrowser {
    /// Creates a browser over `namespace`
    pub fn new(namespace: Arc<MemoryNamespace>) -> Self {
        Self { namespace }
    }
}

impl DirectoryBrowser for MemoryBrowser {
    fn browse(&self, path: &str) -> Result<Vec<DirectoryEntry>, RemoteAccessError> {
        self.namespace.browse(path)
    }
}

/// Builds [`MemoryBrowser`]s for `memory://<cluster>` filesystems
#[derive(Debug, Clone, Default)]
pub struct MemoryBrowserFactory {
    clusters: BTreeMap<String, Arc<MemoryNamespace>>,
}

impl MemoryBrowserFactory {
    /// Creates a factory with no clusters
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a namespace under a cluster name
    pub fn with_cluster(mut self, cluster: impl Into<String>, namespace: MemoryNamespace) -> Self {
        self.clusters.insert(cluster.into(), Arc::new(namespace));
        self
    }
}

impl BrowserFactory for MemoryBrowserFactory {
    type Browser = MemoryBrowser;

    fn new_browser(&self, config: &SiteConfig) -> Result<MemoryBrowser, RemoteAccessError> {
        let fs = default_fs(config)?;
        match split_scheme(fs) {
            Some(("memory", cluster)) => {
                let cluster = cluster.trim_end_matches('/');
                self.clusters
                    .get(cluster)
                    .map(|namespace| MemoryBrowser::new(Arc::clone(namespace)))
                    .ok_or_else(|| RemoteAccessError::Connection(format!("unknown cluster {}", cluster)))
            }
            Some((scheme, _)) => Err(RemoteAccessError::Connection(format!(
                "unsupported filesystem scheme {}",
                scheme
            ))),
            None => Err(RemoteAccessError::Connection(format!(
                "invalid filesystem URI {}",
                fs
            ))),
        }
    }
}
