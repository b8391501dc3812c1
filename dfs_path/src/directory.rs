//! Directory entry types
//!
//! This module defines how listed children of a remote directory are represented.

use serde::{Deserialize, Serialize};

/// Kind of object behind a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory
    Directory,
}

/// A single entry in a directory listing
///
/// The path is always root-relative: scheme and authority of the backing
/// filesystem are stripped before an entry is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    path: String,
    kind: EntryKind,
    length: u64,
}

impl DirectoryEntry {
    /// Creates a new directory entry
    ///
    /// `path` must already be root-relative.
    pub fn new(path: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            kind,
            length: 0,
        }
    }

    /// Creates a file entry
    pub fn file(path: impl Into<String>) -> Self {
        Self::new(path, EntryKind::File)
    }

    /// Creates a directory entry
    pub fn directory(path: impl Into<String>) -> Self {
        Self::new(path, EntryKind::Directory)
    }

    /// Sets the length in bytes
    pub fn with_length(mut self, length: u64) -> Self {
        self.length = length;
        self
    }

    /// Builds an entry from a filesystem location
    ///
    /// Accepts either a root-relative path or a full URI such as
    /// `hdfs://namenode:8020/data/logs`. Returns `None` for anything else.
    ///
    /// # Examples
    ///
    /// ```
    /// use dfs_path::{DirectoryEntry, EntryKind};
    ///
    /// let entry = DirectoryEntry::from_uri("hdfs://nn:8020/data/logs", EntryKind::Directory).unwrap();
    /// assert_eq!(entry.path(), "/data/logs");
    ///
    /// assert!(DirectoryEntry::from_uri("data/logs", EntryKind::Directory).is_none());
    /// ```
    pub fn from_uri(location: &str, kind: EntryKind) -> Option<Self> {
        let path = match location.split_once("://") {
            Some((_, rest)) => match rest.find('/') {
                Some(idx) => &rest[idx..],
                None => "/",
            },
            None if location.starts_with('/') => location,
            None => return None,
        };
        Some(Self::new(path, kind))
    }

    /// Rewrites the entry's path to its root-relative form
    ///
    /// Entries listed by full URI lose their scheme and authority; entries
    /// that are already root-relative come back unchanged.
    pub fn into_root_relative(self) -> Option<Self> {
        let Self { path, kind, length } = self;
        Self::from_uri(&path, kind).map(|entry| entry.with_length(length))
    }

    /// Root-relative path of this entry
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Kind of object
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Length in bytes (zero for directories)
    pub fn length(&self) -> u64 {
        self.length
    }

    /// Returns true if this entry is a directory
    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Consumes the entry, returning its path
    pub fn into_path(self) -> String {
        self.path
    }
}

/// Joins a child name onto a root-relative directory path
///
/// # Examples
///
/// ```
/// use dfs_path::child_path;
///
/// assert_eq!(child_path("/data/logs/", "app1"), "/data/logs/app1");
/// assert_eq!(child_path("/data/logs", "app1"), "/data/logs/app1");
/// assert_eq!(child_path("/", "data"), "/data");
/// ```
pub fn child_path(dir: &str, name: &str) -> String {
    format!("{}/{}", dir.trim_end_matches('/'), name)
}
