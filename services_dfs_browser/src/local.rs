//! Local-disk browser
//!
//! Serves a directory tree on local disk as if it were the remote namespace,
//! with `file:///<root>` as the filesystem URI. Root-relative query paths are
//! resolved under `<root>` and may not climb out of it, either through `..`
//! or through symbolic links.

use crate::operations::{default_fs, split_scheme, BrowserFactory, DirectoryBrowser, RemoteAccessError};
use dfs_path::{child_path, DirectoryEntry, EntryKind};
use services_site_config::SiteConfig;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Browser over a local directory tree
#[derive(Debug, Clone)]
pub struct LocalBrowser {
    root: PathBuf,
}

impl LocalBrowser {
    /// Creates a browser rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory that `/` maps to
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn local_path(&self, path: &str) -> Result<PathBuf, RemoteAccessError> {
        if !path.starts_with('/') {
            return Err(RemoteAccessError::NotFound(path.to_string()));
        }

        let mut local = self.root.clone();
        for component in path.split('/') {
            match component {
                "" | "." => {}
                ".." => return Err(RemoteAccessError::PermissionDenied(path.to_string())),
                name => local.push(name),
            }
        }
        Ok(local)
    }

    /// Resolves `path` to a canonical location that must lie under the root
    fn contained_path(&self, path: &str) -> Result<PathBuf, RemoteAccessError> {
        let local = self.local_path(path)?;
        let root = fs::canonicalize(&self.root).map_err(|e| map_io(path, e))?;
        let resolved = fs::canonicalize(&local).map_err(|e| map_io(path, e))?;
        if !resolved.starts_with(&root) {
            return Err(RemoteAccessError::PermissionDenied(path.to_string()));
        }
        Ok(resolved)
    }
}

impl DirectoryBrowser for LocalBrowser {
    fn browse(&self, path: &str) -> Result<Vec<DirectoryEntry>, RemoteAccessError> {
        let dir = self.contained_path(path)?;
        let metadata = fs::metadata(&dir).map_err(|e| map_io(path, e))?;
        if !metadata.is_dir() {
            return Err(RemoteAccessError::NotADirectory(path.to_string()));
        }

        let mut entries = Vec::new();
        for item in fs::read_dir(&dir).map_err(|e| map_io(path, e))? {
            let item = item.map_err(|e| map_io(path, e))?;
            let metadata = item.metadata().map_err(|e| map_io(path, e))?;
            let name = item.file_name().into_string().map_err(|raw| RemoteAccessError::Io {
                path: path.to_string(),
                message: format!("file name is not valid UTF-8: {}", raw.to_string_lossy()),
            })?;
            let (kind, length) = if metadata.is_dir() {
                (EntryKind::Directory, 0)
            } else {
                (EntryKind::File, metadata.len())
            };
            entries.push(DirectoryEntry::new(child_path(path, &name), kind).with_length(length));
        }

        // read_dir order is platform-dependent; listings are sorted by name
        entries.sort_by(|a, b| a.path().cmp(b.path()));
        Ok(entries)
    }
}

fn map_io(path: &str, err: io::Error) -> RemoteAccessError {
    match err.kind() {
        io::ErrorKind::NotFound => RemoteAccessError::NotFound(path.to_string()),
        io::ErrorKind::PermissionDenied => RemoteAccessError::PermissionDenied(path.to_string()),
        _ => RemoteAccessError::Io {
            path: path.to_string(),
            message: err.to_string(),
        },
    }
}

/// Builds [`LocalBrowser`]s for `file:///<root>` filesystems
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalBrowserFactory;

impl BrowserFactory for LocalBrowserFactory {
    type Browser = LocalBrowser;

    fn new_browser(&self, config: &SiteConfig) -> Result<LocalBrowser, RemoteAccessError> {
        let fs = default_fs(config)?;
        match split_scheme(fs) {
            Some(("file", root)) if root.starts_with('/') => Ok(LocalBrowser::new(root)),
            Some(("file", _)) => Err(RemoteAccessError::Connection(format!(
                "file URI must not name a host: {}",
                fs
            ))),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::DEFAULT_FS_KEY;

    #[test]
    fn test_local_path_joins_under_root() {
        let browser = LocalBrowser::new("/srv/dfs");
        assert_eq!(
            browser.local_path("/data/logs/").unwrap(),
            PathBuf::from("/srv/dfs/data/logs")
        );
        assert_eq!(browser.local_path("/").unwrap(), PathBuf::from("/srv/dfs"));
    }

    #[test]
    fn test_local_path_rejects_escape() {
        let browser = LocalBrowser::new("/srv/dfs");
        assert!(matches!(
            browser.local_path("/data/../../etc"),
            Err(RemoteAccessError::PermissionDenied(_))
        ));
    }

    #[test]
    fn test_factory_accepts_file_uri() {
        let config = SiteConfig::new().with(DEFAULT_FS_KEY, "file:///srv/dfs");
        let browser = LocalBrowserFactory.new_browser(&config).unwrap();
        assert_eq!(browser.root(), Path::new("/srv/dfs"));
    }

    #[test]
    fn test_factory_rejects_host() {
        let config = SiteConfig::new().with(DEFAULT_FS_KEY, "file://nas/srv");
        assert!(LocalBrowserFactory.new_browser(&config).is_err());
    }

    #[test]
    fn test_factory_rejects_remote_scheme() {
        let config = SiteConfig::new().with(DEFAULT_FS_KEY, "hdfs://sandbox:8020");
        assert!(matches!(
            LocalBrowserFactory.new_browser(&config),
            Err(RemoteAccessError::Connection(_))
        ));
    }

    #[test]
    fn test_map_io_kinds() {
        let err = map_io("/x", io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(err, RemoteAccessError::NotFound("/x".to_string()));

        let err = map_io("/x", io::Error::new(io::ErrorKind::Other, "boom"));
        assert!(matches!(err, RemoteAccessError::Io { .. }));
    }
}
