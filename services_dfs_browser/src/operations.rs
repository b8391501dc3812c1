//! Browser operations
//!
//! This module defines the browsing seam and the errors it can raise.

use dfs_path::DirectoryEntry;
use services_site_config::SiteConfig;
use thiserror::Error;

/// Configuration key naming the filesystem to browse
pub const DEFAULT_FS_KEY: &str = "fs.defaultFS";

/// Errors raised while reaching or listing the remote filesystem
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemoteAccessError {
    /// Path does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    /// Access denied
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Filesystem could not be reached or is not configured
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Any other I/O failure
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },
}

/// Lists directories
pub trait DirectoryBrowser {
    /// Returns the immediate children of `path`, in listing order
    ///
    /// `path` may carry a trailing `/`.
    fn browse(&self, path: &str) -> Result<Vec<DirectoryEntry>, RemoteAccessError>;
}

impl<T: DirectoryBrowser + ?Sized> DirectoryBrowser for Box<T> {
    fn browse(&self, path: &str) -> Result<Vec<DirectoryEntry>, RemoteAccessError> {
        (**self).browse(path)
    }
}

/// Builds a browser from a site's configuration
pub trait BrowserFactory {
    /// Browser type produced by this factory
    type Browser: DirectoryBrowser;

    /// Creates a fresh browser bound to `config`
    fn new_browser(&self, config: &SiteConfig) -> Result<Self::Browser, RemoteAccessError>;
}

impl<T: BrowserFactory + ?Sized> BrowserFactory for &T {
    type Browser = T::Browser;

    fn new_browser(&self, config: &SiteConfig) -> Result<Self::Browser, RemoteAccessError> {
        (**self).new_browser(config)
    }
}

/// Reads `fs.defaultFS` from a configuration
pub fn default_fs(config: &SiteConfig) -> Result<&str, RemoteAccessError> {
    config
        .get(DEFAULT_FS_KEY)
        .ok_or_else(|| RemoteAccessError::Connection(format!("{} is not configured", DEFAULT_FS_KEY)))
}

/// Splits a filesystem URI into scheme and the rest
///
/// # Examples
///
/// ```
/// use services_dfs_browser::split_scheme;
///
/// assert_eq!(split_scheme("memory://sandbox"), Some(("memory", "sandbox")));
/// assert_eq!(split_scheme("file:///srv/dfs"), Some(("file", "/srv/dfs")));
/// assert_eq!(split_scheme("/srv/dfs"), None);
/// ```
pub fn split_scheme(uri: &str) -> Option<(&str, &str)> {
    let (scheme, rest) = uri.split_once("://")?;
    if scheme.is_empty() {
        return None;
    }
    Some((scheme, rest))
}
