//! # DFS Browser Service
//!
//! This service lists directories of a distributed filesystem namespace.
//!
//! ## Philosophy
//!
//! - Browsing is read-only: no operation here writes to the namespace
//! - A browser is built from one site's configuration and lives for one request
//! - Entries come back root-relative, whatever the backing store calls them
//!
//! ## Backends
//!
//! The backend is picked by the scheme of `fs.defaultFS`:
//!
//! - `memory://<cluster>`: an in-memory namespace registered with the factory
//! - `file:///<root>`: a directory tree on local disk

pub mod local;
pub mod memory;
pub mod operations;

pub use local::{LocalBrowser, LocalBrowserFactory};
pub use memory::{MemoryBrowser, MemoryBrowserFactory, MemoryNamespace};
pub use operations::{
    default_fs, split_scheme, BrowserFactory, DirectoryBrowser, RemoteAccessError, DEFAULT_FS_KEY,
};
