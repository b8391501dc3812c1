//! # DFS Path
//!
//! This crate holds the pure, I/O-free half of path resolution against a
//! distributed filesystem namespace.
//!
//! ## Philosophy
//!
//! - **Queries are classified, not globbed**: A query is either a directory
//!   listing or a prefix filter over one directory's children
//! - **Entries are root-relative**: Every path handed out begins with `/`
//! - **Something beats nothing**: A prefix that matches no child falls back
//!   to the full listing
//!
//! ## Design
//!
//! - `ResolveRequest` carries the `{"site": ..., "query": ...}` wire shape
//! - `PathQuery` splits a trimmed query into what to browse and what to match
//! - `retain_prefix_or_all` applies the prefix filter with its fallback

pub mod directory;
pub mod matcher;
pub mod path;
pub mod request;

pub use directory::{child_path, DirectoryEntry, EntryKind};
pub use matcher::{retain_prefix_or_all, PrefixMatch};
pub use path::{NameCharset, PathError, PathQuery};
pub use request::{validate, RequestError, ResolveRequest, RESOLVE_FORMAT_HINT};
