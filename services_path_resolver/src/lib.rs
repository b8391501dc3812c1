//! # Path Resolver Service
//!
//! Resolves a possibly-partial path query against a site's distributed
//! filesystem and returns the concrete paths that match, for path
//! auto-completion and validation of path-bound attributes.
//!
//! ## Philosophy
//!
//! - Every call looks up configuration and builds its browser afresh
//! - No state survives a call, so concurrent callers need no locking
//! - A prefix that matches nothing shows the whole directory instead
//!
//! ## Operations
//!
//! - `validate(site, query)`: Check the request shape
//! - `resolve(site, query)`: List or prefix-filter a directory
//! - `build_browser(site)`: Look up configuration and build a browser

pub mod error;
pub mod resolver;

pub use error::ResolveError;
pub use resolver::{AttributeResolver, PathResolver, ResolverOptions, DFS_APPLICATION_TYPE};
