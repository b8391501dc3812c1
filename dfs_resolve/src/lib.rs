//! # DFS Resolve Host
//!
//! Command-line host for the path resolver.
//!
//! ## Responsibilities
//!
//! The host:
//! - Loads a site registry from a JSON file
//! - Takes one resolve request from flags or as JSON
//! - Validates it, resolves it against the site's `file://` filesystem
//! - Prints the matched paths as a JSON array
//!
//! ## Non-Responsibilities
//!
//! The host does NOT:
//! - Cache registries or listings between runs
//! - Write to the browsed filesystem

pub mod args;
pub mod runtime;

pub use args::{parse_args, Invocation};
pub use runtime::{ResolveHost, ResolveHostConfig, ResolveHostError};
