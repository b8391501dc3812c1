//! Prefix matching over directory listings

use crate::directory::DirectoryEntry;

/// Outcome of a prefix match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixMatch {
    /// Entries handed back to the caller, in listing order
    pub entries: Vec<DirectoryEntry>,
    /// True if nothing matched and the full listing was returned instead
    pub fallback: bool,
}

/// Keeps entries whose path starts with `prefix`
///
/// The prefix is compared literally from position 0 of each path. If no entry
/// matches, the full listing is returned unchanged and `fallback` is set: a
/// mistyped fragment still shows the directory's children rather than nothing.
///
/// # Examples
///
/// ```
/// use dfs_path::{retain_prefix_or_all, DirectoryEntry};
///
/// let listing = vec![
///     DirectoryEntry::directory("/data/logs/app1"),
///     DirectoryEntry::directory("/data/logs/other"),
/// ];
///
/// let matched = retain_prefix_or_all(listing.clone(), "/data/logs/app");
/// assert_eq!(matched.entries.len(), 1);
/// assert!(!matched.fallback);
///
/// let matched = retain_prefix_or_all(listing, "/data/logs/zzz");
/// assert_eq!(matched.entries.len(), 2);
/// assert!(matched.fallback);
/// ```
pub fn retain_prefix_or_all(entries: Vec<DirectoryEntry>, prefix: &str) -> PrefixMatch {
    if !entries.iter().any(|entry| entry.path().starts_with(prefix)) {
        return PrefixMatch {
            entries,
            fallback: true,
        };
    }

    PrefixMatch {
        entries: entries
            .into_iter()
            .filter(|entry| entry.path().starts_with(prefix))
            .collect(),
        fallback: false,
    }
}
