//! Path query classification
//!
//! This module decides what a query asks for: a whole directory listing or a
//! prefix-filtered view of one directory's children.

use thiserror::Error;

/// Errors that can occur while classifying a query
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Query contains no `/` at all
    #[error("Missing separator: {0:?}")]
    MissingSeparator(String),

    /// Trailing fragment contains a character outside the name set
    #[error("Invalid character {ch:?} in name fragment of {query:?}")]
    InvalidNameChar { query: String, ch: char },
}

/// Characters allowed in the trailing name fragment of a prefix query
///
/// Defaults to ASCII word characters (`[A-Za-z0-9_]`) and ASCII whitespace.
/// Deployments whose paths carry hyphens or dots widen it with [`with_extra`].
///
/// [`with_extra`]: NameCharset::with_extra
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NameCharset {
    extra: Vec<char>,
}

impl NameCharset {
    /// Word characters and whitespace only
    pub fn word_and_whitespace() -> Self {
        Self::default()
    }

    /// Allows additional characters
    ///
    /// `/` is never accepted, it always terminates the parent directory.
    pub fn with_extra(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        for ch in chars {
            if ch != '/' && !self.extra.contains(&ch) {
                self.extra.push(ch);
            }
        }
        self
    }

    /// Extra characters beyond the default set
    pub fn extra(&self) -> &[char] {
        &self.extra
    }

    /// Returns true if `ch` may appear in a name fragment
    pub fn contains(&self, ch: char) -> bool {
        ch.is_ascii_alphanumeric()
            || ch == '_'
            || matches!(ch, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
            || self.extra.contains(&ch)
    }
}

/// A classified path query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathQuery<'a> {
    /// Query ends with `/`: list the directory as-is
    Listing {
        /// Directory to browse
        dir: &'a str,
    },

    /// Query ends with a partial name: list the parent, keep prefix matches
    Prefix {
        /// Everything up to and including the last `/`
        parent: &'a str,
        /// Remainder after the last `/`
        name: &'a str,
        /// Full trimmed query, matched against entry paths
        prefix: &'a str,
    },
}

impl<'a> PathQuery<'a> {
    /// Classifies a query
    ///
    /// The query is trimmed first. Leading `/` is not checked here; that is the
    /// job of request validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use dfs_path::{NameCharset, PathQuery};
    ///
    /// let charset = NameCharset::default();
    ///
    /// let query = PathQuery::parse(" /data/logs/ ", &charset).unwrap();
    /// assert_eq!(query, PathQuery::Listing { dir: "/data/logs/" });
    ///
    /// let query = PathQuery::parse("/data/logs/app", &charset).unwrap();
    /// assert_eq!(query.browse_path(), "/data/logs/");
    /// assert_eq!(query.prefix(), Some("/data/logs/app"));
    ///
    /// assert!(PathQuery::parse("/weird#name", &charset).is_err());
    /// ```
    pub fn parse(query: &'a str, charset: &NameCharset) -> Result<Self, PathError> {
        let query = query.trim();

        if query.ends_with('/') {
            return Ok(PathQuery::Listing { dir: query });
        }

        let split = query
            .rfind('/')
            .ok_or_else(|| PathError::MissingSeparator(query.to_string()))?;
        let (parent, name) = query.split_at(split + 1);

        if let Some(ch) = name.chars().find(|ch| !charset.contains(*ch)) {
            return Err(PathError::InvalidNameChar {
                query: query.to_string(),
                ch,
            });
        }

        Ok(PathQuery::Prefix {
            parent,
            name,
            prefix: query,
        })
    }

    /// Directory that has to be browsed to answer this query
    pub fn browse_path(&self) -> &'a str {
        match self {
            PathQuery::Listing { dir } => dir,
            PathQuery::Prefix { parent, .. } => parent,
        }
    }

    /// Prefix to filter entries by, if any
    pub fn prefix(&self) -> Option<&'a str> {
        match self {
            PathQuery::Listing { .. } => None,
            PathQuery::Prefix { prefix, .. } => Some(prefix),
        }
    }

    /// Returns true if this query lists a directory unfiltered
    pub fn is_listing(&self) -> bool {
        matches!(self, PathQuery::Listing { .. })
    }
}
