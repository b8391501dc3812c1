//! Resolve requests and their validation

use crate::path::PathError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hint returned whenever a request does not have the expected shape
pub const RESOLVE_FORMAT_HINT: &str =
    r#"Path resolve request must be {"site":"${site}", "query":"/dir/path"}"#;

/// Errors raised for requests that do not have the expected shape
///
/// Every variant displays [`RESOLVE_FORMAT_HINT`] followed by the defect.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// Site is absent or empty
    #[error("{}: missing site", RESOLVE_FORMAT_HINT)]
    MissingSite,

    /// Query is absent
    #[error("{}: missing query", RESOLVE_FORMAT_HINT)]
    MissingQuery,

    /// Query does not start with `/`
    #[error("{}: query {0:?} is not root-relative", RESOLVE_FORMAT_HINT)]
    RelativeQuery(String),

    /// Query could not be classified
    #[error("{}: {0}", RESOLVE_FORMAT_HINT)]
    Query(#[from] PathError),

    /// Request body is not valid JSON
    #[error("{}: {0}", RESOLVE_FORMAT_HINT)]
    Malformed(String),
}

impl RequestError {
    /// The fixed, human-readable format hint
    pub fn hint(&self) -> &'static str {
        RESOLVE_FORMAT_HINT
    }
}

/// A request to resolve a path query for a site
///
/// Mirrors the `{"site": ..., "query": ...}` wire shape. Both fields are
/// optional on the wire so that absence is reported as a format error
/// instead of a decoding failure.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolveRequest {
    /// Site whose filesystem is browsed
    #[serde(default)]
    pub site: Option<String>,
    /// Path query
    #[serde(default)]
    pub query: Option<String>,
}

impl ResolveRequest {
    /// Creates a request with both fields set
    pub fn new(site: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            site: Some(site.into()),
            query: Some(query.into()),
        }
    }

    /// Decodes a request from JSON bytes
    pub fn from_json(bytes: &[u8]) -> Result<Self, RequestError> {
        serde_json::from_slice(bytes).map_err(|e| RequestError::Malformed(e.to_string()))
    }

    /// Validates this request
    pub fn validate(&self) -> Result<(), RequestError> {
        validate(self.site.as_deref(), self.query.as_deref())
    }

    /// Returns `(site, query)` once the request is valid
    pub fn parts(&self) -> Result<(&str, &str), RequestError> {
        self.validate()?;
        match (self.site.as_deref(), self.query.as_deref()) {
            (Some(site), Some(query)) => Ok((site, query)),
            (None, _) => Err(RequestError::MissingSite),
            (_, None) => Err(RequestError::MissingQuery),
        }
    }
}

/// Checks the request shape
///
/// # Examples
///
/// ```
/// use dfs_path::{validate, RequestError};
///
/// assert!(validate(Some("sandbox"), Some("/data/logs")).is_ok());
/// assert_eq!(validate(None, Some("/data")), Err(RequestError::MissingSite));
/// assert!(matches!(
///     validate(Some("sandbox"), Some("data/logs")),
///     Err(RequestError::RelativeQuery(_))
/// ));
/// ```
pub fn validate(site: Option<&str>, query: Option<&str>) -> Result<(), RequestError> {
    match site {
        Some(site) if !site.is_empty() => {}
        _ => return Err(RequestError::MissingSite),
    }

    let query = query.ok_or(RequestError::MissingQuery)?;
    if !query.starts_with('/') {
        return Err(RequestError::RelativeQuery(query.to_string()));
    }

    Ok(())
}
