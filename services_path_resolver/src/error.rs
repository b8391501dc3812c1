//! Resolver errors

use dfs_path::{PathError, RequestError};
use services_dfs_browser::RemoteAccessError;
use services_site_config::ConfigError;
use thiserror::Error;

/// Errors returned by the path resolver
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Request or query does not have the expected shape
    #[error("Bad request format: {0}")]
    BadRequestFormat(#[from] RequestError),

    /// Site configuration missing or malformed
    #[error("Configuration lookup failed: {0}")]
    ConfigLookupFailure(#[from] ConfigError),

    /// Browser could not be built, or browsing failed
    #[error("Resolve failed: {0}")]
    ResolveFailure(#[from] RemoteAccessError),
}

impl ResolveError {
    /// Returns true if the caller can fix the request and try again
    pub fn is_bad_request(&self) -> bool {
        matches!(self, ResolveError::BadRequestFormat(_))
    }

    /// Fixed format hint, for bad requests
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ResolveError::BadRequestFormat(err) => Some(err.hint()),
            _ => None,
        }
    }
}

impl From<PathError> for ResolveError {
    fn from(err: PathError) -> Self {
        ResolveError::BadRequestFormat(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dfs_path::RESOLVE_FORMAT_HINT;

    #[test]
    fn test_bad_request_carries_hint() {
        let err: ResolveError = RequestError::MissingSite.into();
        assert!(err.is_bad_request());
        assert_eq!(err.hint(), Some(RESOLVE_FORMAT_HINT));
        assert!(err.to_string().contains(RESOLVE_FORMAT_HINT));
    }

    #[test]
    fn test_path_error_is_bad_request() {
        let err: ResolveError = PathError::MissingSeparator("x".to_string()).into();
        assert!(matches!(
            err,
            ResolveError::BadRequestFormat(RequestError::Query(_))
        ));
    }

    #[test]
    fn test_remote_error_wrapped() {
        let err: ResolveError = RemoteAccessError::NotFound("/x".to_string()).into();
        assert!(!err.is_bad_request());
        assert_eq!(err.hint(), None);
        assert_eq!(err.to_string(), "Resolve failed: Not found: /x");
    }

    #[test]
    fn test_config_error_wrapped() {
        let err: ResolveError = ConfigError::NotFound {
            site: "s".to_string(),
            app_type: "a".to_string(),
        }
        .into();
        assert!(matches!(err, ResolveError::ConfigLookupFailure(_)));
    }
}
