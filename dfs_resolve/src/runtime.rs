//! # Host Runtime
//!
//! Loads the site registry, builds a resolver over local-disk browsers and
//! answers a single request.

use dfs_path::{NameCharset, ResolveRequest};
use services_dfs_browser::LocalBrowserFactory;
use services_path_resolver::{AttributeResolver, PathResolver, ResolveError, ResolverOptions};
use services_site_config::persistence::{load_registry, PersistenceError};
use services_site_config::ApplicationRegistry;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Host runtime error types
#[derive(Debug, Error)]
pub enum ResolveHostError {
    #[error("Failed to read registry {path}: {source}")]
    ReadRegistry {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Registry error: {0}")]
    Registry(#[from] PersistenceError),

    #[error("{0}")]
    Resolve(#[from] ResolveError),
}

/// Host runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveHostConfig {
    /// JSON site registry
    pub registry_path: PathBuf,
    /// Request to answer
    pub request: ResolveRequest,
    /// Application type override
    pub app_type: Option<String>,
    /// Characters allowed in name fragments beyond word and whitespace
    pub extra_name_chars: Vec<char>,
}

impl ResolveHostConfig {
    fn resolver_options(&self) -> ResolverOptions {
        let defaults = ResolverOptions::default();
        ResolverOptions {
            app_type: self.app_type.clone().unwrap_or(defaults.app_type),
            name_charset: NameCharset::default().with_extra(self.extra_name_chars.iter().copied()),
        }
    }
}

/// Host runtime
pub struct ResolveHost {
    config: ResolveHostConfig,
    resolver: PathResolver<ApplicationRegistry, LocalBrowserFactory>,
}

impl ResolveHost {
    /// Loads the registry and prepares the resolver
    pub fn new(config: ResolveHostConfig) -> Result<Self, ResolveHostError> {
        let bytes = fs::read(&config.registry_path).map_err(|source| ResolveHostError::ReadRegistry {
            path: config.registry_path.clone(),
            source,
        })?;
        let registry = load_registry(&bytes)?;
        let resolver =
            PathResolver::new(registry, LocalBrowserFactory).with_options(config.resolver_options());

        Ok(Self { config, resolver })
    }

    /// Validates and resolves the configured request
    pub fn run(&self) -> Result<Vec<String>, ResolveHostError> {
        self.resolver.validate_request(&self.config.request)?;
        Ok(self.resolver.resolve_request(&self.config.request)?)
    }
}
