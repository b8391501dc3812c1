//! Path resolver implementation
//!
//! This module provides the service that classifies a query, browses the
//! directory it names and filters the listing.

use crate::error::ResolveError;
use dfs_path::{retain_prefix_or_all, validate, DirectoryEntry, NameCharset, PathQuery, ResolveRequest};
use services_dfs_browser::{BrowserFactory, DirectoryBrowser, RemoteAccessError};
use services_logger::{LogEntry, LogSink, TracingLogSink};
use services_site_config::{ConfigProvider, SiteConfig};
use std::sync::Arc;

/// Application type whose configuration describes a site's filesystem
pub const DFS_APPLICATION_TYPE: &str = "HdfsAuditLogApplication";

const LOG_SOURCE: &str = "path_resolver";

/// Tunables of the path resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Application type looked up for each site
    pub app_type: String,
    /// Characters allowed in the trailing name fragment of a query
    pub name_charset: NameCharset,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            app_type: DFS_APPLICATION_TYPE.to_string(),
            name_charset: NameCharset::default(),
        }
    }
}

/// A resolver of attribute values from requests of a given shape
///
/// Generic request dispatchers hold resolvers behind this trait: they call
/// `validate_request` first and only then `resolve_request`.
pub trait AttributeResolver {
    /// Resolved value type
    type Output;

    /// Checks the request shape without touching any backend
    fn validate_request(&self, request: &ResolveRequest) -> Result<(), ResolveError>;

    /// Resolves the request into candidate values
    fn resolve_request(&self, request: &ResolveRequest) -> Result<Vec<Self::Output>, ResolveError>;
}

/// Resolution of one query, before it is reduced to paths
struct Resolution {
    browsed: String,
    listing: bool,
    entries: Vec<DirectoryEntry>,
    fallback: bool,
}

/// The Path Resolver Service
///
/// Holds only the seams it resolves through; configuration and browser are
/// rebuilt on every call.
pub struct PathResolver<C, F> {
    provider: C,
    factory: F,
    options: ResolverOptions,
    log: Arc<dyn LogSink>,
}

impl<C, F> PathResolver<C, F>
where
    C: ConfigProvider,
    F: BrowserFactory,
{
    /// Creates a resolver logging through `tracing`
    pub fn new(provider: C, factory: F) -> Self {
        Self {
            provider,
            factory,
            options: ResolverOptions::default(),
            log: Arc::new(TracingLogSink),
        }
    }

    /// Replaces the resolver options
    pub fn with_options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the log sink
    pub fn with_log_sink(mut self, log: Arc<dyn LogSink>) -> Self {
        self.log = log;
        self
    }

    /// Current options
    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Checks that a site is given and the query is root-relative
    pub fn validate(&self, site: Option<&str>, query: Option<&str>) -> Result<(), ResolveError> {
        self.log.emit(
            LogEntry::debug("validating path resolve request")
                .with_source(LOG_SOURCE)
                .with_field("site", site.unwrap_or("")),
        );
        validate(site, query)?;
        self.log
            .emit(LogEntry::debug("path resolve request validated").with_source(LOG_SOURCE));
        Ok(())
    }

    /// Looks up the site's configuration and builds a fresh browser from it
    pub fn build_browser(&self, site: &str) -> Result<F::Browser, ResolveError> {
        let raw = self.provider.get_config(site, &self.options.app_type)?;
        let config = SiteConfig::from_raw(&raw)?;
        Ok(self.factory.new_browser(&config)?)
    }

    /// Resolves `query` against the filesystem of `site`
    ///
    /// Returns root-relative paths in listing order. A query ending in `/`
    /// lists that directory; any other query lists its parent and keeps the
    /// entries starting with the query, or all of them if none does.
    pub fn resolve(&self, site: &str, query: &str) -> Result<Vec<String>, ResolveError> {
        match self.try_resolve(site, query) {
            Ok(resolution) => {
                self.log.emit(
                    LogEntry::info("browsed directory")
                        .with_source(LOG_SOURCE)
                        .with_field("site", site)
                        .with_field("query", query)
                        .with_field("browsed", &resolution.browsed)
                        .with_field("listing", resolution.listing)
                        .with_field("count", resolution.entries.len())
                        .with_field("fallback", resolution.fallback),
                );
                Ok(resolution
                    .entries
                    .into_iter()
                    .map(DirectoryEntry::into_path)
                    .collect())
            }
            Err(err) => {
                self.log.emit(
                    LogEntry::error("path resolve failed")
                        .with_source(LOG_SOURCE)
                        .with_field("site", site)
                        .with_field("query", query)
                        .with_field("cause", &err),
                );
                Err(err)
            }
        }
    }

    fn try_resolve(&self, site: &str, query: &str) -> Result<Resolution, ResolveError> {
        let query = PathQuery::parse(query, &self.options.name_charset)?;
        let browser = self.build_browser(site)?;
        let listing = browser
            .browse(query.browse_path())?
            .into_iter()
            .map(root_relative)
            .collect::<Result<Vec<_>, _>>()?;

        let (entries, fallback) = match query.prefix() {
            None => (listing, false),
            Some(prefix) => {
                let matched = retain_prefix_or_all(listing, prefix);
                (matched.entries, matched.fallback)
            }
        };

        Ok(Resolution {
            browsed: query.browse_path().to_string(),
            listing: query.is_listing(),
            entries,
            fallback,
        })
    }
}

/// Strips scheme and authority from a listed entry
fn root_relative(entry: DirectoryEntry) -> Result<DirectoryEntry, RemoteAccessError> {
    let location = entry.path().to_string();
    entry.into_root_relative().ok_or_else(|| RemoteAccessError::Io {
        path: location,
        message: "listed entry is neither root-relative nor a URI".to_string(),
    })
}

impl<C, F> AttributeResolver for PathResolver<C, F>
where
    C: ConfigProvider,
    F: BrowserFactory,
{
    type Output = String;

    fn validate_request(&self, request: &ResolveRequest) -> Result<(), ResolveError> {
        self.validate(request.site.as_deref(), request.query.as_deref())
    }

    fn resolve_request(&self, request: &ResolveRequest) -> Result<Vec<String>, ResolveError> {
        let (site, query) = request.parts()?;
        self.resolve(site, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use services_dfs_browser::{MemoryBrowserFactory, MemoryNamespace, DEFAULT_FS_KEY};
    use services_logger::{LogLevel, MemoryLogSink};
    use services_site_config::{ApplicationEntity, ApplicationRegistry};

    fn resolver(sink: Arc<MemoryLogSink>) -> PathResolver<ApplicationRegistry, MemoryBrowserFactory> {
        let mut ns = MemoryNamespace::new();
        ns.mkdir("/data/logs/app1").unwrap();
        ns.mkdir("/data/logs/other").unwrap();

        let mut registry = ApplicationRegistry::new();
        registry.register(
            ApplicationEntity::new("sandbox", DFS_APPLICATION_TYPE)
                .with_value(DEFAULT_FS_KEY, "memory://sandbox"),
        );

        PathResolver::new(registry, MemoryBrowserFactory::new().with_cluster("sandbox", ns))
            .with_log_sink(sink)
    }

    #[test]
    fn test_default_options() {
        let options = ResolverOptions::default();
        assert_eq!(options.app_type, DFS_APPLICATION_TYPE);
        assert!(options.name_charset.extra().is_empty());
    }

    #[test]
    fn test_success_is_logged_with_count() {
        let sink = Arc::new(MemoryLogSink::new());
        let resolver = resolver(Arc::clone(&sink));

        resolver.resolve("sandbox", "/data/logs/zzz").unwrap();

        let info = sink.at_level(LogLevel::Info);
        assert_eq!(info.len(), 1);
        assert_eq!(info[0].source, Some(LOG_SOURCE));
        assert_eq!(info[0].field("browsed"), Some("/data/logs/"));
        assert_eq!(info[0].field("listing"), Some("false"));
        assert_eq!(info[0].field("count"), Some("2"));
        assert_eq!(info[0].field("fallback"), Some("true"));
    }

    #[test]
    fn test_failure_is_logged_with_cause() {
        let sink = Arc::new(MemoryLogSink::new());
        let resolver = resolver(Arc::clone(&sink));

        let err = resolver.resolve("sandbox", "/missing/").unwrap_err();

        let errors = sink.at_level(LogLevel::Error);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field("cause"), Some(err.to_string().as_str()));
    }

    #[test]
    fn test_validate_logs_at_debug() {
        let sink = Arc::new(MemoryLogSink::new());
        let resolver = resolver(Arc::clone(&sink));

        resolver.validate(Some("sandbox"), Some("/data")).unwrap();
        assert_eq!(sink.at_level(LogLevel::Debug).len(), 2);
    }

    #[test]
    fn test_build_browser_unknown_site() {
        let resolver = resolver(Arc::new(MemoryLogSink::new()));
        assert!(matches!(
            resolver.build_browser("prod"),
            Err(ResolveError::ConfigLookupFailure(_))
        ));
    }

    #[test]
    fn test_custom_app_type() {
        let resolver = resolver(Arc::new(MemoryLogSink::new())).with_options(ResolverOptions {
            app_type: "OtherApplication".to_string(),
            ..ResolverOptions::default()
        });
        assert!(matches!(
            resolver.resolve("sandbox", "/data/"),
            Err(ResolveError::ConfigLookupFailure(_))
        ));
    }
}
