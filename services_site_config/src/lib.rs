//! # Site Configuration Service
//!
//! Per-site application configuration for the path resolver.
//!
//! ## Philosophy
//!
//! - **Looked up, not held**: Configuration is fetched per request and
//!   discarded afterwards, so edits between requests take effect immediately
//! - **Keyed by site and application**: One entity per `(site, app_type)` pair
//! - **Scalars only**: Filesystem clients consume flat string settings; nested
//!   values are rejected rather than stringified
//!
//! ## Example
//!
//! ```
//! use services_site_config::{ApplicationEntity, ApplicationRegistry, ConfigProvider, SiteConfig};
//!
//! let mut registry = ApplicationRegistry::new();
//! registry.register(
//!     ApplicationEntity::new("sandbox", "HdfsAuditLogApplication")
//!         .with_value("fs.defaultFS", "hdfs://sandbox:8020"),
//! );
//!
//! let raw = registry.get_config("sandbox", "HdfsAuditLogApplication").unwrap();
//! let config = SiteConfig::from_raw(&raw).unwrap();
//! assert_eq!(config.get("fs.defaultFS"), Some("hdfs://sandbox:8020"));
//! ```

pub mod persistence;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Configuration as stored for an application, before coercion
pub type RawConfig = BTreeMap<String, Value>;

/// Errors that can occur while looking up or coercing configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No application entity for the site and type
    #[error("No {app_type} configuration for site {site}")]
    NotFound { site: String, app_type: String },

    /// A value is not a scalar
    #[error("Configuration value for {key} is {kind}, expected a scalar")]
    InvalidValue { key: String, kind: &'static str },
}

/// Flat string configuration handed to filesystem clients
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SiteConfig {
    values: BTreeMap<String, String>,
}

impl SiteConfig {
    /// Creates an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Coerces raw application configuration into string settings
    ///
    /// Strings are taken as-is; numbers and booleans use their JSON text.
    /// `null`, arrays and objects are rejected.
    pub fn from_raw(raw: &RawConfig) -> Result<Self, ConfigError> {
        let mut values = BTreeMap::new();
        for (key, value) in raw {
            let coerced = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => return Err(invalid(key, "null")),
                Value::Array(_) => return Err(invalid(key, "an array")),
                Value::Object(_) => return Err(invalid(key, "an object")),
            };
            values.insert(key.clone(), coerced);
        }
        Ok(Self { values })
    }

    /// Sets a value
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Gets a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Iterates over key/value pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of settings
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no settings
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn invalid(key: &str, kind: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        kind,
    }
}

/// An application installed on a site, with its configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationEntity {
    /// Site the application is installed on
    pub site_id: String,
    /// Application type
    pub app_type: String,
    /// Raw configuration values
    #[serde(default)]
    pub configuration: RawConfig,
}

impl ApplicationEntity {
    /// Creates an entity with no configuration
    pub fn new(site_id: impl Into<String>, app_type: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
            app_type: app_type.into(),
            configuration: RawConfig::new(),
        }
    }

    /// Adds a configuration value
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.configuration.insert(key.into(), value.into());
        self
    }
}

/// Source of application configuration
pub trait ConfigProvider {
    /// Returns the configuration of `app_type` on `site`
    fn get_config(&self, site: &str, app_type: &str) -> Result<RawConfig, ConfigError>;
}

impl<T: ConfigProvider + ?Sized> ConfigProvider for &T {
    fn get_config(&self, site: &str, app_type: &str) -> Result<RawConfig, ConfigError> {
        (**self).get_config(site, app_type)
    }
}

impl<T: ConfigProvider + ?Sized> ConfigProvider for std::sync::Arc<T> {
    fn get_config(&self, site: &str, app_type: &str) -> Result<RawConfig, ConfigError> {
        (**self).get_config(site, app_type)
    }
}

/// In-memory registry of application entities
#[derive(Debug, Clone, Default)]
pub struct ApplicationRegistry {
    entities: BTreeMap<(String, String), ApplicationEntity>,
}

impl ApplicationRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an entity, replacing any previous one for the same pair
    ///
    /// Returns the replaced entity.
    pub fn register(&mut self, entity: ApplicationEntity) -> Option<ApplicationEntity> {
        let key = (entity.site_id.clone(), entity.app_type.clone());
        self.entities.insert(key, entity)
    }

    /// Removes the entity for a pair
    pub fn remove(&mut self, site: &str, app_type: &str) -> Option<ApplicationEntity> {
        self.entities
            .remove(&(site.to_string(), app_type.to_string()))
    }

    /// Gets the entity for a pair
    pub fn get(&self, site: &str, app_type: &str) -> Option<&ApplicationEntity> {
        self.entities.get(&(site.to_string(), app_type.to_string()))
    }

    /// Iterates over all entities, ordered by site then type
    pub fn iter(&self) -> impl Iterator<Item = &ApplicationEntity> {
        self.entities.values()
    }

    /// Number of registered entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl ConfigProvider for ApplicationRegistry {
    fn get_config(&self, site: &str, app_type: &str) -> Result<RawConfig, ConfigError> {
        self.get(site, app_type)
            .map(|entity| entity.configuration.clone())
            .ok_or_else(|| ConfigError::NotFound {
                site: site.to_string(),
                app_type: app_type.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const APP: &str = "HdfsAuditLogApplication";

    #[test]
    fn test_coerce_scalars() {
        let mut raw = RawConfig::new();
        raw.insert("fs.defaultFS".to_string(), json!("hdfs://sandbox:8020"));
        raw.insert("dfs.replication".to_string(), json!(3));
        raw.insert("hadoop.security.authorization".to_string(), json!(false));

        let config = SiteConfig::from_raw(&raw).unwrap();
        assert_eq!(config.len(), 3);
        assert_eq!(config.get("fs.defaultFS"), Some("hdfs://sandbox:8020"));
        assert_eq!(config.get("dfs.replication"), Some("3"));
        assert_eq!(config.get("hadoop.security.authorization"), Some("false"));
    }

    #[test]
    fn test_coerce_rejects_nested_values() {
        let mut raw = RawConfig::new();
        raw.insert("hosts".to_string(), json!(["a", "b"]));
        assert_eq!(
            SiteConfig::from_raw(&raw),
            Err(ConfigError::InvalidValue {
                key: "hosts".to_string(),
                kind: "an array",
            })
        );

        let mut raw = RawConfig::new();
        raw.insert("ha".to_string(), json!({"nn1": "a"}));
        assert!(SiteConfig::from_raw(&raw).is_err());

        let mut raw = RawConfig::new();
        raw.insert("unset".to_string(), Value::Null);
        assert!(SiteConfig::from_raw(&raw).is_err());
    }

    #[test]
    fn test_empty_config() {
        let config = SiteConfig::from_raw(&RawConfig::new()).unwrap();
        assert!(config.is_empty());
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = ApplicationRegistry::new();
        registry.register(ApplicationEntity::new("sandbox", APP).with_value("k", "v"));

        let raw = registry.get_config("sandbox", APP).unwrap();
        assert_eq!(raw.get("k"), Some(&json!("v")));
    }

    #[test]
    fn test_registry_not_found() {
        let registry = ApplicationRegistry::new();
        assert_eq!(
            registry.get_config("sandbox", APP),
            Err(ConfigError::NotFound {
                site: "sandbox".to_string(),
                app_type: APP.to_string(),
            })
        );
    }

    #[test]
    fn test_registry_keyed_by_type() {
        let mut registry = ApplicationRegistry::new();
        registry.register(ApplicationEntity::new("sandbox", "OtherApplication"));
        assert!(registry.get_config("sandbox", APP).is_err());
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = ApplicationRegistry::new();
        registry.register(ApplicationEntity::new("sandbox", APP).with_value("k", "old"));
        let previous = registry.register(ApplicationEntity::new("sandbox", APP).with_value("k", "new"));

        assert!(previous.is_some());
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get_config("sandbox", APP).unwrap().get("k"),
            Some(&json!("new"))
        );
    }

    #[test]
    fn test_remove() {
        let mut registry = ApplicationRegistry::new();
        registry.register(ApplicationEntity::new("sandbox", APP));
        assert!(registry.remove("sandbox", APP).is_some());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_lookup_returns_independent_copy() {
        let mut registry = ApplicationRegistry::new();
        registry.register(ApplicationEntity::new("sandbox", APP).with_value("k", "v"));

        let mut raw = registry.get_config("sandbox", APP).unwrap();
        raw.insert("k".to_string(), json!("changed"));

        assert_eq!(
            registry.get_config("sandbox", APP).unwrap().get("k"),
            Some(&json!("v"))
        );
    }
}
