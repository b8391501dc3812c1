//! Registry persistence layer
//!
//! This module handles loading application registries from JSON.

use crate::{ApplicationEntity, ApplicationRegistry};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Serializable container for an application registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryData {
    /// Version of the registry format
    pub version: u32,
    /// Registered applications
    #[serde(default)]
    pub applications: Vec<ApplicationEntity>,
}

impl RegistryData {
    /// Current version of the registry format
    pub const CURRENT_VERSION: u32 = 1;

    /// Creates empty registry data
    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            applications: Vec::new(),
        }
    }

    /// Builds a registry, rejecting duplicate `(site, app_type)` pairs
    pub fn into_registry(self) -> PersistenceResult<ApplicationRegistry> {
        let mut registry = ApplicationRegistry::new();
        for entity in self.applications {
            let (site, app_type) = (entity.site_id.clone(), entity.app_type.clone());
            if registry.register(entity).is_some() {
                return Err(PersistenceError::DuplicateApplication { site, app_type });
            }
        }
        Ok(registry)
    }
}

impl Default for RegistryData {
    fn default() -> Self {
        Self::new()
    }
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Errors that can occur during persistence operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// Failed to deserialize the registry
    #[error("Failed to deserialize registry: {0}")]
    DeserializationFailed(String),

    /// Unsupported registry version
    #[error("Unsupported registry version: {0}")]
    UnsupportedVersion(u32),

    /// Two entries for the same site and application type
    #[error("Duplicate {app_type} application for site {site}")]
    DuplicateApplication { site: String, app_type: String },
}

/// Deserializes registry data from JSON bytes
pub fn deserialize_registry(bytes: &[u8]) -> PersistenceResult<RegistryData> {
    let data: RegistryData = serde_json::from_slice(bytes)
        .map_err(|e| PersistenceError::DeserializationFailed(e.to_string()))?;

    if data.version != RegistryData::CURRENT_VERSION {
        return Err(PersistenceError::UnsupportedVersion(data.version));
    }

    Ok(data)
}

/// Loads a registry from JSON bytes
pub fn load_registry(bytes: &[u8]) -> PersistenceResult<ApplicationRegistry> {
    deserialize_registry(bytes)?.into_registry()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigProvider;
    use serde_json::json;

    #[test]
    fn test_registry_data_creation() {
        let data = RegistryData::new();
        assert_eq!(data.version, RegistryData::CURRENT_VERSION);
        assert!(data.applications.is_empty());
    }

    #[test]
    fn test_load_registry() {
        let bytes = br#"{
            "version": 1,
            "applications": [
                {
                    "siteId": "sandbox",
                    "appType": "HdfsAuditLogApplication",
                    "configuration": { "fs.defaultFS": "hdfs://sandbox:8020", "dfs.replication": 3 }
                }
            ]
        }"#;

        let registry = load_registry(bytes).unwrap();
        let raw = registry
            .get_config("sandbox", "HdfsAuditLogApplication")
            .unwrap();
        assert_eq!(raw.get("dfs.replication"), Some(&json!(3)));
    }

    #[test]
    fn test_configuration_defaults_to_empty() {
        let bytes = br#"{"version":1,"applications":[{"siteId":"s","appType":"a"}]}"#;
        let registry = load_registry(bytes).unwrap();
        assert!(registry.get_config("s", "a").unwrap().is_empty());
    }

    #[test]
    fn test_loaded_registry_is_ordered_by_site() {
        let bytes = br#"{"version":1,"applications":[
            {"siteId":"zeta","appType":"A"},
            {"siteId":"alpha","appType":"A","configuration":{"k":"v"}}
        ]}"#;

        let registry = load_registry(bytes).unwrap();
        let sites: Vec<&str> = registry.iter().map(|a| a.site_id.as_str()).collect();
        assert_eq!(sites, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_unsupported_version() {
        let result = deserialize_registry(br#"{"version":99,"applications":[]}"#);
        assert_eq!(result, Err(PersistenceError::UnsupportedVersion(99)));
    }

    #[test]
    fn test_invalid_json() {
        let result = load_registry(b"not json");
        assert!(matches!(
            result,
            Err(PersistenceError::DeserializationFailed(_))
        ));
    }

    #[test]
    fn test_duplicate_application_rejected() {
        let bytes = br#"{"version":1,"applications":[
            {"siteId":"s","appType":"a"},
            {"siteId":"s","appType":"a"}
        ]}"#;
        assert_eq!(
            load_registry(bytes).unwrap_err(),
            PersistenceError::DuplicateApplication {
                site: "s".to_string(),
                app_type: "a".to_string(),
            }
        );
    }
}
