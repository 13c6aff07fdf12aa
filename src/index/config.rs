//! Index configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::standard::AnalyzerConfig;
use crate::error::{BoolSearchError, Result};
use crate::storage::StorageConfig;

/// Configuration for building and persisting an index.
///
/// Every field has a default, so a JSON file only needs the keys it
/// overrides:
///
/// ```
/// use boolsearch::index::IndexConfig;
///
/// let config: IndexConfig =
///     serde_json::from_str(r#"{"analyzer": {"remove_stop_words": true}}"#).unwrap();
/// assert!(config.analyzer.remove_stop_words);
/// assert_eq!(config.analyzer.min_token_length, 2);
/// assert_eq!(config.initial_capacity, 100);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Analysis pipeline options.
    pub analyzer: AnalyzerConfig,
    /// Number of terms to reserve room for up front.
    pub initial_capacity: usize,
    /// Options for the index file backend.
    pub storage: StorageConfig,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            analyzer: AnalyzerConfig::default(),
            initial_capacity: 100,
            storage: StorageConfig::default(),
        }
    }
}

impl IndexConfig {
    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            BoolSearchError::invalid_config(format!("cannot read {}: {e}", path.display()))
        })?;

        let config: IndexConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check option combinations that deserialize but cannot work.
    pub fn validate(&self) -> Result<()> {
        if self.analyzer.min_token_length == 0 {
            return Err(BoolSearchError::invalid_config(
                "analyzer.min_token_length must be at least 1",
            ));
        }
        if self.storage.buffer_size == 0 {
            return Err(BoolSearchError::invalid_config(
                "storage.buffer_size must be positive",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = IndexConfig::default();
        assert_eq!(config.analyzer.min_token_length, 2);
        assert!(config.analyzer.lowercase);
        assert!(!config.analyzer.remove_stop_words);
        assert_eq!(config.initial_capacity, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"initial_capacity": 8, "storage": {"sync_writes": true}}"#,
        )
        .unwrap();

        let config = IndexConfig::from_json_file(&path).unwrap();
        assert_eq!(config.initial_capacity, 8);
        assert!(config.storage.sync_writes);
        assert_eq!(config.storage.buffer_size, 65536);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{"analyzer": {"min_token_length": 0}}"#).unwrap();
        assert!(IndexConfig::from_json_file(&path).is_err());

        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            IndexConfig::from_json_file(&path),
            Err(BoolSearchError::Json(_))
        ));

        assert!(IndexConfig::from_json_file(temp_dir.path().join("missing.json")).is_err());
    }
}
