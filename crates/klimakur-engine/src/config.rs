//! Engine configuration
//!
//! Loaded from TOML; every field has a default so an empty document is a
//! valid configuration.

use crate::error::ConfigError;
use crate::params::{StoreDefaults, DEFAULT_UNKNOWN_COST};
use klimakur_catalog::{TargetKey, DEFAULT_DOCUMENT_BASE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the target gap is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GapMode {
    /// Selected potential measured against current emissions
    Simple,
    /// Selected potential stacked on top of the reference trajectory
    #[default]
    BaselineDecomposition,
}

/// Configuration for a [`crate::Dashboard`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Gap analysis variant
    pub gap_mode: GapMode,
    /// Unit cost applied to unknown-cost measures in a fresh store
    pub default_unknown_cost: f64,
    /// Target selected in a fresh store
    pub default_target: TargetKey,
    /// Number of memoized views; 0 disables caching
    pub cache_capacity: u64,
    /// Base address for measure documents
    pub document_base_url: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gap_mode: GapMode::default(),
            default_unknown_cost: DEFAULT_UNKNOWN_COST,
            default_target: TargetKey::default(),
            cache_capacity: 64,
            document_base_url: DEFAULT_DOCUMENT_BASE.to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document
    ///
    /// # Errors
    /// [`ConfigError::Parse`] on syntax errors or unknown keys,
    /// [`ConfigError::Invalid`] on out-of-range values.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`EngineConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        Self::from_toml_str(&source)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// [`ConfigError::Invalid`] describing the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_unknown_cost.is_finite() || self.default_unknown_cost < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "default_unknown_cost must be a non-negative number, got {}",
                self.default_unknown_cost
            )));
        }
        if self.document_base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("document_base_url must not be empty".to_string()));
        }
        Ok(())
    }

    /// Store defaults derived from this configuration
    #[must_use]
    pub fn store_defaults(&self) -> StoreDefaults {
        StoreDefaults {
            default_unknown_cost: self.default_unknown_cost,
            target: self.default_target,
        }
    }

    /// Set gap mode
    #[must_use]
    pub fn with_gap_mode(mut self, mode: GapMode) -> Self {
        self.gap_mode = mode;
        self
    }

    /// Set default unknown cost
    #[must_use]
    pub fn with_default_unknown_cost(mut self, cost: f64) -> Self {
        self.default_unknown_cost = cost;
        self
    }

    /// Set default target
    #[must_use]
    pub fn with_default_target(mut self, target: TargetKey) -> Self {
        self.default_target = target;
        self
    }

    /// Set cache capacity
    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Set document base address
    #[must_use]
    pub fn with_document_base_url(mut self, url: impl Into<String>) -> Self {
        self.document_base_url = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_is_default() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.gap_mode, GapMode::BaselineDecomposition);
        assert_eq!(config.cache_capacity, 64);
    }

    #[test]
    fn parses_all_fields() {
        let config = EngineConfig::from_toml_str(
            r#"
gap_mode = "simple"
default_unknown_cost = 2000.0
default_target = "cut55_2030"
cache_capacity = 0
document_base_url = "https://example.org"
"#,
        )
        .unwrap();
        assert_eq!(config.gap_mode, GapMode::Simple);
        assert_eq!(config.default_unknown_cost, 2000.0);
        assert_eq!(config.default_target, TargetKey::Cut55By2030);
        assert_eq!(config.cache_capacity, 0);
        assert_eq!(config.document_base_url, "https://example.org");
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = EngineConfig::from_toml_str("gap = \"simple\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_negative_default_cost() {
        let err = EngineConfig::from_toml_str("default_unknown_cost = -1.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cache_capacity = 8").unwrap();
        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.cache_capacity, 8);
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = EngineConfig::load("/nonexistent/klimakur.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/klimakur.toml"));
    }

    #[test]
    fn builder_and_store_defaults() {
        let config = EngineConfig::default()
            .with_default_unknown_cost(1800.0)
            .with_default_target(TargetKey::Cut90By2050);
        let defaults = config.store_defaults();
        assert_eq!(defaults.default_unknown_cost, 1800.0);
        assert_eq!(defaults.target, TargetKey::Cut90By2050);
    }
}
