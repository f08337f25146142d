//! Translation configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// What the include-path collector emits for a tree with no mapped members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyTreePolicy {
    /// Emit the root's empty path as the only entry
    #[default]
    EmitRootPath,
    /// Emit nothing
    Skip,
}

/// Settings shared by the translator and the include-path collector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// Maximum nesting of member configurations below the root
    pub max_depth: usize,
    /// Include-path output for an empty tree
    pub empty_tree: EmptyTreePolicy,
}

impl MappingConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With nesting limit
    #[inline]
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// With empty-tree policy
    #[inline]
    #[must_use]
    pub fn with_empty_tree(mut self, policy: EmptyTreePolicy) -> Self {
        self.empty_tree = policy;
        self
    }

    /// Parse from TOML; missing keys take their defaults
    ///
    /// ```toml
    /// max_depth = 16
    /// empty_tree = "skip"
    /// ```
    ///
    /// # Errors
    /// - [`ConfigError::Parse`] on malformed TOML or unknown values
    /// - [`ConfigError::Invalid`] if `max_depth` is zero
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check config invariants
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] if `max_depth` is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            max_depth: 64,
            empty_tree: EmptyTreePolicy::EmitRootPath,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = MappingConfig::new();
        assert_eq!(config.max_depth, 64);
        assert_eq!(config.empty_tree, EmptyTreePolicy::EmitRootPath);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_methods() {
        let config = MappingConfig::new()
            .with_max_depth(3)
            .with_empty_tree(EmptyTreePolicy::Skip);
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.empty_tree, EmptyTreePolicy::Skip);
    }

    #[test]
    fn from_toml_full() {
        let config = MappingConfig::from_toml_str("max_depth = 16\nempty_tree = \"skip\"\n").unwrap();
        assert_eq!(config, MappingConfig::new().with_max_depth(16).with_empty_tree(EmptyTreePolicy::Skip));
    }

    #[test]
    fn from_toml_partial_uses_defaults() {
        let config = MappingConfig::from_toml_str("max_depth = 8").unwrap();
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.empty_tree, EmptyTreePolicy::EmitRootPath);

        let config = MappingConfig::from_toml_str("").unwrap();
        assert_eq!(config, MappingConfig::default());
    }

    #[test]
    fn from_toml_rejects_zero_depth() {
        let err = MappingConfig::from_toml_str("max_depth = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn from_toml_rejects_unknown_policy() {
        let err = MappingConfig::from_toml_str("empty_tree = \"sometimes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
