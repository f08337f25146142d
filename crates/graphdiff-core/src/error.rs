//! Error types for mapping translation
//!
//! - Translation failures ([`MappingError`])
//! - Configuration loading failures ([`ConfigError`])

/// Errors raised while translating a mapping expression
///
/// Every variant signals a misdeclared mapping. Translation aborts on the
/// first one and never returns a partial tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    /// Call does not name one of the four marker operations
    #[error("the method '{method}' used in the update mapping is not supported")]
    UnsupportedOperation { method: String },

    /// Expression shape the translator cannot interpret
    #[error("malformed mapping expression: {0}")]
    MalformedExpression(String),

    /// Nested configuration deeper than the configured limit
    #[error("mapping nests deeper than {limit} levels")]
    DepthExceeded { limit: usize },
}

impl MappingError {
    /// Create unsupported operation error
    pub fn unsupported(method: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            method: method.into(),
        }
    }

    /// Create malformed expression error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedExpression(message.into())
    }
}

/// Errors raised while loading a [`MappingConfig`](crate::MappingConfig)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML could not be parsed into a config
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Parsed values violate a config invariant
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Result type alias for translation
pub type MappingResult<T> = Result<T, MappingError>;
