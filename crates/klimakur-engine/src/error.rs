//! Error types for the engine
//!
//! The computation core itself is total. Errors only arise at the edges:
//! - Mutation boundary (rejecting invalid parameter values)
//! - Token decoding (reported internally, swallowed by [`crate::codec::decode`])
//! - Persistence collaborators (swallowed by [`crate::persistence`])
//! - Configuration loading

use std::path::PathBuf;

/// Errors raised when a parameter mutation is rejected
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamError {
    /// Value is NaN or infinite
    #[error("{field} must be a finite number, got {value}")]
    NonFinite {
        /// Field being set
        field: &'static str,
        /// Rejected value
        value: f64,
    },

    /// Override targets a title that is not in the catalog
    #[error("no measure titled '{0}'")]
    UnknownMeasure(String),
}

impl ParamError {
    /// Create non-finite error for a field
    pub fn non_finite(field: &'static str, value: f64) -> Self {
        Self::NonFinite { field, value }
    }
}

/// Errors decoding a shareable-state token
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Token is empty after trimming
    #[error("empty state token")]
    Empty,

    /// Token is not valid URL-safe base64
    #[error("invalid token encoding: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decoded payload is not a valid state document
    #[error("invalid token payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Errors from persistence and clipboard collaborators
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Backing storage cannot be used
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Write rejected because storage is full
    #[error("storage quota exceeded")]
    QuotaExceeded,

    /// Sink refused the operation (e.g. clipboard permission denied)
    #[error("access denied: {0}")]
    Denied(String),

    /// IO error in a file-backed store
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored document could not be (de)serialized
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors loading engine configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("io error reading {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// TOML syntax or schema error
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Value out of range
    #[error("invalid config value: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Combined engine error
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Rejected parameter mutation
    #[error("parameter error: {0}")]
    Param(#[from] ParamError),

    /// Token decoding failed
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Storage collaborator failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration could not be loaded
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
