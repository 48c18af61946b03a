//! Error types for catalog construction and lookups

/// Errors raised while building or querying catalog reference data
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    /// Potential is negative or not a finite number
    #[error("invalid potential for '{title}': {value}")]
    InvalidPotential {
        /// Measure title
        title: String,
        /// Rejected value
        value: f64,
    },

    /// Known unit cost is negative or not a finite number
    #[error("invalid unit cost for '{title}': {value}")]
    InvalidCost {
        /// Measure title
        title: String,
        /// Rejected value
        value: f64,
    },

    /// Title is empty after trimming
    #[error("measure title cannot be empty")]
    EmptyTitle,

    /// Category label or key not recognised
    #[error("unknown category: '{0}'")]
    UnknownCategory(String),

    /// Target scenario key not recognised
    #[error("unknown target scenario: '{0}'")]
    UnknownTarget(String),
}

impl CatalogError {
    /// Create invalid potential error
    pub fn invalid_potential(title: impl Into<String>, value: f64) -> Self {
        Self::InvalidPotential {
            title: title.into(),
            value,
        }
    }

    /// Create invalid cost error
    pub fn invalid_cost(title: impl Into<String>, value: f64) -> Self {
        Self::InvalidCost {
            title: title.into(),
            value,
        }
    }
}

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
