//! Error types for clausekit

use thiserror::Error;

/// Result type alias for clausekit operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors surfaced by the database handle.
///
/// The builders themselves never fail; every variant here comes from
/// configuration, the executor, or opt-in validation.
#[derive(Debug, Error)]
pub enum QueryError {
    /// No data source was configured
    #[error("No database configured -- please specify a data source")]
    NotConfigured,

    /// Data source string could not be split into dialect and connection
    #[error("Invalid data source '{0}': expected '<dialect>://<connection>'")]
    InvalidDataSource(String),

    /// Dialect tag is not one of the supported backends
    #[error("Unknown SQL dialect: {0}")]
    UnknownDialect(String),

    /// Placeholder count in the rendered SQL disagrees with the argument list
    #[error("Placeholder mismatch: SQL has {placeholders} '?', but {args} arguments provided")]
    PlaceholderMismatch { placeholders: usize, args: usize },

    /// Query execution error reported by PostgreSQL
    #[cfg(feature = "postgres")]
    #[error("Query error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    /// Query execution error reported by any other executor
    #[error("Execution error: {0}")]
    Execution(String),

    /// Query timeout error
    #[error("Query timeout after {0:?}")]
    Timeout(std::time::Duration),

    /// Argument value could not be bound to its parameter
    #[error("Bind error: {0}")]
    Bind(String),
}

impl QueryError {
    /// Create an execution error
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution(message.into())
    }

    /// Create a bind error
    pub fn bind(message: impl Into<String>) -> Self {
        Self::Bind(message.into())
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Check if this is a placeholder mismatch error
    pub fn is_placeholder_mismatch(&self) -> bool {
        matches!(self, Self::PlaceholderMismatch { .. })
    }
}
