//! Error types for store operations.

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Error type for store operations.
///
/// `Unavailable` and `MalformedSchema` are degradable: the service layer
/// treats the affected tier as empty and keeps going. `Configuration` and
/// `Internal` surface at startup or as 500s at the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A tier table or the raw directory cannot be opened or read.
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// Reading or filtering a table failed mid-query.
    #[error("query error: {0}")]
    Query(String),

    /// A table is readable but its schema lacks an expected column or the
    /// column cannot be decoded.
    #[error("malformed schema: {0}")]
    MalformedSchema(String),

    /// Configuration or initialization error.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<polars::error::PolarsError> for StoreError {
    fn from(e: polars::error::PolarsError) -> Self {
        StoreError::Query(e.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

impl From<String> for StoreError {
    fn from(s: String) -> Self {
        StoreError::Internal(s)
    }
}
