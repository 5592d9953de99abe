//! Error types for Wadsworth

use thiserror::Error;

/// The main error type for Wadsworth operations
#[derive(Error, Debug)]
pub enum Error {
    /// No statement kind has been set, or substitution produced nothing
    #[error("no query to render")]
    NoQuery,

    /// The statement kind is not implemented by the dispatching grammar
    #[error("unsupported query type")]
    UnsupportedQueryType,

    /// A read returned zero rows
    #[error("query returned no results")]
    NoResults,

    /// Invalid query configuration
    #[error("invalid query: {message}")]
    InvalidQuery { message: String },

    /// Failure reported by the database backend
    #[error("backend error: {message}")]
    Backend { message: String },

    /// Row decoding error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience Result type for Wadsworth operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new invalid query error
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            message: message.into(),
        }
    }

    /// Create a new backend error
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// True for failures produced while rendering, as opposed to executing.
    pub(crate) fn is_render_failure(&self) -> bool {
        matches!(
            self,
            Error::NoQuery | Error::UnsupportedQueryType | Error::InvalidQuery { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_query_error() {
        let err = Error::invalid_query("missing table");
        assert!(matches!(err, Error::InvalidQuery { .. }));
        assert_eq!(err.to_string(), "invalid query: missing table");
    }

    #[test]
    fn test_backend_error() {
        let err = Error::backend("connection refused");
        assert!(matches!(err, Error::Backend { .. }));
        assert_eq!(err.to_string(), "backend error: connection refused");
    }

    #[test]
    fn test_render_failure_classification() {
        assert!(Error::NoQuery.is_render_failure());
        assert!(Error::UnsupportedQueryType.is_render_failure());
        assert!(Error::invalid_query("x").is_render_failure());
        assert!(!Error::NoResults.is_render_failure());
        assert!(!Error::backend("x").is_render_failure());
    }
}
