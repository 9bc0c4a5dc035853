//! Domain-specific error types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a single vulnerability query.
///
/// Recorded on the owning dependency result instead of being propagated, so
/// one failed query never affects the evaluation of sibling dependencies.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryError {
    #[error("network error: {message}")]
    Network { message: String },

    #[error("vulnerability database returned HTTP {status}: {message}")]
    Http { status: u16, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_display() {
        let network = QueryError::Network {
            message: "connection refused".to_string(),
        };
        assert_eq!(network.to_string(), "network error: connection refused");

        let http = QueryError::Http {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert_eq!(
            http.to_string(),
            "vulnerability database returned HTTP 500: Internal Server Error"
        );
    }
}
