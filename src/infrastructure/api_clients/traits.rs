//! Traits for vulnerability API clients

use async_trait::async_trait;

use crate::domain::{QueryError, Vulnerability};

/// Trait for vulnerability database clients.
///
/// One call queries the database for a single `{name, version}` pair; an
/// empty result means no known vulnerability. Exactly one attempt is made
/// per call; retry policy, if any, belongs to the caller.
#[async_trait]
pub trait VulnerabilityApiClient: Send + Sync {
    async fn query_vulnerabilities(
        &self,
        name: &str,
        version: &str,
    ) -> Result<Vec<Vulnerability>, QueryError>;
}

impl From<reqwest::Error> for QueryError {
    fn from(error: reqwest::Error) -> Self {
        QueryError::Network {
            message: error.to_string(),
        }
    }
}
