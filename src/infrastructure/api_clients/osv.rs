//! OSV API client implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::traits::VulnerabilityApiClient;
use crate::config::OsvConfig;
use crate::domain::{AffectedRange, QueryError, RangeEvent, Vulnerability};

/// Request payload for the OSV query endpoint
#[derive(Debug, Serialize)]
struct OsvQueryRequest {
    version: String,
    package: OsvPackage,
}

#[derive(Debug, Serialize)]
struct OsvPackage {
    name: String,
}

/// Response from the OSV query endpoint.
///
/// An absent or empty `vulns` array means no known vulnerability.
#[derive(Debug, Deserialize)]
struct OsvQueryResponse {
    #[serde(default)]
    vulns: Vec<OsvVulnerability>,
}

/// OSV vulnerability data structure
#[derive(Debug, Deserialize)]
struct OsvVulnerability {
    #[serde(default)]
    aliases: Vec<String>,
    summary: Option<String>,
    #[serde(default)]
    affected: Vec<OsvAffected>,
}

#[derive(Debug, Deserialize)]
struct OsvAffected {
    #[serde(default)]
    ranges: Vec<OsvRange>,
}

#[derive(Debug, Deserialize)]
struct OsvRange {
    #[serde(rename = "type")]
    #[allow(dead_code)]
    range_type: Option<String>,
    #[serde(default)]
    events: Vec<OsvEvent>,
}

#[derive(Debug, Deserialize)]
struct OsvEvent {
    introduced: Option<String>,
    fixed: Option<String>,
}

/// Client for the OSV (Open Source Vulnerability) API
pub struct OsvClient {
    client: Client,
    base_url: String,
}

impl OsvClient {
    /// Create a new OSV client with the given base URL and request timeout
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("depscan/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, base_url }
    }

    /// Create a new OSV client from configuration
    pub fn from_config(config: &OsvConfig) -> Self {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    /// Convert an OSV vulnerability into the domain record
    fn convert_osv_vulnerability(osv_vuln: OsvVulnerability) -> Vulnerability {
        let affected_ranges = osv_vuln
            .affected
            .into_iter()
            .flat_map(|affected| affected.ranges)
            .map(|range| AffectedRange {
                events: range
                    .events
                    .into_iter()
                    .map(|event| RangeEvent {
                        introduced: event.introduced,
                        fixed: event.fixed,
                    })
                    .collect(),
            })
            .collect();

        Vulnerability {
            aliases: osv_vuln.aliases,
            summary: osv_vuln.summary.unwrap_or_default(),
            affected_ranges,
        }
    }
}

#[async_trait]
impl VulnerabilityApiClient for OsvClient {
    async fn query_vulnerabilities(
        &self,
        name: &str,
        version: &str,
    ) -> Result<Vec<Vulnerability>, QueryError> {
        let request_payload = OsvQueryRequest {
            version: version.to_string(),
            package: OsvPackage {
                name: name.to_string(),
            },
        };

        let url = format!("{}/v1/query", self.base_url);
        debug!(name, version, "querying vulnerability database");

        let response = self
            .client
            .post(&url)
            .json(&request_payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(QueryError::Http { status, message });
        }

        let osv_response: OsvQueryResponse = response.json().await?;

        Ok(osv_response
            .vulns
            .into_iter()
            .map(Self::convert_osv_vulnerability)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use serde_json::json;

    fn test_client(server: &Server) -> OsvClient {
        OsvClient::new(server.url(), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_query_vulnerabilities_success() {
        let mut server = Server::new_async().await;

        let mock_response = json!({
            "vulns": [
                {
                    "id": "GHSA-4hv5-qmqx-6q2f",
                    "aliases": ["CVE-2021-0341"],
                    "summary": "Improper hostname verification",
                    "affected": [
                        {
                            "package": { "name": "com.squareup.okhttp3:okhttp" },
                            "ranges": [
                                {
                                    "type": "ECOSYSTEM",
                                    "events": [
                                        { "introduced": "0" },
                                        { "fixed": "4.9.2" }
                                    ]
                                }
                            ]
                        }
                    ]
                }
            ]
        });

        let mock = server
            .mock("POST", "/v1/query")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(mock_response.to_string())
            .expect(1)
            .create_async()
            .await;

        let client = test_client(&server);
        let result = client
            .query_vulnerabilities("com.squareup.okhttp3:okhttp", "3.12.0")
            .await;

        mock.assert_async().await;
        let vulnerabilities = result.unwrap();
        assert_eq!(vulnerabilities.len(), 1);

        let vuln = &vulnerabilities[0];
        assert_eq!(vuln.primary_alias(), Some("CVE-2021-0341"));
        assert_eq!(vuln.summary, "Improper hostname verification");
        assert_eq!(vuln.affected_ranges.len(), 1);
        assert_eq!(
            vuln.affected_ranges[0].events[0].introduced.as_deref(),
            Some("0")
        );
        assert_eq!(
            vuln.affected_ranges[0].events[1].fixed.as_deref(),
            Some("4.9.2")
        );
    }

    #[tokio::test]
    async fn test_query_vulnerabilities_empty_list_is_clean() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("POST", "/v1/query")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "vulns": [] }).to_string())
            .expect(1)
            .create_async()
            .await;

        let client = test_client(&server);
        let result = client.query_vulnerabilities("junit:junit", "4.13.2").await;

        mock.assert_async().await;
        assert!(result.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_query_vulnerabilities_absent_field_is_clean() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("POST", "/v1/query")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .expect(1)
            .create_async()
            .await;

        let client = test_client(&server);
        let result = client.query_vulnerabilities("junit:junit", "4.13.2").await;

        mock.assert_async().await;
        assert!(result.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_query_vulnerabilities_http_error() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("POST", "/v1/query")
            .with_status(500)
            .with_body("Internal Server Error")
            .expect(1)
            .create_async()
            .await;

        let client = test_client(&server);
        let result = client.query_vulnerabilities("junit:junit", "4.13.2").await;

        mock.assert_async().await;
        match result.unwrap_err() {
            QueryError::Http { status, .. } => assert_eq!(status, 500),
            other => panic!("Expected HTTP error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_query_vulnerabilities_undecodable_body() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("POST", "/v1/query")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("not json")
            .expect(1)
            .create_async()
            .await;

        let client = test_client(&server);
        let result = client.query_vulnerabilities("junit:junit", "4.13.2").await;

        mock.assert_async().await;
        assert!(matches!(result.unwrap_err(), QueryError::Network { .. }));
    }

    #[tokio::test]
    async fn test_request_payload_serialization() {
        let request = OsvQueryRequest {
            version: "3.12.0".to_string(),
            package: OsvPackage {
                name: "com.squareup.okhttp3:okhttp".to_string(),
            },
        };

        let parsed: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&request).unwrap()).unwrap();

        assert_eq!(parsed["version"], "3.12.0");
        assert_eq!(parsed["package"]["name"], "com.squareup.okhttp3:okhttp");
    }
}
