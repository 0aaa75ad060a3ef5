//! System driver for Elasticsearch 2.x.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{AdaptorResult, ConfigurationError, DriverError};

use super::{DriverVersion, HttpMethod, SearchClient, SearchRequest, SearchResponse};

/// System driver for Elasticsearch 2.x.
pub struct SystemDriver {
    client: Arc<dyn SearchClient>,
}

impl Debug for SystemDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemDriver")
            .field("version", &DriverVersion::Version2)
            .finish_non_exhaustive()
    }
}

impl SystemDriver {
    /// Creates a driver sending requests through `client`.
    pub fn new(client: Arc<dyn SearchClient>) -> Self {
        Self { client }
    }

    /// Sends a request and rejects non-success statuses.
    async fn request(&self, request: SearchRequest) -> AdaptorResult<SearchResponse> {
        let method = request.method.to_string();
        let path = request.path.clone();

        tracing::debug!("{} {}", method, path);
        let response = self.client.send(request).await?;

        if !response.is_success() {
            return Err(DriverError::UnexpectedStatus {
                method,
                path,
                status: response.status,
                body: response.body.to_string(),
            }
            .into());
        }

        Ok(response)
    }
}

/// Rejects index names that would not form a single path segment.
fn validate_index_name(index: &str) -> Result<(), ConfigurationError> {
    let message = if index.is_empty() {
        "must not be empty"
    } else if index.contains('/') {
        "must not contain '/'"
    } else {
        return Ok(());
    };

    Err(ConfigurationError::InvalidIndexName {
        index: index.to_string(),
        message: message.to_string(),
    })
}

#[async_trait]
impl super::SystemDriver for SystemDriver {
    fn version(&self) -> DriverVersion {
        DriverVersion::Version2
    }

    async fn status(&self) -> AdaptorResult<Value> {
        let response = self
            .request(SearchRequest::new(HttpMethod::Get, "/_stats"))
            .await?;
        Ok(response.body)
    }

    async fn refresh_index(&self, index: &str) -> AdaptorResult<()> {
        validate_index_name(index)?;
        self.request(SearchRequest::new(
            HttpMethod::Post,
            format!("/{}/_refresh", index),
        ))
        .await?;
        tracing::debug!("Refreshed index '{}'", index);
        Ok(())
    }

    async fn cluster_health(&self) -> AdaptorResult<Value> {
        let path = "/_cluster/health";
        let response = self
            .request(SearchRequest::new(HttpMethod::Get, path))
            .await?;

        let cluster_status = response
            .body
            .get("status")
            .and_then(|s| s.as_str())
            .ok_or_else(|| DriverError::InvalidResponse {
                path: path.to_string(),
                message: "missing cluster status".to_string(),
            })?;

        if cluster_status == "red" {
            return Err(DriverError::ClusterUnavailable {
                status: cluster_status.to_string(),
            }
            .into());
        }

        Ok(response.body)
    }
}
