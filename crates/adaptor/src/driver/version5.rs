//! System driver for Elasticsearch 5.x.
//!
//! The 2.x system calls work unchanged against 5.x, so this driver only
//! exists to give 5.x callers their own type.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AdaptorResult;

use super::SystemDriver as _;
use super::{DriverVersion, SearchClient, version2};

/// System driver for Elasticsearch 5.x.
#[derive(Debug)]
pub struct SystemDriver {
    inner: version2::SystemDriver,
}

impl SystemDriver {
    /// Creates a driver sending requests through `client`.
    pub fn new(client: Arc<dyn SearchClient>) -> Self {
        Self {
            inner: version2::SystemDriver::new(client),
        }
    }
}

#[async_trait]
impl super::SystemDriver for SystemDriver {
    fn version(&self) -> DriverVersion {
        DriverVersion::Version5
    }

    async fn status(&self) -> AdaptorResult<Value> {
        self.inner.status().await
    }

    async fn refresh_index(&self, index: &str) -> AdaptorResult<()> {
        self.inner.refresh_index(index).await
    }

    async fn cluster_health(&self) -> AdaptorResult<Value> {
        self.inner.cluster_health().await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::SystemDriver as _;
    use super::super::testing::RecordingClient;
    use super::*;

    #[tokio::test]
    async fn test_issues_same_requests_as_version2() {
        let legacy_client = RecordingClient::new();
        let client = RecordingClient::new();
        for c in [&legacy_client, &client] {
            c.respond(200, json!({ "_all": {} }));
            c.respond(200, json!({}));
            c.respond(200, json!({ "status": "green" }));
        }

        let legacy = version2::SystemDriver::new(legacy_client.clone());
        let driver = SystemDriver::new(client.clone());

        assert_eq!(legacy.status().await.unwrap(), driver.status().await.unwrap());
        legacy.refresh_index("site").await.unwrap();
        driver.refresh_index("site").await.unwrap();
        assert_eq!(
            legacy.cluster_health().await.unwrap(),
            driver.cluster_health().await.unwrap()
        );

        assert_eq!(legacy_client.requests(), client.requests());
        assert_eq!(driver.version(), DriverVersion::Version5);
    }
}
