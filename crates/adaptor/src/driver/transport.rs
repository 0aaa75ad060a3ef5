//! [`SearchClient`] backed by the official Elasticsearch client.

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use elasticsearch::Elasticsearch;
use elasticsearch::auth::Credentials;
use elasticsearch::cert::CertificateValidation;
use elasticsearch::http::headers::HeaderMap;
use elasticsearch::http::request::JsonBody;
use elasticsearch::http::transport::{SingleNodeConnectionPool, TransportBuilder};
use elasticsearch::http::{Method, Url};
use serde_json::Value;

use crate::config::{AdaptorConfig, SearchAuth};
use crate::error::{AdaptorResult, ConfigurationError, DriverError};

use super::{HttpMethod, SearchClient, SearchRequest, SearchResponse};

/// Sends driver requests through an [`Elasticsearch`] client.
pub struct EsTransport {
    client: Elasticsearch,
    node: String,
}

impl Debug for EsTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EsTransport")
            .field("node", &self.node)
            .finish_non_exhaustive()
    }
}

impl EsTransport {
    /// Builds the client from configuration. Does not connect.
    pub fn new(config: &AdaptorConfig) -> AdaptorResult<Self> {
        let node = config.primary_node().to_string();
        let url = node.parse::<Url>().map_err(|e| ConfigurationError::InvalidNodeUrl {
            url: node.clone(),
            message: e.to_string(),
        })?;

        let mut builder = TransportBuilder::new(SingleNodeConnectionPool::new(url))
            .timeout(Duration::from_millis(config.request_timeout_ms));
        if config.disable_certificate_validation {
            builder = builder.cert_validation(CertificateValidation::None);
        }
        if let Some(auth) = &config.auth {
            builder = builder.auth(credentials(auth));
        }

        let transport = builder.build().map_err(|e| DriverError::Transport {
            method: "-".to_string(),
            path: node.clone(),
            message: format!("cannot build transport: {}", e),
        })?;

        tracing::debug!("Search transport targets {}", node);

        Ok(Self {
            client: Elasticsearch::new(transport),
            node,
        })
    }

    /// Returns the underlying client.
    pub fn client(&self) -> &Elasticsearch {
        &self.client
    }
}

fn credentials(auth: &SearchAuth) -> Credentials {
    match auth {
        SearchAuth::Basic { username, password } => {
            Credentials::Basic(username.clone(), password.clone())
        }
        SearchAuth::Bearer { token } => Credentials::Bearer(token.clone()),
    }
}

fn native_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::Get,
        HttpMethod::Post => Method::Post,
        HttpMethod::Put => Method::Put,
        HttpMethod::Delete => Method::Delete,
        HttpMethod::Head => Method::Head,
    }
}

#[async_trait]
impl SearchClient for EsTransport {
    async fn send(&self, request: SearchRequest) -> Result<SearchResponse, DriverError> {
        let transport_error = |message: String| DriverError::Transport {
            method: request.method.to_string(),
            path: request.path.clone(),
            message,
        };

        let response = self
            .client
            .send(
                native_method(request.method),
                &request.path,
                HeaderMap::new(),
                None::<&()>,
                request.body.clone().map(JsonBody::new),
                None,
            )
            .await
            .map_err(|e| transport_error(e.to_string()))?;

        let status = response.status_code().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| transport_error(e.to_string()))?;

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        Ok(SearchResponse { status, body })
    }
}
