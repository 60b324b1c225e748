//! `reqwest`-backed transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use crate::config::TransportConfig;
use crate::providers::ProviderError;
use crate::transport::{classify, PostRequest, Transport, VendorResponse};

/// Shared HTTP client; cheap to clone.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a client with the configured timeouts and user agent.
    pub fn new(config: &TransportConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post(&self, request: PostRequest) -> Result<VendorResponse, ProviderError> {
        let mut builder = self
            .client
            .post(&request.url)
            .header(CONTENT_TYPE, request.content_type);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .body(request.body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        tracing::debug!(url = %request.url, status, "Vendor responded");
        classify(VendorResponse { status, body })
    }
}
