//! Outbound HTTP transport.
//!
//! # Data Flow
//! ```text
//! Vendor adapter
//!     → PostRequest (url, headers, encoded body bytes)
//!     → Transport::post (one HTTP POST)
//!     → classify():
//!         2xx            → Ok(VendorResponse)
//!         other status   → ProviderError::Api (response attached)
//!         no response    → ProviderError::Transport
//! ```
//!
//! # Design Decisions
//! - Bodies are encoded before they reach the transport, so request signing
//!   hashes exactly the bytes that go on the wire
//! - Timeouts belong to the transport, not to the engine
//! - Adapters depend on the trait only; tests script it

pub mod http;
#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;
use serde::Serialize;

use crate::providers::ProviderError;

pub use self::http::ReqwestTransport;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// Raw vendor reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VendorResponse {
    pub status: u16,
    pub body: String,
}

impl VendorResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One fully-encoded POST request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl PostRequest {
    /// JSON-encode `payload`.
    pub fn json(url: impl Into<String>, payload: &impl Serialize) -> Result<Self, ProviderError> {
        let body = serde_json::to_vec(payload).map_err(|e| ProviderError::Encode(e.to_string()))?;
        Ok(Self {
            url: url.into(),
            headers: Vec::new(),
            content_type: CONTENT_TYPE_JSON,
            body,
        })
    }

    /// Form-urlencode `fields` in the given order.
    pub fn form<'a>(
        url: impl Into<String>,
        fields: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish()
            .into_bytes();
        Self {
            url: url.into(),
            headers: Vec::new(),
            content_type: CONTENT_TYPE_FORM,
            body,
        }
    }

    /// Append a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// `Authorization: Bearer <token>`.
    pub fn bearer(self, token: &str) -> Self {
        self.header("Authorization", format!("Bearer {token}"))
    }

    /// `Authorization: Basic base64(user:password)`.
    pub fn basic_auth(self, user: &str, password: &str) -> Self {
        use base64::Engine as _;
        let encoded = base64::engine::general_purpose::STANDARD.encode(format!("{user}:{password}"));
        self.header("Authorization", format!("Basic {encoded}"))
    }

    /// First header value matching `name`, case-insensitively.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Capability to perform one POST and classify the result.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, request: PostRequest) -> Result<VendorResponse, ProviderError>;
}

/// Map a completed exchange onto success or [`ProviderError::Api`].
pub fn classify(response: VendorResponse) -> Result<VendorResponse, ProviderError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ProviderError::Api { response })
    }
}
