//! SendPulse SMTP API with OAuth client-credentials tokens.
//!
//! # Data Flow
//! ```text
//! deliver()
//!     → TokenCache::get_or_refresh(client_id)
//!         hit  → cached bearer token
//!         miss → POST token_url (grant_type=client_credentials) → cache
//!     → POST send_url with Authorization: Bearer <token>
//!     → 401 → invalidate the cached token, report the failure
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::auth::{IssuedToken, TokenCache};
use crate::config::Credentials;
use crate::message::Message;
use crate::observability::metrics;
use crate::providers::{ProviderError, VendorAdapter, SEND_PULSE};
use crate::transport::{PostRequest, Transport, VendorResponse};

pub const DEFAULT_TOKEN_URL: &str = "https://api.sendpulse.com/oauth/access_token";
pub const DEFAULT_SEND_URL: &str = "https://api.sendpulse.com/smtp/emails";

const VENDOR: &str = "SendPulse";

#[derive(Serialize)]
struct Payload<'a> {
    email: Email<'a>,
}

#[derive(Serialize)]
struct Email<'a> {
    from: Contact<'a>,
    to: Vec<Contact<'a>>,
    subject: &'a str,
    htmlbody: &'a str,
    textbody: String,
    attachments: Vec<serde_json::Value>,
}

#[derive(Serialize)]
struct Contact<'a> {
    name: &'a str,
    email: &'a str,
}

pub struct SendPulseAdapter {
    transport: Arc<dyn Transport>,
    tokens: TokenCache,
    token_url: String,
    send_url: String,
}

impl SendPulseAdapter {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            tokens: TokenCache::new(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            send_url: DEFAULT_SEND_URL.to_string(),
        }
    }

    pub fn with_endpoints(mut self, token_url: impl Into<String>, send_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self.send_url = send_url.into();
        self
    }

    /// The adapter's token cache.
    pub fn tokens(&self) -> &TokenCache {
        &self.tokens
    }

    async fn request_token(&self, client_id: &str, client_secret: &str) -> Result<IssuedToken, ProviderError> {
        let request = PostRequest::form(
            &self.token_url,
            [
                ("grant_type", "client_credentials"),
                ("client_id", client_id),
                ("client_secret", client_secret),
            ],
        );

        let response = self
            .transport
            .post(request)
            .await
            .map_err(|e| ProviderError::Token {
                vendor: VENDOR,
                reason: e.to_string(),
            })?;

        let issued: IssuedToken =
            serde_json::from_str(&response.body).map_err(|e| ProviderError::Token {
                vendor: VENDOR,
                reason: format!("invalid token response: {e}"),
            })?;
        if issued.access_token.trim().is_empty() {
            return Err(ProviderError::Token {
                vendor: VENDOR,
                reason: "empty access token".to_string(),
            });
        }

        metrics::record_token_refresh(SEND_PULSE);
        Ok(issued)
    }
}

#[async_trait]
impl VendorAdapter for SendPulseAdapter {
    async fn deliver(
        &self,
        message: &Message,
        credentials: &Credentials,
    ) -> Result<VendorResponse, ProviderError> {
        let [client_id, client_secret] = credentials.require(VENDOR, ["client_id", "client_secret"])?;

        let token = self
            .tokens
            .get_or_refresh(client_id, || self.request_token(client_id, client_secret))
            .await?;

        let payload = Payload {
            email: Email {
                from: Contact {
                    name: credentials.get("from_name").unwrap_or_default(),
                    email: &message.from,
                },
                to: message
                    .to
                    .iter()
                    .map(|email| Contact { name: "", email: email.as_str() })
                    .collect(),
                subject: &message.subject,
                htmlbody: &message.body.html,
                textbody: message.body.plain_text(),
                attachments: Vec::new(),
            },
        };

        let request = PostRequest::json(&self.send_url, &payload)?.bearer(&token);
        let result = self.transport.post(request).await;

        if let Err(err) = &result {
            if err.response().is_some_and(|r| r.status == 401) {
                tracing::warn!("SendPulse rejected the access token, dropping it");
                self.tokens.invalidate().await;
            }
        }
        result
    }
}
