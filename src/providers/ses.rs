//! Amazon SES v2 `SendEmail`, signed with SigV4.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use crate::auth::sigv4::{self, SigningParams};
use crate::config::Credentials;
use crate::message::Message;
use crate::providers::{ProviderError, VendorAdapter};
use crate::transport::{PostRequest, Transport, VendorResponse};

const SERVICE: &str = "ses";
const CHARSET: &str = "UTF-8";

/// Regional endpoint for SES v2 outbound email.
pub fn regional_endpoint(region: &str) -> String {
    format!("https://email.{region}.amazonaws.com/v2/email/outbound-emails")
}

/// Region, access key and secret come from the entry's credentials. An
/// optional `session_token` is sent for temporary credentials.
pub struct SesAdapter {
    transport: Arc<dyn Transport>,
    endpoint: Option<String>,
}

impl SesAdapter {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            endpoint: None,
        }
    }

    /// Fixed endpoint instead of the regional one.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }
}

#[async_trait]
impl VendorAdapter for SesAdapter {
    async fn deliver(
        &self,
        message: &Message,
        credentials: &Credentials,
    ) -> Result<VendorResponse, ProviderError> {
        let [region, access_key_id, secret_access_key] =
            credentials.require("SES", ["region", "access_key_id", "secret_access_key"])?;

        let payload = json!({
            "FromEmailAddress": message.from,
            "Destination": { "ToAddresses": message.to },
            "Content": {
                "Simple": {
                    "Subject": { "Data": message.subject, "Charset": CHARSET },
                    "Body": { "Html": { "Data": message.body.html, "Charset": CHARSET } },
                }
            },
        });

        let url = self
            .endpoint
            .clone()
            .unwrap_or_else(|| regional_endpoint(region));
        let params = SigningParams {
            access_key_id,
            secret_access_key,
            session_token: credentials.get("session_token"),
            region,
            service: SERVICE,
        };
        let request = sigv4::sign(PostRequest::json(url, &payload)?, &params, Utc::now())?;

        self.transport.post(request).await
    }
}
