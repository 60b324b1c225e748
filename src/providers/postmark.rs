//! Postmark single-email endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::Credentials;
use crate::message::Message;
use crate::providers::{ProviderError, VendorAdapter};
use crate::transport::{PostRequest, Transport, VendorResponse};

pub const DEFAULT_ENDPOINT: &str = "https://api.postmarkapp.com/email";

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Payload<'a> {
    from: &'a str,
    to: String,
    subject: &'a str,
    html_body: &'a str,
}

pub struct PostmarkAdapter {
    transport: Arc<dyn Transport>,
    endpoint: String,
}

impl PostmarkAdapter {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl VendorAdapter for PostmarkAdapter {
    async fn deliver(
        &self,
        message: &Message,
        credentials: &Credentials,
    ) -> Result<VendorResponse, ProviderError> {
        let [server_token] = credentials.require("Postmark", ["api_key"])?;

        let payload = Payload {
            from: &message.from,
            to: message.recipients_joined(),
            subject: &message.subject,
            html_body: &message.body.html,
        };

        let request = PostRequest::json(&self.endpoint, &payload)?
            .header("Accept", "application/json")
            .header("X-Postmark-Server-Token", server_token);
        self.transport.post(request).await
    }
}
