//! SendGrid v3 mail send.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::config::Credentials;
use crate::message::Message;
use crate::providers::{ProviderError, VendorAdapter};
use crate::transport::{PostRequest, Transport, VendorResponse};

pub const DEFAULT_ENDPOINT: &str = "https://api.sendgrid.com/v3/mail/send";

/// Bearer-token adapter. The key is checked before any request is built.
pub struct SendGridAdapter {
    transport: Arc<dyn Transport>,
    endpoint: String,
}

impl SendGridAdapter {
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
impl VendorAdapter for SendGridAdapter {
    async fn deliver(
        &self,
        message: &Message,
        credentials: &Credentials,
    ) -> Result<VendorResponse, ProviderError> {
        let [api_key] = credentials.require("SendGrid", ["api_key"])?;

        let to: Vec<_> = message.to.iter().map(|email| json!({ "email": email })).collect();
        let payload = json!({
            "personalizations": [{ "to": to }],
            "from": { "email": message.from },
            "subject": message.subject,
            "content": [{ "type": "text/html", "value": message.body.html }],
        });

        let request = PostRequest::json(&self.endpoint, &payload)?.bearer(api_key);
        self.transport.post(request).await
    }
}
