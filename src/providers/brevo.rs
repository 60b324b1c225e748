//! Brevo transactional email API.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::Credentials;
use crate::message::Message;
use crate::providers::{ProviderError, VendorAdapter};
use crate::transport::{PostRequest, Transport, VendorResponse};

pub const DEFAULT_ENDPOINT: &str = "https://api.brevo.com/v3/smtp/email";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Payload<'a> {
    sender: Address<'a>,
    to: Vec<Address<'a>>,
    subject: &'a str,
    html_content: &'a str,
}

#[derive(Serialize)]
struct Address<'a> {
    email: &'a str,
}

/// Authenticates with an `api-key` header.
pub struct BrevoAdapter {
    transport: Arc<dyn Transport>,
    endpoint: String,
}

impl BrevoAdapter {
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
impl VendorAdapter for BrevoAdapter {
    async fn deliver(
        &self,
        message: &Message,
        credentials: &Credentials,
    ) -> Result<VendorResponse, ProviderError> {
        let [api_key] = credentials.require("Brevo", ["api_key"])?;

        let payload = Payload {
            sender: Address {
                email: &message.from,
            },
            to: message
                .to
                .iter()
                .map(|email| Address { email: email.as_str() })
                .collect(),
            subject: &message.subject,
            html_content: &message.body.html,
        };

        let request = PostRequest::json(&self.endpoint, &payload)?.header("api-key", api_key);
        self.transport.post(request).await
    }
}
