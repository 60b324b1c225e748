//! Mailgun messages API (form-encoded, per-domain endpoint).

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Credentials;
use crate::message::Message;
use crate::providers::{ProviderError, VendorAdapter};
use crate::transport::{PostRequest, Transport, VendorResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.mailgun.net";

/// Posts to `{base_url}/v3/{domain}/messages` with basic auth `api:<key>`.
pub struct MailgunAdapter {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl MailgunAdapter {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the API host, e.g. `https://api.eu.mailgun.net`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn messages_url(&self, domain: &str) -> String {
        format!("{}/v3/{}/messages", self.base_url.trim_end_matches('/'), domain)
    }
}

#[async_trait]
impl VendorAdapter for MailgunAdapter {
    async fn deliver(
        &self,
        message: &Message,
        credentials: &Credentials,
    ) -> Result<VendorResponse, ProviderError> {
        let [domain, api_key] = credentials.require("Mailgun", ["domain", "api_key"])?;

        let to = message.recipients_joined();
        let request = PostRequest::form(
            self.messages_url(domain),
            [
                ("from", message.from.as_str()),
                ("to", to.as_str()),
                ("subject", message.subject.as_str()),
                ("html", message.body.html.as_str()),
            ],
        )
        .basic_auth("api", api_key);

        self.transport.post(request).await
    }
}
