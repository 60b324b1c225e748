//! OneSignal email notifications.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::Credentials;
use crate::message::Message;
use crate::providers::{ProviderError, VendorAdapter};
use crate::transport::{PostRequest, Transport, VendorResponse};

pub const DEFAULT_ENDPOINT: &str = "https://onesignal.com/api/v1/notifications";

#[derive(Serialize)]
struct Payload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    app_id: Option<&'a str>,
    include_email_tokens: &'a [String],
    subject: &'a str,
    body: &'a str,
    from_email: &'a str,
}

/// The REST key is sent verbatim as `Authorization: Basic <key>`.
pub struct OneSignalAdapter {
    transport: Arc<dyn Transport>,
    endpoint: String,
}

impl OneSignalAdapter {
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
impl VendorAdapter for OneSignalAdapter {
    async fn deliver(
        &self,
        message: &Message,
        credentials: &Credentials,
    ) -> Result<VendorResponse, ProviderError> {
        let [api_key] = credentials.require("OneSignal", ["api_key"])?;

        let payload = Payload {
            app_id: credentials.get("app_id"),
            include_email_tokens: &message.to,
            subject: &message.subject,
            body: &message.body.html,
            from_email: &message.from,
        };

        let request = PostRequest::json(&self.endpoint, &payload)?
            .header("Authorization", format!("Basic {api_key}"));
        self.transport.post(request).await
    }
}
