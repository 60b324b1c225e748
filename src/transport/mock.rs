//! Scripted transport for adapter tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::providers::ProviderError;
use crate::transport::{classify, PostRequest, Transport, VendorResponse};

/// Records every request and answers from a script; an empty script answers
/// `200 {}`.
#[derive(Default)]
pub(crate) struct MockTransport {
    script: Mutex<VecDeque<Result<VendorResponse, String>>>,
    requests: Mutex<Vec<PostRequest>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, status: u16, body: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(VendorResponse::new(status, body)));
        self
    }

    pub(crate) fn fail(self, message: &str) -> Self {
        self.script.lock().unwrap().push_back(Err(message.to_string()));
        self
    }

    pub(crate) fn requests(&self) -> Vec<PostRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last(&self) -> PostRequest {
        self.requests.lock().unwrap().last().cloned().expect("no request recorded")
    }

    pub(crate) fn last_json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.last().body).expect("body is not JSON")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post(&self, request: PostRequest) -> Result<VendorResponse, ProviderError> {
        self.requests.lock().unwrap().push(request);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Ok(response)) => classify(response),
            Some(Err(message)) => Err(ProviderError::Transport(message)),
            None => Ok(VendorResponse::new(200, "{}")),
        }
    }
}
