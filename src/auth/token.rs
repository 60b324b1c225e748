//! Cached OAuth bearer tokens.
//!
//! # Design Decisions
//! - One cell per adapter instance, shared by every delivery through it
//! - The lock is held across the token request so concurrent deliveries
//!   wait for a single refresh instead of issuing their own
//! - A token is reused only for the client id it was issued to
//! - `tokio::time::Instant`, so expiry follows the runtime clock

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::providers::ProviderError;

/// Upper bound on how long a token is reused, whatever the vendor claims.
pub const MAX_TOKEN_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

/// Token endpoint reply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssuedToken {
    pub access_token: String,
    /// Lifetime in seconds. Absent means the token must not be reused.
    #[serde(default)]
    pub expires_in: u64,
}

#[derive(Debug)]
struct CachedToken {
    client_id: String,
    token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn usable_for(&self, client_id: &str, now: Instant) -> bool {
        self.client_id == client_id && now < self.expires_at
    }
}

/// Single cached token with its expiry.
#[derive(Debug, Default)]
pub struct TokenCache {
    state: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached token, or run `fetch` and cache its result.
    ///
    /// A failed fetch leaves the cache untouched.
    pub async fn get_or_refresh<F, Fut>(&self, client_id: &str, fetch: F) -> Result<String, ProviderError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<IssuedToken, ProviderError>>,
    {
        let mut state = self.state.lock().await;

        if let Some(cached) = state.as_ref() {
            if cached.usable_for(client_id, Instant::now()) {
                return Ok(cached.token.clone());
            }
        }

        let issued = fetch().await?;
        let now = Instant::now();
        let lifetime = Duration::from_secs(issued.expires_in).min(MAX_TOKEN_LIFETIME);
        let expires_at = now.checked_add(lifetime).unwrap_or(now);
        tracing::debug!(expires_in = issued.expires_in, "Access token refreshed");

        *state = Some(CachedToken {
            client_id: client_id.to_string(),
            token: issued.access_token.clone(),
            expires_at,
        });
        Ok(issued.access_token)
    }

    /// Drop the cached token so the next call refreshes.
    pub async fn invalidate(&self) {
        self.state.lock().await.take();
    }

    /// Currently cached token, if still valid for `client_id`.
    pub async fn current(&self, client_id: &str) -> Option<String> {
        self.state
            .lock()
            .await
            .as_ref()
            .filter(|cached| cached.usable_for(client_id, Instant::now()))
            .map(|cached| cached.token.clone())
    }
}
