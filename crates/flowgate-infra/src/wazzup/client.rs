//! WazzupClient -- concrete [`SubscriptionApi`] implementation for the
//! Wazzup webhooks API.
//!
//! Every subscription change is one `PATCH {base}/webhooks` call carrying
//! the full desired state, authenticated with the caller's bearer token.
//! There is no retry and no reconciliation: a transport failure or a
//! non-success status is surfaced as-is.

use std::time::Duration;

use secrecy::ExposeSecret;

use flowgate_core::trigger::SubscriptionApi;
use flowgate_types::credentials::WazzupCredentials;
use flowgate_types::error::SubscriptionError;
use flowgate_types::subscription::{SubscriptionFlags, WebhookSubscription};

/// Default API base, overridable for tests and proxies.
const DEFAULT_BASE_URL: &str = "https://api.wazzup24.com/v3";

/// Client for the Wazzup webhook subscription endpoint.
#[derive(Debug, Clone)]
pub struct WazzupClient {
    client: reqwest::Client,
    base_url: String,
}

impl WazzupClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        self.base_url = base_url;
        self
    }

    /// Send one full-state `PATCH /webhooks` call.
    async fn patch_webhooks(
        &self,
        credentials: &WazzupCredentials,
        desired: &WebhookSubscription,
    ) -> Result<(), SubscriptionError> {
        let url = format!("{}/webhooks", self.base_url);

        let response = self
            .client
            .patch(&url)
            .bearer_auth(credentials.api_key().expose_secret())
            .json(desired)
            .send()
            .await
            .map_err(|e| SubscriptionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SubscriptionError::RemoteStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

impl Default for WazzupClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SubscriptionApi for WazzupClient {
    async fn exists(&self, _callback_url: &str) -> Result<bool, SubscriptionError> {
        // Never reports an existing registration: the lifecycle
        // re-asserts the full state on every activation instead of
        // reconciling with the remote record.
        Ok(false)
    }

    async fn enable(
        &self,
        credentials: &WazzupCredentials,
        callback_url: &str,
        flags: &SubscriptionFlags,
    ) -> Result<(), SubscriptionError> {
        self.patch_webhooks(credentials, &WebhookSubscription::enable(callback_url, *flags))
            .await
    }

    async fn disable(&self, credentials: &WazzupCredentials) -> Result<(), SubscriptionError> {
        self.patch_webhooks(credentials, &WebhookSubscription::disable())
            .await
    }
}
