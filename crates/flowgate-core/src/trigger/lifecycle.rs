//! Webhook subscription lifecycle.
//!
//! [`TriggerLifecycle`] keeps the remote subscription record in step
//! with trigger activation and deactivation. It is a two-state machine:
//! `Unregistered` (initial and terminal) and `Registered`. There is no
//! partial state -- the remote subscription is always either fully as
//! requested or fully cleared.
//!
//! The remote side is reached through the [`SubscriptionApi`] port,
//! implemented in `flowgate-infra`. Calls are awaited to completion and
//! never retried here; a failed call is the caller's to re-trigger.

use flowgate_types::credentials::WazzupCredentials;
use flowgate_types::error::SubscriptionError;
use flowgate_types::subscription::{EventSelection, SubscriptionFlags};

/// Port to the remote subscription API.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). The
/// concrete implementation lives in `flowgate-infra`
/// (`wazzup::WazzupClient`).
pub trait SubscriptionApi: Send + Sync {
    /// Whether a registration already exists for the callback URL.
    ///
    /// Always resolves to `false`: the lifecycle never trusts a cached
    /// "already registered" answer and re-asserts the full state on
    /// every activation. Kept as a port method so the check stays
    /// visible at the seam.
    fn exists(
        &self,
        callback_url: &str,
    ) -> impl std::future::Future<Output = Result<bool, SubscriptionError>> + Send;

    /// Assert the full desired state: callback URL populated, the given
    /// flags enabled. After success the remote state is exactly `flags`.
    fn enable(
        &self,
        credentials: &WazzupCredentials,
        callback_url: &str,
        flags: &SubscriptionFlags,
    ) -> impl std::future::Future<Output = Result<(), SubscriptionError>> + Send;

    /// Tear the subscription down: callback URL cleared, all flags false.
    fn disable(
        &self,
        credentials: &WazzupCredentials,
    ) -> impl std::future::Future<Output = Result<(), SubscriptionError>> + Send;
}

/// Registration state of the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    Unregistered,
    Registered,
}

impl RegistrationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationState::Unregistered => "unregistered",
            RegistrationState::Registered => "registered",
        }
    }
}

/// Orchestrates the subscription translator and the remote client
/// against trigger activation/deactivation.
///
/// The hosting layer guarantees at most one activation or deactivation
/// is in flight at a time; no internal locking is performed here.
pub struct TriggerLifecycle<C> {
    client: C,
    state: RegistrationState,
}

impl<C: SubscriptionApi> TriggerLifecycle<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            state: RegistrationState::Unregistered,
        }
    }

    pub fn state(&self) -> RegistrationState {
        self.state
    }

    pub fn is_registered(&self) -> bool {
        self.state == RegistrationState::Registered
    }

    /// Activate the trigger: translate the category selection into
    /// subscription flags and assert them remotely.
    ///
    /// On failure the state remains `Unregistered` and the error
    /// propagates -- activation must be visibly failed to the host, and
    /// is not retried here.
    pub async fn activate(
        &mut self,
        credentials: &WazzupCredentials,
        callback_url: &str,
        selection: &EventSelection,
    ) -> Result<(), SubscriptionError> {
        let flags = SubscriptionFlags::for_selection(selection);

        tracing::info!(
            callback_url,
            messages_and_statuses = flags.messages_and_statuses,
            contacts_and_deals_creation = flags.contacts_and_deals_creation,
            phones = flags.phones,
            "registering webhook subscription"
        );

        // Always false; every activation re-registers rather than
        // reconciling with actual remote state.
        let already = self.client.exists(callback_url).await?;
        if already {
            tracing::debug!(callback_url, "existing registration reported, re-asserting anyway");
        }

        self.client.enable(credentials, callback_url, &flags).await?;
        self.state = RegistrationState::Registered;
        Ok(())
    }

    /// Deactivate the trigger: clear the remote subscription entirely,
    /// regardless of which flags were previously enabled.
    ///
    /// The local state becomes `Unregistered` even when the remote call
    /// fails -- the local intent to stop is honored -- but the error is
    /// still returned so the host can surface it.
    pub async fn deactivate(
        &mut self,
        credentials: &WazzupCredentials,
    ) -> Result<(), SubscriptionError> {
        self.state = RegistrationState::Unregistered;

        match self.client.disable(credentials).await {
            Ok(()) => {
                tracing::info!("webhook subscription cleared");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "webhook teardown failed; local trigger stopped anyway");
                Err(err)
            }
        }
    }
}
