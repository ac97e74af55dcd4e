//! Trigger-side logic: inbound event classification and the webhook
//! subscription lifecycle.

pub mod classifier;
pub mod lifecycle;

pub use classifier::classify;
pub use lifecycle::{RegistrationState, SubscriptionApi, TriggerLifecycle};
