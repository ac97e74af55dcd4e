//! Shared domain types for Flowgate.
//!
//! This crate contains the core domain types used across the Flowgate
//! gateway: event categories and subscription flags for the Wazzup
//! webhooks API, inbound event classification types, the Directus
//! record-operation vocabulary, credentials, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, secrecy,
//! thiserror.

pub mod credentials;
pub mod error;
pub mod event;
pub mod record;
pub mod subscription;
