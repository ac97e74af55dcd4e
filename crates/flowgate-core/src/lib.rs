//! Business logic and port trait definitions for Flowgate.
//!
//! This crate defines the "ports" (the subscription API trait) that the
//! infrastructure layer implements, plus the pure pieces of the gateway:
//! inbound event classification, the trigger lifecycle state machine,
//! the event bus, and the websocket reply dispatcher. It depends only on
//! `flowgate-types` -- never on `flowgate-infra` or any HTTP crate.

pub mod event;
pub mod reply;
pub mod trigger;
