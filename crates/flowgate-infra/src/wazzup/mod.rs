//! Wazzup messaging platform adapter.

pub mod client;

pub use client::WazzupClient;
