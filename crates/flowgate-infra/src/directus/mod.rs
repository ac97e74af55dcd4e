//! Directus headless CMS adapter.

pub mod client;

pub use client::DirectusClient;
