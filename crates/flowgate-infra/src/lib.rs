//! Infrastructure layer for Flowgate.
//!
//! Contains the adapters behind the ports defined in `flowgate-core`:
//! the reqwest-based Wazzup subscription client, the Directus record
//! dispatcher (JSON and multipart), and the TOML configuration loader.

pub mod config;
pub mod directus;
pub mod wazzup;
