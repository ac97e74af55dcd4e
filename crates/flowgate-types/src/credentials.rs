//! Credentials for the remote platforms.
//!
//! Bearer tokens are wrapped in [`secrecy::SecretString`] and are only
//! exposed when constructing HTTP request headers. They never appear in
//! Debug output or tracing logs, and are never persisted by the gateway.

use secrecy::SecretString;

/// Bearer credential for the Wazzup API.
///
/// Owned by the hosting environment and passed by reference into every
/// subscription call.
pub struct WazzupCredentials {
    api_key: SecretString,
}

impl WazzupCredentials {
    pub fn new(api_key: SecretString) -> Self {
        Self { api_key }
    }

    /// The wrapped bearer token. Call `expose_secret()` only at the
    /// point a request header is built.
    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }
}

/// Base URL plus bearer token for a Directus instance.
pub struct DirectusCredentials {
    base_url: String,
    token: SecretString,
}

impl DirectusCredentials {
    /// A trailing slash on `base_url` is stripped so path joining stays
    /// uniform.
    pub fn new(base_url: impl Into<String>, token: SecretString) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, token }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> &SecretString {
        &self.token
    }
}

// Neither credential type derives Debug: the SecretString fields would be
// redacted, but omitting Debug entirely keeps the whole record out of
// logs.
