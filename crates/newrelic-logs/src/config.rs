// Copyright 2025-Present New Relic, Inc. https://newrelic.com/
// SPDX-License-Identifier: Apache-2.0

//! Delivery configuration for the intake client.

use std::time::Duration;

/// Default intake endpoint for New Relic Logs.
pub const DEFAULT_ENDPOINT: &str = "https://log-api.newrelic.com/log/v1";

/// Per-request timeout applied to intake requests unless overridden.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Credential used to authenticate against the log intake.
///
/// Exactly one credential header is ever sent; the variant picks which.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Insert key, sent as `X-Insert-Key`.
    ApiKey(String),
    /// Account license key, sent as `X-License-Key`.
    LicenseKey(String),
}

impl Credentials {
    /// Header name and value for this credential.
    pub(crate) fn header(&self) -> (&'static str, &str) {
        match self {
            Credentials::ApiKey(key) => ("X-Insert-Key", key),
            Credentials::LicenseKey(key) => ("X-License-Key", key),
        }
    }
}

/// Delivery configuration held by the intake client for its lifetime.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    /// Intake endpoint URL.
    pub endpoint: String,
    /// Credential mode and secret.
    pub credentials: Credentials,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl IntakeConfig {
    /// Configuration for the given endpoint with the default request timeout.
    pub fn new(endpoint: impl Into<String>, credentials: Credentials) -> Self {
        IntakeConfig {
            endpoint: endpoint.into(),
            credentials,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Outbound proxy settings for the intake client.
#[derive(Debug, Clone, Default)]
pub struct ProxyConfig {
    /// HTTPS proxy URL, if any.
    pub url: Option<String>,
    /// Skip TLS certificate validation. Off unless explicitly requested.
    pub accept_invalid_certs: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_maps_to_insert_key_header() {
        let credentials = Credentials::ApiKey("secret".to_string());
        assert_eq!(credentials.header(), ("X-Insert-Key", "secret"));
    }

    #[test]
    fn license_key_maps_to_license_key_header() {
        let credentials = Credentials::LicenseKey("secret".to_string());
        assert_eq!(credentials.header(), ("X-License-Key", "secret"));
    }

    #[test]
    fn new_applies_default_timeout() {
        let config = IntakeConfig::new(DEFAULT_ENDPOINT, Credentials::ApiKey("k".to_string()));
        assert_eq!(config.timeout, DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }
}
