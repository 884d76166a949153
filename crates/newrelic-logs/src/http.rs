// Copyright 2025-Present New Relic, Inc. https://newrelic.com/
// SPDX-License-Identifier: Apache-2.0

//! HTTP client construction.

use core::time::Duration;

use crate::config::ProxyConfig;

/// Builds a reqwest client with optional proxy configuration and a fixed
/// per-request timeout. Uses rustls TLS.
pub fn build_client(
    proxy: &ProxyConfig,
    timeout: Duration,
) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder()
        .timeout(timeout)
        .danger_accept_invalid_certs(proxy.accept_invalid_certs);
    if let Some(url) = proxy.url.as_deref() {
        builder = builder.proxy(reqwest::Proxy::https(url)?);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_without_proxy() {
        let client = build_client(&ProxyConfig::default(), Duration::from_secs(5));
        assert!(client.is_ok());
    }

    #[test]
    fn rejects_invalid_proxy_url() {
        let proxy = ProxyConfig {
            url: Some("not a proxy url".to_string()),
            accept_invalid_certs: false,
        };
        assert!(build_client(&proxy, Duration::from_secs(5)).is_err());
    }
}
