// Copyright 2025-Present New Relic, Inc. https://newrelic.com/
// SPDX-License-Identifier: Apache-2.0

//! Delivery of packaged payloads to the log intake.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_ENCODING, CONTENT_TYPE};
use reqwest::StatusCode;
use tracing::{debug, error};

use crate::config::{IntakeConfig, ProxyConfig};
use crate::error::IntakeError;
use crate::http::build_client;
use crate::payload::{package_records, LogRecord, Payload};

/// HTTP client for the log intake.
///
/// Owns the transport and the credential headers for its lifetime. The
/// underlying `reqwest::Client` pools connections and is safe to share
/// across concurrent send calls; no other state is written during a send.
pub struct IntakeClient {
    client: reqwest::Client,
    endpoint: String,
    headers: HeaderMap,
}

impl IntakeClient {
    /// Builds the underlying HTTP client once, with the configured proxy and
    /// request timeout. Fails if the proxy URL cannot be parsed or the
    /// credential is not a valid header value.
    pub fn new(config: IntakeConfig, proxy: ProxyConfig) -> Result<Self, IntakeError> {
        let client = build_client(&proxy, config.timeout)
            .map_err(|err| IntakeError::InvalidConfig(format!("building HTTP client: {err}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_ENCODING, HeaderValue::from_static("gzip"));
        let (name, value) = config.credentials.header();
        headers.insert(
            name,
            HeaderValue::from_str(value).map_err(|_| {
                IntakeError::InvalidConfig(format!("{name} is not a valid header value"))
            })?,
        );

        Ok(IntakeClient {
            client,
            endpoint: config.endpoint,
            headers,
        })
    }

    /// Packages the given records and transmits the resulting payloads one
    /// at a time, strictly in input order.
    ///
    /// The first transport-level failure aborts the call; payloads after the
    /// failure point are never sent. A completed exchange with a non-202
    /// status is logged and treated as delivered. An empty batch performs no
    /// network call.
    pub async fn send(&self, records: &[LogRecord]) -> Result<(), IntakeError> {
        let payloads = package_records(records)?;
        for payload in payloads {
            self.send_payload(payload).await?;
        }
        Ok(())
    }

    async fn send_payload(&self, payload: Payload) -> Result<(), IntakeError> {
        debug!(
            records = payload.record_count(),
            bytes = payload.len(),
            "shipping payload"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .body(payload.into_body())
            .send()
            .await
            .map_err(|err| {
                error!("error making HTTP request: {err}");
                IntakeError::Transport(err)
            })?;

        let status = response.status();
        // Drain the body on every path so the pooled connection stays
        // reusable. The drain result is surfaced only when nothing else
        // failed for this payload.
        let drained = response.bytes().await;
        if status != StatusCode::ACCEPTED {
            // Rejected payloads are logged, not raised; the send carries on.
            error!("log intake returned unexpected status: {status}");
        }
        match drained {
            Ok(_) => Ok(()),
            Err(err) => Err(IntakeError::ResponseDrain(err)),
        }
    }
}
