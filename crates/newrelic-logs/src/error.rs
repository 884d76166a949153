// Copyright 2025-Present New Relic, Inc. https://newrelic.com/
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy for packaging and delivery.

use thiserror::Error;

/// Packaging failures. Fatal to the whole batch: no partial payload sequence
/// is ever produced.
#[derive(Debug, Error)]
pub enum PackagingError {
    /// A record could not be serialized to its wire representation.
    #[error("failed to serialize log record: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The serialized batch could not be gzip-compressed.
    #[error("failed to compress payload: {0}")]
    Compress(#[from] std::io::Error),
}

/// Errors surfaced by the intake client. Rejected (non-202) responses are
/// deliberately absent: they are logged, never returned.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// Client construction failed: bad proxy URL or a credential that is not
    /// a valid header value.
    #[error("invalid intake configuration: {0}")]
    InvalidConfig(String),

    /// Packaging the batch failed; nothing was transmitted.
    #[error(transparent)]
    Packaging(#[from] PackagingError),

    /// The request could not be completed; remaining payloads were not sent.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response body could not be fully drained after a completed
    /// exchange.
    #[error("failed to drain response body: {0}")]
    ResponseDrain(#[source] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = IntakeError::InvalidConfig("bad proxy".to_string());
        assert_eq!(
            error.to_string(),
            "invalid intake configuration: bad proxy"
        );
    }

    #[test]
    fn test_packaging_error_passes_through() {
        let error = IntakeError::from(PackagingError::from(std::io::Error::other("boom")));
        assert_eq!(error.to_string(), "failed to compress payload: boom");
    }
}
