// Copyright 2025-Present New Relic, Inc. https://newrelic.com/
// SPDX-License-Identifier: Apache-2.0

use newrelic_logs::config::{Credentials, DEFAULT_ENDPOINT};
use std::env;

/// Errors raised while reading forwarder configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration for the log forwarder, read from the environment
#[derive(Debug, Clone)]
pub struct ForwarderConfig {
    /// Intake endpoint URL
    pub endpoint: String,
    /// Insert key, sent as `X-Insert-Key`
    pub api_key: Option<String>,
    /// Account license key, sent as `X-License-Key`
    pub license_key: Option<String>,
    /// HTTPS proxy URL
    pub proxy: Option<String>,
    /// Log level (e.g., trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ForwarderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            license_key: None,
            proxy: None,
            log_level: "info".to_string(),
        }
    }
}

impl ForwarderConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let endpoint =
            env::var("NEW_RELIC_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let api_key = env::var("NEW_RELIC_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let license_key = env::var("NEW_RELIC_LICENSE_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let proxy = env::var("NEW_RELIC_PROXY")
            .or_else(|_| env::var("HTTPS_PROXY"))
            .ok();
        let log_level = env::var("NEW_RELIC_LOG_LEVEL")
            .map(|val| val.to_lowercase())
            .unwrap_or_else(|_| "info".to_string());

        let config = Self {
            endpoint,
            api_key,
            license_key,
            proxy,
            log_level,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "NEW_RELIC_ENDPOINT cannot be empty".to_string(),
            ));
        }

        match (&self.api_key, &self.license_key) {
            (None, None) => {
                return Err(ConfigError::Invalid(
                    "either NEW_RELIC_API_KEY or NEW_RELIC_LICENSE_KEY must be set".to_string(),
                ));
            }
            (Some(_), Some(_)) => {
                return Err(ConfigError::Invalid(
                    "NEW_RELIC_API_KEY and NEW_RELIC_LICENSE_KEY are mutually exclusive"
                        .to_string(),
                ));
            }
            _ => {}
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.log_level
            )));
        }

        Ok(())
    }

    /// Credential for the intake client; `None` until validated.
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.api_key, &self.license_key) {
            (Some(key), None) => Some(Credentials::ApiKey(key.clone())),
            (None, Some(key)) => Some(Credentials::LicenseKey(key.clone())),
            _ => None,
        }
    }
}
