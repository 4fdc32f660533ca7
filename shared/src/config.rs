use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::{DEBOUNCE_DELAY, DEMO_URL};

const ALLOWED_SCHEMES: [&str; 2] = ["http", "https"];

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("endpoint `{endpoint}` is not a valid URL: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("endpoint scheme `{scheme}` is not supported")]
    UnsupportedScheme { scheme: String },
}

/// Fixed screen settings. The shell cannot change these at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenConfig {
    endpoint: String,
    debounce_delay: Duration,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            endpoint: DEMO_URL.to_string(),
            debounce_delay: DEBOUNCE_DELAY,
        }
    }
}

impl ScreenConfig {
    /// The endpoint, checked before each fetch is issued.
    pub fn endpoint(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason: e.to_string(),
        })?;

        if !ALLOWED_SCHEMES.contains(&url.scheme()) {
            return Err(ConfigError::UnsupportedScheme {
                scheme: url.scheme().to_string(),
            });
        }

        Ok(url)
    }

    pub fn debounce_delay(&self) -> Duration {
        self.debounce_delay
    }

    #[cfg(test)]
    pub(crate) fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}
