// src/config.rs
//! Entry-point configuration.
//!
//! Settings consumed by the bundled reqwest transport. Library-only: there
//! is no CLI or environment lookup here; callers construct a config and hand
//! it to [`EntryPoint::with_config`](crate::EntryPoint::with_config).

use reqwest::header::HeaderMap;
use std::time::Duration;
use url::Url;

use crate::error::HalError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Resolved configuration for an API entry point.
#[derive(Debug, Clone)]
pub struct EntryPointConfig {
    /// Root URL of the API. Relative link hrefs are resolved against it.
    pub base_url: Url,
    /// Per-request timeout applied by the bundled transport.
    pub timeout: Duration,
    /// Headers sent with every request (e.g. `Accept: application/hal+json`).
    pub default_headers: HeaderMap,
}

impl EntryPointConfig {
    /// Creates a configuration for the given API root URL.
    pub fn new(base_url: &str) -> Result<Self, HalError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_headers: HeaderMap::new(),
        })
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replaces the default header set.
    pub fn with_default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = headers;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn config_parses_base_url() {
        let config = EntryPointConfig::new("https://api.example.org/v1/").unwrap();
        assert_eq!(config.base_url.as_str(), "https://api.example.org/v1/");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let config = EntryPointConfig::new("not a url");
        assert!(matches!(config, Err(HalError::InvalidUrl(_))));
    }

    #[test]
    fn builder_overrides_apply() {
        let config = EntryPointConfig::new("https://api.example.org/")
            .unwrap()
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
