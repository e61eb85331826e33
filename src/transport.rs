// src/transport.rs
//! HTTP transport for hypermedia traversal.
//!
//! This module provides the seam between link navigation and HTTP. Link and
//! Resource depend on the [`Transport`] trait, never on reqwest details, so
//! tests can substitute a stub and count calls. [`ReqwestTransport`] is the
//! bundled implementation.

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;

use crate::config::EntryPointConfig;
use crate::error::HalError;

/// Outcome of an HTTP operation with response metadata.
///
/// Non-success statuses are not errors at this layer; the status rides along
/// for the caller to interpret.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub url: String,
    pub body: String,
}

impl TransportResponse {
    /// Parses the response body as JSON.
    pub fn json(&self) -> Result<Value, HalError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// The ability to issue HTTP requests against resolved link URLs.
///
/// Verbs with a convenience method delegate to [`run_request`], the generic
/// dispatch used directly for verbs without one (OPTIONS).
///
/// [`run_request`]: Transport::run_request
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues a request with an explicit verb, optional JSON body and
    /// optional extra headers.
    async fn run_request(
        &self,
        method: Method,
        url: &str,
        body: Option<Value>,
        headers: Option<HeaderMap>,
    ) -> Result<TransportResponse, HalError>;

    async fn get(&self, url: &str) -> Result<TransportResponse, HalError> {
        self.run_request(Method::GET, url, None, None).await
    }

    async fn head(&self, url: &str) -> Result<TransportResponse, HalError> {
        self.run_request(Method::HEAD, url, None, None).await
    }

    async fn delete(&self, url: &str) -> Result<TransportResponse, HalError> {
        self.run_request(Method::DELETE, url, None, None).await
    }

    async fn post(&self, url: &str, body: Value) -> Result<TransportResponse, HalError> {
        self.run_request(Method::POST, url, Some(body), None).await
    }

    async fn put(&self, url: &str, body: Value) -> Result<TransportResponse, HalError> {
        self.run_request(Method::PUT, url, Some(body), None).await
    }

    async fn patch(&self, url: &str, body: Value) -> Result<TransportResponse, HalError> {
        self.run_request(Method::PATCH, url, Some(body), None).await
    }
}

/// A thin wrapper around a reqwest [`Client`] bound to an API base URL.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    config: EntryPointConfig,
}

impl ReqwestTransport {
    /// Builds a transport from an entry-point configuration.
    pub fn new(config: EntryPointConfig) -> Result<Self, HalError> {
        let mut headers = config.default_headers.clone();
        headers
            .entry(header::ACCEPT)
            .or_insert(header::HeaderValue::from_static("application/hal+json"));
        headers
            .entry(header::CONTENT_TYPE)
            .or_insert(header::HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    /// Resolves a possibly-relative link href against the configured base URL.
    fn resolve(&self, url: &str) -> Result<String, HalError> {
        Ok(self.config.base_url.join(url)?.into())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn run_request(
        &self,
        method: Method,
        url: &str,
        body: Option<Value>,
        headers: Option<HeaderMap>,
    ) -> Result<TransportResponse, HalError> {
        let url = self.resolve(url)?;
        log::debug!("{} {}", method, url);

        let mut request = self.client.request(method, url.as_str());
        if let Some(body) = body {
            request = request.json(&body);
        }
        if let Some(headers) = headers {
            request = request.headers(headers);
        }

        let response = request.send().await?;
        let status = response.status();
        let final_url = response.url().to_string();
        let body = response.text().await?;
        log::trace!("{} -> {} ({} bytes)", url, status, body.len());

        Ok(TransportResponse {
            status,
            url: final_url,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn relative_hrefs_resolve_against_base() {
        let config = EntryPointConfig::new("https://api.example.org/v1/").unwrap();
        let transport = ReqwestTransport::new(config).unwrap();
        assert_eq!(
            transport.resolve("posts/5").unwrap(),
            "https://api.example.org/v1/posts/5"
        );
        assert_eq!(
            transport.resolve("/posts/5").unwrap(),
            "https://api.example.org/posts/5"
        );
    }

    #[test]
    fn absolute_hrefs_pass_through() {
        let config = EntryPointConfig::new("https://api.example.org/v1/").unwrap();
        let transport = ReqwestTransport::new(config).unwrap();
        assert_eq!(
            transport.resolve("https://other.example.org/x").unwrap(),
            "https://other.example.org/x"
        );
    }

    #[test]
    fn response_body_parses_as_json() {
        let response = TransportResponse {
            status: StatusCode::OK,
            url: "https://api.example.org/".to_string(),
            body: r#"{"title": "home"}"#.to_string(),
        };
        let value = response.json().unwrap();
        assert_eq!(value["title"], "home");
    }
}
