//! Low-level HTTP transport.
//!
//! The API client never touches `reqwest` directly; it hands an [`ApiRequest`] to a
//! [`Transport`] and gets back the raw status and body. Classification happens
//! afterwards, so a transport only fails for requests that produced no response at
//! all (DNS, connect, timeout, broken body).

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::domain::error::{ConsoleError, Result};

/// Default request timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Default path prefix prepended to every request path.
pub const DEFAULT_API_PREFIX: &str = "/api";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request ready for dispatch. `path` is relative to the API prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
    pub timeout: Option<Duration>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            headers: Vec::new(),
            timeout: None,
        }
    }

    /// Returns the value of the first header named `name`, case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body of a completed exchange, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// The exchange did not produce a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportFailure(pub String);

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> std::result::Result<RawResponse, TransportFailure>;
}

/// [`Transport`] backed by a shared `reqwest::Client`.
///
/// Holds a cookie jar so cookie-origin deployments authenticate with whatever
/// session cookie the server set.
pub struct ReqwestTransport {
    http: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Builds a transport for `base_url` + `api_prefix`.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Config`] if the base URL is not http(s) or the HTTP
    /// client cannot be built.
    pub fn new(base_url: &str, api_prefix: &str, timeout: Duration) -> Result<Self> {
        let base = base_url.trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConsoleError::Config(format!(
                "base url must start with http:// or https://, got '{base_url}'"
            )));
        }
        let prefix = api_prefix.trim_matches('/');
        let base_url = if prefix.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{prefix}")
        };

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .cookie_store(true)
            .build()
            .map_err(|e| ConsoleError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, base_url })
    }

    /// Absolute URL for a request path.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> std::result::Result<RawResponse, TransportFailure> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.http.request(method, self.url_for(&request.path));
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| TransportFailure(format!("invalid header name '{name}': {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| TransportFailure(format!("invalid header value: {e}")))?;
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| TransportFailure(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| TransportFailure(e.to_string()))?;

        Ok(RawResponse { status, body })
    }
}

impl fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
