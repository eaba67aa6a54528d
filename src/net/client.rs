//! Classified API client.
//!
//! [`ApiClient`] issues one request per call, attaches the authentication token,
//! classifies the response and shows exactly one notification through the
//! [`Host`] when the call fails. Callers receive either the payload or a
//! [`ConsoleError`] they do not need to report again (see
//! [`ConsoleError::is_notified`]).
//!
//! # Example
//!
//! ```no_run
//! # async fn demo(client: consolekit::net::ApiClient) -> consolekit::Result<()> {
//! use consolekit::net::RequestOptions;
//! use serde_json::json;
//!
//! let created = client
//!     .post("/users", Some(json!({"name": "ann"})), &[], RequestOptions::default())
//!     .await?;
//! # Ok(())
//! # }
//! ```

use crate::domain::error::{ConsoleError, Result};
use crate::domain::page::{Page, PageQuery};
use crate::host::Host;
use crate::net::classify::{classify, Classified};
use crate::net::token::{bearer_header, TokenOrigin};
use crate::net::transport::{ApiRequest, Method, Transport};
use crate::storage::TokenStore;
use futures_util::future::{AbortHandle, AbortRegistration, Abortable};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Per-call options.
#[derive(Debug, Default)]
pub struct RequestOptions {
    /// Extra headers, sent after the authentication header.
    pub headers: Vec<(String, String)>,
    /// Overrides the transport's default timeout.
    pub timeout: Option<Duration>,
    cancel: Option<AbortRegistration>,
}

impl RequestOptions {
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Makes the call cancellable through the returned handle.
    #[must_use]
    pub fn cancellable(mut self) -> (Self, CancelHandle) {
        let (handle, registration) = AbortHandle::new_pair();
        self.cancel = Some(registration);
        (self, CancelHandle(handle))
    }
}

/// Cancels a pending request. Cloning shares the same request.
#[derive(Debug, Clone)]
pub struct CancelHandle(AbortHandle);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.abort();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.is_aborted()
    }
}

pub struct ApiClient {
    transport: Arc<dyn Transport>,
    host: Host,
    token_origin: TokenOrigin,
    token_store: Option<Arc<dyn TokenStore>>,
}

impl ApiClient {
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub const fn token_origin(&self) -> TokenOrigin {
        self.token_origin
    }

    pub const fn host(&self) -> &Host {
        &self.host
    }

    pub async fn get(
        &self,
        path: &str,
        body: Option<Value>,
        query: &[(String, String)],
        options: RequestOptions,
    ) -> Result<Value> {
        self.request(Method::Get, path, body, query, options).await
    }

    pub async fn post(
        &self,
        path: &str,
        body: Option<Value>,
        query: &[(String, String)],
        options: RequestOptions,
    ) -> Result<Value> {
        self.request(Method::Post, path, body, query, options).await
    }

    pub async fn put(
        &self,
        path: &str,
        body: Option<Value>,
        query: &[(String, String)],
        options: RequestOptions,
    ) -> Result<Value> {
        self.request(Method::Put, path, body, query, options).await
    }

    pub async fn delete(
        &self,
        path: &str,
        body: Option<Value>,
        query: &[(String, String)],
        options: RequestOptions,
    ) -> Result<Value> {
        self.request(Method::Delete, path, body, query, options).await
    }

    /// Fetches one page from a paginated list endpoint.
    ///
    /// # Errors
    ///
    /// Any classified failure, or [`ConsoleError::InvalidInput`] when the payload
    /// is not shaped like a page. The latter is not notified.
    pub async fn fetch_page(&self, path: &str, query: &PageQuery) -> Result<Page<Value>> {
        let payload = self
            .get(path, None, &query.to_pairs(), RequestOptions::default())
            .await?;
        Page::from_payload(payload)
    }

    /// Sends one request and classifies the result.
    ///
    /// # Errors
    ///
    /// - [`ConsoleError::Business`] for an envelope with a non-zero code
    /// - [`ConsoleError::Transport`] when no usable response arrived
    /// - [`ConsoleError::Cancelled`] when the call was cancelled (not notified)
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        query: &[(String, String)],
        options: RequestOptions,
    ) -> Result<Value> {
        let mut request = ApiRequest::new(method, path);
        request.body = body;
        request.query = query.to_vec();
        request.timeout = options.timeout;
        if let Some(auth) = self.auth_header() {
            request.headers.push(auth);
        }
        request.headers.extend(options.headers);

        tracing::info!(%method, path, "request");

        let exchange = self.transport.execute(request);
        let outcome = match options.cancel {
            Some(registration) => match Abortable::new(exchange, registration).await {
                Ok(outcome) => outcome,
                Err(_aborted) => {
                    tracing::debug!(%method, path, "request cancelled");
                    return Err(ConsoleError::Cancelled);
                }
            },
            None => exchange.await,
        };

        match classify(outcome) {
            Classified::Success(payload) => Ok(payload),
            Classified::Failure { error, notice } => {
                tracing::warn!(%method, path, error = %error, "request failed");
                notice.present(&self.host);
                Err(error)
            }
        }
    }

    fn auth_header(&self) -> Option<(String, String)> {
        if self.token_origin != TokenOrigin::Header {
            return None;
        }
        let store = self.token_store.as_ref()?;
        match store.load() {
            Ok(Some(token)) => Some(bearer_header(&token)),
            Ok(None) => {
                tracing::debug!("no token saved, sending request without one");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read token, sending request without one");
                None
            }
        }
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("token_origin", &self.token_origin)
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ApiClient`]. Missing collaborators fail at [`build`](Self::build).
#[derive(Default)]
pub struct ApiClientBuilder {
    transport: Option<Arc<dyn Transport>>,
    host: Option<Host>,
    token_origin: TokenOrigin,
    token_store: Option<Arc<dyn TokenStore>>,
}

impl ApiClientBuilder {
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    #[must_use]
    pub fn host(mut self, host: Host) -> Self {
        self.host = Some(host);
        self
    }

    #[must_use]
    pub fn token_origin(mut self, origin: TokenOrigin) -> Self {
        self.token_origin = origin;
        self
    }

    #[must_use]
    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.token_store = Some(store);
        self
    }

    /// # Errors
    ///
    /// Returns [`ConsoleError::Config`] when the transport or host is missing, or
    /// when header tokens are configured without a token store.
    pub fn build(self) -> Result<ApiClient> {
        let transport = self
            .transport
            .ok_or_else(|| ConsoleError::Config("API client requires a transport".to_string()))?;
        let host = self
            .host
            .ok_or_else(|| ConsoleError::Config("API client requires a host".to_string()))?;
        if self.token_origin == TokenOrigin::Header && self.token_store.is_none() {
            return Err(ConsoleError::Config(
                "header token origin requires a token store".to_string(),
            ));
        }

        Ok(ApiClient {
            transport,
            host,
            token_origin: self.token_origin,
            token_store: self.token_store,
        })
    }
}
