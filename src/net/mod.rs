//! HTTP access for console views.
//!
//! # Modules
//!
//! - `transport`: request/response types and the `reqwest` transport
//! - `token`: token origin and the authentication header
//! - `classify`: success / business error / transport error decision
//! - `client`: [`ApiClient`], which ties the above to the host bridge

pub mod classify;
pub mod client;
pub mod token;
pub mod transport;

pub use classify::{classify, Classified, Notice, SERVER_UNAVAILABLE};
pub use client::{ApiClient, ApiClientBuilder, CancelHandle, RequestOptions};
pub use token::{bearer_header, TokenOrigin, AUTH_HEADER};
pub use transport::{
    ApiRequest, Method, RawResponse, ReqwestTransport, Transport, TransportFailure,
    DEFAULT_API_PREFIX, DEFAULT_TIMEOUT_MS,
};
