//! Authentication token attachment.

use crate::domain::error::{ConsoleError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Header carrying the bearer token for header-origin deployments.
pub const AUTH_HEADER: &str = "X-Authorization";

/// Where the server expects the authentication token.
///
/// Fixed per deployment. `Cookie` relies on the transport's cookie jar; `Header`
/// reads the token from a [`TokenStore`](crate::storage::TokenStore) before every
/// request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenOrigin {
    #[default]
    Cookie,
    Header,
}

impl FromStr for TokenOrigin {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cookie" => Ok(Self::Cookie),
            "header" => Ok(Self::Header),
            other => Err(ConsoleError::Config(format!(
                "unknown token origin '{other}' (expected 'cookie' or 'header')"
            ))),
        }
    }
}

impl fmt::Display for TokenOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cookie => "cookie",
            Self::Header => "header",
        })
    }
}

/// Builds the `X-Authorization: Bearer <token>` header pair.
#[must_use]
pub fn bearer_header(token: &str) -> (String, String) {
    (AUTH_HEADER.to_string(), format!("Bearer {token}"))
}
