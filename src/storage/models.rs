//! Persisted token record.
//!
//! Kept separate from the transport layer so the on-disk shape can evolve without
//! touching request code.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub token: String,

    pub saved_at: DateTime<Utc>,
}

impl TokenRecord {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            saved_at: Utc::now(),
        }
    }
}
