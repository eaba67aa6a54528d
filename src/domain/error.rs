//! Error types for consolekit.
//!
//! This module defines the centralized error type [`ConsoleError`] and a type alias
//! [`Result`] used throughout the crate. Variants map onto the failure classes a
//! console view has to tell apart: a server that rejected the request, a request
//! that never completed, a parent frame that could not be reached, and a component
//! that was set up without a required collaborator.

use crate::domain::envelope::{EnvelopeCode, Severity};
use thiserror::Error;

/// The main error type for consolekit operations.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// The server understood the request and rejected it.
    ///
    /// Produced by response classification when the envelope carries a non-zero
    /// code. The user has already been notified once when this is returned.
    #[error("business error {code}: {message}")]
    Business {
        /// Code reported by the server.
        code: EnvelopeCode,
        /// Message reported by the server (or the default message).
        message: String,
        /// Severity that selected the notification channel.
        severity: Severity,
    },

    /// The request could not complete.
    ///
    /// Covers network failures, timeouts and non-2xx responses without a
    /// parseable envelope. The user has already been notified once.
    #[error("transport error: {0}")]
    Transport(String),

    /// A cross-frame call could not reach the parent frame.
    ///
    /// Only ever returned by [`HostBridge`](crate::host::HostBridge) implementations;
    /// [`Host`](crate::host::Host) absorbs it by falling back to the local frame.
    #[error("host unreachable: {0}")]
    HostUnreachable(String),

    /// Configuration is invalid or a required collaborator is missing.
    ///
    /// Raised at setup time, before any component becomes usable.
    #[error("configuration error: {0}")]
    Config(String),

    /// An operation received an argument outside its domain.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Reading or writing persisted state failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The caller cancelled a pending request.
    #[error("request cancelled")]
    Cancelled,
}

impl ConsoleError {
    /// Returns true for failures the user has already been told about.
    ///
    /// Callers use this to avoid stacking a second message on top of the one the
    /// API client produced.
    #[must_use]
    pub const fn is_notified(&self) -> bool {
        matches!(self, Self::Business { .. } | Self::Transport(_))
    }
}

/// A specialized `Result` type for consolekit operations.
pub type Result<T> = std::result::Result<T, ConsoleError>;
