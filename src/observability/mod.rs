//! Structured logging.
//!
//! All crate code logs through `tracing` macros: a debug span per controller event,
//! an info event per outbound request, warnings for fallbacks and failures. This
//! module installs the subscriber that turns those into text.
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in [`Config`](crate::Config)
//! 3. Default: `"info"`
//!
//! Output goes to `log_file` when configured, rotated at 10 MB with three backups,
//! and to stderr otherwise.
//!
//! # Modules
//!
//! - `init`: subscriber setup
//! - [`file_writer`]: rotating file writer

pub mod file_writer;
mod init;

pub use file_writer::RotatingFile;
pub use init::init_tracing;
