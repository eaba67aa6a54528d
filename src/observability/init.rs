//! Tracing initialization and subscriber setup.

use super::file_writer::RotatingFile;
use crate::Config;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` when set, otherwise from
/// `config.trace_level`, otherwise `info`. Events go to the configured log file
/// through a [`RotatingFile`], or to stderr when no file is configured or its
/// directory cannot be created.
///
/// Safe to call more than once; only the first call installs a subscriber.
///
/// # Example
///
/// ```rust
/// use consolekit::observability::init_tracing;
/// use consolekit::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let log_file = config.log_file.as_ref().filter(|path| {
        path.parent()
            .map_or(true, |dir| dir.as_os_str().is_empty() || std::fs::create_dir_all(dir).is_ok())
    });

    match log_file {
        Some(path) => {
            let writer = Arc::new(RotatingFile::new(path.clone()));
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .try_init();
        }
    }
}
