//! Tracing subscriber setup with format selection.

use anyhow::{Context, Result};
use tracing_subscriber::{
    EnvFilter,
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use super::{TracingConfig, config::LogFormat};

/// Keeps logging configured while alive.
///
/// Flushes stderr when dropped so the last events are not lost on exit.
#[must_use = "logging output may be lost if the guard is dropped early"]
pub struct TracingGuard {
    format: LogFormat,
}

impl TracingGuard {
    /// The format logging was initialized with.
    pub fn format(&self) -> LogFormat {
        self.format
    }
}

impl Drop for TracingGuard {
    fn drop(&mut self) {
        use std::io::Write;
        let _ = std::io::stderr().flush();
    }
}

/// Initialize the global tracing subscriber.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: TracingConfig) -> Result<TracingGuard> {
    let filter = EnvFilter::try_new(config.log_filter()).unwrap_or_else(|_| EnvFilter::new("info"));

    match config.log_format() {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_file(config.include_location())
                        .with_line_number(config.include_location())
                        .flatten_event(true),
                )
                .try_init()
                .context("Failed to initialize tracing subscriber")?;
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr)
                        .with_file(config.include_location())
                        .with_line_number(config.include_location()),
                )
                .try_init()
                .context("Failed to initialize tracing subscriber")?;
        }
        LogFormat::Compact => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .compact()
                        .with_writer(std::io::stderr)
                        .with_file(config.include_location())
                        .with_line_number(config.include_location()),
                )
                .try_init()
                .context("Failed to initialize tracing subscriber")?;
        }
    }

    Ok(TracingGuard {
        format: config.log_format(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_fails() {
        let config = TracingConfig::default().with_log_filter("warn");
        // Another test in this binary may have installed a subscriber first.
        let first = init_tracing(config.clone());
        if let Ok(guard) = &first {
            assert_eq!(guard.format(), LogFormat::Compact);
        }
        assert!(init_tracing(config).is_err());
    }
}
