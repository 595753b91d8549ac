//! Logging setup for vlqmap binaries.
//!
//! Library code only emits `tracing` events; a binary decides where they
//! go by calling [`init_tracing`]. Logs are written to stderr so that
//! benchmark samples on stdout stay machine-readable.
//!
//! # Configuration
//!
//! Logging format is controlled via `VLQMAP_LOG_FORMAT` env var:
//! - `json` - Structured JSON output
//! - `pretty` - Human-readable multi-line output (default for TTY)
//! - `compact` - Compact single-line format (default otherwise)
//!
//! The filter comes from `VLQMAP_LOG_LEVEL`, then `RUST_LOG`, then `info`.
//!
//! # Example
//!
//! ```ignore
//! use vlqmap_executor::observability::{LogFormat, TracingConfig, init_tracing};
//!
//! let _guard = init_tracing(TracingConfig::from_env())?;
//!
//! let config = TracingConfig::default()
//!     .with_log_format(LogFormat::Json)
//!     .with_log_filter("debug");
//! let _guard = init_tracing(config)?;
//! ```

mod config;
mod tracing_setup;

pub use config::{LogFormat, TracingConfig};
pub use tracing_setup::{TracingGuard, init_tracing};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = TracingConfig::default();
        assert_eq!(config.log_filter(), "info");
        assert_eq!(config.log_format(), LogFormat::Compact);
        assert!(!config.include_location());
    }

    #[test]
    fn overrides_replace_single_fields() {
        let config = TracingConfig::default()
            .with_log_format(LogFormat::Json)
            .with_log_filter("vlqmap_executor=debug");

        assert_eq!(config.log_format(), LogFormat::Json);
        assert_eq!(config.log_filter(), "vlqmap_executor=debug");
        assert!(!config.include_location());
    }

    #[test]
    fn log_format_parsing_falls_back_to_compact() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!("loud".parse::<LogFormat>().unwrap(), LogFormat::Compact);
    }

    #[test]
    fn config_from_env_has_a_filter() {
        let config = TracingConfig::from_env();
        assert!(!config.log_filter().is_empty());
    }
}
