//! Benchmark run configuration.

use crate::factory::DecoderKind;
use std::path::PathBuf;
use std::time::Duration;
use vlqmap_core::DelegateKind;
use vlqmap_core::delegate::SCALA_JS_LINE_COUNT;
use vlqmap_core::error::{Result, VlqmapError};

/// Default number of timed decodes.
pub const DEFAULT_ITERATIONS: usize = 100;

/// Default pause between timed decodes.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(10);

/// Configuration for one benchmark run.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Decoder backend under test.
    pub decoder: DecoderKind,
    /// Delegate receiving the results.
    pub delegate: DelegateKind,
    /// Number of timed decodes after warm-up.
    pub iterations: usize,
    /// Source map whose `mappings` are decoded.
    pub source_map: PathBuf,
    /// Compiled unit for the linear-memory backend; the built-in unit when unset.
    pub module: Option<PathBuf>,
    /// Line count the delegate validates the warm-up decode against.
    pub expected_lines: usize,
    /// Pause between timed decodes.
    pub delay: Duration,
}

impl BenchConfig {
    /// Configuration with defaults for everything but the input.
    pub fn new(source_map: impl Into<PathBuf>) -> Self {
        Self {
            decoder: DecoderKind::Structured,
            delegate: DelegateKind::Count,
            iterations: DEFAULT_ITERATIONS,
            source_map: source_map.into(),
            module: None,
            expected_lines: SCALA_JS_LINE_COUNT,
            delay: DEFAULT_DELAY,
        }
    }

    /// Set the decoder backend.
    pub fn with_decoder(mut self, decoder: DecoderKind) -> Self {
        self.decoder = decoder;
        self
    }

    /// Set the delegate.
    pub fn with_delegate(mut self, delegate: DelegateKind) -> Self {
        self.delegate = delegate;
        self
    }

    /// Set the number of timed decodes.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Load the linear-memory backend from a file instead of the built-in unit.
    pub fn with_module(mut self, module: impl Into<PathBuf>) -> Self {
        self.module = Some(module.into());
        self
    }

    /// Set the expected line count.
    pub fn with_expected_lines(mut self, expected_lines: usize) -> Self {
        self.expected_lines = expected_lines;
        self
    }

    /// Set the pause between timed decodes.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Label prefix of printed samples, e.g. `structured-count`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.decoder, self.delegate)
    }

    /// Reject configurations that cannot produce a run.
    pub fn validate(&self) -> Result<()> {
        if self.expected_lines == 0 {
            return Err(VlqmapError::ConfigValue {
                field: "expected_lines".to_string(),
                cause: "a decode always yields at least one line".to_string(),
            });
        }
        if self.module.is_some() && self.decoder != DecoderKind::LinearMemory {
            return Err(VlqmapError::ConfigValue {
                field: "module".to_string(),
                cause: format!("only used by the linear-memory decoder, not {}", self.decoder),
            });
        }
        Ok(())
    }
}
