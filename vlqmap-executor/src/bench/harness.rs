//! The decode throughput benchmark.

use super::config::BenchConfig;
use super::host::Host;
use super::source_map::read_mappings;
use crate::factory::{DecoderFactory, DecoderKind};
use crate::wasm::{WasmRuntime, WasmRuntimeConfig};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use vlqmap_core::error::Result;
use vlqmap_core::{AnyDelegate, Delegate};

/// One timed decode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Zero-based iteration index.
    pub iteration: usize,
    /// Wall time of the decode call.
    pub elapsed: Duration,
}

impl Sample {
    /// Elapsed time in fractional milliseconds.
    pub fn millis(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1_000.0
    }
}

/// Samples of a finished run.
#[derive(Debug, Clone)]
pub struct BenchReport {
    /// `{decoder}-{delegate}` label shared by all samples.
    pub label: String,
    /// Timed decodes in iteration order.
    pub samples: Vec<Sample>,
}

/// Summary statistics of a [`BenchReport`], in milliseconds.
#[derive(Debug, Clone, Serialize)]
pub struct BenchSummary {
    /// Run label.
    pub label: String,
    /// Number of samples.
    pub iterations: usize,
    /// Fastest sample.
    pub min_ms: f64,
    /// Average sample.
    pub mean_ms: f64,
    /// Slowest sample.
    pub max_ms: f64,
}

impl BenchReport {
    /// Fastest sample, if any.
    pub fn min(&self) -> Option<Duration> {
        self.samples.iter().map(|s| s.elapsed).min()
    }

    /// Slowest sample, if any.
    pub fn max(&self) -> Option<Duration> {
        self.samples.iter().map(|s| s.elapsed).max()
    }

    /// Average sample, if any.
    pub fn mean(&self) -> Option<Duration> {
        if self.samples.is_empty() {
            return None;
        }
        let total: Duration = self.samples.iter().map(|s| s.elapsed).sum();
        Some(average(total, self.samples.len()))
    }

    /// Summary statistics; all zero for an empty run.
    pub fn summary(&self) -> BenchSummary {
        let ms = |d: Option<Duration>| d.map_or(0.0, |d| d.as_secs_f64() * 1_000.0);
        BenchSummary {
            label: self.label.clone(),
            iterations: self.samples.len(),
            min_ms: ms(self.min()),
            mean_ms: ms(self.mean()),
            max_ms: ms(self.max()),
        }
    }
}

/// `total / count` for a non-zero `count`, exact while `count` fits a `u32`.
fn average(total: Duration, count: usize) -> Duration {
    match u32::try_from(count) {
        Ok(count) => total / count,
        Err(_) => Duration::from_secs_f64(total.as_secs_f64() / count as f64),
    }
}

/// Run a benchmark with a default WebAssembly runtime.
pub async fn run(host: &dyn Host, config: &BenchConfig) -> Result<BenchReport> {
    run_with_runtime(host, config, WasmRuntimeConfig::default()).await
}

/// Run a benchmark.
///
/// Decodes once to warm up and checks the result against the configured
/// line count, then times `iterations` decodes. Each sample is printed
/// through the host as `{decoder}-{delegate},{iteration},{ms}` as soon as
/// it is taken.
pub async fn run_with_runtime(
    host: &dyn Host,
    config: &BenchConfig,
    runtime_config: WasmRuntimeConfig,
) -> Result<BenchReport> {
    config.validate()?;
    let label = config.label();

    let factory = build_factory(host, config, runtime_config)?;
    let delegate = AnyDelegate::new(config.delegate, config.expected_lines);
    let mappings = read_mappings(host, &config.source_map)?;

    let mut decoder = factory.create(delegate).await?;

    tracing::info!(
        label = %label,
        iterations = config.iterations,
        bytes = mappings.len(),
        "Starting benchmark"
    );

    decoder.delegate_mut().reset();

    // warm-up
    decoder.decode(&mappings)?;
    if let Err(e) = decoder.delegate().validate() {
        tracing::warn!(label = %label, error = %e, "Warm-up decode failed validation");
        return Err(e);
    }
    decoder.delegate_mut().reset();

    let mut samples = Vec::with_capacity(config.iterations);
    for iteration in 0..config.iterations {
        let start = Instant::now();
        decoder.decode(&mappings)?;
        let sample = Sample {
            iteration,
            elapsed: start.elapsed(),
        };

        host.print(&format!("{label},{iteration},{:.3}", sample.millis()));
        samples.push(sample);

        decoder.delegate_mut().reset();
        if !config.delay.is_zero() {
            tokio::time::sleep(config.delay).await;
        }
    }

    let report = BenchReport { label, samples };
    let summary = report.summary();
    tracing::info!(
        label = %summary.label,
        min_ms = summary.min_ms,
        mean_ms = summary.mean_ms,
        max_ms = summary.max_ms,
        "Benchmark finished"
    );

    Ok(report)
}

fn build_factory(
    host: &dyn Host,
    config: &BenchConfig,
    runtime_config: WasmRuntimeConfig,
) -> Result<DecoderFactory> {
    match config.decoder {
        DecoderKind::Structured => Ok(DecoderFactory::structured()),
        DecoderKind::LinearMemory => {
            let runtime = Arc::new(WasmRuntime::new(runtime_config)?);
            match &config.module {
                Some(path) => {
                    let bytes = host.read_buffer(path)?;
                    Ok(DecoderFactory::linear_memory(
                        runtime,
                        path.display().to_string(),
                        bytes,
                    ))
                }
                None => DecoderFactory::builtin_linear_memory(runtime),
            }
        }
    }
}
