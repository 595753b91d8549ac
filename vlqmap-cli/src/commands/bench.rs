//! Bench command - time repeated decodes of one source map.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use vlqmap_core::DelegateKind;
use vlqmap_executor::bench::{self, BenchConfig, RealHost};
use vlqmap_executor::factory::DecoderKind;

/// Options collected from the command line.
pub struct BenchOptions {
    pub decoder: DecoderKind,
    pub delegate: DelegateKind,
    pub iterations: usize,
    pub source_map: PathBuf,
    pub module: Option<PathBuf>,
    pub expected_lines: usize,
    pub delay_ms: u64,
    pub summary: bool,
}

impl BenchOptions {
    /// Options with harness defaults for `source_map`.
    pub fn new(source_map: PathBuf) -> Self {
        let defaults = BenchConfig::new(&source_map);
        Self {
            decoder: defaults.decoder,
            delegate: defaults.delegate,
            iterations: defaults.iterations,
            source_map,
            module: None,
            expected_lines: defaults.expected_lines,
            delay_ms: defaults.delay.as_millis() as u64,
            summary: false,
        }
    }

    fn to_config(&self) -> BenchConfig {
        let config = BenchConfig::new(&self.source_map)
            .with_decoder(self.decoder)
            .with_delegate(self.delegate)
            .with_iterations(self.iterations)
            .with_expected_lines(self.expected_lines)
            .with_delay(Duration::from_millis(self.delay_ms));
        match &self.module {
            Some(module) => config.with_module(module),
            None => config,
        }
    }
}

/// Run the bench command.
pub async fn run(options: BenchOptions) -> Result<()> {
    let config = options.to_config();
    tracing::info!(
        source_map = %config.source_map.display(),
        label = %config.label(),
        "Running benchmark"
    );

    let report = bench::run(&RealHost::new(), &config)
        .await
        .with_context(|| format!("Benchmark {} failed", config.label()))?;

    if options.summary {
        let summary = serde_json::to_string(&report.summary())?;
        println!("{summary}");
    }

    Ok(())
}
