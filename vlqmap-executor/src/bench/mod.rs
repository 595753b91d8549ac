//! Decode throughput benchmark.
//!
//! Decodes the `mappings` of one source map repeatedly with a chosen
//! backend and delegate, printing one CSV-style sample per iteration:
//!
//! ```text
//! structured-count,0,41.207
//! structured-count,1,39.884
//! ```

mod config;
mod harness;
mod host;
mod source_map;

pub use config::{BenchConfig, DEFAULT_DELAY, DEFAULT_ITERATIONS};
pub use harness::{BenchReport, BenchSummary, Sample, run, run_with_runtime};
pub use host::{Host, MockHost, RealHost};
pub use source_map::{SourceMapDocument, read_mappings};
