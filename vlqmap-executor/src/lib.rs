//! vlqmap Executor - decoder backends and the decode benchmark.
//!
//! This crate provides:
//! - The [`Decoder`](decoder::Decoder) interface and its two backends
//! - A Wasmtime-hosted linear-memory backend with a built-in compiled unit
//! - Async decoder construction through [`DecoderFactory`](factory::DecoderFactory)
//! - The benchmark harness and its host abstraction
//! - Logging setup for binaries

#![warn(missing_docs)]

pub mod bench;
pub mod decoder;
pub mod factory;
pub mod observability;
pub mod structured;
pub mod wasm;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::bench::{BenchConfig, BenchReport, Host, MockHost, RealHost, Sample};
    pub use crate::decoder::Decoder;
    pub use crate::factory::{DecoderFactory, DecoderKind};
    pub use crate::observability::{LogFormat, TracingConfig, init_tracing};
    pub use crate::structured::StructuredDecoder;
    pub use crate::wasm::{LinearMemoryDecoder, WasmRuntime, WasmRuntimeConfig};
    pub use vlqmap_core::prelude::*;
}
