//! Decode command - decode one source map and print statistics.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use vlqmap_core::MappingDelegate;
use vlqmap_executor::bench::{Host, RealHost, read_mappings};
use vlqmap_executor::decoder::Decoder;
use vlqmap_executor::factory::{DecoderFactory, DecoderKind};
use vlqmap_executor::wasm::WasmRuntime;

/// Run the decode command.
pub async fn run(path: &Path, decoder: DecoderKind, module: Option<&Path>) -> Result<()> {
    let host = RealHost::new();
    let mappings = read_mappings(&host, path)?;

    let factory = match (decoder, module) {
        (DecoderKind::Structured, None) => DecoderFactory::structured(),
        (DecoderKind::Structured, Some(_)) => {
            anyhow::bail!("--module is only used by the linear-memory decoder")
        }
        (DecoderKind::LinearMemory, module) => {
            let runtime = Arc::new(WasmRuntime::with_defaults()?);
            match module {
                Some(module) => DecoderFactory::linear_memory(
                    runtime,
                    module.display().to_string(),
                    host.read_buffer(module)?,
                ),
                None => DecoderFactory::builtin_linear_memory(runtime)?,
            }
        }
    };

    // Line count is unknown up front; nothing is validated here.
    let mut decoder = factory.create(MappingDelegate::new(1)).await?;

    let start = Instant::now();
    decoder
        .decode(&mappings)
        .with_context(|| format!("Failed to decode {}", path.display()))?;
    let elapsed = start.elapsed();

    let delegate = decoder.delegate();
    let mut by_fields = [0usize; 6];
    for segment in delegate.lines().iter().flatten() {
        by_fields[usize::from(segment.field_count)] += 1;
    }

    println!("Decoded: {}", path.display());
    println!("========={}", "=".repeat(path.display().to_string().len()));
    println!();
    println!("Decoder:     {}", decoder.backend());
    println!("Bytes:       {}", mappings.len());
    println!("Lines:       {}", delegate.lines().len());
    println!("Segments:    {}", delegate.segment_count());
    println!("  1 field:   {}", by_fields[1]);
    println!("  4 fields:  {}", by_fields[4]);
    println!("  5 fields:  {}", by_fields[5]);
    println!("Time:        {:.3} ms", elapsed.as_secs_f64() * 1_000.0);

    Ok(())
}
