//! Integration tests for the benchmark harness.

mod common;

use common::source_map_json;
use std::time::Duration;
use vlqmap_core::DelegateKind;
use vlqmap_executor::bench::{self, BenchConfig, MockHost};
use vlqmap_executor::factory::DecoderKind;
use vlqmap_executor::wasm::{BUILTIN_MODULE_WAT, WasmRuntimeConfig};

const MAP_PATH: &str = "/maps/app.js.map";

fn host_with(mappings: &str) -> MockHost {
    MockHost::new().with_text_file(MAP_PATH, &source_map_json(mappings))
}

fn config(expected_lines: usize, iterations: usize) -> BenchConfig {
    BenchConfig::new(MAP_PATH)
        .with_expected_lines(expected_lines)
        .with_iterations(iterations)
        .with_delay(Duration::ZERO)
}

fn assert_samples(printed: &[String], label: &str, iterations: usize) {
    assert_eq!(printed.len(), iterations);
    for (i, line) in printed.iter().enumerate() {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 3, "sample {line:?}");
        assert_eq!(fields[0], label);
        assert_eq!(fields[1], i.to_string());
        assert!(fields[2].parse::<f64>().unwrap() >= 0.0);
    }
}

#[tokio::test]
async fn structured_count_run() {
    let host = host_with("AAAA,CAAA;AAAA;;CAAA");
    let report = bench::run(&host, &config(4, 3)).await.unwrap();

    assert_eq!(report.label, "structured-count");
    assert_eq!(report.samples.len(), 3);
    assert_samples(&host.printed(), "structured-count", 3);
    assert!(report.min() <= report.mean() && report.mean() <= report.max());
}

#[tokio::test]
async fn linear_memory_mapping_run() {
    let host = host_with("AAAA,CAAA;AAAA;;CAAA");
    let config = config(4, 2)
        .with_decoder(DecoderKind::LinearMemory)
        .with_delegate(DelegateKind::Mapping);

    let report = bench::run_with_runtime(&host, &config, WasmRuntimeConfig::testing())
        .await
        .unwrap();

    assert_eq!(report.label, "linear-memory-mapping");
    assert_samples(&host.printed(), "linear-memory-mapping", 2);
}

#[tokio::test]
async fn module_is_read_through_host() {
    let host = host_with("A;A").with_text_file("/units/decode.wat", BUILTIN_MODULE_WAT);
    let config = config(2, 1)
        .with_decoder(DecoderKind::LinearMemory)
        .with_module("/units/decode.wat");

    bench::run(&host, &config).await.unwrap();
    assert_samples(&host.printed(), "linear-memory-count", 1);
}

#[tokio::test]
async fn missing_module_is_host_error() {
    let host = host_with("A;A");
    let config = config(2, 1)
        .with_decoder(DecoderKind::LinearMemory)
        .with_module("/units/missing.wasm");

    let err = bench::run(&host, &config).await.unwrap_err();
    assert_eq!(err.code(), "E401");
}

#[tokio::test]
async fn warm_up_validation_failure_stops_the_run() {
    let host = host_with("AAAA;AAAA");
    let err = bench::run(&host, &config(379_201, 5)).await.unwrap_err();

    assert_eq!(err.code(), "E301");
    assert!(err.to_string().contains("Mappings incorrect"));
    assert!(host.printed().is_empty());
}

#[tokio::test]
async fn missing_source_map() {
    let host = MockHost::new();
    let err = bench::run(&host, &config(1, 1)).await.unwrap_err();
    assert_eq!(err.code(), "E401");
}

#[tokio::test]
async fn source_map_without_mappings() {
    let host = MockHost::new().with_text_file(MAP_PATH, r#"{"version":3}"#);
    let err = bench::run(&host, &config(1, 1)).await.unwrap_err();
    assert_eq!(err.code(), "E402");
}

#[tokio::test]
async fn inconsistent_config_is_rejected_before_reading() {
    let host = MockHost::new();
    let config = config(1, 1).with_module("/units/decode.wasm");
    let err = bench::run(&host, &config).await.unwrap_err();
    assert!(err.is_config_error());
}

#[tokio::test]
async fn zero_iterations_only_warms_up() {
    let host = host_with("A");
    let report = bench::run(&host, &config(1, 0)).await.unwrap();
    assert!(report.samples.is_empty());
    assert!(host.printed().is_empty());
    assert_eq!(report.mean(), None);
}

#[tokio::test(start_paused = true)]
async fn delay_separates_samples() {
    let host = host_with("A;A");
    let config = config(2, 4).with_delay(Duration::from_millis(10));

    let started = tokio::time::Instant::now();
    bench::run(&host, &config).await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(40));
    assert_samples(&host.printed(), "structured-count", 4);
}
