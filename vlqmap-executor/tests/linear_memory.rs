//! Integration tests for the linear-memory backend: arena management,
//! module loading and the ABI checks.

mod common;

use common::{Event, RecordingDelegate};
use vlqmap_core::Delegate;
use vlqmap_executor::decoder::Decoder;
use vlqmap_executor::wasm::{
    BUILTIN_MODULE_NAME, LinearMemoryDecoder, PAGE_SIZE, STRING_OFFSET, WasmRuntime,
    WasmRuntimeConfig, builtin_module,
};

fn builtin_decoder(config: WasmRuntimeConfig) -> LinearMemoryDecoder<RecordingDelegate> {
    let runtime = WasmRuntime::new(config).expect("Failed to create runtime");
    let module = runtime
        .compile(BUILTIN_MODULE_NAME, &builtin_module().unwrap())
        .unwrap();
    LinearMemoryDecoder::new(&runtime, &module, RecordingDelegate::new(1)).unwrap()
}

fn decoder_for(wat: &str) -> vlqmap_core::Result<LinearMemoryDecoder<RecordingDelegate>> {
    let runtime = WasmRuntime::new(WasmRuntimeConfig::testing()).expect("Failed to create runtime");
    let bytes = wat::parse_str(wat).expect("Failed to parse WAT");
    let module = runtime.compile("test_module", &bytes)?;
    LinearMemoryDecoder::new(&runtime, &module, RecordingDelegate::new(1))
}

#[test]
fn arena_starts_at_one_page() {
    let decoder = builtin_decoder(WasmRuntimeConfig::testing());
    assert_eq!(decoder.arena_pages(), 1);
    assert_eq!(decoder.arena_size(), PAGE_SIZE);
}

#[test]
fn small_input_does_not_grow_arena() {
    let mut decoder = builtin_decoder(WasmRuntimeConfig::testing());
    for _ in 0..10 {
        decoder.decode("AAAA,CAAA;AAAA").unwrap();
    }
    assert_eq!(decoder.arena_pages(), 1);
}

#[test]
fn arena_grows_by_whole_pages() {
    let mut decoder = builtin_decoder(WasmRuntimeConfig::testing());

    // 528 + 70_000 + 1 bytes fit in two pages.
    decoder.decode(&"A".repeat(70_000)).unwrap();
    assert_eq!(decoder.arena_pages(), 2);

    // 528 + 200_000 + 1 bytes need four.
    decoder.decode(&"A".repeat(200_000)).unwrap();
    assert_eq!(decoder.arena_pages(), 4);
    assert_eq!(decoder.arena_size(), 4 * PAGE_SIZE);
}

#[test]
fn exact_fit_does_not_grow() {
    let mut decoder = builtin_decoder(WasmRuntimeConfig::testing());
    let fits = PAGE_SIZE as usize - STRING_OFFSET as usize - 1;
    decoder.decode(&"A".repeat(fits)).unwrap();
    assert_eq!(decoder.arena_pages(), 1);

    decoder.decode(&"A".repeat(fits + 1)).unwrap();
    assert_eq!(decoder.arena_pages(), 2);
}

#[test]
fn smaller_decode_keeps_arena_and_leaves_tail_untouched() {
    let mut decoder = builtin_decoder(WasmRuntimeConfig::testing());
    decoder.decode(&"A".repeat(200_000)).unwrap();
    let pages = decoder.arena_pages();

    let sentinel = b"sentinel";
    decoder.write_arena(250_000, sentinel).unwrap();

    decoder.decode("CAAA;").unwrap();
    assert_eq!(decoder.arena_pages(), pages);

    let start = u64::from(STRING_OFFSET);
    assert_eq!(decoder.read_arena(start, 6).unwrap(), b"CAAA;\0");
    // The previous input past the new terminator is still there.
    assert!(
        decoder
            .read_arena(start + 6, 1_000)
            .unwrap()
            .iter()
            .all(|&b| b == b'A')
    );
    assert_eq!(decoder.read_arena(250_000, 8).unwrap(), sentinel);
}

#[test]
fn digit_table_survives_decoding() {
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
    let mut expected = [0u8; 128];
    for (value, &ch) in ALPHABET.iter().enumerate() {
        expected[ch as usize] = value as u8;
    }

    let mut decoder = builtin_decoder(WasmRuntimeConfig::testing());
    decoder.decode(&"gB,".repeat(50_000)).unwrap();
    assert_eq!(decoder.read_arena(0, 128).unwrap(), expected.to_vec());
}

#[test]
fn capacity_limit_is_an_error() {
    let mut decoder = builtin_decoder(WasmRuntimeConfig::testing().with_max_memory_pages(2));
    decoder.decode(&"A".repeat(100_000)).unwrap();

    let err = decoder.decode(&"A".repeat(200_000)).unwrap_err();
    assert_eq!(err.code(), "E201");
    assert_eq!(decoder.arena_pages(), 2);

    // The decoder is still usable afterwards.
    decoder.delegate_mut().reset();
    decoder.decode("A").unwrap();
    assert_eq!(decoder.delegate().events, vec![Event::Mapping1(0)]);
}

#[test]
fn invalid_module_is_a_load_error() {
    let runtime = WasmRuntime::with_defaults().expect("Failed to create runtime");
    let err = runtime.compile("invalid", b"not a wasm module").err().unwrap();
    assert_eq!(err.code(), "E102");
}

#[test]
fn module_without_decode_export() {
    let err = decoder_for(r#"(module (memory (export "memory") 1))"#)
        .err()
        .unwrap();
    assert_eq!(err.code(), "E103");
    assert!(err.to_string().contains("decode"));
}

#[test]
fn module_without_memory_export() {
    let err = decoder_for(r#"(module (func (export "decode") (param i32)))"#)
        .err()
        .unwrap();
    assert_eq!(err.code(), "E103");
    assert!(err.to_string().contains("memory"));
}

#[test]
fn decode_with_wrong_signature_is_missing() {
    let err = decoder_for(
        r#"(module
            (memory (export "memory") 1)
            (func (export "decode") (param i32 i32)))"#,
    )
    .err()
    .unwrap();
    assert_eq!(err.code(), "E103");
}

#[test]
fn abi_version_mismatch() {
    let err = decoder_for(
        r#"(module
            (memory (export "memory") 1)
            (global (export "abi_version") i32 (i32.const 2))
            (func (export "decode") (param i32)))"#,
    )
    .err()
    .unwrap();
    assert_eq!(err.code(), "E104");
    assert!(err.is_load_error());
}

#[test]
fn unknown_import_fails_instantiation() {
    let err = decoder_for(
        r#"(module
            (import "env" "emitEverything" (func))
            (memory (export "memory") 1)
            (func (export "decode") (param i32)))"#,
    )
    .err()
    .unwrap();
    assert_eq!(err.code(), "E102");
}

#[test]
fn foreign_module_without_abi_global_reports_through_imports() {
    let mut decoder = decoder_for(
        r#"(module
            (import "env" "emitNewline" (func $newline))
            (import "env" "emitMapping5" (func $m5 (param i32 i32 i32 i32 i32)))
            (memory (export "memory") 1)
            (func (export "decode") (param $reader i32)
                ;; report the string length read from the header
                (call $m5
                    (i32.load offset=8 (local.get $reader))
                    (i32.load offset=4 (local.get $reader))
                    (i32.load (local.get $reader))
                    (i32.const 0)
                    (local.get $reader))
                (call $newline)))"#,
    )
    .unwrap();

    decoder.decode("AAAA;AAAA").unwrap();
    assert_eq!(
        decoder.delegate().events,
        vec![Event::Mapping5(9, 528, 0, 0, 512), Event::Newline]
    );
    assert!(decoder.delegate().validate().is_err());
}

#[test]
fn trap_is_an_execution_error() {
    let mut decoder = decoder_for(
        r#"(module
            (memory (export "memory") 1)
            (func (export "decode") (param i32) unreachable))"#,
    )
    .unwrap();

    let err = decoder.decode("AAAA").unwrap_err();
    assert_eq!(err.code(), "E203");
    assert!(!err.is_load_error());
}

#[test]
fn fuel_exhaustion_is_an_execution_error() {
    let runtime = WasmRuntime::new(WasmRuntimeConfig::default().with_fuel(true, 10_000))
        .expect("Failed to create runtime");
    let bytes = wat::parse_str(
        r#"(module
            (memory (export "memory") 1)
            (func (export "decode") (param i32) (loop $spin (br $spin))))"#,
    )
    .unwrap();
    let module = runtime.compile("spin", &bytes).unwrap();
    let mut decoder =
        LinearMemoryDecoder::new(&runtime, &module, RecordingDelegate::new(1)).unwrap();

    assert_eq!(decoder.decode("A").unwrap_err().code(), "E203");
    // Fuel is refilled on every call.
    assert_eq!(decoder.decode("A").unwrap_err().code(), "E203");
}
