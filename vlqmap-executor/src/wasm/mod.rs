//! Linear-memory decoder backend.
//!
//! The decoder state machine runs inside a WebAssembly module (the
//! "compiled unit"). The host copies the mapping text into the module's
//! memory and receives results through imported emission functions.
//!
//! # Architecture
//!
//! - **WasmRuntime**: Manages the Wasmtime engine and compiled modules
//! - **LinearArena**: The module's memory, grown in whole pages on demand
//! - **LinearMemoryDecoder**: Implements [`Decoder`](crate::decoder::Decoder)
//!   over one module instance
//!
//! # Module ABI Contract (version 1)
//!
//! Modules must export:
//!
//! ```text
//! memory: Memory
//! decode(reader: i32)            // Decode the string described at `reader`
//! abi_version: i32 global        // Optional; must be 1 when present
//! ```
//!
//! Modules import from the `env` namespace:
//!
//! ```text
//! emitNewline()
//! emitMapping1(column)
//! emitMapping4(column, source, sourceLine, sourceColumn)
//! emitMapping5(column, source, sourceLine, sourceColumn, name)
//! ```
//!
//! The host always places the reader header at address 512 and the string
//! at 528, followed by a zero byte. Addresses below 512 belong to the
//! module.
//!
//! # Example
//!
//! ```ignore
//! use vlqmap_executor::wasm::{LinearMemoryDecoder, WasmRuntime, builtin_module};
//! use vlqmap_core::CountDelegate;
//!
//! let runtime = WasmRuntime::with_defaults()?;
//! let module = runtime.compile("builtin", &builtin_module()?)?;
//! let mut decoder = LinearMemoryDecoder::new(&runtime, &module, CountDelegate::new(2))?;
//! decoder.decode("AAAA;AAAA")?;
//! ```

mod decoder;
mod host;
pub mod layout;
mod memory;
mod runtime;

pub use decoder::LinearMemoryDecoder;
pub use host::{IMPORT_MODULE, create_linker, register_emit_functions};
pub use layout::{ABI_VERSION, PAGE_SIZE, READER_OFFSET, ReaderHeader, STRING_OFFSET};
pub use memory::LinearArena;
pub use runtime::{CompiledModule, WasmRuntime, WasmRuntimeConfig};

use vlqmap_core::error::{Result, VlqmapError};

/// Name the built-in unit is registered under.
pub const BUILTIN_MODULE_NAME: &str = "builtin-decode";

/// Text of the built-in compiled unit.
pub const BUILTIN_MODULE_WAT: &str = include_str!("decode.wat");

/// Assemble the built-in compiled unit into binary form.
pub fn builtin_module() -> Result<Vec<u8>> {
    wat::parse_str(BUILTIN_MODULE_WAT).map_err(|e| VlqmapError::WasmLoad {
        module: BUILTIN_MODULE_NAME.to_string(),
        cause: e.to_string(),
    })
}
