//! Host function bindings for the decode unit.
//!
//! The compiled unit reports results only through four imports in the
//! `env` namespace. Each forwards to the delegate stored as the
//! `Store` data.
//!
//! ```text
//! emitNewline()
//! emitMapping1(column: i32)
//! emitMapping4(column: i32, source: i32, sourceLine: i32, sourceColumn: i32)
//! emitMapping5(column: i32, source: i32, sourceLine: i32, sourceColumn: i32, name: i32)
//! ```

use vlqmap_core::{Delegate, Emitter};
use vlqmap_core::error::{Result, VlqmapError};
use wasmtime::{Caller, Engine, Linker};

/// Import namespace of the emission functions.
pub const IMPORT_MODULE: &str = "env";

/// Register the emission imports with a Wasmtime Linker.
pub fn register_emit_functions<D: Delegate + 'static>(linker: &mut Linker<D>) -> Result<()> {
    linker
        .func_wrap(
            IMPORT_MODULE,
            "emitNewline",
            |mut caller: Caller<'_, D>| caller.data_mut().emit_newline(),
        )
        .map_err(|e| host_function_error("emitNewline", e))?;

    linker
        .func_wrap(
            IMPORT_MODULE,
            "emitMapping1",
            |mut caller: Caller<'_, D>, column: i32| caller.data_mut().emit_mapping1(column),
        )
        .map_err(|e| host_function_error("emitMapping1", e))?;

    linker
        .func_wrap(
            IMPORT_MODULE,
            "emitMapping4",
            |mut caller: Caller<'_, D>,
             column: i32,
             source: i32,
             source_line: i32,
             source_column: i32| {
                caller
                    .data_mut()
                    .emit_mapping4(column, source, source_line, source_column)
            },
        )
        .map_err(|e| host_function_error("emitMapping4", e))?;

    linker
        .func_wrap(
            IMPORT_MODULE,
            "emitMapping5",
            |mut caller: Caller<'_, D>,
             column: i32,
             source: i32,
             source_line: i32,
             source_column: i32,
             name: i32| {
                caller
                    .data_mut()
                    .emit_mapping5(column, source, source_line, source_column, name)
            },
        )
        .map_err(|e| host_function_error("emitMapping5", e))?;

    Ok(())
}

fn host_function_error(function: &str, e: impl std::fmt::Display) -> VlqmapError {
    VlqmapError::WasmHostFunction {
        function: function.to_string(),
        cause: e.to_string(),
    }
}

/// Create a linker with the emission imports registered.
pub fn create_linker<D: Delegate + 'static>(engine: &Engine) -> Result<Linker<D>> {
    let mut linker = Linker::new(engine);
    register_emit_functions(&mut linker)?;
    Ok(linker)
}
