//! Decoder backend running inside a WebAssembly instance.

use super::host::create_linker;
use super::layout::{ABI_VERSION, READER_OFFSET};
use super::memory::LinearArena;
use super::runtime::{CompiledModule, WasmRuntime};
use crate::decoder::Decoder;
use vlqmap_core::Delegate;
use vlqmap_core::error::{Result, VlqmapError};
use wasmtime::{Store, TypedFunc, Val};

/// Export holding the module's linear memory.
const MEMORY_EXPORT: &str = "memory";

/// Export of the decode entry point, `decode(reader: i32)`.
const DECODE_EXPORT: &str = "decode";

/// Optional export declaring the module's ABI version.
const ABI_VERSION_EXPORT: &str = "abi_version";

/// A decoder whose state machine runs in a WebAssembly instance.
///
/// Each decode copies the input into the instance's memory behind a reader
/// header and calls the exported entry point. Results come back through
/// the emission imports into the delegate held as store data.
pub struct LinearMemoryDecoder<D: 'static> {
    store: Store<D>,
    arena: LinearArena,
    decode_fn: TypedFunc<i32, ()>,
    fuel_per_call: Option<u64>,
}

impl<D: Delegate + 'static> LinearMemoryDecoder<D> {
    /// Instantiate `module` with `delegate` bound to its emission imports.
    ///
    /// Fails with a load error if instantiation fails, a required export
    /// is missing, or the module declares a different ABI version.
    pub fn new(runtime: &WasmRuntime, module: &CompiledModule, delegate: D) -> Result<Self> {
        let mut store = Store::new(runtime.engine(), delegate);
        if let Some(fuel) = runtime.fuel_per_call() {
            store.set_fuel(fuel).map_err(|e| VlqmapError::WasmEngine {
                cause: format!("Failed to set fuel: {e}"),
            })?;
        }
        let linker = create_linker(runtime.engine())?;
        let instance = linker
            .instantiate(&mut store, module.module())
            .map_err(|e| VlqmapError::WasmLoad {
                module: format!("{:016x}", module.hash()),
                cause: format!("Failed to instantiate module: {e}"),
            })?;

        if let Some(global) = instance.get_global(&mut store, ABI_VERSION_EXPORT) {
            let found = match global.get(&mut store) {
                Val::I32(version) => version,
                _ => -1,
            };
            if found != ABI_VERSION {
                return Err(VlqmapError::AbiMismatch {
                    expected: ABI_VERSION,
                    found,
                });
            }
        }

        let memory = instance
            .get_memory(&mut store, MEMORY_EXPORT)
            .ok_or_else(|| VlqmapError::MissingExport {
                export: MEMORY_EXPORT.to_string(),
            })?;

        let decode_fn = instance
            .get_typed_func::<i32, ()>(&mut store, DECODE_EXPORT)
            .map_err(|_| VlqmapError::MissingExport {
                export: DECODE_EXPORT.to_string(),
            })?;

        let arena = LinearArena::new(memory, runtime.config().max_memory_pages);
        tracing::debug!(
            module_hash = module.hash(),
            arena_pages = arena.pages(&store),
            "Instantiated linear-memory decoder"
        );

        Ok(Self {
            store,
            arena,
            decode_fn,
            fuel_per_call: runtime.fuel_per_call(),
        })
    }

    /// Current arena size in bytes.
    pub fn arena_size(&self) -> u64 {
        self.arena.size(&self.store)
    }

    /// Current arena size in pages.
    pub fn arena_pages(&self) -> u64 {
        self.arena.pages(&self.store)
    }

    /// Copy bytes out of the arena.
    pub fn read_arena(&self, offset: u64, size: u64) -> Result<Vec<u8>> {
        self.arena.read_at(&self.store, offset, size)
    }

    /// Overwrite bytes in the arena.
    pub fn write_arena(&mut self, offset: u64, data: &[u8]) -> Result<()> {
        self.arena.write_at(&mut self.store, offset, data)
    }

    /// Unbind and return the delegate.
    pub fn into_delegate(self) -> D {
        self.store.into_data()
    }
}

impl<D: Delegate + 'static> Decoder<D> for LinearMemoryDecoder<D> {
    fn decode(&mut self, mappings: &str) -> Result<()> {
        self.arena.write_reader(&mut self.store, mappings.as_bytes())?;

        if let Some(fuel) = self.fuel_per_call {
            self.store
                .set_fuel(fuel)
                .map_err(|e| VlqmapError::WasmExecution {
                    cause: format!("Failed to set fuel: {e}"),
                })?;
        }

        self.decode_fn
            .call(&mut self.store, READER_OFFSET as i32)
            .map_err(|e| VlqmapError::WasmExecution {
                cause: format!("{e:#}"),
            })
    }

    fn delegate(&self) -> &D {
        self.store.data()
    }

    fn delegate_mut(&mut self) -> &mut D {
        self.store.data_mut()
    }

    fn backend(&self) -> &'static str {
        "linear-memory"
    }
}
