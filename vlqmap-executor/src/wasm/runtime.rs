//! WASM runtime management using Wasmtime.
//!
//! Provides engine configuration, module compilation, and caching of
//! compiled decode units.

use dashmap::DashMap;
use std::sync::Arc;
use vlqmap_core::error::{Result, VlqmapError};
use wasmtime::{Config, Engine, Module};

/// Default maximum arena size in pages (64 KB per page).
const DEFAULT_MAX_MEMORY_PAGES: u64 = 16_384; // 1 GB

/// Default fuel amount for execution limiting.
const DEFAULT_FUEL: u64 = 10_000_000;

/// Configuration for the WASM runtime.
#[derive(Debug, Clone)]
pub struct WasmRuntimeConfig {
    /// Maximum arena pages a decoder may grow to (64 KB per page).
    pub max_memory_pages: u64,
    /// Whether to meter execution with fuel.
    pub fuel_enabled: bool,
    /// Fuel granted to each decode call when metering is enabled.
    pub fuel_amount: u64,
    /// Whether to cache compiled modules.
    pub cache_modules: bool,
    /// Enable debug info in compiled modules.
    pub debug_info: bool,
}

impl Default for WasmRuntimeConfig {
    fn default() -> Self {
        Self {
            max_memory_pages: DEFAULT_MAX_MEMORY_PAGES,
            fuel_enabled: false,
            fuel_amount: DEFAULT_FUEL,
            cache_modules: true,
            debug_info: false,
        }
    }
}

impl WasmRuntimeConfig {
    /// Create a configuration for testing with stricter limits.
    pub fn testing() -> Self {
        Self {
            max_memory_pages: 256, // 16 MB
            fuel_enabled: true,
            fuel_amount: 100_000_000,
            cache_modules: false,
            debug_info: true,
        }
    }

    /// Set maximum memory pages.
    pub fn with_max_memory_pages(mut self, pages: u64) -> Self {
        self.max_memory_pages = pages;
        self
    }

    /// Enable or disable fuel-based limiting.
    pub fn with_fuel(mut self, enabled: bool, amount: u64) -> Self {
        self.fuel_enabled = enabled;
        self.fuel_amount = amount;
        self
    }

    /// Enable or disable module caching.
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache_modules = enabled;
        self
    }

    /// Create a Wasmtime Config from this configuration.
    fn to_wasmtime_config(&self) -> Config {
        let mut config = Config::new();

        config.consume_fuel(self.fuel_enabled);
        config.debug_info(self.debug_info);
        config.strategy(wasmtime::Strategy::Cranelift);

        config
    }
}

/// A compiled decode unit ready for instantiation.
pub struct CompiledModule {
    /// The compiled Wasmtime module.
    module: Module,
    /// Hash of the original module bytes (for caching).
    hash: u64,
}

impl CompiledModule {
    /// Get the underlying Wasmtime module.
    pub fn module(&self) -> &Module {
        &self.module
    }

    /// Get the hash of this module.
    pub fn hash(&self) -> u64 {
        self.hash
    }
}

/// WASM runtime managing the Wasmtime engine and compiled modules.
///
/// Cheap to share behind an `Arc`; compilation may run on any thread.
pub struct WasmRuntime {
    /// The Wasmtime engine (thread-safe, can be shared).
    engine: Engine,
    /// Configuration for this runtime.
    config: WasmRuntimeConfig,
    /// Cache of compiled modules by their content hash.
    module_cache: DashMap<u64, Arc<CompiledModule>>,
}

impl WasmRuntime {
    /// Create a new WASM runtime with the given configuration.
    pub fn new(config: WasmRuntimeConfig) -> Result<Self> {
        let wasmtime_config = config.to_wasmtime_config();
        let engine = Engine::new(&wasmtime_config).map_err(|e| VlqmapError::WasmEngine {
            cause: e.to_string(),
        })?;

        Ok(Self {
            engine,
            config,
            module_cache: DashMap::new(),
        })
    }

    /// Create a new runtime with default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(WasmRuntimeConfig::default())
    }

    /// Get the Wasmtime engine.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Get the runtime configuration.
    pub fn config(&self) -> &WasmRuntimeConfig {
        &self.config
    }

    /// Compile module bytes (binary or text format).
    ///
    /// If caching is enabled and the module was previously compiled,
    /// returns the cached version.
    pub fn compile(&self, name: &str, bytes: &[u8]) -> Result<Arc<CompiledModule>> {
        let hash = hash_bytes(bytes);

        if self.config.cache_modules {
            if let Some(cached) = self.module_cache.get(&hash) {
                tracing::debug!(module = name, hash, "Using cached decode module");
                return Ok(Arc::clone(&cached));
            }
        }

        let module = Module::new(&self.engine, bytes).map_err(|e| VlqmapError::WasmLoad {
            module: name.to_string(),
            cause: e.to_string(),
        })?;
        tracing::debug!(module = name, hash, size = bytes.len(), "Compiled decode module");

        let compiled = Arc::new(CompiledModule { module, hash });

        if self.config.cache_modules {
            self.module_cache.insert(hash, Arc::clone(&compiled));
        }

        Ok(compiled)
    }

    /// Clear the module cache.
    pub fn clear_cache(&self) {
        self.module_cache.clear();
    }

    /// Get the number of cached modules.
    pub fn cache_size(&self) -> usize {
        self.module_cache.len()
    }

    /// Fuel to grant each decode call, if metering is enabled.
    pub fn fuel_per_call(&self) -> Option<u64> {
        if self.config.fuel_enabled {
            Some(self.config.fuel_amount)
        } else {
            None
        }
    }
}

/// Compute a hash of bytes (for cache key).
fn hash_bytes(bytes: &[u8]) -> u64 {
    use std::hash::{Hash, Hasher};

    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    bytes.hash(&mut hasher);
    hasher.finish()
}
