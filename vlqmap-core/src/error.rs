//! Error types for vlqmap.
//!
//! Decoding itself never fails: malformed mappings produce wrong values,
//! not errors. Everything here belongs to the layers around the decoder:
//! configuration, loading the compiled unit, the linear-memory arena,
//! fixture validation and host I/O.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for vlqmap operations.
#[derive(Error, Debug)]
pub enum VlqmapError {
    // =========================================================================
    // Configuration Errors (E001-E099)
    // =========================================================================
    /// Unknown decoder backend name.
    #[error("E001: Unknown decoder kind '{kind}' (expected 'structured' or 'linear-memory')")]
    UnknownDecoderKind {
        /// The name that failed to parse.
        kind: String,
    },

    /// Unknown delegate name.
    #[error("E002: Unknown delegate kind '{kind}' (expected 'count' or 'mapping')")]
    UnknownDelegateKind {
        /// The name that failed to parse.
        kind: String,
    },

    /// Invalid configuration value.
    #[error("E003: Invalid configuration value for '{field}': {cause}")]
    ConfigValue {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        cause: String,
    },

    // =========================================================================
    // Load Errors (E100-E199)
    // =========================================================================
    /// The WebAssembly engine could not be created.
    #[error("E101: Failed to create WASM engine: {cause}")]
    WasmEngine {
        /// Reason for the failure.
        cause: String,
    },

    /// The compiled unit could not be compiled or instantiated.
    #[error("E102: Failed to load WASM module '{module}': {cause}")]
    WasmLoad {
        /// Module name used in diagnostics.
        module: String,
        /// Reason for the failure.
        cause: String,
    },

    /// The compiled unit does not export something the ABI requires.
    #[error("E103: WASM module does not export '{export}'")]
    MissingExport {
        /// The missing export name.
        export: String,
    },

    /// The compiled unit declares an ABI version this host does not speak.
    #[error("E104: WASM module ABI version {found} is not supported (expected {expected})")]
    AbiMismatch {
        /// ABI version implemented by the host.
        expected: i32,
        /// ABI version declared by the module.
        found: i32,
    },

    /// Registering a host import failed.
    #[error("E105: Failed to register host function '{function}': {cause}")]
    WasmHostFunction {
        /// The import name.
        function: String,
        /// Reason for the failure.
        cause: String,
    },

    // =========================================================================
    // Arena / Execution Errors (E200-E299)
    // =========================================================================
    /// Growing the arena would exceed the configured page limit.
    #[error(
        "E201: Arena capacity exceeded: requested {requested} bytes, limit {available} bytes"
    )]
    ArenaCapacity {
        /// Number of bytes the decode needs.
        requested: u64,
        /// Maximum number of bytes the arena may hold.
        available: u64,
    },

    /// An access fell outside the arena.
    #[error("E202: Arena access out of bounds: offset={offset}, size={size}")]
    ArenaAccess {
        /// Start offset of the access.
        offset: u64,
        /// Length of the access.
        size: u64,
    },

    /// The compiled unit trapped while decoding.
    #[error("E203: WASM decode failed: {cause}")]
    WasmExecution {
        /// The trap or call error.
        cause: String,
    },

    // =========================================================================
    // Validation Errors (E300-E399)
    // =========================================================================
    /// A delegate saw a different number of lines than the fixture expects.
    #[error("E301: Mappings incorrect: expected {expected} lines, decoded {actual}")]
    Validation {
        /// Expected number of lines.
        expected: usize,
        /// Number of lines actually decoded.
        actual: usize,
    },

    // =========================================================================
    // Host Errors (E400-E499)
    // =========================================================================
    /// Reading an input file failed.
    #[error("E401: I/O error on {path}: {cause}")]
    Io {
        /// The path being read.
        path: PathBuf,
        /// Reason for the failure.
        cause: String,
    },

    /// The source map document is not valid JSON or has no `mappings` string.
    #[error("E402: Failed to parse source map {path}: {cause}")]
    SourceMapParse {
        /// The source map path.
        path: PathBuf,
        /// Reason for the failure.
        cause: String,
    },
}

impl VlqmapError {
    /// Get the error code (e.g., "E001").
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownDecoderKind { .. } => "E001",
            Self::UnknownDelegateKind { .. } => "E002",
            Self::ConfigValue { .. } => "E003",
            Self::WasmEngine { .. } => "E101",
            Self::WasmLoad { .. } => "E102",
            Self::MissingExport { .. } => "E103",
            Self::AbiMismatch { .. } => "E104",
            Self::WasmHostFunction { .. } => "E105",
            Self::ArenaCapacity { .. } => "E201",
            Self::ArenaAccess { .. } => "E202",
            Self::WasmExecution { .. } => "E203",
            Self::Validation { .. } => "E301",
            Self::Io { .. } => "E401",
            Self::SourceMapParse { .. } => "E402",
        }
    }

    /// Check if this error was raised while building a decoder from configuration.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownDecoderKind { .. }
                | Self::UnknownDelegateKind { .. }
                | Self::ConfigValue { .. }
        )
    }

    /// Check if this error came from loading the compiled unit.
    #[must_use]
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::WasmEngine { .. }
                | Self::WasmLoad { .. }
                | Self::MissingExport { .. }
                | Self::AbiMismatch { .. }
                | Self::WasmHostFunction { .. }
        )
    }
}

/// Result type alias using `VlqmapError`.
pub type Result<T> = std::result::Result<T, VlqmapError>;
