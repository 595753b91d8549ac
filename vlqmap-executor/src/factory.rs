//! Runtime selection and construction of decoder backends.

use crate::decoder::Decoder;
use crate::structured::StructuredDecoder;
use crate::wasm::{BUILTIN_MODULE_NAME, LinearMemoryDecoder, WasmRuntime, builtin_module};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use vlqmap_core::Delegate;
use vlqmap_core::error::{Result, VlqmapError};

/// Which decoder backend to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecoderKind {
    /// [`StructuredDecoder`].
    Structured,
    /// [`LinearMemoryDecoder`].
    LinearMemory,
}

impl DecoderKind {
    /// The name used on the command line and in sample labels.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Structured => "structured",
            Self::LinearMemory => "linear-memory",
        }
    }
}

impl fmt::Display for DecoderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecoderKind {
    type Err = VlqmapError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "structured" => Ok(Self::Structured),
            "linear-memory" => Ok(Self::LinearMemory),
            other => Err(VlqmapError::UnknownDecoderKind {
                kind: other.to_string(),
            }),
        }
    }
}

/// Creates decoders of one kind, binding each to the delegate it is given.
#[derive(Clone)]
pub enum DecoderFactory {
    /// Produces [`StructuredDecoder`]s.
    Structured,
    /// Produces [`LinearMemoryDecoder`]s over a compiled unit.
    LinearMemory {
        /// Runtime the unit is compiled and instantiated in.
        runtime: Arc<WasmRuntime>,
        /// Name used in diagnostics.
        name: String,
        /// WebAssembly binary or text.
        bytes: Arc<[u8]>,
    },
}

impl fmt::Debug for DecoderFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structured => f.write_str("Structured"),
            Self::LinearMemory { name, bytes, .. } => f
                .debug_struct("LinearMemory")
                .field("name", name)
                .field("size", &bytes.len())
                .finish(),
        }
    }
}

impl DecoderFactory {
    /// Factory for the in-process backend.
    pub fn structured() -> Self {
        Self::Structured
    }

    /// Factory for the linear-memory backend over `bytes`.
    pub fn linear_memory(
        runtime: Arc<WasmRuntime>,
        name: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self::LinearMemory {
            runtime,
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Factory for the linear-memory backend over the built-in unit.
    pub fn builtin_linear_memory(runtime: Arc<WasmRuntime>) -> Result<Self> {
        Ok(Self::linear_memory(
            runtime,
            BUILTIN_MODULE_NAME,
            builtin_module()?,
        ))
    }

    /// The kind of decoder this factory creates.
    pub fn kind(&self) -> DecoderKind {
        match self {
            Self::Structured => DecoderKind::Structured,
            Self::LinearMemory { .. } => DecoderKind::LinearMemory,
        }
    }

    /// Create a decoder bound to `delegate`.
    ///
    /// Compiling the unit happens on the blocking pool; instantiation is
    /// cheap and stays on the caller's task. Fails with a load error if the
    /// unit does not compile, instantiate or match the ABI.
    pub async fn create<D>(&self, delegate: D) -> Result<Box<dyn Decoder<D> + Send>>
    where
        D: Delegate + Send + 'static,
    {
        match self {
            Self::Structured => Ok(Box::new(StructuredDecoder::new(delegate))),
            Self::LinearMemory {
                runtime,
                name,
                bytes,
            } => {
                let compile_runtime = Arc::clone(runtime);
                let compile_name = name.clone();
                let compile_bytes = Arc::clone(bytes);
                let module = tokio::task::spawn_blocking(move || {
                    compile_runtime.compile(&compile_name, &compile_bytes)
                })
                .await
                .map_err(|e| VlqmapError::WasmLoad {
                    module: name.clone(),
                    cause: format!("Compilation task failed: {e}"),
                })??;

                let decoder = LinearMemoryDecoder::new(runtime, &module, delegate)?;
                tracing::debug!(module = %name, "Created linear-memory decoder");
                Ok(Box::new(decoder))
            }
        }
    }
}
