//! Source map input documents.

use super::host::Host;
use serde::Deserialize;
use std::path::Path;
use vlqmap_core::error::{Result, VlqmapError};

/// The part of a revision 3 source map the benchmark reads.
///
/// Every other field is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceMapDocument {
    /// Encoded mapping segments.
    pub mappings: String,
}

impl SourceMapDocument {
    /// Parse a source map from JSON text.
    pub fn from_json(path: &Path, text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| VlqmapError::SourceMapParse {
            path: path.to_path_buf(),
            cause: e.to_string(),
        })
    }
}

/// Read the `mappings` string of the source map at `path`.
pub fn read_mappings(host: &dyn Host, path: &Path) -> Result<String> {
    let text = host.read(path)?;
    let document = SourceMapDocument::from_json(path, &text)?;
    tracing::debug!(
        path = %path.display(),
        bytes = document.mappings.len(),
        "Read source map"
    );
    Ok(document.mappings)
}
