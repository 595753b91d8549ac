//! Host services used by the benchmark harness.
//!
//! Allows tests to use in-memory files and captured output while the
//! binary uses the real filesystem and stdout.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use vlqmap_core::error::{Result, VlqmapError};

/// Provider trait for the harness's file input and sample output.
pub trait Host: Send + Sync {
    /// Read a UTF-8 text file.
    fn read(&self, path: &Path) -> Result<String>;

    /// Read a file as raw bytes.
    fn read_buffer(&self, path: &Path) -> Result<Vec<u8>>;

    /// Write one line of output.
    fn print(&self, message: &str);
}

fn io_error(path: &Path, cause: impl std::fmt::Display) -> VlqmapError {
    VlqmapError::Io {
        path: path.to_path_buf(),
        cause: cause.to_string(),
    }
}

/// The real filesystem and stdout.
///
/// A failed write to stdout is logged once; later failures are silent.
#[derive(Debug, Default)]
pub struct RealHost {
    print_failed: AtomicBool,
}

impl RealHost {
    /// Create a new real host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any write to stdout has failed.
    pub fn print_failed(&self) -> bool {
        self.print_failed.load(Ordering::Relaxed)
    }

    fn print_to(&self, out: &mut impl Write, message: &str) {
        if let Err(e) = writeln!(out, "{message}") {
            if !self.print_failed.swap(true, Ordering::Relaxed) {
                tracing::warn!(error = %e, "Failed to write sample output");
            }
        }
    }
}

impl Host for RealHost {
    fn read(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| io_error(path, e))
    }

    fn read_buffer(&self, path: &Path) -> Result<Vec<u8>> {
        std::fs::read(path).map_err(|e| io_error(path, e))
    }

    fn print(&self, message: &str) {
        self.print_to(&mut std::io::stdout().lock(), message);
    }
}

/// In-memory files and captured output for testing.
///
/// # Example
///
/// ```
/// use vlqmap_executor::bench::{Host, MockHost};
/// use std::path::Path;
///
/// let host = MockHost::new().with_text_file("/maps/app.js.map", r#"{"mappings":"AAAA"}"#);
///
/// assert!(host.read(Path::new("/maps/app.js.map")).unwrap().contains("AAAA"));
/// host.print("structured-count,0,1.5");
/// assert_eq!(host.printed(), vec!["structured-count,0,1.5".to_string()]);
/// ```
#[derive(Debug, Default)]
pub struct MockHost {
    files: RwLock<HashMap<PathBuf, Vec<u8>>>,
    printed: RwLock<Vec<String>>,
}

impl MockHost {
    /// Create a new host with no files.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file.
    pub fn with_file(self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Self {
        self.files
            .write()
            .insert(path.as_ref().to_path_buf(), contents.as_ref().to_vec());
        self
    }

    /// Add a file with string contents.
    pub fn with_text_file(self, path: impl AsRef<Path>, contents: &str) -> Self {
        self.with_file(path, contents.as_bytes())
    }

    /// Everything printed so far, in order.
    pub fn printed(&self) -> Vec<String> {
        self.printed.read().clone()
    }

    /// Discard captured output.
    pub fn clear_printed(&self) {
        self.printed.write().clear();
    }
}

impl Host for MockHost {
    fn read(&self, path: &Path) -> Result<String> {
        let bytes = self.read_buffer(path)?;
        String::from_utf8(bytes).map_err(|e| io_error(path, e))
    }

    fn read_buffer(&self, path: &Path) -> Result<Vec<u8>> {
        self.files
            .read()
            .get(path)
            .cloned()
            .ok_or_else(|| io_error(path, "file not found"))
    }

    fn print(&self, message: &str) {
        self.printed.write().push(message.to_string());
    }
}
