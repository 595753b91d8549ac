//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use vlqmap_core::error::{Result, VlqmapError};
use vlqmap_core::{Delegate, Emitter};
use vlqmap_executor::wasm::{WasmRuntime, WasmRuntimeConfig};

/// One emission, as observed by a delegate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Newline,
    Mapping1(i32),
    Mapping4(i32, i32, i32, i32),
    Mapping5(i32, i32, i32, i32, i32),
}

/// A delegate that records every emission in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingDelegate {
    pub events: Vec<Event>,
    pub expected_lines: usize,
}

impl RecordingDelegate {
    pub fn new(expected_lines: usize) -> Self {
        Self {
            events: Vec::new(),
            expected_lines,
        }
    }
}

impl Emitter for RecordingDelegate {
    fn emit_mapping1(&mut self, column: i32) {
        self.events.push(Event::Mapping1(column));
    }

    fn emit_mapping4(&mut self, column: i32, source: i32, source_line: i32, source_column: i32) {
        self.events
            .push(Event::Mapping4(column, source, source_line, source_column));
    }

    fn emit_mapping5(
        &mut self,
        column: i32,
        source: i32,
        source_line: i32,
        source_column: i32,
        name: i32,
    ) {
        self.events.push(Event::Mapping5(
            column,
            source,
            source_line,
            source_column,
            name,
        ));
    }

    fn emit_newline(&mut self) {
        self.events.push(Event::Newline);
    }
}

impl Delegate for RecordingDelegate {
    fn reset(&mut self) {
        self.events.clear();
    }

    fn validate(&self) -> Result<()> {
        let actual = self.line_count();
        if actual == self.expected_lines {
            Ok(())
        } else {
            Err(VlqmapError::Validation {
                expected: self.expected_lines,
                actual,
            })
        }
    }

    fn line_count(&self) -> usize {
        1 + self.events.iter().filter(|e| **e == Event::Newline).count()
    }
}

/// Create a runtime with test limits.
pub fn test_runtime() -> Arc<WasmRuntime> {
    Arc::new(WasmRuntime::new(WasmRuntimeConfig::testing()).expect("Failed to create runtime"))
}

/// A small source map document.
pub fn source_map_json(mappings: &str) -> String {
    format!(r#"{{"version":3,"sources":["input.js"],"names":["x"],"mappings":"{mappings}"}}"#)
}
