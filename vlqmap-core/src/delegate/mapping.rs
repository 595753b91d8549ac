//! Materializing delegate.

use super::{Delegate, SCALA_JS_LINE_COUNT};
use crate::emit::Emitter;
use crate::error::{Result, VlqmapError};
use crate::segment::Segment;

/// Records every segment, grouped by generated line.
#[derive(Debug, Clone)]
pub struct MappingDelegate {
    lines: Vec<Vec<Segment>>,
    expected_lines: usize,
}

impl MappingDelegate {
    /// Create a delegate expecting `expected_lines` lines.
    pub fn new(expected_lines: usize) -> Self {
        Self {
            lines: vec![Vec::new()],
            expected_lines,
        }
    }

    /// Decoded lines. There is always at least one.
    pub fn lines(&self) -> &[Vec<Segment>] {
        &self.lines
    }

    /// Total number of segments across all lines.
    pub fn segment_count(&self) -> usize {
        self.lines.iter().map(Vec::len).sum()
    }

    /// Take the decoded lines, leaving a single empty line behind.
    pub fn take_lines(&mut self) -> Vec<Vec<Segment>> {
        std::mem::replace(&mut self.lines, vec![Vec::new()])
    }

    #[inline]
    fn push(&mut self, segment: Segment) {
        if let Some(line) = self.lines.last_mut() {
            line.push(segment);
        }
    }
}

impl Default for MappingDelegate {
    fn default() -> Self {
        Self::new(SCALA_JS_LINE_COUNT)
    }
}

impl Emitter for MappingDelegate {
    fn emit_mapping1(&mut self, column: i32) {
        self.push(Segment::column_only(column));
    }

    fn emit_mapping4(&mut self, column: i32, source: i32, source_line: i32, source_column: i32) {
        self.push(Segment::with_source(
            column,
            source,
            source_line,
            source_column,
        ));
    }

    fn emit_mapping5(
        &mut self,
        column: i32,
        source: i32,
        source_line: i32,
        source_column: i32,
        name: i32,
    ) {
        self.push(Segment::with_name(
            column,
            source,
            source_line,
            source_column,
            name,
        ));
    }

    fn emit_newline(&mut self) {
        self.lines.push(Vec::new());
    }
}

impl Delegate for MappingDelegate {
    fn reset(&mut self) {
        self.lines.truncate(1);
        if let Some(first) = self.lines.first_mut() {
            first.clear();
        }
    }

    fn validate(&self) -> Result<()> {
        if self.lines.len() != self.expected_lines {
            return Err(VlqmapError::Validation {
                expected: self.expected_lines,
                actual: self.lines.len(),
            });
        }
        Ok(())
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }
}
