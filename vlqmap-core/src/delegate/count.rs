//! Line-counting delegate.

use super::{Delegate, SCALA_JS_LINE_COUNT};
use crate::emit::Emitter;
use crate::error::{Result, VlqmapError};

/// Counts lines; segments are discarded.
#[derive(Debug, Clone)]
pub struct CountDelegate {
    lines: usize,
    expected_lines: usize,
}

impl CountDelegate {
    /// Create a delegate expecting `expected_lines` lines.
    pub fn new(expected_lines: usize) -> Self {
        Self {
            lines: 1,
            expected_lines,
        }
    }

    /// Lines counted so far. A document with no `;` has one line.
    pub fn lines(&self) -> usize {
        self.lines
    }
}

impl Default for CountDelegate {
    fn default() -> Self {
        Self::new(SCALA_JS_LINE_COUNT)
    }
}

impl Emitter for CountDelegate {
    #[inline]
    fn emit_mapping1(&mut self, _column: i32) {}

    #[inline]
    fn emit_mapping4(&mut self, _column: i32, _source: i32, _line: i32, _col: i32) {}

    #[inline]
    fn emit_mapping5(&mut self, _column: i32, _source: i32, _line: i32, _col: i32, _name: i32) {}

    #[inline]
    fn emit_newline(&mut self) {
        self.lines += 1;
    }
}

impl Delegate for CountDelegate {
    fn reset(&mut self) {
        self.lines = 1;
    }

    fn validate(&self) -> Result<()> {
        if self.lines != self.expected_lines {
            return Err(VlqmapError::Validation {
                expected: self.expected_lines,
                actual: self.lines,
            });
        }
        Ok(())
    }

    fn line_count(&self) -> usize {
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::decode_mappings;

    #[test]
    fn counts_lines_not_breaks() {
        let mut delegate = CountDelegate::new(3);
        decode_mappings(b"AAAA;;CAAA", &mut delegate);
        assert_eq!(delegate.lines(), 3);
        assert!(delegate.validate().is_ok());
    }

    #[test]
    fn validate_reports_mismatch() {
        let mut delegate = CountDelegate::new(2);
        decode_mappings(b"AAAA", &mut delegate);
        let err = delegate.validate().unwrap_err();
        assert!(matches!(
            err,
            VlqmapError::Validation {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn reset_restores_one_line() {
        let mut delegate = CountDelegate::default();
        decode_mappings(b";;;", &mut delegate);
        assert_eq!(delegate.lines(), 4);
        delegate.reset();
        assert_eq!(delegate.lines(), 1);
    }
}
