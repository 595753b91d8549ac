//! Segment state machine.
//!
//! Walks mapping text byte by byte. `,` closes a segment, `;` closes a
//! segment and a line, anything else starts a VLQ scalar that is added to
//! the running total selected by the number of fields seen so far in the
//! current segment.
//!
//! The generated column restarts at every line; source index, original
//! line, original column and name index accumulate over the whole document.

use crate::cursor::{ByteCursor, TERMINATOR};
use crate::emit::Emitter;
use crate::vlq::decode_vlq;

/// Line separator.
pub const LINE_SEPARATOR: u8 = b';';

/// Segment separator.
pub const SEGMENT_SEPARATOR: u8 = b',';

/// Number of positional fields a segment can carry.
pub const MAX_FIELDS: u8 = 5;

/// One decoded mapping entry.
///
/// Fields past `field_count` are zero and carry no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Segment {
    /// How many fields were present in the input: 1, 4 or 5.
    pub field_count: u8,
    /// Generated column.
    pub column: i32,
    /// Index into the source map's `sources`.
    pub source: i32,
    /// Original line.
    pub source_line: i32,
    /// Original column.
    pub source_column: i32,
    /// Index into the source map's `names`.
    pub name: i32,
}

impl Segment {
    /// A segment with only a generated column.
    pub fn column_only(column: i32) -> Self {
        Self {
            field_count: 1,
            column,
            ..Self::default()
        }
    }

    /// A segment pointing at an original position.
    pub fn with_source(column: i32, source: i32, source_line: i32, source_column: i32) -> Self {
        Self {
            field_count: 4,
            column,
            source,
            source_line,
            source_column,
            name: 0,
        }
    }

    /// A segment pointing at an original position with a name.
    pub fn with_name(
        column: i32,
        source: i32,
        source_line: i32,
        source_column: i32,
        name: i32,
    ) -> Self {
        Self {
            field_count: 5,
            column,
            source,
            source_line,
            source_column,
            name,
        }
    }

    /// Whether the segment references an original source position.
    pub fn has_source(&self) -> bool {
        self.field_count >= 4
    }

    /// Whether the segment references a name.
    pub fn has_name(&self) -> bool {
        self.field_count == 5
    }
}

/// The five accumulators plus the field count of the pending segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunningTotals {
    /// Fields decoded so far in the pending segment.
    pub field_count: u8,
    /// Generated column, relative to the current line.
    pub column: i32,
    /// Source index.
    pub source: i32,
    /// Original line.
    pub source_line: i32,
    /// Original column.
    pub source_column: i32,
    /// Name index.
    pub name: i32,
}

impl RunningTotals {
    /// Add a decoded delta to the accumulator for the next field.
    ///
    /// A sixth or later value in one segment is dropped.
    #[inline]
    pub fn accumulate(&mut self, delta: i32) {
        let slot = match self.field_count {
            0 => &mut self.column,
            1 => &mut self.source,
            2 => &mut self.source_line,
            3 => &mut self.source_column,
            4 => &mut self.name,
            _ => return,
        };
        *slot = slot.wrapping_add(delta);
        self.field_count += 1;
    }

    /// Report the pending segment, if it has a reportable shape, and start a
    /// new one. Accumulators keep their values.
    #[inline]
    pub fn flush<E: Emitter + ?Sized>(&mut self, emitter: &mut E) {
        match self.field_count {
            1 => emitter.emit_mapping1(self.column),
            4 => emitter.emit_mapping4(
                self.column,
                self.source,
                self.source_line,
                self.source_column,
            ),
            5 => emitter.emit_mapping5(
                self.column,
                self.source,
                self.source_line,
                self.source_column,
                self.name,
            ),
            _ => {}
        }
        self.field_count = 0;
    }

    /// Close the current line: flush, then restart the generated column.
    #[inline]
    pub fn end_line<E: Emitter + ?Sized>(&mut self, emitter: &mut E) {
        self.flush(emitter);
        emitter.emit_newline();
        self.column = 0;
    }
}

/// Decode a complete `mappings` string, reporting every segment and line
/// break to `emitter`.
///
/// Decoding stops at the end of `bytes` or at the first zero byte.
pub fn decode_mappings<E: Emitter + ?Sized>(bytes: &[u8], emitter: &mut E) {
    let mut cursor = ByteCursor::new(bytes);
    let mut totals = RunningTotals::default();

    loop {
        match cursor.peek() {
            TERMINATOR => break,
            LINE_SEPARATOR => {
                totals.end_line(emitter);
                cursor.advance();
            }
            SEGMENT_SEPARATOR => {
                totals.flush(emitter);
                cursor.advance();
            }
            _ => {
                let delta = decode_vlq(&mut cursor);
                totals.accumulate(delta);
            }
        }
    }

    totals.flush(emitter);
}
