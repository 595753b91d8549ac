//! Emission protocol between the decoder and its consumer.

/// Receives decoded segments and line breaks, in input order.
///
/// Exactly one `emit_mapping*` call is made per completed segment, chosen
/// by how many fields the segment carried. Segments with two or three
/// fields are never reported. `emit_newline` is called once per `;`; the
/// last line of a document is not followed by one.
///
/// The four methods mirror the imports of the linear-memory calling
/// convention, so the same implementation serves both decoder backends.
pub trait Emitter {
    /// A segment that carried only a generated column.
    fn emit_mapping1(&mut self, column: i32);

    /// A segment with generated column and an original position.
    fn emit_mapping4(&mut self, column: i32, source: i32, source_line: i32, source_column: i32);

    /// A segment with generated column, original position and a name.
    fn emit_mapping5(
        &mut self,
        column: i32,
        source: i32,
        source_line: i32,
        source_column: i32,
        name: i32,
    );

    /// End of the current generated line.
    fn emit_newline(&mut self);
}

impl<E: Emitter + ?Sized> Emitter for &mut E {
    fn emit_mapping1(&mut self, column: i32) {
        (**self).emit_mapping1(column);
    }

    fn emit_mapping4(&mut self, column: i32, source: i32, source_line: i32, source_column: i32) {
        (**self).emit_mapping4(column, source, source_line, source_column);
    }

    fn emit_mapping5(
        &mut self,
        column: i32,
        source: i32,
        source_line: i32,
        source_column: i32,
        name: i32,
    ) {
        (**self).emit_mapping5(column, source, source_line, source_column, name);
    }

    fn emit_newline(&mut self) {
        (**self).emit_newline();
    }
}
