//! Byte cursor over mapping text.

/// Sentinel returned when the cursor runs past the end of its input.
pub const TERMINATOR: u8 = 0;

/// A read position over borrowed mapping bytes.
///
/// The end of the slice behaves like a trailing zero byte, so callers never
/// need to copy the input just to append a terminator. An embedded zero byte
/// ends decoding the same way.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at the first byte.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Current read position.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Look at the byte under the cursor without consuming it.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.bytes.get(self.pos).copied().unwrap_or(TERMINATOR)
    }

    /// Consume and return the byte under the cursor.
    #[inline]
    pub fn next_byte(&mut self) -> u8 {
        let byte = self.peek();
        self.pos += 1;
        byte
    }

    /// Skip the byte under the cursor.
    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_of_input_reads_as_terminator() {
        let mut cursor = ByteCursor::new(b"A;");
        assert_eq!(cursor.next_byte(), b'A');
        assert_eq!(cursor.peek(), b';');
        cursor.advance();
        assert_eq!(cursor.peek(), TERMINATOR);
        assert_eq!(cursor.next_byte(), TERMINATOR);
        assert_eq!(cursor.position(), 3);
    }
}
