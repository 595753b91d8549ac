//! Arena layout of the linear-memory calling convention.
//!
//! ```text
//! 0        128                    512      528            528+len
//! ┌────────┬──────────────────────┬────────┬──────────────┬────┐
//! │ digits │ (module static data) │ header │ mapping text │ \0 │
//! └────────┴──────────────────────┴────────┴──────────────┴────┘
//! ```
//!
//! All header fields are little-endian `u32`.

use byteorder::{ByteOrder, LittleEndian};

/// ABI version spoken by this host.
pub const ABI_VERSION: i32 = 1;

/// WebAssembly page size.
pub const PAGE_SIZE: u64 = 65_536;

/// Arena offset of the reader header.
pub const READER_OFFSET: u32 = 512;

/// Size of the reader header.
pub const READER_HEADER_SIZE: u32 = 16;

/// Header field: read position relative to the string.
pub const POS_FIELD: usize = 0;

/// Header field: arena address of the string.
pub const STR_PTR_FIELD: usize = 4;

/// Header field: string length in bytes.
pub const LEN_FIELD: usize = 8;

/// Arena offset of the mapping text.
pub const STRING_OFFSET: u32 = READER_OFFSET + READER_HEADER_SIZE;

/// Reader state handed to the compiled unit's `decode` entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderHeader {
    /// Read position, relative to `str_ptr`.
    pub pos: u32,
    /// Arena address of the first mapping byte.
    pub str_ptr: u32,
    /// Number of mapping bytes, terminator excluded.
    pub len: u32,
}

impl ReaderHeader {
    /// Header for a fresh decode of `len` bytes at the standard string offset.
    pub fn new(len: u32) -> Self {
        Self {
            pos: 0,
            str_ptr: STRING_OFFSET,
            len,
        }
    }

    /// Encode into the on-arena representation.
    pub fn to_bytes(&self) -> [u8; READER_HEADER_SIZE as usize] {
        let mut buf = [0u8; READER_HEADER_SIZE as usize];
        LittleEndian::write_u32(&mut buf[POS_FIELD..POS_FIELD + 4], self.pos);
        LittleEndian::write_u32(&mut buf[STR_PTR_FIELD..STR_PTR_FIELD + 4], self.str_ptr);
        LittleEndian::write_u32(&mut buf[LEN_FIELD..LEN_FIELD + 4], self.len);
        buf
    }

    /// Decode from the on-arena representation.
    pub fn from_bytes(buf: &[u8; READER_HEADER_SIZE as usize]) -> Self {
        Self {
            pos: LittleEndian::read_u32(&buf[POS_FIELD..POS_FIELD + 4]),
            str_ptr: LittleEndian::read_u32(&buf[STR_PTR_FIELD..STR_PTR_FIELD + 4]),
            len: LittleEndian::read_u32(&buf[LEN_FIELD..LEN_FIELD + 4]),
        }
    }

    /// One past the last arena byte a decode of this header touches,
    /// terminator included.
    pub fn extent(&self) -> u64 {
        u64::from(self.str_ptr) + u64::from(self.len) + 1
    }
}

/// Pages to add so an arena of `current` bytes holds `needed` bytes.
#[inline]
pub fn pages_to_grow(current: u64, needed: u64) -> u64 {
    needed.saturating_sub(current).div_ceil(PAGE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_layout_is_little_endian() {
        let header = ReaderHeader::new(0x0102_0304);
        let bytes = header.to_bytes();
        assert_eq!(&bytes[0..4], &[0, 0, 0, 0]);
        assert_eq!(&bytes[4..8], &528u32.to_le_bytes());
        assert_eq!(&bytes[8..12], &[0x04, 0x03, 0x02, 0x01]);
        assert_eq!(&bytes[12..16], &[0, 0, 0, 0]);
        assert_eq!(ReaderHeader::from_bytes(&bytes), header);
    }

    #[test]
    fn string_follows_header() {
        assert_eq!(STRING_OFFSET, 528);
        assert_eq!(ReaderHeader::new(10).extent(), 539);
    }

    #[test]
    fn growth_rounds_up_to_whole_pages() {
        assert_eq!(pages_to_grow(PAGE_SIZE, 100), 0);
        assert_eq!(pages_to_grow(PAGE_SIZE, PAGE_SIZE), 0);
        assert_eq!(pages_to_grow(PAGE_SIZE, PAGE_SIZE + 1), 1);
        assert_eq!(pages_to_grow(PAGE_SIZE, 3 * PAGE_SIZE), 2);
        assert_eq!(pages_to_grow(PAGE_SIZE, 3 * PAGE_SIZE + 1), 3);
        assert_eq!(pages_to_grow(0, 1), 1);
    }
}
