//! Base64-VLQ scalar decoding.
//!
//! Each input byte carries one 6-bit digit. Bit 5 is the continuation flag,
//! bits 0-4 are payload. In the first digit bit 0 is the sign and bits 1-4
//! are the lowest four magnitude bits; every following digit adds five more.
//!
//! Decoding is permissive: a byte outside the Base64 alphabet reads as the
//! digit 0 and the value comes out wrong rather than failing.

use crate::cursor::ByteCursor;

/// The Base64 alphabet, in digit order.
pub const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Continuation flag of a digit.
pub const CONTINUATION_BIT: u8 = 0x20;

/// Payload bits of a digit.
pub const PAYLOAD_MASK: u8 = 0x1F;

/// Decoding stops once the magnitude shift reaches this many bits.
pub const MAX_SHIFT: u32 = 30;

/// ASCII byte to digit, indexed by `byte & 0x7F`.
pub static DIGITS: [u8; 128] = build_digit_table();

const fn build_digit_table() -> [u8; 128] {
    let mut table = [0u8; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Map one input byte to its 6-bit digit.
#[inline]
pub fn digit(byte: u8) -> u8 {
    DIGITS[(byte & 0x7F) as usize]
}

/// Decode one VLQ scalar starting at the cursor, leaving the cursor on the
/// byte after the last digit consumed.
#[inline]
pub fn decode_vlq(cursor: &mut ByteCursor<'_>) -> i32 {
    let mut num: u32 = 0;
    let mut shift: u32 = 0;
    let mut negate = false;

    loop {
        let d = digit(cursor.next_byte());
        let cont = d & CONTINUATION_BIT != 0;
        let payload = u32::from(d & PAYLOAD_MASK);

        if shift == 0 {
            negate = payload & 1 != 0;
            num = payload >> 1;
            shift = 4;
        } else {
            num |= payload << shift;
            shift += 5;
        }

        if !cont || shift >= MAX_SHIFT {
            break;
        }
    }

    let num = num as i32;
    if negate { num.wrapping_neg() } else { num }
}
