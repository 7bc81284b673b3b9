//! Low-level byte reading utilities
//!
//! Every read is bounds-checked against the underlying buffer before it
//! happens, so a short buffer surfaces as [`ScelError::Truncated`] carrying the
//! offending offset rather than as an I/O error.

use std::io::Cursor;
use byteorder::{ByteOrder, LittleEndian};
use encoding_rs::UTF_16LE;
use super::types::error::{Result, ScelError};

/// Number of bytes left between the cursor and the end of the buffer.
pub fn remaining(cursor: &Cursor<&[u8]>) -> usize {
    let len = cursor.get_ref().len() as u64;
    len.saturating_sub(cursor.position()) as usize
}

/// Borrow the next `len` bytes and advance past them.
pub fn take<'a>(cursor: &mut Cursor<&'a [u8]>, len: usize) -> Result<&'a [u8]> {
    let offset = cursor.position();
    let available = remaining(cursor);
    if available < len {
        return Err(ScelError::Truncated {
            offset,
            needed: len,
            available,
        });
    }
    let data: &'a [u8] = *cursor.get_ref();
    let start = offset as usize;
    cursor.set_position(offset + len as u64);
    Ok(&data[start..start + len])
}

/// Advance past `len` bytes without looking at them.
pub fn skip(cursor: &mut Cursor<&[u8]>, len: usize) -> Result<()> {
    take(cursor, len).map(|_| ())
}

/// Read a 2 byte little-endian number.
///
/// Used for every count, index and length prefix in the container.
pub fn read_u16(cursor: &mut Cursor<&[u8]>) -> Result<u16> {
    Ok(LittleEndian::read_u16(take(cursor, 2)?))
}

/// Read `byte_len` bytes as UTF-16LE text.
///
/// The length must be even and the code units must form valid UTF-16.
pub fn read_text(cursor: &mut Cursor<&[u8]>, byte_len: usize) -> Result<String> {
    let offset = cursor.position();
    if byte_len % 2 != 0 {
        return Err(ScelError::InvalidEncoding {
            offset,
            reason: format!("odd byte length {}", byte_len),
        });
    }
    let bytes = take(cursor, byte_len)?;
    decode_utf16le(bytes).ok_or_else(|| ScelError::InvalidEncoding {
        offset,
        reason: "malformed UTF-16LE sequence".to_string(),
    })
}

/// Seek to `offset`, then read `byte_len` bytes as UTF-16LE text.
pub fn read_text_at(cursor: &mut Cursor<&[u8]>, offset: u64, byte_len: usize) -> Result<String> {
    cursor.set_position(offset);
    read_text(cursor, byte_len)
}

/// Strict UTF-16LE decoding. Returns `None` on unpaired surrogates or a
/// dangling trailing byte. A leading BOM is kept as U+FEFF.
pub fn decode_utf16le(bytes: &[u8]) -> Option<String> {
    UTF_16LE
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
}

/// Lenient decoding for NUL-padded fixed-width fields.
///
/// The text ends at the first NUL code unit; malformed sequences become
/// U+FFFD.
pub fn decode_padded_utf16le(bytes: &[u8]) -> String {
    let end = bytes
        .chunks_exact(2)
        .position(|unit| unit == [0, 0])
        .map(|units| units * 2)
        .unwrap_or(bytes.len() & !1);
    let (text, _) = UTF_16LE.decode_without_bom_handling(&bytes[..end]);
    text.trim().to_string()
}
