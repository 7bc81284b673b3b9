//! Pinyin index table parsing.
//!
//! # Table Structure
//! ```text
//! 0x1540  [4 bytes]  table prologue (not interpreted)
//! 0x1544  repeated:
//!         [u16 LE]   index
//!         [u16 LE]   syllable byte length
//!         [N bytes]  syllable, UTF-16LE
//! ```
//!
//! The table carries no entry count that the reader trusts. Where it ends is
//! chosen by [`PinyinTableEnd`].

use std::io::Cursor;
use log::{debug, info, trace};
use crate::scel::types::{
    error::{Result, ScelError},
    models::{PinyinTable, PinyinTableEnd},
};
use crate::scel::utils;

/// Offset of the pinyin table prologue.
pub const PINYIN_TABLE_OFFSET: u64 = 0x1540;

/// Offset of the first (index, syllable) entry.
pub const PINYIN_ENTRIES_OFFSET: u64 = PINYIN_TABLE_OFFSET + 4;

/// Last syllable of the table in the reference dictionaries.
pub const SENTINEL_SYLLABLE: &str = "zuo";

/// Parses the pinyin table.
///
/// `records_offset` is where the homophone-group table starts; it bounds the
/// scan in [`PinyinTableEnd::Boundary`] mode and is ignored otherwise.
///
/// # Errors
/// - [`ScelError::Truncated`] if an entry runs past the end of `data` (or
///   past `records_offset` in boundary mode)
/// - [`ScelError::InvalidEncoding`] if a syllable is not valid UTF-16LE
pub fn parse(data: &[u8], end: PinyinTableEnd, records_offset: u64) -> Result<PinyinTable> {
    let mut cursor = Cursor::new(data);
    cursor.set_position(PINYIN_ENTRIES_OFFSET);

    let table = match end {
        PinyinTableEnd::Sentinel => parse_until_sentinel(&mut cursor)?,
        PinyinTableEnd::Boundary => parse_until_boundary(&mut cursor, records_offset)?,
    };

    info!("Pinyin table parsed: {} syllables", table.len());
    debug!("Pinyin table ends at offset {:#x}", cursor.position());
    Ok(table)
}

fn parse_until_sentinel(cursor: &mut Cursor<&[u8]>) -> Result<PinyinTable> {
    let mut table = PinyinTable::new();
    loop {
        let (index, syllable) = read_entry(cursor)?;
        let is_last = syllable == SENTINEL_SYLLABLE;
        table.insert(index, syllable);
        if is_last {
            return Ok(table);
        }
    }
}

fn parse_until_boundary(cursor: &mut Cursor<&[u8]>, boundary: u64) -> Result<PinyinTable> {
    let mut table = PinyinTable::new();
    while cursor.position() < boundary {
        let offset = cursor.position();
        let available = (boundary - offset) as usize;
        if available < 4 {
            return Err(ScelError::Truncated { offset, needed: 4, available });
        }
        let (index, syllable) = read_entry(cursor)?;
        if cursor.position() > boundary {
            return Err(ScelError::Truncated {
                offset,
                needed: (cursor.position() - offset) as usize,
                available,
            });
        }
        table.insert(index, syllable);
    }
    Ok(table)
}

fn read_entry(cursor: &mut Cursor<&[u8]>) -> Result<(u16, String)> {
    let index = utils::read_u16(cursor)?;
    let len = utils::read_u16(cursor)?;
    let syllable = utils::read_text(cursor, len as usize)?;
    trace!("Pinyin entry {} -> {:?}", index, syllable);
    Ok((index, syllable))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_index_keeps_first_syllable() {
        let mut table = PinyinTable::new();
        assert!(table.insert(5, "a"));
        assert!(!table.insert(5, "b"));
        assert_eq!(table.get(5), Some("a"));
        assert_eq!(table.len(), 1);
    }
}
