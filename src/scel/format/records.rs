//! Homophone-group record decoding.
//!
//! # Record Structure
//! ```text
//! [u16 LE]        word count
//! [u16 LE]        pinyin index byte length (index count * 2)
//! [u16 LE] * n    pinyin indices
//! repeated word count times:
//!   [u16 LE]      word byte length
//!   [N bytes]     word, UTF-16LE
//!   [12 bytes]    extension block (u16 length, u16 frequency, 8 reserved)
//! ```

use std::io::Cursor;
use log::trace;
use crate::scel::types::{error::Result, models::PinyinTable};
use crate::scel::utils;

/// Bytes occupied by the per-word extension block, including its own length
/// field.
pub const EXTENSION_LEN: usize = 12;

/// The part of a homophone group that precedes its words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupHeader {
    /// Every index resolved.
    Resolved { word_count: u16, pinyin: String },
    /// An index was not present in the pinyin table.
    MissingPinyin { index: u16, offset: u64 },
}

/// Reads a group's word count and pinyin indices and resolves the indices
/// against `table`.
///
/// Resolution stops at the first unknown index; the remaining indices are
/// left unread.
pub fn read_group_header(cursor: &mut Cursor<&[u8]>, table: &PinyinTable) -> Result<GroupHeader> {
    let word_count = utils::read_u16(cursor)?;
    let index_count = utils::read_u16(cursor)? / 2;

    let mut syllables = Vec::with_capacity(index_count as usize);
    for _ in 0..index_count {
        let offset = cursor.position();
        let index = utils::read_u16(cursor)?;
        match table.get(index) {
            Some(syllable) => syllables.push(syllable),
            None => return Ok(GroupHeader::MissingPinyin { index, offset }),
        }
    }

    let pinyin = syllables.join(" ");
    trace!("Group: {} word(s) for {:?}", word_count, pinyin);
    Ok(GroupHeader::Resolved { word_count, pinyin })
}

/// Reads one word entry and skips its extension block.
pub fn read_word(cursor: &mut Cursor<&[u8]>) -> Result<String> {
    let len = utils::read_u16(cursor)?;
    let word = utils::read_text(cursor, len as usize)?;
    utils::skip(cursor, EXTENSION_LEN)?;
    Ok(word)
}
