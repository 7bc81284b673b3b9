//! Sequential access to decoded dictionary entries.
//!
//! [`EntryIterator`] walks the homophone-group table one word at a time and
//! never fails: whatever stops it (end of file, a truncated record, an
//! unknown pinyin index, a malformed word) ends the iteration and is kept as
//! a [`Termination`] for the caller to inspect.
//!
//! # Example
//! ```no_run
//! # use scel_reader::{ScelReader, ReadOptions};
//! # let reader = ScelReader::open("dict.scel", ReadOptions::default()).unwrap();
//! let mut entries = reader.iter_entries();
//! for entry in entries.by_ref() {
//!     println!("{}\t{}", entry.word, entry.pinyin);
//! }
//! println!("stopped: {:?}", entries.termination());
//! ```

use std::io::Cursor;
use log::{debug, warn};

use super::format::records::{self, GroupHeader};
use super::types::error::ScelError;
use super::types::models::{Entry, PinyinTable, Termination};

/// Iterator over `(pinyin, word)` entries in on-disk order.
///
/// Created by [`ScelReader::iter_entries()`](crate::ScelReader::iter_entries).
pub struct EntryIterator<'a> {
    cursor: Cursor<&'a [u8]>,
    table: &'a PinyinTable,
    pinyin: String,
    words_left: u16,
    termination: Option<Termination>,
}

impl<'a> EntryIterator<'a> {
    pub(super) fn new(data: &'a [u8], records_offset: u64, table: &'a PinyinTable) -> Self {
        let mut cursor = Cursor::new(data);
        cursor.set_position(records_offset);
        Self {
            cursor,
            table,
            pinyin: String::new(),
            words_left: 0,
            termination: None,
        }
    }

    /// Why the iteration stopped, once it has.
    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    /// Byte offset of the next read.
    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    fn stop(&mut self, termination: Termination) -> Option<Entry> {
        match termination {
            Termination::InvalidEncoding { .. } => warn!("Record scan stopped: {}", termination),
            _ => debug!("Record scan stopped: {}", termination),
        }
        self.termination = Some(termination);
        None
    }

    /// Loads the next group header. `Err` carries the reason to stop.
    fn next_group(&mut self) -> Result<(), Termination> {
        let offset = self.cursor.position();
        let len = self.cursor.get_ref().len() as u64;
        if offset == len {
            return Err(Termination::EndOfFile);
        }
        if offset > len {
            return Err(Termination::Truncated { offset });
        }

        match records::read_group_header(&mut self.cursor, self.table) {
            Ok(GroupHeader::Resolved { word_count, pinyin }) => {
                self.pinyin = pinyin;
                self.words_left = word_count;
                Ok(())
            }
            Ok(GroupHeader::MissingPinyin { index, offset }) => {
                Err(Termination::MissingPinyin { index, offset })
            }
            Err(e) => Err(classify(e, offset)),
        }
    }
}

impl<'a> Iterator for EntryIterator<'a> {
    type Item = Entry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.termination.is_some() {
            return None;
        }
        loop {
            if self.words_left > 0 {
                let offset = self.cursor.position();
                return match records::read_word(&mut self.cursor) {
                    Ok(word) => {
                        self.words_left -= 1;
                        Some(Entry {
                            pinyin: self.pinyin.clone(),
                            word,
                        })
                    }
                    Err(e) => self.stop(classify(e, offset)),
                };
            }

            // Groups with a zero word count are valid and simply skipped.
            if let Err(termination) = self.next_group() {
                return self.stop(termination);
            }
        }
    }
}

/// Maps a read failure inside the table to the matching termination.
fn classify(error: ScelError, record_offset: u64) -> Termination {
    match error {
        ScelError::InvalidEncoding { offset, .. } => Termination::InvalidEncoding { offset },
        ScelError::Truncated { offset, .. } => Termination::Truncated { offset },
        _ => Termination::Truncated { offset: record_offset },
    }
}
