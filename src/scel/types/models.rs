//! Core data structures for cell dictionary components.
//!
//! This module defines the fundamental types used throughout the library:
//! - Container variants and the descriptive metadata block
//! - The pinyin index table
//! - Decoded entries and the reason a record scan stopped

use std::collections::HashMap;
use std::fmt;

use super::error::{Result, ScelError};

/// Container variant, resolved from the header tag byte at offset 4.
///
/// The only thing that differs between the two known variants is where the
/// homophone-group table begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScelVariant {
    /// Tag `0x44`.
    Tag44,
    /// Tag `0x45`.
    Tag45,
}

impl ScelVariant {
    /// The raw header tag for this variant.
    pub fn tag(&self) -> u8 {
        match self {
            ScelVariant::Tag44 => 0x44,
            ScelVariant::Tag45 => 0x45,
        }
    }

    /// Absolute offset of the homophone-group table.
    pub fn records_offset(&self) -> u64 {
        match self {
            ScelVariant::Tag44 => 0x2628,
            ScelVariant::Tag45 => 0x26c4,
        }
    }
}

impl TryFrom<u8> for ScelVariant {
    type Error = ScelError;
    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            0x44 => Ok(Self::Tag44),
            0x45 => Ok(Self::Tag45),
            _ => Err(ScelError::UnsupportedFormat { tag: Some(tag) }),
        }
    }
}

/// Descriptive text stored in the fixed metadata block.
///
/// None of these fields influence word output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScelMetadata {
    pub title: String,
    pub category: String,
    pub description: String,
    pub samples: String,
}

/// How the reader decides where the pinyin table ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinyinTableEnd {
    /// Stop after the entry whose syllable is `"zuo"`.
    ///
    /// This mirrors the syllable ordering of the reference dictionaries and is
    /// not a structural end marker: a table without `"zuo"` runs on until a
    /// read fails.
    #[default]
    Sentinel,
    /// Read entries until the cursor reaches the homophone-group table.
    Boundary,
}

/// Options controlling how a container is read.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOptions {
    pub pinyin_end: PinyinTableEnd,
}

/// Mapping from pinyin index to syllable text.
///
/// Built once per file. The first occurrence of an index wins.
#[derive(Debug, Clone, Default)]
pub struct PinyinTable {
    syllables: HashMap<u16, String>,
}

impl PinyinTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `syllable` under `index` unless the index is already present.
    ///
    /// Returns `true` if the entry was inserted.
    pub fn insert(&mut self, index: u16, syllable: impl Into<String>) -> bool {
        match self.syllables.entry(index) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(syllable.into());
                true
            }
        }
    }

    pub fn get(&self, index: u16) -> Option<&str> {
        self.syllables.get(&index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.syllables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.syllables.is_empty()
    }
}

/// One decoded (pinyin, word) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Space-joined syllables of the homophone group.
    pub pinyin: String,
    pub word: String,
}

/// Why a record scan stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The cursor landed exactly on the end of the file.
    EndOfFile,
    /// A homophone group referenced an index missing from the pinyin table.
    MissingPinyin { index: u16, offset: u64 },
    /// The file ended in the middle of a record.
    Truncated { offset: u64 },
    /// A word was not valid UTF-16LE.
    InvalidEncoding { offset: u64 },
}

impl Termination {
    /// Whether this is one of the expected structural ends of the table.
    pub fn is_structural(&self) -> bool {
        !matches!(self, Termination::InvalidEncoding { .. })
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::EndOfFile => write!(f, "reached end of file"),
            Termination::MissingPinyin { index, offset } => {
                write!(f, "pinyin index {} at offset {:#x} not in table", index, offset)
            }
            Termination::Truncated { offset } => {
                write!(f, "record truncated at offset {:#x}", offset)
            }
            Termination::InvalidEncoding { offset } => {
                write!(f, "invalid UTF-16LE word at offset {:#x}", offset)
            }
        }
    }
}

/// Result of walking the homophone-group table.
#[derive(Debug, Clone)]
pub struct RecordScan {
    /// Pairs in on-disk order.
    pub entries: Vec<Entry>,
    pub termination: Termination,
}
