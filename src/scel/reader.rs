use std::fs;
use std::path::Path;
use log::info;

use super::format;
use super::iter::EntryIterator;
use super::types::error::{Result, ScelError};
use super::types::models::*;

/// The main reader for cell dictionary (`.scel`) files.
///
/// Opening a file detects the variant, decodes the metadata block and builds
/// the pinyin table. Word records are decoded lazily through
/// [`iter_entries`](Self::iter_entries) or all at once with
/// [`scan`](Self::scan).
#[derive(Debug)]
pub struct ScelReader {
    data: Vec<u8>,
    pub variant: ScelVariant,
    pub metadata: ScelMetadata,
    pinyin: PinyinTable,
}

impl ScelReader {
    /// Read a cell dictionary from the given path.
    ///
    /// # Errors
    /// Returns an error if:
    /// - File cannot be read
    /// - File is smaller than the start of the homophone-group table
    /// - The header tag is not a known variant
    /// - The pinyin table is truncated or malformed
    pub fn open(path: impl AsRef<Path>, options: ReadOptions) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening cell dictionary: {}", path.display());
        let data = fs::read(path)?;
        Self::from_bytes(data, options)
    }

    /// Parse a cell dictionary already held in memory.
    pub fn from_bytes(data: Vec<u8>, options: ReadOptions) -> Result<Self> {
        let size = data.len() as u64;
        if size < format::header::MIN_FILE_SIZE {
            return Err(ScelError::FileTooSmall {
                size,
                minimum: format::header::MIN_FILE_SIZE,
            });
        }

        let variant = format::header::detect(&data)?;
        info!(
            "Header tag {:#04x}: records start at {:#x}",
            variant.tag(),
            variant.records_offset()
        );

        let metadata = format::header::parse_metadata(&data);
        let pinyin = format::pinyin::parse(&data, options.pinyin_end, variant.records_offset())?;

        Ok(Self {
            data,
            variant,
            metadata,
            pinyin,
        })
    }

    /// Total size of the file in bytes.
    pub fn file_len(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn pinyin_table(&self) -> &PinyinTable {
        &self.pinyin
    }

    /// Returns an iterator over all entries, in on-disk order.
    pub fn iter_entries(&self) -> EntryIterator<'_> {
        EntryIterator::new(&self.data, self.variant.records_offset(), &self.pinyin)
    }

    /// Decodes every entry the homophone-group table yields.
    ///
    /// Never fails: a scan that stops early returns what was decoded before
    /// the stop, with the reason in [`RecordScan::termination`].
    pub fn scan(&self) -> RecordScan {
        let mut iter = self.iter_entries();
        let entries: Vec<Entry> = iter.by_ref().collect();
        let termination = iter.termination().unwrap_or(Termination::EndOfFile);
        info!("Decoded {} entries ({})", entries.len(), termination);
        RecordScan { entries, termination }
    }
}
