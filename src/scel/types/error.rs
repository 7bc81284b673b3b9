//! Error types for the scel-reader crate.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use super::models::Termination;

/// The primary error type for all operations in this crate.
///
/// Every variant except [`ScelError::NoInput`] is scoped to a single
/// dictionary file: the batch driver logs it and moves on to the next file.
#[derive(Debug, Error)]
pub enum ScelError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The header tag at offset 4 is not a known variant, or the header is
    /// shorter than 128 bytes (`tag` is `None` in that case).
    #[error("Unsupported format: {}", describe_tag(.tag))]
    UnsupportedFormat { tag: Option<u8> },

    /// A field declares more bytes than remain in the file.
    #[error("Truncated at offset {offset:#x}: needed {needed} bytes, {available} available")]
    Truncated {
        offset: u64,
        needed: usize,
        available: usize,
    },

    /// A text field has an odd byte length or is not valid UTF-16LE.
    #[error("Invalid encoding at offset {offset:#x}: {reason}")]
    InvalidEncoding { offset: u64, reason: String },

    /// The file is smaller than the start of the homophone-group table.
    #[error("File too small: {size} bytes, at least {minimum} required")]
    FileTooSmall { size: u64, minimum: u64 },

    /// The file parsed but produced no (pinyin, word) pairs.
    #[error("No entries decoded: {0}")]
    NoEntries(Termination),

    /// The batch input directory holds no dictionary files.
    #[error("No .scel files found under {}", .dir.display())]
    NoInput { dir: PathBuf },
}

fn describe_tag(tag: &Option<u8>) -> String {
    match *tag {
        Some(tag) => format!("header tag {:#04x} (expected 0x44 or 0x45)", tag),
        None => "truncated header".to_string(),
    }
}

/// Classification of a [`ScelError`], used for diagnostics output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Io,
    UnsupportedFormat,
    Truncated,
    InvalidEncoding,
    FileTooSmall,
    NoEntries,
    NoInput,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Io => "Io",
            ErrorKind::UnsupportedFormat => "UnsupportedFormat",
            ErrorKind::Truncated => "Truncated",
            ErrorKind::InvalidEncoding => "InvalidEncoding",
            ErrorKind::FileTooSmall => "FileTooSmall",
            ErrorKind::NoEntries => "NoEntries",
            ErrorKind::NoInput => "NoInput",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ScelError {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScelError::Io(_) => ErrorKind::Io,
            ScelError::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            ScelError::Truncated { .. } => ErrorKind::Truncated,
            ScelError::InvalidEncoding { .. } => ErrorKind::InvalidEncoding,
            ScelError::FileTooSmall { .. } => ErrorKind::FileTooSmall,
            ScelError::NoEntries(_) => ErrorKind::NoEntries,
            ScelError::NoInput { .. } => ErrorKind::NoInput,
        }
    }
}

/// A convenience `Result` type alias using the crate's `ScelError` type.
pub type Result<T> = std::result::Result<T, ScelError>;
