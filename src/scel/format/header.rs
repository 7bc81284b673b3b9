//! Cell dictionary header parsing.
//!
//! This module handles:
//! - Resolving the container variant from the tag byte at offset 4
//! - Decoding the fixed-width metadata block (title, category, description,
//!   sample words)

use log::{debug, trace};
use crate::scel::types::{
    error::{Result, ScelError},
    models::{ScelMetadata, ScelVariant},
};
use crate::scel::utils;

/// Size of the fixed file header.
pub const HEADER_LEN: usize = 128;

/// Offset of the variant tag inside the header.
pub const VARIANT_TAG_OFFSET: usize = 4;

/// Smallest file worth parsing: anything shorter ends before the
/// homophone-group table of either variant can begin.
pub const MIN_FILE_SIZE: u64 = 0x2628;

const TITLE: (usize, usize) = (0x130, 0x338);
const CATEGORY: (usize, usize) = (0x338, 0x540);
const DESCRIPTION: (usize, usize) = (0x540, 0xd40);
const SAMPLES: (usize, usize) = (0xd40, 0x1540);

/// Resolves the container variant from the first 128 bytes of a file.
///
/// # Errors
/// [`ScelError::UnsupportedFormat`] if fewer than 128 bytes are available
/// (`tag: None`) or the tag byte is neither `0x44` nor `0x45`.
pub fn detect(header: &[u8]) -> Result<ScelVariant> {
    if header.len() < HEADER_LEN {
        debug!("Header truncated: {} of {} bytes", header.len(), HEADER_LEN);
        return Err(ScelError::UnsupportedFormat { tag: None });
    }
    let tag = header[VARIANT_TAG_OFFSET];
    trace!("Header tag: {:#04x}", tag);
    ScelVariant::try_from(tag)
}

/// Decodes the metadata block.
///
/// Fields are NUL-padded UTF-16LE. Decoding is lenient since the block is
/// descriptive only; a field cut short by the end of `data` decodes to what
/// is there.
pub fn parse_metadata(data: &[u8]) -> ScelMetadata {
    let field = |(start, end): (usize, usize)| {
        let end = end.min(data.len());
        data.get(start..end)
            .map(utils::decode_padded_utf16le)
            .unwrap_or_default()
    };

    ScelMetadata {
        title: field(TITLE),
        category: field(CATEGORY),
        description: field(DESCRIPTION),
        samples: field(SAMPLES),
    }
}
