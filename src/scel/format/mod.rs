//! File format parsing layer for cell dictionary files.
//!
//! This module provides the mid-level parsing layer that bridges between
//! raw bytes and the high-level [`ScelReader`](crate::scel::reader::ScelReader).
//!
//! # Module Organization
//!
//! - [`header`]: Variant detection and the descriptive metadata block
//! - [`pinyin`]: The pinyin index table
//! - [`records`]: Homophone-group records
//!
//! # Architecture
//!
//! ```text
//! File Structure:
//! ┌─────────────────────┐ 0x0000
//! │  Header (128 bytes) │ ← header::detect()
//! ├─────────────────────┤ 0x0130
//! │  Metadata block     │ ← header::parse_metadata()
//! ├─────────────────────┤ 0x1540
//! │  Pinyin table       │ ← pinyin::parse()
//! ├─────────────────────┤ 0x2628 (tag 0x44) / 0x26c4 (tag 0x45)
//! │  Homophone groups   │ ← records::read_group_header()
//! │                     │   records::read_word()
//! └─────────────────────┘
//! ```

pub mod header;
pub mod pinyin;
pub mod records;
