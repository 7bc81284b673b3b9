//! # scel-reader
//!
//! A reader for Sogou Pinyin cell dictionary files (`.scel`), plus the batch
//! tooling that converts a tree of them into tab-separated word lists and a
//! merged Rime dictionary.
//!
//! Both known header variants (tags `0x44` and `0x45`) are supported.
pub mod batch;
pub mod export;
pub mod scel;

// Re-export the main types for convenience
pub use scel::{
    ErrorKind,
    Result,
    ScelError,
    ScelReader,
    iter::EntryIterator,
    models::{
        Entry,
        PinyinTable,
        PinyinTableEnd,
        ReadOptions,
        RecordScan,
        ScelMetadata,
        ScelVariant,
        Termination,
    },
};
