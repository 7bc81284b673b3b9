//! Text output for decoded dictionaries.
//!
//! - [`text`]: one `word<TAB>pinyin` file per dictionary
//! - [`manifest`]: the merged Rime dictionary covering a whole batch

pub mod manifest;
pub mod text;

pub use manifest::{Manifest, ManifestMeta};
