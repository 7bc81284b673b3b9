//! Tab-separated rendering of decoded entries.

use std::path::{Path, PathBuf};

use crate::scel::models::Entry;

/// Extension given to converted files.
pub const TEXT_EXTENSION: &str = "txt";

/// Renders one entry as `word<TAB>pinyin`.
pub fn format_entry(entry: &Entry) -> String {
    format!("{}\t{}", entry.word, entry.pinyin)
}

/// Renders entries one per line, joined with `\n` and without a trailing
/// newline.
pub fn serialize(entries: &[Entry]) -> String {
    entries
        .iter()
        .map(format_entry)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Mirrors `file` (found under `input_root`) into `output_root`, with the
/// extension replaced by `.txt`.
///
/// Returns `None` if `file` is not under `input_root`.
pub fn output_path(input_root: &Path, output_root: &Path, file: &Path) -> Option<PathBuf> {
    let rel = file.strip_prefix(input_root).ok()?;
    let mut out = output_root.join(rel);
    out.set_extension(TEXT_EXTENSION);
    Some(out)
}
