//! Merged Rime dictionary covering every converted file of a batch.
//!
//! # Layout
//! ```text
//! # Rime dictionary            ← comment block naming each source
//! # ...
//! # * <file stem> (<entries>)
//! ---
//! name: ...                    ← YAML front matter from ManifestMeta
//! ...
//! word<TAB>pinyin              ← every entry, in processing order
//! ```

use std::fs;
use std::path::Path;

use super::text;
use crate::scel::models::Entry;
use crate::scel::Result;

/// Default file name of the merged dictionary.
pub const DEFAULT_MANIFEST_NAME: &str = "luna_pinyin.sogou.dict.yaml";

/// Static front matter fields of the merged dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestMeta {
    pub name: String,
    pub version: String,
    pub sort: String,
    pub use_preset_vocabulary: bool,
}

impl Default for ManifestMeta {
    fn default() -> Self {
        Self {
            name: "luna_pinyin.sogou".to_string(),
            version: "1.0".to_string(),
            sort: "by_weight".to_string(),
            use_preset_vocabulary: true,
        }
    }
}

/// A converted dictionary listed in the manifest header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSource {
    /// File stem of the source dictionary.
    pub name: String,
    pub entries: usize,
}

/// Accumulates converted dictionaries in processing order.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    meta: ManifestMeta,
    sources: Vec<ManifestSource>,
    lines: Vec<String>,
}

impl Manifest {
    pub fn new(meta: ManifestMeta) -> Self {
        Self {
            meta,
            sources: Vec::new(),
            lines: Vec::new(),
        }
    }

    /// Appends a converted dictionary. Only call this for files that decoded
    /// successfully.
    pub fn add(&mut self, source: &Path, entries: &[Entry]) {
        let name = source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.sources.push(ManifestSource {
            name,
            entries: entries.len(),
        });
        self.lines.extend(entries.iter().map(text::format_entry));
    }

    pub fn sources(&self) -> &[ManifestSource] {
        &self.sources
    }

    /// Total number of entry lines accumulated so far.
    pub fn entry_count(&self) -> usize {
        self.lines.len()
    }

    /// Renders the header comment block and YAML front matter.
    pub fn render_header(&self) -> String {
        let mut out = String::new();
        out.push_str("# Rime dictionary\n");
        out.push_str("# encoding: utf-8\n");
        out.push_str("#\n");
        out.push_str("# Sogou Pinyin Dict - 搜狗细胞词库\n");
        out.push_str("#\n");
        out.push_str("#   https://pinyin.sogou.com/dict/\n");
        out.push_str("#\n");
        out.push_str("# 包括:\n");
        out.push_str("#\n");
        for source in &self.sources {
            out.push_str(&format!("# * {} ({})\n", source.name, source.entries));
        }
        out.push_str("#\n");
        out.push('\n');
        out.push_str("---\n");
        out.push_str(&format!("name: {}\n", self.meta.name));
        out.push_str(&format!("version: \"{}\"\n", self.meta.version));
        out.push_str(&format!("sort: {}\n", self.meta.sort));
        out.push_str(&format!("use_preset_vocabulary: {}\n", self.meta.use_preset_vocabulary));
        out.push_str("...\n");
        out
    }

    /// Renders the full document.
    pub fn render(&self) -> String {
        let mut out = self.render_header();
        if !self.lines.is_empty() {
            out.push('\n');
            out.push_str(&self.lines.join("\n"));
            out.push('\n');
        }
        out
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render())?;
        Ok(())
    }
}
