//! Batch conversion of a directory tree of cell dictionaries.
//!
//! Every `.scel` file under the input directory is decoded, written to a
//! mirrored `.txt` path under the output directory and appended to the merged
//! manifest. Failures are scoped to the file: they are handed to the
//! [`DiagnosticsSink`] and the batch moves on.

pub mod diagnostics;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use log::{info, warn};
use walkdir::WalkDir;

use crate::export::{manifest::DEFAULT_MANIFEST_NAME, text, Manifest, ManifestMeta};
use crate::scel::models::{ReadOptions, RecordScan, Termination};
use crate::scel::{ErrorKind, Result, ScelError, ScelReader};

pub use diagnostics::{Diagnostic, DiagnosticsSink, Disposition, LogFileSink, MemorySink};

/// Extension of the binary dictionaries picked up by a batch.
pub const SCEL_EXTENSION: &str = "scel";

/// Where a batch reads from and writes to.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// File name of the merged manifest, created inside `output_dir`.
    pub manifest_name: String,
    pub read: ReadOptions,
    pub manifest: ManifestMeta,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("./scel"),
            output_dir: PathBuf::from("./out"),
            manifest_name: DEFAULT_MANIFEST_NAME.to_string(),
            read: ReadOptions::default(),
            manifest: ManifestMeta::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConvertedFile {
    pub source: PathBuf,
    pub output: PathBuf,
    pub entries: usize,
    pub termination: Termination,
}

#[derive(Debug, Clone)]
pub struct FailedFile {
    pub source: PathBuf,
    pub kind: ErrorKind,
}

/// Outcome of a whole batch, in processing order.
#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub converted: Vec<ConvertedFile>,
    pub failed: Vec<FailedFile>,
    pub manifest_path: PathBuf,
    pub total_entries: usize,
}

/// Lists every `.scel` file under `dir`, sorted by path.
pub fn collect_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for ent in WalkDir::new(dir).follow_links(false) {
        let ent = ent.map_err(|e| {
            let msg = e.to_string();
            ScelError::Io(e.into_io_error().unwrap_or_else(|| io::Error::other(msg)))
        })?;
        if !ent.file_type().is_file() {
            continue;
        }
        let is_scel = ent
            .path()
            .extension()
            .is_some_and(|ext| ext == SCEL_EXTENSION);
        if is_scel {
            files.push(ent.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Decodes one file, treating a scan that yields nothing as a failure.
///
/// # Errors
/// - Anything [`ScelReader::open`] reports, including
///   [`ScelError::FileTooSmall`] before any parsing happens
/// - [`ScelError::InvalidEncoding`] if the first word is malformed
/// - [`ScelError::NoEntries`] if the table ended before the first pair
pub fn decode_file(path: &Path, options: ReadOptions) -> Result<RecordScan> {
    let reader = ScelReader::open(path, options)?;
    let scan = reader.scan();
    if scan.entries.is_empty() {
        return Err(match scan.termination {
            Termination::InvalidEncoding { offset } => ScelError::InvalidEncoding {
                offset,
                reason: "malformed word before the first entry".to_string(),
            },
            structural => ScelError::NoEntries(structural),
        });
    }
    Ok(scan)
}

/// Converts every dictionary under `config.input_dir`.
///
/// # Errors
/// Only batch-level failures are returned: no input files, an unreadable
/// input tree, an output directory or manifest that cannot be written, or a
/// sink that fails to record a diagnostic.
pub fn run(config: &BatchConfig, sink: &mut dyn DiagnosticsSink) -> Result<BatchSummary> {
    let inputs = collect_inputs(&config.input_dir)?;
    if inputs.is_empty() {
        return Err(ScelError::NoInput {
            dir: config.input_dir.clone(),
        });
    }
    info!("Found {} dictionaries under {}", inputs.len(), config.input_dir.display());

    fs::create_dir_all(&config.output_dir)?;
    let mut manifest = Manifest::new(config.manifest.clone());
    let mut converted = Vec::new();
    let mut failed = Vec::new();

    for source in inputs {
        match convert_one(config, &source) {
            Ok((output, scan)) => {
                if let Termination::InvalidEncoding { offset } = scan.termination {
                    let error = ScelError::InvalidEncoding {
                        offset,
                        reason: format!("decoding stopped after {} entries", scan.entries.len()),
                    };
                    warn!("{}: {}", source.display(), error);
                    sink.report(Diagnostic::new(&source, &error, Disposition::Partial))?;
                }
                info!("{} -> {} ({} entries)", source.display(), output.display(), scan.entries.len());
                manifest.add(&source, &scan.entries);
                converted.push(ConvertedFile {
                    source,
                    output,
                    entries: scan.entries.len(),
                    termination: scan.termination,
                });
            }
            Err(error) => {
                warn!("Skipping {}: {}", source.display(), error);
                sink.report(Diagnostic::new(&source, &error, Disposition::Skipped))?;
                failed.push(FailedFile {
                    source,
                    kind: error.kind(),
                });
            }
        }
    }

    let manifest_path = config.output_dir.join(&config.manifest_name);
    manifest.write_to(&manifest_path)?;
    info!(
        "Manifest written to {}: {} dictionaries, {} entries",
        manifest_path.display(),
        manifest.sources().len(),
        manifest.entry_count()
    );

    Ok(BatchSummary {
        converted,
        failed,
        manifest_path,
        total_entries: manifest.entry_count(),
    })
}

fn convert_one(config: &BatchConfig, source: &Path) -> Result<(PathBuf, RecordScan)> {
    let scan = decode_file(source, config.read)?;

    let output = text::output_path(&config.input_dir, &config.output_dir, source).ok_or_else(|| {
        ScelError::Io(io::Error::other(format!(
            "{} is outside {}",
            source.display(),
            config.input_dir.display()
        )))
    })?;
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output, text::serialize(&scan.entries))?;
    Ok((output, scan))
}
