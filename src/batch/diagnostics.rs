//! Per-file diagnostics reported by the batch driver.
//!
//! The driver never writes a log file itself; it hands each [`Diagnostic`] to
//! a [`DiagnosticsSink`]. [`LogFileSink`] appends plain-text lines to a file,
//! [`MemorySink`] keeps them in memory.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::scel::{ErrorKind, Result, ScelError};

/// What happened to the file a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Nothing was exported for the file.
    Skipped,
    /// The file was exported, but decoding stopped on corrupt data.
    Partial,
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disposition::Skipped => f.write_str("skipped"),
            Disposition::Partial => f.write_str("partial"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub path: PathBuf,
    pub kind: ErrorKind,
    pub disposition: Disposition,
    pub message: String,
}

impl Diagnostic {
    pub fn new(path: &Path, error: &ScelError, disposition: Disposition) -> Self {
        Self {
            path: path.to_path_buf(),
            kind: error.kind(),
            disposition,
            message: error.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {}: {}",
            self.disposition,
            self.kind,
            self.path.display(),
            self.message
        )
    }
}

/// Receives one diagnostic per failed or partially decoded file.
pub trait DiagnosticsSink {
    fn report(&mut self, diagnostic: Diagnostic) -> Result<()>;
}

/// Collects diagnostics in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub diagnostics: Vec<Diagnostic>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics of the given kind.
    pub fn of_kind(&self, kind: ErrorKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }
}

impl DiagnosticsSink for MemorySink {
    fn report(&mut self, diagnostic: Diagnostic) -> Result<()> {
        self.diagnostics.push(diagnostic);
        Ok(())
    }
}

/// Writes diagnostics to a plain-text log, one line each.
pub struct LogFileSink {
    writer: BufWriter<File>,
}

impl LogFileSink {
    /// Creates (or truncates) the log at `path` and writes its heading.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(writer, "scel conversion error log")?;
        writeln!(writer, "{}", "=".repeat(50))?;
        writer.flush()?;
        Ok(Self { writer })
    }
}

impl DiagnosticsSink for LogFileSink {
    fn report(&mut self, diagnostic: Diagnostic) -> Result<()> {
        writeln!(self.writer, "{}", diagnostic)?;
        self.writer.flush()?;
        Ok(())
    }
}
