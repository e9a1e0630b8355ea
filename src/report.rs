//! Append-only plain-text results log.
//!
//! Each analysis run appends one entry. Every field is written as
//! `<label>: <value>` on its own line and entries are separated by a blank
//! line, so the file stays readable and greppable:
//!
//! ```text
//! Data file: cs137.IEC
//! Mean: 661.9
//! Std dev: 21.4
//!
//! Data file: co60.IEC
//! ...
//! ```

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::debug;

/// Errors that can occur while writing results
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// I/O error on the log file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A label or value would break the one-field-per-line layout
    #[error("Invalid field '{0}': labels must not contain ':' and fields must be single-line")]
    InvalidField(String),
}

/// One analysis run's worth of labelled values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsEntry {
    fields: Vec<(String, String)>,
}

impl ResultsEntry {
    /// Empty entry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field
    pub fn field(mut self, label: impl Into<String>, value: impl fmt::Display) -> Self {
        self.fields.push((label.into(), value.to_string()));
        self
    }

    /// Add a `Timestamp` field in RFC 3339 form
    pub fn with_timestamp(self, at: DateTime<Local>) -> Self {
        self.field("Timestamp", at.to_rfc3339())
    }

    /// Fields in insertion order
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Check that every field renders as exactly one line
    pub fn validate(&self) -> Result<(), ReportError> {
        for (label, value) in &self.fields {
            if label.is_empty() || label.contains([':', '\n', '\r']) || value.contains(['\n', '\r']) {
                return Err(ReportError::InvalidField(label.clone()));
            }
        }
        Ok(())
    }
}

impl fmt::Display for ResultsEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in &self.fields {
            writeln!(f, "{label}: {value}")?;
        }
        writeln!(f)
    }
}

/// Results file that only ever grows
#[derive(Debug, Clone)]
pub struct ResultsLog {
    path: PathBuf,
}

impl ResultsLog {
    /// Log at `path`; the file is created on first append
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry followed by a blank line
    pub fn append(&self, entry: &ResultsEntry) -> Result<(), ReportError> {
        entry.validate()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        write!(file, "{entry}")?;
        debug!(
            "Appended {} fields to {}",
            entry.fields().len(),
            self.path.display()
        );
        Ok(())
    }
}
