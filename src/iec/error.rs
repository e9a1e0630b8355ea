use std::path::PathBuf;

/// Errors that can occur while reading an IEC 1455 spectrum file
#[derive(Debug, thiserror::Error)]
pub enum IecError {
    /// The file could not be opened
    #[error("File not found: {}", path.display())]
    NotFound {
        /// Path that was requested
        path: PathBuf,
        /// Underlying open error
        source: std::io::Error,
    },

    /// The file does not carry the expected extension
    #[error("File type error: {} must be of .{expected} type", path.display())]
    FileType {
        /// Path that was requested
        path: PathBuf,
        /// Extension the reader accepts
        expected: String,
    },

    /// I/O error while reading records
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A record lacks a token the format guarantees or holds an unusable value
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord {
        /// 1-based line number
        line: usize,
        /// What was wrong with the record
        reason: String,
    },
}

impl IecError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}
