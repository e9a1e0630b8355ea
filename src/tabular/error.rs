use std::path::PathBuf;

/// Errors that can occur while reading or writing tabular spectra
#[derive(Debug, thiserror::Error)]
pub enum TabularError {
    /// The file could not be opened
    #[error("File not found: {}", path.display())]
    NotFound {
        /// Path that was requested
        path: PathBuf,
        /// Underlying open error
        source: std::io::Error,
    },

    /// The file is not a CSV file
    #[error("File type error: {} must be of .csv type", path.display())]
    FileType {
        /// Path that was requested
        path: PathBuf,
    },

    /// CSV reader or writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error while writing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A row is missing a column or holds a non-numeric value
    #[error("Malformed row at line {row}: {reason}")]
    MalformedRow {
        /// 1-based line number in the file
        row: u64,
        /// What was wrong with the row
        reason: String,
    },
}
