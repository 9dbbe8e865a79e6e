use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, JunctionError>;

/// Errors raised while reading inputs and building the junction report.
#[derive(Debug, Error)]
pub enum JunctionError {
    #[error("{0}")]
    Usage(String),

    #[error("File {} cannot be opened. Check if the file exists and is readable.", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: malformed record: {reason}", path.display())]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Invalid config file {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error("BAM error: {0}")]
    Bam(#[from] rust_htslib::errors::Error),
}

impl JunctionError {
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        JunctionError::FileAccess {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, line: usize, reason: impl Into<String>) -> Self {
        JunctionError::MalformedRecord {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            JunctionError::Usage(_) => 2,
            _ => 1,
        }
    }
}
