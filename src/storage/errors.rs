// ============================================================================
// Storage Errors
// Error types for data-logger storage queries
// ============================================================================

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors that can occur while inspecting data-logger storage.
#[derive(Debug)]
pub enum StorageError {
    /// Database is configured in memory, there is no file on disk
    InMemory,
    /// Sampling period must be at least one millisecond
    InvalidSamplingPeriod,
    /// File system access failed
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::InMemory => write!(
                f,
                "database is in memory, the database file is not stored on disk"
            ),
            StorageError::InvalidSamplingPeriod => {
                write!(f, "sampling period must be at least 1 ms")
            },
            StorageError::Io { path, source } => {
                write!(f, "cannot access {}: {}", path.display(), source)
            },
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type alias for storage queries
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        assert_eq!(
            StorageError::InvalidSamplingPeriod.to_string(),
            "sampling period must be at least 1 ms"
        );

        let error = StorageError::Io {
            path: PathBuf::from("logs/db.sqlite"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(error.to_string(), "cannot access logs/db.sqlite: missing");
        assert!(error.source().is_some());
        assert!(StorageError::InMemory.source().is_none());
    }
}
