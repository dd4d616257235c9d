// ============================================================================
// Embedded Database Tools
// File path, size and usage queries for embedded SQLite stores
// ============================================================================

use super::errors::{StorageError, StorageResult};
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// File extension of embedded database files
pub const DATABASE_EXTENSION: &str = "sqlite";

/// Suffix of the write-ahead log SQLite keeps next to an open database
pub const WAL_SUFFIX: &str = "-wal";

/// An embedded SQLite store as configured in the project
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EmbeddedDatabase {
    /// Node identifier of the store
    pub node_id: Uuid,

    /// Configured file name without extension; empty or `None` falls back to
    /// the node id
    pub filename: Option<String>,

    /// Store is kept in memory and has no file on disk
    pub in_memory: bool,
}

impl EmbeddedDatabase {
    pub fn new(node_id: Uuid, filename: impl Into<String>) -> Self {
        Self {
            node_id,
            filename: Some(filename.into()),
            in_memory: false,
        }
    }

    /// Store without a configured file name
    pub fn unnamed(node_id: Uuid) -> Self {
        Self {
            node_id,
            filename: None,
            in_memory: false,
        }
    }

    /// Builder method: Keep the store in memory
    pub fn in_memory(mut self) -> Self {
        self.in_memory = true;
        self
    }

    /// File name on disk, e.g. `Recipes.sqlite` or
    /// `6f1c0a9e2b5d4c7e8f901a2b3c4d5e6f.sqlite` for unnamed stores
    pub fn file_name(&self) -> String {
        let stem = match self.filename.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.node_id.simple().to_string(),
        };
        format!("{}.{}", stem, DATABASE_EXTENSION)
    }
}

/// Size of a database file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DatabaseSize {
    pub bytes: u64,
    /// Decimal kilobytes (bytes / 1000)
    pub kilobytes: u64,
    /// Decimal megabytes (kilobytes / 1000)
    pub megabytes: u64,
}

impl DatabaseSize {
    pub fn from_bytes(bytes: u64) -> Self {
        let kilobytes = bytes / 1000;
        Self {
            bytes,
            kilobytes,
            megabytes: kilobytes / 1000,
        }
    }
}

impl fmt::Display for DatabaseSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bytes ({} KB, {} MB)",
            self.bytes, self.kilobytes, self.megabytes
        )
    }
}

// ============================================================================
// Queries
// ============================================================================

/// Path of the database file relative to the project directory.
///
/// # Errors
/// Returns `InMemory` when the store has no file on disk.
pub fn relative_path(database: &EmbeddedDatabase) -> StorageResult<PathBuf> {
    if database.in_memory {
        return Err(StorageError::InMemory);
    }
    Ok(PathBuf::from(database.file_name()))
}

/// Absolute path of the database file under `project_dir`.
///
/// # Errors
/// Returns `InMemory` when the store has no file on disk.
pub fn absolute_path(database: &EmbeddedDatabase, project_dir: &Path) -> StorageResult<PathBuf> {
    Ok(project_dir.join(relative_path(database)?))
}

/// Size of the database file.
///
/// The size is read from the file system; it may lag behind while the
/// database is in use and pages still sit in the write-ahead log.
///
/// # Errors
/// - `InMemory` when the store has no file on disk
/// - `Io` when the file cannot be inspected
pub fn database_size(database: &EmbeddedDatabase, project_dir: &Path) -> StorageResult<DatabaseSize> {
    let path = absolute_path(database, project_dir)?;
    let metadata = fs::metadata(&path).map_err(|source| StorageError::Io {
        path: path.clone(),
        source,
    })?;

    let size = DatabaseSize::from_bytes(metadata.len());
    tracing::debug!(path = %path.display(), %size, "Database size");
    Ok(size)
}

/// Whether the database is open, judged by the presence of its
/// write-ahead log file.
///
/// # Errors
/// - `InMemory` when the store has no file on disk
/// - `Io` when the file system cannot be queried
pub fn is_database_in_use(database: &EmbeddedDatabase, project_dir: &Path) -> StorageResult<bool> {
    let path = absolute_path(database, project_dir)?;
    let mut wal: OsString = path.into_os_string();
    wal.push(WAL_SUFFIX);
    let wal = PathBuf::from(wal);

    wal.try_exists()
        .map_err(|source| StorageError::Io { path: wal, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ProjectDir(PathBuf);

    impl ProjectDir {
        fn new() -> Self {
            let dir = std::env::temp_dir().join(format!("keypad-entry-{}", Uuid::new_v4()));
            fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }
    }

    impl Drop for ProjectDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    fn node_id() -> Uuid {
        Uuid::parse_str("6f1c0a9e-2b5d-4c7e-8f90-1a2b3c4d5e6f").unwrap()
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            EmbeddedDatabase::new(node_id(), "Recipes").file_name(),
            "Recipes.sqlite"
        );
        assert_eq!(
            EmbeddedDatabase::unnamed(node_id()).file_name(),
            "6f1c0a9e2b5d4c7e8f901a2b3c4d5e6f.sqlite"
        );
        assert_eq!(
            EmbeddedDatabase::new(node_id(), "").file_name(),
            "6f1c0a9e2b5d4c7e8f901a2b3c4d5e6f.sqlite"
        );
    }

    #[test]
    fn test_paths() {
        let database = EmbeddedDatabase::new(node_id(), "Alarms");
        assert_eq!(
            relative_path(&database).unwrap(),
            PathBuf::from("Alarms.sqlite")
        );
        assert_eq!(
            absolute_path(&database, Path::new("/opt/panel")).unwrap(),
            PathBuf::from("/opt/panel/Alarms.sqlite")
        );
    }

    #[test]
    fn test_in_memory_has_no_file() {
        let database = EmbeddedDatabase::new(node_id(), "Cache").in_memory();
        let dir = Path::new("/opt/panel");

        assert!(matches!(relative_path(&database), Err(StorageError::InMemory)));
        assert!(matches!(absolute_path(&database, dir), Err(StorageError::InMemory)));
        assert!(matches!(database_size(&database, dir), Err(StorageError::InMemory)));
        assert!(matches!(
            is_database_in_use(&database, dir),
            Err(StorageError::InMemory)
        ));
    }

    #[test]
    fn test_size_units() {
        let size = DatabaseSize::from_bytes(2_345_678);
        assert_eq!(size.kilobytes, 2_345);
        assert_eq!(size.megabytes, 2);
        assert_eq!(size.to_string(), "2345678 bytes (2345 KB, 2 MB)");
    }

    #[test]
    fn test_database_size_reads_file() {
        let project = ProjectDir::new();
        let database = EmbeddedDatabase::new(node_id(), "Trend");
        fs::write(project.0.join("Trend.sqlite"), vec![0u8; 4_096]).unwrap();

        let size = database_size(&database, &project.0).unwrap();
        assert_eq!(size.bytes, 4_096);
        assert_eq!(size.kilobytes, 4);
        assert_eq!(size.megabytes, 0);
    }

    #[test]
    fn test_database_size_missing_file() {
        let project = ProjectDir::new();
        let database = EmbeddedDatabase::new(node_id(), "Missing");

        match database_size(&database, &project.0) {
            Err(StorageError::Io { path, .. }) => {
                assert_eq!(path, project.0.join("Missing.sqlite"));
            },
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_in_use_detects_wal() {
        let project = ProjectDir::new();
        let database = EmbeddedDatabase::unnamed(node_id());
        fs::write(project.0.join(database.file_name()), b"").unwrap();

        assert!(!is_database_in_use(&database, &project.0).unwrap());

        fs::write(
            project.0.join(format!("{}{}", database.file_name(), WAL_SUFFIX)),
            b"",
        )
        .unwrap();
        assert!(is_database_in_use(&database, &project.0).unwrap());
    }
}
