// ============================================================================
// Storage Module
// Data-logger footprint estimation and embedded database file queries
// ============================================================================

mod database;
mod errors;
mod space;

pub use database::{
    absolute_path, database_size, is_database_in_use, relative_path, DatabaseSize,
    EmbeddedDatabase, DATABASE_EXTENSION, WAL_SUFFIX,
};
pub use errors::{StorageError, StorageResult};
pub use space::{
    estimate_space, DataLoggerConfig, LoggedDataType, LoggedVariable, SpaceEstimate,
    ID_COLUMN_BYTES, SCALAR_COLUMN_BYTES, TIMESTAMP_COLUMN_BYTES,
};
