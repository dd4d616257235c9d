// ============================================================================
// Data Logger Space Estimation
// Storage footprint of a data logger writing into an embedded SQLite store
// ============================================================================
//
// SQLite keeps INTEGER and REAL values in up to 8 bytes; timestamps are stored
// as ISO-8601 text (27 bytes). Every record also carries the timestamp column,
// an optional local-time column and the row id.

use super::errors::{StorageError, StorageResult};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bytes per fixed-width scalar column
pub const SCALAR_COLUMN_BYTES: u64 = 8;

/// Bytes per timestamp column
pub const TIMESTAMP_COLUMN_BYTES: u64 = 27;

/// Bytes for the row id column
pub const ID_COLUMN_BYTES: u64 = 8;

const MS_PER_MINUTE: u64 = 60_000;

const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

/// Data type of a logged variable
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LoggedDataType {
    Int16,
    Int32,
    Int64,
    Float,
    Double,
    Boolean,
    Byte,
    SByte,
    UInt16,
    UInt32,
    DateTime,
    UtcTime,
    /// Generic type; the concrete type comes from the dynamic link target
    BaseDataType,
    /// Any type without a known column size (strings, structures, ...)
    Other(String),
}

impl LoggedDataType {
    /// Column size in bytes, `None` for types without a known size
    pub fn column_bytes(&self) -> Option<u64> {
        match self {
            LoggedDataType::Int16
            | LoggedDataType::Int32
            | LoggedDataType::Int64
            | LoggedDataType::Float
            | LoggedDataType::Double
            | LoggedDataType::Boolean
            | LoggedDataType::Byte
            | LoggedDataType::SByte
            | LoggedDataType::UInt16
            | LoggedDataType::UInt32 => Some(SCALAR_COLUMN_BYTES),
            LoggedDataType::DateTime | LoggedDataType::UtcTime => Some(TIMESTAMP_COLUMN_BYTES),
            LoggedDataType::BaseDataType | LoggedDataType::Other(_) => None,
        }
    }
}

/// A variable recorded by the data logger
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoggedVariable {
    pub name: String,
    pub data_type: LoggedDataType,
    /// Data type of the dynamic link source, if the variable has one
    pub link_target: Option<LoggedDataType>,
}

impl LoggedVariable {
    pub fn new(name: impl Into<String>, data_type: LoggedDataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            link_target: None,
        }
    }

    /// Variable typed `BaseDataType` whose dynamic link resolves to `target`
    pub fn linked(name: impl Into<String>, target: LoggedDataType) -> Self {
        Self {
            name: name.into(),
            data_type: LoggedDataType::BaseDataType,
            link_target: Some(target),
        }
    }

    /// Effective data type: the link target for generic variables
    pub fn resolved_type(&self) -> Option<&LoggedDataType> {
        match self.data_type {
            LoggedDataType::BaseDataType => self.link_target.as_ref(),
            ref data_type => Some(data_type),
        }
    }
}

/// Data logger settings that drive its storage footprint
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DataLoggerConfig {
    pub variables: Vec<LoggedVariable>,
    pub sampling_period_ms: u64,
    /// Adds a local-time timestamp column
    pub log_local_time: bool,
}

/// Estimated storage footprint of a data logger
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpaceEstimate {
    pub bytes_per_record: u64,
    pub sampling_period_ms: u64,
    /// Variables left out of the estimate (unsupported or unresolved type)
    pub skipped: Vec<String>,
}

impl SpaceEstimate {
    /// Whole records written per minute
    pub fn records_per_minute(&self) -> u64 {
        MS_PER_MINUTE / self.sampling_period_ms.max(1)
    }

    pub fn bytes_per_minute(&self) -> u64 {
        self.bytes_per_record * MS_PER_MINUTE / self.sampling_period_ms.max(1)
    }

    pub fn bytes_per_hour(&self) -> u64 {
        self.bytes_per_record * MS_PER_HOUR / self.sampling_period_ms.max(1)
    }

    pub fn kilobytes_per_record(&self) -> u64 {
        self.bytes_per_record / 1024
    }

    pub fn kilobytes_per_minute(&self) -> u64 {
        self.bytes_per_minute() / 1024
    }

    pub fn kilobytes_per_hour(&self) -> u64 {
        self.bytes_per_hour() / 1024
    }

    /// Whether every variable was accounted for
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

impl fmt::Display for SpaceEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bytes ({} KB) every {} ms, {} bytes ({} KB) per minute, {} bytes ({} KB) per hour",
            self.bytes_per_record,
            self.kilobytes_per_record(),
            self.sampling_period_ms,
            self.bytes_per_minute(),
            self.kilobytes_per_minute(),
            self.bytes_per_hour(),
            self.kilobytes_per_hour()
        )
    }
}

/// Estimate how much space a data logger consumes.
///
/// Variables whose type has no known size, or whose dynamic link cannot be
/// resolved, are skipped with a warning and listed in
/// [`SpaceEstimate::skipped`].
///
/// # Errors
/// Returns `InvalidSamplingPeriod` for a zero sampling period.
///
/// # Example
/// ```
/// use keypad_entry::storage::{estimate_space, DataLoggerConfig, LoggedDataType, LoggedVariable};
///
/// let config = DataLoggerConfig {
///     variables: vec![LoggedVariable::new("Temperature", LoggedDataType::Double)],
///     sampling_period_ms: 1000,
///     log_local_time: false,
/// };
/// let estimate = estimate_space(&config).unwrap();
/// assert_eq!(estimate.bytes_per_record, 8 + 27 + 8);
/// assert_eq!(estimate.records_per_minute(), 60);
/// ```
pub fn estimate_space(config: &DataLoggerConfig) -> StorageResult<SpaceEstimate> {
    if config.sampling_period_ms == 0 {
        return Err(StorageError::InvalidSamplingPeriod);
    }

    tracing::debug!(count = config.variables.len(), "Found variables to log");

    let mut bytes_per_record = 0u64;
    let mut skipped = Vec::new();
    for variable in &config.variables {
        let Some(data_type) = variable.resolved_type() else {
            tracing::warn!(
                variable = %variable.name,
                "Cannot find any dynamic link, cannot retrieve original data type"
            );
            skipped.push(variable.name.clone());
            continue;
        };

        match data_type.column_bytes() {
            Some(bytes) => bytes_per_record += bytes,
            None => {
                tracing::warn!(
                    variable = %variable.name,
                    ?data_type,
                    "Cannot calculate space, unsupported data type"
                );
                skipped.push(variable.name.clone());
            },
        }
    }

    bytes_per_record += TIMESTAMP_COLUMN_BYTES;
    if config.log_local_time {
        bytes_per_record += TIMESTAMP_COLUMN_BYTES;
    }
    bytes_per_record += ID_COLUMN_BYTES;

    let estimate = SpaceEstimate {
        bytes_per_record,
        sampling_period_ms: config.sampling_period_ms,
        skipped,
    };
    tracing::info!("Logger is consuming {}", estimate);

    Ok(estimate)
}
