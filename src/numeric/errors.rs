// ============================================================================
// Entry Errors
// Error types for keypad entry operations
// ============================================================================

use std::fmt;

/// Errors that can occur while editing a keypad entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryError {
    /// Integer part already holds the maximum number of digits
    IntegerOverflow { limit: usize },
    /// Fractional part already holds the maximum number of digits
    FractionOverflow { limit: usize },
    /// Character is not a decimal digit
    InvalidDigit(char),
    /// Dispatcher token does not map to any key
    InvalidToken(String),
    /// Field value cannot be represented as a keypad entry (NaN or infinite)
    NotRepresentable,
}

impl fmt::Display for EntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryError::IntegerOverflow { limit } => {
                write!(f, "integer overflow: entry is limited to {} integer digits", limit)
            },
            EntryError::FractionOverflow { limit } => {
                write!(f, "fraction overflow: entry is limited to {} fractional digits", limit)
            },
            EntryError::InvalidDigit(c) => write!(f, "invalid digit: {:?}", c),
            EntryError::InvalidToken(token) => write!(f, "invalid key token: {:?}", token),
            EntryError::NotRepresentable => {
                write!(f, "field value is not a finite number")
            },
        }
    }
}

impl std::error::Error for EntryError {}

/// Result type alias for entry operations
pub type EntryResult<T> = Result<T, EntryError>;
