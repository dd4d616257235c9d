// ============================================================================
// Key Domain Model
// Digits and key events sent by the button grid
// ============================================================================

use crate::numeric::{EntryError, EntryResult};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Value Objects
// ============================================================================

/// A single decimal digit, 0 through 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Digit(u8);

impl Digit {
    pub const ZERO: Self = Self(0);

    /// Create a digit from its numeric value.
    ///
    /// Returns `None` for values above 9.
    #[inline]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 9 {
            Some(Self(value))
        } else {
            None
        }
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

impl TryFrom<char> for Digit {
    type Error = EntryError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        c.to_digit(10)
            .map(|d| Self(d as u8))
            .ok_or(EntryError::InvalidDigit(c))
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sign of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sign {
    #[default]
    Positive,
    Negative,
}

impl Sign {
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Sign::Positive => Sign::Negative,
            Sign::Negative => Sign::Positive,
        }
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        matches!(self, Sign::Negative)
    }
}

// ============================================================================
// Key Events
// ============================================================================

/// A discrete key press from the button grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum KeyEvent {
    Digit(Digit),
    /// Start the fractional part with the next digit
    DecimalSeparator,
    Backspace,
    ToggleSign,
    Clear,
}

impl KeyEvent {
    /// Parse a button-grid token.
    ///
    /// - `"0"`..`"9"`: digit
    /// - `""` or `"BS"`: backspace (the grid routes backspace as an empty digit)
    /// - `"."` or `separator`: decimal separator
    /// - `"+/-"` or `"±"`: toggle sign
    /// - `"C"`: clear
    ///
    /// # Errors
    /// Returns `InvalidToken` for anything else.
    pub fn from_token(token: &str, separator: char) -> EntryResult<Self> {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (None, _) => return Ok(KeyEvent::Backspace),
            (Some(c), None) if c.is_ascii_digit() => {
                return Digit::try_from(c).map(KeyEvent::Digit);
            },
            (Some(c), None) if c == separator || c == '.' => {
                return Ok(KeyEvent::DecimalSeparator);
            },
            _ => {},
        }

        match token {
            "BS" => Ok(KeyEvent::Backspace),
            "+/-" | "±" => Ok(KeyEvent::ToggleSign),
            "C" => Ok(KeyEvent::Clear),
            _ => Err(EntryError::InvalidToken(token.to_string())),
        }
    }
}

impl From<Digit> for KeyEvent {
    fn from(digit: Digit) -> Self {
        KeyEvent::Digit(digit)
    }
}
