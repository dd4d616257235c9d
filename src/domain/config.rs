// ============================================================================
// Keypad Configuration
// Separator and digit capacity for a keypad entry
// ============================================================================

use crate::numeric::MAX_SIGNIFICANT_DIGITS;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default separator, matching the comma-decimal locale of the panel runtime
pub const DEFAULT_SEPARATOR: char = ',';

/// Configuration for a keypad controller
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KeypadConfig {
    /// Decimal separator used for rendering and accepted as a key token
    pub separator: char,

    /// Maximum number of integer digits; further digits are rejected
    pub max_integer_digits: usize,

    /// Maximum number of fractional digits; 0 disables fraction entry
    pub max_fraction_digits: usize,
}

impl Default for KeypadConfig {
    fn default() -> Self {
        Self::comma_decimal()
    }
}

impl KeypadConfig {
    /// Create a new configuration with required parameters
    pub fn new(separator: char, max_integer_digits: usize, max_fraction_digits: usize) -> Self {
        Self {
            separator,
            max_integer_digits,
            max_fraction_digits,
        }
    }

    /// Builder method: Set the decimal separator
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Builder method: Set the integer digit capacity
    pub fn with_max_integer_digits(mut self, digits: usize) -> Self {
        self.max_integer_digits = digits;
        self
    }

    /// Builder method: Set the fractional digit capacity
    pub fn with_max_fraction_digits(mut self, digits: usize) -> Self {
        self.max_fraction_digits = digits;
        self
    }

    /// Whether the fractional part can be entered at all
    #[inline]
    pub fn allows_fraction(&self) -> bool {
        self.max_fraction_digits > 0
    }

    /// Reduce the digit capacities to what an `f64` field holds exactly.
    ///
    /// The integer capacity is kept within `1..=MAX_SIGNIFICANT_DIGITS` and the
    /// fractional capacity gets whatever digits remain.
    pub fn clamped(mut self) -> Self {
        self.max_integer_digits = self.max_integer_digits.clamp(1, MAX_SIGNIFICANT_DIGITS);
        self.max_fraction_digits = self
            .max_fraction_digits
            .min(MAX_SIGNIFICANT_DIGITS - self.max_integer_digits);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.separator.is_ascii_digit() || matches!(self.separator, '+' | '-') {
            return Err(format!(
                "Separator {:?} cannot be a digit or a sign",
                self.separator
            ));
        }

        if self.separator.is_whitespace() {
            return Err("Separator cannot be whitespace".to_string());
        }

        if self.max_integer_digits == 0 {
            return Err("Integer digit capacity must be positive".to_string());
        }

        if self.max_integer_digits + self.max_fraction_digits > MAX_SIGNIFICANT_DIGITS {
            return Err(format!(
                "Integer and fraction capacity cannot exceed {} digits in total",
                MAX_SIGNIFICANT_DIGITS
            ));
        }

        Ok(())
    }

    /// Parse a configuration from JSON and validate it.
    ///
    /// Missing fields fall back to the comma-decimal defaults.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> Result<Self, String> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| format!("Invalid keypad config: {}", e))?;
        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl KeypadConfig {
    /// Comma decimal separator, 12 integer and 3 fractional digits
    pub fn comma_decimal() -> Self {
        Self::new(',', 12, 3)
    }

    /// Point decimal separator, 12 integer and 3 fractional digits
    pub fn point_decimal() -> Self {
        Self::new('.', 12, 3)
    }

    /// Whole numbers only, up to 15 digits
    pub fn integer_only() -> Self {
        Self::new(DEFAULT_SEPARATOR, MAX_SIGNIFICANT_DIGITS, 0)
    }
}
