// ============================================================================
// Entry Buffer
// Owned digit buffer for a keypad entry and its entry-mode state machine
// ============================================================================

use super::key::{Digit, Sign};
use crate::numeric::{round_to, EntryError, EntryResult, MAX_SIGNIFICANT_DIGITS};
use arrayvec::ArrayVec;
use rust_decimal::Decimal;
use std::fmt;

// ============================================================================
// Entry Mode State Machine
// ============================================================================

pub mod state {
    #[cfg(feature = "serde")]
    use serde::{Deserialize, Serialize};

    /// Whether digits currently land before or after the separator.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub enum EntryMode {
        #[default]
        Integer,
        Fraction,
    }

    /// Valid transitions between entry modes
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum EntryTransition {
        FirstFractionDigit,
        LastFractionDigitRemoved,
        Reset,
    }

    impl EntryMode {
        pub fn transition(&self, transition: EntryTransition) -> Result<EntryMode, String> {
            match (self, transition) {
                (EntryMode::Integer, EntryTransition::FirstFractionDigit) => {
                    Ok(EntryMode::Fraction)
                },
                (EntryMode::Fraction, EntryTransition::LastFractionDigitRemoved) => {
                    Ok(EntryMode::Integer)
                },
                (_, EntryTransition::Reset) => Ok(EntryMode::Integer),

                _ => Err(format!(
                    "Invalid transition from {:?} via {:?}",
                    self, transition
                )),
            }
        }
    }
}

use state::EntryMode;

// ============================================================================
// Digit Buffer
// ============================================================================

type Digits = ArrayVec<Digit, MAX_SIGNIFICANT_DIGITS>;

/// Sign, integer digits and fractional digits of an entry.
///
/// The integer part never carries leading zeros; an empty integer part reads
/// as 0. The fractional part keeps every typed digit, trailing zeros
/// included, so `12,50` stays two fractional digits.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntryBuffer {
    sign: Sign,
    integer: Digits,
    fraction: Digits,
}

impl EntryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a buffer from a value, keeping exactly `fraction_digits`
    /// fractional digits.
    ///
    /// # Errors
    /// - `IntegerOverflow` if the rounded value needs more than
    ///   `max_integer_digits` integer digits
    /// - `FractionOverflow` if `fraction_digits` exceeds `max_fraction_digits`
    pub fn from_decimal(
        value: Decimal,
        fraction_digits: usize,
        max_integer_digits: usize,
        max_fraction_digits: usize,
    ) -> EntryResult<Self> {
        let max_fraction_digits = max_fraction_digits.min(MAX_SIGNIFICANT_DIGITS);
        let max_integer_digits = max_integer_digits.min(MAX_SIGNIFICANT_DIGITS);
        if fraction_digits > max_fraction_digits {
            return Err(EntryError::FractionOverflow {
                limit: max_fraction_digits,
            });
        }

        let rounded = round_to(value, fraction_digits as u32);
        let bound = Decimal::from(10u64.pow(max_integer_digits as u32));
        if rounded.abs() >= bound {
            return Err(EntryError::IntegerOverflow {
                limit: max_integer_digits,
            });
        }

        let mut scaled = rounded;
        scaled.rescale(fraction_digits as u32);
        let text = scaled.mantissa().unsigned_abs().to_string();
        let padded = format!("{:0>width$}", text, width = fraction_digits + 1);
        let (int_text, frac_text) = padded.split_at(padded.len() - fraction_digits);

        let mut buffer = Self::new();
        for c in int_text.trim_start_matches('0').chars() {
            buffer.push_integer(Digit::try_from(c)?, max_integer_digits)?;
        }
        for c in frac_text.chars() {
            buffer.push_fraction(Digit::try_from(c)?, max_fraction_digits)?;
        }
        if rounded.is_sign_negative() && !rounded.is_zero() {
            buffer.sign = Sign::Negative;
        }

        Ok(buffer)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    #[inline]
    pub fn integer_digits(&self) -> &[Digit] {
        &self.integer
    }

    #[inline]
    pub fn fraction_digits(&self) -> &[Digit] {
        &self.fraction
    }

    /// Number of digits typed after the separator.
    #[inline]
    pub fn fraction_len(&self) -> usize {
        self.fraction.len()
    }

    #[inline]
    pub fn mode(&self) -> EntryMode {
        if self.fraction.is_empty() {
            EntryMode::Integer
        } else {
            EntryMode::Fraction
        }
    }

    /// True when every digit is zero (or none has been typed).
    pub fn is_zero(&self) -> bool {
        self.integer.is_empty() && self.fraction.iter().all(|d| d.is_zero())
    }

    // ========================================================================
    // Edits
    // ========================================================================

    /// Append an integer digit. A zero typed on an empty integer part is
    /// absorbed.
    ///
    /// # Errors
    /// Returns `IntegerOverflow` when the integer part already holds `limit` digits.
    pub fn push_integer(&mut self, digit: Digit, limit: usize) -> EntryResult<()> {
        if self.integer.is_empty() && digit.is_zero() {
            return Ok(());
        }
        if self.integer.len() >= limit {
            return Err(EntryError::IntegerOverflow { limit });
        }
        self.integer
            .try_push(digit)
            .map_err(|_| EntryError::IntegerOverflow { limit })
    }

    /// Append a fractional digit.
    ///
    /// # Errors
    /// Returns `FractionOverflow` when the fraction already holds `limit` digits.
    pub fn push_fraction(&mut self, digit: Digit, limit: usize) -> EntryResult<()> {
        if self.fraction.len() >= limit {
            return Err(EntryError::FractionOverflow { limit });
        }
        self.fraction
            .try_push(digit)
            .map_err(|_| EntryError::FractionOverflow { limit })
    }

    pub fn pop_integer(&mut self) -> Option<Digit> {
        self.integer.pop()
    }

    pub fn pop_fraction(&mut self) -> Option<Digit> {
        self.fraction.pop()
    }

    pub fn toggle_sign(&mut self) {
        self.sign = self.sign.flipped();
    }

    pub fn clear(&mut self) {
        self.sign = Sign::Positive;
        self.integer.clear();
        self.fraction.clear();
    }

    // ========================================================================
    // Derived Value
    // ========================================================================

    /// Exact value of the buffer, scaled to the typed fractional digit count.
    ///
    /// # Errors
    /// Returns `NotRepresentable` if the digits exceed the decimal range,
    /// which the digit capacity rules out in practice.
    pub fn to_decimal(&self) -> EntryResult<Decimal> {
        let mantissa = self
            .integer
            .iter()
            .chain(self.fraction.iter())
            .fold(0i128, |acc, d| acc * 10 + i128::from(d.value()));
        let mut value = Decimal::try_from_i128_with_scale(mantissa, self.fraction.len() as u32)
            .map_err(|_| EntryError::NotRepresentable)?;
        value.set_sign_negative(self.sign.is_negative());
        Ok(value)
    }

    /// Render the buffer with the given separator.
    ///
    /// The separator appears only once a fractional digit exists.
    pub fn to_text(&self, separator: char) -> String {
        let mut text = String::with_capacity(self.integer.len() + self.fraction.len() + 2);
        if self.sign.is_negative() && !self.is_zero() {
            text.push('-');
        }
        if self.integer.is_empty() {
            text.push('0');
        } else {
            text.extend(self.integer.iter().map(|d| d.as_char()));
        }
        if !self.fraction.is_empty() {
            text.push(separator);
            text.extend(self.fraction.iter().map(|d| d.as_char()));
        }
        text
    }
}

impl fmt::Display for EntryBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text('.'))
    }
}
