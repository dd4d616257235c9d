// ============================================================================
// Decimal Rounding
// Round, convert and render entry values at a given fractional digit count
// ============================================================================

use super::errors::{EntryError, EntryResult};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Maximum number of significant digits an entry may hold.
///
/// Fifteen decimal digits always survive a round trip through `f64`, so an
/// entry written to the field reads back as the same digits.
pub const MAX_SIGNIFICANT_DIGITS: usize = 15;

/// Round to `digits` fractional digits, ties to even.
///
/// The panel runtime rounds spin-box values with banker's rounding, so values
/// written by other code are picked up the same way.
#[inline]
pub fn round_to(value: Decimal, digits: u32) -> Decimal {
    value.round_dp_with_strategy(digits, RoundingStrategy::MidpointNearestEven)
}

/// Convert a field value to an exact decimal.
///
/// # Errors
/// Returns `NotRepresentable` for NaN, infinities and magnitudes beyond the
/// decimal range.
pub fn decimal_from_f64(value: f64) -> EntryResult<Decimal> {
    if !value.is_finite() {
        return Err(EntryError::NotRepresentable);
    }
    Decimal::from_f64(value).ok_or(EntryError::NotRepresentable)
}

/// Convert an exact decimal to the nearest `f64`.
///
/// Goes through the decimal text so the result is correctly rounded: `12.345`
/// converts to the same `f64` as the literal `12.345`.
pub fn decimal_to_f64(value: Decimal) -> EntryResult<f64> {
    let value: f64 = value
        .to_string()
        .parse()
        .map_err(|_| EntryError::NotRepresentable)?;
    // -0.0 and 0.0 compare equal, but keep the field free of negative zero
    Ok(if value == 0.0 { 0.0 } else { value })
}

/// Render `value` with exactly `digits` fractional digits using `separator`.
///
/// # Example
/// ```
/// use keypad_entry::numeric::render;
/// use rust_decimal::Decimal;
///
/// assert_eq!(render(Decimal::new(125, 1), 2, ','), "12,50");
/// assert_eq!(render(Decimal::new(125, 1), 0, ','), "12");
/// ```
pub fn render(value: Decimal, digits: u32, separator: char) -> String {
    let mut rounded = round_to(value, digits);
    rounded.rescale(digits);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }

    let text = rounded.to_string();
    if separator == '.' {
        text
    } else {
        text.replace('.', &separator.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_ties_to_even() {
        assert_eq!(round_to(Decimal::new(125, 2), 1), Decimal::new(12, 1));
        assert_eq!(round_to(Decimal::new(135, 2), 1), Decimal::new(14, 1));
        assert_eq!(round_to(Decimal::new(25, 1), 0), Decimal::from(2));
    }

    #[test]
    fn test_round_to_is_idempotent() {
        let once = round_to(Decimal::new(123_456, 4), 2);
        assert_eq!(round_to(once, 2), once);
    }

    #[test]
    fn test_decimal_from_f64() {
        assert_eq!(decimal_from_f64(12.5).unwrap(), Decimal::new(125, 1));
        assert_eq!(decimal_from_f64(-3.0).unwrap(), Decimal::from(-3));
        assert_eq!(decimal_from_f64(f64::NAN), Err(EntryError::NotRepresentable));
        assert_eq!(
            decimal_from_f64(f64::INFINITY),
            Err(EntryError::NotRepresentable)
        );
    }

    #[test]
    fn test_decimal_to_f64() {
        assert_eq!(decimal_to_f64(Decimal::new(12_345, 3)).unwrap(), 12.345);
        assert_eq!(decimal_to_f64(Decimal::new(-7, 0)).unwrap(), -7.0);

        let negative_zero = decimal_to_f64(-Decimal::ZERO).unwrap();
        assert!(negative_zero.is_sign_positive());
    }

    #[test]
    fn test_render_pads_and_separates() {
        assert_eq!(render(Decimal::new(12, 0), 1, ','), "12,0");
        assert_eq!(render(Decimal::new(-105, 2), 2, ','), "-1,05");
        assert_eq!(render(Decimal::new(125, 1), 1, '.'), "12.5");
    }

    #[test]
    fn test_render_zero_has_no_sign() {
        assert_eq!(render(-Decimal::ZERO, 0, ','), "0");
        assert_eq!(render(Decimal::new(-4, 3), 2, ','), "0,00");
    }
}
