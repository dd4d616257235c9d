// ============================================================================
// Numeric Module
// Exact decimal helpers for keypad entry values
// ============================================================================
//
// This module provides:
// - EntryError: Error types for keypad edits
// - Rounding and rendering helpers over rust_decimal::Decimal
//
// Design principles:
// - Entry values are exact decimals; f64 only appears at the field boundary
// - All conversions return Result (no panics)
// - One fixed decimal separator per rendering call

mod errors;
mod rounding;

pub use errors::{EntryError, EntryResult};
pub use rounding::{decimal_from_f64, decimal_to_f64, render, round_to, MAX_SIGNIFICANT_DIGITS};
