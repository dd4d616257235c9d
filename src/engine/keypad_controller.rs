// ============================================================================
// Keypad Controller
// Applies key presses to an owned entry buffer and mirrors it into a field
// ============================================================================

use crate::domain::{Digit, EntryBuffer, EntryMode, EntryTransition, KeyEvent, KeypadConfig};
use crate::interfaces::{KeypadEvent, KeypadEventHandler, NumericField};
use crate::numeric::{
    decimal_from_f64, decimal_to_f64, render, EntryError, EntryResult, MAX_SIGNIFICANT_DIGITS,
};
use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Numeric keypad bound to a single field.
///
/// The controller owns the entry state: typed digits, sign, and whether the
/// next digit starts the fractional part. The field only ever sees the
/// derived value. Every operation runs to completion before returning.
pub struct KeypadController<F: NumericField> {
    /// Bound display/edit field
    field: F,

    /// Separator and digit capacity
    config: KeypadConfig,

    /// Authoritative entry digits
    buffer: EntryBuffer,

    /// Next digit starts the fractional part
    pending_fraction: bool,

    /// Value last written to the field
    current_value: f64,

    /// Event handler for observing edits
    event_handler: Arc<dyn KeypadEventHandler>,
}

impl<F: NumericField> KeypadController<F> {
    /// Bind a controller to `field` and clear it.
    ///
    /// Digit capacities beyond what the field holds exactly are reduced (see
    /// [`KeypadConfig::clamped`]).
    pub fn new(field: F, config: KeypadConfig, event_handler: Arc<dyn KeypadEventHandler>) -> Self {
        let clamped = config.clone().clamped();
        if clamped != config {
            tracing::warn!(
                requested_integer = config.max_integer_digits,
                requested_fraction = config.max_fraction_digits,
                max_integer_digits = clamped.max_integer_digits,
                max_fraction_digits = clamped.max_fraction_digits,
                "Keypad digit capacity reduced"
            );
        }

        let mut controller = Self {
            field,
            config: clamped,
            buffer: EntryBuffer::new(),
            pending_fraction: false,
            current_value: 0.0,
            event_handler,
        };
        controller.clear();
        controller
    }

    // ========================================================================
    // Key Operations
    // ========================================================================

    /// Append a digit to the active part of the entry.
    ///
    /// Digits go to the fractional part when it already has digits or when
    /// fraction entry was requested; otherwise to the integer part.
    ///
    /// # Errors
    /// - `IntegerOverflow`/`FractionOverflow` when the active part is full,
    ///   or when the entry holds an adopted value larger than the integer
    ///   capacity; the entry and the field are left unchanged
    /// - `NotRepresentable`/`IntegerOverflow` when the field holds a foreign
    ///   value that cannot be adopted (see [`Self::sync_from_field`])
    pub fn append_digit(&mut self, digit: Digit) -> EntryResult<f64> {
        self.sync_from_field()?;

        let max_integer_digits = self.config.max_integer_digits;
        if self.buffer.integer_digits().len() > max_integer_digits {
            let error = EntryError::IntegerOverflow {
                limit: max_integer_digits,
            };
            self.reject(&error);
            return Err(error);
        }

        let snapshot = (self.buffer.clone(), self.pending_fraction);
        let mode_before = self.buffer.mode();
        let starts_fraction = mode_before == EntryMode::Integer && self.pending_fraction;

        let pushed = if mode_before == EntryMode::Fraction || starts_fraction {
            self.buffer
                .push_fraction(digit, self.config.max_fraction_digits)
        } else {
            self.buffer.push_integer(digit, max_integer_digits)
        };
        if let Err(error) = pushed {
            self.reject(&error);
            return Err(error);
        }
        if starts_fraction {
            self.pending_fraction = false;
        }

        let value = match self.commit() {
            Ok(value) => value,
            Err(error) => {
                (self.buffer, self.pending_fraction) = snapshot;
                self.reject(&error);
                return Err(error);
            },
        };

        let mut events = vec![KeypadEvent::DigitAppended {
            digit,
            value,
            timestamp: Utc::now(),
        }];
        self.track_mode(mode_before, EntryTransition::FirstFractionDigit, &mut events);
        self.event_handler.on_events(events);

        Ok(value)
    }

    /// Remove the last typed digit.
    ///
    /// Removes from the fractional part first. With no fractional digits but
    /// a pending fraction request, cancels the request. With nothing left the
    /// entry stays at 0.
    ///
    /// Works on any value the field holds: an external value with more integer
    /// digits than configured is shortened digit by digit.
    pub fn backspace(&mut self) -> EntryResult<f64> {
        self.adopt_field_value()?;

        let mode_before = self.buffer.mode();
        let removed = match self.buffer.pop_fraction() {
            Some(digit) => Some(digit),
            None if self.pending_fraction => {
                self.pending_fraction = false;
                self.event_handler
                    .on_event(KeypadEvent::FractionEntryCancelled {
                        timestamp: Utc::now(),
                    });
                return Ok(self.current_value);
            },
            None => self.buffer.pop_integer(),
        };

        let value = self.commit()?;

        let mut events = Vec::new();
        if let Some(digit) = removed {
            events.push(KeypadEvent::DigitRemoved {
                digit,
                value,
                timestamp: Utc::now(),
            });
        }
        self.track_mode(
            mode_before,
            EntryTransition::LastFractionDigitRemoved,
            &mut events,
        );
        self.event_handler.on_events(events);

        Ok(value)
    }

    /// Flip the sign of the entry. The fractional digit count is unchanged.
    ///
    /// The sign is kept even while the entry is zero, so toggling first and
    /// typing `5` afterwards gives `-5`. Works on any value the field holds.
    pub fn toggle_sign(&mut self) -> EntryResult<f64> {
        self.adopt_field_value()?;

        self.buffer.toggle_sign();
        let value = self.commit()?;

        self.event_handler.on_event(KeypadEvent::SignToggled {
            value,
            timestamp: Utc::now(),
        });

        Ok(value)
    }

    /// Reset the entry and the field to 0.
    ///
    /// Also recovers a field that holds a value the entry cannot adopt.
    pub fn clear(&mut self) -> f64 {
        let mode_before = self.buffer.mode();

        self.buffer.clear();
        self.pending_fraction = false;
        self.current_value = 0.0;
        self.field.set_value(0.0);

        let mut events = vec![KeypadEvent::Cleared {
            timestamp: Utc::now(),
        }];
        self.track_mode(mode_before, EntryTransition::Reset, &mut events);
        self.event_handler.on_events(events);

        self.current_value
    }

    /// Make the next digit the first fractional digit.
    ///
    /// Returns whether a request is now pending. Ignored while fractional
    /// digits already exist or when the configuration disallows fractions.
    pub fn request_fraction_entry(&mut self) -> bool {
        if !self.config.allows_fraction() || self.buffer.mode() == EntryMode::Fraction {
            return false;
        }
        if !self.pending_fraction {
            self.pending_fraction = true;
            self.event_handler
                .on_event(KeypadEvent::FractionEntryRequested {
                    timestamp: Utc::now(),
                });
        }
        true
    }

    /// Apply a key event from the button grid.
    pub fn apply(&mut self, event: KeyEvent) -> EntryResult<f64> {
        match event {
            KeyEvent::Digit(digit) => self.append_digit(digit),
            KeyEvent::DecimalSeparator => {
                self.adopt_field_value()?;
                self.request_fraction_entry();
                Ok(self.current_value)
            },
            KeyEvent::Backspace => self.backspace(),
            KeyEvent::ToggleSign => self.toggle_sign(),
            KeyEvent::Clear => Ok(self.clear()),
        }
    }

    /// Parse and apply a button-grid token (see [`KeyEvent::from_token`]).
    pub fn apply_token(&mut self, token: &str) -> EntryResult<f64> {
        let event = KeyEvent::from_token(token, self.config.separator).inspect_err(|error| {
            self.reject(error);
        })?;
        self.apply(event)
    }

    // ========================================================================
    // Field Synchronization
    // ========================================================================

    /// Adopt a value written to the field by other code.
    ///
    /// When the field no longer shows the value this controller wrote, the
    /// entry is rebuilt from the field value rounded to the current
    /// fractional digit count, and the rounded value is written back.
    ///
    /// # Errors
    /// - `NotRepresentable` if the field holds NaN or an infinity
    /// - `IntegerOverflow` if the value needs more integer digits than allowed
    ///
    /// The entry is left unchanged on error. Backspace, sign toggle and clear
    /// still work on such a field.
    pub fn sync_from_field(&mut self) -> EntryResult<()> {
        match self.rebuild_from_field(self.config.max_integer_digits) {
            None => Ok(()),
            Some(Ok(buffer)) => self.adopt(buffer),
            Some(Err(error)) => {
                self.reject(&error);
                Err(error)
            },
        }
    }

    /// Adopt the field value for an edit that works on any value.
    ///
    /// Values with more integer digits than configured are held as long as
    /// the whole entry fits in [`MAX_SIGNIFICANT_DIGITS`]; backspace then
    /// shortens them and digit entry stays rejected until they fit. A field
    /// value that cannot be held at all (NaN, infinities, too many digits)
    /// is discarded and the entry restarts from 0.
    fn adopt_field_value(&mut self) -> EntryResult<()> {
        let max_integer_digits = MAX_SIGNIFICANT_DIGITS.saturating_sub(self.buffer.fraction_len());
        match self.rebuild_from_field(max_integer_digits) {
            None => Ok(()),
            Some(Ok(buffer)) => self.adopt(buffer),
            Some(Err(error)) => {
                self.reject(&error);
                self.pending_fraction = false;
                self.adopt(EntryBuffer::new())
            },
        }
    }

    /// Rebuild the entry from the field, or `None` when the field still shows
    /// the value last written.
    fn rebuild_from_field(&self, max_integer_digits: usize) -> Option<EntryResult<EntryBuffer>> {
        let field_value = self.field.value();
        if field_value == self.current_value {
            return None;
        }

        Some(decimal_from_f64(field_value).and_then(|decimal| {
            EntryBuffer::from_decimal(
                decimal,
                self.buffer.fraction_len(),
                max_integer_digits,
                self.config.max_fraction_digits,
            )
        }))
    }

    fn adopt(&mut self, buffer: EntryBuffer) -> EntryResult<()> {
        tracing::debug!(
            field_value = self.field.value(),
            previous = self.current_value,
            "Keypad field changed externally, rebuilding entry"
        );

        self.buffer = buffer;
        let value = self.commit()?;
        self.event_handler.on_event(KeypadEvent::FieldResynced {
            value,
            fraction_digits: self.buffer.fraction_len(),
            timestamp: Utc::now(),
        });

        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Value last written to the field
    #[inline]
    pub fn value(&self) -> f64 {
        self.current_value
    }

    /// Exact value of the entry
    pub fn decimal_value(&self) -> EntryResult<Decimal> {
        self.buffer.to_decimal()
    }

    /// Number of digits typed after the separator
    #[inline]
    pub fn fraction_digits(&self) -> usize {
        self.buffer.fraction_len()
    }

    #[inline]
    pub fn mode(&self) -> EntryMode {
        self.buffer.mode()
    }

    #[inline]
    pub fn is_fraction_pending(&self) -> bool {
        self.pending_fraction
    }

    /// Entry rendered with the configured separator and exactly
    /// `fraction_digits()` fractional digits.
    pub fn display_text(&self) -> String {
        match self.buffer.to_decimal() {
            Ok(value) => render(
                value,
                self.buffer.fraction_len() as u32,
                self.config.separator,
            ),
            Err(_) => self.buffer.to_text(self.config.separator),
        }
    }

    pub fn buffer(&self) -> &EntryBuffer {
        &self.buffer
    }

    pub fn config(&self) -> &KeypadConfig {
        &self.config
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    /// Unbind and return the field
    pub fn into_field(self) -> F {
        self.field
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Derive the value from the buffer and write it to the field
    fn commit(&mut self) -> EntryResult<f64> {
        let value = decimal_to_f64(self.buffer.to_decimal()?)?;
        self.field.set_value(value);
        self.current_value = value;
        Ok(value)
    }

    fn reject(&self, error: &EntryError) {
        self.event_handler.on_event(KeypadEvent::InputRejected {
            reason: error.to_string(),
            timestamp: Utc::now(),
        });
    }

    fn track_mode(
        &self,
        before: EntryMode,
        transition: EntryTransition,
        events: &mut Vec<KeypadEvent>,
    ) {
        let after = self.buffer.mode();
        if before == after {
            return;
        }
        match before.transition(transition) {
            Ok(to) if to == after => events.push(KeypadEvent::ModeChanged {
                from: before,
                to,
                timestamp: Utc::now(),
            }),
            Ok(_) | Err(_) => tracing::error!(
                ?before,
                ?after,
                ?transition,
                "Unexpected entry mode change"
            ),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::interfaces::{NoOpEventHandler, SpinBox};
    use proptest::prelude::*;

    fn keypad() -> KeypadController<SpinBox> {
        KeypadController::new(
            SpinBox::default(),
            KeypadConfig::default(),
            Arc::new(NoOpEventHandler),
        )
    }

    fn digits(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
        prop::collection::vec(0u8..=9, 0..=max_len)
    }

    fn key_event() -> impl Strategy<Value = KeyEvent> {
        prop_oneof![
            4 => (0u8..=9).prop_map(|d| KeyEvent::Digit(Digit::new(d).unwrap())),
            1 => Just(KeyEvent::DecimalSeparator),
            2 => Just(KeyEvent::Backspace),
            1 => Just(KeyEvent::ToggleSign),
            1 => Just(KeyEvent::Clear),
        ]
    }

    proptest! {
        #[test]
        fn integer_entry_matches_integer_parse(typed in digits(12)) {
            let mut keypad = keypad();
            for &d in &typed {
                keypad.append_digit(Digit::new(d).unwrap()).unwrap();
            }

            let text: String = typed.iter().map(|d| char::from(b'0' + d)).collect();
            let expected = if text.is_empty() { 0 } else { text.parse::<u64>().unwrap() };
            prop_assert_eq!(keypad.value(), expected as f64);
            prop_assert_eq!(keypad.fraction_digits(), 0);
        }

        #[test]
        fn digit_then_backspace_restores(
            integer in digits(6),
            fraction in digits(2),
            fractional in any::<bool>(),
            extra in 0u8..=9,
        ) {
            let mut keypad = keypad();
            for &d in &integer {
                keypad.append_digit(Digit::new(d).unwrap()).unwrap();
            }
            if fractional {
                keypad.request_fraction_entry();
                for &d in &fraction {
                    keypad.append_digit(Digit::new(d).unwrap()).unwrap();
                }
            }

            let value = keypad.value();
            let fraction_digits = keypad.fraction_digits();

            keypad.append_digit(Digit::new(extra).unwrap()).unwrap();
            keypad.backspace().unwrap();

            prop_assert_eq!(keypad.value(), value);
            prop_assert_eq!(keypad.fraction_digits(), fraction_digits);
        }

        #[test]
        fn value_is_stable_under_rounding(events in prop::collection::vec(key_event(), 0..40)) {
            let mut keypad = keypad();
            for event in events {
                // Capacity rejections leave the entry untouched
                let _ = keypad.apply(event);

                let digits = keypad.fraction_digits() as u32;
                let exact = keypad.decimal_value().unwrap();
                prop_assert_eq!(crate::numeric::round_to(exact, digits), exact);
                prop_assert_eq!(decimal_to_f64(exact).unwrap(), keypad.value());
                prop_assert_eq!(keypad.field().value(), keypad.value());
            }
        }

        #[test]
        fn clear_then_backspaces_stays_zero(count in 0usize..10) {
            let mut keypad = keypad();
            keypad.clear();
            for _ in 0..count {
                prop_assert_eq!(keypad.backspace().unwrap(), 0.0);
            }
            prop_assert_eq!(keypad.fraction_digits(), 0);
        }

        #[test]
        fn toggle_sign_twice_is_identity(events in prop::collection::vec(key_event(), 0..20)) {
            let mut keypad = keypad();
            for event in events {
                let _ = keypad.apply(event);
            }
            let value = keypad.value();
            keypad.toggle_sign().unwrap();
            keypad.toggle_sign().unwrap();
            prop_assert_eq!(keypad.value(), value);
        }
    }
}
