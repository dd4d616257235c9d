// ============================================================================
// Numeric Field Interface
// Defines the contract for the display/edit widget a keypad writes into
// ============================================================================

use parking_lot::RwLock;
use std::sync::Arc;

/// A numeric display/edit element bound to a keypad controller.
///
/// The field only holds the current value. Entry history (typed digits,
/// fractional digit count) lives in the controller.
pub trait NumericField {
    /// Current value shown by the field
    fn value(&self) -> f64;

    /// Replace the value shown by the field
    fn set_value(&mut self, value: f64);
}

/// Plain in-memory spin box
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpinBox {
    value: f64,
}

impl SpinBox {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl NumericField for SpinBox {
    fn value(&self) -> f64 {
        self.value
    }

    fn set_value(&mut self, value: f64) {
        self.value = value;
    }
}

/// Field whose value can be observed through cloned handles.
///
/// A rendering layer keeps a clone and reads it on refresh while the
/// controller writes through its own handle.
#[derive(Debug, Clone, Default)]
pub struct SharedField {
    value: Arc<RwLock<f64>>,
}

impl SharedField {
    pub fn new(value: f64) -> Self {
        Self {
            value: Arc::new(RwLock::new(value)),
        }
    }

    /// Read the value without going through the trait
    pub fn get(&self) -> f64 {
        *self.value.read()
    }

    /// Overwrite the value from outside the keypad (e.g. a recipe load)
    pub fn set(&self, value: f64) {
        *self.value.write() = value;
    }
}

impl NumericField for SharedField {
    fn value(&self) -> f64 {
        self.get()
    }

    fn set_value(&mut self, value: f64) {
        self.set(value);
    }
}

impl<F: NumericField + ?Sized> NumericField for &mut F {
    fn value(&self) -> f64 {
        (**self).value()
    }

    fn set_value(&mut self, value: f64) {
        (**self).set_value(value);
    }
}
