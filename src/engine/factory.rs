// ============================================================================
// Keypad Factory
// Creates keypad controllers with validated configuration
// ============================================================================

use crate::domain::KeypadConfig;
use crate::engine::KeypadController;
use crate::interfaces::{KeypadEventHandler, NumericField};
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates a keypad controller bound to `field` from configuration
///
/// # Arguments
/// * `field` - Field the controller writes into (cleared on binding)
/// * `config` - Keypad configuration
/// * `event_handler` - Event handler for keypad events
///
/// # Returns
/// * `Result<KeypadController<F>, String>` - Bound controller or validation error
///
/// # Example
/// ```
/// use keypad_entry::prelude::*;
/// use std::sync::Arc;
///
/// let keypad = create_from_config(
///     SpinBox::default(),
///     KeypadConfig::point_decimal(),
///     Arc::new(NoOpEventHandler),
/// )
/// .unwrap();
/// assert_eq!(keypad.value(), 0.0);
/// ```
pub fn create_from_config<F: NumericField>(
    field: F,
    config: KeypadConfig,
    event_handler: Arc<dyn KeypadEventHandler>,
) -> Result<KeypadController<F>, String> {
    config.validate()?;

    Ok(KeypadController::new(field, config, event_handler))
}

// ============================================================================
// Builder Pattern
// ============================================================================

/// Builder for creating keypad controllers with fluent API
///
/// # Example
/// ```
/// use keypad_entry::prelude::*;
/// use std::sync::Arc;
///
/// let mut keypad = KeypadControllerBuilder::new()
///     .point_decimal()
///     .with_max_fraction_digits(2)
///     .build(SpinBox::default(), Arc::new(NoOpEventHandler))
///     .unwrap();
///
/// keypad.apply_token("4").unwrap();
/// keypad.apply_token(".").unwrap();
/// keypad.apply_token("2").unwrap();
/// assert_eq!(keypad.value(), 4.2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct KeypadControllerBuilder {
    config: KeypadConfig,
}

impl KeypadControllerBuilder {
    /// Create a new builder with the comma-decimal defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn from_config(config: KeypadConfig) -> Self {
        Self { config }
    }

    // ========================================================================
    // Separator Configuration
    // ========================================================================

    /// Use `,` as decimal separator (default)
    pub fn comma_decimal(mut self) -> Self {
        self.config.separator = ',';
        self
    }

    /// Use `.` as decimal separator
    pub fn point_decimal(mut self) -> Self {
        self.config.separator = '.';
        self
    }

    /// Use a custom decimal separator
    pub fn with_separator(mut self, separator: char) -> Self {
        self.config.separator = separator;
        self
    }

    // ========================================================================
    // Capacity Configuration
    // ========================================================================

    /// Set the integer digit capacity
    pub fn with_max_integer_digits(mut self, digits: usize) -> Self {
        self.config.max_integer_digits = digits;
        self
    }

    /// Set the fractional digit capacity
    pub fn with_max_fraction_digits(mut self, digits: usize) -> Self {
        self.config.max_fraction_digits = digits;
        self
    }

    /// Accept whole numbers only
    pub fn integer_only(mut self) -> Self {
        self.config.max_fraction_digits = 0;
        self
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the controller and bind it to `field`
    pub fn build<F: NumericField>(
        self,
        field: F,
        event_handler: Arc<dyn KeypadEventHandler>,
    ) -> Result<KeypadController<F>, String> {
        create_from_config(field, self.config, event_handler)
    }

    /// Get the configuration without building (for inspection)
    pub fn get_config(&self) -> &KeypadConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::{NoOpEventHandler, SpinBox};

    #[test]
    fn test_create_from_config() {
        let keypad = create_from_config(
            SpinBox::new(12.0),
            KeypadConfig::comma_decimal(),
            Arc::new(NoOpEventHandler),
        )
        .unwrap();
        assert_eq!(keypad.field().value(), 0.0);
        assert_eq!(keypad.config().separator, ',');
    }

    #[test]
    fn test_create_rejects_invalid_config() {
        let result = create_from_config(
            SpinBox::default(),
            KeypadConfig::default().with_separator('7'),
            Arc::new(NoOpEventHandler),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_pattern() {
        let keypad = KeypadControllerBuilder::new()
            .point_decimal()
            .with_max_integer_digits(6)
            .with_max_fraction_digits(4)
            .build(SpinBox::default(), Arc::new(NoOpEventHandler))
            .unwrap();

        assert_eq!(keypad.config().separator, '.');
        assert_eq!(keypad.config().max_integer_digits, 6);
        assert_eq!(keypad.config().max_fraction_digits, 4);
    }

    #[test]
    fn test_builder_integer_only() {
        let builder = KeypadControllerBuilder::new().integer_only();
        assert!(!builder.get_config().allows_fraction());

        let mut keypad = builder
            .build(SpinBox::default(), Arc::new(NoOpEventHandler))
            .unwrap();
        keypad.apply_token(",").unwrap();
        keypad.apply_token("3").unwrap();
        assert_eq!(keypad.value(), 3.0);
    }

    #[test]
    fn test_builder_rejects_excess_capacity() {
        let result = KeypadControllerBuilder::new()
            .with_max_integer_digits(15)
            .with_max_fraction_digits(3)
            .build(SpinBox::default(), Arc::new(NoOpEventHandler));
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_from_config() {
        let builder = KeypadControllerBuilder::from_config(KeypadConfig::point_decimal());
        assert_eq!(builder.get_config(), &KeypadConfig::point_decimal());
    }
}
