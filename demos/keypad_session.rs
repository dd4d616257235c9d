// ============================================================================
// Keypad Session Example
// ============================================================================

use keypad_entry::prelude::*;
use keypad_entry::storage::{estimate_space, DataLoggerConfig, LoggedDataType, LoggedVariable};
use std::sync::Arc;

fn main() {
    #[cfg(feature = "logging")]
    keypad_entry::init_logging();

    println!("=== Keypad Session Example ===\n");

    // The display keeps its own handle to the field
    let field = SharedField::new(0.0);
    let display = field.clone();

    let mut keypad = KeypadControllerBuilder::new()
        .comma_decimal()
        .with_max_fraction_digits(2)
        .build(field, Arc::new(LoggingEventHandler))
        .expect("valid keypad configuration");

    for token in ["1", "2", ",", "5", "", "", "+/-", "7", "C", "9"] {
        let label = if token.is_empty() { "<BS>" } else { token };
        match keypad.apply_token(token) {
            Ok(_) => println!(
                "{:>5} -> {:>8}  (field = {}, fraction digits = {})",
                label,
                keypad.display_text(),
                display.get(),
                keypad.fraction_digits()
            ),
            Err(error) => println!("{:>5} -> rejected: {}", label, error),
        }
    }

    println!("\n=== Data Logger Footprint ===\n");

    let logger = DataLoggerConfig {
        variables: vec![
            LoggedVariable::new("Setpoint", LoggedDataType::Double),
            LoggedVariable::new("Running", LoggedDataType::Boolean),
            LoggedVariable::linked("Pressure", LoggedDataType::Float),
            LoggedVariable::new("Operator", LoggedDataType::Other("String".to_string())),
        ],
        sampling_period_ms: 1000,
        log_local_time: true,
    };

    match estimate_space(&logger) {
        Ok(estimate) => {
            println!("{}", estimate);
            if !estimate.is_complete() {
                println!("Not accounted for: {}", estimate.skipped.join(", "));
            }
        },
        Err(error) => println!("Cannot estimate: {}", error),
    }
}
