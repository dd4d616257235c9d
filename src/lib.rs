// ============================================================================
// Keypad Entry Library
// Numeric keypad state machine and data-logger storage utilities for panels
// ============================================================================

//! # Keypad Entry
//!
//! Numeric keypad input for control-panel spin boxes, plus the storage
//! utilities that sit next to it on a data-logging panel.
//!
//! ## Features
//!
//! - **Owned entry buffer**: typed digits, sign and fractional digit count live
//!   in the controller, the bound field only sees the derived value
//! - **Exact values** via `rust_decimal`; `f64` only at the field boundary
//! - **Bounded input**: integer and fractional digit capacity per keypad
//! - **Observable edits** through a pluggable event handler
//! - **Storage queries**: data-logger footprint estimation and embedded
//!   database path, size and in-use checks
//!
//! ## Example
//!
//! ```rust
//! use keypad_entry::prelude::*;
//! use std::sync::Arc;
//!
//! let mut keypad = KeypadController::new(
//!     SpinBox::default(),
//!     KeypadConfig::comma_decimal(),
//!     Arc::new(NoOpEventHandler),
//! );
//!
//! keypad.append_digit(Digit::new(1).unwrap()).unwrap();
//! keypad.append_digit(Digit::new(2).unwrap()).unwrap();
//! keypad.request_fraction_entry();
//! keypad.append_digit(Digit::new(5).unwrap()).unwrap();
//!
//! assert_eq!(keypad.value(), 12.5);
//! assert_eq!(keypad.display_text(), "12,5");
//!
//! keypad.backspace().unwrap();
//! assert_eq!(keypad.value(), 12.0);
//! assert_eq!(keypad.fraction_digits(), 0);
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;
pub mod storage;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        Digit, EntryBuffer, EntryMode, EntryTransition, KeyEvent, KeypadConfig, Sign,
    };
    pub use crate::engine::{create_from_config, KeypadController, KeypadControllerBuilder};
    pub use crate::interfaces::{
        KeypadEvent, KeypadEventHandler, LoggingEventHandler, NoOpEventHandler, NumericField,
        RecordingEventHandler, SharedField, SpinBox,
    };
    pub use crate::numeric::{EntryError, EntryResult};
}

/// Install a `tracing` subscriber that honours `RUST_LOG`.
///
/// Intended for binaries and demos; libraries embedding the keypad should
/// install their own subscriber. Calling it twice is harmless.
#[cfg(feature = "logging")]
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}
