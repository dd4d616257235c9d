// ============================================================================
// Domain Models Module
// Contains the keypad entry value objects and configuration
// ============================================================================

pub mod config;
pub mod entry;
pub mod key;

pub use config::{KeypadConfig, DEFAULT_SEPARATOR};
pub use entry::EntryBuffer;
pub use key::{Digit, KeyEvent, Sign};

// Re-export state machine
pub use entry::state::{EntryMode, EntryTransition};
