// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod event_handler;
mod numeric_field;

pub use event_handler::{
    KeypadEvent, KeypadEventHandler, LoggingEventHandler, NoOpEventHandler, RecordingEventHandler,
};
pub use numeric_field::{NumericField, SharedField, SpinBox};
