// ============================================================================
// Event Handler Interface
// Defines the contract for observing keypad edits
// ============================================================================

use crate::domain::{Digit, EntryMode};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Events emitted by the keypad controller
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum KeypadEvent {
    /// Digit appended to the integer or fractional part
    DigitAppended {
        digit: Digit,
        value: f64,
        timestamp: DateTime<Utc>,
    },

    /// Last digit removed by backspace
    DigitRemoved {
        digit: Digit,
        value: f64,
        timestamp: DateTime<Utc>,
    },

    /// Next digit will start the fractional part
    FractionEntryRequested { timestamp: DateTime<Utc> },

    /// Pending fraction request withdrawn by backspace
    FractionEntryCancelled { timestamp: DateTime<Utc> },

    /// Entry switched between integer and fraction entry
    ModeChanged {
        from: EntryMode,
        to: EntryMode,
        timestamp: DateTime<Utc>,
    },

    /// Sign flipped
    SignToggled {
        value: f64,
        timestamp: DateTime<Utc>,
    },

    /// Entry reset to zero
    Cleared { timestamp: DateTime<Utc> },

    /// Entry rebuilt from a value written to the field by other code
    FieldResynced {
        value: f64,
        fraction_digits: usize,
        timestamp: DateTime<Utc>,
    },

    /// Key press rejected, entry unchanged
    InputRejected {
        reason: String,
        timestamp: DateTime<Utc>,
    },
}

/// Event handler trait for observing keypad edits
/// Implementations can handle logging, audit trails, UI feedback, etc.
pub trait KeypadEventHandler: Send + Sync {
    /// Handle a keypad event
    fn on_event(&self, event: KeypadEvent);

    /// Batch event handler
    fn on_events(&self, events: Vec<KeypadEvent>) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// No-op event handler
pub struct NoOpEventHandler;

impl KeypadEventHandler for NoOpEventHandler {
    fn on_event(&self, _event: KeypadEvent) {}
}

/// Logging event handler
pub struct LoggingEventHandler;

impl KeypadEventHandler for LoggingEventHandler {
    fn on_event(&self, event: KeypadEvent) {
        match &event {
            KeypadEvent::InputRejected { reason, .. } => {
                tracing::warn!(%reason, "Keypad input rejected");
            },
            _ => tracing::debug!("Keypad event: {:?}", event),
        }
    }
}

/// Event handler that keeps every event, for diagnostics and tests
#[derive(Default)]
pub struct RecordingEventHandler {
    events: Mutex<Vec<KeypadEvent>>,
}

impl RecordingEventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events seen so far
    pub fn events(&self) -> Vec<KeypadEvent> {
        self.events.lock().clone()
    }

    /// Remove and return the events seen so far
    pub fn drain(&self) -> Vec<KeypadEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl KeypadEventHandler for RecordingEventHandler {
    fn on_event(&self, event: KeypadEvent) {
        self.events.lock().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_handler() {
        let handler = NoOpEventHandler;
        handler.on_event(KeypadEvent::Cleared {
            timestamp: Utc::now(),
        });
        // Should not panic
    }

    #[test]
    fn test_recording_handler() {
        let handler = RecordingEventHandler::new();
        assert!(handler.is_empty());

        handler.on_events(vec![
            KeypadEvent::Cleared {
                timestamp: Utc::now(),
            },
            KeypadEvent::FractionEntryRequested {
                timestamp: Utc::now(),
            },
        ]);

        assert_eq!(handler.len(), 2);
        let drained = handler.drain();
        assert!(matches!(drained[0], KeypadEvent::Cleared { .. }));
        assert!(handler.is_empty());
    }
}
