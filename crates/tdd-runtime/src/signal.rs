//! Confirmation signals
//!
//! A signal is the panic payload a failing confirmation unwinds with. The set
//! is closed: anything else a test body panics with is an unexpected signal,
//! unless the test declared it as its required signal type.

use std::any::Any;
use thiserror::Error;

/// A confirmation signal raised while a test or suite operation runs.
///
/// The `Display` form is the failure reason shown in the report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// A boolean confirmation did not hold
    #[error("Expected: {expected}")]
    BooleanMismatch { expected: bool, line: u32 },

    /// Two rendered values differed
    #[error("Expected: {expected}\nActual: {actual}")]
    ValueMismatch {
        expected: String,
        actual: String,
        line: u32,
    },

    /// The test required a signal type that was never raised
    #[error("Expected exception type {type_name} was not thrown.")]
    MissingExpectedSignal { type_name: String },
}

impl Signal {
    /// Source line of the failing confirmation, if this signal carries one
    pub fn line(&self) -> Option<u32> {
        match self {
            Signal::BooleanMismatch { line, .. } | Signal::ValueMismatch { line, .. } => {
                Some(*line)
            }
            Signal::MissingExpectedSignal { .. } => None,
        }
    }

    /// Failure reason rendered for the report
    pub fn reason(&self) -> String {
        self.to_string()
    }

    /// Unwind with this signal as the panic payload
    pub fn raise(self) -> ! {
        std::panic::panic_any(self)
    }
}

/// Raise an arbitrary typed signal from a test body.
///
/// Tests that declare a required signal type pass when the body raises a
/// value of that type:
///
/// ```
/// use tdd_runtime::{raise, TestRecord};
///
/// let record = TestRecord::new("empty name is rejected", || raise(1_i32))
///     .require_signal::<i32>();
/// # let _ = record;
/// ```
pub fn raise<T: Any + Send + 'static>(payload: T) -> ! {
    std::panic::panic_any(payload)
}

/// Best-effort text of a panic payload, for diagnostics only
pub(crate) fn payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(signal) = payload.downcast_ref::<Signal>() {
        signal.reason()
    } else {
        "non-text panic payload".to_string()
    }
}
