//! Raw outcomes, verdicts, and counters

use crate::record::RequiredSignal;
use crate::signal::{payload_message, Signal};
use serde::Serialize;
use std::any::Any;
use tracing::debug;

/// Reason recorded when a body raises something outside the taxonomy
pub const UNEXPECTED_SIGNAL_REASON: &str = "Unexpected exception thrown.";

/// What happened when a single test or lifecycle operation executed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Completed normally, or raised the required signal
    Pass,
    /// A confirmation failed
    ConfirmFailure { reason: String, line: Option<u32> },
    /// A required signal type was never raised
    MissingSignal { type_name: String },
    /// Anything else unwound out of the body
    UnexpectedSignal,
}

impl Outcome {
    /// Classify a body that returned without unwinding
    pub fn completed(required: Option<&RequiredSignal>) -> Self {
        match required {
            Some(required) => Outcome::MissingSignal {
                type_name: required.type_name().to_string(),
            },
            None => Outcome::Pass,
        }
    }

    /// Classify a panic payload caught at the runner's boundary
    pub fn from_payload(payload: &(dyn Any + Send), required: Option<&RequiredSignal>) -> Self {
        if required.is_some_and(|r| r.matches(payload)) {
            return Outcome::Pass;
        }

        match payload.downcast_ref::<Signal>() {
            Some(Signal::MissingExpectedSignal { type_name }) => Outcome::MissingSignal {
                type_name: type_name.clone(),
            },
            Some(signal) => Outcome::ConfirmFailure {
                reason: signal.reason(),
                line: signal.line(),
            },
            None => {
                debug!(message = %payload_message(payload), "unexpected signal");
                Outcome::UnexpectedSignal
            }
        }
    }

    /// Failure reason and confirmation line, or `None` for a pass
    pub fn failure(&self) -> Option<(String, Option<u32>)> {
        match self {
            Outcome::Pass => None,
            Outcome::ConfirmFailure { reason, line } => Some((reason.clone(), *line)),
            Outcome::MissingSignal { type_name } => Some((
                Signal::MissingExpectedSignal {
                    type_name: type_name.clone(),
                }
                .reason(),
                None,
            )),
            Outcome::UnexpectedSignal => Some((UNEXPECTED_SIGNAL_REASON.to_string(), None)),
        }
    }
}

/// Final classification of a test or lifecycle operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    Pass,
    /// Failed with exactly the reason it was expected to fail with
    ExpectedFailure { reason: String },
    /// Expected to fail but passed
    MissedExpectedFailure,
    Failure { reason: String, line: Option<u32> },
}

impl Verdict {
    /// Reclassify a raw outcome against an expected failure reason.
    ///
    /// A raw pass with an expectation is a missed expected failure. A raw
    /// failure only becomes an expected failure when the reasons are equal.
    pub fn classify(outcome: &Outcome, expected_failure_reason: Option<&str>) -> Self {
        match (outcome.failure(), expected_failure_reason) {
            (None, Some(_)) => Verdict::MissedExpectedFailure,
            (None, None) => Verdict::Pass,
            (Some((reason, _)), Some(expected)) if reason == expected => {
                Verdict::ExpectedFailure { reason }
            }
            (Some((reason, line)), _) => Verdict::Failure { reason, line },
        }
    }

    /// Counts as passed in the summary
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass | Verdict::ExpectedFailure { .. })
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Verdict::Failure { .. })
    }
}

/// Running counters folded from verdicts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub passed: usize,
    pub failed: usize,
    pub missed_failures: usize,
}

impl Tally {
    pub fn record(&mut self, verdict: &Verdict) {
        match verdict {
            Verdict::Pass | Verdict::ExpectedFailure { .. } => self.passed += 1,
            Verdict::MissedExpectedFailure => self.missed_failures += 1,
            Verdict::Failure { .. } => self.failed += 1,
        }
    }
}
