//! Test and suite records
//!
//! A record carries a unit's identity (fixed at construction) and its verdict
//! fields (written by the runner while it executes the record).

use crate::fixture::{FnFixture, Fixture};
use std::any::{type_name, Any};
use std::fmt;

/// Verdict fields shared by tests and suite lifecycle records.
///
/// After execution exactly one holds: passed with an empty reason, or failed
/// with a non-empty reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordStatus {
    passed: bool,
    reason: String,
    confirm_line: Option<u32>,
}

impl Default for RecordStatus {
    fn default() -> Self {
        Self {
            passed: true,
            reason: String::new(),
            confirm_line: None,
        }
    }
}

impl RecordStatus {
    pub fn passed(&self) -> bool {
        self.passed
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Line of the failing confirmation, if the failure came from one
    pub fn confirm_line(&self) -> Option<u32> {
        self.confirm_line
    }

    pub(crate) fn set_failed(&mut self, reason: impl Into<String>, confirm_line: Option<u32>) {
        self.passed = false;
        self.reason = reason.into();
        self.confirm_line = confirm_line;
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A signal type a test body must raise in order to pass.
#[derive(Clone)]
pub struct RequiredSignal {
    type_name: String,
    matches: fn(&(dyn Any + Send)) -> bool,
}

impl RequiredSignal {
    pub fn of<T: Any>() -> Self {
        Self::named::<T>(type_name::<T>())
    }

    pub fn named<T: Any>(display_name: impl Into<String>) -> Self {
        fn is<U: Any>(payload: &(dyn Any + Send)) -> bool {
            payload.is::<U>()
        }

        Self {
            type_name: display_name.into(),
            matches: is::<T>,
        }
    }

    /// Name used in the "was not thrown" reason
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Whether a raised payload satisfies this requirement
    pub fn matches(&self, payload: &(dyn Any + Send)) -> bool {
        (self.matches)(payload)
    }
}

impl fmt::Debug for RequiredSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequiredSignal")
            .field("type_name", &self.type_name)
            .finish()
    }
}

type TestBody = Box<dyn Fn() + Send>;

/// A registered test case.
///
/// ```
/// use tdd_runtime::{confirm, TestRecord};
///
/// let record = TestRecord::new("addition", || {
///     confirm!(4, 2 + 2);
/// })
/// .in_suite("Math");
/// assert_eq!(record.suite_name(), "Math");
/// ```
pub struct TestRecord {
    name: String,
    suite_name: String,
    body: TestBody,
    expected_failure_reason: Option<String>,
    required_signal: Option<RequiredSignal>,
    status: RecordStatus,
}

impl TestRecord {
    /// Create an ungrouped test
    pub fn new(name: impl Into<String>, body: impl Fn() + Send + 'static) -> Self {
        Self {
            name: name.into(),
            suite_name: String::new(),
            body: Box::new(body),
            expected_failure_reason: None,
            required_signal: None,
            status: RecordStatus::default(),
        }
    }

    /// Place the test in a suite
    pub fn in_suite(mut self, suite_name: impl Into<String>) -> Self {
        self.suite_name = suite_name.into();
        self
    }

    /// Mark the test as expected to fail with exactly `reason`.
    ///
    /// An empty reason clears the expectation.
    pub fn expect_failure(mut self, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        self.expected_failure_reason = if reason.is_empty() { None } else { Some(reason) };
        self
    }

    /// Require the body to raise a `T` payload
    pub fn require_signal<T: Any>(self) -> Self {
        self.require(RequiredSignal::of::<T>())
    }

    /// Require the body to raise a `T` payload, reporting it as `display_name`
    pub fn require_signal_named<T: Any>(self, display_name: impl Into<String>) -> Self {
        self.require(RequiredSignal::named::<T>(display_name))
    }

    fn require(mut self, required: RequiredSignal) -> Self {
        self.required_signal = Some(required);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Suite identifier; empty for ungrouped tests
    pub fn suite_name(&self) -> &str {
        &self.suite_name
    }

    pub fn expected_failure_reason(&self) -> Option<&str> {
        self.expected_failure_reason.as_deref()
    }

    pub fn required_signal(&self) -> Option<&RequiredSignal> {
        self.required_signal.as_ref()
    }

    pub fn status(&self) -> &RecordStatus {
        &self.status
    }

    pub(crate) fn status_mut(&mut self) -> &mut RecordStatus {
        &mut self.status
    }

    pub(crate) fn body(&self) -> &(dyn Fn() + Send) {
        self.body.as_ref()
    }
}

impl fmt::Debug for TestRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestRecord")
            .field("name", &self.name)
            .field("suite_name", &self.suite_name)
            .field("expected_failure_reason", &self.expected_failure_reason)
            .field("required_signal", &self.required_signal)
            .field("status", &self.status)
            .finish()
    }
}

/// A suite lifecycle record: setup/teardown shared by a suite's tests.
pub struct SuiteRecord {
    name: String,
    suite_name: String,
    fixture: Box<dyn Fixture>,
    status: RecordStatus,
}

impl SuiteRecord {
    pub fn new(
        name: impl Into<String>,
        suite_name: impl Into<String>,
        fixture: impl Fixture + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            suite_name: suite_name.into(),
            fixture: Box::new(fixture),
            status: RecordStatus::default(),
        }
    }

    /// Build a suite record from setup and teardown closures
    pub fn from_fns(
        name: impl Into<String>,
        suite_name: impl Into<String>,
        setup: impl FnMut() + Send + 'static,
        teardown: impl FnMut() + Send + 'static,
    ) -> Self {
        Self::new(name, suite_name, FnFixture::new(setup, teardown))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn suite_name(&self) -> &str {
        &self.suite_name
    }

    pub fn status(&self) -> &RecordStatus {
        &self.status
    }

    pub(crate) fn status_mut(&mut self) -> &mut RecordStatus {
        &mut self.status
    }

    pub(crate) fn fixture_mut(&mut self) -> &mut dyn Fixture {
        self.fixture.as_mut()
    }
}

impl fmt::Debug for SuiteRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuiteRecord")
            .field("name", &self.name)
            .field("suite_name", &self.suite_name)
            .field("status", &self.status)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::catch_unwind;

    #[test]
    fn test_new_record_is_ungrouped_and_passing() {
        let record = TestRecord::new("fresh", || {});
        assert_eq!(record.name(), "fresh");
        assert_eq!(record.suite_name(), "");
        assert!(record.status().passed());
        assert_eq!(record.status().reason(), "");
        assert_eq!(record.status().confirm_line(), None);
    }

    #[test]
    fn test_empty_expected_reason_is_no_expectation() {
        let record = TestRecord::new("t", || {}).expect_failure("");
        assert_eq!(record.expected_failure_reason(), None);

        let record = TestRecord::new("t", || {}).expect_failure("Expected: true");
        assert_eq!(record.expected_failure_reason(), Some("Expected: true"));
    }

    #[test]
    fn test_required_signal_matches_by_type() {
        let required = RequiredSignal::of::<i32>();
        assert_eq!(required.type_name(), "i32");

        let payload = catch_unwind(|| std::panic::panic_any(5_i32)).unwrap_err();
        assert!(required.matches(payload.as_ref()));

        let payload = catch_unwind(|| std::panic::panic_any(5_u32)).unwrap_err();
        assert!(!required.matches(payload.as_ref()));
    }

    #[test]
    fn test_required_signal_display_name() {
        let record = TestRecord::new("t", || {}).require_signal_named::<i32>("int");
        assert_eq!(record.required_signal().unwrap().type_name(), "int");
    }

    #[test]
    fn test_status_reset() {
        let mut status = RecordStatus::default();
        status.set_failed("Expected: false", Some(8));
        assert!(!status.passed());
        assert_eq!(status.confirm_line(), Some(8));

        status.reset();
        assert_eq!(status, RecordStatus::default());
    }
}
