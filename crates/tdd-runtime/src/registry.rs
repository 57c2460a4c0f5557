//! Registry of tests and suite lifecycle records
//!
//! Tests are grouped by suite identifier. Identifiers are kept in a
//! `BTreeMap`, so the runner visits suites in lexicographic order no matter
//! which order they were declared in. Within a suite, tests keep their
//! registration order. Ungrouped tests live under the empty identifier and
//! therefore always come first.

use crate::record::{SuiteRecord, TestRecord};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use tracing::debug;

/// Tests and suite lifecycle records keyed by suite identifier
#[derive(Debug, Default)]
pub struct Registry {
    tests: BTreeMap<String, Vec<TestRecord>>,
    suites: BTreeMap<String, Vec<SuiteRecord>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a test under its suite identifier
    pub fn add_test(&mut self, record: TestRecord) {
        debug!(
            suite = record.suite_name(),
            test = record.name(),
            "registering test"
        );
        self.tests
            .entry(record.suite_name().to_string())
            .or_default()
            .push(record);
    }

    /// Register a suite lifecycle record under its suite identifier
    pub fn add_suite(&mut self, record: SuiteRecord) {
        debug!(
            suite = record.suite_name(),
            record = record.name(),
            "registering suite"
        );
        self.suites
            .entry(record.suite_name().to_string())
            .or_default()
            .push(record);
    }

    /// Suite identifiers with their tests, in lexicographic order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TestRecord])> {
        self.tests
            .iter()
            .map(|(suite, tests)| (suite.as_str(), tests.as_slice()))
    }

    /// Lifecycle records registered for a suite, in registration order
    pub fn suites(&self, suite_name: &str) -> Option<&[SuiteRecord]> {
        self.suites.get(suite_name).map(Vec::as_slice)
    }

    pub fn has_suite(&self, suite_name: &str) -> bool {
        self.suites.contains_key(suite_name)
    }

    /// Number of suite identifiers the runner will visit
    pub fn suite_count(&self) -> usize {
        self.tests.len()
    }

    pub fn test_count(&self) -> usize {
        self.tests.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    pub(crate) fn suite_ids(&self) -> Vec<String> {
        self.tests.keys().cloned().collect()
    }

    pub(crate) fn tests_mut(&mut self, suite_name: &str) -> &mut [TestRecord] {
        self.tests
            .get_mut(suite_name)
            .map(Vec::as_mut_slice)
            .unwrap_or_default()
    }

    pub(crate) fn suites_mut(&mut self, suite_name: &str) -> &mut [SuiteRecord] {
        self.suites
            .get_mut(suite_name)
            .map(Vec::as_mut_slice)
            .unwrap_or_default()
    }
}

static GLOBAL: OnceLock<Mutex<Registry>> = OnceLock::new();

/// The process-wide registry, created on first access.
///
/// Registration must finish before [`run_tests`](crate::run_tests) is called;
/// the runner holds this lock for the whole run.
pub fn global() -> MutexGuard<'static, Registry> {
    GLOBAL
        .get_or_init(|| Mutex::new(Registry::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Register a test in the process-wide registry
pub fn add_test(record: TestRecord) {
    global().add_test(record);
}

/// Register a suite lifecycle record in the process-wide registry
pub fn add_suite(record: SuiteRecord) {
    global().add_suite(record);
}
