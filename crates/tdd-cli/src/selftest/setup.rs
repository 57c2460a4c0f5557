//! Setup and teardown self tests

use std::sync::atomic::{AtomicI32, Ordering};
use tdd_runtime::{
    add_suite, add_test, confirm, raise, Fixture, SetupAndTeardown, SuiteRecord, TestRecord,
};

const NO_ENTRY: i32 = -1;

/// Entry created by the "Database" suite setup
static SUITE_ENTRY: AtomicI32 = AtomicI32::new(NO_ENTRY);

fn create_test_entry() -> i32 {
    // Stands in for inserting a row and returning its id
    100
}

fn update_test_entry_name(_id: i32, name: &str) {
    if name.is_empty() {
        raise(1_i32);
    }
}

fn delete_test_entry(_id: i32) {}

/// A temporary entry scoped to one test
#[derive(Default)]
struct TempEntry {
    id: i32,
}

impl TempEntry {
    fn id(&self) -> i32 {
        self.id
    }
}

impl Fixture for TempEntry {
    fn setup(&mut self) {
        self.id = create_test_entry();
    }

    fn teardown(&mut self) {
        delete_test_entry(self.id);
    }
}

pub(super) fn register() {
    add_test(
        TestRecord::new("Test will run setup and teardown code", || {
            let entry = SetupAndTeardown::<TempEntry>::new();
            update_test_entry_name(entry.id(), "");
        })
        .require_signal_named::<i32>("int"),
    );

    add_suite(SuiteRecord::from_fns(
        "Temporary entry",
        "Database",
        || SUITE_ENTRY.store(create_test_entry(), Ordering::SeqCst),
        || {
            delete_test_entry(SUITE_ENTRY.load(Ordering::SeqCst));
            SUITE_ENTRY.store(NO_ENTRY, Ordering::SeqCst);
        },
    ));

    add_test(
        TestRecord::new("Entry can be renamed", || {
            let id = SUITE_ENTRY.load(Ordering::SeqCst);
            confirm!(100, id);
            update_test_entry_name(id, "renamed");
        })
        .in_suite("Database"),
    );

    add_test(
        TestRecord::new("Empty entry name is rejected", || {
            update_test_entry_name(SUITE_ENTRY.load(Ordering::SeqCst), "");
        })
        .in_suite("Database")
        .require_signal_named::<i32>("int"),
    );
}
