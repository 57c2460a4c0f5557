//! Shared helpers for runtime integration tests

#![allow(dead_code)]

use std::panic::{catch_unwind, UnwindSafe};
use tdd_runtime::tdd_config::ColorChoice;
use tdd_runtime::{Registry, RunError, RunOptions, RunReport, Runner, Signal};

pub fn is_negative(value: i32) -> bool {
    value < 0
}

pub fn multiply_by_2(value: i32) -> i32 {
    value * 2
}

/// Run a registry with plain output, returning the report text and result
pub fn run_plain(registry: &mut Registry) -> (String, Result<RunReport, RunError>) {
    let mut out = Vec::new();
    let options = RunOptions::default().with_color(ColorChoice::Never);
    let result = Runner::new(options).run(registry, &mut out);
    (String::from_utf8(out).unwrap(), result)
}

/// The signal a closure raised, if any
pub fn signal_of(f: impl FnOnce() + UnwindSafe) -> Option<Signal> {
    catch_unwind(f)
        .err()
        .map(|payload| *payload.downcast::<Signal>().expect("payload is not a Signal"))
}
