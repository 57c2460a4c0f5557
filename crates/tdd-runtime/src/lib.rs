//! TDD Runtime
//!
//! Execution and verdict engine for a small unit-testing framework. Test
//! authors build [`TestRecord`]s and [`SuiteRecord`]s, register them, and call
//! [`run_tests`] once. The runner prints a pass/fail report and returns the
//! number of failures.
//!
//! Confirmations signal failure by unwinding with a [`Signal`]; the runner
//! catches every unwind at the boundary of a single test or suite operation
//! and turns it into a [`Verdict`].
//!
//! # Example
//!
//! ```
//! use tdd_runtime::{confirm, confirm_true, Registry, RunOptions, Runner, SuiteRecord, TestRecord};
//! use tdd_runtime::tdd_config::ColorChoice;
//!
//! let mut registry = Registry::new();
//! registry.add_suite(SuiteRecord::from_fns("connection", "Db", || {}, || {}));
//! registry.add_test(TestRecord::new("insert", || confirm!(1, 1)).in_suite("Db"));
//! registry.add_test(TestRecord::new("is negative", || confirm_true!(-1 < 0)));
//!
//! let mut out = Vec::new();
//! let options = RunOptions::default().with_color(ColorChoice::Never);
//! let report = Runner::new(options).run(&mut registry, &mut out).unwrap();
//! assert_eq!(report.tally.failed, 0);
//! ```

pub mod confirm;
pub mod error;
pub mod fixture;
mod macros;
pub mod output;
pub mod record;
pub mod registry;
pub mod runner;
pub mod signal;

pub use confirm::{
    confirm_bool, confirm_eq, confirm_f32, confirm_f64, confirm_text, within_tolerance,
    Confirmable, F32_TOLERANCE, F64_TOLERANCE,
};
pub use error::RunError;
pub use fixture::{FnFixture, Fixture, SetupAndTeardown};
pub use output::{reset_output, set_output, SharedBuffer};
pub use record::{RecordStatus, RequiredSignal, SuiteRecord, TestRecord};
pub use registry::{add_suite, add_test, Registry};
pub use runner::{
    run_registered, run_tests, run_tests_with, LifecycleRun, Outcome, Phase, RunOptions,
    RunReport, Runner, SuiteState, Tally, TestRun, Verdict,
};
pub use signal::{raise, Signal};

pub use tdd_config;
