//! Test runner - drive suites and tests, classify outcomes, report verdicts
//!
//! Suites are visited in lexicographic order of their identifiers. For each
//! grouped suite the runner runs every lifecycle record's setup, then the
//! member tests in registration order, then every teardown. A setup failure
//! skips the suite's tests; a suite with tests but no lifecycle records aborts
//! the whole run.

mod hook;
pub mod outcome;
pub mod reporter;

pub use outcome::{Outcome, Tally, Verdict, UNEXPECTED_SIGNAL_REASON};
pub use reporter::{Phase, Reporter};

use hook::QuietPanics;
use reporter::ForceColor;

use crate::error::RunError;
use crate::output;
use crate::record::{RequiredSignal, SuiteRecord, TestRecord};
use crate::registry::{self, Registry};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, IsTerminal, Write};
use std::panic::{self, AssertUnwindSafe};
use tdd_config::{ColorChoice, Config};
use tracing::{debug, trace};

/// Lifecycle state of a suite during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuiteState {
    NotStarted,
    SettingUp,
    SetupFailed,
    Running,
    TornDown,
}

/// A completed test
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestRun {
    pub suite: String,
    pub name: String,
    #[serde(flatten)]
    pub verdict: Verdict,
}

/// A completed suite setup or teardown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifecycleRun {
    pub suite: String,
    pub name: String,
    pub phase: Phase,
    #[serde(flatten)]
    pub verdict: Verdict,
}

/// Everything a finished run produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub tally: Tally,
    pub runs: Vec<TestRun>,
    pub lifecycle: Vec<LifecycleRun>,
    pub suites: BTreeMap<String, SuiteState>,
}

impl RunReport {
    /// Failure count to use as the process exit status
    pub fn exit_code(&self) -> usize {
        self.tally.failed
    }
}

/// Runner settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub color: ColorChoice,
    /// Replace the panic hook with a silent one while the run is in progress
    pub quiet_panics: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            color: ColorChoice::Auto,
            quiet_panics: true,
        }
    }
}

impl RunOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            color: config.color(),
            quiet_panics: config.quiet_panics(),
        }
    }

    pub fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    pub fn with_quiet_panics(mut self, quiet_panics: bool) -> Self {
        self.quiet_panics = quiet_panics;
        self
    }
}

/// Test runner with configuration
#[derive(Debug, Clone, Default)]
pub struct Runner {
    options: RunOptions,
}

impl Runner {
    pub fn new(options: RunOptions) -> Self {
        Self { options }
    }

    /// Run every registered suite, writing the report to `out`.
    ///
    /// `ColorChoice::Auto` never colours an explicit writer.
    pub fn run(&self, registry: &mut Registry, out: &mut dyn Write) -> Result<RunReport, RunError> {
        self.run_into(registry, out, false)
    }

    fn run_into(
        &self,
        registry: &mut Registry,
        out: &mut dyn Write,
        is_stdout: bool,
    ) -> Result<RunReport, RunError> {
        let color = match self.options.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => is_stdout && io::stdout().is_terminal(),
        };
        let _color = color.then(ForceColor::enter);
        let _quiet = self.options.quiet_panics.then(QuietPanics::enter);

        let mut reporter = Reporter::new(out, color);
        run_suites(registry, &mut reporter)
    }
}

fn run_suites(registry: &mut Registry, reporter: &mut Reporter<'_>) -> Result<RunReport, RunError> {
    let mut report = RunReport::default();
    reporter.run_header(registry.suite_count())?;

    for suite_name in registry.suite_ids() {
        reporter.suite_header(&suite_name)?;
        let grouped = !suite_name.is_empty();

        if grouped && !registry.has_suite(&suite_name) {
            reporter.suite_not_found()?;
            report
                .suites
                .insert(suite_name.clone(), SuiteState::NotStarted);
            return Err(RunError::SuiteNotFound {
                suite: suite_name,
                tally: report.tally,
            });
        }

        if grouped {
            enter(&suite_name, SuiteState::SettingUp);
            let records = registry.suites_mut(&suite_name);
            if !run_lifecycle(&suite_name, records, Phase::Setup, reporter, &mut report)? {
                reporter.lifecycle_failed(Phase::Setup)?;
                enter(&suite_name, SuiteState::SetupFailed);
                report.suites.insert(suite_name, SuiteState::SetupFailed);
                continue;
            }
        }

        enter(&suite_name, SuiteState::Running);
        for test in registry.tests_mut(&suite_name) {
            run_test(test, reporter, &mut report)?;
        }

        if grouped {
            let records = registry.suites_mut(&suite_name);
            if !run_lifecycle(&suite_name, records, Phase::Teardown, reporter, &mut report)? {
                reporter.lifecycle_failed(Phase::Teardown)?;
            }
        }
        enter(&suite_name, SuiteState::TornDown);
        report.suites.insert(suite_name, SuiteState::TornDown);
    }

    reporter.summary(&report.tally)?;
    Ok(report)
}

fn enter(suite_name: &str, state: SuiteState) {
    debug!(suite = suite_name, ?state, "suite state");
}

/// Run one test and fold its verdict into the report
fn run_test(
    test: &mut TestRecord,
    reporter: &mut Reporter<'_>,
    report: &mut RunReport,
) -> io::Result<()> {
    reporter.test_header(test.name())?;
    trace!(suite = test.suite_name(), test = test.name(), "running test");

    let body = test.body();
    let outcome = execute(body, test.required_signal());

    let status = test.status_mut();
    status.reset();
    if let Some((reason, line)) = outcome.failure() {
        status.set_failed(reason, line);
    }

    let verdict = Verdict::classify(&outcome, test.expected_failure_reason());
    report.tally.record(&verdict);
    reporter.verdict(&verdict)?;

    report.runs.push(TestRun {
        suite: test.suite_name().to_string(),
        name: test.name().to_string(),
        verdict,
    });
    Ok(())
}

/// Run setup or teardown for every record of a suite.
///
/// Stops at the first failure and returns `false`.
fn run_lifecycle(
    suite_name: &str,
    records: &mut [SuiteRecord],
    phase: Phase,
    reporter: &mut Reporter<'_>,
    report: &mut RunReport,
) -> io::Result<bool> {
    for record in records {
        reporter.lifecycle_header(phase, record.name())?;

        let fixture = record.fixture_mut();
        let outcome = execute(
            || match phase {
                Phase::Setup => fixture.setup(),
                Phase::Teardown => fixture.teardown(),
            },
            None,
        );

        let status = record.status_mut();
        status.reset();
        if let Some((reason, line)) = outcome.failure() {
            status.set_failed(reason, line);
        }

        let verdict = Verdict::classify(&outcome, None);
        report.tally.record(&verdict);
        reporter.verdict(&verdict)?;

        let failed = verdict.is_fail();
        report.lifecycle.push(LifecycleRun {
            suite: suite_name.to_string(),
            name: record.name().to_string(),
            phase,
            verdict,
        });
        if failed {
            return Ok(false);
        }
    }
    Ok(true)
}

/// The capturing boundary: every unwind out of `body` becomes an outcome
fn execute(body: impl FnOnce(), required: Option<&RequiredSignal>) -> Outcome {
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(()) => Outcome::completed(required),
        Err(payload) => Outcome::from_payload(payload.as_ref(), required),
    }
}

/// Run the process-wide registry into the process-wide output sink.
///
/// The registry and sink stay locked until the run ends. A test body that
/// calls [`add_test`](crate::add_test), [`set_output`](crate::set_output) or
/// [`registry::global`] deadlocks.
pub fn run_registered(options: &RunOptions) -> Result<RunReport, RunError> {
    let runner = Runner::new(options.clone());
    let mut registry = registry::global();
    output::with_output(|out, is_stdout| runner.run_into(&mut registry, out, is_stdout))
}

/// Run every registered test with default options.
///
/// Returns the number of failures, suitable as a process exit status.
/// Finish registering before calling this: test bodies must not touch the
/// global registry or output sink (see [`run_registered`]).
pub fn run_tests() -> usize {
    run_tests_with(&RunOptions::default())
}

/// Run every registered test with the given options, returning the failure count
pub fn run_tests_with(options: &RunOptions) -> usize {
    match run_registered(options) {
        Ok(report) => report.exit_code(),
        Err(err) => {
            debug!(error = %err, "run aborted");
            err.exit_code()
        }
    }
}
