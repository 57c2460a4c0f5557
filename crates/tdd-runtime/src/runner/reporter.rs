//! Reporter - line-oriented status text for a run

use super::outcome::{Tally, Verdict};
use colored::{Color, Colorize};
use serde::Serialize;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// Which lifecycle operation of a suite is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Setup,
    Teardown,
}

/// Number of live [`ForceColor`] guards
static FORCED_COLOR: Mutex<usize> = Mutex::new(0);

/// Forces `colored` output on while at least one guard is alive.
///
/// The `colored` override is process-wide, so overlapping coloured runs share
/// it and the last guard to drop clears it.
pub(crate) struct ForceColor(());

impl ForceColor {
    pub(crate) fn enter() -> Self {
        let mut live = FORCED_COLOR.lock().unwrap_or_else(PoisonError::into_inner);
        if *live == 0 {
            colored::control::set_override(true);
        }
        *live += 1;
        Self(())
    }
}

impl Drop for ForceColor {
    fn drop(&mut self) {
        let mut live = FORCED_COLOR.lock().unwrap_or_else(PoisonError::into_inner);
        *live = live.saturating_sub(1);
        if *live == 0 {
            colored::control::unset_override();
        }
    }
}

/// Writes the report to a sink
pub struct Reporter<'a> {
    out: &'a mut dyn Write,
    /// Colour verdict keywords
    color: bool,
}

impl<'a> Reporter<'a> {
    pub fn new(out: &'a mut dyn Write, color: bool) -> Self {
        Self { out, color }
    }

    pub fn run_header(&mut self, suite_count: usize) -> io::Result<()> {
        writeln!(self.out, "Running {} test suites", suite_count)
    }

    pub fn suite_header(&mut self, suite_name: &str) -> io::Result<()> {
        let display_name = if suite_name.is_empty() {
            "Single Tests"
        } else {
            suite_name
        };
        writeln!(self.out, "------------------ Suite: {}", display_name)
    }

    pub fn test_header(&mut self, test_name: &str) -> io::Result<()> {
        writeln!(self.out, "------------ Test: {}", test_name)
    }

    pub fn lifecycle_header(&mut self, phase: Phase, record_name: &str) -> io::Result<()> {
        let label = match phase {
            Phase::Setup => "Setup",
            Phase::Teardown => "Teardown",
        };
        writeln!(self.out, "------------ {}: {}", label, record_name)
    }

    pub fn verdict(&mut self, verdict: &Verdict) -> io::Result<()> {
        match verdict {
            Verdict::Pass => {
                let word = self.paint("Passed", Color::Green);
                writeln!(self.out, "{}", word)
            }
            Verdict::ExpectedFailure { reason } => {
                let word = self.paint("Expected failure", Color::Yellow);
                writeln!(self.out, "{}\n{}", word, reason)
            }
            Verdict::MissedExpectedFailure => {
                let word = self.paint("Missed expected failure", Color::Yellow);
                writeln!(self.out, "{}\nTest passed but was expected to fail.", word)
            }
            Verdict::Failure {
                reason,
                line: Some(line),
            } => {
                let word = self.paint(&format!("Failed confirm on line {}", line), Color::Red);
                writeln!(self.out, "{}\n{}", word, reason)
            }
            Verdict::Failure { reason, line: None } => {
                let word = self.paint("Failed", Color::Red);
                writeln!(self.out, "{}\n{}", word, reason)
            }
        }
    }

    pub fn suite_not_found(&mut self) -> io::Result<()> {
        writeln!(
            self.out,
            "Test suite is not found. Exiting test application."
        )
    }

    pub fn lifecycle_failed(&mut self, phase: Phase) -> io::Result<()> {
        match phase {
            Phase::Setup => writeln!(
                self.out,
                "Test suite setup failed. Skipping tests in suite."
            ),
            Phase::Teardown => writeln!(self.out, "Test suite teardown failed."),
        }
    }

    pub fn summary(&mut self, tally: &Tally) -> io::Result<()> {
        writeln!(self.out, "-------------------------")?;
        write!(
            self.out,
            "Tests passed: {}\nTests failed: {}",
            tally.passed, tally.failed
        )?;
        if tally.missed_failures != 0 {
            write!(self.out, "\nMissed failures: {}", tally.missed_failures)?;
        }
        writeln!(self.out)?;
        self.out.flush()
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.color(color).bold().to_string()
        } else {
            text.to_string()
        }
    }
}
