//! Run errors
//!
//! Failures inside tests and suite operations are recorded as verdicts and
//! never surface here. Only conditions that stop the whole run do.

use crate::runner::Tally;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunError {
    /// Tests name a suite that has no lifecycle records; the run stops
    #[error("test suite '{suite}' is not found")]
    SuiteNotFound { suite: String, tally: Tally },

    #[error("failed to write test report: {0}")]
    Output(#[from] io::Error),
}

impl RunError {
    /// Failure count to use as the process exit status
    pub fn exit_code(&self) -> usize {
        match self {
            RunError::SuiteNotFound { tally, .. } => tally.failed + 1,
            RunError::Output(_) => 1,
        }
    }
}
