use std::{process::ExitCode, time::Duration};

use crate::outcome::TestOutcome;

pub type TestOutcomes<'s> = Vec<(&'s str, TestOutcome)>;

/// What a run produced, in execution order.
#[derive(Debug)]
#[non_exhaustive]
pub struct TestReport<'s, ListenerError: 's> {
    pub outcomes: TestOutcomes<'s>,
    pub duration: Duration,
    /// Tests dropped by the filter, including those that belong to other nodes.
    pub filtered_out: usize,
    /// Failed listener calls, with the name of the event that failed.
    pub listener_errors: Vec<(&'static str, ListenerError)>,
}

impl<ListenerError> TestReport<'_, ListenerError> {
    /// No test errored or failed and the listener handled every event.
    ///
    /// Incomplete, risky and skipped tests do not make a run unsuccessful.
    pub fn is_success(&self) -> bool {
        self.listener_errors.is_empty() && self.outcomes.iter().all(|(_, outcome)| outcome.is_good())
    }

    pub fn exit_code(&self) -> ExitCode {
        match self.is_success() {
            true => ExitCode::SUCCESS,
            false => ExitCode::FAILURE,
        }
    }

    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|(_, outcome)| outcome.passed()).count()
    }

    /// Tests that errored or failed.
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|(_, outcome)| outcome.is_bad()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|(_, outcome)| outcome.skipped()).count()
    }
}
