//! Result listeners for kishard.
//!
//! A listener receives the lifecycle events of a run, in execution order, and renders them
//! somewhere. It only ever sees tests that survived filtering: a node's listener knows
//! nothing about tests that run on other nodes.
//!
//! For every executed test a listener gets:
//!
//! 1. [`test_started`](ResultListener::test_started)
//! 2. [`test_outcome`](ResultListener::test_outcome), only if the test did not pass
//! 3. [`test_ended`](ResultListener::test_ended) with the captured output
//!
//! Tests are bracketed by [`suite_started`](ResultListener::suite_started) and
//! [`suite_ended`](ResultListener::suite_ended) for every suite on their path. Suites without
//! selected tests produce no events, except the root suite, which always brackets the run.
//!
//! The harness calls a listener from a single dedicated thread, in order. State a listener
//! keeps (counters, nesting levels) belongs to that one instance and is reset in
//! [`run_started`](ResultListener::run_started).

use std::time::Duration;

use crate::{outcome::TestStatus, suite::SuiteMeta, test::TestMeta};

mod no;
pub use no::*;

pub mod tap;
pub use tap::TapListener;

mod yaml;

/// Receives the lifecycle events of a test run.
///
/// Every method defaults to doing nothing, so implementations only pick the events they care
/// about. Errors do not stop the run; the harness collects them in the
/// [`TestReport`](crate::TestReport).
pub trait ResultListener {
    type Error;

    /// A run over `tests` selected tests is about to start.
    fn run_started(&mut self, tests: usize) -> Result<(), Self::Error> {
        let _ = tests;
        Ok(())
    }

    fn suite_started(&mut self, suite: SuiteMeta<'_>) -> Result<(), Self::Error> {
        let _ = suite;
        Ok(())
    }

    fn suite_ended(&mut self, suite: SuiteMeta<'_>) -> Result<(), Self::Error> {
        let _ = suite;
        Ok(())
    }

    fn test_started(&mut self, test: &TestMeta) -> Result<(), Self::Error> {
        let _ = test;
        Ok(())
    }

    /// The test ended in something other than [`TestStatus::Passed`].
    ///
    /// Called exactly once for such a test, between `test_started` and `test_ended`.
    fn test_outcome(
        &mut self,
        test: &TestMeta,
        status: &TestStatus,
        elapsed: Duration,
    ) -> Result<(), Self::Error> {
        let _ = (test, status, elapsed);
        Ok(())
    }

    /// `output` is whatever the test printed through the capture macros.
    fn test_ended(
        &mut self,
        test: &TestMeta,
        elapsed: Duration,
        output: &str,
    ) -> Result<(), Self::Error> {
        let _ = (test, elapsed, output);
        Ok(())
    }
}

/// One lifecycle event, as sent from the executing thread to the listener thread.
#[derive(Debug)]
pub(crate) enum ListenerEvent<'s> {
    RunStarted {
        tests: usize,
    },
    SuiteStarted(SuiteMeta<'s>),
    SuiteEnded(SuiteMeta<'s>),
    TestStarted(&'s TestMeta),
    TestOutcome {
        test: &'s TestMeta,
        status: TestStatus,
        elapsed: Duration,
    },
    TestEnded {
        test: &'s TestMeta,
        elapsed: Duration,
        output: String,
    },
}

impl ListenerEvent<'_> {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            ListenerEvent::RunStarted { .. } => "run_started",
            ListenerEvent::SuiteStarted(_) => "suite_started",
            ListenerEvent::SuiteEnded(_) => "suite_ended",
            ListenerEvent::TestStarted(_) => "test_started",
            ListenerEvent::TestOutcome { .. } => "test_outcome",
            ListenerEvent::TestEnded { .. } => "test_ended",
        }
    }

    pub(crate) fn dispatch<L: ResultListener>(self, listener: &mut L) -> Result<(), L::Error> {
        match self {
            ListenerEvent::RunStarted { tests } => listener.run_started(tests),
            ListenerEvent::SuiteStarted(suite) => listener.suite_started(suite),
            ListenerEvent::SuiteEnded(suite) => listener.suite_ended(suite),
            ListenerEvent::TestStarted(test) => listener.test_started(test),
            ListenerEvent::TestOutcome {
                test,
                status,
                elapsed,
            } => listener.test_outcome(test, &status, elapsed),
            ListenerEvent::TestEnded {
                test,
                elapsed,
                output,
            } => listener.test_ended(test, elapsed, &output),
        }
    }
}
