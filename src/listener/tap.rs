//! TAP output.
//!
//! [`TapListener`] renders a run as a [Test Anything Protocol](https://testanything.org) stream:
//!
//! ```text
//! ok 1 - Math::adds
//! not ok 2 - Failure: Math::divides
//!   ---
//! message: 'expected true, got false'
//! severity: fail
//!   ...
//! ok 3 - # SKIP Math::rounds
//! 1..3
//! ```
//!
//! Numbering is local to the listener, so every node of a sharded run counts from 1 and prints
//! a plan covering only its own tests. Merging the streams of several nodes is left to
//! whatever collects them.

use std::{io, time::Duration};

use crate::{
    listener::{
        ResultListener,
        yaml::Mapping,
    },
    outcome::{TestFailure, TestStatus},
    suite::SuiteMeta,
    test::TestMeta,
};

#[derive(Debug)]
pub struct TapListener<W: io::Write> {
    target: W,
    test_number: usize,
    suite_level: usize,
    test_successful: bool,
}

impl Default for TapListener<io::Stdout> {
    fn default() -> Self {
        TapListener::new(io::stdout())
    }
}

impl<W: io::Write> TapListener<W> {
    pub fn new(target: W) -> Self {
        Self {
            target,
            test_number: 0,
            suite_level: 0,
            test_successful: true,
        }
    }

    pub fn with_target<WithTarget: io::Write>(
        self,
        with_target: WithTarget,
    ) -> TapListener<WithTarget> {
        TapListener {
            target: with_target,
            test_number: self.test_number,
            suite_level: self.suite_level,
            test_successful: self.test_successful,
        }
    }

    pub fn target(&self) -> &W {
        &self.target
    }

    pub fn into_target(self) -> W {
        self.target
    }

    /// Number of tests started in the current run.
    pub fn test_number(&self) -> usize {
        self.test_number
    }

    fn write_not_ok(
        &mut self,
        test: &TestMeta,
        prefix: &str,
        directive: &str,
    ) -> Result<(), io::Error> {
        self.test_successful = false;

        write!(self.target, "not ok {} - ", self.test_number)?;
        if !prefix.is_empty() {
            write!(self.target, "{prefix}: ")?;
        }
        write!(self.target, "{}", test.describe())?;
        if !directive.is_empty() {
            write!(self.target, " # {directive}")?;
        }
        writeln!(self.target)
    }

    /// `ok` line with a directive. The test is no longer reported as a plain pass.
    fn write_ok_directive(&mut self, directive: &str, message: &str) -> Result<(), io::Error> {
        self.test_successful = false;

        write!(self.target, "ok {} - # {directive}", self.test_number)?;
        if !message.is_empty() {
            write!(self.target, " {message}")?;
        }
        writeln!(self.target)
    }

    fn write_failure_diagnostic(&mut self, failure: &TestFailure) -> Result<(), io::Error> {
        let message = failure.message.lines().next().unwrap_or_default();
        let mut diagnostic = Mapping::new()
            .scalar("message", message)
            .scalar("severity", "fail");
        if let Some(comparison) = &failure.comparison {
            diagnostic = diagnostic.mapping(
                "data",
                Mapping::new()
                    .scalar("got", &comparison.got)
                    .scalar("expected", &comparison.expected),
            );
        }

        write!(self.target, "  ---\n{}  ...\n", diagnostic.dump())
    }
}

impl<W: io::Write> ResultListener for TapListener<W> {
    type Error = io::Error;

    fn run_started(&mut self, _: usize) -> Result<(), Self::Error> {
        self.test_number = 0;
        self.suite_level = 0;
        self.test_successful = true;
        Ok(())
    }

    fn suite_started(&mut self, _: SuiteMeta<'_>) -> Result<(), Self::Error> {
        self.suite_level += 1;
        Ok(())
    }

    fn suite_ended(&mut self, _: SuiteMeta<'_>) -> Result<(), Self::Error> {
        self.suite_level = self.suite_level.saturating_sub(1);
        if self.suite_level == 0 {
            writeln!(self.target, "1..{}", self.test_number)?;
            self.target.flush()?;
        }
        Ok(())
    }

    fn test_started(&mut self, _: &TestMeta) -> Result<(), Self::Error> {
        self.test_number += 1;
        self.test_successful = true;
        Ok(())
    }

    fn test_outcome(
        &mut self,
        test: &TestMeta,
        status: &TestStatus,
        _: Duration,
    ) -> Result<(), Self::Error> {
        match status {
            TestStatus::Passed => Ok(()),
            TestStatus::Errored(_) => self.write_not_ok(test, "Error", ""),
            TestStatus::Failed(failure) => {
                self.write_not_ok(test, "Failure", "")?;
                self.write_failure_diagnostic(failure)
            }
            TestStatus::Incomplete(_) => self.write_not_ok(test, "", "TODO Incomplete Test"),
            TestStatus::Risky(message) => {
                self.write_ok_directive("RISKY", message.as_deref().unwrap_or_default())
            }
            TestStatus::Skipped(message) => {
                let message = match message.as_deref() {
                    Some(message) if !message.is_empty() => message.to_owned(),
                    _ => test.describe().to_string(),
                };
                self.write_ok_directive("SKIP", &message)
            }
        }
    }

    fn test_ended(&mut self, test: &TestMeta, _: Duration, output: &str) -> Result<(), Self::Error> {
        if self.test_successful {
            writeln!(self.target, "ok {} - {}", self.test_number, test.describe())?;
        }

        let output = output.trim();
        if !output.is_empty() {
            for line in output.split('\n') {
                writeln!(self.target, "# {line}")?;
            }
        }
        Ok(())
    }
}
