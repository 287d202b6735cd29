use std::{borrow::Cow, time::Duration};

#[derive(Debug)]
#[non_exhaustive]
pub struct TestOutcome {
    pub status: TestStatus,
    pub duration: Duration,
    pub output: String,
}

impl TestOutcome {
    pub fn is_good(&self) -> bool {
        self.status.is_good()
    }

    pub fn is_bad(&self) -> bool {
        self.status.is_bad()
    }

    pub fn passed(&self) -> bool {
        self.status.passed()
    }

    pub fn failed(&self) -> bool {
        self.status.failed()
    }

    pub fn skipped(&self) -> bool {
        self.status.skipped()
    }
}

/// The terminal status of one executed test.
///
/// None of these abort a run. Errors and failures make the run unsuccessful, the other
/// non-passing states are only reported.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TestStatus {
    Passed,
    /// The test body returned an error.
    Errored(String),
    /// An assertion did not hold.
    Failed(TestFailure),
    Incomplete(Option<Cow<'static, str>>),
    Risky(Option<Cow<'static, str>>),
    Skipped(Option<Cow<'static, str>>),
}

impl TestStatus {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failed(TestFailure {
            message: message.into(),
            comparison: None,
        })
    }

    pub fn comparison_failure(
        message: impl Into<String>,
        got: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::Failed(TestFailure {
            message: message.into(),
            comparison: Some(Comparison {
                got: got.into(),
                expected: expected.into(),
            }),
        })
    }

    pub fn skip(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::Skipped(Some(reason.into()))
    }

    pub fn incomplete(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::Incomplete(Some(reason.into()))
    }

    pub fn risky(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::Risky(Some(reason.into()))
    }

    pub fn is_good(&self) -> bool {
        !self.is_bad()
    }

    pub fn is_bad(&self) -> bool {
        matches!(self, TestStatus::Errored(_) | TestStatus::Failed(_))
    }

    pub fn passed(&self) -> bool {
        matches!(self, TestStatus::Passed)
    }

    pub fn failed(&self) -> bool {
        matches!(self, TestStatus::Failed(_))
    }

    pub fn skipped(&self) -> bool {
        matches!(self, TestStatus::Skipped(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestFailure {
    pub message: String,
    pub comparison: Option<Comparison>,
}

/// The two sides of a failed equality assertion, already rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub got: String,
    pub expected: String,
}
