use std::{
    any::Any,
    panic::{UnwindSafe, catch_unwind},
};

use crate::{
    outcome::TestStatus,
    panic::TestPanicHandler,
    test::{TestMeta, TestResult},
};

/// The default [`TestPanicHandler`].
///
/// A returned status is passed through unchanged. A panic counts as a failed assertion, with
/// the panic message as the failure message. Panics raised by `assert_eq!` and `assert_ne!`
/// additionally carry their `left` and `right` values as the compared `got` and `expected`.
#[derive(Debug, Default, Clone)]
pub struct DefaultPanicHandler;

impl DefaultPanicHandler {
    /// Convert a panic payload into a string.
    ///
    /// This matches the common payload types produced by `panic!` (`&'static str` and `String`).
    /// Other payload types are formatted as a generic placeholder.
    pub fn payload_as_string(err: Box<dyn Any + Send + 'static>) -> String {
        err.downcast::<&'static str>()
            .map(|s| s.to_string())
            .or_else(|err| err.downcast::<String>().map(|s| *s))
            .unwrap_or_else(|_| String::from("Box<dyn Any>"))
    }

    /// Build the failure status for a panic message.
    pub fn failure_from_message(message: String) -> TestStatus {
        match assertion_operands(&message) {
            Some((got, expected)) => TestStatus::comparison_failure(message, got, expected),
            None => TestStatus::failure(message),
        }
    }
}

/// Pull `left` and `right` out of an `assert_eq!`/`assert_ne!` panic message.
fn assertion_operands(message: &str) -> Option<(String, String)> {
    let mut lines = message.lines();
    lines.next()?.starts_with("assertion `left").then_some(())?;

    let mut left = None;
    let mut right = None;
    for line in lines {
        if let Some(value) = line.strip_prefix("  left: ") {
            left = Some(value.to_owned());
        } else if let Some(value) = line.strip_prefix(" right: ") {
            right = Some(value.to_owned());
        }
    }
    Some((left?, right?))
}

impl TestPanicHandler for DefaultPanicHandler {
    fn handle<F: FnOnce() -> TestResult + UnwindSafe>(&self, f: F, _: &TestMeta) -> TestStatus {
        match catch_unwind(f) {
            Ok(TestResult(status)) => status,
            Err(err) => Self::failure_from_message(Self::payload_as_string(err)),
        }
    }
}
