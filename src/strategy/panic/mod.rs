//! Panic handling for kishard.
//!
//! Test bodies signal broken assertions by panicking, the way `assert!` and friends do. A
//! panic handler runs the test function and turns whatever happened into a [`TestStatus`].
//! The harness decides when tests run; the panic handler is the piece that actually runs
//! them.
//!
//! Implement [`TestPanicHandler`] to change how panics map to statuses.

use std::panic::UnwindSafe;

use crate::{
    outcome::TestStatus,
    test::{TestMeta, TestResult},
};

mod default;
pub use default::*;

/// A strategy for executing a test function and translating panics into a [`TestStatus`].
pub trait TestPanicHandler {
    /// Execute `f` and return the status of the test.
    fn handle<F: FnOnce() -> TestResult + UnwindSafe>(&self, f: F, meta: &TestMeta)
    -> TestStatus;
}
