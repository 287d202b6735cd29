use std::io;

pub use test::TestHarness;

use crate::{
    filter::NoFilter, listener::TapListener, panic::DefaultPanicHandler, suite::Suite,
};

/// A harness that runs every test of `suite` and prints TAP to stdout.
///
/// Swap the pieces with the `with_*` methods, most commonly
/// [`with_options`](TestHarness::with_options) to shard the run.
pub fn harness(
    suite: &Suite,
) -> TestHarness<'_, NoFilter, TapListener<io::Stdout>, DefaultPanicHandler> {
    TestHarness {
        suite,
        filter: NoFilter,
        listener: TapListener::default(),
        panic_handler: DefaultPanicHandler,
    }
}
