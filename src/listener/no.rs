use crate::listener::ResultListener;

/// A listener that produces no output.
///
/// Useful when only the [`TestReport`](crate::TestReport) matters, for example when another
/// system does its own reporting.
#[derive(Debug, Default, Clone)]
pub struct NoListener;

impl ResultListener for NoListener {
    type Error = ();
}
