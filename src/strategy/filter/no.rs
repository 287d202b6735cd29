use crate::{
    filter::{FilteredTests, TestFilter},
    suite::FlatSequence,
};

/// A [`TestFilter`] that does not filter out any tests.
///
/// All input tests are included in the run, and no tests are counted as filtered out.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct NoFilter;

impl NoFilter {
    pub fn new() -> Self {
        Self
    }
}

impl TestFilter for NoFilter {
    fn filter<'s>(&self, tests: FlatSequence<'s>) -> FilteredTests<'s> {
        FilteredTests {
            tests,
            filtered_out: 0,
        }
    }
}
