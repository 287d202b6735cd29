use std::fmt;

use tracing::{debug, trace};

use crate::{
    error::ConfigError,
    filter::{BoxedFilter, FilterSpec, FilteredTests, TestFilter},
    options::FilterOptions,
    suite::{FlatSequence, Suite},
};

/// The fixed-order composition of filters a node applies to its suite.
///
/// Filters run in [`FilterKind`](crate::filter::FilterKind) order: exclude-group,
/// include-group, name-pattern, shard. Each one consumes the previous one's output, so a test
/// has to pass all of them to stay in the run, and the shard filter numbers only the tests
/// every other filter kept.
///
/// A chain is built once from [`FilterOptions`] and never changes afterwards.
#[derive(Default)]
pub struct FilterChain {
    specs: Vec<FilterSpec>,
    filters: Vec<BoxedFilter>,
}

impl FilterChain {
    /// A chain without filters. Running it yields the whole suite.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the chain for the given options.
    ///
    /// Only filters whose inputs are present and non-empty are installed. Supplying exactly
    /// one of `current_node` and `total_nodes` fails before anything else is looked at.
    pub fn from_options(options: &FilterOptions) -> Result<Self, ConfigError> {
        let shard = options.shard()?;

        let mut specs = Vec::new();
        if !options.exclude_groups.is_empty() {
            specs.push(FilterSpec::ExcludeGroup {
                groups: options.exclude_groups.clone(),
            });
        }
        if !options.groups.is_empty() {
            specs.push(FilterSpec::IncludeGroup {
                groups: options.groups.clone(),
            });
        }
        if let Some(pattern) = options.filter.as_deref().filter(|pattern| !pattern.is_empty()) {
            specs.push(FilterSpec::NamePattern {
                pattern: pattern.to_owned(),
            });
        }
        if let Some((current_node, total_nodes)) = shard {
            specs.push(FilterSpec::Shard {
                current_node,
                total_nodes,
            });
        }

        Self::from_specs(specs)
    }

    /// Build a chain from explicit specs.
    ///
    /// Specs are put into chain order; specs of the same kind keep their relative order.
    pub fn from_specs(specs: impl IntoIterator<Item = FilterSpec>) -> Result<Self, ConfigError> {
        let mut specs: Vec<_> = specs.into_iter().collect();
        specs.sort_by_key(FilterSpec::kind);

        let filters = specs
            .iter()
            .map(FilterSpec::build)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            filters = ?specs.iter().map(FilterSpec::kind).collect::<Vec<_>>(),
            "built filter chain"
        );
        Ok(Self { specs, filters })
    }

    /// The installed filters, in the order they run.
    pub fn specs(&self) -> &[FilterSpec] {
        &self.specs
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Flatten `suite` and run it through every installed filter.
    pub fn run<'s>(&self, suite: &'s Suite) -> FlatSequence<'s> {
        self.filter(suite.flatten()).tests
    }
}

impl TestFilter for FilterChain {
    fn filter<'s>(&self, tests: FlatSequence<'s>) -> FilteredTests<'s> {
        let total = tests.len();
        let tests = self.filters.iter().fold(tests, |tests, filter| filter.filter(tests).tests);
        trace!(total, kept = tests.len(), "applied filter chain");

        FilteredTests {
            filtered_out: total - tests.len(),
            tests,
        }
    }
}

impl fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterChain")
            .field("specs", &self.specs)
            .finish_non_exhaustive()
    }
}
