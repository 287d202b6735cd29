use std::num::NonZeroUsize;

use tracing::debug;

use crate::{
    error::ConfigError,
    filter::{FilteredTests, TestFilter},
    suite::FlatSequence,
};

/// Keeps the tests that belong to one node of a sharded run.
///
/// The input is numbered from 0 and a test stays iff `ordinal % total_nodes == current_node`.
/// Only positions matter, so the filter has to see exactly the tests that would otherwise
/// run. Given the same input, the filters for nodes `0..total_nodes` select disjoint sets
/// that together cover the whole input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardFilter {
    current_node: usize,
    total_nodes: NonZeroUsize,
}

impl ShardFilter {
    pub fn new(current_node: usize, total_nodes: usize) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidShard {
            current_node,
            total_nodes,
        };
        let total_nodes = NonZeroUsize::new(total_nodes).ok_or_else(invalid)?;
        if current_node >= total_nodes.get() {
            return Err(invalid());
        }

        Ok(Self {
            current_node,
            total_nodes,
        })
    }

    pub fn current_node(&self) -> usize {
        self.current_node
    }

    pub fn total_nodes(&self) -> NonZeroUsize {
        self.total_nodes
    }

    pub fn contains(&self, ordinal: usize) -> bool {
        ordinal % self.total_nodes.get() == self.current_node
    }
}

impl TestFilter for ShardFilter {
    fn filter<'s>(&self, tests: FlatSequence<'s>) -> FilteredTests<'s> {
        let eligible = tests.len();
        let filtered = FilteredTests::from(tests.select(|ordinal, _| self.contains(ordinal)));
        debug!(
            current_node = self.current_node,
            total_nodes = self.total_nodes.get(),
            eligible,
            selected = filtered.tests.len(),
            "selected shard"
        );
        filtered
    }
}
