//! The options a node is started with.
//!
//! kishard does not parse command lines. A binary or config loader fills a [`FilterOptions`],
//! either through the builder methods or by deserializing it, and hands it to
//! [`FilterChain::from_options`](crate::filter::FilterChain::from_options).

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::error::ConfigError;

/// Which tests a node should run.
///
/// Every node of a sharded run must get the same options apart from `current_node`.
///
/// Deserializes from kebab-case keys:
///
/// ```toml
/// current-node = 0
/// total-nodes = 4
/// groups = ["db"]
/// exclude-groups = ["slow"]
/// filter = "Api::"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
#[non_exhaustive]
pub struct FilterOptions {
    /// Index of this node, counting from 0.
    pub current_node: Option<usize>,

    /// Number of nodes the suite is split across.
    pub total_nodes: Option<usize>,

    /// Run only tests in at least one of these groups.
    pub groups: BTreeSet<String>,

    /// Never run tests in any of these groups.
    pub exclude_groups: BTreeSet<String>,

    /// Name pattern tests must match.
    pub filter: Option<String>,
}

impl FilterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_current_node(self, current_node: usize) -> Self {
        Self {
            current_node: Some(current_node),
            ..self
        }
    }

    pub fn with_total_nodes(self, total_nodes: usize) -> Self {
        Self {
            total_nodes: Some(total_nodes),
            ..self
        }
    }

    pub fn with_shard(self, current_node: usize, total_nodes: usize) -> Self {
        self.with_current_node(current_node)
            .with_total_nodes(total_nodes)
    }

    pub fn with_filter(self, filter: impl Into<String>) -> Self {
        Self {
            filter: Some(filter.into()),
            ..self
        }
    }

    pub fn extend_groups(mut self, groups: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.groups.extend(groups.into_iter().map(Into::into));
        self
    }

    pub fn extend_exclude_groups(
        mut self,
        groups: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.exclude_groups
            .extend(groups.into_iter().map(Into::into));
        self
    }

    /// The requested `(current_node, total_nodes)` pair, if sharding was requested.
    ///
    /// Both halves have to be given together. Range checks happen when the shard filter is
    /// built.
    pub fn shard(&self) -> Result<Option<(usize, usize)>, ConfigError> {
        match (self.current_node, self.total_nodes) {
            (None, None) => Ok(None),
            (Some(current_node), Some(total_nodes)) => Ok(Some((current_node, total_nodes))),
            (current_node, total_nodes) => Err(ConfigError::IncompleteShard {
                current_node,
                total_nodes,
            }),
        }
    }
}
