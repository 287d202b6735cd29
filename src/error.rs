use thiserror::Error;

use crate::filter::FilterKind;

/// An error while turning options into a filter chain.
///
/// All of these are raised before the first test runs. A run that hits one of them must not
/// execute anything.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error(
        "Both --current-node and --total-nodes are required for parallelism \
         (got current node {current_node:?}, total nodes {total_nodes:?})"
    )]
    IncompleteShard {
        current_node: Option<usize>,
        total_nodes: Option<usize>,
    },

    #[error(
        "current node {current_node} must be a number between 0 and total nodes {total_nodes}, \
         exclusive"
    )]
    InvalidShard {
        current_node: usize,
        total_nodes: usize,
    },

    #[error("{kind} filter requires at least one group")]
    EmptyGroupSet { kind: FilterKind },

    #[error("invalid name pattern '{pattern}'")]
    InvalidNamePattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("unknown filter kind '{0}', expected one of {expected}", expected = FilterKind::NAMES.join(", "))]
    UnknownFilterKind(String),
}
