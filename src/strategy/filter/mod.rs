//! Test filtering for kishard.
//!
//! A filter takes an ordered [`FlatSequence`] and returns the subsequence that stays in the
//! run. Filters never reorder: the output is always the input with some tests removed.
//!
//! Four kinds of filter exist, and a [`FilterChain`] always applies them in the same order:
//!
//! 1. [`ExcludeGroupFilter`] drops tests tagged with any of the given groups
//! 2. [`IncludeGroupFilter`] keeps only tests tagged with one of the given groups
//! 3. [`NamePatternFilter`] keeps tests whose description matches a pattern
//! 4. [`ShardFilter`] keeps every `total_nodes`-th test, starting at `current_node`
//!
//! The shard filter is the only one that looks at positions instead of test attributes. It
//! runs last so the ordinals it partitions over are those of the tests that would actually
//! run on a node. Running the same chain once per node therefore splits those tests into
//! disjoint shards that together cover all of them.
//!
//! Implement [`TestFilter`] to define a custom filter.

use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::Deserialize;

use crate::{error::ConfigError, suite::FlatSequence};

mod no;
pub use no::*;

mod group;
pub use group::*;

mod name;
pub use name::*;

mod shard;
pub use shard::*;

mod chain;
pub use chain::*;

/// The result of applying a [`TestFilter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredTests<'s> {
    /// The tests that stay in the run, in their original relative order.
    pub tests: FlatSequence<'s>,

    /// The number of tests this filter removed.
    pub filtered_out: usize,
}

impl<'s> From<(FlatSequence<'s>, usize)> for FilteredTests<'s> {
    fn from((tests, filtered_out): (FlatSequence<'s>, usize)) -> Self {
        Self {
            tests,
            filtered_out,
        }
    }
}

/// A strategy for selecting which tests stay in a run.
///
/// Implementations must return an order-preserving subsequence of their input and must not
/// depend on anything but their own configuration and the input sequence. Every node of a
/// sharded run applies the same filters and relies on getting the same answer.
pub trait TestFilter {
    fn filter<'s>(&self, tests: FlatSequence<'s>) -> FilteredTests<'s>;
}

impl<T: TestFilter + ?Sized> TestFilter for Box<T> {
    fn filter<'s>(&self, tests: FlatSequence<'s>) -> FilteredTests<'s> {
        (**self).filter(tests)
    }
}

pub type BoxedFilter = Box<dyn TestFilter + Send + Sync>;

/// The kind of a filter.
///
/// The declaration order is the order a [`FilterChain`] applies filters in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterKind {
    ExcludeGroup,
    IncludeGroup,
    NamePattern,
    Shard,
}

impl FilterKind {
    pub const ALL: [FilterKind; 4] = [
        FilterKind::ExcludeGroup,
        FilterKind::IncludeGroup,
        FilterKind::NamePattern,
        FilterKind::Shard,
    ];

    pub const NAMES: [&'static str; 4] = ["exclude-group", "include-group", "name-pattern", "shard"];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterKind::ExcludeGroup => "exclude-group",
            FilterKind::IncludeGroup => "include-group",
            FilterKind::NamePattern => "name-pattern",
            FilterKind::Shard => "shard",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownFilterKind(s.to_owned()))
    }
}

/// A request for one filter, before it is built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case", deny_unknown_fields)]
pub enum FilterSpec {
    ExcludeGroup {
        groups: BTreeSet<String>,
    },
    IncludeGroup {
        groups: BTreeSet<String>,
    },
    NamePattern {
        pattern: String,
    },
    #[serde(rename_all = "kebab-case")]
    Shard {
        current_node: usize,
        total_nodes: usize,
    },
}

impl FilterSpec {
    pub fn kind(&self) -> FilterKind {
        match self {
            FilterSpec::ExcludeGroup { .. } => FilterKind::ExcludeGroup,
            FilterSpec::IncludeGroup { .. } => FilterKind::IncludeGroup,
            FilterSpec::NamePattern { .. } => FilterKind::NamePattern,
            FilterSpec::Shard { .. } => FilterKind::Shard,
        }
    }

    /// Build the filter this spec describes.
    pub fn build(&self) -> Result<BoxedFilter, ConfigError> {
        let filter: BoxedFilter = match self {
            FilterSpec::ExcludeGroup { groups } => {
                Box::new(ExcludeGroupFilter::new(groups.iter().cloned()))
            }
            FilterSpec::IncludeGroup { groups } => {
                Box::new(IncludeGroupFilter::new(groups.iter().cloned())?)
            }
            FilterSpec::NamePattern { pattern } => Box::new(NamePatternFilter::new(pattern)?),
            FilterSpec::Shard {
                current_node,
                total_nodes,
            } => Box::new(ShardFilter::new(*current_node, *total_nodes)?),
        };
        Ok(filter)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("exclude-group", FilterKind::ExcludeGroup)]
    #[test_case("include-group", FilterKind::IncludeGroup)]
    #[test_case("name-pattern", FilterKind::NamePattern)]
    #[test_case("shard", FilterKind::Shard)]
    fn kinds_parse_from_their_names(input: &str, expected: FilterKind) {
        assert_eq!(input.parse::<FilterKind>().unwrap(), expected);
        assert_eq!(expected.to_string(), input);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = "parallel".parse::<FilterKind>().unwrap_err();
        assert!(matches!(&err, ConfigError::UnknownFilterKind(kind) if kind == "parallel"));
        assert_eq!(
            err.to_string(),
            "unknown filter kind 'parallel', expected one of exclude-group, include-group, name-pattern, shard"
        );
    }

    #[test]
    fn kinds_are_ordered_like_the_chain() {
        let mut kinds = FilterKind::ALL;
        kinds.reverse();
        kinds.sort();
        assert_eq!(kinds, FilterKind::ALL);
    }

    #[test]
    fn specs_deserialize_by_kind_tag() {
        let specs: Vec<FilterSpec> = serde_json::from_str(
            r#"[
                {"kind": "include-group", "groups": ["db"]},
                {"kind": "shard", "current-node": 1, "total-nodes": 3}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            specs,
            [
                FilterSpec::IncludeGroup {
                    groups: BTreeSet::from(["db".to_string()])
                },
                FilterSpec::Shard {
                    current_node: 1,
                    total_nodes: 3
                },
            ]
        );
    }

    #[test]
    fn building_validates_specs() {
        let empty = FilterSpec::IncludeGroup {
            groups: BTreeSet::new(),
        };
        assert!(matches!(
            empty.build(),
            Err(ConfigError::EmptyGroupSet {
                kind: FilterKind::IncludeGroup
            })
        ));

        let shard = FilterSpec::Shard {
            current_node: 2,
            total_nodes: 2,
        };
        assert!(matches!(
            shard.build(),
            Err(ConfigError::InvalidShard { .. })
        ));
    }
}
