use std::collections::BTreeSet;

use tracing::trace;

use crate::{
    error::ConfigError,
    filter::{FilterKind, FilteredTests, TestFilter},
    suite::FlatSequence,
};

/// Drops every test whose effective groups intersect `groups`.
///
/// With no groups this keeps everything. [`FilterChain`](crate::filter::FilterChain) does not
/// install it in that case.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExcludeGroupFilter {
    groups: BTreeSet<String>,
}

impl ExcludeGroupFilter {
    pub fn new(groups: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            groups: groups.into_iter().map(Into::into).collect(),
        }
    }

    pub fn groups(&self) -> &BTreeSet<String> {
        &self.groups
    }
}

impl TestFilter for ExcludeGroupFilter {
    fn filter<'s>(&self, tests: FlatSequence<'s>) -> FilteredTests<'s> {
        if self.groups.is_empty() {
            return FilteredTests {
                tests,
                filtered_out: 0,
            };
        }

        let filtered = FilteredTests::from(
            tests.select(|_, test| !test.in_any_group(self.groups.iter().map(String::as_str))),
        );
        trace!(
            groups = ?self.groups,
            kept = filtered.tests.len(),
            filtered_out = filtered.filtered_out,
            "applied exclude-group filter"
        );
        filtered
    }
}

/// Keeps only tests whose effective groups intersect `groups`.
///
/// An empty group set would drop every test, so it is rejected when the filter is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeGroupFilter {
    groups: BTreeSet<String>,
}

impl IncludeGroupFilter {
    pub fn new(groups: impl IntoIterator<Item = impl Into<String>>) -> Result<Self, ConfigError> {
        let groups: BTreeSet<String> = groups.into_iter().map(Into::into).collect();
        if groups.is_empty() {
            return Err(ConfigError::EmptyGroupSet {
                kind: FilterKind::IncludeGroup,
            });
        }
        Ok(Self { groups })
    }

    pub fn groups(&self) -> &BTreeSet<String> {
        &self.groups
    }
}

impl TestFilter for IncludeGroupFilter {
    fn filter<'s>(&self, tests: FlatSequence<'s>) -> FilteredTests<'s> {
        let filtered = FilteredTests::from(
            tests.select(|_, test| test.in_any_group(self.groups.iter().map(String::as_str))),
        );
        trace!(
            groups = ?self.groups,
            kept = filtered.tests.len(),
            filtered_out = filtered.filtered_out,
            "applied include-group filter"
        );
        filtered
    }
}
