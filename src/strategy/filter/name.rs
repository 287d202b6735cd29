use std::ops::RangeInclusive;

use regex::{Regex, RegexBuilder};
use tracing::trace;

use crate::{
    error::ConfigError,
    filter::{FilteredTests, TestFilter},
    suite::FlatSequence,
    test::TestMeta,
};

/// Keeps tests whose description matches a pattern.
///
/// The description is the test name, followed by ` with data set #<n>` for data-driven tests.
/// Patterns come in these forms:
///
/// - `/body/flags`: a regular expression with `i`, `m`, `s`, `x` or `u` flags
/// - `name#3`: tests matching `name` that run with data set 3
/// - `name#1-3`: tests matching `name` that run with data set 1, 2 or 3
///
/// A data-set pattern still matches any description containing it literally, so `Issue#12`
/// selects a test named `Issue#12`.
/// - anything else: an unanchored, case-insensitive regular expression, or a literal
///   case-insensitive substring if it is not valid regex syntax
#[derive(Debug, Clone)]
pub struct NamePatternFilter {
    pattern: String,
    matcher: NameMatcher,
}

#[derive(Debug, Clone)]
enum NameMatcher {
    Description(Regex),
    DataSet {
        name: Regex,
        data_sets: RangeInclusive<usize>,
        description: Regex,
    },
}

impl NamePatternFilter {
    pub fn new(pattern: impl Into<String>) -> Result<Self, ConfigError> {
        let pattern = pattern.into();
        let matcher = NameMatcher::parse(&pattern)?;
        Ok(Self { pattern, matcher })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn matches(&self, meta: &TestMeta) -> bool {
        match &self.matcher {
            NameMatcher::Description(regex) => regex.is_match(&meta.describe().to_string()),
            NameMatcher::DataSet {
                name,
                data_sets,
                description,
            } => {
                let selected = meta
                    .data_set
                    .is_some_and(|data_set| data_sets.contains(&data_set))
                    && name.is_match(&meta.name);
                selected || description.is_match(&meta.describe().to_string())
            }
        }
    }
}

impl NameMatcher {
    fn parse(pattern: &str) -> Result<Self, ConfigError> {
        if let Some((body, flags)) = split_delimited(pattern) {
            let mut builder = RegexBuilder::new(body);
            for flag in flags.chars() {
                match flag {
                    'i' => builder.case_insensitive(true),
                    'm' => builder.multi_line(true),
                    's' => builder.dot_matches_new_line(true),
                    'x' => builder.ignore_whitespace(true),
                    'u' => builder.unicode(true),
                    _ => unreachable!("flags are checked by split_delimited"),
                };
            }
            let regex = builder
                .build()
                .map_err(|source| ConfigError::InvalidNamePattern {
                    pattern: pattern.to_owned(),
                    source,
                })?;
            return Ok(NameMatcher::Description(regex));
        }

        if let Some((name, data_sets)) = split_data_set(pattern) {
            return Ok(NameMatcher::DataSet {
                name: lenient_regex(name),
                data_sets,
                description: lenient_regex(pattern),
            });
        }

        Ok(NameMatcher::Description(lenient_regex(pattern)))
    }
}

/// `/body/flags` with only known flags.
fn split_delimited(pattern: &str) -> Option<(&str, &str)> {
    let rest = pattern.strip_prefix('/')?;
    let (body, flags) = rest.rsplit_once('/')?;
    flags
        .chars()
        .all(|flag| matches!(flag, 'i' | 'm' | 's' | 'x' | 'u'))
        .then_some((body, flags))
}

/// `name#n` or `name#from-to`.
fn split_data_set(pattern: &str) -> Option<(&str, RangeInclusive<usize>)> {
    let (name, selector) = pattern.rsplit_once('#')?;
    let (from, to) = match selector.split_once('-') {
        Some((from, to)) => (from.parse().ok()?, to.parse().ok()?),
        None => {
            let data_set: usize = selector.parse().ok()?;
            (data_set, data_set)
        }
    };
    Some((name, from.min(to)..=from.max(to)))
}

/// Case-insensitive regex, falling back to a literal match for text that is not valid regex.
fn lenient_regex(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .or_else(|_| {
            RegexBuilder::new(&regex::escape(pattern))
                .case_insensitive(true)
                .build()
        })
        .unwrap_or_else(|_| unreachable!("an escaped literal is always a valid regex"))
}

impl TestFilter for NamePatternFilter {
    fn filter<'s>(&self, tests: FlatSequence<'s>) -> FilteredTests<'s> {
        let filtered = FilteredTests::from(tests.select(|_, test| self.matches(test.meta())));
        trace!(
            pattern = %self.pattern,
            kept = filtered.tests.len(),
            filtered_out = filtered.filtered_out,
            "applied name-pattern filter"
        );
        filtered
    }
}
