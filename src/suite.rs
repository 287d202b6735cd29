//! Suite trees and their flattened form.
//!
//! A [`Suite`] is the already-discovered shape of a test run: named, optionally tagged, and
//! holding tests and nested suites in declaration order. Filtering never works on the tree
//! directly. The tree is first flattened into a [`FlatSequence`], which is what every
//! [`TestFilter`](crate::filter::TestFilter) consumes and produces.
//!
//! Flattening is depth-first and pre-order. The resulting order is the canonical base order
//! every node of a sharded run agrees on, so it must only depend on the tree itself.

use std::{borrow::Cow, collections::BTreeSet, ptr, slice, vec};

use crate::test::{Test, TestMeta};

#[derive(Debug, Default)]
pub struct Suite {
    pub name: Cow<'static, str>,
    /// Tags inherited by every test below this suite.
    pub groups: BTreeSet<Cow<'static, str>>,
    pub children: Vec<SuiteNode>,
}

#[derive(Debug)]
pub enum SuiteNode {
    Test(Test),
    Suite(Suite),
}

impl From<Test> for SuiteNode {
    fn from(test: Test) -> Self {
        SuiteNode::Test(test)
    }
}

impl From<Suite> for SuiteNode {
    fn from(suite: Suite) -> Self {
        SuiteNode::Suite(suite)
    }
}

/// What listeners get to know about a suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuiteMeta<'s> {
    pub name: &'s str,
    /// Nesting depth, the root suite is at depth 0.
    pub depth: usize,
}

impl Suite {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_groups<G>(mut self, groups: impl IntoIterator<Item = G>) -> Self
    where
        G: Into<Cow<'static, str>>,
    {
        self.groups.extend(groups.into_iter().map(Into::into));
        self
    }

    pub fn with_child(mut self, child: impl Into<SuiteNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn extend_children<N>(mut self, children: impl IntoIterator<Item = N>) -> Self
    where
        N: Into<SuiteNode>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Number of leaf tests in the whole tree.
    pub fn test_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child {
                SuiteNode::Test(_) => 1,
                SuiteNode::Suite(suite) => suite.test_count(),
            })
            .sum()
    }

    /// Flatten the tree into its leaf tests, in declaration order.
    ///
    /// Group inheritance is resolved here: every [`FlatTest`] carries the union of its own
    /// tags and the tags of all enclosing suites.
    pub fn flatten(&self) -> FlatSequence<'_> {
        struct Flattener<'s>(Vec<FlatTest<'s>>);

        impl<'s> SuiteVisitor<'s> for Flattener<'s> {
            fn visit_test(&mut self, index: usize, test: &'s Test, groups: &BTreeSet<&'s str>) {
                self.0.push(FlatTest {
                    test,
                    groups: groups.clone(),
                    index,
                });
            }
        }

        let mut flattener = Flattener(Vec::with_capacity(self.test_count()));
        self.walk(&mut flattener);
        FlatSequence(flattener.0)
    }

    /// Visit the tree depth-first in declaration order.
    ///
    /// Tests are numbered by their position in this walk, which is the same index
    /// [`FlatTest::index`] reports.
    pub fn walk<'s>(&'s self, visitor: &mut impl SuiteVisitor<'s>) {
        let mut index = 0;
        self.walk_at(0, &BTreeSet::new(), &mut index, visitor);
    }

    fn walk_at<'s>(
        &'s self,
        depth: usize,
        inherited: &BTreeSet<&'s str>,
        index: &mut usize,
        visitor: &mut impl SuiteVisitor<'s>,
    ) {
        let meta = SuiteMeta {
            name: self.name.as_ref(),
            depth,
        };
        let mut groups = inherited.clone();
        groups.extend(self.groups.iter().map(AsRef::as_ref));

        visitor.enter_suite(meta);
        for child in &self.children {
            match child {
                SuiteNode::Test(test) => {
                    let mut test_groups = groups.clone();
                    test_groups.extend(test.groups.iter().map(AsRef::as_ref));
                    visitor.visit_test(*index, test, &test_groups);
                    *index += 1;
                }
                SuiteNode::Suite(suite) => suite.walk_at(depth + 1, &groups, index, visitor),
            }
        }
        visitor.leave_suite(meta);
    }
}

/// Callbacks for [`Suite::walk`].
pub trait SuiteVisitor<'s> {
    fn enter_suite(&mut self, suite: SuiteMeta<'s>) {
        let _ = suite;
    }

    fn leave_suite(&mut self, suite: SuiteMeta<'s>) {
        let _ = suite;
    }

    /// `groups` are the effective groups of the test, inheritance already applied.
    fn visit_test(&mut self, index: usize, test: &'s Test, groups: &BTreeSet<&'s str>);
}

/// One leaf of a flattened suite.
#[derive(Debug, Clone)]
pub struct FlatTest<'s> {
    pub test: &'s Test,
    /// Effective groups: the test's own tags plus those of every enclosing suite.
    pub groups: BTreeSet<&'s str>,
    /// Position of the test in the unfiltered walk. Stable across filter stages.
    pub index: usize,
}

impl PartialEq for FlatTest<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
            && ptr::eq(self.test, other.test)
            && self.groups == other.groups
    }
}

impl Eq for FlatTest<'_> {}

impl FlatTest<'_> {
    pub fn meta(&self) -> &TestMeta {
        &self.test.meta
    }

    pub fn in_any_group<'g>(&self, groups: impl IntoIterator<Item = &'g str>) -> bool {
        groups.into_iter().any(|group| self.groups.contains(group))
    }
}

/// An ordered run of [`FlatTest`]s.
///
/// The ordinal of a test is its position in the sequence it is currently in. Ordinals are not
/// stored; they are derived from the position on every access, so each filter stage sees
/// ordinals counted from 0 over its own input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatSequence<'s>(Vec<FlatTest<'s>>);

impl<'s> FlatSequence<'s> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, FlatTest<'s>> {
        self.0.iter()
    }

    /// Iterate `(ordinal, test)` pairs for this sequence.
    pub fn ordinals(&self) -> impl ExactSizeIterator<Item = (usize, &FlatTest<'s>)> {
        self.0.iter().enumerate()
    }

    /// Keep the tests `keep` accepts, in order. Returns the kept sequence and how many
    /// tests were dropped.
    pub fn select<F>(self, mut keep: F) -> (Self, usize)
    where
        F: FnMut(usize, &FlatTest<'s>) -> bool,
    {
        let before = self.0.len();
        let kept: Vec<_> = self
            .0
            .into_iter()
            .enumerate()
            .filter_map(|(ordinal, test)| keep(ordinal, &test).then_some(test))
            .collect();
        let dropped = before - kept.len();
        (Self(kept), dropped)
    }

    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.0.iter().map(|test| test.test.name.as_ref())
    }

    pub fn indices(&self) -> impl ExactSizeIterator<Item = usize> + '_ {
        self.0.iter().map(|test| test.index)
    }
}

impl<'s> FromIterator<FlatTest<'s>> for FlatSequence<'s> {
    fn from_iter<I: IntoIterator<Item = FlatTest<'s>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'s> IntoIterator for FlatSequence<'s> {
    type Item = FlatTest<'s>;
    type IntoIter = vec::IntoIter<FlatTest<'s>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, 's> IntoIterator for &'a FlatSequence<'s> {
    type Item = &'a FlatTest<'s>;
    type IntoIter = slice::Iter<'a, FlatTest<'s>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
