use std::{borrow::Cow, collections::BTreeSet, panic::RefUnwindSafe};

use crate::{
    TestHarness,
    filter::NoFilter,
    listener::NoListener,
    panic::DefaultPanicHandler,
    suite::{Suite, SuiteNode},
    test::{Test, TestFn, TestFnHandle, TestMeta},
};

pub struct BuildTest {
    pub func: TestFnHandle,
    pub name: Cow<'static, str>,
    pub data_set: Option<usize>,
    pub groups: Tags,
}

impl Default for BuildTest {
    fn default() -> Self {
        Self {
            func: TestFnHandle::Static(&|| ()),
            name: Default::default(),
            data_set: Default::default(),
            groups: Default::default(),
        }
    }
}

impl From<BuildTest> for Test {
    fn from(value: BuildTest) -> Self {
        Test::new(
            value.func,
            TestMeta {
                name: value.name,
                data_set: value.data_set,
                groups: value.groups.0,
            },
        )
    }
}

#[derive(Default)]
pub struct BuildSuite {
    pub name: Cow<'static, str>,
    pub groups: Tags,
    pub children: Vec<SuiteNode>,
}

impl From<BuildSuite> for Suite {
    fn from(value: BuildSuite) -> Self {
        Suite {
            name: value.name,
            groups: value.groups.0,
            children: value.children,
        }
    }
}

#[derive(Default)]
pub struct Tags(BTreeSet<Cow<'static, str>>);

impl<const N: usize> From<[&'static str; N]> for Tags {
    fn from(value: [&'static str; N]) -> Self {
        Self(value.into_iter().map(Cow::Borrowed).collect())
    }
}

impl<F> From<F> for TestFnHandle
where
    F: TestFn + Send + Sync + RefUnwindSafe + 'static,
{
    fn from(value: F) -> Self {
        TestFnHandle::Owned(Box::new(value))
    }
}

macro_rules! test {
    {$($field:ident: $value:expr),* $(,)?} => {
        $crate::test::Test::from($crate::test_support::BuildTest {
            $($field: From::from($value),)*
            ..($crate::test_support::BuildTest {
                name: concat!(module_path!(), "::", file!(), ":", line!(), ":", column!()).into(),
                ..Default::default()
            })
        })
    };
}

pub(crate) use test;

macro_rules! suite {
    {
        name: $name:expr
        $(, groups: $groups:expr)?
        , children: [$($child:expr),* $(,)?] $(,)?
    } => {
        $crate::suite::Suite::from($crate::test_support::BuildSuite {
            name: From::from($name),
            $(groups: From::from($groups),)?
            children: vec![$($crate::suite::SuiteNode::from($child)),*],
            ..Default::default()
        })
    };
}

pub(crate) use suite;

/// A flat suite holding `names` in order, handy for filter tests.
pub fn flat_suite(names: &[&'static str]) -> Suite {
    Suite::new("flat").extend_children(names.iter().map(|name| {
        Test::new(TestFnHandle::default(), TestMeta::new(*name))
    }))
}

pub fn harness(suite: &Suite) -> TestHarness<'_, NoFilter, NoListener, DefaultPanicHandler> {
    TestHarness {
        suite,
        filter: NoFilter,
        listener: NoListener,
        panic_handler: DefaultPanicHandler,
    }
}
