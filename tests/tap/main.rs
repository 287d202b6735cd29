use kishard::{
    FilterOptions, harness,
    listener::TapListener,
    outcome::TestStatus,
    suite::Suite,
    test::{Test, TestFnHandle, TestMeta, TestResult},
};
use pretty_assertions::assert_eq;

fn case<T: Into<TestResult>>(
    name: &'static str,
    f: impl Fn() -> T + Send + Sync + std::panic::RefUnwindSafe + 'static,
) -> Test {
    Test::new(TestFnHandle::from_boxed(f), TestMeta::new(name))
}

fn passing(name: &'static str) -> Test {
    case(name, || ())
}

/// Run `suite` with `options` and return the TAP stream.
fn tap(suite: &Suite, options: &FilterOptions) -> String {
    let (report, listener) = harness(suite)
        .with_options(options)
        .unwrap()
        .with_listener(TapListener::new(Vec::new()))
        .run_into_parts();
    assert!(report.listener_errors.is_empty());
    String::from_utf8(listener.into_target()).unwrap()
}

#[test]
fn pass_failure_and_skip() {
    let suite = Suite::new("Suite")
        .with_child(passing("testA"))
        .with_child(case("testB", || {
            let holds = false;
            assert!(holds, "expected true, got false");
        }))
        .with_child(case("testC", || TestStatus::Skipped(None)));

    assert_eq!(
        tap(&suite, &FilterOptions::default()),
        "\
ok 1 - testA
not ok 2 - Failure: testB
  ---
message: 'expected true, got false'
severity: fail
  ...
ok 3 - # SKIP testC
1..3
"
    );
}

#[test]
fn each_node_numbers_its_own_shard() {
    let suite = Suite::new("Suite").extend_children(
        ["t0", "t1", "t2", "t3"].map(passing),
    );

    assert_eq!(
        tap(&suite, &FilterOptions::new().with_shard(0, 2)),
        "ok 1 - t0\nok 2 - t2\n1..2\n"
    );
    assert_eq!(
        tap(&suite, &FilterOptions::new().with_shard(1, 2)),
        "ok 1 - t1\nok 2 - t3\n1..2\n"
    );
}

#[test]
fn node_without_tests_prints_an_empty_plan() {
    let suite = Suite::new("Suite").with_child(passing("only"));

    assert_eq!(tap(&suite, &FilterOptions::new().with_shard(1, 3)), "1..0\n");
}

#[test]
fn errors_comparisons_and_output() {
    let suite = Suite::new("Suite")
        .with_child(
            Suite::new("Io").with_child(case("reads", || -> Result<(), String> {
                Err("no such file".into())
            })),
        )
        .with_child(case("compares", || std::assert_eq!(1 + 1, 3)))
        .with_child(case("talks", || {
            kishard::println!("hello");
            kishard::println!("world");
        }))
        .with_child(case("pending", || TestStatus::incomplete("soon")))
        .with_child(case("unsure", || TestStatus::risky("no assertions")));

    assert_eq!(
        tap(&suite, &FilterOptions::default()),
        "\
not ok 1 - Error: reads
not ok 2 - Failure: compares
  ---
message: 'assertion `left == right` failed'
severity: fail
data:
  got: '2'
  expected: '3'
  ...
ok 3 - talks
# hello
# world
not ok 4 - pending # TODO Incomplete Test
ok 5 - # RISKY no assertions
1..5
"
    );
}

#[test]
fn filters_run_before_sharding() {
    let suite = Suite::new("Suite")
        .with_child(
            Suite::new("Db")
                .with_groups(["db"])
                .extend_children(["Db::a", "Db::b", "Db::c"].map(passing)),
        )
        .with_child(
            Test::new(
                TestFnHandle::from_boxed(|| ()),
                TestMeta::new("Api::slow").with_groups(["slow"]),
            ),
        )
        .with_child(passing("Api::fast"));

    let options = FilterOptions::new()
        .extend_exclude_groups(["db"])
        .with_shard(0, 2);
    assert_eq!(tap(&suite, &options), "ok 1 - Api::slow\n1..1\n");

    let options = FilterOptions::new().extend_groups(["db"]).with_filter("a|c");
    assert_eq!(tap(&suite, &options), "ok 1 - Db::a\nok 2 - Db::c\n1..2\n");
}

#[test]
fn data_sets_are_described_and_selectable() {
    let suite = Suite::new("Suite").extend_children((0..4).map(|data_set| {
        Test::new(
            TestFnHandle::from_boxed(|| ()),
            TestMeta::new("Math::adds").with_data_set(data_set),
        )
    }));

    assert_eq!(
        tap(&suite, &FilterOptions::new().with_filter("adds#1-2")),
        "\
ok 1 - Math::adds with data set #1
ok 2 - Math::adds with data set #2
1..2
"
    );
}

#[test]
fn exit_code_follows_failures() {
    let good = Suite::new("Suite")
        .with_child(passing("ok"))
        .with_child(case("skipped", || TestStatus::skip("later")));
    let report = harness(&good)
        .with_listener(TapListener::new(Vec::new()))
        .run();
    assert!(report.is_success());
    assert_eq!(report.skipped(), 1);

    let bad = Suite::new("Suite").with_child(case("fails", || TestStatus::failure("nope")));
    let report = harness(&bad)
        .with_listener(TapListener::new(Vec::new()))
        .run();
    assert!(!report.is_success());
    assert_eq!(report.failed(), 1);
    assert_eq!(report.exit_code(), std::process::ExitCode::FAILURE);
}
