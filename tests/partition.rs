use std::collections::BTreeSet;

use kishard::{
    FilterOptions,
    filter::FilterChain,
    suite::Suite,
    test::{Test, TestFnHandle, TestMeta},
};
use proptest::prelude::*;

static GROUPS: [&str; 3] = ["db", "slow", "api"];

/// A suite with one nested suite per group and `tags[i]` selecting the groups of test `i`.
fn suite(tags: &[u8]) -> Suite {
    let mut root = Suite::new("root");
    for (chunk_index, chunk) in tags.chunks(4).enumerate() {
        let mut nested = Suite::new(format!("chunk{chunk_index}"));
        for (offset, mask) in chunk.iter().enumerate() {
            let groups = GROUPS
                .iter()
                .enumerate()
                .filter(|(bit, _)| mask & (1 << bit) != 0)
                .map(|(_, group)| *group);
            let name = format!("test{}", chunk_index * 4 + offset);
            nested = nested.with_child(Test::new(
                TestFnHandle::default(),
                TestMeta::new(name).with_groups(groups),
            ));
        }
        root = root.with_child(nested);
    }
    root
}

fn options() -> impl Strategy<Value = FilterOptions> {
    (
        proptest::sample::subsequence(GROUPS.to_vec(), 0..=1),
        proptest::sample::subsequence(GROUPS.to_vec(), 0..=1),
        proptest::option::of(prop_oneof![Just("1"), Just("test[0-4]$"), Just("TEST")]),
    )
        .prop_map(|(groups, exclude_groups, filter)| {
            let options = FilterOptions::new()
                .extend_groups(groups)
                .extend_exclude_groups(exclude_groups);
            match filter {
                Some(filter) => options.with_filter(filter),
                None => options,
            }
        })
}

proptest! {
    /// Running the same chain once per node runs every surviving test exactly once.
    #[test]
    fn nodes_partition_the_filtered_suite(
        tags in proptest::collection::vec(0u8..8, 0..24),
        options in options(),
        total_nodes in 1usize..6,
    ) {
        let suite = suite(&tags);
        let unsharded: Vec<usize> = FilterChain::from_options(&options)
            .unwrap()
            .run(&suite)
            .indices()
            .collect();

        let mut seen = BTreeSet::new();
        for node in 0..total_nodes {
            let chain = FilterChain::from_options(&options.clone().with_shard(node, total_nodes))
                .unwrap();
            let selected: Vec<usize> = chain.run(&suite).indices().collect();

            prop_assert!(selected.windows(2).all(|pair| pair[0] < pair[1]));
            let expected: Vec<usize> = unsharded
                .iter()
                .copied()
                .enumerate()
                .filter(|(ordinal, _)| ordinal % total_nodes == node)
                .map(|(_, index)| index)
                .collect();
            prop_assert_eq!(&selected, &expected);

            for index in selected {
                prop_assert!(seen.insert(index));
            }
        }

        prop_assert_eq!(seen.into_iter().collect::<Vec<_>>(), unsharded);
    }

    /// A single node is the same as no sharding at all.
    #[test]
    fn one_node_changes_nothing(
        tags in proptest::collection::vec(0u8..8, 0..24),
        options in options(),
    ) {
        let suite = suite(&tags);
        let plain = FilterChain::from_options(&options).unwrap().run(&suite);
        let sharded = FilterChain::from_options(&options.clone().with_shard(0, 1))
            .unwrap()
            .run(&suite);

        prop_assert_eq!(plain, sharded);
    }
}

#[test]
fn group_filters_agree_on_shared_tags() {
    let suite = Suite::new("root").with_child(Test::new(
        TestFnHandle::default(),
        TestMeta::new("tagged").with_groups(["a", "b"]),
    ));

    let included = FilterChain::from_options(&FilterOptions::new().extend_groups(["b", "c"]))
        .unwrap()
        .run(&suite);
    let excluded =
        FilterChain::from_options(&FilterOptions::new().extend_exclude_groups(["b", "c"]))
            .unwrap()
            .run(&suite);

    assert_eq!(included.len(), 1);
    assert!(excluded.is_empty());
}
