//! Property-based tests over randomly generated forests and edge sets.

mod common;

use std::collections::HashSet;

use atoll_core::{CategoryStore, LabelMode, islands, parents_of, tree_node_ids};
use common::Forest;
use proptest::prelude::*;

/// Synthesises an acyclic forest: category `i` picks its parent from the
/// categories created before it (or the root), so parent chains always
/// terminate. Edge seeds are folded onto the non-root id range.
fn forest_strategy() -> impl Strategy<Value = Forest> {
    (1_u64..=24)
        .prop_flat_map(|count| {
            (
                Just(count),
                prop::collection::vec(any::<u64>(), count as usize),
                prop::collection::vec((any::<u64>(), any::<u64>()), 0..=48),
            )
        })
        .prop_map(|(count, parent_seeds, edge_seeds)| {
            let mut forest = Forest::with_root("root");
            for (index, seed) in parent_seeds.iter().enumerate() {
                let id = index as u64 + 1;
                // Any id strictly below `id` is already present.
                let parent = seed % id;
                forest.add(id, &format!("Category {id:02}"), Some(parent));
            }
            for (left, right) in edge_seeds {
                let a = left % count + 1;
                let b = right % count + 1;
                if a != b {
                    forest.link(a, b);
                }
            }
            forest
        })
}

proptest! {
    #[test]
    fn islands_partition_the_non_root_set(forest in forest_strategy()) {
        let root = forest.category(0);
        let result = islands(&forest, forest.root(), &root, LabelMode::ByName);

        let labels: Vec<&String> = result.iter().flatten().collect();
        let distinct: HashSet<&String> = labels.iter().copied().collect();
        prop_assert_eq!(labels.len(), distinct.len(), "islands must be disjoint");

        let expected: HashSet<String> = forest
            .categories_below_root(forest.root())
            .into_iter()
            .map(|category| category.name().to_owned())
            .collect();
        let covered: HashSet<String> = labels.into_iter().cloned().collect();
        prop_assert_eq!(covered, expected, "the union must cover every non-root category");
    }

    #[test]
    fn island_output_is_deterministic(forest in forest_strategy()) {
        let root = forest.category(0);
        let first = islands(&forest, forest.root(), &root, LabelMode::ByName);
        let second = islands(&forest, forest.root(), &root, LabelMode::ByName);
        prop_assert_eq!(&first, &second);
        for island in &first {
            prop_assert!(island.is_sorted(), "labels must be sorted within an island");
        }
        prop_assert!(first.is_sorted(), "islands must be sorted sequence-wise");
    }

    #[test]
    fn parent_chains_terminate_at_the_root(forest in forest_strategy()) {
        for category in forest.categories() {
            let parents = parents_of(&forest, &category).expect("forest is acyclic");
            if category.id() != forest.root() {
                prop_assert_eq!(parents.first().map(atoll_core::Category::id), Some(forest.root()));
            } else {
                prop_assert!(parents.is_empty());
            }
        }
    }

    #[test]
    fn subtree_sets_nest_along_parent_chains(forest in forest_strategy()) {
        for category in forest.categories() {
            let own = tree_node_ids(&forest, &category).expect("subtree resolves");
            prop_assert!(own.contains(&category.id()));
            for ancestor in parents_of(&forest, &category).expect("forest is acyclic") {
                let outer = tree_node_ids(&forest, &ancestor).expect("subtree resolves");
                prop_assert!(own.is_subset(&outer));
            }
        }
    }
}
