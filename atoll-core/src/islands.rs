//! Connected-component ("island") computation over the similarity graph.
//!
//! The engine builds an undirected graph over every non-root category from
//! the stored similarity edges and partitions it with depth-first search. A
//! category with no edges is its own singleton island; islands partition the
//! non-root set. The dense index over categories is rebuilt for each call and
//! discarded afterwards; nothing is cached between invocations.

use std::collections::HashMap;

use tracing::{instrument, warn};

use crate::{
    category::{Category, CategoryId, LabelMode, label_of},
    store::CategoryStore,
};

/// Per-call adjacency over the non-root categories.
///
/// Categories are assigned dense indices in store enumeration order; the
/// island walk runs entirely on indices and only projects to labels once the
/// partition is final.
struct IslandIndex {
    categories: Vec<Category>,
    adjacency: Vec<Vec<usize>>,
    index_of: HashMap<CategoryId, usize>,
}

impl IslandIndex {
    fn build<S: CategoryStore>(store: &S, root: CategoryId) -> Self {
        let categories = store.categories_below_root(root);
        let index_of: HashMap<CategoryId, usize> = categories
            .iter()
            .enumerate()
            .map(|(index, category)| (category.id(), index))
            .collect();
        let mut adjacency = vec![Vec::new(); categories.len()];
        for (one, two) in store.similarities() {
            match (index_of.get(&one), index_of.get(&two)) {
                (Some(&left), Some(&right)) => {
                    adjacency[left].push(right);
                    adjacency[right].push(left);
                }
                _ => {
                    // Contract violation tolerated: a consistent snapshot
                    // never stores an edge touching the root or a missing id.
                    warn!(%one, %two, "skipping similarity edge with unresolved endpoint");
                }
            }
        }
        Self {
            categories,
            adjacency,
            index_of,
        }
    }

    /// Depth-first partition of the indices into connected components.
    fn components(&self) -> Vec<Vec<usize>> {
        let mut visited = vec![false; self.categories.len()];
        let mut components = Vec::new();
        for start in 0..self.categories.len() {
            if visited[start] {
                continue;
            }
            let mut component = Vec::new();
            let mut stack = vec![start];
            visited[start] = true;
            while let Some(index) = stack.pop() {
                component.push(index);
                for &neighbour in &self.adjacency[index] {
                    if !visited[neighbour] {
                        visited[neighbour] = true;
                        stack.push(neighbour);
                    }
                }
            }
            components.push(component);
        }
        components
    }
}

/// Computes the similarity islands visible from `node`.
///
/// Queried from the root, every island over the non-root categories is
/// returned; queried from any other category, only the island containing it.
/// Labels are sorted lexically within each island and islands are sorted
/// sequence-wise, so equal stores always render equal output. An empty store
/// yields an empty list.
#[instrument(
    name = "islands.compute",
    skip(store, node),
    fields(store = %store.name(), node = %node.id(), mode = ?mode),
)]
#[must_use]
pub fn islands<S: CategoryStore>(
    store: &S,
    root: CategoryId,
    node: &Category,
    mode: LabelMode,
) -> Vec<Vec<String>> {
    let index = IslandIndex::build(store, root);
    let mut components = index.components();
    if node.id() != root {
        // Components are disjoint, so at most one survives the filter.
        let position = index.index_of.get(&node.id());
        components.retain(|component| {
            position.is_some_and(|target| component.contains(target))
        });
    }

    let mut labelled: Vec<Vec<String>> = components
        .into_iter()
        .map(|component| {
            let mut labels: Vec<String> = component
                .into_iter()
                .map(|it| label_of(&index.categories[it], mode))
                .collect();
            labels.sort_unstable();
            labels
        })
        .collect();
    labelled.sort_unstable();
    labelled
}

#[cfg(test)]
mod tests {
    use atoll_test_support::tracing::RecordingLayer;
    use rstest::rstest;
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;

    use super::*;
    use crate::test_utils::{FixtureStore, ancestry_fixture, flat_fixture};

    fn names(islands: &[Vec<String>]) -> Vec<Vec<&str>> {
        islands
            .iter()
            .map(|island| island.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn empty_store_yields_no_islands() {
        let mut store = FixtureStore::new();
        store.add(0, "root", None);
        let result = islands(&store, store.root(), &store.category(0), LabelMode::ByName);
        assert!(result.is_empty());
    }

    #[test]
    fn isolated_categories_form_sorted_singletons() {
        let store = flat_fixture(5);
        let result = islands(&store, store.root(), &store.category(0), LabelMode::ByName);
        assert_eq!(
            names(&result),
            vec![
                vec!["Category 1"],
                vec!["Category 2"],
                vec!["Category 3"],
                vec!["Category 4"],
                vec!["Category 5"],
            ],
        );
    }

    #[test]
    fn edges_merge_islands_and_order_is_deterministic() {
        let mut store = flat_fixture(5);
        store.link(1, 2);
        store.link(3, 4);
        store.link(4, 5);
        let result = islands(&store, store.root(), &store.category(0), LabelMode::ByName);
        assert_eq!(
            names(&result),
            vec![
                vec!["Category 1", "Category 2"],
                vec!["Category 3", "Category 4", "Category 5"],
            ],
        );

        store.link(1, 5);
        let result = islands(&store, store.root(), &store.category(0), LabelMode::ByName);
        assert_eq!(
            names(&result),
            vec![vec![
                "Category 1",
                "Category 2",
                "Category 3",
                "Category 4",
                "Category 5",
            ]],
        );
    }

    #[test]
    fn fully_linked_forest_is_one_island() {
        let mut store = ancestry_fixture();
        for (a, b) in [(1, 2), (1, 4), (3, 5), (5, 2), (4, 6), (6, 7), (7, 8), (8, 1)] {
            store.link(a, b);
        }
        let result = islands(&store, store.root(), &store.category(0), LabelMode::ByName);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].len(), 8);
    }

    #[rstest]
    #[case(1, vec!["Category 1", "Category 2"])]
    #[case(2, vec!["Category 1", "Category 2"])]
    #[case(3, vec!["Category 3", "Category 4", "Category 5"])]
    #[case(5, vec!["Category 3", "Category 4", "Category 5"])]
    fn non_root_queries_see_only_their_island(#[case] node: u64, #[case] expected: Vec<&str>) {
        let mut store = flat_fixture(5);
        store.link(1, 2);
        store.link(3, 4);
        store.link(4, 5);
        let result = islands(&store, store.root(), &store.category(node), LabelMode::ByName);
        assert_eq!(names(&result), vec![expected]);
    }

    #[test]
    fn islands_partition_the_non_root_set() {
        let mut store = ancestry_fixture();
        store.link(1, 2);
        store.link(5, 7);
        let result = islands(&store, store.root(), &store.category(0), LabelMode::ByName);
        let mut seen: Vec<&str> = result.iter().flatten().map(String::as_str).collect();
        seen.sort_unstable();
        let total: usize = result.iter().map(Vec::len).sum();
        assert_eq!(seen.len(), total, "islands must be pairwise disjoint");
        assert_eq!(seen.len(), 8, "every non-root category appears exactly once");
    }

    #[test]
    fn by_link_islands_render_anchor_labels() {
        let store = flat_fixture(1);
        let result = islands(&store, store.root(), &store.category(0), LabelMode::ByLink);
        assert_eq!(
            names(&result),
            vec![vec!["<a href='/categories/1/category-1'>Category 1</a>"]],
        );
    }

    #[test]
    fn unresolved_edge_endpoints_are_skipped_with_a_warning() {
        let mut store = flat_fixture(2);
        // Edges a consistent snapshot never stores: one touches the root,
        // one references a missing id.
        store.link(0, 1);
        store.link(2, 99);

        let layer = RecordingLayer::default();
        let subscriber = tracing_subscriber::registry().with(layer.clone());
        let result = tracing::subscriber::with_default(subscriber, || {
            islands(&store, store.root(), &store.category(0), LabelMode::ByName)
        });
        assert_eq!(
            names(&result),
            vec![vec!["Category 1"], vec!["Category 2"]],
            "skipped edges must not merge any islands",
        );

        let warnings: Vec<_> = layer
            .events()
            .into_iter()
            .filter(|event| event.level == Level::WARN)
            .collect();
        assert_eq!(warnings.len(), 2, "one warning per skipped edge");
        assert!(warnings.iter().all(|event| {
            event
                .fields
                .get("message")
                .is_some_and(|message| message == "skipping similarity edge with unresolved endpoint")
        }));
        assert!(warnings.iter().any(|event| {
            event.fields.get("one").is_some_and(|value| value == "0")
        }));
        assert!(warnings.iter().any(|event| {
            event.fields.get("two").is_some_and(|value| value == "99")
        }));
    }

    #[test]
    fn duplicate_and_mirror_edges_do_not_change_the_partition() {
        let mut store = flat_fixture(3);
        store.link(1, 2);
        store.link(2, 1);
        store.link(1, 2);
        let result = islands(&store, store.root(), &store.category(0), LabelMode::ByName);
        assert_eq!(
            names(&result),
            vec![vec!["Category 1", "Category 2"], vec!["Category 3"]],
        );
    }
}
