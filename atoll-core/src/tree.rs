//! Nested tree materialisation and subtree identifier collection.
//!
//! The tree is never stored: it is derived on every call from the current
//! parent pointers, so reparenting a category changes the next query's shape
//! immediately. Both walks use an explicit work stack over an arena snapshot
//! of the subtree rather than recursing, so deep hierarchies cannot exhaust
//! the call stack. Categories are joined by identifier throughout and only
//! projected to labels once the shape is final.

use std::collections::{BTreeMap, HashSet};
use std::mem;

use tracing::instrument;

use crate::{
    category::{Category, CategoryId, LabelMode, label_of},
    error::{HierarchyError, Result},
    store::CategoryStore,
};

/// A nested mapping from display label to subtree, empty at the leaves.
///
/// Structural equality is the intended comparison; sibling order within a
/// level follows label order and carries no meaning.
///
/// # Examples
/// ```
/// use atoll_core::LabelTree;
///
/// let tree: LabelTree = [("root".to_owned(), LabelTree::default())]
///     .into_iter()
///     .collect();
/// assert!(!tree.is_leaf());
/// assert!(tree.entries()["root"].is_leaf());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTree(BTreeMap<String, LabelTree>);

impl LabelTree {
    /// Returns the labelled subtrees one level down.
    #[must_use]
    pub fn entries(&self) -> &BTreeMap<String, LabelTree> {
        &self.0
    }

    /// Returns whether this tree has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, LabelTree)> for LabelTree {
    fn from_iter<I: IntoIterator<Item = (String, LabelTree)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Arena snapshot of a subtree: each entry holds a category and the arena
/// indices of its direct children. Children always follow their parent, so a
/// reverse scan visits every child before its parent.
fn collect_subtree<S: CategoryStore>(
    store: &S,
    node: &Category,
) -> Result<Vec<(Category, Vec<usize>)>> {
    let mut arena: Vec<(Category, Vec<usize>)> = vec![(node.clone(), Vec::new())];
    let mut seen = HashSet::from([node.id()]);
    let mut stack = vec![0_usize];
    while let Some(index) = stack.pop() {
        let children = store.children(arena[index].0.id())?;
        for child in children {
            if !seen.insert(child.id()) {
                return Err(HierarchyError::MalformedHierarchy { at: child.id() });
            }
            let child_index = arena.len();
            arena.push((child, Vec::new()));
            arena[index].1.push(child_index);
            stack.push(child_index);
        }
    }
    Ok(arena)
}

/// Materialises the nested tree rooted at `node` under the requested label
/// mode: `{ label(node): { label(child): ... } }`, terminating at leaves with
/// empty mappings.
///
/// Distinct categories rendering identical labels under [`LabelMode::ByName`]
/// collapse in the output; label uniqueness is the caller's concern.
///
/// # Errors
/// Returns [`HierarchyError::MalformedHierarchy`] when the children relation
/// revisits a category, and propagates [`crate::StoreError`] from the store.
#[instrument(
    name = "tree.build",
    err,
    skip(store, node),
    fields(store = %store.name(), node = %node.id(), mode = ?mode),
)]
pub fn build_tree<S: CategoryStore>(
    store: &S,
    node: &Category,
    mode: LabelMode,
) -> Result<LabelTree> {
    let arena = collect_subtree(store, node)?;
    let mut built: Vec<LabelTree> = vec![LabelTree::default(); arena.len()];
    for index in (0..arena.len()).rev() {
        let mut entries = BTreeMap::new();
        for &child in &arena[index].1 {
            let subtree = mem::take(&mut built[child]);
            entries.insert(label_of(&arena[child].0, mode), subtree);
        }
        built[index] = LabelTree(entries);
    }
    let subtree = mem::take(&mut built[0]);
    Ok(LabelTree(BTreeMap::from([(label_of(node, mode), subtree)])))
}

/// Collects the identifiers of `node` and every category below it.
///
/// The set always contains `node`'s own id. Validation layers use this to
/// forbid assigning a category a parent from within its own subtree.
///
/// # Errors
/// Returns [`HierarchyError::MalformedHierarchy`] when the children relation
/// revisits a category, and propagates [`crate::StoreError`] from the store.
pub fn tree_node_ids<S: CategoryStore>(
    store: &S,
    node: &Category,
) -> Result<HashSet<CategoryId>> {
    let mut ids = HashSet::from([node.id()]);
    let mut stack = vec![node.id()];
    while let Some(id) = stack.pop() {
        for child in store.children(id)? {
            if !ids.insert(child.id()) {
                return Err(HierarchyError::MalformedHierarchy { at: child.id() });
            }
            stack.push(child.id());
        }
    }
    Ok(ids)
}
