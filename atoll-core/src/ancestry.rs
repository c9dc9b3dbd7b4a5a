//! Ancestor, sibling, and similarity-partner walks over the category forest.
//!
//! These are the one-dimensional queries: they follow either the parent
//! pointer upward or the children index one level down. Acyclicity of the
//! parent chain is a store contract; the walk still carries a visited-guard
//! so a corrupted snapshot surfaces as [`HierarchyError::MalformedHierarchy`]
//! instead of looping forever.

use std::collections::HashSet;

use crate::{
    category::Category,
    error::{HierarchyError, Result},
    store::CategoryStore,
};

/// Returns the ancestor chain of `node`, root first, immediate parent last.
///
/// The root itself has no ancestors and yields an empty vector. The length of
/// the chain equals the node's depth in the forest.
///
/// # Errors
/// Returns [`HierarchyError::MalformedHierarchy`] when the parent chain
/// revisits a category, and propagates [`crate::StoreError`] for dangling
/// parent pointers.
pub fn parents_of<S: CategoryStore>(store: &S, node: &Category) -> Result<Vec<Category>> {
    let mut seen = HashSet::from([node.id()]);
    let mut chain = Vec::new();
    let mut next = node.parent();
    while let Some(id) = next {
        if !seen.insert(id) {
            return Err(HierarchyError::MalformedHierarchy { at: id });
        }
        let parent = store.get(id)?;
        next = parent.parent();
        chain.push(parent);
    }
    chain.reverse();
    Ok(chain)
}

/// Returns the categories sharing `node`'s parent, excluding `node` itself.
///
/// The root has no parent and therefore no siblings. Order is unspecified.
///
/// # Errors
/// Propagates [`crate::StoreError`] when the parent does not resolve.
pub fn siblings_of<S: CategoryStore>(store: &S, node: &Category) -> Result<Vec<Category>> {
    let Some(parent) = node.parent() else {
        return Ok(Vec::new());
    };
    Ok(store
        .children(parent)?
        .into_iter()
        .filter(|sibling| sibling.id() != node.id())
        .collect())
}

/// Returns the direct children of `node`, one level only.
///
/// # Errors
/// Propagates [`crate::StoreError`] when `node` does not resolve.
pub fn children_of<S: CategoryStore>(store: &S, node: &Category) -> Result<Vec<Category>> {
    Ok(store.children(node.id())?)
}

/// Returns the categories linked to `node` by a similarity edge.
///
/// Edges are unordered: a partner is reported whichever side of the stored
/// pair `node` occupies. Order is unspecified; the root never has edges in a
/// valid store.
///
/// # Errors
/// Propagates [`crate::StoreError`] when a partner endpoint does not resolve.
pub fn similar_to<S: CategoryStore>(store: &S, node: &Category) -> Result<Vec<Category>> {
    let mut partners = Vec::new();
    for (one, two) in store.similarities() {
        let partner = if one == node.id() {
            two
        } else if two == node.id() {
            one
        } else {
            continue;
        };
        partners.push(store.get(partner)?);
    }
    Ok(partners)
}
