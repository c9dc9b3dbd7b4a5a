//! Atoll core library: structural queries over a category forest augmented
//! with an undirected similarity relation.
//!
//! The crate turns a parent-pointer forest plus a similarity edge list into
//! ancestry chains, sibling sets, nested trees, subtree identifier sets, and
//! similarity islands. Storage is an external collaborator behind
//! [`CategoryStore`]; this crate never persists, renders, or validates input
//! beyond guarding against cyclic snapshots.

mod ancestry;
mod category;
mod error;
mod islands;
mod store;
mod tree;

#[cfg(test)]
mod test_utils;

pub use crate::{
    ancestry::{children_of, parents_of, siblings_of, similar_to},
    category::{Category, CategoryId, LabelMode, label_of},
    error::{HierarchyError, HierarchyErrorCode, Result, StoreError, StoreErrorCode},
    islands::islands,
    store::CategoryStore,
    tree::{LabelTree, build_tree, tree_node_ids},
};
