//! In-memory category store with the validation rules the core assumes.
//!
//! The core treats storage as an external collaborator behind
//! `atoll_core::CategoryStore`; this crate provides the reference
//! implementation. Writes enforce the invariants the query core takes for
//! granted: unique slugs, alphanumeric names, an immovable root, no
//! reparenting into a category's own subtree, and no self-loop, duplicate,
//! or mirror similarity edges.

mod errors;
mod ingest;
mod store;

pub use errors::MemoryStoreError;
pub use ingest::{CategoryRecord, TaxonomyDoc, TaxonomyError};
pub use store::MemoryStore;

#[cfg(test)]
mod tests;
