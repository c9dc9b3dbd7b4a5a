use atoll_core::{CategoryId, HierarchyError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryStoreError {
    #[error("category {id} does not exist")]
    UnknownCategory { id: CategoryId },
    #[error("category name `{name}` must be alphanumeric")]
    InvalidName { name: String },
    #[error("a category with slug `{slug}` already exists")]
    DuplicateName { slug: String },
    #[error("the root category cannot be moved or removed")]
    RootIsFixed,
    #[error("category {id} cannot be reparented under its own descendant {parent}")]
    ParentInsideSubtree {
        id: CategoryId,
        parent: CategoryId,
    },
    #[error("the root category cannot take part in a similarity")]
    RootSimilarity,
    #[error("a category cannot be similar to itself")]
    SelfSimilarity,
    #[error("a similarity between {one} and {two} already exists")]
    DuplicateSimilarity { one: CategoryId, two: CategoryId },
    #[error("no similarity between {one} and {two}")]
    UnknownSimilarity { one: CategoryId, two: CategoryId },
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
}
