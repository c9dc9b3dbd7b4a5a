//! Storage collaborator contract for the atoll core.
//!
//! The core never persists anything itself; it consumes a consistent read
//! snapshot of categories and similarity edges through this trait. Mutating
//! operations (create, reparent, link, ...) belong to concrete store
//! implementations such as the in-memory provider.

use crate::{
    category::{Category, CategoryId},
    error::StoreError,
};

/// Abstraction over a snapshot of category nodes and similarity edges.
///
/// Implementations must hand the core a consistent snapshot: every parent
/// pointer and similarity endpoint resolves, parent chains are acyclic, and
/// the snapshot does not mutate mid-computation. The core treats similarity
/// pairs as unordered regardless of stored orientation.
///
/// # Examples
/// ```
/// use atoll_core::{Category, CategoryId, CategoryStore, StoreError};
///
/// struct Flat(Vec<Category>);
///
/// impl CategoryStore for Flat {
///     fn name(&self) -> &str { "flat" }
///     fn categories(&self) -> Vec<Category> { self.0.clone() }
///     fn get(&self, id: CategoryId) -> Result<Category, StoreError> {
///         self.0.iter().find(|c| c.id() == id).cloned()
///             .ok_or(StoreError::UnknownCategory { id })
///     }
///     fn children(&self, id: CategoryId) -> Result<Vec<Category>, StoreError> {
///         self.get(id)?;
///         Ok(self.0.iter().filter(|c| c.parent() == Some(id)).cloned().collect())
///     }
///     fn similarities(&self) -> Vec<(CategoryId, CategoryId)> { Vec::new() }
/// }
///
/// let root = Category::new(CategoryId::new(0), "root", "root", None);
/// let leaf = Category::new(CategoryId::new(1), "Books", "books", Some(root.id()));
/// let store = Flat(vec![root.clone(), leaf.clone()]);
/// assert_eq!(store.len(), 2);
/// assert_eq!(store.children(root.id())?, vec![leaf.clone()]);
/// assert_eq!(store.categories_below_root(root.id()), vec![leaf]);
/// # Ok::<(), StoreError>(())
/// ```
pub trait CategoryStore {
    /// Returns a human-readable name identifying this store.
    fn name(&self) -> &str;

    /// Returns every category in the snapshot, root included.
    fn categories(&self) -> Vec<Category>;

    /// Resolves a category by identifier.
    ///
    /// # Errors
    /// Returns [`StoreError::UnknownCategory`] when `id` does not resolve.
    fn get(&self, id: CategoryId) -> Result<Category, StoreError>;

    /// Returns the direct children of a category, one level only.
    ///
    /// # Errors
    /// Returns [`StoreError::UnknownCategory`] when `id` does not resolve.
    fn children(&self, id: CategoryId) -> Result<Vec<Category>, StoreError>;

    /// Returns the similarity edges as stored, orientation unspecified.
    fn similarities(&self) -> Vec<(CategoryId, CategoryId)>;

    /// Returns every category except the designated root.
    ///
    /// The default implementation filters [`CategoryStore::categories`];
    /// implementations with a parent index may override it.
    #[must_use]
    fn categories_below_root(&self, root: CategoryId) -> Vec<Category> {
        self.categories()
            .into_iter()
            .filter(|category| category.id() != root)
            .collect()
    }

    /// Returns the number of categories in the snapshot.
    #[must_use]
    fn len(&self) -> usize {
        self.categories().len()
    }

    /// Returns whether the snapshot contains no categories.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
