//! The in-memory store and its write-path validation.

use std::collections::BTreeMap;

use atoll_core::{Category, CategoryId, CategoryStore, StoreError, tree_node_ids};

use crate::errors::MemoryStoreError;

/// Mutable category store backed by ordered maps.
///
/// Enumeration order is identifier order, which equals creation order, so
/// query output over an unchanged store is reproducible. The root is created
/// with the store and always carries id `0`.
///
/// # Examples
/// ```
/// use atoll_core::{CategoryStore, LabelMode, islands};
/// use atoll_providers_memory::MemoryStore;
///
/// let mut store = MemoryStore::new("root")?;
/// let books = store.create("Books", store.root())?;
/// let music = store.create("Music", store.root())?;
/// store.link(books, music)?;
///
/// let root = store.get(store.root())?;
/// let result = islands(&store, store.root(), &root, LabelMode::ByName);
/// assert_eq!(result, vec![vec!["Books".to_owned(), "Music".to_owned()]]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct MemoryStore {
    categories: BTreeMap<CategoryId, Category>,
    similarities: Vec<(CategoryId, CategoryId)>,
    root: CategoryId,
    next_id: u64,
}

impl MemoryStore {
    /// Creates a store holding only the root category.
    ///
    /// # Errors
    /// Returns [`MemoryStoreError::InvalidName`] when the root name fails
    /// validation.
    pub fn new(root_name: &str) -> Result<Self, MemoryStoreError> {
        let name = normalise_name(root_name)?;
        let slug = slugify(&name);
        let root = CategoryId::new(0);
        let mut categories = BTreeMap::new();
        categories.insert(root, Category::new(root, name, slug, None));
        Ok(Self {
            categories,
            similarities: Vec::new(),
            root,
            next_id: 1,
        })
    }

    /// Returns the root identifier.
    #[must_use]
    pub fn root(&self) -> CategoryId {
        self.root
    }

    /// Creates a category under `parent` and returns its identifier.
    ///
    /// The name has its whitespace collapsed and must be alphanumeric
    /// (spaces, hyphens, and underscores allowed); the derived slug must be
    /// unique across the store.
    ///
    /// # Errors
    /// Returns [`MemoryStoreError::InvalidName`], [`MemoryStoreError::
    /// DuplicateName`], or [`MemoryStoreError::UnknownCategory`].
    pub fn create(&mut self, name: &str, parent: CategoryId) -> Result<CategoryId, MemoryStoreError> {
        let name = normalise_name(name)?;
        let slug = slugify(&name);
        self.ensure_exists(parent)?;
        self.ensure_slug_free(&slug, None)?;
        let id = CategoryId::new(self.next_id);
        self.next_id += 1;
        self.categories
            .insert(id, Category::new(id, name, slug, Some(parent)));
        Ok(id)
    }

    /// Renames a category, revalidating the name and slug.
    ///
    /// # Errors
    /// Same conditions as [`MemoryStore::create`].
    pub fn rename(&mut self, id: CategoryId, name: &str) -> Result<(), MemoryStoreError> {
        let name = normalise_name(name)?;
        let slug = slugify(&name);
        let current = self.lookup(id)?.clone();
        self.ensure_slug_free(&slug, Some(id))?;
        self.categories
            .insert(id, Category::new(id, name, slug, current.parent()));
        Ok(())
    }

    /// Moves a category under a new parent.
    ///
    /// The root is immovable, and the new parent must not lie inside the
    /// category's own subtree (that would detach the subtree into a cycle).
    ///
    /// # Errors
    /// Returns [`MemoryStoreError::RootIsFixed`], [`MemoryStoreError::
    /// UnknownCategory`], or [`MemoryStoreError::ParentInsideSubtree`].
    pub fn reparent(&mut self, id: CategoryId, parent: CategoryId) -> Result<(), MemoryStoreError> {
        if id == self.root {
            return Err(MemoryStoreError::RootIsFixed);
        }
        let current = self.lookup(id)?.clone();
        self.ensure_exists(parent)?;
        let subtree = tree_node_ids(self, &current)?;
        if subtree.contains(&parent) {
            return Err(MemoryStoreError::ParentInsideSubtree { id, parent });
        }
        self.categories.insert(
            id,
            Category::new(id, current.name(), current.slug(), Some(parent)),
        );
        Ok(())
    }

    /// Removes a category.
    ///
    /// Its direct children fall back to the root and every similarity edge
    /// touching it is dropped.
    ///
    /// # Errors
    /// Returns [`MemoryStoreError::RootIsFixed`] for the root and
    /// [`MemoryStoreError::UnknownCategory`] for an unknown id.
    pub fn remove(&mut self, id: CategoryId) -> Result<(), MemoryStoreError> {
        if id == self.root {
            return Err(MemoryStoreError::RootIsFixed);
        }
        self.lookup(id)?;
        self.categories.remove(&id);
        let orphans: Vec<Category> = self
            .categories
            .values()
            .filter(|category| category.parent() == Some(id))
            .cloned()
            .collect();
        for orphan in orphans {
            self.categories.insert(
                orphan.id(),
                Category::new(orphan.id(), orphan.name(), orphan.slug(), Some(self.root)),
            );
        }
        self.similarities
            .retain(|&(one, two)| one != id && two != id);
        Ok(())
    }

    /// Records a similarity edge between two non-root categories.
    ///
    /// # Errors
    /// Returns [`MemoryStoreError::SelfSimilarity`], [`MemoryStoreError::
    /// RootSimilarity`], [`MemoryStoreError::DuplicateSimilarity`] (either
    /// orientation), or [`MemoryStoreError::UnknownCategory`].
    pub fn link(&mut self, one: CategoryId, two: CategoryId) -> Result<(), MemoryStoreError> {
        if one == two {
            return Err(MemoryStoreError::SelfSimilarity);
        }
        if one == self.root || two == self.root {
            return Err(MemoryStoreError::RootSimilarity);
        }
        self.lookup(one)?;
        self.lookup(two)?;
        if self.has_edge(one, two) {
            return Err(MemoryStoreError::DuplicateSimilarity { one, two });
        }
        self.similarities.push((one, two));
        Ok(())
    }

    /// Removes the similarity edge between two categories, either orientation.
    ///
    /// # Errors
    /// Returns [`MemoryStoreError::UnknownSimilarity`] when no such edge is
    /// stored.
    pub fn unlink(&mut self, one: CategoryId, two: CategoryId) -> Result<(), MemoryStoreError> {
        if !self.has_edge(one, two) {
            return Err(MemoryStoreError::UnknownSimilarity { one, two });
        }
        self.similarities
            .retain(|&(a, b)| (a, b) != (one, two) && (a, b) != (two, one));
        Ok(())
    }

    fn has_edge(&self, one: CategoryId, two: CategoryId) -> bool {
        self.similarities
            .iter()
            .any(|&(a, b)| (a, b) == (one, two) || (a, b) == (two, one))
    }

    fn lookup(&self, id: CategoryId) -> Result<&Category, MemoryStoreError> {
        self.categories
            .get(&id)
            .ok_or(MemoryStoreError::UnknownCategory { id })
    }

    fn ensure_exists(&self, id: CategoryId) -> Result<(), MemoryStoreError> {
        self.lookup(id).map(|_| ())
    }

    fn ensure_slug_free(
        &self,
        slug: &str,
        exclude: Option<CategoryId>,
    ) -> Result<(), MemoryStoreError> {
        let taken = self
            .categories
            .values()
            .any(|category| category.slug() == slug && Some(category.id()) != exclude);
        if taken {
            return Err(MemoryStoreError::DuplicateName {
                slug: slug.to_owned(),
            });
        }
        Ok(())
    }
}

impl CategoryStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn categories(&self) -> Vec<Category> {
        self.categories.values().cloned().collect()
    }

    fn get(&self, id: CategoryId) -> Result<Category, StoreError> {
        self.categories
            .get(&id)
            .cloned()
            .ok_or(StoreError::UnknownCategory { id })
    }

    fn children(&self, id: CategoryId) -> Result<Vec<Category>, StoreError> {
        if !self.categories.contains_key(&id) {
            return Err(StoreError::UnknownCategory { id });
        }
        Ok(self
            .categories
            .values()
            .filter(|category| category.parent() == Some(id))
            .cloned()
            .collect())
    }

    fn similarities(&self) -> Vec<(CategoryId, CategoryId)> {
        self.similarities.clone()
    }
}

/// Collapses whitespace runs and validates the character set.
pub(crate) fn normalise_name(raw: &str) -> Result<String, MemoryStoreError> {
    let name = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, ' ' | '_' | '-'));
    if !valid {
        return Err(MemoryStoreError::InvalidName {
            name: raw.to_owned(),
        });
    }
    Ok(name)
}

/// Derives the URL slug: lowercase, separator runs collapsed to hyphens.
pub(crate) fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else if matches!(ch, ' ' | '-') {
            pending_separator = true;
        }
    }
    slug
}
