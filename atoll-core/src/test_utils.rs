//! Shared fixtures for atoll-core unit tests.

use crate::{
    category::{Category, CategoryId},
    error::StoreError,
    store::CategoryStore,
};

/// Minimal in-memory [`CategoryStore`] for exercising the query core.
///
/// Identifiers are assigned by the caller; `0` is the root by convention in
/// every fixture below.
pub(crate) struct FixtureStore {
    categories: Vec<Category>,
    similarities: Vec<(CategoryId, CategoryId)>,
}

impl FixtureStore {
    pub(crate) fn new() -> Self {
        Self {
            categories: Vec::new(),
            similarities: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, id: u64, name: &str, parent: Option<u64>) {
        let slug = name.to_ascii_lowercase().replace(' ', "-");
        self.categories.push(Category::new(
            CategoryId::new(id),
            name,
            slug,
            parent.map(CategoryId::new),
        ));
    }

    pub(crate) fn link(&mut self, a: u64, b: u64) {
        self.similarities
            .push((CategoryId::new(a), CategoryId::new(b)));
    }

    pub(crate) fn set_parent(&mut self, id: u64, parent: Option<u64>) {
        let slot = self
            .categories
            .iter_mut()
            .find(|category| category.id() == CategoryId::new(id))
            .expect("fixture category");
        *slot = Category::new(
            slot.id(),
            slot.name().to_owned(),
            slot.slug().to_owned(),
            parent.map(CategoryId::new),
        );
    }

    pub(crate) fn category(&self, id: u64) -> Category {
        self.get(CategoryId::new(id)).expect("fixture category")
    }

    pub(crate) fn root(&self) -> CategoryId {
        CategoryId::new(0)
    }
}

impl CategoryStore for FixtureStore {
    fn name(&self) -> &str {
        "fixture"
    }

    fn categories(&self) -> Vec<Category> {
        self.categories.clone()
    }

    fn get(&self, id: CategoryId) -> Result<Category, StoreError> {
        self.categories
            .iter()
            .find(|category| category.id() == id)
            .cloned()
            .ok_or(StoreError::UnknownCategory { id })
    }

    fn children(&self, id: CategoryId) -> Result<Vec<Category>, StoreError> {
        self.get(id)?;
        Ok(self
            .categories
            .iter()
            .filter(|category| category.parent() == Some(id))
            .cloned()
            .collect())
    }

    fn similarities(&self) -> Vec<(CategoryId, CategoryId)> {
        self.similarities.clone()
    }
}

/// The nine-node forest used across the query tests:
/// root -> {1, 2}; 1 -> {3}; 3 -> {5, 7}; 2 -> {4, 8}; 4 -> {6}.
pub(crate) fn ancestry_fixture() -> FixtureStore {
    let mut store = FixtureStore::new();
    store.add(0, "root", None);
    let parents = [(1, 0), (2, 0), (3, 1), (4, 2), (5, 3), (6, 4), (7, 3), (8, 2)];
    for (id, parent) in parents {
        store.add(id, &format!("Category {id}"), Some(parent));
    }
    store
}

/// A flat forest: root plus `count` direct children named `Category {i}`.
pub(crate) fn flat_fixture(count: u64) -> FixtureStore {
    let mut store = FixtureStore::new();
    store.add(0, "root", None);
    for id in 1..=count {
        store.add(id, &format!("Category {id}"), Some(0));
    }
    store
}
