//! Shared in-memory forest fixture for integration tests.

use atoll_core::{Category, CategoryId, CategoryStore, StoreError};

#[derive(Clone, Debug, Default)]
pub struct Forest {
    categories: Vec<Category>,
    similarities: Vec<(CategoryId, CategoryId)>,
}

impl Forest {
    /// Creates a forest holding only a root category with id `0`.
    #[must_use]
    pub fn with_root(name: &str) -> Self {
        let mut forest = Self::default();
        forest.add(0, name, None);
        forest
    }

    pub fn add(&mut self, id: u64, name: &str, parent: Option<u64>) {
        let slug = name.to_ascii_lowercase().replace(' ', "-");
        self.categories.push(Category::new(
            CategoryId::new(id),
            name,
            slug,
            parent.map(CategoryId::new),
        ));
    }

    pub fn link(&mut self, a: u64, b: u64) {
        self.similarities
            .push((CategoryId::new(a), CategoryId::new(b)));
    }

    #[must_use]
    pub fn category(&self, id: u64) -> Category {
        self.get(CategoryId::new(id)).expect("fixture category")
    }

    #[must_use]
    pub fn root(&self) -> CategoryId {
        CategoryId::new(0)
    }
}

impl CategoryStore for Forest {
    fn name(&self) -> &str {
        "forest"
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
