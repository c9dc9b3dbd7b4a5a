//! Taxonomy document ingestion.
//!
//! A taxonomy document is the JSON interchange form of a store snapshot:
//! a root name, categories referencing their parent by name, and similarity
//! pairs by name. Records resolve in document order, so a parent must be
//! declared before its children.

use std::collections::HashMap;

use atoll_core::CategoryId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    errors::MemoryStoreError,
    store::{MemoryStore, normalise_name},
};

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("invalid taxonomy document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("category `{name}` references unknown parent `{parent}`")]
    UnknownParent { name: String, parent: String },
    #[error("similarity references unknown category `{name}`")]
    UnknownEndpoint { name: String },
    #[error(transparent)]
    Store(#[from] MemoryStoreError),
}

/// One category entry in a taxonomy document. A missing `parent` attaches the
/// category directly to the root.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CategoryRecord {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
}

/// JSON interchange form of a category forest plus similarity edges.
///
/// # Examples
/// ```
/// use atoll_providers_memory::TaxonomyDoc;
///
/// let doc = TaxonomyDoc::from_json_str(
///     r#"{
///         "root": "root",
///         "categories": [
///             { "name": "Books" },
///             { "name": "Fiction", "parent": "Books" }
///         ],
///         "similarities": []
///     }"#,
/// )?;
/// let store = doc.into_store()?;
/// assert_eq!(atoll_core::CategoryStore::len(&store), 3);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TaxonomyDoc {
    pub root: String,
    #[serde(default)]
    pub categories: Vec<CategoryRecord>,
    #[serde(default)]
    pub similarities: Vec<(String, String)>,
}

impl TaxonomyDoc {
    /// Parses a taxonomy document from JSON text.
    ///
    /// # Errors
    /// Returns [`TaxonomyError::Json`] on malformed input.
    pub fn from_json_str(raw: &str) -> Result<Self, TaxonomyError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Builds a [`MemoryStore`] from the document, resolving parent and
    /// similarity references by normalised name.
    ///
    /// # Errors
    /// Returns [`TaxonomyError::UnknownParent`] or
    /// [`TaxonomyError::UnknownEndpoint`] for dangling references, and
    /// propagates the store's own validation failures.
    pub fn into_store(self) -> Result<MemoryStore, TaxonomyError> {
        let mut store = MemoryStore::new(&self.root)?;
        let mut by_name: HashMap<String, CategoryId> = HashMap::new();
        by_name.insert(normalise_name(&self.root)?, store.root());

        for record in &self.categories {
            let parent = match &record.parent {
                None => store.root(),
                Some(parent) => *by_name.get(normalise_name(parent)?.as_str()).ok_or_else(
                    || TaxonomyError::UnknownParent {
                        name: record.name.clone(),
                        parent: parent.clone(),
                    },
                )?,
            };
            let id = store.create(&record.name, parent)?;
            by_name.insert(normalise_name(&record.name)?, id);
        }

        for (one, two) in &self.similarities {
            let resolve = |name: &str| -> Result<CategoryId, TaxonomyError> {
                by_name
                    .get(normalise_name(name)?.as_str())
                    .copied()
                    .ok_or_else(|| TaxonomyError::UnknownEndpoint {
                        name: name.to_owned(),
                    })
            };
            store.link(resolve(one)?, resolve(two)?)?;
        }

        Ok(store)
    }
}
