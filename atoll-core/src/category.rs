//! Category node model and label projection.
//!
//! A category is a node in the rooted forest: an opaque identifier, a display
//! name, a URL slug, and an optional parent pointer. The forest owns the
//! parent-pointer edges; a category never owns its parent. Exactly one
//! category per store is the root, recognisable by `parent() == None`, and
//! every operation that needs it receives the root id explicitly rather than
//! looking it up by a reserved name.

use std::fmt;

/// Identifier assigned to a category.
///
/// # Examples
/// ```
/// use atoll_core::CategoryId;
///
/// let id = CategoryId::new(4);
/// assert_eq!(id.get(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(u64);

impl CategoryId {
    /// Creates a new category identifier.
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying numeric identifier.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node in the category forest.
///
/// # Examples
/// ```
/// use atoll_core::{Category, CategoryId};
///
/// let root = Category::new(CategoryId::new(0), "root", "root", None);
/// let child = Category::new(CategoryId::new(1), "Books", "books", Some(root.id()));
/// assert_eq!(child.parent(), Some(root.id()));
/// assert_eq!(child.canonical_url(), "/categories/1/books");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    id: CategoryId,
    name: String,
    slug: String,
    parent: Option<CategoryId>,
}

impl Category {
    /// Creates a category from its fields.
    #[must_use]
    pub fn new(
        id: CategoryId,
        name: impl Into<String>,
        slug: impl Into<String>,
        parent: Option<CategoryId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            slug: slug.into(),
            parent,
        }
    }

    /// Returns the category identifier.
    #[must_use]
    pub fn id(&self) -> CategoryId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the URL slug.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Returns the parent identifier, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<CategoryId> {
        self.parent
    }

    /// Returns whether this category is a root (has no parent).
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Renders the canonical URL for this category.
    #[must_use]
    pub fn canonical_url(&self) -> String {
        format!("/categories/{}/{}", self.id, self.slug)
    }
}

/// Controls how a category is projected to its display key.
///
/// The mode is always passed explicitly by the caller; it is purely a
/// formatting concern shared by the tree builder and the islands engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelMode {
    /// Project to the plain display name.
    ByName,
    /// Project to an anchor tag embedding the canonical URL and name.
    ByLink,
}

/// Projects a category to its display key under the requested mode.
///
/// Under [`LabelMode::ByName`] the key is the display name as-is; callers
/// relying on label equality must ensure names are unique. The core itself
/// joins tree and graph views by [`CategoryId`] and only projects to labels
/// for final output.
///
/// # Examples
/// ```
/// use atoll_core::{Category, CategoryId, LabelMode, label_of};
///
/// let node = Category::new(CategoryId::new(3), "Books", "books", None);
/// assert_eq!(label_of(&node, LabelMode::ByName), "Books");
/// assert_eq!(
///     label_of(&node, LabelMode::ByLink),
///     "<a href='/categories/3/books'>Books</a>",
/// );
/// ```
#[must_use]
pub fn label_of(category: &Category, mode: LabelMode) -> String {
    match mode {
        LabelMode::ByName => category.name().to_owned(),
        LabelMode::ByLink => format!(
            "<a href='{}'>{}</a>",
            category.canonical_url(),
            category.name()
        ),
    }
}
