//! Error types for the atoll core library.
//!
//! Defines the error enums exposed by the public API, stable machine-readable
//! error codes, and a convenient result alias.

use std::fmt;

use thiserror::Error;

use crate::category::CategoryId;

macro_rules! error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $Code:ident => $Variant:ident $( { $($pattern:tt)* } )? => $text:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $Code,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$Code => $text,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!("Retrieve the stable [`", stringify!($CodeTy), "`] for this error.")]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$Variant $( { $($pattern)* } )? => $CodeTy::$Code,)+
                }
            }
        }
    };
}

/// An error produced by [`crate::CategoryStore`] operations.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum StoreError {
    /// A referenced category does not exist in the store snapshot.
    #[error("category {id} does not exist")]
    UnknownCategory {
        /// Identifier that failed to resolve.
        id: CategoryId,
    },
}

error_codes! {
    /// Stable codes describing [`StoreError`] variants.
    enum StoreErrorCode for StoreError {
        /// A referenced category does not exist in the store snapshot.
        UnknownCategory => UnknownCategory { .. } => "STORE_UNKNOWN_CATEGORY",
    }
}

/// Error type produced by the forest query operations.
///
/// The core assumes an already-validated snapshot, so the only domain fault
/// it can report is a parent or child chain that loops back on itself. The
/// visited-guard turns what would otherwise be non-termination into
/// [`HierarchyError::MalformedHierarchy`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum HierarchyError {
    /// Following parent or child links revisited a category.
    #[error("malformed hierarchy: cycle detected at category {at}")]
    MalformedHierarchy {
        /// First category seen twice during the walk.
        at: CategoryId,
    },
    /// A store lookup failed while walking the forest.
    #[error(transparent)]
    Store(#[from] StoreError),
}

error_codes! {
    /// Stable codes describing [`HierarchyError`] variants.
    enum HierarchyErrorCode for HierarchyError {
        /// Following parent or child links revisited a category.
        MalformedHierarchy => MalformedHierarchy { .. } => "HIERARCHY_MALFORMED",
        /// A store lookup failed while walking the forest.
        StoreFailure => Store { .. } => "HIERARCHY_STORE_FAILURE",
    }
}

impl HierarchyError {
    /// Retrieve the inner [`StoreErrorCode`] when the error originated in the store.
    #[must_use]
    pub const fn store_code(&self) -> Option<StoreErrorCode> {
        match self {
            Self::Store(error) => Some(error.code()),
            Self::MalformedHierarchy { .. } => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, HierarchyError>;
