//! Resource-specific error types.
//!
//! The item clients build on [`HttpError`] with resource semantics:
//!
//! - **empty id**: [`ResourceError::NotFound`], without any request
//! - **403 on get**: [`ResourceError::NotFound`]; Directus answers the same
//!   way for missing and invisible items
//! - **204 on update**: [`ResourceError::NotFound`] annotated with the id
//! - **empty composite key**: [`ResourceError::MissingKey`], without any
//!   request
//! - **roles on an unknown server version**: [`ResourceError::UnsupportedVersion`]
//! - **everything else**: [`ResourceError::Http`], unchanged
//!
//! # Example
//!
//! ```rust,ignore
//! use directus_api::rest::ResourceError;
//!
//! match articles.get(&cancel, "missing").await {
//!     Ok(article) => println!("Found: {}", article.title),
//!     Err(ResourceError::NotFound { collection, id }) => {
//!         println!("{collection}/{id} not found");
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::{ApiError, HttpError};

/// Error type for resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The item does not exist or is not visible to the caller.
    #[error("Item not found in '{collection}': {id:?}")]
    NotFound {
        /// The collection or system endpoint that was queried.
        collection: String,
        /// The requested id.
        id: String,
    },

    /// A key needed to address a composite-key resource is empty.
    #[error("{resource} {key} is required")]
    MissingKey {
        /// The resource being addressed (e.g. "field").
        resource: &'static str,
        /// The missing key (e.g. "collection").
        key: &'static str,
    },

    /// The server version is not one this operation knows how to address.
    #[error("Unsupported Directus version: {version:?}")]
    UnsupportedVersion {
        /// The version reported by `/server/info`; empty if hidden.
        version: String,
    },

    /// A role was shaped for a different Directus version than the server.
    #[error("Role shape does not match the server: expected Directus {expected} roles")]
    RoleShapeMismatch {
        /// The major version whose shape the server expects.
        expected: u32,
    },

    /// A transport-level error.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl ResourceError {
    /// Returns `true` for [`ResourceError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns the validation error reported by the server, if any.
    #[must_use]
    pub const fn validation(&self) -> Option<&ApiError> {
        match self {
            Self::Http(HttpError::Validation(e)) => Some(e),
            _ => None,
        }
    }

    /// Returns `true` if the caller cancelled the operation.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Http(HttpError::Cancelled))
    }

    pub(crate) fn not_found(collection: &str, id: impl ToString) -> Self {
        Self::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }
}
