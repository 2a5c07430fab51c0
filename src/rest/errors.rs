//! Error types for the addressing tree and the controllers.
//!
//! - [`PathError`]: invalid keys, unregistered or duplicated containers, and
//!   nodes with no bound collection or resource kind
//! - [`ResourceError`]: everything a controller operation can fail with,
//!   wrapping [`HttpError`] and [`PathError`]
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_tree::rest::{PathError, ResourceError};
//!
//! match widgets.resource("42")?.fetch() {
//!     Ok(state) => println!("{state}"),
//!     Err(e) if e.status_code() == Some(404) => println!("gone"),
//!     Err(e) => return Err(e),
//! }
//! ```

use thiserror::Error;

use crate::clients::{ClientException, HttpError};

/// Error raised while building or walking the addressing tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A container key was empty.
    #[error("Container key cannot be empty")]
    EmptyKey,

    /// A container key contained the path separator.
    #[error("Container key '{key}' cannot contain separator '/'")]
    KeyContainsSeparator {
        /// The rejected key.
        key: String,
    },

    /// An absolute URL does not belong to the client's host.
    #[error("URL '{url}' is not under the client host")]
    ForeignUrl {
        /// The rejected URL.
        url: String,
    },

    /// An empty path was given to `resolve`.
    #[error("Cannot resolve an empty path")]
    EmptyPath,

    /// A child was looked up without permission to create it.
    #[error("Container \"{key}\" isn't registered in {parent}")]
    ContainerNotRegistered {
        /// The missing key.
        key: String,
        /// The path of the parent that was searched.
        parent: String,
    },

    /// A key was registered twice under the same parent.
    #[error("Duplicated container \"{key}\" in {parent}")]
    Duplicate {
        /// The offending key.
        key: String,
        /// The path of the parent that already holds the key.
        parent: String,
    },

    /// The container has no collection kind and no default was supplied.
    #[error("No collection kind bound to {path}")]
    NoCollection {
        /// The path of the container.
        path: String,
    },

    /// The container has no resource kind and no default was supplied.
    #[error("No resource kind bound to {path}")]
    NoResource {
        /// The path of the container.
        path: String,
    },
}

/// Error type for controller operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The key function could not derive a key from a returned state.
    #[error("Cannot derive an item key from the state returned by {path}")]
    KeyUnavailable {
        /// The collection path the state came from.
        path: String,
    },

    /// The response body did not have the expected shape.
    #[error("Expected a {expected} in the response from {path}")]
    UnexpectedBody {
        /// A description of the expected shape.
        expected: &'static str,
        /// The path that was requested.
        path: String,
    },

    /// The resource was deleted through this instance.
    #[error("Resource at {path} has been deleted")]
    Deleted {
        /// The path of the deleted resource.
        path: String,
    },

    /// The field is absent from the resource state.
    #[error("Field '{field}' not found in resource at {path}")]
    FieldNotFound {
        /// The requested field name.
        field: String,
        /// The path of the resource.
        path: String,
    },

    /// The state could not be decoded into the requested type.
    #[error("Failed to decode state of {path}: {source}")]
    Decode {
        /// The path of the resource.
        path: String,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// A dispatched call failed.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The addressing tree rejected an operation.
    #[error(transparent)]
    Path(#[from] PathError),
}

impl ResourceError {
    /// Returns the [`ClientException`] if the error came from an unexpected
    /// response status.
    #[must_use]
    pub const fn client_exception(&self) -> Option<&ClientException> {
        match self {
            Self::Http(HttpError::Response(e)) => Some(e),
            _ => None,
        }
    }

    /// Returns the response status code if the error came from an
    /// unexpected response status.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        self.client_exception().map(|e| e.code)
    }
}
