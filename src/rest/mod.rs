//! The addressing tree and the dispatch engine.
//!
//! This module models a REST API as a tree of path segments and turns
//! operations on that tree into HTTP calls:
//!
//! - **Addressing**: [`Root`], [`Container`], and the [`PathElement`] trait
//!   build and resolve the tree; [`Locator`] and [`Host`] compute URLs
//! - **Kinds**: [`CollectionKind`], [`ResourceKind`], and [`KeyFunc`] decide
//!   how a node is materialized
//! - **Handlers**: [`Create`], [`List`], [`Get`], [`Put`], and [`Delete`]
//!   each perform one call and check its status
//! - **Controllers**: [`Collection`] and [`Resource`] are the client-facing
//!   views of a node
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_tree::rest::{CollectionKind, Nesting, PathElement, ResourceKind};
//! use rest_tree::{Client, ClientConfig, Host};
//!
//! let config = ClientConfig::builder()
//!     .host(Host::new("https://api.example.com")?)
//!     .build()?;
//! let client = Client::new(&config)?;
//!
//! // Bind kinds up front for endpoints that need them
//! client.root().nested_with(
//!     "api",
//!     &Nesting::new().collection(CollectionKind::namespace()),
//! )?;
//!
//! let mut widget = client.collection("widgets")?.resource("42")?;
//! println!("{}", widget.fetch()?);
//! ```

mod collection;
mod errors;
mod handler;
mod kind;
mod locator;
mod path;
mod resource;

pub use collection::{Collection, ItemOptions, Resources};
pub use errors::{PathError, ResourceError};
pub use handler::{Create, Delete, Dispatch, Get, Handler, List, Put};
pub use kind::{CollectionKind, KeyFunc, ResourceKind, DEFAULT_KEY_FIELD};
pub use locator::{Host, Locator};
pub use path::{Container, Nesting, Parent, PathElement, Resolve, Root, SEP};
pub(crate) use path::path_segments;
pub use resource::Resource;
