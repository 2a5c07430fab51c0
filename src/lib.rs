//! # rest-tree
//!
//! A client library that models a REST API as a navigable tree of
//! collections and resources, and dispatches CRUD operations against that
//! tree through pluggable transport and serialization strategies.
//!
//! ## Overview
//!
//! This crate provides:
//! - An addressing tree ([`rest::Root`], [`rest::Container`]) mapping path
//!   segments to nodes, with memoized registration and lazy path resolution
//! - URL computation through [`rest::Locator`] and a validated [`Host`]
//! - One-shot handlers that perform a single call and check its status
//! - Client-facing controllers: [`rest::Collection`] (create, list, descend)
//!   and [`rest::Resource`] (fetch, update, delete, cached state)
//! - A [`Client`] entry point that owns the tree and the collaborators, and
//!   resolves URLs back into controllers
//! - A blocking `reqwest` transport and a `serde_json` serializer as
//!   defaults, both replaceable through the [`clients::Transport`] and
//!   [`clients::Serializer`] traits
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rest_tree::{Client, ClientConfig, Host};
//! use serde_json::json;
//!
//! let config = ClientConfig::builder()
//!     .host(Host::new("https://api.example.com").unwrap())
//!     .build()
//!     .unwrap();
//! let client = Client::new(&config).unwrap();
//!
//! // POST https://api.example.com/widgets/
//! let widgets = client.collection("widgets").unwrap();
//! let mut gear = widgets.create(&json!({"name": "gear"})).unwrap();
//!
//! // GET https://api.example.com/widgets/{uuid}
//! let state = gear.refresh().unwrap();
//! println!("{state}");
//! ```
//!
//! ## Binding Kinds
//!
//! Nodes can carry a [`rest::CollectionKind`] and a [`rest::ResourceKind`],
//! bound when the tree is built:
//!
//! ```rust
//! use rest_tree::rest::{CollectionKind, KeyFunc, Nesting, PathElement, ResourceKind, Root};
//!
//! let root = Root::new();
//! let users = root
//!     .nested_with(
//!         "users",
//!         &Nesting::new()
//!             .collection(CollectionKind::new().with_keyfunc(KeyFunc::field("id")))
//!             .resource(ResourceKind::Plain),
//!     )
//!     .unwrap();
//!
//! assert_eq!(users.path(), "/users");
//! assert_eq!(users.resource_kind(), Some(ResourceKind::Plain));
//! ```
//!
//! ## Error Handling
//!
//! - [`ConfigError`]: invalid host or incomplete configuration
//! - [`clients::HttpError`]: a single call failed (unexpected status,
//!   transport, or serialization)
//! - [`rest::PathError`]: the addressing tree rejected an operation
//! - [`rest::ResourceError`]: a controller operation failed
//!
//! ## Logging
//!
//! The crate emits `tracing` events (container registration, dispatched
//! calls, unexpected statuses, use of deleted resources). Install a
//! subscriber to see them.
//!
//! ## Design Principles
//!
//! - **No global state**: each client owns its tree
//! - **Fail-fast validation**: hosts and keys are validated on construction
//! - **Thread-safe**: all types are `Send + Sync`
//! - **Blocking**: every call blocks until the transport returns

mod client;

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

pub use client::{Client, Controller};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::ConfigError;
pub use rest::Host;
