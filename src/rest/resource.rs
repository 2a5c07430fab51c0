//! The resource controller.
//!
//! A [`Resource`] addresses one remote item and caches its last known
//! state. The cache changes only through [`fetch`](Resource::fetch),
//! [`update`](Resource::update), [`delete`](Resource::delete), and
//! [`lift`](Resource::lift).
//!
//! # Deletion
//!
//! A successful [`delete`](Resource::delete) clears the cached state and
//! marks the instance deleted. Any later `fetch`, `update`, or `delete` on
//! the same instance fails with [`ResourceError::Deleted`] without reaching
//! the transport. Address the item again (for example through
//! [`Collection::resource`](crate::rest::Collection::resource)) to get a
//! fresh instance.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut widget = client.collection("widgets")?.resource("42")?;
//!
//! let name = widget.field("name")?;
//! widget.update(&json!({"name": "cog"}))?;
//! widget.delete()?;
//! assert!(widget.is_deleted());
//! ```

use serde::de::DeserializeOwned;
use serde_json::Value;

use std::sync::Arc;

use crate::client::{Client, Controller};
use crate::clients::RequestOptions;
use crate::rest::{
    Collection, CollectionKind, Container, Delete, Get, Handler, Locator, PathElement, PathError,
    Put, ResourceError, ResourceKind,
};

/// A client-facing view of a single remote item.
#[derive(Clone, Debug)]
pub struct Resource {
    client: Client,
    container: Container,
    kind: ResourceKind,
    state: Option<Value>,
    deleted: bool,
    parent: Option<Arc<Controller>>,
}

impl Resource {
    pub(crate) const fn new(
        client: Client,
        container: Container,
        kind: ResourceKind,
        state: Option<Value>,
    ) -> Self {
        Self {
            client,
            container,
            kind,
            state,
            deleted: false,
            parent: None,
        }
    }

    pub(crate) fn with_parent(mut self, parent: Controller) -> Self {
        self.parent = Some(Arc::new(parent));
        self
    }

    /// Returns the item key.
    #[must_use]
    pub fn key(&self) -> &str {
        self.container.key()
    }

    /// Returns the underlying container.
    #[must_use]
    pub const fn container(&self) -> &Container {
        &self.container
    }

    /// Returns the client this resource dispatches through.
    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }

    /// Returns the controller this resource was addressed from, as it was
    /// at that time.
    ///
    /// `None` for a resource taken straight from a container.
    #[must_use]
    pub fn parent(&self) -> Option<&Controller> {
        self.parent.as_deref()
    }

    /// Returns how this resource was materialized.
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Returns `true` once [`delete`](Self::delete) has succeeded.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Returns a host-prefixed locator for this resource.
    #[must_use]
    pub fn locator(&self) -> Locator {
        self.client.host().locator(&self.container)
    }

    /// Replaces the cached state without any call.
    pub fn lift(&mut self, state: Value) {
        self.state = Some(state);
    }

    /// Returns the cached state without any call.
    #[must_use]
    pub const fn unlift(&self) -> Option<&Value> {
        self.state.as_ref()
    }

    /// Returns the state, fetching it only if nothing is cached.
    ///
    /// # Errors
    ///
    /// See [`fetch_with`](Self::fetch_with).
    pub fn fetch(&mut self) -> Result<&Value, ResourceError> {
        self.fetch_with(&RequestOptions::default(), false)
    }

    /// Fetches the state unconditionally.
    ///
    /// # Errors
    ///
    /// See [`fetch_with`](Self::fetch_with).
    pub fn refresh(&mut self) -> Result<&Value, ResourceError> {
        self.fetch_with(&RequestOptions::default(), true)
    }

    /// Returns the state, issuing a GET when nothing is cached or `refresh`
    /// is set. The fetched state replaces the cache.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Deleted`] if this instance was deleted and
    /// [`ResourceError::Http`] if the call fails. A failed refresh keeps the
    /// previously cached state.
    pub fn fetch_with(
        &mut self,
        options: &RequestOptions,
        refresh: bool,
    ) -> Result<&Value, ResourceError> {
        self.ensure_live()?;
        let cached = if refresh { None } else { self.state.take() };
        let state = match cached {
            Some(state) => state,
            None => Get::new(self.client.dispatch(), &self.container, options).execute()?,
        };
        Ok(self.state.insert(state))
    }

    /// Sends `state` with PUT and caches the server's response.
    ///
    /// # Errors
    ///
    /// See [`update_with`](Self::update_with).
    pub fn update(&mut self, state: &Value) -> Result<&Value, ResourceError> {
        self.update_with(state, &RequestOptions::default())
    }

    /// Sends `state` with PUT and caches the server's response.
    ///
    /// The cache holds what the server returned, not `state`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Deleted`] if this instance was deleted and
    /// [`ResourceError::Http`] if the call fails.
    pub fn update_with(
        &mut self,
        state: &Value,
        options: &RequestOptions,
    ) -> Result<&Value, ResourceError> {
        self.ensure_live()?;
        let state = Put::new(self.client.dispatch(), &self.container, state, options).execute()?;
        Ok(self.state.insert(state))
    }

    /// Deletes the remote item.
    ///
    /// # Errors
    ///
    /// See [`delete_with`](Self::delete_with).
    pub fn delete(&mut self) -> Result<(), ResourceError> {
        self.delete_with(&RequestOptions::default())
    }

    /// Deletes the remote item, then clears the cache and marks this
    /// instance deleted.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Deleted`] if this instance was already
    /// deleted and [`ResourceError::Http`] if the call fails. A failed call
    /// leaves the instance untouched.
    pub fn delete_with(&mut self, options: &RequestOptions) -> Result<(), ResourceError> {
        self.ensure_live()?;
        Delete::new(self.client.dispatch(), &self.container, options).execute()?;
        self.state = None;
        self.deleted = true;
        Ok(())
    }

    /// Returns a top-level field of the state.
    ///
    /// A [`ResourceKind::Lazy`] resource fetches its state on first access
    /// and reuses the cache afterwards. A [`ResourceKind::Plain`] resource
    /// only reads the cache.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::FieldNotFound`] if the field is absent (or,
    /// for a plain resource, nothing is cached), and any error from the
    /// implicit fetch.
    pub fn field(&mut self, name: &str) -> Result<Value, ResourceError> {
        let path = self.container.path().to_string();
        let state = match self.kind {
            ResourceKind::Lazy => Some(self.fetch()?),
            ResourceKind::Plain => self.state.as_ref(),
        };
        state
            .and_then(|state| state.get(name))
            .cloned()
            .ok_or_else(|| ResourceError::FieldNotFound {
                field: name.to_string(),
                path,
            })
    }

    /// Decodes the state into `T`, fetching it if nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Decode`] if the state does not match `T`,
    /// and any error from the implicit fetch.
    pub fn state_as<T: DeserializeOwned>(&mut self) -> Result<T, ResourceError> {
        let state = self.fetch()?.clone();
        serde_json::from_value(state).map_err(|source| ResourceError::Decode {
            path: self.container.path().to_string(),
            source,
        })
    }

    /// Returns the nested collection `key` under this item, registering its
    /// container.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] for an invalid key.
    pub fn collection(&self, key: &str) -> Result<Collection, PathError> {
        let nested = self
            .container
            .nested(key)?
            .collection(&self.client, Some(&CollectionKind::default()))?;
        Ok(nested.with_parent(Controller::Resource(self.clone())))
    }

    fn ensure_live(&self) -> Result<(), ResourceError> {
        if self.deleted {
            tracing::warn!(path = %self.container.path(), "use of a deleted resource");
            return Err(ResourceError::Deleted {
                path: self.container.path().to_string(),
            });
        }
        Ok(())
    }
}
