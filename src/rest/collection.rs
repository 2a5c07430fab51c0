//! The collection controller.

use serde_json::Value;

use std::sync::Arc;

use crate::client::{Client, Controller};
use crate::clients::RequestOptions;
use crate::rest::{
    CollectionKind, Container, Create, Handler, KeyFunc, List, Locator, PathElement, PathError,
    Resource, ResourceError, ResourceKind,
};

/// Per-call overrides for how returned items are materialized.
///
/// Unset options fall back to the collection's [`CollectionKind`]; a
/// container with its own bound resource kind still wins over both.
#[derive(Clone, Debug, Default)]
pub struct ItemOptions {
    keyfunc: Option<KeyFunc>,
    resource: Option<ResourceKind>,
}

impl ItemOptions {
    /// Creates empty overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the key function.
    #[must_use]
    pub fn keyfunc(mut self, keyfunc: KeyFunc) -> Self {
        self.keyfunc = Some(keyfunc);
        self
    }

    /// Overrides the default resource kind.
    #[must_use]
    pub const fn resource(mut self, kind: ResourceKind) -> Self {
        self.resource = Some(kind);
        self
    }
}

/// A client-facing view of a container addressed as a collection.
///
/// A collection holds no state of its own. It creates and lists items and
/// hands out nested collections and resources.
///
/// # Example
///
/// ```rust,ignore
/// use serde_json::json;
///
/// let widgets = client.collection("widgets")?;
/// let gear = widgets.create(&json!({"name": "gear"}))?;
/// assert_eq!(gear.key(), "7");
///
/// for widget in widgets.list()? {
///     println!("{}", widget?.key());
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Collection {
    client: Client,
    container: Container,
    kind: CollectionKind,
    parent: Option<Arc<Controller>>,
}

impl Collection {
    pub(crate) const fn new(client: Client, container: Container, kind: CollectionKind) -> Self {
        Self {
            client,
            container,
            kind,
            parent: None,
        }
    }

    pub(crate) fn with_parent(mut self, parent: Controller) -> Self {
        self.parent = Some(Arc::new(parent));
        self
    }

    /// Returns the key of the underlying container.
    #[must_use]
    pub fn key(&self) -> &str {
        self.container.key()
    }

    /// Returns the underlying container.
    #[must_use]
    pub const fn container(&self) -> &Container {
        &self.container
    }

    /// Returns the client this collection dispatches through.
    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }

    /// Returns the controller this collection was addressed from.
    ///
    /// `None` for a collection taken from the client or straight from a
    /// container.
    #[must_use]
    pub fn parent(&self) -> Option<&Controller> {
        self.parent.as_deref()
    }

    /// Returns the kind this collection was materialized with.
    #[must_use]
    pub const fn kind(&self) -> &CollectionKind {
        &self.kind
    }

    /// Returns a host-prefixed locator for this collection.
    #[must_use]
    pub fn locator(&self) -> Locator {
        self.client.host().locator(&self.container)
    }

    /// Creates an item from `data`.
    ///
    /// # Errors
    ///
    /// See [`create_with`](Self::create_with).
    pub fn create(&self, data: &Value) -> Result<Resource, ResourceError> {
        self.create_with(data, &RequestOptions::default(), &ItemOptions::default())
    }

    /// Creates an item from `data` and returns it as a resource with the
    /// server's response cached as its state.
    ///
    /// The returned resource is addressed by the key derived from that state
    /// and is not registered in the tree.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the call fails, and
    /// [`ResourceError::KeyUnavailable`] if no key can be derived from the
    /// returned state.
    pub fn create_with(
        &self,
        data: &Value,
        options: &RequestOptions,
        items: &ItemOptions,
    ) -> Result<Resource, ResourceError> {
        let state =
            Create::new(self.client.dispatch(), &self.container, data, options).execute()?;
        let keyfunc = items.keyfunc.as_ref().unwrap_or(self.kind.keyfunc());
        self.item(state, keyfunc, self.default_kind(items))
    }

    /// Lists the items of this collection.
    ///
    /// # Errors
    ///
    /// See [`list_with`](Self::list_with).
    pub fn list(&self) -> Result<Resources, ResourceError> {
        self.list_with(&RequestOptions::default(), &ItemOptions::default())
    }

    /// Lists the items of this collection.
    ///
    /// The call is made eagerly; the returned iterator then materializes one
    /// resource per returned entry as it is advanced.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the call fails, and
    /// [`ResourceError::UnexpectedBody`] if the body is not a sequence.
    pub fn list_with(
        &self,
        options: &RequestOptions,
        items: &ItemOptions,
    ) -> Result<Resources, ResourceError> {
        let body = List::new(self.client.dispatch(), &self.container, options).execute()?;
        let Value::Array(states) = body else {
            return Err(ResourceError::UnexpectedBody {
                expected: "sequence",
                path: self.container.path().to_string(),
            });
        };
        Ok(Resources {
            collection: self.clone(),
            keyfunc: items.keyfunc.clone().unwrap_or_else(|| self.kind.keyfunc().clone()),
            kind: self.default_kind(items),
            states: states.into_iter(),
        })
    }

    /// Returns the nested collection `key`, registering its container.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] for an invalid key.
    pub fn collection(&self, key: &str) -> Result<Self, PathError> {
        let nested = self
            .container
            .nested(key)?
            .collection(&self.client, Some(&CollectionKind::default()))?;
        Ok(nested.with_parent(Controller::Collection(self.clone())))
    }

    /// Returns the item `key` as a resource without fetching it.
    ///
    /// The resource kind bound to this container wins; otherwise the
    /// collection kind's default is used.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::NoResource`] if neither is set, or a key
    /// validation error.
    pub fn resource(&self, key: &str) -> Result<Resource, PathError> {
        self.item_resource(key, None, self.kind.resource())
    }

    /// Returns the item `key` as a resource of `kind`, unless this container
    /// binds its own resource kind.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] for an invalid key.
    pub fn resource_as(&self, key: &str, kind: ResourceKind) -> Result<Resource, PathError> {
        self.item_resource(key, None, Some(kind))
    }

    fn default_kind(&self, items: &ItemOptions) -> ResourceKind {
        items
            .resource
            .or_else(|| self.kind.resource())
            .unwrap_or_default()
    }

    fn item(
        &self,
        state: Value,
        keyfunc: &KeyFunc,
        kind: ResourceKind,
    ) -> Result<Resource, ResourceError> {
        let key = keyfunc
            .key_for(&state)
            .ok_or_else(|| ResourceError::KeyUnavailable {
                path: self.container.path().to_string(),
            })?;
        Ok(self.item_resource(&key, Some(state), Some(kind))?)
    }

    fn item_resource(
        &self,
        key: &str,
        state: Option<Value>,
        default: Option<ResourceKind>,
    ) -> Result<Resource, PathError> {
        let resource = self.container.resource(&self.client, key, state, default)?;
        Ok(resource.with_parent(Controller::Collection(self.clone())))
    }
}

/// Iterator over the items returned by [`Collection::list`].
///
/// Single pass: listing again issues a new call.
#[derive(Debug)]
pub struct Resources {
    collection: Collection,
    keyfunc: KeyFunc,
    kind: ResourceKind,
    states: std::vec::IntoIter<Value>,
}

impl Iterator for Resources {
    type Item = Result<Resource, ResourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        let state = self.states.next()?;
        Some(self.collection.item(state, &self.keyfunc, self.kind))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.states.size_hint()
    }
}

impl ExactSizeIterator for Resources {}
