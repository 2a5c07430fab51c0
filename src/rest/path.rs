//! The addressing tree.
//!
//! A REST API is modeled as a tree of path segments. [`Root`] anchors the
//! tree at `/`; every other node is a [`Container`] bound to one segment
//! under its parent. Both implement [`PathElement`], which owns the child
//! registry and knows how to create, look up, and resolve children.
//!
//! The tree is append-only: a registered container lives as long as its
//! root. Containers created with `register = false` (individual items whose
//! key comes from data) are not memoized and disappear once their last
//! handle is dropped.
//!
//! # Example
//!
//! ```rust
//! use rest_tree::rest::{PathElement, Root};
//!
//! let root = Root::new();
//! let widgets = root.nested("widgets").unwrap();
//! let gears = widgets.nested("gears").unwrap();
//!
//! assert_eq!(gears.path(), "/widgets/gears");
//! assert_eq!(root.nested("widgets").unwrap(), widgets);
//!
//! let walked: Vec<_> = root
//!     .resolve("/widgets/gears")
//!     .unwrap()
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(walked, vec![widgets, gears]);
//! ```

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::iter::FusedIterator;
use std::sync::{Arc, PoisonError, RwLock, Weak};

use serde_json::Value;

use crate::client::Client;
use crate::rest::{Collection, CollectionKind, Locator, PathError, Resource, ResourceKind};

/// The path separator.
pub const SEP: char = '/';

/// Shared state of a tree node.
///
/// Reachable only through [`Root`] and [`Container`] handles.
#[derive(Debug)]
pub struct Node {
    key: String,
    path: String,
    parent: Option<Weak<Node>>,
    collection: Option<CollectionKind>,
    resource: Option<ResourceKind>,
    children: RwLock<BTreeMap<String, Arc<Node>>>,
}

impl Node {
    fn root() -> Self {
        Self {
            key: String::new(),
            path: SEP.to_string(),
            parent: None,
            collection: None,
            resource: None,
            children: RwLock::new(BTreeMap::new()),
        }
    }

    pub(crate) fn path(&self) -> &str {
        &self.path
    }

    pub(crate) const fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Path of this node in collection form, used as the prefix of children.
    fn collection_path(&self) -> String {
        if self.is_root() {
            self.path.clone()
        } else {
            format!("{}{SEP}", self.path)
        }
    }

    fn child(&self, key: &str) -> Option<Arc<Self>> {
        self.children
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn child_keys(&self) -> Vec<String> {
        self.children
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    fn register(&self, child: &Arc<Self>) -> Result<(), PathError> {
        let mut children = self.children.write().unwrap_or_else(PoisonError::into_inner);
        match children.entry(child.key.clone()) {
            Entry::Occupied(_) => Err(PathError::Duplicate {
                key: child.key.clone(),
                parent: self.path.clone(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(Arc::clone(child));
                tracing::debug!(path = %child.path, "registered container");
                Ok(())
            }
        }
    }
}

mod sealed {
    pub trait Sealed {
        fn node(&self) -> &std::sync::Arc<super::Node>;
    }
}

/// Options for [`PathElement::nested_with`] and [`PathElement::resolve_with`].
///
/// The defaults create missing children and register them.
#[derive(Clone, Debug)]
pub struct Nesting {
    collection: Option<CollectionKind>,
    resource: Option<ResourceKind>,
    create: bool,
    register: bool,
}

impl Default for Nesting {
    fn default() -> Self {
        Self {
            collection: None,
            resource: None,
            create: true,
            register: true,
        }
    }
}

impl Nesting {
    /// Creates the default options: create and register.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that only look up existing children.
    #[must_use]
    pub fn lookup() -> Self {
        Self {
            create: false,
            register: false,
            ..Self::default()
        }
    }

    /// Binds a collection kind to a newly created child.
    #[must_use]
    pub fn collection(mut self, kind: CollectionKind) -> Self {
        self.collection = Some(kind);
        self
    }

    /// Binds a resource kind to a newly created child.
    #[must_use]
    pub const fn resource(mut self, kind: ResourceKind) -> Self {
        self.resource = Some(kind);
        self
    }

    /// Sets whether missing children may be created.
    #[must_use]
    pub const fn create(mut self, create: bool) -> Self {
        self.create = create;
        self
    }

    /// Sets whether newly created children are registered in their parent.
    #[must_use]
    pub const fn register(mut self, register: bool) -> Self {
        self.register = register;
        self
    }
}

/// A node of the addressing tree.
///
/// Implemented by [`Root`] and [`Container`]. This trait is sealed.
pub trait PathElement: sealed::Sealed + fmt::Display {
    /// Returns the full path of this node, without a trailing separator
    /// (except for the root, whose path is the separator itself).
    fn path(&self) -> &str {
        self.node().path()
    }

    /// Returns a host-less locator for this node.
    fn locator(&self) -> Locator {
        Locator::new(Arc::clone(self.node()))
    }

    /// Returns the keys of the registered children, in sorted order.
    fn children(&self) -> Vec<String> {
        self.node().child_keys()
    }

    /// Returns the child with `key`, creating and registering it if absent.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::EmptyKey`] or [`PathError::KeyContainsSeparator`]
    /// for an invalid key.
    fn nested(&self, key: &str) -> Result<Container, PathError> {
        self.nested_with(key, &Nesting::default())
    }

    /// Returns the child with `key`, creating it according to `nesting`.
    ///
    /// Kinds in `nesting` are only bound when a new child is created; an
    /// existing child is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::ContainerNotRegistered`] if the child is absent
    /// and creation is disabled, or a key validation error.
    fn nested_with(&self, key: &str, nesting: &Nesting) -> Result<Container, PathError> {
        nested_in(self.node(), key, nesting)
    }

    /// Resolves a slash-separated path into existing containers.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::EmptyPath`] if `path` is empty.
    fn resolve(&self, path: &str) -> Result<Resolve, PathError> {
        self.resolve_with(path, Nesting::lookup())
    }

    /// Resolves a slash-separated path, walking down from this node.
    ///
    /// The returned iterator is lazy: each segment is looked up (or created,
    /// per `nesting`) only when the iterator is advanced. It stops after the
    /// first error.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::EmptyPath`] if `path` is empty.
    fn resolve_with(&self, path: &str, nesting: Nesting) -> Result<Resolve, PathError> {
        Ok(Resolve {
            current: Arc::clone(self.node()),
            segments: split_path(path)?.into_iter(),
            nesting,
            done: false,
        })
    }
}

fn validate_key(key: &str) -> Result<(), PathError> {
    if key.is_empty() {
        return Err(PathError::EmptyKey);
    }
    if key.contains(SEP) {
        return Err(PathError::KeyContainsSeparator {
            key: key.to_string(),
        });
    }
    Ok(())
}

/// Splits `path` and checks every segment as a container key.
pub(crate) fn path_segments(path: &str) -> Result<Vec<String>, PathError> {
    let segments = split_path(path)?;
    for segment in &segments {
        validate_key(segment)?;
    }
    Ok(segments)
}

fn split_path(path: &str) -> Result<Vec<String>, PathError> {
    if path.is_empty() {
        return Err(PathError::EmptyPath);
    }
    let path = path.strip_suffix(SEP).unwrap_or(path);
    let path = path.strip_prefix(SEP).unwrap_or(path);
    if path.is_empty() {
        return Ok(Vec::new());
    }
    Ok(path.split(SEP).map(str::to_string).collect())
}

fn nested_in(parent: &Arc<Node>, key: &str, nesting: &Nesting) -> Result<Container, PathError> {
    if let Some(child) = parent.child(key) {
        return Ok(Container(child));
    }
    if !nesting.create {
        return Err(PathError::ContainerNotRegistered {
            key: key.to_string(),
            parent: parent.path().to_string(),
        });
    }
    let created = Container::with_parent(
        parent,
        key,
        nesting.collection.clone(),
        nesting.resource,
        nesting.register,
    );
    match created {
        // Lost a registration race: hand out the winner
        Err(PathError::Duplicate { key, parent: path }) => parent
            .child(&key)
            .map(Container)
            .ok_or(PathError::Duplicate { key, parent: path }),
        other => other,
    }
}

/// Lazy walk over the containers of a path. See [`PathElement::resolve_with`].
#[derive(Debug)]
pub struct Resolve {
    current: Arc<Node>,
    segments: std::vec::IntoIter<String>,
    nesting: Nesting,
    done: bool,
}

impl Iterator for Resolve {
    type Item = Result<Container, PathError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let key = self.segments.next()?;
        match nested_in(&self.current, &key, &self.nesting) {
            Ok(container) => {
                self.current = Arc::clone(&container.0);
                Some(Ok(container))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (0, Some(self.segments.len()))
        }
    }
}

impl FusedIterator for Resolve {}

/// The top-level node of the tree, with path `/`.
///
/// Cloning a `Root` yields another handle to the same tree.
#[derive(Clone)]
pub struct Root(Arc<Node>);

impl Root {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self(Arc::new(Node::root()))
    }

    /// Returns `true` if both handles refer to the same tree.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Root {
    fn default() -> Self {
        Self::new()
    }
}

impl sealed::Sealed for Root {
    fn node(&self) -> &Arc<Node> {
        &self.0
    }
}

impl PathElement for Root {}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Root \"{}\"", self.0.path)
    }
}

impl fmt::Debug for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Root")
            .field("children", &self.0.child_keys())
            .finish()
    }
}

/// The parent of a [`Container`].
#[derive(Clone, Debug)]
pub enum Parent {
    /// The container sits directly under the root.
    Root(Root),
    /// The container sits under another container.
    Container(Container),
}

/// A named node bound to one path segment.
///
/// Equality is identity: two handles are equal when they refer to the same
/// node.
#[derive(Clone)]
pub struct Container(Arc<Node>);

impl Container {
    /// Creates a container under `parent`.
    ///
    /// When `register` is true the container is added to the parent's
    /// registry, so later lookups of `key` return it.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::EmptyKey`] or [`PathError::KeyContainsSeparator`]
    /// for an invalid key, and [`PathError::Duplicate`] if `register` is true
    /// and the parent already holds `key`.
    pub fn new<P: PathElement + ?Sized>(
        parent: &P,
        key: &str,
        collection: Option<CollectionKind>,
        resource: Option<ResourceKind>,
        register: bool,
    ) -> Result<Self, PathError> {
        Self::with_parent(parent.node(), key, collection, resource, register)
    }

    fn with_parent(
        parent: &Arc<Node>,
        key: &str,
        collection: Option<CollectionKind>,
        resource: Option<ResourceKind>,
        register: bool,
    ) -> Result<Self, PathError> {
        validate_key(key)?;
        let node = Arc::new(Node {
            key: key.to_string(),
            path: format!("{}{key}", parent.collection_path()),
            parent: Some(Arc::downgrade(parent)),
            collection,
            resource,
            children: RwLock::new(BTreeMap::new()),
        });
        if register {
            parent.register(&node)?;
        }
        Ok(Self(node))
    }

    /// Returns the segment this container is bound to.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.0.key
    }

    /// Returns the parent node, or `None` if it has been dropped.
    #[must_use]
    pub fn parent(&self) -> Option<Parent> {
        let parent = self.0.parent.as_ref()?.upgrade()?;
        if parent.is_root() {
            Some(Parent::Root(Root(parent)))
        } else {
            Some(Parent::Container(Self(parent)))
        }
    }

    /// Returns the bound collection kind.
    #[must_use]
    pub fn collection_kind(&self) -> Option<&CollectionKind> {
        self.0.collection.as_ref()
    }

    /// Returns the bound resource kind.
    #[must_use]
    pub fn resource_kind(&self) -> Option<ResourceKind> {
        self.0.resource
    }

    /// Returns `true` if both handles refer to the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Wraps this container in a [`Collection`].
    ///
    /// The bound collection kind wins over `default`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::NoCollection`] if no kind is bound and no
    /// default is given.
    pub fn collection(
        &self,
        client: &Client,
        default: Option<&CollectionKind>,
    ) -> Result<Collection, PathError> {
        let kind = self
            .0
            .collection
            .as_ref()
            .or(default)
            .ok_or_else(|| PathError::NoCollection {
                path: self.0.path.clone(),
            })?;
        Ok(Collection::new(client.clone(), self.clone(), kind.clone()))
    }

    /// Wraps the item `key` of this container in a [`Resource`].
    ///
    /// The item's container is created without registration. The bound
    /// resource kind wins over `default`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::NoResource`] if no kind is bound and no default
    /// is given, or a key validation error.
    pub fn resource(
        &self,
        client: &Client,
        key: &str,
        state: Option<Value>,
        default: Option<ResourceKind>,
    ) -> Result<Resource, PathError> {
        let kind = self
            .0
            .resource
            .or(default)
            .ok_or_else(|| PathError::NoResource {
                path: self.0.path.clone(),
            })?;
        let container = self.nested_with(key, &Nesting::new().register(false))?;
        Ok(Resource::new(client.clone(), container, kind, state))
    }
}

impl sealed::Sealed for Container {
    fn node(&self) -> &Arc<Node> {
        &self.0
    }
}

impl PathElement for Container {}

impl PartialEq for Container {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Container {}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Container \"{}\" at {}", self.0.key, self.0.path)
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("path", &self.0.path)
            .field("collection", &self.0.collection)
            .field("resource", &self.0.resource)
            .finish_non_exhaustive()
    }
}

// Verify tree handles are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Root>();
    assert_send_sync::<Container>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path_is_separator() {
        assert_eq!(Root::new().path(), "/");
    }

    #[test]
    fn test_container_path_under_root() {
        let root = Root::new();
        let widgets = root.nested("widgets").unwrap();
        assert_eq!(widgets.path(), "/widgets");
        assert_eq!(widgets.key(), "widgets");
    }

    #[test]
    fn test_container_path_nested() {
        let root = Root::new();
        let gears = root.nested("widgets").unwrap().nested("gears").unwrap();
        assert_eq!(gears.path(), "/widgets/gears");
    }

    #[test]
    fn test_nested_is_memoized() {
        let root = Root::new();
        let first = root.nested("widgets").unwrap();
        let second = root.nested("widgets").unwrap();
        let looked_up = root.nested_with("widgets", &Nesting::lookup()).unwrap();

        assert!(first.ptr_eq(&second));
        assert!(first.ptr_eq(&looked_up));
        assert_eq!(root.children(), vec!["widgets".to_string()]);
    }

    #[test]
    fn test_lookup_of_missing_child_fails() {
        let root = Root::new();
        let result = root.nested_with("widgets", &Nesting::lookup());
        assert_eq!(
            result.unwrap_err(),
            PathError::ContainerNotRegistered {
                key: "widgets".to_string(),
                parent: "/".to_string(),
            }
        );
    }

    #[test]
    fn test_unregistered_child_is_not_memoized() {
        let root = Root::new();
        let widgets = root.nested("widgets").unwrap();
        let nesting = Nesting::new().register(false);

        let first = widgets.nested_with("42", &nesting).unwrap();
        let second = widgets.nested_with("42", &nesting).unwrap();

        assert_eq!(first.path(), "/widgets/42");
        assert!(!first.ptr_eq(&second));
        assert!(widgets.children().is_empty());
    }

    #[test]
    fn test_key_validation() {
        let root = Root::new();
        assert_eq!(root.nested("").unwrap_err(), PathError::EmptyKey);
        assert!(matches!(
            root.nested("a/b"),
            Err(PathError::KeyContainsSeparator { key }) if key == "a/b"
        ));
        assert!(root.children().is_empty());
    }

    #[test]
    fn test_duplicate_registration() {
        let root = Root::new();
        Container::new(&root, "widgets", None, None, true).unwrap();
        let result = Container::new(&root, "widgets", None, None, true);

        assert_eq!(
            result.unwrap_err(),
            PathError::Duplicate {
                key: "widgets".to_string(),
                parent: "/".to_string(),
            }
        );
    }

    #[test]
    fn test_nested_binds_kinds_only_on_creation() {
        let root = Root::new();
        let nesting = Nesting::new()
            .collection(CollectionKind::namespace())
            .resource(ResourceKind::Plain);
        let api = root.nested_with("api", &nesting).unwrap();
        assert_eq!(api.resource_kind(), Some(ResourceKind::Plain));
        assert!(api.collection_kind().is_some());

        let again = root
            .nested_with("api", &Nesting::new().resource(ResourceKind::Lazy))
            .unwrap();
        assert_eq!(again.resource_kind(), Some(ResourceKind::Plain));
    }

    #[test]
    fn test_parent_links() {
        let root = Root::new();
        let widgets = root.nested("widgets").unwrap();
        let gears = widgets.nested("gears").unwrap();

        assert!(matches!(widgets.parent(), Some(Parent::Root(r)) if r.ptr_eq(&root)));
        assert!(matches!(gears.parent(), Some(Parent::Container(c)) if c == widgets));
    }

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("").unwrap_err(), PathError::EmptyPath);
        assert!(split_path("/").unwrap().is_empty());
        assert_eq!(split_path("/a/b/").unwrap(), vec!["a", "b"]);
        assert_eq!(split_path("a/b").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_path_segments_rejects_empty_segments() {
        assert_eq!(path_segments("/a/b").unwrap(), vec!["a", "b"]);
        assert_eq!(path_segments("/a//b").unwrap_err(), PathError::EmptyKey);
    }

    #[test]
    fn test_resolve_is_lazy_and_stops_after_error() {
        let root = Root::new();
        root.nested("widgets").unwrap();

        let mut walk = root.resolve("/widgets/missing/deeper").unwrap();
        assert_eq!(walk.next().unwrap().unwrap().path(), "/widgets");
        assert!(matches!(
            walk.next(),
            Some(Err(PathError::ContainerNotRegistered { .. }))
        ));
        assert!(walk.next().is_none());
    }

    #[test]
    fn test_resolve_with_create_registers() {
        let root = Root::new();
        let walked: Vec<Container> = root
            .resolve_with("/api/v1", Nesting::new())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(walked.len(), 2);
        assert_eq!(walked[1].path(), "/api/v1");
        assert_eq!(root.children(), vec!["api".to_string()]);
    }

    #[test]
    fn test_display() {
        let root = Root::new();
        let widgets = root.nested("widgets").unwrap();
        assert_eq!(root.to_string(), "Root \"/\"");
        assert_eq!(widgets.to_string(), "Container \"widgets\" at /widgets");
    }
}
