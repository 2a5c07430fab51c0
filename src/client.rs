//! The entry point of the library.

use std::fmt;
use std::sync::Arc;

use crate::clients::{JsonSerializer, ReqwestTransport, Serializer, Transport, TransportError};
use crate::config::ClientConfig;
use crate::rest::{
    path_segments, Collection, CollectionKind, Container, Dispatch, Host, PathElement, PathError,
    Resource, Root, SEP,
};

/// Entry point for navigating and calling a REST API.
///
/// A client owns the host, the root of the addressing tree, the transport,
/// and the serializer. Cloning is cheap: clones share all four, so every
/// controller handed out by a client refers back to the same tree.
///
/// # Thread Safety
///
/// `Client` is `Send + Sync`.
///
/// # Example
///
/// ```rust,no_run
/// use rest_tree::{Client, ClientConfig, Host};
///
/// let config = ClientConfig::builder()
///     .host(Host::new("https://api.example.com").unwrap())
///     .build()
///     .unwrap();
/// let client = Client::new(&config).unwrap();
///
/// let mut widget = client.collection("widgets").unwrap().resource("42").unwrap();
/// let state = widget.fetch().unwrap();
/// println!("{state}");
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    host: Host,
    root: Root,
    transport: Box<dyn Transport>,
    serializer: Box<dyn Serializer>,
}

// Verify Client is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Client>();
};

impl Client {
    /// Creates a client with the default transport and JSON serializer.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Build`] if the HTTP client cannot be
    /// initialized.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(Some(config))?;
        Ok(Self::with_transport(
            config.host().clone(),
            None,
            transport,
            JsonSerializer,
        ))
    }

    /// Creates a client from explicit collaborators.
    ///
    /// Passing an existing `root` lets several clients share one tree (and
    /// its bound kinds); otherwise a fresh root is created.
    pub fn with_transport(
        host: Host,
        root: Option<Root>,
        transport: impl Transport + 'static,
        serializer: impl Serializer + 'static,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                host,
                root: root.unwrap_or_default(),
                transport: Box::new(transport),
                serializer: Box::new(serializer),
            }),
        }
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &Host {
        &self.inner.host
    }

    /// Returns the root of the addressing tree.
    #[must_use]
    pub fn root(&self) -> &Root {
        &self.inner.root
    }

    /// Returns the transport.
    #[must_use]
    pub fn transport(&self) -> &dyn Transport {
        self.inner.transport.as_ref()
    }

    /// Returns the serializer.
    #[must_use]
    pub fn serializer(&self) -> &dyn Serializer {
        self.inner.serializer.as_ref()
    }

    /// Returns the collaborators handlers are built with.
    #[must_use]
    pub fn dispatch(&self) -> Dispatch<'_> {
        Dispatch::new(self.host(), self.transport(), self.serializer())
    }

    /// Returns the top-level collection `key`, registering its container.
    ///
    /// A collection kind bound to the container wins over the default.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] for an invalid key.
    pub fn collection(&self, key: &str) -> Result<Collection, PathError> {
        self.root()
            .nested(key)?
            .collection(self, Some(&CollectionKind::default()))
    }

    /// Rebuilds the controller chain for a path.
    ///
    /// `url` may be root-relative (`/widgets/42`) or absolute with this
    /// client's host as prefix. The first segment becomes a top-level
    /// collection. Each further segment under a collection is addressed as
    /// a resource, or as a nested collection when the collection has no
    /// resource kind; under a resource it is addressed as a collection.
    ///
    /// Every segment is checked before the tree is touched, so a failed
    /// resolve registers nothing.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::ForeignUrl`] for an absolute URL on another
    /// host, [`PathError::EmptyPath`] if `url` has no segments, or a key
    /// validation error for a malformed segment.
    pub fn resolve(&self, url: &str) -> Result<Controller, PathError> {
        let path = self.local_path(url)?;
        let mut segments = path_segments(path)?.into_iter();

        let top = segments.next().ok_or(PathError::EmptyPath)?;
        let mut current = Controller::Collection(self.collection(&top)?);
        for key in segments {
            current = match current {
                Controller::Collection(collection) => match collection.resource(&key) {
                    Ok(resource) => Controller::Resource(resource),
                    Err(PathError::NoResource { .. }) => {
                        Controller::Collection(collection.collection(&key)?)
                    }
                    Err(e) => return Err(e),
                },
                Controller::Resource(resource) => {
                    Controller::Collection(resource.collection(&key)?)
                }
            };
        }
        tracing::debug!(%url, path = %current.container().path(), "resolved controller");
        Ok(current)
    }

    /// Strips this client's host from `url`, keeping only the path.
    ///
    /// The host must end at a separator or at the end of `url`.
    fn local_path<'u>(&self, url: &'u str) -> Result<&'u str, PathError> {
        match url.strip_prefix(self.host().url()) {
            Some(rest) if rest.is_empty() || rest.starts_with(SEP) => Ok(rest),
            None if !url.contains("://") => Ok(url),
            _ => Err(PathError::ForeignUrl {
                url: url.to_string(),
            }),
        }
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("host", &self.inner.host)
            .field("root", &self.inner.root)
            .field("transport", &self.inner.transport)
            .field("serializer", &self.inner.serializer)
            .finish()
    }
}

/// A controller produced by [`Client::resolve`].
#[derive(Clone, Debug)]
pub enum Controller {
    /// The path ends at a collection.
    Collection(Collection),
    /// The path ends at a single item.
    Resource(Resource),
}

impl Controller {
    /// Returns the container the controller is bound to.
    #[must_use]
    pub const fn container(&self) -> &Container {
        match self {
            Self::Collection(c) => c.container(),
            Self::Resource(r) => r.container(),
        }
    }

    /// Returns the collection, if this is one.
    #[must_use]
    pub const fn as_collection(&self) -> Option<&Collection> {
        match self {
            Self::Collection(c) => Some(c),
            Self::Resource(_) => None,
        }
    }

    /// Returns the resource, if this is one.
    #[must_use]
    pub const fn as_resource(&self) -> Option<&Resource> {
        match self {
            Self::Resource(r) => Some(r),
            Self::Collection(_) => None,
        }
    }

    /// Converts into the collection, if this is one.
    #[must_use]
    pub fn into_collection(self) -> Option<Collection> {
        match self {
            Self::Collection(c) => Some(c),
            Self::Resource(_) => None,
        }
    }

    /// Converts into the resource, if this is one.
    #[must_use]
    pub fn into_resource(self) -> Option<Resource> {
        match self {
            Self::Resource(r) => Some(r),
            Self::Collection(_) => None,
        }
    }
}
