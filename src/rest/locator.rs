//! URL computation for tree nodes.
//!
//! A [`Locator`] turns a node of the addressing tree into a URL, either in
//! collection form (with a trailing separator) or in resource form. A
//! [`Host`] supplies the optional base URL prefix.

use std::fmt;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::rest::path::{Node, PathElement, SEP};

/// A validated base URL for an API.
///
/// The URL must have an alphabetic scheme followed by `://` and a non-empty
/// host, so a bare `localhost:8080` is rejected. The host may be a bracketed
/// IPv6 literal. The URL may carry a base path (such as `/v2`). A single
/// trailing separator is stripped so the host can be joined with node paths.
///
/// # Example
///
/// ```rust
/// use rest_tree::Host;
///
/// let host = Host::new("https://api.example.com/").unwrap();
/// assert_eq!(host.url(), "https://api.example.com");
/// assert_eq!(host.scheme(), "https");
/// assert_eq!(host.host_name(), "api.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Host {
    url: String,
    scheme_end: usize,
    host_end: usize,
}

impl Host {
    /// Creates a new validated host.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyHostUrl`] if `url` is empty or blank, and
    /// [`ConfigError::InvalidHostUrl`] if it has no valid scheme or host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim();
        if url.is_empty() {
            return Err(ConfigError::EmptyHostUrl);
        }
        let url = url.strip_suffix(SEP).unwrap_or(url).to_string();
        let invalid = || ConfigError::InvalidHostUrl { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        let host_end = if remainder.starts_with('[') {
            // IPv6 literal: the host runs to the closing bracket
            remainder.find(']').ok_or_else(invalid)? + host_start + 1
        } else {
            remainder
                .find([':', '/', '?', '#'])
                .map_or(url.len(), |i| host_start + i)
        };
        if host_end == host_start {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_end,
        })
    }

    /// Returns the base URL, without a trailing separator.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the URL scheme (e.g. "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.scheme_end + 3..self.host_end]
    }

    /// Returns a locator for `element` prefixed with this host.
    #[must_use]
    pub fn locator<P: PathElement + ?Sized>(&self, element: &P) -> Locator {
        element.locator().with_host(self.clone())
    }
}

impl AsRef<str> for Host {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Host \"{}\"", self.url)
    }
}

/// Computes the URL forms of a tree node.
///
/// Locators are cheap and built on demand; both forms are computed at call
/// time from the node path and the current host binding.
///
/// For a container, [`as_collection`](Self::as_collection) is
/// [`as_resource`](Self::as_resource) plus a trailing separator. The root
/// has no terminal segment, so both of its forms are equal.
#[derive(Clone, Debug)]
pub struct Locator {
    node: Arc<Node>,
    host: Option<Host>,
}

impl Locator {
    pub(crate) const fn new(node: Arc<Node>) -> Self {
        Self { node, host: None }
    }

    /// Binds this locator to `host`.
    #[must_use]
    pub fn with_host(mut self, host: Host) -> Self {
        self.host = Some(host);
        self
    }

    /// Returns the bound host, if any.
    #[must_use]
    pub const fn host(&self) -> Option<&Host> {
        self.host.as_ref()
    }

    /// Returns the URL addressing the node as a single resource.
    #[must_use]
    pub fn as_resource(&self) -> String {
        match &self.host {
            Some(host) => format!("{}{}", host.url(), self.node.path()),
            None => self.node.path().to_string(),
        }
    }

    /// Returns the URL addressing the node as a collection.
    #[must_use]
    pub fn as_collection(&self) -> String {
        let mut url = self.as_resource();
        if !self.node.is_root() {
            url.push(SEP);
        }
        url
    }
}
