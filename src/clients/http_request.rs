//! Request-side types shared by handlers and transports.

use std::collections::HashMap;
use std::fmt;

/// Query parameters passed to a transport.
pub type Params = HashMap<String, String>;

/// Headers passed to a transport.
pub type Headers = HashMap<String, String>;

/// HTTP methods issued by the handlers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET, used by list and get.
    Get,
    /// HTTP POST, used by create.
    Post,
    /// HTTP PUT, used by update.
    Put,
    /// HTTP DELETE, used by delete.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// Optional query parameters and headers for a single operation.
///
/// # Example
///
/// ```rust
/// use rest_tree::clients::RequestOptions;
///
/// let options = RequestOptions::new()
///     .param("lang", "en-ru")
///     .header("X-Request-Id", "abc-123");
///
/// assert_eq!(options.params().get("lang"), Some(&"en-ru".to_string()));
/// assert_eq!(options.headers().len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
    params: Params,
    headers: Headers,
}

impl RequestOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Sets all headers at once.
    #[must_use]
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Adds a single header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Returns the query parameters.
    #[must_use]
    pub const fn params(&self) -> &Params {
        &self.params
    }

    /// Returns the headers.
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }
}
