//! Transports that perform the actual HTTP exchange.
//!
//! The [`Transport`] trait is the seam between the dispatch engine and the
//! network. [`ReqwestTransport`] is the default implementation, built on the
//! blocking `reqwest` client.

use std::fmt;

use crate::clients::errors::TransportError;
use crate::clients::http_request::{Headers, HttpMethod, Params};
use crate::clients::http_response::HttpResponse;
use crate::config::ClientConfig;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Performs HTTP calls on behalf of the handlers.
///
/// Every method blocks until a response is available. A response with any
/// status code is a success at this level; status interpretation belongs to
/// the handlers.
pub trait Transport: Send + Sync + fmt::Debug {
    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if no response could be obtained.
    fn get(
        &self,
        url: &str,
        params: &Params,
        headers: &Headers,
    ) -> Result<HttpResponse, TransportError>;

    /// Sends a POST request with `data` as the body.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if no response could be obtained.
    fn post(
        &self,
        url: &str,
        data: Vec<u8>,
        params: &Params,
        headers: &Headers,
    ) -> Result<HttpResponse, TransportError>;

    /// Sends a PUT request with `data` as the body.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if no response could be obtained.
    fn put(
        &self,
        url: &str,
        data: Vec<u8>,
        params: &Params,
        headers: &Headers,
    ) -> Result<HttpResponse, TransportError>;

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if no response could be obtained.
    fn delete(
        &self,
        url: &str,
        params: &Params,
        headers: &Headers,
    ) -> Result<HttpResponse, TransportError>;
}

/// Blocking HTTP transport backed by `reqwest`.
///
/// The transport adds a `User-Agent` header and any default headers from
/// the [`ClientConfig`] to every request. Per-call headers win over default
/// headers with the same name.
///
/// # Example
///
/// ```rust,no_run
/// use rest_tree::clients::{ReqwestTransport, Transport};
/// use std::collections::HashMap;
///
/// let transport = ReqwestTransport::new(None).unwrap();
/// let response = transport
///     .get("https://api.example.com/widgets/", &HashMap::new(), &HashMap::new())
///     .unwrap();
/// println!("{} {}", response.code, response.reason);
/// ```
#[derive(Debug)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
    default_headers: Headers,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a new transport.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Build`] if the TLS backend cannot be
    /// initialized.
    pub fn new(config: Option<&ClientConfig>) -> Result<Self, TransportError> {
        let user_agent_prefix = config
            .and_then(ClientConfig::user_agent_prefix)
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}rest-tree v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = Headers::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        if let Some(config) = config {
            for (key, value) in config.default_headers() {
                default_headers.insert(key.clone(), value.clone());
            }
        }

        let client = reqwest::blocking::Client::builder()
            .use_rustls_tls()
            .build()?;

        Ok(Self {
            client,
            default_headers,
        })
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &Headers {
        &self.default_headers
    }

    /// Default headers overlaid with the per-call `headers`.
    ///
    /// Header names compare case-insensitively, so a per-call `user-agent`
    /// replaces the default `User-Agent` instead of being sent next to it.
    fn merged_headers(&self, headers: &Headers) -> Headers {
        let mut merged = self.default_headers.clone();
        for (key, value) in headers {
            merged.retain(|name, _| !name.eq_ignore_ascii_case(key));
            merged.insert(key.clone(), value.clone());
        }
        merged
    }

    fn send(
        &self,
        method: HttpMethod,
        url: &str,
        data: Option<Vec<u8>>,
        params: &Params,
        headers: &Headers,
    ) -> Result<HttpResponse, TransportError> {
        let merged = self.merged_headers(headers);

        let mut builder = match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
            HttpMethod::Delete => self.client.delete(url),
        };

        for (key, value) in &merged {
            builder = builder.header(key, value);
        }
        if !params.is_empty() {
            builder = builder.query(params);
        }
        if let Some(data) = data {
            builder = builder.body(data);
        }

        let res = builder.send()?;
        let status = res.status();
        let reason = status.canonical_reason().unwrap_or_default().to_string();
        let body = res.bytes()?.to_vec();

        Ok(HttpResponse::new(status.as_u16(), reason, body))
    }
}

impl Transport for ReqwestTransport {
    fn get(
        &self,
        url: &str,
        params: &Params,
        headers: &Headers,
    ) -> Result<HttpResponse, TransportError> {
        self.send(HttpMethod::Get, url, None, params, headers)
    }

    fn post(
        &self,
        url: &str,
        data: Vec<u8>,
        params: &Params,
        headers: &Headers,
    ) -> Result<HttpResponse, TransportError> {
        self.send(HttpMethod::Post, url, Some(data), params, headers)
    }

    fn put(
        &self,
        url: &str,
        data: Vec<u8>,
        params: &Params,
        headers: &Headers,
    ) -> Result<HttpResponse, TransportError> {
        self.send(HttpMethod::Put, url, Some(data), params, headers)
    }

    fn delete(
        &self,
        url: &str,
        params: &Params,
        headers: &Headers,
    ) -> Result<HttpResponse, TransportError> {
        self.send(HttpMethod::Delete, url, None, params, headers)
    }
}
