//! Transport and serialization layer.
//!
//! This module holds the pluggable capabilities the dispatch engine relies
//! on, plus their default implementations:
//!
//! - [`Transport`]: performs a GET/POST/PUT/DELETE and returns an
//!   [`HttpResponse`] (status code, reason, raw body)
//! - [`ReqwestTransport`]: blocking `reqwest` implementation of [`Transport`]
//! - [`Serializer`]: converts structured values to and from wire payloads
//! - [`JsonSerializer`]: `serde_json` implementation of [`Serializer`]
//! - [`RequestOptions`]: per-call query parameters and headers
//! - [`HttpError`]: unified error for a single dispatched call
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_tree::clients::{JsonSerializer, ReqwestTransport};
//! use rest_tree::{Client, Host};
//!
//! let transport = ReqwestTransport::new(None)?;
//! let client = Client::with_transport(
//!     Host::new("https://api.example.com")?,
//!     None,
//!     transport,
//!     JsonSerializer,
//! );
//! ```

mod errors;
mod http_request;
mod http_response;
mod serializer;
mod transport;

pub use errors::{BoxError, ClientException, HttpError, SerializerError, TransportError};
pub use http_request::{Headers, HttpMethod, Params, RequestOptions};
pub use http_response::{status, HttpResponse};
pub use serializer::{JsonSerializer, Serializer};
pub use transport::{ReqwestTransport, Transport, SDK_VERSION};
