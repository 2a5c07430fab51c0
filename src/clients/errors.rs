//! Transport-level error types.
//!
//! - [`ClientException`]: the response status did not match the status the
//!   operation expects
//! - [`TransportError`]: the transport could not produce a response at all
//! - [`SerializerError`]: a payload could not be encoded or decoded
//! - [`HttpError`]: unified error returned by every handler
//!
//! # Example
//!
//! ```rust,ignore
//! match resource.fetch() {
//!     Ok(state) => println!("{state}"),
//!     Err(ResourceError::Http(HttpError::Response(e))) => {
//!         println!("API error {} ({}): {}", e.code, e.reason, e.body_text());
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use std::error::Error as StdError;

use thiserror::Error;

/// Boxed error produced by a pluggable transport or serializer.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Error returned when a response carries an unexpected status code.
///
/// The full response is kept so the caller can inspect it. There is no
/// distinction between client and server errors and the body is never
/// parsed.
///
/// # Example
///
/// ```rust
/// use rest_tree::clients::ClientException;
///
/// let error = ClientException::new(404, "Not Found", b"{\"error\":\"missing\"}".to_vec());
/// assert_eq!(error.code, 404);
/// assert_eq!(error.body_text(), r#"{"error":"missing"}"#);
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Request failed with status {code} ({reason})")]
pub struct ClientException {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The reason phrase of the response.
    pub reason: String,
    /// The raw response body.
    pub body: Vec<u8>,
}

impl ClientException {
    /// Creates a new exception from the parts of a response.
    #[must_use]
    pub fn new(code: u16, reason: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            code,
            reason: reason.into(),
            body,
        }
    }

    /// Returns the body as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Error returned when the transport fails before a response is received.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[source] BoxError),

    /// The transport could not be constructed.
    #[error("Failed to build transport: {0}")]
    Build(#[source] BoxError),
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_builder() {
            Self::Build(Box::new(error))
        } else {
            Self::Network(Box::new(error))
        }
    }
}

/// Error returned when a payload cannot be converted.
#[derive(Debug, Error)]
pub enum SerializerError {
    /// A structured value could not be encoded.
    #[error("Failed to serialize payload: {0}")]
    Serialize(#[source] BoxError),

    /// A raw body could not be decoded.
    #[error("Failed to unserialize payload: {0}")]
    Unserialize(#[source] BoxError),
}

/// Unified error type for a single dispatched call.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The response status did not match the expected status.
    #[error(transparent)]
    Response(#[from] ClientException),

    /// The transport failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The payload could not be converted.
    #[error(transparent)]
    Serialization(#[from] SerializerError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_exception_message_includes_code_and_reason() {
        let error = ClientException::new(404, "Not Found", Vec::new());
        let message = error.to_string();
        assert!(message.contains("404"));
        assert!(message.contains("Not Found"));
    }

    #[test]
    fn test_client_exception_keeps_body_verbatim() {
        let body = vec![0xff, b'{', b'}'];
        let error = ClientException::new(500, "Internal Server Error", body.clone());
        assert_eq!(error.body, body);
        assert!(error.body_text().ends_with("{}"));
    }

    #[test]
    fn test_http_error_wraps_client_exception_transparently() {
        let error: HttpError = ClientException::new(409, "Conflict", Vec::new()).into();
        assert!(matches!(error, HttpError::Response(ref e) if e.code == 409));
        assert_eq!(error.to_string(), "Request failed with status 409 (Conflict)");
    }

    #[test]
    fn test_serializer_error_message() {
        let source: BoxError = "bad token".into();
        let error = SerializerError::Unserialize(source);
        assert!(error.to_string().contains("bad token"));
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let _: &dyn StdError = &ClientException::new(400, "Bad Request", Vec::new());
        let _: &dyn StdError = &TransportError::Network("refused".into());
        let _: &dyn StdError = &SerializerError::Serialize("boom".into());
    }
}
