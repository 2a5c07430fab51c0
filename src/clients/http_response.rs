//! Response type returned by transports.

use crate::clients::errors::ClientException;

/// Status codes the handlers treat as success.
pub mod status {
    /// 200 OK, expected by list, get and update.
    pub const OK: u16 = 200;
    /// 201 Created, expected by create.
    pub const CREATED: u16 = 201;
    /// 204 No Content, expected by delete.
    pub const NO_CONTENT: u16 = 204;
}

/// A raw response produced by a [`Transport`](crate::clients::Transport).
///
/// The body is kept as bytes; decoding is the serializer's job.
///
/// # Example
///
/// ```rust
/// use rest_tree::clients::HttpResponse;
///
/// let response = HttpResponse::new(200, "OK", br#"{"id":"42"}"#.to_vec());
/// assert_eq!(response.code, 200);
/// assert_eq!(response.reason, "OK");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// The reason phrase.
    pub reason: String,
    /// The raw body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new response.
    #[must_use]
    pub fn new(code: u16, reason: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            code,
            reason: reason.into(),
            body,
        }
    }

    /// Returns the response if its status matches `expected`, otherwise the
    /// whole response wrapped in a [`ClientException`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientException`] when `code != expected`.
    pub fn expect_status(self, expected: u16) -> Result<Self, ClientException> {
        if self.code == expected {
            Ok(self)
        } else {
            Err(self.into())
        }
    }
}

impl From<HttpResponse> for ClientException {
    fn from(response: HttpResponse) -> Self {
        Self::new(response.code, response.reason, response.body)
    }
}
