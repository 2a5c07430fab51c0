//! One-shot handlers that turn an operation on a tree node into a single
//! transport call.
//!
//! | Handler | Method | URL form | Expected status |
//! |---|---|---|---|
//! | [`Create`] | POST | collection | 201 |
//! | [`List`] | GET | collection | 200 |
//! | [`Get`] | GET | resource | 200 |
//! | [`Put`] | PUT | resource | 200 |
//! | [`Delete`] | DELETE | resource | 204 |
//!
//! Any other status becomes [`ClientException`](crate::clients::ClientException)
//! carrying the status code, reason, and raw body.
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_tree::rest::{Dispatch, Get, Handler, PathElement};
//!
//! let item = client.root().nested("widgets")?.nested("42")?;
//! let state = Get::new(client.dispatch(), &item, &RequestOptions::new()).execute()?;
//! ```

use serde_json::Value;

use crate::clients::{
    status, Headers, HttpError, HttpMethod, HttpResponse, Params, RequestOptions, Serializer,
    Transport,
};
use crate::rest::{Host, Locator, PathElement};

/// The collaborators every handler needs: host, transport, and serializer.
#[derive(Clone, Copy, Debug)]
pub struct Dispatch<'a> {
    host: &'a Host,
    transport: &'a dyn Transport,
    serializer: &'a dyn Serializer,
}

impl<'a> Dispatch<'a> {
    /// Bundles the collaborators for a handler.
    #[must_use]
    pub const fn new(
        host: &'a Host,
        transport: &'a dyn Transport,
        serializer: &'a dyn Serializer,
    ) -> Self {
        Self {
            host,
            transport,
            serializer,
        }
    }

    /// Returns the host URLs are built against.
    #[must_use]
    pub const fn host(&self) -> &'a Host {
        self.host
    }
}

/// A single HTTP operation on a tree node.
///
/// `execute` consumes the handler, so each handler issues exactly one call.
pub trait Handler {
    /// The value produced on success.
    type Output;

    /// The HTTP method this handler issues.
    const METHOD: HttpMethod;

    /// The only status code accepted as success.
    const EXPECTED: u16;

    /// Performs the call and interprets the response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Response`] if the status differs from
    /// [`EXPECTED`](Self::EXPECTED), [`HttpError::Transport`] if no response
    /// was obtained, and [`HttpError::Serialization`] if a body could not be
    /// converted.
    fn execute(self) -> Result<Self::Output, HttpError>;
}

/// Per-call state shared by all handlers.
#[derive(Debug)]
struct Call<'a> {
    dispatch: Dispatch<'a>,
    locator: Locator,
    params: Params,
    headers: Headers,
}

impl<'a> Call<'a> {
    fn new<P: PathElement + ?Sized>(
        dispatch: Dispatch<'a>,
        target: &P,
        options: &RequestOptions,
    ) -> Self {
        Self {
            dispatch,
            locator: dispatch.host.locator(target),
            params: options.params().clone(),
            headers: options.headers().clone(),
        }
    }

    fn default_header(mut self, name: &str) -> Self {
        if !self.headers.keys().any(|k| k.eq_ignore_ascii_case(name)) {
            self.headers.insert(
                name.to_string(),
                self.dispatch.serializer.content_type().to_string(),
            );
        }
        self
    }

    fn accepting(self) -> Self {
        self.default_header("Accept")
    }

    fn sending(self) -> Self {
        self.default_header("Content-Type").accepting()
    }

    fn check(
        method: HttpMethod,
        url: &str,
        response: HttpResponse,
        expected: u16,
    ) -> Result<HttpResponse, HttpError> {
        response.expect_status(expected).map_err(|e| {
            tracing::debug!(
                %method,
                %url,
                code = e.code,
                expected,
                "unexpected response status"
            );
            HttpError::from(e)
        })
    }

    fn read(&self, response: &HttpResponse) -> Result<Value, HttpError> {
        Ok(self.dispatch.serializer.unserialize(&response.body)?)
    }
}

/// Creates an item with POST on the collection URL.
#[derive(Debug)]
pub struct Create<'a> {
    call: Call<'a>,
    data: &'a Value,
}

impl<'a> Create<'a> {
    /// Prepares a create call against `target`.
    #[must_use]
    pub fn new<P: PathElement + ?Sized>(
        dispatch: Dispatch<'a>,
        target: &P,
        data: &'a Value,
        options: &RequestOptions,
    ) -> Self {
        Self {
            call: Call::new(dispatch, target, options).sending(),
            data,
        }
    }
}

impl Handler for Create<'_> {
    type Output = Value;
    const METHOD: HttpMethod = HttpMethod::Post;
    const EXPECTED: u16 = status::CREATED;

    fn execute(self) -> Result<Value, HttpError> {
        let call = self.call;
        let url = call.locator.as_collection();
        let body = call.dispatch.serializer.serialize(self.data)?;
        tracing::debug!(method = %Self::METHOD, %url, "dispatching request");
        let response = call
            .dispatch
            .transport
            .post(&url, body, &call.params, &call.headers)?;
        let response = Call::check(Self::METHOD, &url, response, Self::EXPECTED)?;
        call.read(&response)
    }
}

/// Lists items with GET on the collection URL.
#[derive(Debug)]
pub struct List<'a> {
    call: Call<'a>,
}

impl<'a> List<'a> {
    /// Prepares a list call against `target`.
    #[must_use]
    pub fn new<P: PathElement + ?Sized>(
        dispatch: Dispatch<'a>,
        target: &P,
        options: &RequestOptions,
    ) -> Self {
        Self {
            call: Call::new(dispatch, target, options).accepting(),
        }
    }
}

impl Handler for List<'_> {
    type Output = Value;
    const METHOD: HttpMethod = HttpMethod::Get;
    const EXPECTED: u16 = status::OK;

    fn execute(self) -> Result<Value, HttpError> {
        let call = self.call;
        let url = call.locator.as_collection();
        tracing::debug!(method = %Self::METHOD, %url, "dispatching request");
        let response = call.dispatch.transport.get(&url, &call.params, &call.headers)?;
        let response = Call::check(Self::METHOD, &url, response, Self::EXPECTED)?;
        call.read(&response)
    }
}

/// Reads one item with GET on the resource URL.
#[derive(Debug)]
pub struct Get<'a> {
    call: Call<'a>,
}

impl<'a> Get<'a> {
    /// Prepares a get call against `target`.
    #[must_use]
    pub fn new<P: PathElement + ?Sized>(
        dispatch: Dispatch<'a>,
        target: &P,
        options: &RequestOptions,
    ) -> Self {
        Self {
            call: Call::new(dispatch, target, options).accepting(),
        }
    }
}

impl Handler for Get<'_> {
    type Output = Value;
    const METHOD: HttpMethod = HttpMethod::Get;
    const EXPECTED: u16 = status::OK;

    fn execute(self) -> Result<Value, HttpError> {
        let call = self.call;
        let url = call.locator.as_resource();
        tracing::debug!(method = %Self::METHOD, %url, "dispatching request");
        let response = call.dispatch.transport.get(&url, &call.params, &call.headers)?;
        let response = Call::check(Self::METHOD, &url, response, Self::EXPECTED)?;
        call.read(&response)
    }
}

/// Replaces one item with PUT on the resource URL.
#[derive(Debug)]
pub struct Put<'a> {
    call: Call<'a>,
    data: &'a Value,
}

impl<'a> Put<'a> {
    /// Prepares an update call against `target`.
    #[must_use]
    pub fn new<P: PathElement + ?Sized>(
        dispatch: Dispatch<'a>,
        target: &P,
        data: &'a Value,
        options: &RequestOptions,
    ) -> Self {
        Self {
            call: Call::new(dispatch, target, options).sending(),
            data,
        }
    }
}

impl Handler for Put<'_> {
    type Output = Value;
    const METHOD: HttpMethod = HttpMethod::Put;
    const EXPECTED: u16 = status::OK;

    fn execute(self) -> Result<Value, HttpError> {
        let call = self.call;
        let url = call.locator.as_resource();
        let body = call.dispatch.serializer.serialize(self.data)?;
        tracing::debug!(method = %Self::METHOD, %url, "dispatching request");
        let response = call
            .dispatch
            .transport
            .put(&url, body, &call.params, &call.headers)?;
        let response = Call::check(Self::METHOD, &url, response, Self::EXPECTED)?;
        call.read(&response)
    }
}

/// Removes one item with DELETE on the resource URL.
///
/// The serializer is never used: nothing is sent and the body of the
/// response is ignored.
#[derive(Debug)]
pub struct Delete<'a> {
    call: Call<'a>,
}

impl<'a> Delete<'a> {
    /// Prepares a delete call against `target`.
    #[must_use]
    pub fn new<P: PathElement + ?Sized>(
        dispatch: Dispatch<'a>,
        target: &P,
        options: &RequestOptions,
    ) -> Self {
        Self {
            call: Call::new(dispatch, target, options),
        }
    }
}

impl Handler for Delete<'_> {
    type Output = ();
    const METHOD: HttpMethod = HttpMethod::Delete;
    const EXPECTED: u16 = status::NO_CONTENT;

    fn execute(self) -> Result<(), HttpError> {
        let call = self.call;
        let url = call.locator.as_resource();
        tracing::debug!(method = %Self::METHOD, %url, "dispatching request");
        let response = call
            .dispatch
            .transport
            .delete(&url, &call.params, &call.headers)?;
        Call::check(Self::METHOD, &url, response, Self::EXPECTED)?;
        Ok(())
    }
}
