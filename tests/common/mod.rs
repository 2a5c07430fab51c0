//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use rest_tree::clients::{
    Headers, HttpMethod, HttpResponse, JsonSerializer, Params, Transport, TransportError,
};
use rest_tree::{Client, Host};

pub const HOST: &str = "https://api.example.com";

/// A call seen by [`MockTransport`].
#[derive(Clone, Debug)]
pub struct RecordedCall {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<Vec<u8>>,
    pub params: Params,
    pub headers: Headers,
}

impl RecordedCall {
    pub fn json_body(&self) -> serde_json::Value {
        serde_json::from_slice(self.body.as_deref().expect("call has no body"))
            .expect("body is not JSON")
    }
}

#[derive(Debug, Default)]
struct State {
    responses: VecDeque<HttpResponse>,
    calls: Vec<RecordedCall>,
}

/// In-memory transport that replays queued responses and records calls.
///
/// Clones share the same queue and log, so a test can keep a handle after
/// moving one into a client.
#[derive(Clone, Debug, Default)]
pub struct MockTransport {
    state: Arc<Mutex<State>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, code: u16, reason: &str, body: &str) -> &Self {
        self.state
            .lock()
            .unwrap()
            .responses
            .push_back(HttpResponse::new(code, reason, body.as_bytes().to_vec()));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn last_call(&self) -> RecordedCall {
        self.calls().pop().expect("no call was made")
    }

    fn record(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<Vec<u8>>,
        params: &Params,
        headers: &Headers,
    ) -> Result<HttpResponse, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RecordedCall {
            method,
            url: url.to_string(),
            body,
            params: params.clone(),
            headers: headers.clone(),
        });
        Ok(state
            .responses
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected {method} {url}")))
    }
}

impl Transport for MockTransport {
    fn get(
        &self,
        url: &str,
        params: &Params,
        headers: &Headers,
    ) -> Result<HttpResponse, TransportError> {
        self.record(HttpMethod::Get, url, None, params, headers)
    }

    fn post(
        &self,
        url: &str,
        data: Vec<u8>,
        params: &Params,
        headers: &Headers,
    ) -> Result<HttpResponse, TransportError> {
        self.record(HttpMethod::Post, url, Some(data), params, headers)
    }

    fn put(
        &self,
        url: &str,
        data: Vec<u8>,
        params: &Params,
        headers: &Headers,
    ) -> Result<HttpResponse, TransportError> {
        self.record(HttpMethod::Put, url, Some(data), params, headers)
    }

    fn delete(
        &self,
        url: &str,
        params: &Params,
        headers: &Headers,
    ) -> Result<HttpResponse, TransportError> {
        self.record(HttpMethod::Delete, url, None, params, headers)
    }
}

/// Builds a client for [`HOST`] backed by a fresh [`MockTransport`].
pub fn mock_client() -> (Client, MockTransport) {
    let transport = MockTransport::new();
    let client = Client::with_transport(
        Host::new(HOST).unwrap(),
        None,
        transport.clone(),
        JsonSerializer,
    );
    (client, transport)
}
