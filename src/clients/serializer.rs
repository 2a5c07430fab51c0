//! Serialization strategies for request and response payloads.

use std::fmt;

use serde_json::Value;

use crate::clients::errors::SerializerError;

/// Converts structured values to and from wire payloads.
///
/// Structured values are always [`serde_json::Value`]; the wire format is up
/// to the implementation.
pub trait Serializer: Send + Sync + fmt::Debug {
    /// The MIME type of the payloads produced by [`serialize`](Self::serialize).
    fn content_type(&self) -> &'static str;

    /// Encodes a structured value into a wire payload.
    ///
    /// # Errors
    ///
    /// Returns [`SerializerError::Serialize`] if the value cannot be encoded.
    fn serialize(&self, value: &Value) -> Result<Vec<u8>, SerializerError>;

    /// Decodes a wire payload into a structured value.
    ///
    /// # Errors
    ///
    /// Returns [`SerializerError::Unserialize`] if the payload is malformed.
    fn unserialize(&self, raw: &[u8]) -> Result<Value, SerializerError>;
}

/// JSON serializer backed by `serde_json`.
///
/// # Example
///
/// ```rust
/// use rest_tree::clients::{JsonSerializer, Serializer};
/// use serde_json::json;
///
/// let serializer = JsonSerializer;
/// let raw = serializer.serialize(&json!({"name": "gear"})).unwrap();
/// assert_eq!(raw, br#"{"name":"gear"}"#);
/// assert_eq!(serializer.unserialize(&raw).unwrap(), json!({"name": "gear"}));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn serialize(&self, value: &Value) -> Result<Vec<u8>, SerializerError> {
        serde_json::to_vec(value).map_err(|e| SerializerError::Serialize(Box::new(e)))
    }

    fn unserialize(&self, raw: &[u8]) -> Result<Value, SerializerError> {
        serde_json::from_slice(raw).map_err(|e| SerializerError::Unserialize(Box::new(e)))
    }
}
