//! Kinds bound to containers, deciding how a node is materialized.
//!
//! A container can carry a [`CollectionKind`] (used when the node is
//! addressed as a collection) and a [`ResourceKind`] (used when one of its
//! items is addressed as a resource). Kinds are plain values chosen when the
//! tree is built, so every endpoint can have its own key policy and resource
//! behavior.
//!
//! # Example
//!
//! ```rust
//! use rest_tree::rest::{CollectionKind, KeyFunc, ResourceKind};
//! use serde_json::json;
//!
//! let kind = CollectionKind::new()
//!     .with_keyfunc(KeyFunc::field("id"))
//!     .with_resource(ResourceKind::Plain);
//!
//! assert_eq!(kind.keyfunc().key_for(&json!({"id": 7})), Some("7".to_string()));
//! assert_eq!(kind.resource(), Some(ResourceKind::Plain));
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// The field read by the default key function.
pub const DEFAULT_KEY_FIELD: &str = "uuid";

type KeyFn = dyn Fn(&Value) -> Option<String> + Send + Sync;

/// Derives the tree key of an item from its state.
///
/// The default reads the `uuid` field. Strings are used as-is and numbers
/// are rendered in decimal; any other value yields no key.
#[derive(Clone)]
pub struct KeyFunc(Arc<KeyFn>);

impl KeyFunc {
    /// Wraps an arbitrary key derivation function.
    pub fn new(f: impl Fn(&Value) -> Option<String> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Reads the key from a top-level field of the state.
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(move |state| state.get(&name).and_then(scalar_key))
    }

    /// Returns the key for `state`, if one can be derived.
    #[must_use]
    pub fn key_for(&self, state: &Value) -> Option<String> {
        (self.0)(state)
    }
}

impl Default for KeyFunc {
    fn default() -> Self {
        Self::field(DEFAULT_KEY_FIELD)
    }
}

impl fmt::Debug for KeyFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeyFunc(..)")
    }
}

fn scalar_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// How a single item is materialized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Reads go through explicit `fetch` calls only.
    Plain,
    /// Field access fetches the state on first use.
    #[default]
    Lazy,
}

/// How a node addressed as a collection behaves.
///
/// Carries the key function used by `create` and `list`, and the resource
/// kind used when an item is addressed without an explicit kind. A kind
/// with no resource (see [`namespace`](Self::namespace)) marks nodes such as
/// `api` or `v1` whose children are collections rather than items.
#[derive(Clone, Debug)]
pub struct CollectionKind {
    keyfunc: KeyFunc,
    resource: Option<ResourceKind>,
}

impl Default for CollectionKind {
    fn default() -> Self {
        Self {
            keyfunc: KeyFunc::default(),
            resource: Some(ResourceKind::default()),
        }
    }
}

impl CollectionKind {
    /// Creates the default kind: `uuid` keys and lazy resources.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a kind whose children are never addressed as resources by
    /// default.
    #[must_use]
    pub fn namespace() -> Self {
        Self {
            keyfunc: KeyFunc::default(),
            resource: None,
        }
    }

    /// Replaces the key function.
    #[must_use]
    pub fn with_keyfunc(mut self, keyfunc: KeyFunc) -> Self {
        self.keyfunc = keyfunc;
        self
    }

    /// Sets the default resource kind for items.
    #[must_use]
    pub const fn with_resource(mut self, kind: ResourceKind) -> Self {
        self.resource = Some(kind);
        self
    }

    /// Returns the key function.
    #[must_use]
    pub const fn keyfunc(&self) -> &KeyFunc {
        &self.keyfunc
    }

    /// Returns the default resource kind, if any.
    #[must_use]
    pub const fn resource(&self) -> Option<ResourceKind> {
        self.resource
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_keyfunc_reads_uuid_string() {
        let key = KeyFunc::default().key_for(&json!({"uuid": "7", "name": "gear"}));
        assert_eq!(key, Some("7".to_string()));
    }

    #[test]
    fn test_default_keyfunc_renders_numbers() {
        let key = KeyFunc::default().key_for(&json!({"uuid": 42}));
        assert_eq!(key, Some("42".to_string()));
    }

    #[test]
    fn test_default_keyfunc_missing_field() {
        assert_eq!(KeyFunc::default().key_for(&json!({"id": "7"})), None);
        assert_eq!(KeyFunc::default().key_for(&json!({"uuid": null})), None);
        assert_eq!(KeyFunc::default().key_for(&json!(["7"])), None);
    }

    #[test]
    fn test_custom_keyfunc() {
        let keyfunc = KeyFunc::new(|state| {
            state["meta"]["slug"].as_str().map(str::to_uppercase)
        });
        let key = keyfunc.key_for(&json!({"meta": {"slug": "gear"}}));
        assert_eq!(key, Some("GEAR".to_string()));
    }

    #[test]
    fn test_default_collection_kind_uses_lazy_resources() {
        let kind = CollectionKind::default();
        assert_eq!(kind.resource(), Some(ResourceKind::Lazy));
    }

    #[test]
    fn test_namespace_kind_has_no_resource() {
        assert_eq!(CollectionKind::namespace().resource(), None);
    }
}
