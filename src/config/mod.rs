//! Client configuration.
//!
//! - [`ClientConfig`]: the settings a [`Client`](crate::Client) is built from
//! - [`ClientConfigBuilder`]: a builder for constructing [`ClientConfig`]
//!
//! # Example
//!
//! ```rust
//! use rest_tree::{ClientConfig, Host};
//!
//! let config = ClientConfig::builder()
//!     .host(Host::new("https://api.example.com").unwrap())
//!     .user_agent_prefix("MyApp/1.0")
//!     .default_header("Accept-Language", "en")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.host().url(), "https://api.example.com");
//! ```

use crate::clients::Headers;
use crate::error::ConfigError;
use crate::rest::Host;

/// Configuration for a [`Client`](crate::Client).
///
/// Only the host is required. The user agent prefix and default headers are
/// applied by the default [`ReqwestTransport`](crate::clients::ReqwestTransport).
#[derive(Clone, Debug)]
pub struct ClientConfig {
    host: Host,
    user_agent_prefix: Option<String>,
    default_headers: Headers,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the base URL of the API.
    #[must_use]
    pub const fn host(&self) -> &Host {
        &self.host
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &Headers {
        &self.default_headers
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// # Defaults
///
/// - `user_agent_prefix`: `None`
/// - default headers: empty
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    host: Option<Host>,
    user_agent_prefix: Option<String>,
    default_headers: Headers,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the host (required).
    #[must_use]
    pub fn host(mut self, host: Host) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Adds a header sent with every request.
    #[must_use]
    pub fn default_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Builds the [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `host` is not set.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let host = self
            .host
            .ok_or(ConfigError::MissingRequiredField { field: "host" })?;

        Ok(ClientConfig {
            host,
            user_agent_prefix: self.user_agent_prefix,
            default_headers: self.default_headers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_host() {
        let result = ClientConfigBuilder::new().user_agent_prefix("MyApp").build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "host" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = ClientConfig::builder()
            .host(Host::new("https://api.example.com/").unwrap())
            .build()
            .unwrap();

        assert_eq!(config.host().url(), "https://api.example.com");
        assert!(config.user_agent_prefix().is_none());
        assert!(config.default_headers().is_empty());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = ClientConfig::builder()
            .host(Host::new("https://api.example.com").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .default_header("X-Tenant", "acme")
            .default_header("Accept-Language", "en")
            .build()
            .unwrap();

        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
        assert_eq!(config.default_headers().len(), 2);
        assert_eq!(
            config.default_headers().get("X-Tenant"),
            Some(&"acme".to_string())
        );
    }

    #[test]
    fn test_config_is_clone_and_debug() {
        let config = ClientConfig::builder()
            .host(Host::new("https://api.example.com").unwrap())
            .build()
            .unwrap();

        let cloned = config.clone();
        assert_eq!(cloned.host(), config.host());
        assert!(format!("{config:?}").contains("ClientConfig"));
    }
}
