//! Configuration error types.
//!
//! All configuration constructors return `Result<T, ConfigError>` so that an
//! invalid host or an incomplete builder is reported before any request is
//! dispatched.
//!
//! # Example
//!
//! ```rust
//! use rest_tree::{ConfigError, Host};
//!
//! let result = Host::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyHostUrl)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring a client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Host URL cannot be empty.
    #[error("Host URL cannot be empty. Please provide a base URL such as 'https://api.example.com'.")]
    EmptyHostUrl,

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://api.example.com').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_host_url_error_message() {
        let message = ConfigError::EmptyHostUrl.to_string();
        assert!(message.contains("Host URL cannot be empty"));
    }

    #[test]
    fn test_invalid_host_url_error_message() {
        let error = ConfigError::InvalidHostUrl {
            url: "not a url".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("not a url"));
        assert!(message.contains("with scheme"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "host" };
        let message = error.to_string();
        assert!(message.contains("host"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyHostUrl;
        let _: &dyn std::error::Error = &error;
    }
}
