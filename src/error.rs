//! Error types for building a Directus connection.
//!
//! Configuration constructors return `Result<T, ConfigError>` so that an
//! invalid instance URL or an empty token is rejected before any request is
//! made. Errors raised while talking to the server live in
//! [`crate::clients::HttpError`] and [`crate::rest::ResourceError`].
//!
//! # Example
//!
//! ```rust
//! use directus_api::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring a Directus connection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The static access token is empty.
    #[error("Access token cannot be empty. Please provide a valid Directus static token.")]
    EmptyAccessToken,

    /// The instance URL is not an absolute http(s) URL.
    #[error("Invalid instance URL '{url}'. Expected an absolute URL such as 'https://cms.example.com'.")]
    InvalidInstanceUrl {
        /// The URL that was provided.
        url: String,
    },

    /// A required field was not set on the builder.
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
    fn test_empty_access_token_error_message() {
        let message = ConfigError::EmptyAccessToken.to_string();
        assert!(message.contains("Access token cannot be empty"));
    }

    #[test]
    fn test_invalid_instance_url_error_message() {
        let error = ConfigError::InvalidInstanceUrl {
            url: "cms.example.com".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("cms.example.com"));
        assert!(message.contains("absolute URL"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "token" };
        let message = error.to_string();
        assert!(message.contains("token"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyAccessToken;
        let _: &dyn std::error::Error = &error;
    }
}
