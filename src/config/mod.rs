//! Connection configuration for the Directus client.
//!
//! # Overview
//!
//! - [`DirectusConfig`]: immutable connection settings
//! - [`DirectusConfigBuilder`]: builder for [`DirectusConfig`]
//! - [`InstanceUrl`]: a validated base URL of the Directus instance
//! - [`AccessToken`]: a static bearer token with masked debug output
//!
//! Logging goes through `tracing`; the host application decides where it
//! ends up by installing a subscriber. Body logging is opt-in.
//!
//! # Example
//!
//! ```rust
//! use directus_api::{AccessToken, DirectusConfig, InstanceUrl};
//!
//! let config = DirectusConfig::builder()
//!     .instance(InstanceUrl::new("https://cms.example.com").unwrap())
//!     .token(AccessToken::new("static-token").unwrap())
//!     .body_logging(true)
//!     .build()
//!     .unwrap();
//!
//! assert!(config.body_logging());
//! ```

mod newtypes;

pub use newtypes::{AccessToken, InstanceUrl};

use crate::error::ConfigError;

/// Configuration for a Directus connection.
///
/// # Thread Safety
///
/// `DirectusConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct DirectusConfig {
    instance: InstanceUrl,
    token: AccessToken,
    body_logging: bool,
    user_agent_prefix: Option<String>,
}

impl DirectusConfig {
    /// Creates a new builder for constructing a `DirectusConfig`.
    #[must_use]
    pub fn builder() -> DirectusConfigBuilder {
        DirectusConfigBuilder::new()
    }

    /// Returns the instance URL.
    #[must_use]
    pub const fn instance(&self) -> &InstanceUrl {
        &self.instance
    }

    /// Returns the access token.
    #[must_use]
    pub const fn token(&self) -> &AccessToken {
        &self.token
    }

    /// Returns whether raw request and response bodies are logged.
    #[must_use]
    pub const fn body_logging(&self) -> bool {
        self.body_logging
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify DirectusConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DirectusConfig>();
};

/// Builder for constructing [`DirectusConfig`] instances.
///
/// `instance` and `token` are required.
///
/// # Defaults
///
/// - `body_logging`: `false`
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct DirectusConfigBuilder {
    instance: Option<InstanceUrl>,
    token: Option<AccessToken>,
    body_logging: Option<bool>,
    user_agent_prefix: Option<String>,
}

impl DirectusConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the instance URL (required).
    #[must_use]
    pub fn instance(mut self, instance: InstanceUrl) -> Self {
        self.instance = Some(instance);
        self
    }

    /// Sets the access token (required).
    #[must_use]
    pub fn token(mut self, token: AccessToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Enables logging of raw request and response bodies at debug level.
    #[must_use]
    pub const fn body_logging(mut self, enabled: bool) -> Self {
        self.body_logging = Some(enabled);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`DirectusConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `instance` or `token`
    /// are not set.
    pub fn build(self) -> Result<DirectusConfig, ConfigError> {
        let instance = self
            .instance
            .ok_or(ConfigError::MissingRequiredField { field: "instance" })?;
        let token = self
            .token
            .ok_or(ConfigError::MissingRequiredField { field: "token" })?;

        Ok(DirectusConfig {
            instance,
            token,
            body_logging: self.body_logging.unwrap_or(false),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance() -> InstanceUrl {
        InstanceUrl::new("https://cms.example.com").unwrap()
    }

    fn token() -> AccessToken {
        AccessToken::new("static-token").unwrap()
    }

    #[test]
    fn test_builder_requires_instance() {
        let result = DirectusConfigBuilder::new().token(token()).build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "instance" })
        ));
    }

    #[test]
    fn test_builder_requires_token() {
        let result = DirectusConfigBuilder::new().instance(instance()).build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "token" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = DirectusConfig::builder()
            .instance(instance())
            .token(token())
            .build()
            .unwrap();

        assert_eq!(config.instance().as_ref(), "https://cms.example.com");
        assert_eq!(config.token().as_ref(), "static-token");
        assert!(!config.body_logging());
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = DirectusConfig::builder()
            .instance(instance())
            .token(token())
            .body_logging(true)
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();

        assert!(config.body_logging());
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
    }

    #[test]
    fn test_config_debug_does_not_leak_token() {
        let config = DirectusConfig::builder()
            .instance(instance())
            .token(token())
            .build()
            .unwrap();

        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("DirectusConfig"));
        assert!(!debug_str.contains("static-token"));
    }
}
