//! Validated newtype wrappers for connection values.
//!
//! Invalid values are rejected on construction so that a built
//! [`DirectusConfig`](super::DirectusConfig) always describes a usable
//! connection.

use crate::error::ConfigError;
use std::fmt;
use url::Url;

/// A validated Directus instance URL.
///
/// The URL must carry an `http` or `https` scheme and a host, and no query
/// or fragment. Trailing slashes are trimmed so paths can be appended
/// directly.
///
/// # Example
///
/// ```rust
/// use directus_api::InstanceUrl;
///
/// let url = InstanceUrl::new("https://cms.example.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://cms.example.com");
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), "cms.example.com");
/// assert_eq!(url.join("/items/articles").as_str(), "https://cms.example.com/items/articles");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstanceUrl {
    url: Url,
    base: String,
}

impl InstanceUrl {
    /// Creates a new validated instance URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidInstanceUrl`] if the URL does not parse,
    /// has no `http`/`https` scheme or no host, or carries a query or
    /// fragment.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = url.into();
        let trimmed = raw.trim();
        let invalid = || ConfigError::InvalidInstanceUrl {
            url: trimmed.to_string(),
        };

        let mut url = Url::parse(trimmed).map_err(|_| invalid())?;
        if !matches!(url.scheme(), "http" | "https")
            || url.host_str().map_or(true, str::is_empty)
            || url.query().is_some()
            || url.fragment().is_some()
        {
            return Err(invalid());
        }

        let path = url.path().trim_end_matches('/').to_string();
        url.set_path(&path);
        let base = url.as_str().trim_end_matches('/').to_string();

        Ok(Self { url, base })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// Returns the host: a domain, an IPv4 address, or an IPv6 address
    /// without brackets.
    #[must_use]
    pub fn host_name(&self) -> &str {
        self.url
            .host_str()
            .unwrap_or_default()
            .trim_start_matches('[')
            .trim_end_matches(']')
    }

    /// Returns the parsed URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Joins an absolute API path (starting with `/`) onto the instance URL,
    /// keeping any base path. Percent-encoded segments are kept as they are.
    #[must_use]
    pub fn join(&self, path: &str) -> Url {
        let mut url = self.url.clone();
        url.set_path(&format!("{}{}", self.url.path().trim_end_matches('/'), path));
        url
    }
}

impl AsRef<str> for InstanceUrl {
    fn as_ref(&self) -> &str {
        &self.base
    }
}

impl fmt::Display for InstanceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}

/// A Directus static access token.
///
/// The token is sent as a bearer credential on every request. Its `Debug`
/// output is masked so it never ends up in logs.
///
/// # Example
///
/// ```rust
/// use directus_api::AccessToken;
///
/// let token = AccessToken::new("static-token").unwrap();
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new validated access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_rejects_empty_string() {
        assert!(matches!(
            AccessToken::new(""),
            Err(ConfigError::EmptyAccessToken)
        ));
        assert!(matches!(
            AccessToken::new("   "),
            Err(ConfigError::EmptyAccessToken)
        ));
    }

    #[test]
    fn test_access_token_masks_value_in_debug() {
        let token = AccessToken::new("super-secret-token").unwrap();
        let debug_output = format!("{:?}", token);
        assert_eq!(debug_output, "AccessToken(*****)");
        assert!(!debug_output.contains("super-secret-token"));
    }

    #[test]
    fn test_instance_url_trims_trailing_slashes() {
        let url = InstanceUrl::new("https://cms.example.com///").unwrap();
        assert_eq!(url.as_ref(), "https://cms.example.com");
        assert_eq!(
            url.join("/items/posts").as_str(),
            "https://cms.example.com/items/posts"
        );
    }

    #[test]
    fn test_instance_url_keeps_port_and_path() {
        let url = InstanceUrl::new("http://localhost:8055/directus/").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_name(), "localhost");
        assert_eq!(url.as_ref(), "http://localhost:8055/directus");
        assert_eq!(url.join("/users").as_str(), "http://localhost:8055/directus/users");
    }

    #[test]
    fn test_instance_url_join_keeps_encoded_segments() {
        let url = InstanceUrl::new("https://cms.example.com").unwrap();
        assert_eq!(
            url.join("/items/blog%20posts/a%2Fb").as_str(),
            "https://cms.example.com/items/blog%20posts/a%2Fb"
        );
    }

    #[test]
    fn test_instance_url_host_of_ipv6_and_userinfo() {
        let url = InstanceUrl::new("http://[::1]:8055").unwrap();
        assert_eq!(url.host_name(), "::1");
        assert_eq!(url.join("/server/info").as_str(), "http://[::1]:8055/server/info");

        let url = InstanceUrl::new("https://user:pw@cms.example.com").unwrap();
        assert_eq!(url.host_name(), "cms.example.com");
    }

    #[test]
    fn test_instance_url_rejects_invalid() {
        assert!(InstanceUrl::new("cms.example.com").is_err());
        assert!(InstanceUrl::new("ftp://cms.example.com").is_err());
        assert!(InstanceUrl::new("https://").is_err());
        assert!(InstanceUrl::new("https://cms example.com").is_err());
        assert!(InstanceUrl::new("https://cms.example.com?debug=1").is_err());
        assert!(InstanceUrl::new("https://cms.example.com#top").is_err());
        assert!(InstanceUrl::new("mailto:admin@example.com").is_err());
        assert!(InstanceUrl::new("").is_err());
    }

    #[test]
    fn test_invalid_instance_url_reports_input() {
        assert_eq!(
            InstanceUrl::new(" https://cms example.com "),
            Err(ConfigError::InvalidInstanceUrl {
                url: "https://cms example.com".to_string()
            })
        );
    }
}
